use crate::{
    node::{NodeDefinition, NodeType, PropertyDefinition},
    value::Values,
};

/// Type descriptor for synthetic nodes that have no real type definition.
///
/// It reports the name it was given and otherwise answers every question with
/// an empty list, `false` or `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderNodeType {
    name: String,
}

impl PlaceholderNodeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl NodeType for PlaceholderNodeType {
    fn name(&self) -> &str {
        &self.name
    }

    fn supertype_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn is_mixin(&self) -> bool {
        false
    }

    fn is_abstract(&self) -> bool {
        false
    }

    fn is_queryable(&self) -> bool {
        false
    }

    fn has_orderable_child_nodes(&self) -> bool {
        false
    }

    fn primary_item_name(&self) -> Option<String> {
        None
    }

    fn property_definitions(&self) -> Vec<PropertyDefinition> {
        Vec::new()
    }

    fn child_node_definitions(&self) -> Vec<NodeDefinition> {
        Vec::new()
    }

    fn is_node_type(&self, _name: &str) -> bool {
        false
    }

    fn can_add_child_node(&self, _name: &str, _primary_type: Option<&str>) -> bool {
        false
    }

    fn can_set_property(&self, _name: &str, _values: Option<&Values>) -> bool {
        false
    }

    fn can_remove_item(&self, _name: &str) -> bool {
        false
    }
}
