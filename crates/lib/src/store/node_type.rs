use crate::{
    constants::NT_BASE,
    node::{NodeDefinition, NodeType, PropertyDefinition},
    value::Values,
};

/// Node type descriptor used by the in-memory store.
///
/// Types carry no definitions: every child and property is allowed. Primary
/// types extend `nt:base`; mixins extend nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleNodeType {
    name: String,
    supertypes: Vec<String>,
    mixin: bool,
}

impl SimpleNodeType {
    pub fn primary(name: impl Into<String>) -> Self {
        let name = name.into();
        let supertypes = if name == NT_BASE {
            Vec::new()
        } else {
            vec![NT_BASE.to_string()]
        };
        Self {
            name,
            supertypes,
            mixin: false,
        }
    }

    pub fn mixin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
            mixin: true,
        }
    }
}

impl NodeType for SimpleNodeType {
    fn name(&self) -> &str {
        &self.name
    }

    fn supertype_names(&self) -> Vec<String> {
        self.supertypes.clone()
    }

    fn is_mixin(&self) -> bool {
        self.mixin
    }

    fn is_abstract(&self) -> bool {
        false
    }

    fn is_queryable(&self) -> bool {
        true
    }

    fn has_orderable_child_nodes(&self) -> bool {
        true
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

    fn is_node_type(&self, name: &str) -> bool {
        self.name == name || self.supertypes.iter().any(|supertype| supertype == name)
    }

    fn can_add_child_node(&self, _name: &str, _primary_type: Option<&str>) -> bool {
        true
    }

    fn can_set_property(&self, _name: &str, _values: Option<&Values>) -> bool {
        true
    }

    fn can_remove_item(&self, _name: &str) -> bool {
        true
    }
}
