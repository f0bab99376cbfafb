//! Node type descriptors.

use std::{fmt, rc::Rc};

use crate::value::{PropertyType, Values};

/// Shared handle to a node type descriptor.
pub type NodeTypeRef = Rc<dyn NodeType>;

/// Describes the type of a node: its name, inheritance, flags and the
/// definitions of the properties and children it allows.
pub trait NodeType: fmt::Debug {
    fn name(&self) -> &str;

    /// Names of the declared supertypes.
    fn supertype_names(&self) -> Vec<String>;

    fn is_mixin(&self) -> bool;

    fn is_abstract(&self) -> bool;

    fn is_queryable(&self) -> bool;

    fn has_orderable_child_nodes(&self) -> bool;

    fn primary_item_name(&self) -> Option<String>;

    fn property_definitions(&self) -> Vec<PropertyDefinition>;

    fn child_node_definitions(&self) -> Vec<NodeDefinition>;

    /// Returns true if this type is, or inherits from, `name`.
    fn is_node_type(&self, name: &str) -> bool;

    fn can_add_child_node(&self, name: &str, primary_type: Option<&str>) -> bool;

    fn can_set_property(&self, name: &str, values: Option<&Values>) -> bool;

    fn can_remove_item(&self, name: &str) -> bool;
}

/// Definition of a property allowed by a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    /// Property name, or `*` for a residual definition
    pub name: String,
    pub required_type: Option<PropertyType>,
    pub multiple: bool,
    pub mandatory: bool,
    pub protected: bool,
}

/// Definition of a child node allowed by a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDefinition {
    /// Child name, or `*` for a residual definition
    pub name: String,
    pub required_primary_types: Vec<String>,
    pub default_primary_type: Option<String>,
    pub mandatory: bool,
    pub protected: bool,
}
