//! The node contract.
//!
//! Every content-store node and every decorator implements [`Node`]; every
//! property implements [`Property`]. Handles are reference counted
//! ([`NodeRef`], [`PropertyRef`]) and not thread-safe: a node graph, and any
//! decorator built over it, belongs to one logical operation at a time.
//!
//! Absence is not an error. Lookups return `Ok(None)`, listings return an
//! empty `Vec` and predicates return `false` when nothing is found; errors are
//! reserved for failures the store itself reports (stale handles, conflicts,
//! conversion failures) and for rejected operations.

pub mod errors;
pub mod node_type;
pub mod pattern;

use std::{any::Any, fmt, rc::Rc};

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::{
    Result,
    constants::ROOT_PATH,
    value::{PropertyType, Value, Values},
};

pub use errors::RepositoryError;
pub use node_type::{NodeDefinition, NodeType, NodeTypeRef, PropertyDefinition};
pub use pattern::{NameFilter, NameMatcher};

/// Shared handle to a node.
pub type NodeRef = Rc<dyn Node>;

/// Shared handle to a property.
pub type PropertyRef = Rc<dyn Property>;

/// Either kind of item in the content tree.
#[derive(Debug, Clone)]
pub enum Item {
    Node(NodeRef),
    Property(PropertyRef),
}

impl Item {
    pub fn is_node(&self) -> bool {
        matches!(self, Item::Node(_))
    }

    pub fn as_node(&self) -> Option<&NodeRef> {
        match self {
            Item::Node(node) => Some(node),
            Item::Property(_) => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyRef> {
        match self {
            Item::Property(property) => Some(property),
            Item::Node(_) => None,
        }
    }

    pub fn name(&self) -> Result<String> {
        match self {
            Item::Node(node) => node.name(),
            Item::Property(property) => property.name(),
        }
    }

    pub fn path(&self) -> Result<String> {
        match self {
            Item::Node(node) => node.path(),
            Item::Property(property) => property.path(),
        }
    }

    pub fn depth(&self) -> Result<usize> {
        match self {
            Item::Node(node) => node.depth(),
            Item::Property(property) => property.depth(),
        }
    }
}

impl From<NodeRef> for Item {
    fn from(node: NodeRef) -> Self {
        Item::Node(node)
    }
}

impl From<PropertyRef> for Item {
    fn from(property: PropertyRef) -> Self {
        Item::Property(property)
    }
}

/// A node in the content tree.
///
/// Relative paths are slash-separated names, with `.` and `..` allowed.
pub trait Node: fmt::Debug {
    // ===== Identity and hierarchy =====

    fn name(&self) -> Result<String>;

    fn path(&self) -> Result<String>;

    /// Depth below the root; the root has depth 0.
    fn depth(&self) -> Result<usize>;

    /// Opaque identifier; empty for synthetic nodes.
    fn identifier(&self) -> Result<String>;

    /// Name of the workspace the node belongs to, if any.
    fn workspace_name(&self) -> Result<Option<String>>;

    fn parent(&self) -> Result<Option<NodeRef>>;

    /// The ancestor at `depth`; `None` when `depth` exceeds this node's depth.
    fn ancestor(&self, depth: usize) -> Result<Option<NodeRef>>;

    /// Returns true if `other` denotes the same repository node.
    fn is_same(&self, other: &Item) -> Result<bool>;

    // ===== Typing =====

    fn primary_node_type(&self) -> Result<NodeTypeRef>;

    fn mixin_node_types(&self) -> Result<Vec<NodeTypeRef>>;

    fn is_node_type(&self, name: &str) -> Result<bool>;

    // ===== Reading =====

    fn property(&self, rel_path: &str) -> Result<Option<PropertyRef>>;

    fn has_property(&self, rel_path: &str) -> Result<bool>;

    fn properties(&self, filter: &NameFilter) -> Result<Vec<PropertyRef>>;

    fn has_properties(&self) -> Result<bool> {
        Ok(!self.properties(&NameFilter::All)?.is_empty())
    }

    fn node(&self, rel_path: &str) -> Result<Option<NodeRef>>;

    fn has_node(&self, rel_path: &str) -> Result<bool>;

    fn nodes(&self, filter: &NameFilter) -> Result<Vec<NodeRef>>;

    fn has_nodes(&self) -> Result<bool> {
        Ok(!self.nodes(&NameFilter::All)?.is_empty())
    }

    fn is_checked_out(&self) -> Result<bool>;

    fn is_locked(&self) -> Result<bool>;

    // ===== Mutation =====

    fn add_node(&self, rel_path: &str, primary_type: Option<&str>) -> Result<Option<NodeRef>>;

    /// Sets a property; `None` removes it.
    fn set_property(&self, name: &str, values: Option<Values>) -> Result<Option<PropertyRef>>;

    /// Moves the child `source` before `destination`, or to the end.
    fn order_before(&self, source: &str, destination: Option<&str>) -> Result<()>;

    fn set_primary_type(&self, name: &str) -> Result<()>;

    fn add_mixin(&self, name: &str) -> Result<()>;

    fn remove_mixin(&self, name: &str) -> Result<()>;

    fn remove(&self) -> Result<()>;

    fn save(&self) -> Result<()>;

    fn refresh(&self, keep_changes: bool) -> Result<()>;

    fn lock(&self) -> Result<()>;

    fn unlock(&self) -> Result<()>;

    fn checkin(&self) -> Result<()>;

    fn checkout(&self) -> Result<()>;

    /// Concrete type access, used to recognise decorators.
    fn as_any(&self) -> &dyn Any;
}

/// A named, typed value attached to a node.
pub trait Property: fmt::Debug {
    fn name(&self) -> Result<String>;

    fn path(&self) -> Result<String>;

    fn depth(&self) -> Result<usize>;

    fn parent(&self) -> Result<NodeRef>;

    /// The item at `depth`: the property itself at its own depth, an ancestor
    /// node above it, `None` below it.
    fn ancestor(&self, depth: usize) -> Result<Option<Item>>;

    fn workspace_name(&self) -> Result<Option<String>>;

    fn is_same(&self, other: &Item) -> Result<bool>;

    fn property_type(&self) -> Result<PropertyType>;

    fn is_multiple(&self) -> Result<bool>;

    /// The single value of this property.
    fn value(&self) -> Result<Value>;

    /// All values of this property.
    fn values(&self) -> Result<Vec<Value>>;

    /// Nodes referenced by a reference-typed property.
    fn referenced_nodes(&self) -> Result<Vec<NodeRef>>;

    fn set_value(&self, values: Option<Values>) -> Result<()>;

    fn remove(&self) -> Result<()>;

    fn save(&self) -> Result<()>;

    fn refresh(&self, keep_changes: bool) -> Result<()>;

    fn accept(&self, visitor: &mut dyn PropertyVisitor) -> Result<()>;

    fn as_any(&self) -> &dyn Any;

    fn get_string(&self) -> Result<String> {
        self.value()?.get_string()
    }

    fn get_long(&self) -> Result<i64> {
        self.value()?.get_long()
    }

    fn get_double(&self) -> Result<f64> {
        self.value()?.get_double()
    }

    fn get_decimal(&self) -> Result<Decimal> {
        self.value()?.get_decimal()
    }

    fn get_boolean(&self) -> Result<bool> {
        self.value()?.get_boolean()
    }

    fn get_date(&self) -> Result<DateTime<FixedOffset>> {
        self.value()?.get_date()
    }

    fn get_binary(&self) -> Result<Vec<u8>> {
        self.value()?.get_binary()
    }

    fn length(&self) -> Result<usize> {
        self.value()?.length()
    }

    fn lengths(&self) -> Result<Vec<usize>> {
        self.values()?.iter().map(Value::length).collect()
    }

    /// The first referenced node, if any.
    fn node(&self) -> Result<Option<NodeRef>> {
        Ok(self.referenced_nodes()?.into_iter().next())
    }
}

/// Visitor accepted by [`Property::accept`].
pub trait PropertyVisitor {
    fn visit_property(&mut self, property: &dyn Property) -> Result<()>;
}

/// Convenience methods available on every node.
pub trait NodeExt: Node {
    /// Sets a property from anything convertible into [`Values`].
    fn set_property_value<V: Into<Values>>(
        &self,
        name: &str,
        values: V,
    ) -> Result<Option<PropertyRef>> {
        self.set_property(name, Some(values.into()))
    }

    /// The string form of a property, if present.
    fn string_property(&self, rel_path: &str) -> Result<Option<String>> {
        self.property(rel_path)?.map(|p| p.get_string()).transpose()
    }

    /// Names of the children passing `filter`, in listing order.
    fn child_names(&self, filter: &NameFilter) -> Result<Vec<String>> {
        self.nodes(filter)?.iter().map(|n| n.name()).collect()
    }

    /// Names of the properties passing `filter`, in listing order.
    fn property_names(&self, filter: &NameFilter) -> Result<Vec<String>> {
        self.properties(filter)?.iter().map(|p| p.name()).collect()
    }
}

impl<N: Node + ?Sized> NodeExt for N {}

/// Joins a parent path and a child name without doubling the root slash.
pub fn child_path(parent_path: &str, name: &str) -> String {
    if parent_path == ROOT_PATH || parent_path.is_empty() {
        format!("/{name}")
    } else {
        format!("{parent_path}/{name}")
    }
}

/// Returns true if `item` is a handle to exactly `this` object.
pub(crate) fn is_same_object<T: ?Sized>(item: &Item, this: &T) -> bool {
    let this = this as *const T;
    match item {
        Item::Node(node) => std::ptr::addr_eq(Rc::as_ptr(node), this),
        Item::Property(property) => std::ptr::addr_eq(Rc::as_ptr(property), this),
    }
}
