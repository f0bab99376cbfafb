use std::{any::Any, rc::Rc};

use super::{PlaceholderNodeType, errors::require_non_empty};
use crate::{
    Result,
    node::{Item, NameFilter, Node, NodeRef, NodeTypeRef, PropertyRef, is_same_object},
    value::Values,
};

#[derive(Debug, Clone)]
enum Delegate {
    Present(NodeRef),
    Absent { name: String, primary_type: String },
}

/// A node whose delegate may be absent.
///
/// With a delegate every call forwards unchanged, errors included. Without
/// one the node behaves as an empty synthetic node: it reports its configured
/// name, a path of `/name`, depth 0, an empty identifier and a
/// [`PlaceholderNodeType`]; lookups find nothing and mutations are silently
/// ignored.
#[derive(Debug, Clone)]
pub struct NullableDelegateNode {
    delegate: Delegate,
}

impl NullableDelegateNode {
    /// Wraps an existing node.
    pub fn new(node: NodeRef) -> Self {
        Self {
            delegate: Delegate::Present(node),
        }
    }

    /// Creates a synthetic node with no delegate.
    ///
    /// Both `name` and `primary_type` must be non-empty.
    pub fn synthetic(name: &str, primary_type: &str) -> Result<Self> {
        require_non_empty("name", name)?;
        require_non_empty("primary_type", primary_type)?;
        Ok(Self {
            delegate: Delegate::Absent {
                name: name.to_string(),
                primary_type: primary_type.to_string(),
            },
        })
    }

    pub fn has_delegate(&self) -> bool {
        matches!(self.delegate, Delegate::Present(_))
    }

    pub fn delegate(&self) -> Option<&NodeRef> {
        match &self.delegate {
            Delegate::Present(node) => Some(node),
            Delegate::Absent { .. } => None,
        }
    }

    /// Returns the delegate itself, or this synthetic node as a handle.
    pub fn into_node_ref(self) -> NodeRef {
        match self.delegate {
            Delegate::Present(node) => node,
            absent @ Delegate::Absent { .. } => Rc::new(Self { delegate: absent }),
        }
    }

    fn ignored(&self, operation: &str) -> Result<()> {
        if let Delegate::Absent { name, .. } = &self.delegate {
            tracing::trace!(node = %name, operation, "Ignored mutation on synthetic node");
        }
        Ok(())
    }
}

impl From<NodeRef> for NullableDelegateNode {
    fn from(node: NodeRef) -> Self {
        Self::new(node)
    }
}

impl Node for NullableDelegateNode {
    fn name(&self) -> Result<String> {
        match &self.delegate {
            Delegate::Present(node) => node.name(),
            Delegate::Absent { name, .. } => Ok(name.clone()),
        }
    }

    fn path(&self) -> Result<String> {
        match &self.delegate {
            Delegate::Present(node) => node.path(),
            Delegate::Absent { name, .. } => Ok(format!("/{name}")),
        }
    }

    fn depth(&self) -> Result<usize> {
        match &self.delegate {
            Delegate::Present(node) => node.depth(),
            Delegate::Absent { .. } => Ok(0),
        }
    }

    fn identifier(&self) -> Result<String> {
        match &self.delegate {
            Delegate::Present(node) => node.identifier(),
            Delegate::Absent { .. } => Ok(String::new()),
        }
    }

    fn workspace_name(&self) -> Result<Option<String>> {
        match &self.delegate {
            Delegate::Present(node) => node.workspace_name(),
            Delegate::Absent { .. } => Ok(None),
        }
    }

    fn parent(&self) -> Result<Option<NodeRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.parent(),
            Delegate::Absent { .. } => Ok(None),
        }
    }

    fn ancestor(&self, depth: usize) -> Result<Option<NodeRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.ancestor(depth),
            Delegate::Absent { .. } => Ok(None),
        }
    }

    fn is_same(&self, other: &Item) -> Result<bool> {
        if is_same_object(other, self) {
            return Ok(true);
        }
        let (Delegate::Present(node), Item::Node(other)) = (&self.delegate, other) else {
            return Ok(false);
        };
        Ok(other.identifier()? == node.identifier()?
            && other.workspace_name()? == node.workspace_name()?)
    }

    fn primary_node_type(&self) -> Result<NodeTypeRef> {
        match &self.delegate {
            Delegate::Present(node) => node.primary_node_type(),
            Delegate::Absent { primary_type, .. } => {
                Ok(Rc::new(PlaceholderNodeType::new(primary_type.clone())))
            }
        }
    }

    fn mixin_node_types(&self) -> Result<Vec<NodeTypeRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.mixin_node_types(),
            Delegate::Absent { .. } => Ok(Vec::new()),
        }
    }

    fn is_node_type(&self, name: &str) -> Result<bool> {
        match &self.delegate {
            Delegate::Present(node) => node.is_node_type(name),
            Delegate::Absent { .. } => Ok(false),
        }
    }

    fn property(&self, rel_path: &str) -> Result<Option<PropertyRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.property(rel_path),
            Delegate::Absent { .. } => Ok(None),
        }
    }

    fn has_property(&self, rel_path: &str) -> Result<bool> {
        match &self.delegate {
            Delegate::Present(node) => node.has_property(rel_path),
            Delegate::Absent { .. } => Ok(false),
        }
    }

    fn properties(&self, filter: &NameFilter) -> Result<Vec<PropertyRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.properties(filter),
            Delegate::Absent { .. } => Ok(Vec::new()),
        }
    }

    fn node(&self, rel_path: &str) -> Result<Option<NodeRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.node(rel_path),
            Delegate::Absent { .. } => Ok(None),
        }
    }

    fn has_node(&self, rel_path: &str) -> Result<bool> {
        match &self.delegate {
            Delegate::Present(node) => node.has_node(rel_path),
            Delegate::Absent { .. } => Ok(false),
        }
    }

    fn nodes(&self, filter: &NameFilter) -> Result<Vec<NodeRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.nodes(filter),
            Delegate::Absent { .. } => Ok(Vec::new()),
        }
    }

    fn is_checked_out(&self) -> Result<bool> {
        match &self.delegate {
            Delegate::Present(node) => node.is_checked_out(),
            Delegate::Absent { .. } => Ok(false),
        }
    }

    fn is_locked(&self) -> Result<bool> {
        match &self.delegate {
            Delegate::Present(node) => node.is_locked(),
            Delegate::Absent { .. } => Ok(false),
        }
    }

    fn add_node(&self, rel_path: &str, primary_type: Option<&str>) -> Result<Option<NodeRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.add_node(rel_path, primary_type),
            Delegate::Absent { .. } => self.ignored("add node").map(|()| None),
        }
    }

    fn set_property(&self, name: &str, values: Option<Values>) -> Result<Option<PropertyRef>> {
        match &self.delegate {
            Delegate::Present(node) => node.set_property(name, values),
            Delegate::Absent { .. } => self.ignored("set property").map(|()| None),
        }
    }

    fn order_before(&self, source: &str, destination: Option<&str>) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.order_before(source, destination),
            Delegate::Absent { .. } => self.ignored("order before"),
        }
    }

    fn set_primary_type(&self, name: &str) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.set_primary_type(name),
            Delegate::Absent { .. } => self.ignored("set primary type"),
        }
    }

    fn add_mixin(&self, name: &str) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.add_mixin(name),
            Delegate::Absent { .. } => self.ignored("add mixin"),
        }
    }

    fn remove_mixin(&self, name: &str) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.remove_mixin(name),
            Delegate::Absent { .. } => self.ignored("remove mixin"),
        }
    }

    fn remove(&self) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.remove(),
            Delegate::Absent { .. } => self.ignored("remove"),
        }
    }

    fn save(&self) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.save(),
            Delegate::Absent { .. } => self.ignored("save"),
        }
    }

    fn refresh(&self, keep_changes: bool) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.refresh(keep_changes),
            Delegate::Absent { .. } => self.ignored("refresh"),
        }
    }

    fn lock(&self) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.lock(),
            Delegate::Absent { .. } => self.ignored("lock"),
        }
    }

    fn unlock(&self) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.unlock(),
            Delegate::Absent { .. } => self.ignored("unlock"),
        }
    }

    fn checkin(&self) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.checkin(),
            Delegate::Absent { .. } => self.ignored("checkin"),
        }
    }

    fn checkout(&self) -> Result<()> {
        match &self.delegate {
            Delegate::Present(node) => node.checkout(),
            Delegate::Absent { .. } => self.ignored("checkout"),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
