use std::any::Any;

use super::{NullableDelegateNode, WrapperError};
use crate::{
    Result,
    constants::IMMUTABLE_NODE,
    node::{Item, Node, NodeRef, PropertyRef, is_same_object},
    value::Values,
};

/// A read-only view of a node.
///
/// Reads forward to the delegate; every mutation fails with an
/// unsupported-operation error, with or without a delegate.
#[derive(Debug, Clone)]
pub struct ImmutableNode {
    inner: NullableDelegateNode,
}

impl ImmutableNode {
    pub fn new(node: NodeRef) -> Self {
        Self::from(NullableDelegateNode::new(node))
    }

    pub fn has_delegate(&self) -> bool {
        self.inner.has_delegate()
    }

    fn rejected<T>(&self, operation: &str) -> Result<T> {
        tracing::debug!(operation, "Rejected mutation of immutable node");
        Err(WrapperError::unsupported(operation, IMMUTABLE_NODE).into())
    }
}

impl From<NullableDelegateNode> for ImmutableNode {
    fn from(inner: NullableDelegateNode) -> Self {
        Self { inner }
    }
}

impl Node for ImmutableNode {
    forward_node!(inner:
        name, path, depth, identifier, workspace_name, parent, ancestor,
        primary_node_type, mixin_node_types, is_node_type,
        property, has_property, properties, node, has_node, nodes,
        is_checked_out, is_locked,
    );

    fn is_same(&self, other: &Item) -> Result<bool> {
        Ok(is_same_object(other, self) || self.inner.is_same(other)?)
    }

    fn add_node(&self, _rel_path: &str, _primary_type: Option<&str>) -> Result<Option<NodeRef>> {
        self.rejected("add node")
    }

    fn set_property(&self, _name: &str, _values: Option<Values>) -> Result<Option<PropertyRef>> {
        self.rejected("set property")
    }

    fn order_before(&self, _source: &str, _destination: Option<&str>) -> Result<()> {
        self.rejected("order before")
    }

    fn set_primary_type(&self, _name: &str) -> Result<()> {
        self.rejected("set primary type")
    }

    fn add_mixin(&self, _name: &str) -> Result<()> {
        self.rejected("add mixin")
    }

    fn remove_mixin(&self, _name: &str) -> Result<()> {
        self.rejected("remove mixin")
    }

    fn remove(&self) -> Result<()> {
        self.rejected("remove")
    }

    fn save(&self) -> Result<()> {
        self.rejected("save")
    }

    fn refresh(&self, _keep_changes: bool) -> Result<()> {
        self.rejected("refresh")
    }

    fn lock(&self) -> Result<()> {
        self.rejected("lock")
    }

    fn unlock(&self) -> Result<()> {
        self.rejected("unlock")
    }

    fn checkin(&self) -> Result<()> {
        self.rejected("checkin")
    }

    fn checkout(&self) -> Result<()> {
        self.rejected("checkout")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
