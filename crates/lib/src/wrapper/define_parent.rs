use std::{any::Any, rc::Rc};

use super::NullableDelegateNode;
use crate::{
    Result,
    node::{
        Item, NameFilter, Node, NodeRef, Property, PropertyRef, PropertyVisitor, child_path,
        is_same_object,
    },
    value::{PropertyType, Value, Values},
};

/// Presents a node as a child of a different, possibly synthetic, parent.
///
/// Path, depth, parent and ancestors are computed from the given parent.
/// Children and properties reached through this wrapper are wrapped in turn,
/// so the synthetic hierarchy stays consistent all the way down. A child that
/// is already a `DefineParentNode` placed directly below this node's path is
/// passed through as is.
#[derive(Debug, Clone)]
pub struct DefineParentNode {
    parent: NodeRef,
    inner: NullableDelegateNode,
}

impl DefineParentNode {
    pub fn new(parent: NodeRef, node: NodeRef) -> Self {
        Self {
            parent,
            inner: NullableDelegateNode::new(node),
        }
    }

    /// The wrapped node.
    pub fn delegate(&self) -> Option<&NodeRef> {
        self.inner.delegate()
    }

    /// The synthetic parent.
    pub fn defined_parent(&self) -> &NodeRef {
        &self.parent
    }

    /// Wraps `child` with this node as its parent, unless it already reports
    /// a position directly below this node.
    fn adopt(&self, child: NodeRef) -> Result<NodeRef> {
        if let Some(existing) = child.as_any().downcast_ref::<DefineParentNode>() {
            if existing.parent.path()? == self.path()? {
                return Ok(child);
            }
        }
        Ok(Rc::new(DefineParentNode::new(Rc::new(self.clone()), child)))
    }

    fn adopt_property(&self, property: PropertyRef) -> PropertyRef {
        Rc::new(DefinedParentProperty {
            parent: Rc::new(self.clone()),
            inner: property,
        })
    }

    fn step(&self, segment: &str) -> Result<Option<NodeRef>> {
        match segment {
            "." => Ok(Some(Rc::new(self.clone()))),
            ".." => Ok(Some(self.parent.clone())),
            name => self.inner.node(name)?.map(|child| self.adopt(child)).transpose(),
        }
    }
}

impl Node for DefineParentNode {
    forward_node!(inner:
        name, identifier, workspace_name, primary_node_type, mixin_node_types, is_node_type,
        has_property, is_checked_out, is_locked,
        add_node, order_before, set_primary_type, add_mixin, remove_mixin,
        remove, save, refresh, lock, unlock, checkin, checkout,
    );

    fn path(&self) -> Result<String> {
        Ok(child_path(&self.parent.path()?, &self.inner.name()?))
    }

    fn depth(&self) -> Result<usize> {
        Ok(self.parent.depth()? + 1)
    }

    fn parent(&self) -> Result<Option<NodeRef>> {
        Ok(Some(self.parent.clone()))
    }

    fn ancestor(&self, depth: usize) -> Result<Option<NodeRef>> {
        let own = self.depth()?;
        if depth == own {
            Ok(Some(Rc::new(self.clone())))
        } else if depth < own {
            self.parent.ancestor(depth)
        } else {
            Ok(None)
        }
    }

    fn is_same(&self, other: &Item) -> Result<bool> {
        Ok(is_same_object(other, self) || self.inner.is_same(other)?)
    }

    fn node(&self, rel_path: &str) -> Result<Option<NodeRef>> {
        if rel_path.starts_with('/') {
            return self.inner.node(rel_path);
        }
        let mut segments = rel_path.split('/').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return self.inner.node(rel_path);
        };
        let mut current = self.step(first)?;
        for segment in segments {
            let Some(node) = current else {
                return Ok(None);
            };
            current = node.node(segment)?;
        }
        Ok(current)
    }

    fn has_node(&self, rel_path: &str) -> Result<bool> {
        Ok(self.node(rel_path)?.is_some())
    }

    fn nodes(&self, filter: &NameFilter) -> Result<Vec<NodeRef>> {
        self.inner
            .nodes(filter)?
            .into_iter()
            .map(|child| self.adopt(child))
            .collect()
    }

    fn property(&self, rel_path: &str) -> Result<Option<PropertyRef>> {
        if rel_path.starts_with('/') {
            return self.inner.property(rel_path);
        }
        match rel_path.rsplit_once('/') {
            Some((node_path, name)) => match self.node(node_path)? {
                Some(node) => node.property(name),
                None => Ok(None),
            },
            None => Ok(self
                .inner
                .property(rel_path)?
                .map(|property| self.adopt_property(property))),
        }
    }

    fn properties(&self, filter: &NameFilter) -> Result<Vec<PropertyRef>> {
        Ok(self
            .inner
            .properties(filter)?
            .into_iter()
            .map(|property| self.adopt_property(property))
            .collect())
    }

    fn set_property(&self, name: &str, values: Option<Values>) -> Result<Option<PropertyRef>> {
        Ok(self
            .inner
            .set_property(name, values)?
            .map(|property| self.adopt_property(property)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A property of a [`DefineParentNode`], positioned below that node.
#[derive(Debug, Clone)]
struct DefinedParentProperty {
    parent: NodeRef,
    inner: PropertyRef,
}

impl Property for DefinedParentProperty {
    fn name(&self) -> Result<String> {
        self.inner.name()
    }

    fn path(&self) -> Result<String> {
        Ok(child_path(&self.parent.path()?, &self.inner.name()?))
    }

    fn depth(&self) -> Result<usize> {
        Ok(self.parent.depth()? + 1)
    }

    fn parent(&self) -> Result<NodeRef> {
        Ok(self.parent.clone())
    }

    fn ancestor(&self, depth: usize) -> Result<Option<Item>> {
        let own = self.depth()?;
        if depth == own {
            Ok(Some(Item::Property(Rc::new(self.clone()))))
        } else if depth < own {
            Ok(self.parent.ancestor(depth)?.map(Item::Node))
        } else {
            Ok(None)
        }
    }

    fn workspace_name(&self) -> Result<Option<String>> {
        self.inner.workspace_name()
    }

    fn is_same(&self, other: &Item) -> Result<bool> {
        Ok(is_same_object(other, self) || self.inner.is_same(other)?)
    }

    fn property_type(&self) -> Result<PropertyType> {
        self.inner.property_type()
    }

    fn is_multiple(&self) -> Result<bool> {
        self.inner.is_multiple()
    }

    fn value(&self) -> Result<Value> {
        self.inner.value()
    }

    fn values(&self) -> Result<Vec<Value>> {
        self.inner.values()
    }

    fn referenced_nodes(&self) -> Result<Vec<NodeRef>> {
        self.inner.referenced_nodes()
    }

    fn set_value(&self, values: Option<Values>) -> Result<()> {
        self.inner.set_value(values)
    }

    fn remove(&self) -> Result<()> {
        self.inner.remove()
    }

    fn save(&self) -> Result<()> {
        self.inner.save()
    }

    fn refresh(&self, keep_changes: bool) -> Result<()> {
        self.inner.refresh(keep_changes)
    }

    fn accept(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
        self.inner.accept(visitor)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
