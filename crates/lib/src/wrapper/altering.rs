//! Overlay decorator.
//!
//! An [`AlteringNode`] changes what a node exposes without touching the
//! store: it can add or replace properties, inject child nodes and hide
//! either. Hidden names win over everything else, overrides win over the
//! underlying node.
//!
//! Listings keep the underlying order. Hidden entries are skipped,
//! overridden entries are replaced in place, and override names the
//! underlying node does not have are appended in the order they were first
//! configured. The name filter applies to both.

use std::{any::Any, collections::HashSet, rc::Rc};

use super::{
    DefineParentNode, FallbackNode, ImmutableNode, NullableDelegateNode, StubProperty,
    WrapperError, errors::require_non_empty, stub_property,
};
use crate::{
    Result,
    node::{Item, NameFilter, Node, NodeRef, PropertyRef, is_same_object},
    value::Values,
};

#[derive(Debug, Clone, Default)]
struct Overlay {
    properties: Vec<(String, Values)>,
    children: Vec<(String, NodeRef)>,
    hidden_properties: HashSet<String>,
    hidden_children: HashSet<String>,
}

impl Overlay {
    fn property(&self, name: &str) -> Option<&Values> {
        self.properties
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, values)| values)
    }

    fn child(&self, name: &str) -> Option<&NodeRef> {
        self.children
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, node)| node)
    }
}

/// Replaces the entry for `name`, keeping its original position.
fn upsert<T>(entries: &mut Vec<(String, T)>, name: &str, value: T) {
    match entries.iter_mut().find(|(candidate, _)| candidate == name) {
        Some((_, existing)) => *existing = value,
        None => entries.push((name.to_string(), value)),
    }
}

fn collect_names<I, S>(argument: &str, names: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    if names.is_empty() {
        return Err(
            WrapperError::invalid_argument(argument, "at least one name is required").into(),
        );
    }
    for name in &names {
        require_non_empty(argument, name)?;
    }
    Ok(names)
}

/// A node with overridden and hidden properties and children.
///
/// Builders take and return the wrapper by value. Clones share the overlay
/// until one of them is reconfigured.
#[derive(Debug, Clone)]
pub struct AlteringNode {
    inner: NullableDelegateNode,
    overlay: Rc<Overlay>,
}

impl AlteringNode {
    pub fn new(node: NodeRef) -> Self {
        Self::from(NullableDelegateNode::new(node))
    }

    /// Exposes `values` as a read-only property `name`. Later calls for the
    /// same name replace earlier ones.
    pub fn with_property(mut self, name: &str, values: impl Into<Values>) -> Result<Self> {
        let values = values.into();
        stub_property::validate(name, &values)?;
        upsert(&mut Rc::make_mut(&mut self.overlay).properties, name, values);
        Ok(self)
    }

    /// Hides the named properties, including overridden ones.
    pub fn with_hidden_property<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = collect_names("names", names)?;
        Rc::make_mut(&mut self.overlay)
            .hidden_properties
            .extend(names);
        Ok(self)
    }

    /// Exposes `node` as the child `name`, parented to this wrapper.
    pub fn with_child_node(mut self, name: &str, node: NodeRef) -> Result<Self> {
        require_non_empty("name", name)?;
        upsert(&mut Rc::make_mut(&mut self.overlay).children, name, node);
        Ok(self)
    }

    /// Hides the named children, including injected ones.
    pub fn with_hidden_node<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = collect_names("names", names)?;
        Rc::make_mut(&mut self.overlay).hidden_children.extend(names);
        Ok(self)
    }

    /// Puts a [`FallbackNode`] between this overlay and its delegate.
    ///
    /// `configure` receives the fallback wrapper around the current delegate
    /// and returns it configured.
    pub fn with_fallbacks(
        self,
        configure: impl FnOnce(FallbackNode) -> Result<FallbackNode>,
    ) -> Result<Self> {
        let fallback = configure(FallbackNode::from(self.inner))?;
        Ok(Self {
            inner: NullableDelegateNode::new(Rc::new(fallback)),
            overlay: self.overlay,
        })
    }

    /// Puts an [`ImmutableNode`] between this overlay and its delegate.
    pub fn immutable(self) -> Self {
        Self {
            inner: NullableDelegateNode::new(Rc::new(ImmutableNode::from(self.inner))),
            overlay: self.overlay,
        }
    }

    /// Whether a delegate node is present underneath the overlay.
    pub fn has_delegate(&self) -> bool {
        self.inner.has_delegate()
    }

    fn stub(&self, name: &str, values: &Values) -> Result<PropertyRef> {
        let property = StubProperty::new(Rc::new(self.clone()), name, values.clone())?;
        Ok(Rc::new(property))
    }

    fn adopt(&self, node: &NodeRef) -> NodeRef {
        Rc::new(DefineParentNode::new(Rc::new(self.clone()), node.clone()))
    }

    fn own_property(&self, name: &str) -> Result<Option<PropertyRef>> {
        if self.overlay.hidden_properties.contains(name) {
            tracing::trace!(property = name, "Property hidden by overlay");
            return Ok(None);
        }
        match self.overlay.property(name) {
            Some(values) => self.stub(name, values).map(Some),
            None => self.inner.property(name),
        }
    }

    fn own_child(&self, name: &str) -> Result<Option<NodeRef>> {
        if self.overlay.hidden_children.contains(name) {
            tracing::trace!(node = name, "Child hidden by overlay");
            return Ok(None);
        }
        match self.overlay.child(name) {
            Some(node) => Ok(Some(self.adopt(node))),
            None => self.inner.node(name),
        }
    }
}

impl From<NullableDelegateNode> for AlteringNode {
    fn from(inner: NullableDelegateNode) -> Self {
        Self {
            inner,
            overlay: Rc::default(),
        }
    }
}

impl Node for AlteringNode {
    forward_node!(inner:
        name, path, depth, identifier, workspace_name, parent, ancestor,
        primary_node_type, mixin_node_types, is_node_type, is_checked_out, is_locked,
        add_node, set_property, order_before, set_primary_type, add_mixin, remove_mixin,
        remove, save, refresh, lock, unlock, checkin, checkout,
    );

    fn is_same(&self, other: &Item) -> Result<bool> {
        Ok(is_same_object(other, self) || self.inner.is_same(other)?)
    }

    fn property(&self, rel_path: &str) -> Result<Option<PropertyRef>> {
        match rel_path.rsplit_once('/') {
            None => self.own_property(rel_path),
            Some(("", _)) => self.inner.property(rel_path),
            Some((parent, name)) => match self.node(parent)? {
                Some(node) => node.property(name),
                None => Ok(None),
            },
        }
    }

    fn has_property(&self, rel_path: &str) -> Result<bool> {
        if rel_path.contains('/') {
            return Ok(self.property(rel_path)?.is_some());
        }
        if self.overlay.hidden_properties.contains(rel_path) {
            return Ok(false);
        }
        if self.overlay.property(rel_path).is_some() {
            return Ok(true);
        }
        self.inner.has_property(rel_path)
    }

    fn properties(&self, filter: &NameFilter) -> Result<Vec<PropertyRef>> {
        let matcher = filter.matcher();
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for property in self.inner.properties(filter)? {
            let name = property.name()?;
            if self.overlay.hidden_properties.contains(&name) {
                continue;
            }
            match self.overlay.property(&name) {
                Some(values) => merged.push(self.stub(&name, values)?),
                None => merged.push(property),
            }
            seen.insert(name);
        }
        for (name, values) in &self.overlay.properties {
            if seen.contains(name)
                || self.overlay.hidden_properties.contains(name)
                || !matcher.matches(name)
            {
                continue;
            }
            merged.push(self.stub(name, values)?);
        }
        Ok(merged)
    }

    fn node(&self, rel_path: &str) -> Result<Option<NodeRef>> {
        if rel_path.starts_with('/') {
            return self.inner.node(rel_path);
        }
        let (first, rest) = match rel_path.split_once('/') {
            Some((first, rest)) => (first, Some(rest)),
            None => (rel_path, None),
        };
        let child = match first {
            "." => Some(Rc::new(self.clone()) as NodeRef),
            ".." => self.inner.parent()?,
            name => self.own_child(name)?,
        };
        match (child, rest) {
            (Some(child), Some(rest)) if !rest.is_empty() => child.node(rest),
            (child, _) => Ok(child),
        }
    }

    fn has_node(&self, rel_path: &str) -> Result<bool> {
        if rel_path.contains('/') || rel_path == "." || rel_path == ".." {
            return Ok(self.node(rel_path)?.is_some());
        }
        if self.overlay.hidden_children.contains(rel_path) {
            return Ok(false);
        }
        if self.overlay.child(rel_path).is_some() {
            return Ok(true);
        }
        self.inner.has_node(rel_path)
    }

    fn nodes(&self, filter: &NameFilter) -> Result<Vec<NodeRef>> {
        let matcher = filter.matcher();
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for node in self.inner.nodes(filter)? {
            let name = node.name()?;
            if self.overlay.hidden_children.contains(&name) {
                continue;
            }
            match self.overlay.child(&name) {
                Some(injected) => merged.push(self.adopt(injected)),
                None => merged.push(node),
            }
            seen.insert(name);
        }
        for (name, injected) in &self.overlay.children {
            if seen.contains(name)
                || self.overlay.hidden_children.contains(name)
                || !matcher.matches(name)
            {
                continue;
            }
            merged.push(self.adopt(injected));
        }
        Ok(merged)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
