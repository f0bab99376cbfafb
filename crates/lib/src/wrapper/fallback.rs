//! Value-based fallback between nodes.
//!
//! A [`FallbackNode`] answers lookups from its primary delegate when the
//! result is acceptable, and otherwise walks an ordered list of fallback
//! nodes. Acceptance is decided by predicates, never by errors: a lookup that
//! finds nothing acceptable anywhere yields `None` or an empty listing, while
//! errors raised by any consulted node propagate unchanged.

use std::{any::Any, fmt, iter, rc::Rc};

use super::{NullableDelegateNode, WrapperError, errors::require_non_empty};
use crate::{
    Result,
    node::{Item, NameFilter, Node, NodeRef, Property, PropertyRef, is_same_object},
};

/// A listing offered to a [`ListingAcceptance`] predicate.
#[derive(Debug, Clone, Copy)]
pub enum Listing<'a> {
    Nodes(&'a [NodeRef]),
    Properties(&'a [PropertyRef]),
}

impl Listing<'_> {
    pub fn len(&self) -> usize {
        match self {
            Listing::Nodes(nodes) => nodes.len(),
            Listing::Properties(properties) => properties.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decides whether a candidate property ends the search.
pub type PropertyAcceptance = Rc<dyn Fn(&dyn Property) -> bool>;

/// Decides whether a candidate listing ends the search.
pub type ListingAcceptance = Rc<dyn Fn(Listing<'_>) -> bool>;

/// Accepts properties whose string form is non-empty. A multi-valued
/// property is accepted when any of its values is.
fn has_string_value(property: &dyn Property) -> bool {
    let non_empty = |value: Result<String>| value.is_ok_and(|value| !value.is_empty());
    if property.is_multiple().unwrap_or(false) {
        property
            .values()
            .is_ok_and(|values| values.iter().any(|value| non_empty(value.get_string())))
    } else {
        non_empty(property.get_string())
    }
}

fn is_non_empty(listing: Listing<'_>) -> bool {
    !listing.is_empty()
}

/// A node that resolves properties and children through fallback nodes.
///
/// ```
/// # use node_decorators::{Node, NodeExt, store::MemoryWorkspace, wrapper::FallbackNode};
/// let workspace = MemoryWorkspace::default();
/// let root = workspace.root_node();
/// let page = root.add_node("page", None).unwrap().unwrap();
/// let defaults = root.add_node("defaults", None).unwrap().unwrap();
/// defaults.set_property_value("title", "Untitled").unwrap();
///
/// let view = FallbackNode::for_node(page).with_fallback_nodes([defaults]).unwrap();
/// assert_eq!(view.string_property("title").unwrap().as_deref(), Some("Untitled"));
/// ```
#[derive(Clone)]
pub struct FallbackNode {
    inner: NullableDelegateNode,
    fallbacks: Vec<NodeRef>,
    property_acceptance: PropertyAcceptance,
    listing_acceptance: ListingAcceptance,
    name_fallbacks: Vec<(String, Vec<String>)>,
}

impl FallbackNode {
    pub fn for_node(node: NodeRef) -> Self {
        Self::from(NullableDelegateNode::new(node))
    }

    /// Appends `nodes` to the fallback chain. At least one node is required.
    pub fn with_fallback_nodes(
        mut self,
        nodes: impl IntoIterator<Item = NodeRef>,
    ) -> Result<Self> {
        let before = self.fallbacks.len();
        self.fallbacks.extend(nodes);
        if self.fallbacks.len() == before {
            return Err(WrapperError::invalid_argument(
                "nodes",
                "at least one fallback node is required",
            )
            .into());
        }
        Ok(self)
    }

    /// Replaces the predicate deciding whether a property is acceptable.
    pub fn with_property_acceptance(
        mut self,
        acceptance: impl Fn(&dyn Property) -> bool + 'static,
    ) -> Self {
        self.property_acceptance = Rc::new(acceptance);
        self
    }

    /// Replaces the predicate deciding whether a listing is acceptable.
    pub fn with_listing_acceptance(
        mut self,
        acceptance: impl Fn(Listing<'_>) -> bool + 'static,
    ) -> Self {
        self.listing_acceptance = Rc::new(acceptance);
        self
    }

    /// Tries `alternates`, in order, whenever `name` has no acceptable value
    /// on a node. Alternates are tried on each node before moving to the next.
    pub fn with_property_name_fallback<I, S>(mut self, name: &str, alternates: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        require_non_empty("name", name)?;
        let alternates: Vec<String> = alternates.into_iter().map(Into::into).collect();
        if alternates.is_empty() {
            return Err(WrapperError::invalid_argument(
                "alternates",
                "at least one alternate name is required",
            )
            .into());
        }
        for alternate in &alternates {
            require_non_empty("alternates", alternate)?;
        }
        match self
            .name_fallbacks
            .iter_mut()
            .find(|(candidate, _)| candidate == name)
        {
            Some((_, existing)) => *existing = alternates,
            None => self.name_fallbacks.push((name.to_string(), alternates)),
        }
        Ok(self)
    }

    pub fn fallback_nodes(&self) -> &[NodeRef] {
        &self.fallbacks
    }

    /// The primary delegate followed by the fallback nodes.
    fn sources(&self) -> impl Iterator<Item = &dyn Node> {
        iter::once(&self.inner as &dyn Node)
            .chain(self.fallbacks.iter().map(|node| node.as_ref() as &dyn Node))
    }

    /// The exact name followed by its configured alternates.
    fn candidate_names<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        let alternates = self
            .name_fallbacks
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, alternates)| alternates.as_slice())
            .unwrap_or_default();
        iter::once(name).chain(alternates.iter().map(String::as_str))
    }
}

impl From<NullableDelegateNode> for FallbackNode {
    fn from(inner: NullableDelegateNode) -> Self {
        Self {
            inner,
            fallbacks: Vec::new(),
            property_acceptance: Rc::new(has_string_value),
            listing_acceptance: Rc::new(is_non_empty),
            name_fallbacks: Vec::new(),
        }
    }
}

impl fmt::Debug for FallbackNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackNode")
            .field("inner", &self.inner)
            .field("fallbacks", &self.fallbacks)
            .field("name_fallbacks", &self.name_fallbacks)
            .finish_non_exhaustive()
    }
}

impl Node for FallbackNode {
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
        for (index, source) in self.sources().enumerate() {
            for name in self.candidate_names(rel_path) {
                let Some(property) = source.property(name)? else {
                    continue;
                };
                if (self.property_acceptance)(&*property) {
                    tracing::trace!(
                        property = rel_path,
                        source = index,
                        name,
                        "Accepted fallback property"
                    );
                    return Ok(Some(property));
                }
            }
        }
        tracing::trace!(property = rel_path, "No acceptable property in fallback chain");
        Ok(None)
    }

    fn has_property(&self, rel_path: &str) -> Result<bool> {
        Ok(self.property(rel_path)?.is_some())
    }

    fn properties(&self, filter: &NameFilter) -> Result<Vec<PropertyRef>> {
        for (index, source) in self.sources().enumerate() {
            let properties = source.properties(filter)?;
            if (self.listing_acceptance)(Listing::Properties(&properties)) {
                tracing::trace!(
                    source = index,
                    count = properties.len(),
                    "Accepted fallback property listing"
                );
                return Ok(properties);
            }
        }
        Ok(Vec::new())
    }

    fn node(&self, rel_path: &str) -> Result<Option<NodeRef>> {
        for (index, source) in self.sources().enumerate() {
            if let Some(node) = source.node(rel_path)? {
                tracing::trace!(node = rel_path, source = index, "Resolved fallback node");
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    fn has_node(&self, rel_path: &str) -> Result<bool> {
        for source in self.sources() {
            if source.has_node(rel_path)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn nodes(&self, filter: &NameFilter) -> Result<Vec<NodeRef>> {
        for (index, source) in self.sources().enumerate() {
            let nodes = source.nodes(filter)?;
            if (self.listing_acceptance)(Listing::Nodes(&nodes)) {
                tracing::trace!(
                    source = index,
                    count = nodes.len(),
                    "Accepted fallback node listing"
                );
                return Ok(nodes);
            }
        }
        Ok(Vec::new())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
