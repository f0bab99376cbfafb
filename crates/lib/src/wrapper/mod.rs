//! Node decorators.
//!
//! Every decorator implements [`Node`](crate::Node) over exactly one delegate
//! and composes by nesting:
//!
//! ```
//! # use node_decorators::{Node, NodeExt, store::MemoryWorkspace, wrapper::AlteringNode};
//! let workspace = MemoryWorkspace::default();
//! let page = workspace.root_node().add_node("page", None).unwrap().unwrap();
//! page.set_property_value("title", "Home").unwrap();
//!
//! let view = AlteringNode::new(page)
//!     .with_property("title", "Preview").unwrap()
//!     .immutable();
//! assert_eq!(view.string_property("title").unwrap().as_deref(), Some("Preview"));
//! assert!(view.set_property_value("title", "Changed").is_err());
//! ```
//!
//! The common base is [`NullableDelegateNode`], which turns "no underlying
//! node" into a synthetic node with defaults instead of a failure. The other
//! decorators hold one and forward whatever they do not alter.

/// Implements the listed [`Node`](crate::Node) methods by forwarding to `self.$field`.
macro_rules! forward_node {
    ($field:ident: $($method:ident),+ $(,)?) => {
        $( $crate::wrapper::forward_node!(@ $field $method); )+
    };
    (@ $f:ident name) => {
        fn name(&self) -> $crate::Result<String> { self.$f.name() }
    };
    (@ $f:ident path) => {
        fn path(&self) -> $crate::Result<String> { self.$f.path() }
    };
    (@ $f:ident depth) => {
        fn depth(&self) -> $crate::Result<usize> { self.$f.depth() }
    };
    (@ $f:ident identifier) => {
        fn identifier(&self) -> $crate::Result<String> { self.$f.identifier() }
    };
    (@ $f:ident workspace_name) => {
        fn workspace_name(&self) -> $crate::Result<Option<String>> { self.$f.workspace_name() }
    };
    (@ $f:ident parent) => {
        fn parent(&self) -> $crate::Result<Option<$crate::node::NodeRef>> { self.$f.parent() }
    };
    (@ $f:ident ancestor) => {
        fn ancestor(&self, depth: usize) -> $crate::Result<Option<$crate::node::NodeRef>> {
            self.$f.ancestor(depth)
        }
    };
    (@ $f:ident primary_node_type) => {
        fn primary_node_type(&self) -> $crate::Result<$crate::node::NodeTypeRef> {
            self.$f.primary_node_type()
        }
    };
    (@ $f:ident mixin_node_types) => {
        fn mixin_node_types(&self) -> $crate::Result<Vec<$crate::node::NodeTypeRef>> {
            self.$f.mixin_node_types()
        }
    };
    (@ $f:ident is_node_type) => {
        fn is_node_type(&self, name: &str) -> $crate::Result<bool> { self.$f.is_node_type(name) }
    };
    (@ $f:ident property) => {
        fn property(&self, rel_path: &str) -> $crate::Result<Option<$crate::node::PropertyRef>> {
            self.$f.property(rel_path)
        }
    };
    (@ $f:ident has_property) => {
        fn has_property(&self, rel_path: &str) -> $crate::Result<bool> {
            self.$f.has_property(rel_path)
        }
    };
    (@ $f:ident properties) => {
        fn properties(
            &self,
            filter: &$crate::node::NameFilter,
        ) -> $crate::Result<Vec<$crate::node::PropertyRef>> {
            self.$f.properties(filter)
        }
    };
    (@ $f:ident node) => {
        fn node(&self, rel_path: &str) -> $crate::Result<Option<$crate::node::NodeRef>> {
            self.$f.node(rel_path)
        }
    };
    (@ $f:ident has_node) => {
        fn has_node(&self, rel_path: &str) -> $crate::Result<bool> { self.$f.has_node(rel_path) }
    };
    (@ $f:ident nodes) => {
        fn nodes(
            &self,
            filter: &$crate::node::NameFilter,
        ) -> $crate::Result<Vec<$crate::node::NodeRef>> {
            self.$f.nodes(filter)
        }
    };
    (@ $f:ident is_checked_out) => {
        fn is_checked_out(&self) -> $crate::Result<bool> { self.$f.is_checked_out() }
    };
    (@ $f:ident is_locked) => {
        fn is_locked(&self) -> $crate::Result<bool> { self.$f.is_locked() }
    };
    (@ $f:ident add_node) => {
        fn add_node(
            &self,
            rel_path: &str,
            primary_type: Option<&str>,
        ) -> $crate::Result<Option<$crate::node::NodeRef>> {
            self.$f.add_node(rel_path, primary_type)
        }
    };
    (@ $f:ident set_property) => {
        fn set_property(
            &self,
            name: &str,
            values: Option<$crate::value::Values>,
        ) -> $crate::Result<Option<$crate::node::PropertyRef>> {
            self.$f.set_property(name, values)
        }
    };
    (@ $f:ident order_before) => {
        fn order_before(&self, source: &str, destination: Option<&str>) -> $crate::Result<()> {
            self.$f.order_before(source, destination)
        }
    };
    (@ $f:ident set_primary_type) => {
        fn set_primary_type(&self, name: &str) -> $crate::Result<()> {
            self.$f.set_primary_type(name)
        }
    };
    (@ $f:ident add_mixin) => {
        fn add_mixin(&self, name: &str) -> $crate::Result<()> { self.$f.add_mixin(name) }
    };
    (@ $f:ident remove_mixin) => {
        fn remove_mixin(&self, name: &str) -> $crate::Result<()> { self.$f.remove_mixin(name) }
    };
    (@ $f:ident remove) => {
        fn remove(&self) -> $crate::Result<()> { self.$f.remove() }
    };
    (@ $f:ident save) => {
        fn save(&self) -> $crate::Result<()> { self.$f.save() }
    };
    (@ $f:ident refresh) => {
        fn refresh(&self, keep_changes: bool) -> $crate::Result<()> {
            self.$f.refresh(keep_changes)
        }
    };
    (@ $f:ident lock) => {
        fn lock(&self) -> $crate::Result<()> { self.$f.lock() }
    };
    (@ $f:ident unlock) => {
        fn unlock(&self) -> $crate::Result<()> { self.$f.unlock() }
    };
    (@ $f:ident checkin) => {
        fn checkin(&self) -> $crate::Result<()> { self.$f.checkin() }
    };
    (@ $f:ident checkout) => {
        fn checkout(&self) -> $crate::Result<()> { self.$f.checkout() }
    };
}

pub(crate) use forward_node;

pub mod altering;
pub mod define_parent;
pub mod errors;
pub mod fallback;
pub mod immutable;
pub mod nullable;
pub mod placeholder;
pub mod stub_property;

pub use altering::AlteringNode;
pub use define_parent::DefineParentNode;
pub use errors::WrapperError;
pub use fallback::{FallbackNode, Listing, ListingAcceptance, PropertyAcceptance};
pub use immutable::ImmutableNode;
pub use nullable::NullableDelegateNode;
pub use placeholder::PlaceholderNodeType;
pub use stub_property::StubProperty;
