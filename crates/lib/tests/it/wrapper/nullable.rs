use std::rc::Rc;

use node_decorators::{Item, NameFilter, Node, NodeExt, NodeRef, wrapper::NullableDelegateNode};

use crate::helpers::*;

#[test]
fn test_synthetic_defaults() {
    let node = NullableDelegateNode::synthetic("virtual", "mgnl:content").unwrap();

    assert!(!node.has_delegate());
    assert_eq!(node.name().unwrap(), "virtual");
    assert_eq!(node.path().unwrap(), "/virtual");
    assert_eq!(node.depth().unwrap(), 0);
    assert_eq!(node.identifier().unwrap(), "");
    assert!(node.workspace_name().unwrap().is_none());
    assert!(node.parent().unwrap().is_none());
    assert!(node.ancestor(0).unwrap().is_none());
    assert!(node.ancestor(1).unwrap().is_none());
    assert!(!node.has_property("anything").unwrap());
    assert!(node.property("anything").unwrap().is_none());
    assert!(node.nodes(&NameFilter::All).unwrap().is_empty());
    assert!(!node.has_nodes().unwrap());
    assert!(!node.has_properties().unwrap());
    assert_eq!(node.primary_node_type().unwrap().name(), "mgnl:content");
    assert!(node.mixin_node_types().unwrap().is_empty());
    assert!(!node.is_node_type("mgnl:content").unwrap());
    assert!(!node.is_locked().unwrap());
}

#[test]
fn test_synthetic_mutations_are_ignored() {
    let node = NullableDelegateNode::synthetic("virtual", "mgnl:content").unwrap();

    assert!(node.set_property_value("title", "x").unwrap().is_none());
    assert!(node.add_node("child", None).unwrap().is_none());
    node.order_before("a", None).unwrap();
    node.add_mixin("mix:lockable").unwrap();
    node.save().unwrap();
    node.lock().unwrap();
    node.remove().unwrap();

    assert!(!node.has_property("title").unwrap());
    assert!(!node.has_node("child").unwrap());
}

#[test]
fn test_synthetic_requires_name_and_type() {
    assert!(
        NullableDelegateNode::synthetic("", "mgnl:content")
            .unwrap_err()
            .is_invalid_argument()
    );
    assert!(
        NullableDelegateNode::synthetic("virtual", "")
            .unwrap_err()
            .is_invalid_argument()
    );
}

#[test]
fn test_delegate_is_forwarded() {
    let (_workspace, site) = setup_site();
    let node = NullableDelegateNode::new(site.clone());

    assert!(node.has_delegate());
    assert_eq!(node.path().unwrap(), "/site");
    assert_eq!(node.identifier().unwrap(), site.identifier().unwrap());
    assert_eq!(node.string_property("title").unwrap().as_deref(), Some("Home"));
    assert_eq!(node.child_names(&NameFilter::All).unwrap(), vec!["a", "b", "c"]);
    assert!(node.is_node_type("mgnl:page").unwrap());

    node.set_property_value("subtitle", "Welcome").unwrap();
    assert_eq!(string_property(&site, "subtitle").as_deref(), Some("Welcome"));
}

#[test]
fn test_identity() {
    let (_workspace, site) = setup_site();
    let wrapped = NullableDelegateNode::new(site.clone());
    assert!(wrapped.is_same(&Item::Node(site.clone())).unwrap());
    assert!(site.is_same(&Item::Node(Rc::new(wrapped.clone()))).unwrap());

    let other = site.node("a").unwrap().unwrap();
    assert!(!wrapped.is_same(&Item::Node(other)).unwrap());

    let synthetic: NodeRef = virtual_node("virtual");
    let again = NullableDelegateNode::synthetic("virtual", "mgnl:content").unwrap();
    assert!(synthetic.is_same(&Item::Node(synthetic.clone())).unwrap());
    assert!(!again.is_same(&Item::Node(synthetic)).unwrap());
}

#[test]
fn test_into_node_ref() {
    let (_workspace, site) = setup_site();
    let unwrapped = NullableDelegateNode::from(site.clone()).into_node_ref();
    assert!(Rc::ptr_eq(&unwrapped, &site));

    let synthetic = NullableDelegateNode::synthetic("virtual", "mgnl:content")
        .unwrap()
        .into_node_ref();
    assert_eq!(synthetic.path().unwrap(), "/virtual");
}
