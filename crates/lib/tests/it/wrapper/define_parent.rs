use std::rc::Rc;

use node_decorators::{Item, NameFilter, Node, NodeRef, wrapper::DefineParentNode};

use crate::helpers::*;

/// Asserts that `node` sits directly below `parent` in the synthetic tree.
fn assert_child_of(node: &NodeRef, parent: &NodeRef) {
    assert_eq!(
        node.path().unwrap(),
        format!("{}/{}", parent.path().unwrap(), node.name().unwrap())
    );
    assert_eq!(node.depth().unwrap(), parent.depth().unwrap() + 1);
}

#[test]
fn test_synthetic_hierarchy_is_consistent() {
    let (_workspace, site) = setup_site();
    let a = site.node("a").unwrap().unwrap();
    a.add_node("deep", None).unwrap();

    let parent = virtual_node("virtual");
    let wrapped: NodeRef = Rc::new(DefineParentNode::new(parent.clone(), site.clone()));
    assert_eq!(wrapped.path().unwrap(), "/virtual/site");
    assert_child_of(&wrapped, &parent);

    let children = wrapped.nodes(&NameFilter::All).unwrap();
    assert_eq!(children.len(), 3);
    for child in &children {
        assert_child_of(child, &wrapped);
        for grandchild in child.nodes(&NameFilter::All).unwrap() {
            assert_child_of(&grandchild, child);
        }
    }

    let deep = wrapped.node("a/deep").unwrap().unwrap();
    assert_eq!(deep.path().unwrap(), "/virtual/site/a/deep");
    assert_eq!(deep.depth().unwrap(), 3);
    assert_eq!(deep.parent().unwrap().unwrap().path().unwrap(), "/virtual/site/a");
    // A synthetic root has no ancestors of its own.
    assert!(deep.ancestor(0).unwrap().is_none());
    assert_eq!(deep.ancestor(1).unwrap().unwrap().path().unwrap(), "/virtual/site");
    assert!(deep.ancestor(4).unwrap().is_none());
}

#[test]
fn test_relative_navigation() {
    let (_workspace, site) = setup_site();
    let parent = virtual_node("virtual");
    let wrapped = DefineParentNode::new(parent.clone(), site);

    let up = wrapped.node("..").unwrap().unwrap();
    assert!(Rc::ptr_eq(&up, &parent));
    assert_eq!(wrapped.node(".").unwrap().unwrap().path().unwrap(), "/virtual/site");
    assert_eq!(wrapped.node("a/..").unwrap().unwrap().path().unwrap(), "/virtual/site");
    assert!(wrapped.node("missing").unwrap().is_none());
    assert!(!wrapped.has_node("missing/deeper").unwrap());

    // Absolute paths address the real workspace.
    assert_eq!(wrapped.node("/site/b").unwrap().unwrap().path().unwrap(), "/site/b");
}

#[test]
fn test_content_is_forwarded() {
    let (workspace, site) = setup_site();
    let wrapped = DefineParentNode::new(workspace.root_node(), site.clone());

    assert_eq!(wrapped.path().unwrap(), "/site");
    assert_eq!(wrapped.name().unwrap(), "site");
    assert_eq!(wrapped.identifier().unwrap(), site.identifier().unwrap());
    assert_eq!(
        wrapped.property("title").unwrap().unwrap().get_string().unwrap(),
        "Home"
    );
    assert!(wrapped.is_node_type("mgnl:page").unwrap());
    assert!(wrapped.is_same(&Item::Node(site.clone())).unwrap());
    assert!(wrapped.delegate().is_some_and(|node| Rc::ptr_eq(node, &site)));

    wrapped.add_node("added", None).unwrap();
    assert!(site.has_node("added").unwrap());
}

#[test]
fn test_properties_follow_the_synthetic_parent() {
    let (_workspace, site) = setup_site();
    let wrapped: NodeRef = Rc::new(DefineParentNode::new(virtual_node("virtual"), site));

    let title = wrapped.property("title").unwrap().unwrap();
    assert_eq!(title.path().unwrap(), "/virtual/site/title");
    assert_eq!(title.depth().unwrap(), 2);
    assert_eq!(title.parent().unwrap().path().unwrap(), "/virtual/site");
    assert_eq!(title.get_string().unwrap(), "Home");

    let nested = wrapped.property("a/title").unwrap().unwrap();
    assert_eq!(nested.path().unwrap(), "/virtual/site/a/title");
    assert_eq!(nested.get_string().unwrap(), "A");

    let paths: Vec<String> = wrapped
        .properties(&NameFilter::All)
        .unwrap()
        .iter()
        .map(|property| property.path().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec!["/virtual/site/title", "/virtual/site/navigationTitle", "/virtual/site/tags"]
    );
}
