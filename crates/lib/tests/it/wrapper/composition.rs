use std::rc::Rc;

use node_decorators::{
    Item, NameFilter, Node, NodeExt, NodeRef,
    wrapper::{AlteringNode, DefineParentNode, ImmutableNode},
};

use crate::helpers::*;

/// A read-only preview of `/site` with defaults from `/defaults`.
fn preview(site: NodeRef, defaults: NodeRef) -> AlteringNode {
    AlteringNode::new(site)
        .with_fallbacks(|fallback| fallback.with_fallback_nodes([defaults]))
        .unwrap()
        .with_property("title", "Preview")
        .unwrap()
        .with_hidden_property(["navigationTitle"])
        .unwrap()
        .immutable()
}

#[test]
fn test_overlay_over_fallback_over_immutable() {
    let (workspace, site) = setup_site();
    let defaults = add_node_with(
        &workspace,
        "defaults",
        &[("author", "Editorial"), ("navigationTitle", "Default nav")],
    );
    let view = preview(site.clone(), defaults);

    assert_eq!(view.string_property("title").unwrap().as_deref(), Some("Preview"));
    assert_eq!(view.string_property("author").unwrap().as_deref(), Some("Editorial"));
    assert!(!view.has_property("navigationTitle").unwrap());
    assert_eq!(view.path().unwrap(), "/site");
    assert!(view.is_same(&Item::Node(site.clone())).unwrap());

    assert!(view.set_property_value("title", "x").unwrap_err().is_unsupported_operation());
    assert!(view.add_node("news", None).unwrap_err().is_unsupported_operation());
    assert!(view.save().unwrap_err().is_unsupported_operation());
    assert_eq!(string_property(&site, "title").as_deref(), Some("Home"));
}

#[test]
fn test_immutable_over_overlay() {
    let (_workspace, site) = setup_site();
    let altered = AlteringNode::new(site)
        .with_property("title", "Overlay")
        .unwrap();
    let frozen = ImmutableNode::new(Rc::new(altered));

    assert_eq!(frozen.string_property("title").unwrap().as_deref(), Some("Overlay"));
    assert!(frozen.remove().unwrap_err().is_unsupported_operation());
}

#[test]
fn test_overlay_under_synthetic_parent() {
    let (workspace, site) = setup_site();
    let teaser = add_node_with(&workspace, "teaser", &[("title", "Teaser")]);
    let altered = AlteringNode::new(site)
        .with_property("title", "Relocated")
        .unwrap()
        .with_child_node("teaser", teaser)
        .unwrap();

    let relocated: NodeRef = Rc::new(DefineParentNode::new(
        virtual_node("preview"),
        Rc::new(altered),
    ));
    assert_eq!(relocated.path().unwrap(), "/preview/site");
    assert_eq!(string_property(&relocated, "title").as_deref(), Some("Relocated"));

    let names = relocated.child_names(&NameFilter::All).unwrap();
    assert_eq!(names, vec!["a", "b", "c", "teaser"]);
    let teaser = relocated.node("teaser").unwrap().unwrap();
    assert_eq!(teaser.path().unwrap(), "/preview/site/teaser");
    assert_eq!(teaser.depth().unwrap(), 2);
    assert_eq!(string_property(&teaser, "title").as_deref(), Some("Teaser"));
}

#[test]
fn test_adopted_child_in_place_passes_through() {
    let (workspace, site) = setup_site();
    let teaser = add_node_with(&workspace, "teaser", &[("title", "Teaser")]);
    let altered = AlteringNode::new(site)
        .with_child_node("teaser", teaser)
        .unwrap();

    let in_place = DefineParentNode::new(workspace.root_node(), Rc::new(altered));
    assert_eq!(in_place.path().unwrap(), "/site");

    let child = in_place.node("teaser").unwrap().unwrap();
    assert_eq!(child.path().unwrap(), "/site/teaser");
    let adopted = child
        .as_any()
        .downcast_ref::<DefineParentNode>()
        .unwrap();
    assert!(adopted.defined_parent().as_any().is::<AlteringNode>());
}

#[test]
fn test_synthetic_page_built_from_overrides() {
    let page = AlteringNode::new(virtual_node("generated"))
        .with_property("title", "Generated")
        .unwrap()
        .with_property("tags", ["a", "b"])
        .unwrap()
        .immutable();

    assert!(page.has_delegate());
    assert_eq!(page.path().unwrap(), "/generated");
    assert_eq!(
        page.property_names(&NameFilter::All).unwrap(),
        vec!["title", "tags"]
    );
    assert!(page.property("tags").unwrap().unwrap().is_multiple().unwrap());
    assert!(page.lock().unwrap_err().is_unsupported_operation());
}
