use node_decorators::{
    NameFilter, Node, NodeExt, Property,
    wrapper::{FallbackNode, Listing},
};

use crate::helpers::*;

#[test]
fn test_missing_property_comes_from_fallback() {
    let workspace = test_workspace();
    let primary = add_node_with(&workspace, "primary", &[]);
    let fb = add_node_with(&workspace, "fb", &[("x", "y")]);

    let view = FallbackNode::for_node(primary)
        .with_fallback_nodes([fb])
        .unwrap();
    assert_eq!(view.string_property("x").unwrap().as_deref(), Some("y"));
    assert!(view.has_property("x").unwrap());
}

#[test]
fn test_rejected_candidates_are_skipped_in_order() {
    let workspace = test_workspace();
    let primary = add_node_with(&workspace, "primary", &[("p", "")]);
    let f1 = add_node_with(&workspace, "f1", &[("p", "")]);
    let f2 = add_node_with(&workspace, "f2", &[("p", "second")]);
    let f3 = add_node_with(&workspace, "f3", &[("p", "third")]);

    let view = FallbackNode::for_node(primary)
        .with_fallback_nodes([f1, f2])
        .unwrap()
        .with_fallback_nodes([f3])
        .unwrap();
    assert_eq!(view.fallback_nodes().len(), 3);

    let property = view.property("p").unwrap().unwrap();
    assert_eq!(property.get_string().unwrap(), "second");
    assert_eq!(property.path().unwrap(), "/f2/p");
}

#[test]
fn test_name_fallback_is_tried_before_fallback_nodes() {
    let workspace = test_workspace();
    let primary = add_node_with(&workspace, "primary", &[("title", ""), ("displayTitle", "X")]);
    let fb = add_node_with(&workspace, "fb", &[("title", "From fallback node")]);

    let view = FallbackNode::for_node(primary)
        .with_fallback_nodes([fb])
        .unwrap()
        .with_property_name_fallback("title", ["displayTitle"])
        .unwrap();
    assert_eq!(view.string_property("title").unwrap().as_deref(), Some("X"));
}

#[test]
fn test_name_fallback_applies_on_fallback_nodes() {
    let workspace = test_workspace();
    let primary = add_node_with(&workspace, "primary", &[]);
    let fb = add_node_with(&workspace, "fb", &[("navigationTitle", "Nav")]);

    let view = FallbackNode::for_node(primary)
        .with_fallback_nodes([fb])
        .unwrap()
        .with_property_name_fallback("title", ["headline"])
        .unwrap()
        .with_property_name_fallback("title", ["navigationTitle"])
        .unwrap();
    assert_eq!(view.string_property("title").unwrap().as_deref(), Some("Nav"));
    assert!(view.property("headline").unwrap().is_none());
}

#[test]
fn test_custom_property_acceptance() {
    let workspace = test_workspace();
    let primary = add_node_with(&workspace, "primary", &[("count", "0")]);
    let fb = add_node_with(&workspace, "fb", &[("count", "12")]);

    let view = FallbackNode::for_node(primary.clone())
        .with_fallback_nodes([fb.clone()])
        .unwrap()
        .with_property_acceptance(|property: &dyn Property| {
            property.get_long().is_ok_and(|n| n > 0)
        });
    assert_eq!(view.property("count").unwrap().unwrap().get_long().unwrap(), 12);

    // The default acceptance takes any non-empty string.
    let view = FallbackNode::for_node(primary)
        .with_fallback_nodes([fb])
        .unwrap();
    assert_eq!(view.property("count").unwrap().unwrap().get_long().unwrap(), 0);
}

#[test]
fn test_listings_fall_back_as_a_whole() {
    let (workspace, site) = setup_site();
    let empty = add_node_with(&workspace, "empty", &[]);

    let view = FallbackNode::for_node(empty.clone())
        .with_fallback_nodes([site.clone()])
        .unwrap();
    assert_eq!(view.child_names(&NameFilter::All).unwrap(), vec!["a", "b", "c"]);
    assert_eq!(
        view.property_names(&NameFilter::All).unwrap(),
        vec!["title", "navigationTitle", "tags"]
    );
    assert_eq!(view.child_names(&NameFilter::pattern("b")).unwrap(), vec!["b"]);
    assert!(view.child_names(&NameFilter::pattern("z*")).unwrap().is_empty());

    // A listing with fewer than two children is not good enough.
    empty.add_node("only", None).unwrap();
    let view = FallbackNode::for_node(empty)
        .with_fallback_nodes([site])
        .unwrap()
        .with_listing_acceptance(|listing: Listing<'_>| listing.len() >= 2);
    assert_eq!(view.child_names(&NameFilter::All).unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_child_nodes_fall_back() {
    let (workspace, site) = setup_site();
    let primary = add_node_with(&workspace, "primary", &[]);
    primary.add_node("a", None).unwrap();

    let view = FallbackNode::for_node(primary)
        .with_fallback_nodes([site])
        .unwrap();
    assert_eq!(view.node("a").unwrap().unwrap().path().unwrap(), "/primary/a");
    assert_eq!(view.node("b").unwrap().unwrap().path().unwrap(), "/site/b");
    assert!(view.has_node("c").unwrap());
    assert!(!view.has_node("d").unwrap());
    assert!(view.node("d").unwrap().is_none());
}

#[test]
fn test_identity_and_mutations_use_primary() {
    let (workspace, site) = setup_site();
    let primary = add_node_with(&workspace, "primary", &[]);

    let view = FallbackNode::for_node(primary.clone())
        .with_fallback_nodes([site.clone()])
        .unwrap();
    assert_eq!(view.path().unwrap(), "/primary");
    assert_eq!(view.identifier().unwrap(), primary.identifier().unwrap());

    view.set_property_value("title", "Own").unwrap();
    assert_eq!(string_property(&primary, "title").as_deref(), Some("Own"));
    assert_eq!(string_property(&site, "title").as_deref(), Some("Home"));
    assert_eq!(view.string_property("title").unwrap().as_deref(), Some("Own"));
}

#[test]
fn test_multi_valued_property_is_accepted() {
    let (workspace, site) = setup_site();
    let defaults = add_node_with(&workspace, "defaults", &[("tags", "fallback")]);

    let view = FallbackNode::for_node(site.clone())
        .with_fallback_nodes([defaults])
        .unwrap();
    assert!(view.has_property("tags").unwrap());
    let tags = view.property("tags").unwrap().unwrap();
    assert!(tags.is_multiple().unwrap());
    assert_eq!(tags.path().unwrap(), "/site/tags");

    let altered = node_decorators::wrapper::AlteringNode::new(site)
        .with_fallbacks(|fallback| Ok(fallback))
        .unwrap();
    assert!(altered.has_property("tags").unwrap());
    assert_eq!(
        altered.property_names(&NameFilter::All).unwrap(),
        vec!["title", "navigationTitle", "tags"]
    );
}
