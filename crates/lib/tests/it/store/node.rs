use node_decorators::{Item, NameFilter, Node, NodeExt};

use crate::helpers::*;

#[test]
fn test_hierarchy_navigation() {
    let (workspace, site) = setup_site();

    assert_eq!(workspace.root_node().path().unwrap(), "/");
    assert_eq!(workspace.root_node().depth().unwrap(), 0);
    assert_eq!(site.path().unwrap(), "/site");
    assert_eq!(site.depth().unwrap(), 1);

    let a = site.node("a").unwrap().expect("child a exists");
    assert_eq!(a.path().unwrap(), "/site/a");
    assert_eq!(a.depth().unwrap(), 2);
    assert_eq!(a.parent().unwrap().unwrap().path().unwrap(), "/site");
    assert_eq!(a.ancestor(0).unwrap().unwrap().path().unwrap(), "/");
    assert_eq!(a.ancestor(2).unwrap().unwrap().path().unwrap(), "/site/a");
    assert!(a.ancestor(3).unwrap().is_none());
    assert!(workspace.root_node().parent().unwrap().is_none());

    assert_eq!(site.node("a/..").unwrap().unwrap().path().unwrap(), "/site");
    assert_eq!(a.node("/site/b").unwrap().unwrap().path().unwrap(), "/site/b");
    assert!(site.node("missing").unwrap().is_none());
    assert!(!site.has_node("a/missing").unwrap());
}

#[test]
fn test_listings_keep_order_and_filter() {
    let (_workspace, site) = setup_site();

    assert_eq!(child_names(&site), vec!["a", "b", "c"]);
    assert_eq!(property_names(&site), vec!["title", "navigationTitle", "tags"]);
    assert_eq!(
        site.child_names(&NameFilter::pattern("a | c")).unwrap(),
        vec!["a", "c"]
    );
    assert_eq!(
        site.property_names(&NameFilter::globs(["t*"])).unwrap(),
        vec!["title", "tags"]
    );
    assert!(site.has_nodes().unwrap());
    assert!(!site.node("c").unwrap().unwrap().has_properties().unwrap());
}

#[test]
fn test_relative_property_paths() {
    let (_workspace, site) = setup_site();

    let title = site.property("a/title").unwrap().expect("nested property");
    assert_eq!(title.get_string().unwrap(), "A");
    assert_eq!(title.path().unwrap(), "/site/a/title");
    assert_eq!(title.depth().unwrap(), 3);
    assert_eq!(title.parent().unwrap().path().unwrap(), "/site/a");
    assert!(site.has_property("a/rank").unwrap());
    assert!(!site.has_property("b/rank").unwrap());
    assert!(site.property("missing/title").unwrap().is_none());
}

#[test]
fn test_identity_across_handles() {
    let (workspace, site) = setup_site();

    let again = workspace.node_at("/site").unwrap().unwrap();
    assert!(site.is_same(&Item::Node(again)).unwrap());

    let by_id = workspace
        .node_by_identifier(&site.identifier().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(by_id.path().unwrap(), "/site");

    let other = site.node("a").unwrap().unwrap();
    assert!(!site.is_same(&Item::Node(other)).unwrap());
    assert!(workspace.node_by_identifier("not-a-uuid").unwrap().is_none());
    assert_eq!(site.workspace_name().unwrap().as_deref(), Some("website"));
}

#[test]
fn test_order_before() {
    let (_workspace, site) = setup_site();

    site.order_before("c", Some("a")).unwrap();
    assert_eq!(child_names(&site), vec!["c", "a", "b"]);

    site.order_before("c", None).unwrap();
    assert_eq!(child_names(&site), vec!["a", "b", "c"]);

    let err = site.order_before("missing", None).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_order_before_itself_keeps_order() {
    let (_workspace, site) = setup_site();

    site.order_before("b", Some("b")).unwrap();
    assert_eq!(child_names(&site), vec!["a", "b", "c"]);

    let err = site.order_before("a", Some("missing")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(child_names(&site), vec!["a", "b", "c"]);
}

#[test]
fn test_add_and_remove_nodes() {
    let (workspace, site) = setup_site();
    let before = workspace.node_count();

    let news = site.add_node("news", Some("mgnl:page")).unwrap().unwrap();
    assert!(news.is_node_type("mgnl:page").unwrap());
    assert!(news.is_node_type("nt:base").unwrap());
    assert_eq!(workspace.node_count(), before + 1);

    let err = site.add_node("a", None).unwrap_err();
    assert_eq!(err.to_string(), "Item already exists: /site/a");
    assert!(site.add_node("missing/child", None).unwrap_err().is_not_found());

    let b = site.node("b").unwrap().unwrap();
    b.remove().unwrap();
    assert!(!site.has_node("b").unwrap());
    assert!(b.name().unwrap_err().is_repository_error());

    let err = workspace.root_node().remove().unwrap_err();
    assert!(err.is_repository_error());
}

#[test]
fn test_checked_in_nodes_reject_changes() {
    let (_workspace, site) = setup_site();
    let a = site.node("a").unwrap().unwrap();

    a.checkin().unwrap();
    assert!(!a.is_checked_out().unwrap());
    let err = a.set_property_value("title", "changed").unwrap_err();
    assert!(err.is_version_error());
    assert_eq!(string_property(&a, "title").as_deref(), Some("A"));

    a.checkout().unwrap();
    a.set_property_value("title", "changed").unwrap();
    assert_eq!(string_property(&a, "title").as_deref(), Some("changed"));
}

#[test]
fn test_locking() {
    let (_workspace, site) = setup_site();

    site.lock().unwrap();
    assert!(site.is_locked().unwrap());
    assert!(site.lock().unwrap_err().is_lock_error());
    site.unlock().unwrap();
    assert!(!site.is_locked().unwrap());
    assert!(site.unlock().unwrap_err().is_lock_error());
}

#[test]
fn test_mixins() {
    let (_workspace, site) = setup_site();

    site.add_mixin("mix:referenceable").unwrap();
    assert!(site.is_node_type("mix:referenceable").unwrap());
    assert_eq!(site.mixin_node_types().unwrap().len(), 1);

    site.remove_mixin("mix:referenceable").unwrap();
    assert!(!site.is_node_type("mix:referenceable").unwrap());
    assert!(
        site.remove_mixin("mix:referenceable")
            .unwrap_err()
            .is_repository_error()
    );

    site.set_primary_type("mgnl:folder").unwrap();
    assert_eq!(site.primary_node_type().unwrap().name(), "mgnl:folder");
}

#[test]
fn test_property_removal_and_type_rules() {
    let (_workspace, site) = setup_site();

    assert!(site.set_property("title", None).unwrap().is_none());
    assert!(!site.has_property("title").unwrap());

    let mixed = node_decorators::Values::multiple([
        node_decorators::Value::from("a"),
        node_decorators::Value::from(1i64),
    ]);
    assert!(site.set_property("mixed", Some(mixed)).unwrap_err().is_repository_error());
    assert!(site.set_property("a/b", Some("x".into())).is_err());
}
