use std::rc::Rc;

use node_decorators::{
    Item, Node, Property, PropertyType, Value, constants::READ_ONLY_PROPERTY,
    wrapper::StubProperty,
};

use crate::helpers::*;

#[test]
fn test_two_values_make_a_multiple_property() {
    let parent = virtual_node("parent");
    let property = StubProperty::new(parent, "test", [3i64, 2]).unwrap();

    assert!(property.is_multiple().unwrap());
    assert_eq!(property.get_long().unwrap(), 3);
    assert_eq!(property.values().unwrap().len(), 2);
    assert_eq!(property.property_type().unwrap(), PropertyType::Long);
    assert_eq!(property.get_string().unwrap(), "3");
}

#[test]
fn test_hierarchy_follows_parent() {
    let (_workspace, site) = setup_site();
    let property = StubProperty::new(site.clone(), "virtualTitle", "Stub").unwrap();

    assert_eq!(property.path().unwrap(), "/site/virtualTitle");
    assert_eq!(property.depth().unwrap(), 2);
    assert!(Rc::ptr_eq(&property.parent().unwrap(), &site));
    assert_eq!(property.workspace_name().unwrap().as_deref(), Some("website"));
    assert_eq!(
        property.ancestor(1).unwrap().unwrap().path().unwrap(),
        "/site"
    );
    assert!(!property.ancestor(2).unwrap().unwrap().is_node());
    assert!(property.ancestor(3).unwrap().is_none());
    assert!(!site.has_property("virtualTitle").unwrap());
}

#[test]
fn test_mutations_are_rejected() {
    let property = StubProperty::new(virtual_node("parent"), "title", "Stub").unwrap();

    for err in [
        property.set_value(Some("other".into())).unwrap_err(),
        property.remove().unwrap_err(),
        property.save().unwrap_err(),
        property.refresh(false).unwrap_err(),
    ] {
        assert!(err.is_unsupported_operation());
        assert!(err.to_string().ends_with(READ_ONLY_PROPERTY));
    }
    assert_eq!(property.get_string().unwrap(), "Stub");
}

#[test]
fn test_reference_stub() {
    let (_workspace, site) = setup_site();
    let a = site.node("a").unwrap().unwrap();
    let b = site.node("b").unwrap().unwrap();

    let links = StubProperty::referencing(site.clone(), "links", vec![a.clone(), b]).unwrap();
    assert_eq!(links.property_type().unwrap(), PropertyType::Reference);
    assert!(links.is_multiple().unwrap());
    assert_eq!(
        links.value().unwrap(),
        Value::Reference(a.identifier().unwrap())
    );
    let first = Property::node(&links).unwrap().unwrap();
    assert!(first.is_same(&Item::Node(a)).unwrap());
    assert_eq!(links.referenced_nodes().unwrap().len(), 2);

    assert!(
        StubProperty::referencing(site, "links", Vec::new())
            .unwrap_err()
            .is_invalid_argument()
    );
}

#[test]
fn test_invalid_construction() {
    assert!(
        StubProperty::new(virtual_node("parent"), "", 1i64)
            .unwrap_err()
            .is_invalid_argument()
    );
    assert!(
        StubProperty::new(virtual_node("parent"), "n", Vec::<Value>::new())
            .unwrap_err()
            .is_invalid_argument()
    );
}
