use chrono::{FixedOffset, TimeZone};
use node_decorators::{Node, NodeExt, PropertyType, Value, Values};
use rust_decimal::Decimal;

use crate::helpers::*;

#[test]
fn test_string_property_converts() {
    let workspace = test_workspace();
    let node = add_node_with(&workspace, "numbers", &[("count", "42"), ("flag", "TRUE")]);

    let count = node.property("count").unwrap().unwrap();
    assert_eq!(count.property_type().unwrap(), PropertyType::String);
    assert_eq!(count.get_long().unwrap(), 42);
    assert_eq!(count.get_double().unwrap(), 42.0);
    assert_eq!(count.get_decimal().unwrap(), Decimal::from(42));
    assert_eq!(count.length().unwrap(), 2);
    assert!(node.property("flag").unwrap().unwrap().get_boolean().unwrap());

    let err = node.property("flag").unwrap().unwrap().get_long().unwrap_err();
    assert!(err.is_value_format_error());
}

#[test]
fn test_dates_render_as_iso8601() {
    let workspace = test_workspace();
    let node = add_node_with(&workspace, "event", &[]);
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    let date = offset.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();

    node.set_property_value("start", date).unwrap();
    let start = node.property("start").unwrap().unwrap();
    assert_eq!(start.get_string().unwrap(), "2024-03-09T07:05:00.000+02:00");
    assert_eq!(start.get_date().unwrap(), date);
    assert_eq!(start.get_long().unwrap(), date.timestamp_millis());

    node.set_property_value("text", "2024-03-09T07:05:00.000+02:00")
        .unwrap();
    assert_eq!(node.property("text").unwrap().unwrap().get_date().unwrap(), date);
}

#[test]
fn test_multi_valued_access() {
    let workspace = test_workspace();
    let node = add_node_with(&workspace, "tagged", &[]);
    node.set_property_value("tags", ["a", "bb", "ccc"]).unwrap();

    let tags = node.property("tags").unwrap().unwrap();
    assert!(tags.is_multiple().unwrap());
    assert_eq!(tags.lengths().unwrap(), vec![1, 2, 3]);
    assert!(tags.value().unwrap_err().is_value_format_error());

    node.set_property_value("single", Values::single(Value::from(7i64)))
        .unwrap();
    let single = node.property("single").unwrap().unwrap();
    assert!(single.values().unwrap_err().is_value_format_error());
}

#[test]
fn test_references_resolve_to_nodes() {
    let (workspace, site) = setup_site();
    let a = site.node("a").unwrap().unwrap();
    let link = add_node_with(&workspace, "link", &[]);

    link.set_property_value("target", Value::Reference(a.identifier().unwrap()))
        .unwrap();
    let target = link.property("target").unwrap().unwrap();
    assert_eq!(target.property_type().unwrap(), PropertyType::Reference);
    assert_eq!(target.node().unwrap().unwrap().path().unwrap(), "/site/a");

    let title = site.property("title").unwrap().unwrap();
    assert!(title.referenced_nodes().unwrap_err().is_value_format_error());
}
