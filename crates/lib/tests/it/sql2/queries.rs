use chrono::{FixedOffset, TimeZone};
use node_decorators::{
    Value,
    sql2::{
        self, Condition, Join, JoinCondition, JoinType, Order, Query, Term, contains,
        is_descendant_node, property,
    },
};

/// Builds the filter a site search would use for the given optional inputs.
fn search_filter(text: Option<&str>, tags: &[&str], min_rank: Option<i64>) -> sql2::Junction {
    sql2::and()
        .add(is_descendant_node("/site"))
        .add_option(text.map(|text| contains("text").term(text)))
        .add(property("tags").equals_any(tags.iter().copied()))
        .add_option(min_rank.map(|rank| property("rank").greater_or_equal_than(rank)))
        .add(property("hideInNav").equals_any([Value::from(true)]).not())
}

#[test]
fn test_optional_filters_collapse() {
    let query = Query::select("mgnl:page")
        .as_selector("p")
        .filter(search_filter(None, &[], None));
    assert_eq!(
        query.to_sql(),
        "SELECT * FROM [mgnl:page] AS p WHERE (ISDESCENDANTNODE(p, [/site]) \
         AND NOT (p.[hideInNav] = CAST('true' AS BOOLEAN)))"
    );
}

#[test]
fn test_full_search_query() {
    let query = Query::select("mgnl:page")
        .as_selector("p")
        .filter(search_filter(Some("magnolia"), &["news", "sports"], Some(3)))
        .order_by("rank", Order::Descending);
    assert_eq!(
        query.to_sql(),
        "SELECT * FROM [mgnl:page] AS p WHERE (ISDESCENDANTNODE(p, [/site]) \
         AND CONTAINS(p.[text], 'magnolia') \
         AND (p.[tags] = 'news' OR p.[tags] = 'sports') \
         AND p.[rank] >= 3 \
         AND NOT (p.[hideInNav] = CAST('true' AS BOOLEAN))) \
         ORDER BY p.[rank] DESC"
    );
}

#[test]
fn test_joined_query() {
    let since = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .unwrap();
    let query = Query::select("mgnl:page")
        .as_selector("page")
        .join(Join::new(
            JoinType::LeftOuter,
            "mgnl:component",
            "c",
            JoinCondition::descendant_node("c", "page"),
        ))
        .join(Join::inner(
            "mgnl:asset",
            "asset",
            JoinCondition::equi("c", "image", "asset", "jcr:uuid"),
        ))
        .filter(property("mgnl:lastModified").greater_than(since))
        .order_by("title", Order::Ascending);

    assert_eq!(
        query.to_string(),
        "SELECT * FROM [mgnl:page] AS page \
         LEFT OUTER JOIN [mgnl:component] AS c ON ISDESCENDANTNODE(c, page) \
         INNER JOIN [mgnl:asset] AS asset ON c.[image] = asset.[jcr:uuid] \
         WHERE page.[mgnl:lastModified] > CAST('2024-01-01T00:00:00.000Z' AS DATE) \
         ORDER BY page.[title] ASC"
    );
}

#[test]
fn test_any_junction_of_full_text_terms() {
    let filter = sql2::or()
        .add(contains("title").terms(["red", "car"]).any())
        .add(sql2::contains_all().term(Term::phrase("sports car").boost(1.5)))
        .add(property("title").lower_case().starts_with_any(["Red"]));

    assert_eq!(
        filter.to_sql(),
        "(CONTAINS([title], 'red OR car') \
         OR CONTAINS(*, '\"sports car\"^1.5') \
         OR LOWER([title]) LIKE 'red%')"
    );
    assert_eq!(filter.len(), 3);
}

#[test]
fn test_empty_where_is_omitted() {
    let query = Query::select("nt:base").filter(sql2::and().add(property("x").equals_any([""])));
    assert_eq!(query.to_sql(), "SELECT * FROM [nt:base]");
    assert!(property("x").equals_any([""]).is_empty());
}
