use node_decorators::{
    NameFilter, NodeExt, NodeRef,
    store::{MemoryWorkspace, WorkspaceConfig},
    wrapper::NullableDelegateNode,
};
use serde_json::json;

// ==========================
// WORKSPACE FACTORIES
// ==========================

/// Creates an empty workspace named "website".
pub fn test_workspace() -> MemoryWorkspace {
    MemoryWorkspace::new(WorkspaceConfig {
        name: "website".to_string(),
        ..Default::default()
    })
}

/// Imports a small site at `/site`:
///
/// ```text
/// /site            title="Home", navigationTitle="", tags=[news, sports]
/// /site/a          title="A", rank=1
/// /site/b          title="B"
/// /site/c          (no properties)
/// ```
pub fn import_site(workspace: &MemoryWorkspace) -> NodeRef {
    workspace
        .import_json(
            "/",
            "site",
            &json!({
                "jcr:primaryType": "mgnl:page",
                "title": "Home",
                "navigationTitle": "",
                "tags": ["news", "sports"],
                "a": { "jcr:primaryType": "mgnl:page", "title": "A", "rank": 1 },
                "b": { "jcr:primaryType": "mgnl:page", "title": "B" },
                "c": { "jcr:primaryType": "mgnl:page" }
            }),
        )
        .expect("Failed to import site fixture")
}

/// Creates a workspace holding the site fixture and returns both.
pub fn setup_site() -> (MemoryWorkspace, NodeRef) {
    let workspace = test_workspace();
    let site = import_site(&workspace);
    (workspace, site)
}

/// Adds a plain child `name` under the root with the given string properties.
pub fn add_node_with(
    workspace: &MemoryWorkspace,
    name: &str,
    properties: &[(&str, &str)],
) -> NodeRef {
    let node = workspace
        .root_node()
        .add_node(name, None)
        .expect("Failed to add node")
        .expect("Store returned no node");
    for (key, value) in properties {
        node.set_property_value(key, *value)
            .expect("Failed to set property");
    }
    node
}

/// A delegate-less node standing in for a synthetic parent.
pub fn virtual_node(name: &str) -> NodeRef {
    std::rc::Rc::new(
        NullableDelegateNode::synthetic(name, "mgnl:content").expect("Failed to create node"),
    )
}

// ==========================
// ASSERTION HELPERS
// ==========================

/// Names of all children, in listing order.
pub fn child_names(node: &NodeRef) -> Vec<String> {
    node.child_names(&NameFilter::All)
        .expect("Failed to list children")
}

/// Names of all properties, in listing order.
pub fn property_names(node: &NodeRef) -> Vec<String> {
    node.property_names(&NameFilter::All)
        .expect("Failed to list properties")
}

/// The string form of a property, panicking on store errors.
pub fn string_property(node: &NodeRef, name: &str) -> Option<String> {
    node.string_property(name)
        .expect("Failed to read property")
}
