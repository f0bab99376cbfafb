//! Fixture import for in-memory workspaces.
//!
//! A fixture is a JSON object describing one node:
//!
//! - nested objects become child nodes, in document order
//! - `jcr:primaryType` (string) selects the node's primary type
//! - `jcr:mixinTypes` (array of strings) assigns mixins
//! - strings, numbers and booleans become single-valued properties
//! - arrays of scalars become multi-valued properties
//! - `null` members are skipped

use std::path::Path;

use serde_json::{Map, Value as Json};
use uuid::Uuid;

use super::MemoryWorkspace;
use crate::{
    Result,
    constants::{JCR_MIXIN_TYPES, JCR_PRIMARY_TYPE},
    node::{Node, NodeRef, RepositoryError, child_path},
    value::{Value, Values},
};

impl MemoryWorkspace {
    /// Imports `document` as a new child `name` of the node at `parent_path`.
    ///
    /// ```
    /// # use node_decorators::{Node, NodeExt, store::MemoryWorkspace};
    /// let workspace = MemoryWorkspace::default();
    /// let page = workspace.import_json("/", "page", &serde_json::json!({
    ///     "jcr:primaryType": "mgnl:page",
    ///     "title": "Home",
    ///     "main": { "text": "Hello" }
    /// })).unwrap();
    /// assert_eq!(page.string_property("title").unwrap().as_deref(), Some("Home"));
    /// assert!(page.is_node_type("mgnl:page").unwrap());
    /// ```
    pub fn import_json(&self, parent_path: &str, name: &str, document: &Json) -> Result<NodeRef> {
        let parent = self
            .node_at(parent_path)?
            .ok_or_else(|| RepositoryError::PathNotFound {
                path: parent_path.to_string(),
            })?;
        let parent_id = Uuid::parse_str(&parent.identifier()?).map_err(|_| {
            RepositoryError::InvalidItemState {
                identifier: parent_path.to_string(),
            }
        })?;
        let id = self.import_object(parent_id, name, document, &child_path(parent_path, name))?;
        tracing::debug!(path = %child_path(parent_path, name), "Imported fixture");
        Ok(self.node_handle(id))
    }

    /// Reads a fixture file and imports it as a new child `name` of the node at
    /// `parent_path`.
    pub fn load_from_file(
        &self,
        parent_path: &str,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<NodeRef> {
        let contents = std::fs::read_to_string(path)?;
        let document: Json = serde_json::from_str(&contents)?;
        self.import_json(parent_path, name, &document)
    }

    fn import_object(&self, parent: Uuid, name: &str, document: &Json, path: &str) -> Result<Uuid> {
        let Json::Object(members) = document else {
            return Err(RepositoryError::ConstraintViolation {
                path: path.to_string(),
                reason: "a node fixture must be a JSON object".to_string(),
            }
            .into());
        };
        let primary_type = members.get(JCR_PRIMARY_TYPE).and_then(Json::as_str);
        let id = self.insert_child(parent, name, primary_type)?;
        let node = self.node_handle(id);

        for mixin in mixin_names(members) {
            node.add_mixin(mixin)?;
        }
        for (key, member) in members {
            if key == JCR_PRIMARY_TYPE || key == JCR_MIXIN_TYPES {
                continue;
            }
            match member {
                Json::Null => {}
                Json::Object(_) => {
                    self.import_object(id, key, member, &child_path(path, key))?;
                }
                Json::Array(items) => {
                    let values = items
                        .iter()
                        .filter_map(scalar)
                        .collect::<Vec<Value>>();
                    node.set_property(key, Some(Values::multiple(values)))?;
                }
                scalar_member => {
                    if let Some(value) = scalar(scalar_member) {
                        node.set_property(key, Some(Values::single(value)))?;
                    }
                }
            }
        }
        Ok(id)
    }
}

fn mixin_names(members: &Map<String, Json>) -> impl Iterator<Item = &str> {
    members
        .get(JCR_MIXIN_TYPES)
        .and_then(Json::as_array)
        .into_iter()
        .flatten()
        .filter_map(Json::as_str)
}

fn scalar(json: &Json) -> Option<Value> {
    match json {
        Json::String(s) => Some(Value::String(s.clone())),
        Json::Bool(b) => Some(Value::Boolean(*b)),
        Json::Number(n) => match n.as_i64() {
            Some(long) => Some(Value::Long(long)),
            None => n.as_f64().map(Value::Double),
        },
        _ => None,
    }
}
