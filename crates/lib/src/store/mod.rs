//! In-memory content store.
//!
//! [`MemoryWorkspace`] is a reference implementation of the node contract: a
//! single workspace holding a tree of nodes keyed by UUID identifiers. Changes
//! apply immediately, so `save` and `refresh` only validate the handle.
//!
//! It raises the store's own error kinds (missing parents, duplicate names,
//! stale handles, lock and version conflicts) so that decorators can be
//! exercised against realistic failures.

mod import;
mod node;
mod node_type;
mod property;

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Result,
    constants::{DEFAULT_WORKSPACE, NT_UNSTRUCTURED, REP_ROOT, ROOT_PATH},
    node::{NodeRef, RepositoryError, child_path},
    value::Values,
};

pub use node::MemoryNode;
pub use node_type::SimpleNodeType;
pub use property::MemoryProperty;

/// Configuration for an in-memory workspace.
///
/// ```
/// # use node_decorators::store::{MemoryWorkspace, WorkspaceConfig};
/// let workspace = MemoryWorkspace::new(WorkspaceConfig {
///     name: "website".to_string(),
///     ..Default::default()
/// });
/// assert_eq!(workspace.name(), "website");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Workspace name reported by every node
    pub name: String,

    /// Primary type of the root node
    #[serde(default = "default_root_type")]
    pub root_primary_type: String,

    /// Primary type used when a node is added without one
    #[serde(default = "default_node_type")]
    pub default_primary_type: String,
}

fn default_root_type() -> String {
    REP_ROOT.to_string()
}

fn default_node_type() -> String {
    NT_UNSTRUCTURED.to_string()
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_WORKSPACE.to_string(),
            root_primary_type: default_root_type(),
            default_primary_type: default_node_type(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeRecord {
    pub(crate) name: String,
    pub(crate) parent: Option<Uuid>,
    pub(crate) primary_type: String,
    pub(crate) mixins: Vec<String>,
    pub(crate) children: Vec<Uuid>,
    pub(crate) properties: Vec<(String, Values)>,
    pub(crate) locked: bool,
    pub(crate) checked_out: bool,
}

impl NodeRecord {
    fn new(name: String, parent: Option<Uuid>, primary_type: String) -> Self {
        Self {
            name,
            parent,
            primary_type,
            mixins: Vec::new(),
            children: Vec::new(),
            properties: Vec::new(),
            locked: false,
            checked_out: true,
        }
    }

    pub(crate) fn property(&self, name: &str) -> Option<&Values> {
        self.properties
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, values)| values)
    }
}

#[derive(Debug)]
pub(crate) struct WorkspaceData {
    pub(crate) config: WorkspaceConfig,
    pub(crate) root: Uuid,
    pub(crate) nodes: HashMap<Uuid, NodeRecord>,
}

/// A single in-memory workspace.
///
/// Cloning the workspace clones the handle, not the tree.
#[derive(Debug, Clone)]
pub struct MemoryWorkspace {
    pub(crate) data: Rc<RefCell<WorkspaceData>>,
}

impl Default for MemoryWorkspace {
    fn default() -> Self {
        Self::new(WorkspaceConfig::default())
    }
}

impl MemoryWorkspace {
    /// Creates an empty workspace containing only the root node.
    pub fn new(config: WorkspaceConfig) -> Self {
        let root = Uuid::new_v4();
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            NodeRecord::new(String::new(), None, config.root_primary_type.clone()),
        );
        tracing::debug!(workspace = %config.name, "Created in-memory workspace");
        Self {
            data: Rc::new(RefCell::new(WorkspaceData {
                config,
                root,
                nodes,
            })),
        }
    }

    /// Creates an empty workspace with the given name and default types.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(WorkspaceConfig {
            name: name.into(),
            ..Default::default()
        })
    }

    pub fn name(&self) -> String {
        self.data.borrow().config.name.clone()
    }

    pub fn config(&self) -> WorkspaceConfig {
        self.data.borrow().config.clone()
    }

    pub fn root_node(&self) -> NodeRef {
        let root = self.data.borrow().root;
        self.node_handle(root)
    }

    /// Looks up a node by absolute path.
    pub fn node_at(&self, path: &str) -> Result<Option<NodeRef>> {
        if !path.starts_with('/') {
            return Err(RepositoryError::InvalidPath {
                path: path.to_string(),
                reason: "absolute paths start with '/'".to_string(),
            }
            .into());
        }
        let root = self.data.borrow().root;
        Ok(self.resolve(root, path)?.map(|id| self.node_handle(id)))
    }

    /// Looks up a node by identifier.
    pub fn node_by_identifier(&self, identifier: &str) -> Result<Option<NodeRef>> {
        let Ok(id) = Uuid::parse_str(identifier) else {
            return Ok(None);
        };
        let exists = self.data.borrow().nodes.contains_key(&id);
        Ok(exists.then(|| self.node_handle(id)))
    }

    /// Number of nodes in the workspace, root included.
    pub fn node_count(&self) -> usize {
        self.data.borrow().nodes.len()
    }

    pub(crate) fn node_handle(&self, id: Uuid) -> NodeRef {
        Rc::new(MemoryNode::new(self.clone(), id))
    }

    pub(crate) fn is_same_workspace(&self, other: &MemoryWorkspace) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn read<R>(&self, id: Uuid, f: impl FnOnce(&NodeRecord) -> R) -> Result<R> {
        let data = self.data.borrow();
        let record = data
            .nodes
            .get(&id)
            .ok_or_else(|| RepositoryError::InvalidItemState {
                identifier: id.to_string(),
            })?;
        Ok(f(record))
    }

    pub(crate) fn write<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut NodeRecord) -> Result<R>,
    ) -> Result<R> {
        let mut data = self.data.borrow_mut();
        let record = data
            .nodes
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::InvalidItemState {
                identifier: id.to_string(),
            })?;
        f(record)
    }

    pub(crate) fn path_of(&self, id: Uuid) -> Result<String> {
        let data = self.data.borrow();
        let mut names = Vec::new();
        let mut current = id;
        loop {
            let record = data
                .nodes
                .get(&current)
                .ok_or_else(|| RepositoryError::InvalidItemState {
                    identifier: id.to_string(),
                })?;
            match record.parent {
                Some(parent) => {
                    names.push(record.name.clone());
                    current = parent;
                }
                None => break,
            }
        }
        Ok(names
            .iter()
            .rev()
            .fold(ROOT_PATH.to_string(), |path, name| child_path(&path, name)))
    }

    pub(crate) fn depth_of(&self, id: Uuid) -> Result<usize> {
        let data = self.data.borrow();
        let mut depth = 0;
        let mut current = id;
        loop {
            let record = data
                .nodes
                .get(&current)
                .ok_or_else(|| RepositoryError::InvalidItemState {
                    identifier: id.to_string(),
                })?;
            match record.parent {
                Some(parent) => {
                    depth += 1;
                    current = parent;
                }
                None => return Ok(depth),
            }
        }
    }

    /// Resolves a relative path from `from`. A leading `/` starts at the root.
    pub(crate) fn resolve(&self, from: Uuid, rel_path: &str) -> Result<Option<Uuid>> {
        if rel_path.is_empty() {
            return Err(RepositoryError::InvalidPath {
                path: rel_path.to_string(),
                reason: "path is empty".to_string(),
            }
            .into());
        }
        let data = self.data.borrow();
        if !data.nodes.contains_key(&from) {
            return Err(RepositoryError::InvalidItemState {
                identifier: from.to_string(),
            }
            .into());
        }
        let mut current = if rel_path.starts_with('/') {
            data.root
        } else {
            from
        };
        for segment in rel_path.split('/').filter(|s| !s.is_empty()) {
            let Some(record) = data.nodes.get(&current) else {
                return Ok(None);
            };
            let next = match segment {
                "." => Some(current),
                ".." => record.parent,
                name => record
                    .children
                    .iter()
                    .copied()
                    .find(|child| data.nodes.get(child).is_some_and(|c| c.name == name)),
            };
            match next {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Splits `rel_path` into the node it addresses and the final name.
    pub(crate) fn resolve_parent<'p>(
        &self,
        from: Uuid,
        rel_path: &'p str,
    ) -> Result<(Option<Uuid>, &'p str)> {
        match rel_path.rsplit_once('/') {
            Some((parent, name)) if parent.is_empty() => {
                let root = self.data.borrow().root;
                Ok((Some(root), name))
            }
            Some((parent, name)) => Ok((self.resolve(from, parent)?, name)),
            None => Ok((Some(from), rel_path)),
        }
    }

    pub(crate) fn insert_child(
        &self,
        parent: Uuid,
        name: &str,
        primary_type: Option<&str>,
    ) -> Result<Uuid> {
        if name.is_empty() || name == "." || name == ".." {
            return Err(RepositoryError::InvalidPath {
                path: name.to_string(),
                reason: "not a valid node name".to_string(),
            }
            .into());
        }
        let parent_path = self.path_of(parent)?;
        let path = child_path(&parent_path, name);
        let mut data = self.data.borrow_mut();
        let primary_type = primary_type
            .map(str::to_string)
            .unwrap_or_else(|| data.config.default_primary_type.clone());
        let parent_record = data
            .nodes
            .get(&parent)
            .ok_or_else(|| RepositoryError::InvalidItemState {
                identifier: parent.to_string(),
            })?;
        if !parent_record.checked_out {
            return Err(RepositoryError::Version {
                path: parent_path,
                reason: "node is checked in".to_string(),
            }
            .into());
        }
        let exists = parent_record
            .children
            .iter()
            .any(|child| data.nodes.get(child).is_some_and(|c| c.name == name));
        if exists {
            return Err(RepositoryError::ItemExists { path }.into());
        }

        let id = Uuid::new_v4();
        data.nodes.insert(
            id,
            NodeRecord::new(name.to_string(), Some(parent), primary_type),
        );
        if let Some(parent_record) = data.nodes.get_mut(&parent) {
            parent_record.children.push(id);
        }
        tracing::trace!(path = %path, "Added node");
        Ok(id)
    }

    pub(crate) fn remove_subtree(&self, id: Uuid) -> Result<()> {
        let path = self.path_of(id)?;
        let mut data = self.data.borrow_mut();
        let parent = data.nodes.get(&id).and_then(|record| record.parent);
        let Some(parent) = parent else {
            return Err(RepositoryError::ConstraintViolation {
                path,
                reason: "the root node cannot be removed".to_string(),
            }
            .into());
        };
        if data.nodes.get(&parent).is_some_and(|p| !p.checked_out) {
            return Err(RepositoryError::Version {
                path,
                reason: "parent node is checked in".to_string(),
            }
            .into());
        }
        if let Some(parent_record) = data.nodes.get_mut(&parent) {
            parent_record.children.retain(|child| *child != id);
        }
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(record) = data.nodes.remove(&next) {
                pending.extend(record.children);
            }
        }
        tracing::trace!(path = %path, "Removed node");
        Ok(())
    }
}
