use std::{any::Any, rc::Rc};

use uuid::Uuid;

use super::{MemoryProperty, MemoryWorkspace, SimpleNodeType};
use crate::{
    Result,
    node::{
        Item, NameFilter, Node, NodeRef, NodeTypeRef, PropertyRef, RepositoryError, child_path,
    },
    value::Values,
};

/// Handle to a node stored in a [`MemoryWorkspace`].
///
/// Handles stay valid until the node is removed; afterwards every call fails
/// with an invalid-item-state error.
#[derive(Debug, Clone)]
pub struct MemoryNode {
    workspace: MemoryWorkspace,
    id: Uuid,
}

impl MemoryNode {
    pub(crate) fn new(workspace: MemoryWorkspace, id: Uuid) -> Self {
        Self { workspace, id }
    }

    pub fn workspace(&self) -> &MemoryWorkspace {
        &self.workspace
    }

    fn property_handle(&self, node: Uuid, name: &str) -> PropertyRef {
        Rc::new(MemoryProperty::new(
            self.workspace.clone(),
            node,
            name.to_string(),
        ))
    }

    /// Fails with a version error unless the node is checked out.
    fn ensure_checked_out(&self) -> Result<()> {
        if self.workspace.read(self.id, |record| record.checked_out)? {
            Ok(())
        } else {
            Err(RepositoryError::Version {
                path: self.workspace.path_of(self.id)?,
                reason: "node is checked in".to_string(),
            }
            .into())
        }
    }

    /// Applies a mutation to a checked-out node.
    fn mutate(
        &self,
        operation: &str,
        f: impl FnOnce(&mut super::NodeRecord, &str) -> Result<()>,
    ) -> Result<()> {
        self.ensure_checked_out()?;
        let path = self.workspace.path_of(self.id)?;
        self.workspace.write(self.id, |record| f(record, &path))?;
        tracing::trace!(path = %path, operation, "Mutated node");
        Ok(())
    }
}

impl Node for MemoryNode {
    fn name(&self) -> Result<String> {
        self.workspace.read(self.id, |record| record.name.clone())
    }

    fn path(&self) -> Result<String> {
        self.workspace.path_of(self.id)
    }

    fn depth(&self) -> Result<usize> {
        self.workspace.depth_of(self.id)
    }

    fn identifier(&self) -> Result<String> {
        self.workspace.read(self.id, |_| self.id.to_string())
    }

    fn workspace_name(&self) -> Result<Option<String>> {
        Ok(Some(self.workspace.name()))
    }

    fn parent(&self) -> Result<Option<NodeRef>> {
        let parent = self.workspace.read(self.id, |record| record.parent)?;
        Ok(parent.map(|id| self.workspace.node_handle(id)))
    }

    fn ancestor(&self, depth: usize) -> Result<Option<NodeRef>> {
        let own = self.depth()?;
        if depth > own {
            return Ok(None);
        }
        let mut current = self.id;
        for _ in depth..own {
            match self.workspace.read(current, |record| record.parent)? {
                Some(parent) => current = parent,
                None => return Ok(None),
            }
        }
        Ok(Some(self.workspace.node_handle(current)))
    }

    fn is_same(&self, other: &Item) -> Result<bool> {
        let Item::Node(other) = other else {
            return Ok(false);
        };
        if let Some(other) = other.as_any().downcast_ref::<MemoryNode>() {
            return Ok(other.id == self.id && other.workspace.is_same_workspace(&self.workspace));
        }
        Ok(other.identifier()? == self.identifier()?
            && other.workspace_name()? == self.workspace_name()?)
    }

    fn primary_node_type(&self) -> Result<NodeTypeRef> {
        let name = self
            .workspace
            .read(self.id, |record| record.primary_type.clone())?;
        Ok(Rc::new(SimpleNodeType::primary(name)))
    }

    fn mixin_node_types(&self) -> Result<Vec<NodeTypeRef>> {
        let mixins = self.workspace.read(self.id, |record| record.mixins.clone())?;
        Ok(mixins
            .into_iter()
            .map(|name| Rc::new(SimpleNodeType::mixin(name)) as NodeTypeRef)
            .collect())
    }

    fn is_node_type(&self, name: &str) -> Result<bool> {
        if self.primary_node_type()?.is_node_type(name) {
            return Ok(true);
        }
        Ok(self
            .mixin_node_types()?
            .iter()
            .any(|mixin| mixin.is_node_type(name)))
    }

    fn property(&self, rel_path: &str) -> Result<Option<PropertyRef>> {
        let (node, name) = self.workspace.resolve_parent(self.id, rel_path)?;
        let Some(node) = node else {
            return Ok(None);
        };
        let exists = self
            .workspace
            .read(node, |record| record.property(name).is_some())?;
        Ok(exists.then(|| self.property_handle(node, name)))
    }

    fn has_property(&self, rel_path: &str) -> Result<bool> {
        Ok(self.property(rel_path)?.is_some())
    }

    fn properties(&self, filter: &NameFilter) -> Result<Vec<PropertyRef>> {
        let matcher = filter.matcher();
        let names: Vec<String> = self.workspace.read(self.id, |record| {
            record
                .properties
                .iter()
                .map(|(name, _)| name)
                .filter(|name| matcher.matches(name))
                .cloned()
                .collect()
        })?;
        Ok(names
            .iter()
            .map(|name| self.property_handle(self.id, name))
            .collect())
    }

    fn node(&self, rel_path: &str) -> Result<Option<NodeRef>> {
        Ok(self
            .workspace
            .resolve(self.id, rel_path)?
            .map(|id| self.workspace.node_handle(id)))
    }

    fn has_node(&self, rel_path: &str) -> Result<bool> {
        Ok(self.node(rel_path)?.is_some())
    }

    fn nodes(&self, filter: &NameFilter) -> Result<Vec<NodeRef>> {
        let matcher = filter.matcher();
        let children = self.workspace.read(self.id, |record| record.children.clone())?;
        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            let name = self.workspace.read(child, |record| record.name.clone())?;
            if matcher.matches(&name) {
                nodes.push(self.workspace.node_handle(child));
            }
        }
        Ok(nodes)
    }

    fn is_checked_out(&self) -> Result<bool> {
        self.workspace.read(self.id, |record| record.checked_out)
    }

    fn is_locked(&self) -> Result<bool> {
        self.workspace.read(self.id, |record| record.locked)
    }

    fn add_node(&self, rel_path: &str, primary_type: Option<&str>) -> Result<Option<NodeRef>> {
        let (parent, name) = self.workspace.resolve_parent(self.id, rel_path)?;
        let Some(parent) = parent else {
            let missing = rel_path.rsplit_once('/').map_or(rel_path, |(p, _)| p);
            return Err(RepositoryError::PathNotFound {
                path: child_path(&self.path()?, missing),
            }
            .into());
        };
        let id = self.workspace.insert_child(parent, name, primary_type)?;
        Ok(Some(self.workspace.node_handle(id)))
    }

    fn set_property(&self, name: &str, values: Option<Values>) -> Result<Option<PropertyRef>> {
        if name.is_empty() || name.contains('/') {
            return Err(RepositoryError::InvalidPath {
                path: name.to_string(),
                reason: "not a valid property name".to_string(),
            }
            .into());
        }
        match values {
            None => {
                self.mutate("remove property", |record, _| {
                    record.properties.retain(|(candidate, _)| candidate != name);
                    Ok(())
                })?;
                Ok(None)
            }
            Some(values) => {
                self.mutate("set property", |record, path| {
                    store_values(record, path, name, values)
                })?;
                Ok(Some(self.property_handle(self.id, name)))
            }
        }
    }

    fn order_before(&self, source: &str, destination: Option<&str>) -> Result<()> {
        let source_id = self.workspace.resolve(self.id, source)?;
        let destination_id = match destination {
            Some(destination) => self.workspace.resolve(self.id, destination)?,
            None => None,
        };
        self.mutate("order before", |record, path| {
            let missing = |name: &str| RepositoryError::PathNotFound {
                path: child_path(path, name),
            };
            let source_id = source_id
                .filter(|id| record.children.contains(id))
                .ok_or_else(|| missing(source))?;
            let Some(destination) = destination else {
                record.children.retain(|child| *child != source_id);
                record.children.push(source_id);
                return Ok(());
            };
            let destination_id = destination_id
                .filter(|id| record.children.contains(id))
                .ok_or_else(|| missing(destination))?;
            if destination_id == source_id {
                return Ok(());
            }
            record.children.retain(|child| *child != source_id);
            let index = record
                .children
                .iter()
                .position(|child| *child == destination_id)
                .ok_or_else(|| missing(destination))?;
            record.children.insert(index, source_id);
            Ok(())
        })
    }

    fn set_primary_type(&self, name: &str) -> Result<()> {
        self.mutate("set primary type", |record, _| {
            record.primary_type = name.to_string();
            Ok(())
        })
    }

    fn add_mixin(&self, name: &str) -> Result<()> {
        self.mutate("add mixin", |record, _| {
            if !record.mixins.iter().any(|mixin| mixin == name) {
                record.mixins.push(name.to_string());
            }
            Ok(())
        })
    }

    fn remove_mixin(&self, name: &str) -> Result<()> {
        self.mutate("remove mixin", |record, path| {
            let before = record.mixins.len();
            record.mixins.retain(|mixin| mixin != name);
            if record.mixins.len() == before {
                return Err(RepositoryError::ConstraintViolation {
                    path: path.to_string(),
                    reason: format!("mixin '{name}' is not assigned"),
                }
                .into());
            }
            Ok(())
        })
    }

    fn remove(&self) -> Result<()> {
        self.workspace.remove_subtree(self.id)
    }

    fn save(&self) -> Result<()> {
        self.workspace.read(self.id, |_| ())
    }

    fn refresh(&self, _keep_changes: bool) -> Result<()> {
        self.workspace.read(self.id, |_| ())
    }

    fn lock(&self) -> Result<()> {
        let path = self.path()?;
        self.workspace.write(self.id, |record| {
            if record.locked {
                return Err(RepositoryError::Lock {
                    path: path.clone(),
                    reason: "node is already locked".to_string(),
                }
                .into());
            }
            record.locked = true;
            Ok(())
        })?;
        tracing::trace!(path = %path, "Locked node");
        Ok(())
    }

    fn unlock(&self) -> Result<()> {
        let path = self.path()?;
        self.workspace.write(self.id, |record| {
            if !record.locked {
                return Err(RepositoryError::Lock {
                    path,
                    reason: "node is not locked".to_string(),
                }
                .into());
            }
            record.locked = false;
            Ok(())
        })
    }

    fn checkin(&self) -> Result<()> {
        self.workspace.write(self.id, |record| {
            record.checked_out = false;
            Ok(())
        })
    }

    fn checkout(&self) -> Result<()> {
        self.workspace.write(self.id, |record| {
            record.checked_out = true;
            Ok(())
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Stores `values` under `name`, replacing an existing property in place.
fn store_values(
    record: &mut super::NodeRecord,
    path: &str,
    name: &str,
    values: Values,
) -> Result<()> {
    if !values.is_homogeneous() {
        return Err(RepositoryError::ConstraintViolation {
            path: child_path(path, name),
            reason: "all values of a property must share one type".to_string(),
        }
        .into());
    }
    if !values.is_multiple() && values.is_empty() {
        return Err(RepositoryError::ConstraintViolation {
            path: child_path(path, name),
            reason: "a single-valued property needs a value".to_string(),
        }
        .into());
    }
    match record
        .properties
        .iter_mut()
        .find(|(candidate, _)| candidate == name)
    {
        Some((_, existing)) => *existing = values,
        None => record.properties.push((name.to_string(), values)),
    }
    Ok(())
}
