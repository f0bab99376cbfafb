use std::{any::Any, rc::Rc};

use uuid::Uuid;

use super::MemoryWorkspace;
use crate::{
    Result,
    node::{Item, Node, NodeRef, Property, PropertyVisitor, RepositoryError, child_path},
    value::{PropertyType, Value, Values},
};

/// Handle to a property stored in a [`MemoryWorkspace`].
#[derive(Debug, Clone)]
pub struct MemoryProperty {
    workspace: MemoryWorkspace,
    node: Uuid,
    name: String,
}

impl MemoryProperty {
    pub(crate) fn new(workspace: MemoryWorkspace, node: Uuid, name: String) -> Self {
        Self {
            workspace,
            node,
            name,
        }
    }

    fn stored_values(&self) -> Result<Values> {
        let values = self
            .workspace
            .read(self.node, |record| record.property(&self.name).cloned())?;
        values.ok_or_else(|| {
            RepositoryError::InvalidItemState {
                identifier: format!("{}/{}", self.node, self.name),
            }
            .into()
        })
    }

    fn parent_node(&self) -> NodeRef {
        self.workspace.node_handle(self.node)
    }
}

impl Property for MemoryProperty {
    fn name(&self) -> Result<String> {
        self.stored_values()?;
        Ok(self.name.clone())
    }

    fn path(&self) -> Result<String> {
        self.stored_values()?;
        Ok(child_path(&self.workspace.path_of(self.node)?, &self.name))
    }

    fn depth(&self) -> Result<usize> {
        Ok(self.workspace.depth_of(self.node)? + 1)
    }

    fn parent(&self) -> Result<NodeRef> {
        Ok(self.parent_node())
    }

    fn ancestor(&self, depth: usize) -> Result<Option<Item>> {
        let own = self.depth()?;
        if depth == own {
            Ok(Some(Item::Property(Rc::new(self.clone()))))
        } else if depth < own {
            Ok(self.parent_node().ancestor(depth)?.map(Item::Node))
        } else {
            Ok(None)
        }
    }

    fn workspace_name(&self) -> Result<Option<String>> {
        Ok(Some(self.workspace.name()))
    }

    fn is_same(&self, other: &Item) -> Result<bool> {
        let Some(other) = other
            .as_property()
            .and_then(|p| p.as_any().downcast_ref::<MemoryProperty>())
        else {
            return Ok(false);
        };
        Ok(other.node == self.node
            && other.name == self.name
            && other.workspace.is_same_workspace(&self.workspace))
    }

    fn property_type(&self) -> Result<PropertyType> {
        Ok(self
            .stored_values()?
            .property_type()
            .unwrap_or(PropertyType::String))
    }

    fn is_multiple(&self) -> Result<bool> {
        Ok(self.stored_values()?.is_multiple())
    }

    fn value(&self) -> Result<Value> {
        let values = self.stored_values()?;
        match values.first() {
            Some(value) if !values.is_multiple() => Ok(value.clone()),
            _ => Err(RepositoryError::value_format(
                "a single value",
                format!("property '{}' is multi-valued", self.name),
            )
            .into()),
        }
    }

    fn values(&self) -> Result<Vec<Value>> {
        let values = self.stored_values()?;
        if !values.is_multiple() {
            return Err(RepositoryError::value_format(
                "multiple values",
                format!("property '{}' is single-valued", self.name),
            )
            .into());
        }
        Ok(values.into_vec())
    }

    fn referenced_nodes(&self) -> Result<Vec<NodeRef>> {
        let mut nodes = Vec::new();
        for value in self.stored_values()?.iter() {
            let Value::Reference(identifier) = value else {
                return Err(RepositoryError::value_format(
                    PropertyType::Reference.name(),
                    format!("{} values do not reference nodes", value.property_type()),
                )
                .into());
            };
            let node = self
                .workspace
                .node_by_identifier(identifier)?
                .ok_or_else(|| RepositoryError::PathNotFound {
                    path: identifier.clone(),
                })?;
            nodes.push(node);
        }
        Ok(nodes)
    }

    fn set_value(&self, values: Option<Values>) -> Result<()> {
        self.stored_values()?;
        self.parent_node().set_property(&self.name, values)?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        self.set_value(None)
    }

    fn save(&self) -> Result<()> {
        self.stored_values().map(|_| ())
    }

    fn refresh(&self, _keep_changes: bool) -> Result<()> {
        self.stored_values().map(|_| ())
    }

    fn accept(&self, visitor: &mut dyn PropertyVisitor) -> Result<()> {
        visitor.visit_property(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

