use std::{any::Any, rc::Rc};

use super::{WrapperError, errors::require_non_empty};
use crate::{
    Result,
    constants::READ_ONLY_PROPERTY,
    node::{Item, NodeRef, Property, PropertyVisitor, RepositoryError, child_path},
    value::{PropertyType, Value, Values},
};

/// A read-only property that exists only in memory.
///
/// The values are fixed at construction; `is_multiple` is true when two or
/// more values were supplied, and single-value accessors read the first one.
/// Every mutation fails with an unsupported-operation error.
#[derive(Debug, Clone)]
pub struct StubProperty {
    parent: NodeRef,
    name: String,
    values: Vec<Value>,
    referenced: Vec<NodeRef>,
}

impl StubProperty {
    /// Creates a stub property under `parent`.
    ///
    /// `name` must be non-empty and `values` must hold at least one value, all
    /// of the same type.
    pub fn new(parent: NodeRef, name: &str, values: impl Into<Values>) -> Result<Self> {
        let values = values.into();
        validate(name, &values)?;
        Ok(Self {
            parent,
            name: name.to_string(),
            values: values.into_vec(),
            referenced: Vec::new(),
        })
    }

    /// Creates a reference property pointing at `nodes`.
    pub fn referencing(parent: NodeRef, name: &str, nodes: Vec<NodeRef>) -> Result<Self> {
        require_non_empty("name", name)?;
        if nodes.is_empty() {
            return Err(
                WrapperError::invalid_argument("nodes", "at least one node is required").into(),
            );
        }
        let values = nodes
            .iter()
            .map(|node| node.identifier().map(Value::Reference))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            parent,
            name: name.to_string(),
            values,
            referenced: nodes,
        })
    }

    fn primary(&self) -> &Value {
        // Construction guarantees at least one value.
        &self.values[0]
    }

    fn rejected(&self, operation: &str) -> crate::Error {
        tracing::debug!(property = %self.name, operation, "Rejected mutation of stub property");
        WrapperError::unsupported(operation, READ_ONLY_PROPERTY).into()
    }
}

/// Checks the arguments shared by every stub constructor.
pub(crate) fn validate(name: &str, values: &Values) -> std::result::Result<(), WrapperError> {
    require_non_empty("name", name)?;
    if values.is_empty() {
        return Err(WrapperError::invalid_argument(
            "values",
            "at least one value is required",
        ));
    }
    if !values.is_homogeneous() {
        return Err(WrapperError::invalid_argument(
            "values",
            "all values must share one type",
        ));
    }
    Ok(())
}

impl Property for StubProperty {
    fn name(&self) -> Result<String> {
        Ok(self.name.clone())
    }

    fn path(&self) -> Result<String> {
        Ok(child_path(&self.parent.path()?, &self.name))
    }

    fn depth(&self) -> Result<usize> {
        Ok(self.parent.depth()? + 1)
    }

    fn parent(&self) -> Result<NodeRef> {
        Ok(self.parent.clone())
    }

    fn ancestor(&self, depth: usize) -> Result<Option<Item>> {
        let own = self.depth()?;
        if depth == own {
            Ok(Some(Item::Property(Rc::new(self.clone()))))
        } else if depth < own {
            Ok(self.parent.ancestor(depth)?.map(Item::Node))
        } else {
            Ok(None)
        }
    }

    fn workspace_name(&self) -> Result<Option<String>> {
        self.parent.workspace_name()
    }

    fn is_same(&self, other: &Item) -> Result<bool> {
        Ok(other
            .as_property()
            .and_then(|p| p.as_any().downcast_ref::<StubProperty>())
            .is_some_and(|other| other.primary() == self.primary()))
    }

    fn property_type(&self) -> Result<PropertyType> {
        Ok(self.primary().property_type())
    }

    fn is_multiple(&self) -> Result<bool> {
        Ok(self.values.len() > 1)
    }

    fn value(&self) -> Result<Value> {
        Ok(self.primary().clone())
    }

    fn values(&self) -> Result<Vec<Value>> {
        Ok(self.values.clone())
    }

    fn referenced_nodes(&self) -> Result<Vec<NodeRef>> {
        if self.primary().property_type() != PropertyType::Reference {
            return Err(RepositoryError::value_format(
                PropertyType::Reference.name(),
                format!("{} values do not reference nodes", self.primary().property_type()),
            )
            .into());
        }
        Ok(self.referenced.clone())
    }

    fn set_value(&self, _values: Option<Values>) -> Result<()> {
        Err(self.rejected("set value"))
    }

    fn remove(&self) -> Result<()> {
        Err(self.rejected("remove"))
    }

    fn save(&self) -> Result<()> {
        Err(self.rejected("save"))
    }

    fn refresh(&self, _keep_changes: bool) -> Result<()> {
        Err(self.rejected("refresh"))
    }

    fn accept(&self, _visitor: &mut dyn PropertyVisitor) -> Result<()> {
        Err(self.rejected("accept"))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
