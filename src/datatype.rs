//! Typed data values and the data-column schema of temporal objects.
//!
//! Temporal objects carry caller-declared data fields next to the two
//! reserved keys (object id and element id). The schema is declared up
//! front; every column has a kind and a default value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TemporalError};

/// Reserved column name for the object id.
pub const OBJECT_ID_COLUMN: &str = "id";
/// Reserved column name for the temporal element foreign key.
pub const ELEMENT_ID_COLUMN: &str = "temporal_element_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    Long,
    Double,
    Text,
    Bool,
}

impl DataKind {
    /// Numeric kinds take part in mean aggregation.
    pub fn is_numeric(self) -> bool {
        matches!(self, DataKind::Long | DataKind::Double)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataValue {
    Long(i64),
    Double(f64),
    Text(String),
    Bool(bool),
}

impl DataValue {
    pub fn kind(&self) -> DataKind {
        match self {
            DataValue::Long(_) => DataKind::Long,
            DataValue::Double(_) => DataKind::Double,
            DataValue::Text(_) => DataKind::Text,
            DataValue::Bool(_) => DataKind::Bool,
        }
    }

    /// The numeric reading of a value, `None` for non-numeric kinds.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            DataValue::Long(value) => Some(*value as f64),
            DataValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            DataValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataValue::Long(value) => write!(f, "{value}"),
            DataValue::Double(value) => write!(f, "{value}"),
            DataValue::Text(value) => write!(f, "{value}"),
            DataValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    name: String,
    kind: DataKind,
    default: DataValue,
}

impl DataColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DataKind {
        self.kind
    }

    pub fn default_value(&self) -> &DataValue {
        &self.default
    }
}

/// The ordered set of data columns carried by every temporal object of a
/// dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    columns: Vec<DataColumn>,
}

impl DataSchema {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Declares a data column. Reserved names, duplicate names and defaults
    /// of the wrong kind are configuration errors raised before anything is
    /// recorded.
    pub fn add_column(&mut self, name: &str, kind: DataKind, default: DataValue) -> Result<()> {
        if name == OBJECT_ID_COLUMN || name == ELEMENT_ID_COLUMN {
            return Err(TemporalError::Configuration(format!(
                "the column names \"{OBJECT_ID_COLUMN}\" and \"{ELEMENT_ID_COLUMN}\" are reserved"
            )));
        }
        if self.columns.iter().any(|column| column.name == name) {
            return Err(TemporalError::Configuration(format!(
                "duplicate column name \"{name}\""
            )));
        }
        if default.kind() != kind {
            return Err(TemporalError::Configuration(format!(
                "default value for column \"{name}\" does not match its kind"
            )));
        }
        self.columns.push(DataColumn {
            name: name.to_string(),
            kind,
            default,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> Option<&DataColumn> {
        self.columns.get(index)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &DataColumn> {
        self.columns.iter()
    }

    /// One default value per column, in declaration order.
    pub fn defaults(&self) -> Vec<DataValue> {
        self.columns
            .iter()
            .map(|column| column.default.clone())
            .collect()
    }
}
