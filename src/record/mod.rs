//! Records: one row of named, typed values
//!
//! A record is an ordered sequence of `(FieldName, Value)` pairs with a
//! derived name index for O(1) lookup.
//!
//! # Invariants
//!
//! - Field names within a record are unique
//! - Records are immutable after construction
//! - Field order is preserved and significant for equality

pub mod json;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Interned field (column) name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName(Arc<str>);

impl FieldName {
    /// Creates a field name; names compare case-sensitively
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&FieldName> for FieldName {
    fn from(name: &FieldName) -> Self {
        name.clone()
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("duplicate field name '{0}'")]
    DuplicateField(FieldName),

    #[error("field/value count mismatch: {names} names, {values} values")]
    LengthMismatch { names: usize, values: usize },

    #[error("unsupported JSON for field '{field}': {reason}")]
    UnsupportedJson { field: String, reason: String },

    #[error("malformed JSON input: {0}")]
    MalformedJson(String),
}

/// Result type for record construction
pub type RecordResult<T> = Result<T, RecordError>;

/// An immutable row
#[derive(Debug, Clone)]
pub struct Record {
    fields: Vec<(FieldName, Value)>,
    index: HashMap<FieldName, usize>,
}

impl Record {
    /// Builds a record from ordered pairs, rejecting duplicate names.
    pub fn new(fields: Vec<(FieldName, Value)>) -> RecordResult<Self> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, (name, _)) in fields.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(RecordError::DuplicateField(name.clone()));
            }
        }
        Ok(Self { fields, index })
    }

    /// Builds a record from parallel name and value lists.
    ///
    /// Native values are converted through `Into<Value>` with their kinds
    /// left untouched. Fails when the lists differ in length or a name
    /// repeats.
    pub fn normalized<N, V>(
        names: impl IntoIterator<Item = N>,
        values: impl IntoIterator<Item = V>,
    ) -> RecordResult<Self>
    where
        N: Into<FieldName>,
        V: Into<Value>,
    {
        let names: Vec<FieldName> = names.into_iter().map(Into::into).collect();
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if names.len() != values.len() {
            return Err(RecordError::LengthMismatch {
                names: names.len(),
                values: values.len(),
            });
        }

        Self::new(names.into_iter().zip(values).collect())
    }

    /// Returns the empty record
    pub fn empty() -> Self {
        Self {
            fields: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Looks up a field value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index.get(name).map(|&position| &self.fields[position].1)
    }

    /// Whether the record has a field called `name`
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Field names in record order
    pub fn field_names(&self) -> impl Iterator<Item = &FieldName> {
        self.fields.iter().map(|(name, _)| name)
    }

    /// Values in record order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.fields.iter().map(|(name, value)| (name, value))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the record, returning its fields in insertion order
    pub fn into_fields(self) -> Vec<(FieldName, Value)> {
        self.fields
    }
}

/// Structural equality: same names in the same order, same values.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Record {}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
