//! Model records and their validation reports.

use indexmap::IndexMap;
use inline_editor_common::Pretty;
use inline_editor_fields::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::constraint::Constraint;
use crate::error::{Result, ValidationError};

/// A field's current value and the constraints it must satisfy, in
/// evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub value: Value,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

/// An ordered set of named fields to validate together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    fields: IndexMap<String, FieldEntry>,
}

impl ModelRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, or replace one with the same name in place.
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: Value,
        constraints: Vec<Constraint>,
    ) -> Self {
        self.insert(name, value, constraints);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value, constraints: Vec<Constraint>) {
        self.fields
            .insert(name.into(), FieldEntry { value, constraints });
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).map(|entry| &entry.value)
    }

    /// Replace the value of an existing field.
    pub fn set_value(&mut self, name: &str, value: Value) -> Result<()> {
        let entry = self
            .fields
            .get_mut(name)
            .ok_or_else(|| ValidationError::UnknownField {
                field: name.to_string(),
            })?;
        entry.value = value;
        Ok(())
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluate every field. Each field reports the message of its first
    /// failing constraint, or nothing.
    pub fn validate(&self, clock: &dyn Clock) -> ValidationReport {
        let results = self
            .fields
            .iter()
            .map(|(name, entry)| {
                let message = entry
                    .constraints
                    .iter()
                    .find_map(|constraint| constraint.check(&entry.value, clock))
                    .map(str::to_string);
                (name.clone(), message)
            })
            .collect();
        let report = ValidationReport { results };
        debug!(valid = report.is_valid(), report = %Pretty(&report), "validated model record");
        report
    }
}

/// Outcome of [`ModelRecord::validate`]: every field, in declaration order,
/// with its error message if it has one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    results: IndexMap<String, Option<String>>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.results.values().all(Option::is_none)
    }

    /// Failing fields and their messages, in declaration order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results
            .iter()
            .filter_map(|(field, message)| Some((field.as_str(), message.as_deref()?)))
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.results.get(field)?.as_deref()
    }

    /// Whether the report covers `field` at all.
    pub fn contains(&self, field: &str) -> bool {
        self.results.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.results
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
