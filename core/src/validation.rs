//! Request body decoding and payload validation.
//!
//! Bodies go through two explicit steps:
//!
//! 1. [`decode_body`] turns raw bytes into an untyped JSON value, failing with
//!    a [`ParseError`] when the bytes are not JSON at all.
//! 2. [`validate`] checks that value against the item schema and only then
//!    produces a typed [`ItemPayload`].
//!
//! Validation never stops at the first problem: every violated field ends up
//! in the returned [`ValidationError`].

use crate::error::ParseError;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// The caller-controlled part of an item, available only after validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemPayload {
    /// Non-empty label
    pub label: String,
    /// Completion flag
    pub completed: bool,
}

/// A single violated field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field
    pub field: &'static str,
    /// Human-readable message, already mentioning the field
    pub message: String,
}

impl FieldError {
    /// Creates a field error with an explicit message.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn required(field: &'static str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every field that failed validation, in schema order.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("validation failed: {}", join_messages(.fields))]
pub struct ValidationError {
    /// The violated fields
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    /// Wraps a list of field errors.
    #[must_use]
    pub const fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }

    /// Returns the field messages, one per violation.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.message.clone()).collect()
    }

    /// Returns `true` if `field` is among the violations.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn join_messages(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decodes a raw request body into untyped JSON.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is empty or not valid JSON.
pub fn decode_body(raw: &[u8]) -> Result<Value, ParseError> {
    serde_json::from_slice(raw).map_err(|e| ParseError::new(e.to_string()))
}

/// Validates a decoded payload against the item schema.
///
/// `label` must be a non-empty string and `completed` a boolean. Other keys,
/// including a caller-supplied `id`, are ignored. A payload that is not a JSON
/// object is missing both fields.
///
/// # Errors
///
/// Returns [`ValidationError`] listing every violated field.
pub fn validate(value: &Value) -> Result<ItemPayload, ValidationError> {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);
    let mut errors = Vec::new();

    let label = match fields.get("label") {
        None | Some(Value::Null) => {
            errors.push(FieldError::required("label"));
            None
        },
        Some(Value::String(label)) if label.is_empty() => {
            errors.push(FieldError::new("label", "label must not be empty"));
            None
        },
        Some(Value::String(label)) => Some(label.clone()),
        Some(_) => {
            errors.push(FieldError::new("label", "label must be a string"));
            None
        },
    };

    let completed = match fields.get("completed") {
        None | Some(Value::Null) => {
            errors.push(FieldError::required("completed"));
            None
        },
        Some(Value::Bool(completed)) => Some(*completed),
        Some(_) => {
            errors.push(FieldError::new("completed", "completed must be a boolean"));
            None
        },
    };

    match (label, completed) {
        (Some(label), Some(completed)) => Ok(ItemPayload { label, completed }),
        _ => Err(ValidationError::new(errors)),
    }
}
