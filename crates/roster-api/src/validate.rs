// SPDX-License-Identifier: Apache-2.0

use crate::schema::{observed_name, EntitySchema};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Required fields missing from the payload (absent key or explicit
    /// null), sorted by field name.
    MissingParameters(Vec<&'static str>),
    /// First payload value whose kind does not match its declared checker.
    InvalidType {
        field: String,
        observed: &'static str,
        expected: &'static str,
    },
    /// Payload key with no entry in the field schema.
    UnknownParameter(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingParameters(names) => {
                let quoted = names
                    .iter()
                    .map(|name| format!("'{name}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "The following parameters are required: {quoted}")
            }
            Self::InvalidType {
                observed, expected, ..
            } => {
                write!(
                    f,
                    "Wrong parameter type. Got '{observed}'. Expected {expected}"
                )
            }
            Self::UnknownParameter(name) => write!(f, "Unknown parameter: '{name}'"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a raw JSON payload against an entity schema. Pure predicate:
/// the payload is never transformed.
///
/// Missing required fields are reported together, sorted by name. Type
/// checking then walks the payload in key insertion order and stops at the
/// first mismatch.
pub fn validate(schema: &EntitySchema, payload: &Map<String, Value>) -> Result<(), ValidationError> {
    let mut missing: Vec<&'static str> = schema
        .fields
        .iter()
        .filter(|spec| payload.get(spec.name).map_or(true, Value::is_null))
        .map(|spec| spec.name)
        .collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(ValidationError::MissingParameters(missing));
    }

    for (key, value) in payload {
        let Some(kind) = schema.kind_of(key) else {
            return Err(ValidationError::UnknownParameter(key.clone()));
        };
        if !kind.matches(value) {
            return Err(ValidationError::InvalidType {
                field: key.clone(),
                observed: observed_name(value),
                expected: kind.expected_name(),
            });
        }
    }

    Ok(())
}
