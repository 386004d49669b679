// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

/// The closed set of primitive kinds a payload field may carry. Matching is
/// strict: no coercion from strings, no integer/float crossover, no numeric
/// booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
}

impl FieldKind {
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            // i64-representable only: the storage column is a 64-bit integer.
            Self::Integer => matches!(value, Value::Number(n) if n.is_i64()),
            Self::Float => matches!(value, Value::Number(n) if n.is_f64()),
            Self::Text => value.is_string(),
            Self::Boolean => value.is_boolean(),
        }
    }

    #[must_use]
    pub const fn expected_name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "string",
            Self::Boolean => "boolean",
        }
    }
}

/// JSON kind name of an observed payload value, for the "Got '…'" half of
/// the type-mismatch message.
#[must_use]
pub fn observed_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Per-entity declaration of the required field set, in declaration order,
/// with the checker kind for each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.kind)
    }
}

pub const SECTOR_SCHEMA: EntitySchema = EntitySchema {
    fields: &[FieldSpec {
        name: "name",
        kind: FieldKind::Text,
    }],
};

pub const COLLABORATOR_SCHEMA: EntitySchema = EntitySchema {
    fields: &[
        FieldSpec {
            name: "collab_number",
            kind: FieldKind::Integer,
        },
        FieldSpec {
            name: "full_name",
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "birth_date",
            kind: FieldKind::Text,
        },
        FieldSpec {
            name: "current_salary",
            kind: FieldKind::Float,
        },
        FieldSpec {
            name: "active",
            kind: FieldKind::Boolean,
        },
        FieldSpec {
            name: "sector_name",
            kind: FieldKind::Text,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_checker_is_strict() {
        assert!(FieldKind::Integer.matches(&json!(5)));
        assert!(FieldKind::Integer.matches(&json!(-12)));
        assert!(!FieldKind::Integer.matches(&json!(5.0)));
        assert!(!FieldKind::Integer.matches(&json!("5")));
        assert!(!FieldKind::Integer.matches(&json!(true)));
        // Wider than i64 does not fit the storage column.
        assert!(!FieldKind::Integer.matches(&json!(18_446_744_073_709_551_615_u64)));
    }

    #[test]
    fn float_checker_rejects_integral_numbers() {
        assert!(FieldKind::Float.matches(&json!(123.45)));
        assert!(FieldKind::Float.matches(&json!(0.0)));
        assert!(!FieldKind::Float.matches(&json!(123)));
        assert!(!FieldKind::Float.matches(&json!("123.45")));
    }

    #[test]
    fn boolean_checker_rejects_numeric_and_string_forms() {
        assert!(FieldKind::Boolean.matches(&json!(true)));
        assert!(!FieldKind::Boolean.matches(&json!(1)));
        assert!(!FieldKind::Boolean.matches(&json!("true")));
    }

    #[test]
    fn text_checker_accepts_only_strings() {
        assert!(FieldKind::Text.matches(&json!("Tecnologia")));
        assert!(!FieldKind::Text.matches(&json!(null)));
        assert!(!FieldKind::Text.matches(&json!(["Tecnologia"])));
    }

    #[test]
    fn observed_names_cover_every_json_kind() {
        assert_eq!(observed_name(&json!(null)), "null");
        assert_eq!(observed_name(&json!(true)), "boolean");
        assert_eq!(observed_name(&json!(7)), "integer");
        assert_eq!(observed_name(&json!(7.5)), "float");
        assert_eq!(observed_name(&json!("x")), "string");
        assert_eq!(observed_name(&json!([])), "array");
        assert_eq!(observed_name(&json!({})), "object");
    }

    #[test]
    fn schema_lookup_finds_declared_fields_only() {
        assert_eq!(
            COLLABORATOR_SCHEMA.kind_of("current_salary"),
            Some(FieldKind::Float)
        );
        assert_eq!(COLLABORATOR_SCHEMA.kind_of("salary"), None);
        assert_eq!(SECTOR_SCHEMA.kind_of("name"), Some(FieldKind::Text));
    }
}
