// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;
use serde::{Deserialize, Serialize};

/// Externally supplied collaborator identifier, distinct from the surrogate
/// `id` the store assigns internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollabNumber(i64);

impl CollabNumber {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| ParseError::Unparsable("collaborator number", raw.to_string()))
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for CollabNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A collaborator as read back from the store. `sector_name` is resolved
/// through the sector relation; it is not a persisted column.
#[derive(Debug, Clone, PartialEq)]
pub struct Collaborator {
    pub id: i64,
    pub collab_number: i64,
    pub full_name: String,
    pub birth_date: String,
    pub current_salary: f64,
    pub active: bool,
    pub sector_id: i64,
    pub sector_name: String,
}

/// The writable field set of a collaborator: what an insert persists and
/// what an update patches. The parent reference is already resolved to
/// `sector_id` by the time this struct exists.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollaborator {
    pub collab_number: i64,
    pub full_name: String,
    pub birth_date: String,
    pub current_salary: f64,
    pub active: bool,
    pub sector_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collab_number_parses_decimal_integers() {
        assert_eq!(CollabNumber::parse("12345"), Ok(CollabNumber(12345)));
        assert_eq!(CollabNumber::parse("-7"), Ok(CollabNumber(-7)));
    }

    #[test]
    fn collab_number_serializes_transparently() {
        let number = CollabNumber::parse("12345").expect("parse");
        assert_eq!(serde_json::to_string(&number).expect("serialize"), "12345");
    }

    #[test]
    fn collab_number_rejects_non_integers() {
        let err = CollabNumber::parse("STRING_TEST").expect_err("must fail");
        assert_eq!(
            err.to_string(),
            "The value 'STRING_TEST' cannot be parsed as a collaborator number"
        );
        assert!(CollabNumber::parse("12.5").is_err());
        assert!(CollabNumber::parse("").is_err());
    }
}
