// SPDX-License-Identifier: Apache-2.0

use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorCode {
    MissingParameters,
    InvalidParameterType,
    UnknownParameter,
    DuplicateKey,
    /// Add-time referential failure: the parent sector named by the payload
    /// does not exist. Distinct from `NotFound` because it maps to 409.
    ParentSectorMissing,
    NotFound,
    UnparsableKey,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::MissingParameters | Self::InvalidParameterType | Self::UnknownParameter => 422,
            Self::DuplicateKey | Self::ParentSectorMissing => 409,
            Self::NotFound => 404,
            Self::UnparsableKey => 400,
            Self::Internal => 500,
        }
    }

    /// JSON key the error body is wrapped under. Missing-parameter failures
    /// are warnings in the wire contract; everything else is an error.
    #[must_use]
    pub const fn body_key(self) -> &'static str {
        match self {
            Self::MissingParameters => "Warning",
            _ => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn duplicate_sector(name: &str) -> Self {
        Self::new(
            ApiErrorCode::DuplicateKey,
            format!("Sector already exists with name = {name}"),
        )
    }

    #[must_use]
    pub fn duplicate_collaborator(number: i64) -> Self {
        Self::new(
            ApiErrorCode::DuplicateKey,
            format!("Collaborator already exists with number = {number}"),
        )
    }

    #[must_use]
    pub fn sector_not_found(name: &str) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            format!("Sector not found with name = {name}"),
        )
    }

    /// Same message as [`Self::sector_not_found`], but raised while adding a
    /// collaborator, where a missing parent is a conflict rather than a
    /// lookup miss.
    #[must_use]
    pub fn sector_missing_for_add(name: &str) -> Self {
        Self::new(
            ApiErrorCode::ParentSectorMissing,
            format!("Sector not found with name = {name}"),
        )
    }

    #[must_use]
    pub fn collaborator_not_found(number: i64) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            format!("Collaborator not found with number = {number}"),
        )
    }

    #[must_use]
    pub fn unparsable_key(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::UnparsableKey, message)
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(ApiErrorCode::Internal, "internal storage error")
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::MissingParameters(_) => ApiErrorCode::MissingParameters,
            ValidationError::InvalidType { .. } => ApiErrorCode::InvalidParameterType,
            ValidationError::UnknownParameter(_) => ApiErrorCode::UnknownParameter,
        };
        Self::new(code, err.to_string())
    }
}
