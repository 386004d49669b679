// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "roster-api";

mod dto;
mod errors;
mod schema;
mod validate;

pub use dto::{CollaboratorDto, SectorDto};
pub use errors::{ApiError, ApiErrorCode};
pub use schema::{
    observed_name, EntitySchema, FieldKind, FieldSpec, COLLABORATOR_SCHEMA, SECTOR_SCHEMA,
};
pub use validate::{validate, ValidationError};
