// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "roster-model";

mod collaborator;
mod sector;

pub use collaborator::{CollabNumber, Collaborator, NewCollaborator};
pub use sector::{Sector, SectorName};

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Unparsable(&'static str, String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Unparsable(name, raw) => {
                write!(f, "The value '{raw}' cannot be parsed as a {name}")
            }
        }
    }
}

impl std::error::Error for ParseError {}
