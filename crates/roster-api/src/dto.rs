// SPDX-License-Identifier: Apache-2.0

use roster_model::{Collaborator, Sector};
use serde::{Deserialize, Serialize};

// Field declaration order below is the serialized order; historical clients
// assert on the literal stringified output.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectorDto {
    pub name: String,
}

impl From<Sector> for SectorDto {
    fn from(sector: Sector) -> Self {
        Self { name: sector.name }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollaboratorDto {
    pub collab_number: i64,
    pub full_name: String,
    pub birth_date: String,
    pub current_salary: f64,
    pub active: bool,
    pub sector_name: String,
}

impl From<Collaborator> for CollaboratorDto {
    fn from(collaborator: Collaborator) -> Self {
        Self {
            collab_number: collaborator.collab_number,
            full_name: collaborator.full_name,
            birth_date: collaborator.birth_date,
            current_salary: collaborator.current_salary,
            active: collaborator.active,
            sector_name: collaborator.sector_name,
        }
    }
}
