// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub const CRATE_NAME: &str = "roster-store";
pub const SCHEMA_VERSION: i64 = 1;

mod collaborators;
mod sectors;

pub use collaborators::{
    delete_collaborator, find_collaborator_by_number, insert_collaborator, list_collaborators,
    list_collaborators_by_range, list_collaborators_by_substring, update_collaborator,
};
pub use sectors::{
    delete_sector, find_sector_by_name, insert_sector, list_sectors, list_sectors_by_substring,
    rename_sector,
};

#[derive(Debug)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self(err.to_string())
    }
}

/// Opens (creating if necessary) the roster database at `path` and
/// bootstraps the schema. `:memory:` is accepted for ephemeral stores.
pub fn open(path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Uniqueness of `sector.name` and `collaborator.collab_number` is enforced
/// by the handlers' check-then-insert guard, not by UNIQUE constraints; a
/// constraint-violation path would replace the 409 responses with generic
/// storage failures.
pub fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;
        PRAGMA foreign_keys=ON;
        CREATE TABLE IF NOT EXISTS sector (
          id INTEGER PRIMARY KEY,
          name TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS collaborator (
          id INTEGER PRIMARY KEY,
          collab_number INTEGER NOT NULL,
          full_name TEXT NOT NULL,
          birth_date TEXT NOT NULL,
          current_salary REAL NOT NULL,
          active INTEGER NOT NULL,
          sector_id INTEGER NOT NULL REFERENCES sector(id) ON DELETE CASCADE
        );
        CREATE INDEX IF NOT EXISTS idx_sector_name ON sector(name);
        CREATE INDEX IF NOT EXISTS idx_collaborator_collab_number ON collaborator(collab_number);
        CREATE INDEX IF NOT EXISTS idx_collaborator_full_name ON collaborator(full_name);
        CREATE INDEX IF NOT EXISTS idx_collaborator_sector_id ON collaborator(sector_id);
        ",
    )?;
    conn.execute_batch(&format!("PRAGMA user_version={SCHEMA_VERSION};"))?;
    Ok(())
}

/// Escapes LIKE metacharacters so a substring needle matches literally.
#[must_use]
pub fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_quotes_metacharacters_only() {
        assert_eq!(escape_like("Recursos"), "Recursos");
        assert_eq!(escape_like("100%_!"), "100!%!_!!");
    }

    #[test]
    fn schema_survives_reopen_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roster.sqlite");

        let conn = open(&path).expect("first open");
        let sector = insert_sector(&conn, "Tecnologia").expect("insert");
        assert_eq!(sector.name, "Tecnologia");
        drop(conn);

        let conn = open(&path).expect("reopen");
        let found = find_sector_by_name(&conn, "Tecnologia")
            .expect("query")
            .expect("sector persisted");
        assert_eq!(found.id, sector.id);
    }

    #[test]
    fn user_version_is_stamped() {
        let conn = open_in_memory().expect("open");
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .expect("user_version");
        assert_eq!(version, SCHEMA_VERSION);
    }
}
