// SPDX-License-Identifier: Apache-2.0

use crate::{escape_like, StoreError};
use roster_model::Sector;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn row_to_sector(row: &Row<'_>) -> rusqlite::Result<Sector> {
    Ok(Sector {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn find_sector_by_name(conn: &Connection, name: &str) -> Result<Option<Sector>, StoreError> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM sector WHERE name = ?1 LIMIT 1")?;
    let sector = stmt.query_row(params![name], row_to_sector).optional()?;
    Ok(sector)
}

pub fn list_sectors(conn: &Connection) -> Result<Vec<Sector>, StoreError> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM sector ORDER BY name ASC")?;
    let rows = stmt.query_map([], row_to_sector)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn list_sectors_by_substring(
    conn: &Connection,
    needle: &str,
) -> Result<Vec<Sector>, StoreError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name FROM sector WHERE name LIKE ?1 ESCAPE '!' ORDER BY name ASC",
    )?;
    let pattern = format!("%{}%", escape_like(needle));
    let rows = stmt.query_map(params![pattern], row_to_sector)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Caller must have verified name uniqueness beforehand; the store assigns
/// the surrogate key.
pub fn insert_sector(conn: &Connection, name: &str) -> Result<Sector, StoreError> {
    conn.execute("INSERT INTO sector (name) VALUES (?1)", params![name])?;
    Ok(Sector {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// No-op when no sector matches `name`; callers pre-check existence.
pub fn rename_sector(conn: &Connection, name: &str, new_name: &str) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE sector SET name = ?2 WHERE name = ?1",
        params![name, new_name],
    )?;
    Ok(())
}

/// Removes the sector row; owned collaborators go with it via the cascading
/// foreign key.
pub fn delete_sector(conn: &Connection, id: i64) -> Result<(), StoreError> {
    conn.execute("DELETE FROM sector WHERE id = ?1", params![id])?;
    Ok(())
}
