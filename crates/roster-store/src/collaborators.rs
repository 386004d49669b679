// SPDX-License-Identifier: Apache-2.0

use crate::{escape_like, StoreError};
use roster_model::{Collaborator, NewCollaborator};
use rusqlite::{params, Connection, OptionalExtension, Row};

// `sector_name` is not a collaborator column; reads materialize it through
// the sector relation.
const SELECT_COLLABORATOR: &str = "SELECT c.id, c.collab_number, c.full_name, c.birth_date, \
     c.current_salary, c.active, c.sector_id, s.name \
     FROM collaborator c JOIN sector s ON s.id = c.sector_id";

fn row_to_collaborator(row: &Row<'_>) -> rusqlite::Result<Collaborator> {
    Ok(Collaborator {
        id: row.get(0)?,
        collab_number: row.get(1)?,
        full_name: row.get(2)?,
        birth_date: row.get(3)?,
        current_salary: row.get(4)?,
        active: row.get(5)?,
        sector_id: row.get(6)?,
        sector_name: row.get(7)?,
    })
}

pub fn find_collaborator_by_number(
    conn: &Connection,
    collab_number: i64,
) -> Result<Option<Collaborator>, StoreError> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_COLLABORATOR} WHERE c.collab_number = ?1 LIMIT 1"
    ))?;
    let collaborator = stmt
        .query_row(params![collab_number], row_to_collaborator)
        .optional()?;
    Ok(collaborator)
}

pub fn list_collaborators(conn: &Connection) -> Result<Vec<Collaborator>, StoreError> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_COLLABORATOR} ORDER BY c.full_name ASC"))?;
    let rows = stmt.query_map([], row_to_collaborator)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Inclusive range filter on `collab_number`. Rows come back in natural
/// store order; range listing applies no display ordering.
pub fn list_collaborators_by_range(
    conn: &Connection,
    lower: i64,
    upper: i64,
) -> Result<Vec<Collaborator>, StoreError> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_COLLABORATOR} WHERE c.collab_number BETWEEN ?1 AND ?2"
    ))?;
    let rows = stmt.query_map(params![lower, upper], row_to_collaborator)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn list_collaborators_by_substring(
    conn: &Connection,
    needle: &str,
) -> Result<Vec<Collaborator>, StoreError> {
    let mut stmt = conn.prepare_cached(&format!(
        "{SELECT_COLLABORATOR} WHERE c.full_name LIKE ?1 ESCAPE '!' ORDER BY c.full_name ASC"
    ))?;
    let pattern = format!("%{}%", escape_like(needle));
    let rows = stmt.query_map(params![pattern], row_to_collaborator)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Caller must have verified `collab_number` uniqueness and resolved the
/// parent sector; the store assigns the surrogate key.
pub fn insert_collaborator(
    conn: &Connection,
    fields: &NewCollaborator,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO collaborator \
         (collab_number, full_name, birth_date, current_salary, active, sector_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            fields.collab_number,
            fields.full_name,
            fields.birth_date,
            fields.current_salary,
            fields.active,
            fields.sector_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Patches the row matching `collab_number` with the full writable field
/// set. No-op when no row matches; callers pre-check existence.
pub fn update_collaborator(
    conn: &Connection,
    collab_number: i64,
    fields: &NewCollaborator,
) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE collaborator SET collab_number = ?2, full_name = ?3, birth_date = ?4, \
         current_salary = ?5, active = ?6, sector_id = ?7 \
         WHERE collab_number = ?1",
        params![
            collab_number,
            fields.collab_number,
            fields.full_name,
            fields.birth_date,
            fields.current_salary,
            fields.active,
            fields.sector_id,
        ],
    )?;
    Ok(())
}

pub fn delete_collaborator(conn: &Connection, id: i64) -> Result<(), StoreError> {
    conn.execute("DELETE FROM collaborator WHERE id = ?1", params![id])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{delete_sector, insert_sector, open_in_memory};

    fn new_collaborator(number: i64, full_name: &str, sector_id: i64) -> NewCollaborator {
        NewCollaborator {
            collab_number: number,
            full_name: full_name.to_string(),
            birth_date: "1990-01-01".to_string(),
            current_salary: 1000.5,
            active: true,
            sector_id,
        }
    }

    fn seeded() -> (Connection, i64) {
        let conn = open_in_memory().expect("open memory db");
        let sector = insert_sector(&conn, "Tecnologia").expect("seed sector");
        for (number, name) in [(30, "Carla"), (10, "Bernardino"), (20, "Amanda")] {
            insert_collaborator(&conn, &new_collaborator(number, name, sector.id))
                .expect("seed collaborator");
        }
        (conn, sector.id)
    }

    #[test]
    fn find_joins_the_sector_name() {
        let (conn, sector_id) = seeded();
        let found = find_collaborator_by_number(&conn, 10)
            .expect("query")
            .expect("present");
        assert_eq!(found.full_name, "Bernardino");
        assert_eq!(found.sector_id, sector_id);
        assert_eq!(found.sector_name, "Tecnologia");
        assert!(find_collaborator_by_number(&conn, 99)
            .expect("query")
            .is_none());
    }

    #[test]
    fn list_orders_by_full_name() {
        let (conn, _) = seeded();
        let names: Vec<String> = list_collaborators(&conn)
            .expect("list")
            .into_iter()
            .map(|c| c.full_name)
            .collect();
        assert_eq!(names, vec!["Amanda", "Bernardino", "Carla"]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let (conn, _) = seeded();
        let numbers: Vec<i64> = list_collaborators_by_range(&conn, 10, 20)
            .expect("range")
            .into_iter()
            .map(|c| c.collab_number)
            .collect();
        assert_eq!(numbers, vec![10, 20]);
        assert!(list_collaborators_by_range(&conn, 40, 50)
            .expect("range")
            .is_empty());
    }

    #[test]
    fn substring_filter_matches_full_name_only() {
        let (conn, _) = seeded();
        let names: Vec<String> = list_collaborators_by_substring(&conn, "and")
            .expect("filter")
            .into_iter()
            .map(|c| c.full_name)
            .collect();
        // "Amanda" contains "and"; "Bernardino" and "Carla" do not.
        assert_eq!(names, vec!["Amanda"]);
    }

    #[test]
    fn update_patches_all_writable_fields() {
        let (conn, sector_id) = seeded();
        let mut fields = new_collaborator(11, "Bernardino Souza", sector_id);
        fields.current_salary = 2500.75;
        fields.active = false;
        update_collaborator(&conn, 10, &fields).expect("update");

        assert!(find_collaborator_by_number(&conn, 10)
            .expect("query")
            .is_none());
        let updated = find_collaborator_by_number(&conn, 11)
            .expect("query")
            .expect("re-keyed row");
        assert_eq!(updated.full_name, "Bernardino Souza");
        assert_eq!(updated.current_salary, 2500.75);
        assert!(!updated.active);
    }

    #[test]
    fn update_on_missing_row_is_a_noop() {
        let (conn, sector_id) = seeded();
        update_collaborator(&conn, 99, &new_collaborator(99, "Ninguém", sector_id))
            .expect("update");
        assert!(find_collaborator_by_number(&conn, 99)
            .expect("query")
            .is_none());
        assert_eq!(list_collaborators(&conn).expect("list").len(), 3);
    }

    #[test]
    fn deleting_a_sector_cascades_to_its_collaborators() {
        let (conn, sector_id) = seeded();
        let other = insert_sector(&conn, "Limpeza").expect("sector");
        insert_collaborator(&conn, &new_collaborator(77, "Dora", other.id)).expect("insert");

        delete_sector(&conn, sector_id).expect("delete sector");

        let remaining: Vec<i64> = list_collaborators(&conn)
            .expect("list")
            .into_iter()
            .map(|c| c.collab_number)
            .collect();
        assert_eq!(remaining, vec![77]);
    }

    #[test]
    fn delete_removes_a_single_collaborator() {
        let (conn, _) = seeded();
        let target = find_collaborator_by_number(&conn, 20)
            .expect("query")
            .expect("present");
        delete_collaborator(&conn, target.id).expect("delete");
        assert!(find_collaborator_by_number(&conn, 20)
            .expect("query")
            .is_none());
        assert_eq!(list_collaborators(&conn).expect("list").len(), 2);
    }
}
