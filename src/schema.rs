use rusqlite::Connection;

use crate::errors::BuildingGraphError;

pub fn ensure_schema(conn: &Connection) -> Result<(), BuildingGraphError> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS building_elements (
            id           TEXT PRIMARY KEY,
            element_type TEXT NOT NULL,
            name         TEXT NOT NULL,
            area         REAL NOT NULL DEFAULT 0,
            properties   TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS building_relations (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            from_id    TEXT NOT NULL,
            to_id      TEXT NOT NULL,
            kind       TEXT NOT NULL,
            properties TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_relations_from ON building_relations(from_id, kind);
        CREATE INDEX IF NOT EXISTS idx_relations_to ON building_relations(to_id, kind);
        CREATE INDEX IF NOT EXISTS idx_elements_type ON building_elements(element_type);
        "#,
    )
    .map_err(|e| BuildingGraphError::schema(e.to_string()))?;
    Ok(())
}
