//! Document index: uid → metadata.
//!
//! Metadata rows are written once at creation and never mutated or
//! deleted here; only the content file changes afterwards (by an
//! external editor).

use crate::core::error::DockeepError;
use crate::core::storage;
use crate::core::store::Store;
use rusqlite::{OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque unique identifier, assigned once at creation.
    pub uid: String,
    /// Display label; not unique.
    pub name: String,
    /// Storage namespace partitioning documents on disk and in the index.
    pub location: String,
    /// Content-type tag, reused as the file extension.
    pub kind: String,
    /// Derived from the store root; not persisted.
    pub path: PathBuf,
}

fn document_from_row(store: &Store, row: &Row<'_>) -> rusqlite::Result<Document> {
    let uid: String = row.get(0)?;
    let name: String = row.get(1)?;
    let location: String = row.get(2)?;
    let kind: String = row.get(3)?;
    let path = storage::document_path(store, &location, &uid, &kind);
    Ok(Document {
        uid,
        name,
        location,
        kind,
        path,
    })
}

/// Record a document's metadata. Idempotent by uid: if a row already
/// exists the call is a no-op (no update, no duplicate).
pub fn index_document(
    store: &Store,
    uid: &str,
    name: &str,
    location: &str,
    kind: &str,
) -> Result<(), DockeepError> {
    if get_document(store, uid)?.is_some() {
        return Ok(());
    }
    store.with_conn(|conn| {
        conn.execute(
            "INSERT INTO document (uid, name, location, kind) VALUES (?1, ?2, ?3, ?4)",
            params![uid, name, location, kind],
        )?;
        Ok(())
    })
}

/// Point lookup by uid. Absence is `Ok(None)`, never an error.
pub fn get_document(store: &Store, uid: &str) -> Result<Option<Document>, DockeepError> {
    store.with_conn(|conn| {
        let doc = conn
            .query_row(
                "SELECT uid, name, location, kind FROM document WHERE uid = ?1",
                params![uid],
                |row| document_from_row(store, row),
            )
            .optional()?;
        Ok(doc)
    })
}

/// Substring match on `name`, wildcarded on both sides. An empty
/// fragment matches every row. Results come back in storage order.
pub fn search_by_name(store: &Store, fragment: &str) -> Result<Vec<Document>, DockeepError> {
    store.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT uid, name, location, kind FROM document WHERE name LIKE ?1")?;
        let pattern = format!("%{}%", fragment);
        let rows = stmt.query_map(params![pattern], |row| document_from_row(store, row))?;
        let mut docs = Vec::new();
        for row in rows {
            docs.push(row?);
        }
        Ok(docs)
    })
}
