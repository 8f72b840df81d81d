use crate::core::error::DockeepError;
use rusqlite::Connection;
use std::path::Path;

pub const DB_NAME: &str = "dockeep.db";

/// Four independent relations. Uniqueness (one row per preference key,
/// one row per document uid) is enforced at the application layer, not
/// by the schema.
pub const STORE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS global_prefs (key TEXT, value TEXT);
CREATE TABLE IF NOT EXISTS user_prefs (username TEXT, key TEXT, value TEXT);
CREATE TABLE IF NOT EXISTS user_project_prefs (username TEXT, project TEXT, key TEXT, value TEXT);
CREATE TABLE IF NOT EXISTS document (uid TEXT, name TEXT, location TEXT, kind TEXT);
";

pub fn db_connect(db_path: &Path) -> Result<Connection, DockeepError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(DockeepError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(DockeepError::RusqliteError)?;
    Ok(conn)
}

pub fn initialize_store_db(db_path: &Path) -> Result<(), DockeepError> {
    let conn = db_connect(db_path)?;
    conn.execute_batch(STORE_SCHEMA)?;
    Ok(())
}
