//! Store handle for dockeep's on-disk state.
//!
//! A `Store` is a per-user root directory holding the SQLite index
//! (`dockeep.db`) and the document content tree (`<location>/<uid>/`).

use crate::core::db;
use crate::core::error::DockeepError;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the store root directory.
    root: PathBuf,
    db_path: PathBuf,
}

impl Store {
    /// Open (creating if absent) the store at the ambient per-user root:
    /// `$DOCKEEP_HOME` if set, otherwise `$HOME/.dockeep`.
    pub fn open_default() -> Result<Self, DockeepError> {
        let root = match std::env::var_os("DOCKEEP_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".dockeep"))
                .ok_or(DockeepError::HomeNotFound)?,
        };
        Self::open_at(root)
    }

    /// Open (creating if absent) a store rooted at an explicit directory.
    pub fn open_at(root: impl Into<PathBuf>) -> Result<Self, DockeepError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(DockeepError::IoError)?;
        let db_path = root.join(db::DB_NAME);
        db::initialize_store_db(&db_path)?;
        Ok(Self { root, db_path })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run a closure against a connection scoped to this call. The
    /// connection (and any statements prepared on it) is released on
    /// every exit path, including errors.
    pub fn with_conn<F, R>(&self, f: F) -> Result<R, DockeepError>
    where
        F: FnOnce(&Connection) -> Result<R, DockeepError>,
    {
        let conn = db::db_connect(&self.db_path)?;
        f(&conn)
    }
}
