//! Filesystem layout for document content.
//!
//! Content lives under the store root by convention:
//! `<root>/<location>/<uid>/doc.<kind>`. The index never records a
//! document whose content file failed to materialize.

use crate::core::error::DockeepError;
use crate::core::store::Store;
use std::fs::{self, FileTimes, OpenOptions};
use std::path::PathBuf;
use std::time::SystemTime;

pub fn document_dir(store: &Store, location: &str, uid: &str) -> PathBuf {
    store.root().join(location).join(uid)
}

/// Derived, never persisted. The file name reuses `kind` (lowercased)
/// as the extension.
pub fn document_path(store: &Store, location: &str, uid: &str, kind: &str) -> PathBuf {
    document_dir(store, location, uid).join(format!("doc.{}", kind.to_lowercase()))
}

/// Create the document directory tree and ensure the content file
/// exists: created empty if absent, mtime bumped if already present.
/// Repeated calls are idempotent in existence, not in mtime.
pub fn materialize(
    store: &Store,
    uid: &str,
    location: &str,
    kind: &str,
) -> Result<PathBuf, DockeepError> {
    let dir = document_dir(store, location, uid);
    fs::create_dir_all(&dir).map_err(DockeepError::IoError)?;
    let path = document_path(store, location, uid, kind);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(DockeepError::IoError)?;
    file.set_times(FileTimes::new().set_modified(SystemTime::now()))
        .map_err(DockeepError::IoError)?;
    Ok(path)
}
