//! Core persistence layer: the preference store, the document index,
//! and the storage-path convention that ties identifiers to files.

pub mod db;
pub mod error;
pub mod index;
pub mod prefs;
pub mod session;
pub mod storage;
pub mod store;
