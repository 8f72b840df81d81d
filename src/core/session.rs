//! Session context: resolved identity plus the store handle.
//!
//! A `Session` is an explicit value constructed once by `load` and
//! passed by reference into every operation; there is no process-wide
//! singleton. Fields mutated in memory are not persisted until an
//! explicit `save`.
//!
//! The url, password, and session_key fields are stored for a remote
//! sync service that this tool never actually calls; they are carried
//! as inert configuration.

use crate::core::error::DockeepError;
use crate::core::index::{self, Document};
use crate::core::prefs;
use crate::core::storage;
use crate::core::store::Store;
use serde::Serialize;
use ulid::Ulid;

pub const DEFAULT_LOCATION: &str = "default";
pub const DEFAULT_KIND: &str = "txt";

/// User-scope preference key holding the most recently created
/// document's uid. A convenience pointer, not an ownership relation.
pub const CURRENT_DOC_KEY: &str = "current_doc";

#[derive(Debug)]
pub struct Session {
    store: Store,
    pub username: String,
    pub password: Option<String>,
    pub session_key: Option<String>,
    pub url: Option<String>,
    pub project: Option<String>,
    pub location: String,
}

/// Read-only view of the loaded session fields, for display. Secrets
/// (password, session_key) are deliberately left out.
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub username: String,
    pub url: Option<String>,
    pub project: Option<String>,
    pub location: String,
    pub current_doc: Option<String>,
}

impl Session {
    /// Resolve identity and load the user-scope fields.
    ///
    /// The username comes from the argument, falling back to the global
    /// scope; if neither yields one, this fails with `MissingIdentity`
    /// and leaves the store untouched. A resolved username is persisted
    /// back to the global scope. The user-scope fields are read
    /// independently; no scope cascades into another.
    pub fn load(store: Store, username: Option<&str>) -> Result<Self, DockeepError> {
        let username = match username.filter(|u| !u.is_empty()) {
            Some(u) => u.to_string(),
            None => prefs::get_global(&store, "username")?.ok_or(DockeepError::MissingIdentity)?,
        };
        prefs::put_global(&store, "username", &username)?;

        let password = prefs::get_user(&store, &username, "password")?;
        let session_key = prefs::get_user(&store, &username, "session_key")?;
        let url = prefs::get_user(&store, &username, "url")?;
        let project = prefs::get_user(&store, &username, "project")?;
        let location = prefs::get_user(&store, &username, "location")?
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        Ok(Self {
            store,
            username,
            password,
            session_key,
            url,
            project,
            location,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Persist the session fields: username to the global scope, the
    /// rest to the user scope, as independent upserts. Not wrapped in a
    /// transaction; a mid-sequence failure leaves a partial update.
    pub fn save(&self) -> Result<(), DockeepError> {
        prefs::put_global(&self.store, "username", &self.username)?;
        self.put_user_field("password", self.password.as_deref())?;
        self.put_user_field("session_key", self.session_key.as_deref())?;
        self.put_user_field("url", self.url.as_deref())?;
        self.put_user_field("project", self.project.as_deref())?;
        Ok(())
    }

    fn put_user_field(&self, key: &str, value: Option<&str>) -> Result<(), DockeepError> {
        if let Some(value) = value {
            prefs::put_user(&self.store, &self.username, key, value)?;
        }
        Ok(())
    }

    /// Create a document: fresh uid, content file materialized on disk,
    /// metadata indexed only once the file exists, and the user-scope
    /// `current_doc` pointer updated.
    pub fn create_document(
        &self,
        name: &str,
        location: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Document, DockeepError> {
        let location = location.filter(|l| !l.is_empty()).unwrap_or(&self.location);
        let kind = kind.filter(|k| !k.is_empty()).unwrap_or(DEFAULT_KIND);
        let uid = Ulid::new().to_string();

        let path = storage::materialize(&self.store, &uid, location, kind)?;
        if path.exists() {
            index::index_document(&self.store, &uid, name, location, kind)?;
        }
        prefs::put_user(&self.store, &self.username, CURRENT_DOC_KEY, &uid)?;

        index::get_document(&self.store, &uid)?
            .ok_or_else(|| DockeepError::NotFound(format!("document {uid} was not indexed")))
    }

    /// Resolve the `current_doc` pointer, if any, against the index.
    pub fn current_document(&self) -> Result<Option<Document>, DockeepError> {
        match prefs::get_user(&self.store, &self.username, CURRENT_DOC_KEY)? {
            Some(uid) => index::get_document(&self.store, &uid),
            None => Ok(None),
        }
    }

    pub fn status(&self) -> Result<SessionStatus, DockeepError> {
        let current_doc =
            prefs::get_user(&self.store, &self.username, CURRENT_DOC_KEY)?;
        Ok(SessionStatus {
            username: self.username.clone(),
            url: self.url.clone(),
            project: self.project.clone(),
            location: self.location.clone(),
            current_doc,
        })
    }
}
