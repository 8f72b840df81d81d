//! Scoped key/value preferences.
//!
//! Three structurally independent scopes: global (key), user
//! (username+key), and user-project (username+project+key). There is no
//! cascading fallback between them; callers that want precedence must
//! query each scope explicitly.
//!
//! Writes are check-then-act upserts: SELECT for the scope-key tuple,
//! then UPDATE or INSERT. SQLite serializes the individual statements,
//! but the two steps together are not atomic; two concurrent writers
//! racing on a new key can both insert.

use crate::core::error::DockeepError;
use crate::core::store::Store;
use rusqlite::{OptionalExtension, params};

pub fn get_global(store: &Store, key: &str) -> Result<Option<String>, DockeepError> {
    store.with_conn(|conn| {
        let value = conn
            .query_row(
                "SELECT value FROM global_prefs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    })
}

pub fn put_global(store: &Store, key: &str, value: &str) -> Result<(), DockeepError> {
    if key.is_empty() || value.is_empty() {
        reject_empty_write("global");
        return Ok(());
    }
    store.with_conn(|conn| {
        let existing: Option<String> = conn
            .query_row(
                "SELECT value FROM global_prefs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            conn.execute(
                "UPDATE global_prefs SET value = ?1 WHERE key = ?2",
                params![value, key],
            )?;
        } else {
            conn.execute(
                "INSERT INTO global_prefs (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        Ok(())
    })
}

pub fn get_user(store: &Store, username: &str, key: &str) -> Result<Option<String>, DockeepError> {
    store.with_conn(|conn| {
        let value = conn
            .query_row(
                "SELECT value FROM user_prefs WHERE username = ?1 AND key = ?2",
                params![username, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    })
}

pub fn put_user(
    store: &Store,
    username: &str,
    key: &str,
    value: &str,
) -> Result<(), DockeepError> {
    if username.is_empty() || key.is_empty() || value.is_empty() {
        reject_empty_write("user");
        return Ok(());
    }
    store.with_conn(|conn| {
        let existing: Option<String> = conn
            .query_row(
                "SELECT value FROM user_prefs WHERE username = ?1 AND key = ?2",
                params![username, key],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            conn.execute(
                "UPDATE user_prefs SET value = ?1 WHERE username = ?2 AND key = ?3",
                params![value, username, key],
            )?;
        } else {
            conn.execute(
                "INSERT INTO user_prefs (username, key, value) VALUES (?1, ?2, ?3)",
                params![username, key, value],
            )?;
        }
        Ok(())
    })
}

pub fn get_user_project(
    store: &Store,
    username: &str,
    project: &str,
    key: &str,
) -> Result<Option<String>, DockeepError> {
    store.with_conn(|conn| {
        let value = conn
            .query_row(
                "SELECT value FROM user_project_prefs
                 WHERE username = ?1 AND project = ?2 AND key = ?3",
                params![username, project, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    })
}

pub fn put_user_project(
    store: &Store,
    username: &str,
    project: &str,
    key: &str,
    value: &str,
) -> Result<(), DockeepError> {
    if username.is_empty() || project.is_empty() || key.is_empty() || value.is_empty() {
        reject_empty_write("user-project");
        return Ok(());
    }
    store.with_conn(|conn| {
        let existing: Option<String> = conn
            .query_row(
                "SELECT value FROM user_project_prefs
                 WHERE username = ?1 AND project = ?2 AND key = ?3",
                params![username, project, key],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            conn.execute(
                "UPDATE user_project_prefs SET value = ?1
                 WHERE username = ?2 AND project = ?3 AND key = ?4",
                params![value, username, project, key],
            )?;
        } else {
            conn.execute(
                "INSERT INTO user_project_prefs (username, project, key, value)
                 VALUES (?1, ?2, ?3, ?4)",
                params![username, project, key, value],
            )?;
        }
        Ok(())
    })
}

// Empty scope fields, keys, or values are dropped rather than stored.
// Not an error by contract, but worth a trace on stderr.
fn reject_empty_write(scope: &str) {
    eprintln!("dockeep: ignoring {scope} preference write with an empty field");
}
