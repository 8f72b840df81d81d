use dockeep::core::{
    error::DockeepError,
    prefs,
    session::{CURRENT_DOC_KEY, Session},
    store::Store,
};
use rusqlite::Connection;
use std::fs;
use tempfile::TempDir;

fn open_store(tmp: &TempDir) -> Store {
    Store::open_at(tmp.path().join("store")).expect("open store")
}

fn total_rows(store: &Store) -> i64 {
    let conn = Connection::open(store.db_path()).expect("open verify");
    let mut total = 0;
    for table in ["global_prefs", "user_prefs", "user_project_prefs", "document"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .expect("count");
        total += count;
    }
    total
}

#[test]
fn load_without_a_username_anywhere_fails_with_missing_identity_and_no_side_effects() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);

    let err = Session::load(store.clone(), None).expect_err("load must fail");
    assert!(
        matches!(err, DockeepError::MissingIdentity),
        "unexpected error: {err}"
    );
    assert_eq!(total_rows(&store), 0, "a failed load must write nothing");
}

#[test]
fn load_persists_a_supplied_username_to_the_global_scope() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);

    let session = Session::load(store.clone(), Some("ada")).expect("load");
    assert_eq!(session.username, "ada");
    assert_eq!(
        prefs::get_global(&store, "username").expect("get"),
        Some("ada".to_string())
    );

    // A later load with no argument resolves the stored identity.
    let session = Session::load(store, None).expect("reload");
    assert_eq!(session.username, "ada");
}

#[test]
fn create_document_materializes_indexes_and_sets_the_current_pointer() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);
    let session = Session::load(store.clone(), Some("ada")).expect("load");

    let doc = session
        .create_document("notes", None, Some("md"))
        .expect("create");

    assert_eq!(doc.name, "notes");
    assert_eq!(doc.location, "default", "location defaults to the session's");
    assert_eq!(doc.kind, "md");
    assert_eq!(
        doc.path,
        store.root().join("default").join(&doc.uid).join("doc.md")
    );
    assert!(doc.path.exists());
    assert_eq!(fs::metadata(&doc.path).expect("metadata").len(), 0);

    let conn = Connection::open(store.db_path()).expect("open verify");
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM document", [], |row| row.get(0))
        .expect("count");
    assert_eq!(count, 1, "exactly one index row");

    assert_eq!(
        prefs::get_user(&store, "ada", CURRENT_DOC_KEY).expect("get"),
        Some(doc.uid.clone())
    );
    let current = session
        .current_document()
        .expect("current")
        .expect("pointer resolves");
    assert_eq!(current.uid, doc.uid);
}

#[test]
fn create_document_applies_txt_and_default_location_when_unspecified() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);
    let session = Session::load(store, Some("ada")).expect("load");

    let doc = session.create_document("plain", None, None).expect("create");
    assert_eq!(doc.location, "default");
    assert_eq!(doc.kind, "txt");
    assert!(doc.path.ends_with("doc.txt"));
}

#[test]
fn create_document_honors_explicit_location_and_kind() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);
    let session = Session::load(store.clone(), Some("ada")).expect("load");

    let doc = session
        .create_document("report", Some("work"), Some("rst"))
        .expect("create");
    assert_eq!(doc.location, "work");
    assert_eq!(doc.kind, "rst");
    assert!(store.root().join("work").join(&doc.uid).exists());
}

#[test]
fn each_created_document_gets_a_distinct_identifier() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);
    let session = Session::load(store, Some("ada")).expect("load");

    let first = session.create_document("one", None, None).expect("create");
    let second = session.create_document("two", None, None).expect("create");
    assert_ne!(first.uid, second.uid);

    // The pointer tracks the most recent creation.
    let current = session
        .current_document()
        .expect("current")
        .expect("present");
    assert_eq!(current.uid, second.uid);
}

#[test]
fn save_writes_the_set_fields_to_the_user_scope_as_upserts() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);
    let mut session = Session::load(store.clone(), Some("ada")).expect("load");

    session.url = Some("https://example.org/sync".to_string());
    session.project = Some("engine".to_string());
    session.save().expect("first save");

    session.project = Some("notes".to_string());
    session.save().expect("second save");

    assert_eq!(
        prefs::get_user(&store, "ada", "url").expect("get"),
        Some("https://example.org/sync".to_string())
    );
    assert_eq!(
        prefs::get_user(&store, "ada", "project").expect("get"),
        Some("notes".to_string())
    );

    let conn = Connection::open(store.db_path()).expect("open verify");
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM user_prefs WHERE username = 'ada' AND key = 'project'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(count, 1, "repeated saves must not duplicate rows");
}

#[test]
fn loaded_fields_round_trip_through_save_and_reload() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);

    let mut session = Session::load(store.clone(), Some("ada")).expect("load");
    session.password = Some("s3cret".to_string());
    session.session_key = Some("key-123".to_string());
    session.url = Some("https://example.org".to_string());
    session.project = Some("engine".to_string());
    session.save().expect("save");

    let reloaded = Session::load(store, None).expect("reload");
    assert_eq!(reloaded.password.as_deref(), Some("s3cret"));
    assert_eq!(reloaded.session_key.as_deref(), Some("key-123"));
    assert_eq!(reloaded.url.as_deref(), Some("https://example.org"));
    assert_eq!(reloaded.project.as_deref(), Some("engine"));
}

#[test]
fn current_document_is_none_until_a_document_is_created() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);
    let session = Session::load(store, Some("ada")).expect("load");

    assert!(session.current_document().expect("current").is_none());
}

#[test]
fn status_reflects_the_loaded_fields_and_current_pointer() {
    let tmp = TempDir::new().expect("tempdir");
    let store = open_store(&tmp);
    let session = Session::load(store, Some("ada")).expect("load");

    let status = session.status().expect("status");
    assert_eq!(status.username, "ada");
    assert_eq!(status.location, "default");
    assert!(status.current_doc.is_none());

    let doc = session.create_document("notes", None, None).expect("create");
    let status = session.status().expect("status");
    assert_eq!(status.current_doc.as_deref(), Some(doc.uid.as_str()));
}
