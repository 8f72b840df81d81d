//! dockeep: a daemonless personal document keeper.
//!
//! Every document gets an opaque unique identifier, a metadata row in a
//! local SQLite index, and a content file laid out on disk by
//! convention (`<root>/<location>/<uid>/doc.<kind>`). Per-user
//! configuration lives in a layered preference store in the same
//! database.
//!
//! # Architecture
//!
//! - **Store** (`core::store`): per-user root directory plus the SQLite
//!   database; connections are scoped per call.
//! - **PreferenceStore** (`core::prefs`): global / user / user-project
//!   key-value scopes with upsert writes.
//! - **DocumentIndex** (`core::index`): uid → metadata, idempotent
//!   indexing, substring search by name.
//! - **DocumentStorage** (`core::storage`): path derivation and content
//!   file materialization.
//! - **Session** (`core::session`): resolved identity composed over the
//!   pieces above; the unit the CLI layer calls into.
//!
//! The CLI hands the content path to an external editor and assumes
//! nothing beyond "the file may have different content afterwards".
//! Remote-service fields (url, password, session key) are stored but
//! never used for network I/O.

mod cli;
pub mod core;

use cli::{Cli, Command, ConfigCli, EditCli, NewCli, SearchCli, StatusCli};
use crate::core::{
    error::DockeepError,
    index::{self, Document},
    prefs,
    session::Session,
    store::Store,
};

use clap::Parser;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;

pub fn run() -> Result<(), DockeepError> {
    let cli = Cli::parse();
    let store = Store::open_default()?;
    let session = Session::load(store, cli.user.as_deref())?;

    match cli.command {
        Command::New(args) => cmd_new(&session, args),
        Command::Edit(args) => cmd_edit(&session, args),
        Command::Search(args) => cmd_search(&session, args),
        Command::Status(args) => cmd_status(&session, args),
        Command::Config(args) => cmd_config(session, args),
    }
}

fn cmd_new(session: &Session, args: NewCli) -> Result<(), DockeepError> {
    let doc = session.create_document(
        &args.name,
        args.location.as_deref(),
        args.kind.as_deref(),
    )?;
    println!(
        "created document: {} ({}/{})",
        doc.uid.bright_green(),
        doc.location,
        doc.kind
    );
    if !args.no_edit {
        open_in_editor(&doc.path)?;
    }
    Ok(())
}

fn cmd_edit(session: &Session, args: EditCli) -> Result<(), DockeepError> {
    let doc = match args.fragment {
        None => session.current_document()?.ok_or_else(|| {
            DockeepError::NotFound("no current document; create one with `dockeep new`".into())
        })?,
        Some(fragment) => {
            let docs = index::search_by_name(session.store(), &fragment)?;
            if docs.is_empty() {
                return Err(DockeepError::NotFound(format!(
                    "no document matching '{fragment}'"
                )));
            }
            choose_document(docs)?
        }
    };
    open_in_editor(&doc.path)
}

/// Numbered pick list on stdout, selection read from stdin. A choice
/// outside the result range aborts the invocation.
fn choose_document(mut docs: Vec<Document>) -> Result<Document, DockeepError> {
    for (i, doc) in docs.iter().enumerate() {
        println!("{}) {}", i.to_string().bright_cyan(), doc.name);
    }
    print!("Select document to edit: ");
    std::io::stdout().flush().map_err(DockeepError::IoError)?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(DockeepError::IoError)?;
    let given = line.trim().to_string();

    match given.parse::<usize>().ok().filter(|i| *i < docs.len()) {
        Some(i) => Ok(docs.remove(i)),
        None => Err(DockeepError::AmbiguousSelection {
            given,
            count: docs.len(),
        }),
    }
}

fn cmd_search(session: &Session, args: SearchCli) -> Result<(), DockeepError> {
    let docs = index::search_by_name(session.store(), &args.fragment)?;
    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }
    if docs.is_empty() {
        println!("no documents matching '{}'", args.fragment);
        return Ok(());
    }
    for doc in &docs {
        println!(
            "{}  {} ({}/{})",
            doc.uid.bright_cyan(),
            doc.name.bold(),
            doc.location,
            doc.kind
        );
    }
    Ok(())
}

fn cmd_status(session: &Session, args: StatusCli) -> Result<(), DockeepError> {
    let status = session.status()?;
    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }
    let dash = "-".to_string();
    println!("{} {}", "username:".bold(), status.username);
    println!("{} {}", "url:".bold(), status.url.as_ref().unwrap_or(&dash));
    println!(
        "{} {}",
        "project:".bold(),
        status.project.as_ref().unwrap_or(&dash)
    );
    println!("{} {}", "location:".bold(), status.location);
    println!(
        "{} {}",
        "current:".bold(),
        status.current_doc.as_ref().unwrap_or(&dash)
    );
    Ok(())
}

fn cmd_config(mut session: Session, args: ConfigCli) -> Result<(), DockeepError> {
    if let Some(url) = args.url {
        session.url = Some(url);
    }
    if let Some(project) = args.project {
        session.project = Some(project);
    }
    if let Some(password) = args.password {
        session.password = Some(password);
    }
    if let Some(session_key) = args.session_key {
        session.session_key = Some(session_key);
    }
    if let Some(location) = args.location {
        prefs::put_user(session.store(), &session.username, "location", &location)?;
        session.location = location;
    }
    session.save()?;
    println!("{}", "configuration saved".bright_green());
    Ok(())
}

/// Hand the content file to an external editor and wait for it. The
/// file may have different content after this returns; nothing else is
/// assumed about what the editor did.
fn open_in_editor(path: &Path) -> Result<(), DockeepError> {
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
        .arg(path)
        .status()
        .map_err(DockeepError::IoError)?;
    if !status.success() {
        return Err(DockeepError::EditorError(format!(
            "{editor} exited with {status}"
        )));
    }
    Ok(())
}
