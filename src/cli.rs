//! CLI struct definitions for the dockeep command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "dockeep",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daemonless personal document keeper: a local SQLite index plus a filesystem \
             layout convention for plain-text documents."
)]
pub(crate) struct Cli {
    /// Username owning the preference scopes. Persisted on first use;
    /// later invocations may omit it.
    #[clap(long, global = true)]
    pub user: Option<String>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Create a new document and open it in the editor
    New(NewCli),
    /// Edit the current document, or pick one by name fragment
    Edit(EditCli),
    /// Search the index by name fragment
    Search(SearchCli),
    /// Show the loaded session fields
    Status(StatusCli),
    /// Update stored session fields
    Config(ConfigCli),
}

#[derive(clap::Args, Debug)]
pub(crate) struct NewCli {
    /// Display name for the document (not unique).
    pub name: String,
    /// Storage namespace; defaults to the session's configured location.
    #[clap(long)]
    pub location: Option<String>,
    /// Content kind, reused as the file extension: txt, md, rst, json, etc.
    #[clap(long)]
    pub kind: Option<String>,
    /// Create and index only; do not open the editor.
    #[clap(long)]
    pub no_edit: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct EditCli {
    /// Name fragment to search for. Omit to edit the current document.
    pub fragment: Option<String>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct SearchCli {
    /// Name fragment; an empty fragment matches every document.
    pub fragment: String,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct StatusCli {
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ConfigCli {
    /// Remote service URL (stored, never called).
    #[clap(long)]
    pub url: Option<String>,
    /// Project name for the user-project preference scope.
    #[clap(long)]
    pub project: Option<String>,
    /// Basic-auth password (stored, never sent).
    #[clap(long)]
    pub password: Option<String>,
    /// Remote session key (stored, never sent).
    #[clap(long)]
    pub session_key: Option<String>,
    /// Default storage location for new documents.
    #[clap(long)]
    pub location: Option<String>,
}
