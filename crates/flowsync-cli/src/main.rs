//! flowsync administration CLI.
//!
//! Provides the `flowsync` binary for inspecting and maintaining the flow
//! documents held in a SQLite database, using the same `SqliteStore` the
//! HTTP server opens.
//!
//! Exit codes: 0 = success, 1 = bad input or missing document,
//! 3 = I/O or store error.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use flowsync_core::{validate, FlowContent, FlowDocument, Theme, UserId};
use flowsync_storage::{FlowStore, SqliteStore, StorageError, DEFAULT_COLLECTION};

/// flowsync flow document tools.
#[derive(Parser)]
#[command(name = "flowsync", about = "Inspect and maintain flowsync flow documents")]
struct Cli {
    /// Path to the flow database file.
    #[arg(short, long, default_value = "flowsync.db", global = true)]
    db: String,

    /// Document collection to operate on.
    #[arg(short, long, default_value = DEFAULT_COLLECTION, global = true)]
    collection: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List every user with a stored flow.
    Users,

    /// Print one user's flow document as JSON.
    Show {
        /// User whose flow to print.
        user_id: String,
    },

    /// Write one user's flow content (nodes, edges, theme) to a file.
    Export {
        user_id: String,

        /// Destination file; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace one user's flow with the content of a JSON file.
    Import {
        user_id: String,

        /// JSON file with `nodes`, `edges`, and optional `theme`.
        file: PathBuf,
    },

    /// Delete one user's flow.
    Delete { user_id: String },
}

/// Failure of a subcommand, carrying its exit code.
#[derive(Debug)]
struct CommandError {
    code: i32,
    message: String,
}

impl CommandError {
    fn input(message: impl Into<String>) -> Self {
        CommandError {
            code: 1,
            message: message.into(),
        }
    }

    fn io(message: impl Into<String>) -> Self {
        CommandError {
            code: 3,
            message: message.into(),
        }
    }
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        if err.is_not_found() {
            CommandError::input(err.to_string())
        } else {
            CommandError::io(err.to_string())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut store = match SqliteStore::new(&cli.db) {
        Ok(store) => store.with_collection(cli.collection.as_str()),
        Err(e) => {
            eprintln!("Error: failed to open database '{}': {}", cli.db, e);
            process::exit(3);
        }
    };

    if let Err(err) = run(&mut store, cli.command) {
        eprintln!("Error: {}", err.message);
        process::exit(err.code);
    }
}

fn run(store: &mut SqliteStore, command: Commands) -> Result<(), CommandError> {
    match command {
        Commands::Users => {
            for user in store.list_documents()? {
                println!(
                    "{}\tnodes={}\tedges={}\ttheme={}\tupdated_at={}",
                    user.user_id,
                    user.node_count,
                    user.edge_count,
                    user.theme,
                    user.updated_at.to_rfc3339()
                );
            }
            Ok(())
        }
        Commands::Show { user_id } => {
            let doc = load(store, &UserId(user_id))?;
            println!("{}", to_pretty_json(&doc)?);
            Ok(())
        }
        Commands::Export { user_id, output } => {
            let doc = load(store, &UserId(user_id))?;
            let json = to_pretty_json(&doc.content())?;
            match output {
                Some(path) => std::fs::write(&path, json).map_err(|e| {
                    CommandError::io(format!("failed to write '{}': {}", path.display(), e))
                }),
                None => {
                    println!("{}", json);
                    Ok(())
                }
            }
        }
        Commands::Import { user_id, file } => {
            let content = read_content(&file)?;
            let doc = store.put_document(&UserId(user_id), content)?;
            println!(
                "imported {} node(s), {} edge(s) for {}",
                doc.node_count, doc.edge_count, doc.user_id
            );
            Ok(())
        }
        Commands::Delete { user_id } => {
            let user_id = UserId(user_id);
            if store.delete_document(&user_id)? {
                println!("deleted flow for {}", user_id);
            } else {
                println!("no flow stored for {}", user_id);
            }
            Ok(())
        }
    }
}

fn load(store: &SqliteStore, user_id: &UserId) -> Result<FlowDocument, CommandError> {
    store
        .get_document(user_id)?
        .ok_or_else(|| CommandError::input(format!("no flow stored for {}", user_id)))
}

/// Reads an exported (or hand-written) content file with the same shape
/// checks the HTTP save route applies.
fn read_content(path: &PathBuf) -> Result<FlowContent, CommandError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CommandError::io(format!("failed to read '{}': {}", path.display(), e)))?;
    let mut value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| CommandError::input(format!("'{}' is not JSON: {}", path.display(), e)))?;

    let obj = value
        .as_object_mut()
        .ok_or_else(|| CommandError::input("content file must hold a JSON object"))?;
    let nodes = validate::nodes_from_value(obj.remove("nodes"))
        .map_err(|e| CommandError::input(e.to_string()))?;
    let edges = validate::edges_from_value(obj.remove("edges"))
        .map_err(|e| CommandError::input(e.to_string()))?;
    let theme = match obj.remove("theme") {
        Some(serde_json::Value::String(theme)) => Theme(theme),
        _ => Theme::default(),
    };
    Ok(FlowContent::new(nodes, edges, theme))
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, CommandError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CommandError::io(format!("failed to serialize: {}", e)))
}
