//! Initialize the LinkStash database.

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    ok: bool,
    path: PathBuf,
}

/// Execute the init command.
///
/// Creates the database file (default `~/.linkstash/data/linkstash.db`)
/// and applies the schema. Refuses to touch an existing database unless
/// `--force` is given.
///
/// # Errors
///
/// Returns an error if the directory or database cannot be created.
pub fn execute(force: bool, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or_else(|| {
        Error::Config("Could not determine the LinkStash directory".to_string())
    })?;

    if db_path.exists() && !force {
        return Err(Error::AlreadyInitialized { path: db_path });
    }

    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }

    if force && db_path.exists() {
        fs::remove_file(&db_path)?;
    }

    // Opening applies the schema
    SqliteStorage::open(&db_path)?;

    if json {
        let output = InitOutput {
            ok: true,
            path: db_path,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Initialized LinkStash database at {}", db_path.display());
        println!("Save your first link with: lks save <url>");
    }

    Ok(())
}
