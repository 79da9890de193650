//! API key command implementations.

use crate::cli::KeyCommands;
use crate::error::{Error, Result};
use crate::llm::{ChatClient, KeyCheck};
use crate::router::{Request, Response};
use std::path::PathBuf;

/// Execute key commands.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the key fails the
/// format check (`set`), or the connectivity check fails (`test`).
pub fn execute(command: &KeyCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        KeyCommands::Show => show(db_path, json),
        KeyCommands::Set { value } => set(value, db_path, json),
        KeyCommands::Test => test(db_path, json),
    }
}

fn show(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut router = super::open_router(db_path)?;
    let response = super::dispatch(&mut router, Request::GetApiKey)?;

    let Response::ApiKey(value) = response else {
        return Err(Error::Other("unexpected response for key show".to_string()));
    };

    if json {
        let output = serde_json::json!({
            "ok": true,
            "api_key": value
        });
        println!("{output}");
    } else {
        match value {
            Some(key) => println!("{key}"),
            None => println!("(not set)"),
        }
    }

    Ok(())
}

fn set(value: &str, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut router = super::open_router(db_path)?;
    let response = super::dispatch(
        &mut router,
        Request::SetApiKey {
            value: value.trim().to_string(),
        },
    )?;

    let Response::ApiKeySaved = response else {
        return Err(Error::Other("unexpected response for key set".to_string()));
    };

    if json {
        println!("{}", serde_json::json!({ "ok": true }));
    } else {
        println!("API key saved");
    }

    Ok(())
}

/// Check the stored key against the models-listing endpoint.
///
/// Operator-facing connectivity check only; the save and ask flows
/// never call this.
fn test(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut router = super::open_router(db_path)?;
    let response = super::dispatch(&mut router, Request::GetApiKey)?;

    let Response::ApiKey(value) = response else {
        return Err(Error::Other("unexpected response for key test".to_string()));
    };
    let api_key = value.ok_or(Error::ApiKeyMissing)?;

    let client = ChatClient::new();
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    match rt.block_on(client.validate_key(&api_key))? {
        KeyCheck::Valid => {
            if json {
                println!("{}", serde_json::json!({ "ok": true, "valid": true }));
            } else {
                println!("Connection successful! API key is valid.");
            }
            Ok(())
        }
        KeyCheck::Unauthorized => Err(Error::Api(
            "Invalid API key. Please check your key.".to_string(),
        )),
    }
}
