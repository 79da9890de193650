//! Delete command implementation.

use crate::error::{Error, Result};
use crate::router::{Request, Response};
use std::path::PathBuf;

/// Execute the delete command.
///
/// Idempotent: deleting an id that does not exist still succeeds.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the delete fails.
pub fn execute(id: i64, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut router = super::open_router(db_path)?;
    let response = super::dispatch(&mut router, Request::DeleteLink { id })?;

    let Response::Deleted = response else {
        return Err(Error::Other("unexpected response for delete".to_string()));
    };

    if json {
        let output = serde_json::json!({
            "ok": true,
            "id": id,
            "deleted": true
        });
        println!("{output}");
    } else {
        println!("Deleted link {id}");
    }

    Ok(())
}
