//! Command implementations.
//!
//! Each command opens the store, builds a typed [`Request`], runs it
//! through the router, and renders the [`Response`] in the selected
//! output mode. The sync CLI bridges into the async router with a
//! per-command runtime.

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::router::{Request, Response, Router};
use crate::storage::SqliteStorage;
use std::path::PathBuf;

pub mod ask;
pub mod completions;
pub mod delete;
pub mod init;
pub mod key;
pub mod list;
pub mod save;
pub mod version;

/// Open the store at the resolved path, failing when uninitialized.
pub(crate) fn open_storage(db_path: Option<&PathBuf>) -> Result<SqliteStorage> {
    let db_path =
        resolve_db_path(db_path.map(PathBuf::as_path)).ok_or(Error::NotInitialized)?;

    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }

    SqliteStorage::open(&db_path)
}

/// Open the store and wrap it in a router.
pub(crate) fn open_router(db_path: Option<&PathBuf>) -> Result<Router> {
    Ok(Router::new(open_storage(db_path)?))
}

/// Run one request to completion on a fresh runtime.
pub(crate) fn dispatch(router: &mut Router, request: Request) -> Result<Response> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;
    rt.block_on(router.handle(request))
}
