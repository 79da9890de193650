//! Configuration management.
//!
//! This module resolves the database location and the completion-endpoint
//! settings.
//!
//! # Architecture
//!
//! LinkStash uses a **global database**: one SQLite file at
//! `~/.linkstash/data/linkstash.db` shared by every invocation. There is no
//! per-directory state; the collection is machine-wide, like a browser's
//! bookmark store.

use std::path::{Path, PathBuf};

/// Get the global LinkStash directory location.
///
/// Always `~/.linkstash/`.
#[must_use]
pub fn global_linkstash_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".linkstash"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `LKS_TEST_DB=1` (or any non-empty value).
/// This redirects all database operations to an isolated test database.
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var("LKS_TEST_DB")
        .map(|v| !v.is_empty() && v != "0" && v.to_lowercase() != "false")
        .unwrap_or(false)
}

/// Get the test database path.
///
/// Returns `~/.linkstash/test/linkstash.db` for isolated testing.
#[must_use]
pub fn test_db_path() -> Option<PathBuf> {
    global_linkstash_dir().map(|dir| dir.join("test").join("linkstash.db"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `LKS_TEST_DB` environment variable → uses test database
/// 3. `LINKSTASH_DB` environment variable
/// 4. Global location: `~/.linkstash/data/linkstash.db`
///
/// # Test Mode
///
/// Set `LKS_TEST_DB=1` to use `~/.linkstash/test/linkstash.db` instead.
/// This keeps your real collection safe during development.
///
/// # Returns
///
/// Returns the path to the database file, or `None` if no location found.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Explicit path from CLI flag
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    // Priority 2: Test mode - use isolated test database
    if is_test_mode() {
        return test_db_path();
    }

    // Priority 3: LINKSTASH_DB environment variable
    if let Ok(db_path) = std::env::var("LINKSTASH_DB") {
        if !db_path.trim().is_empty() {
            return Some(PathBuf::from(db_path));
        }
    }

    // Priority 4: Global database location
    global_linkstash_dir().map(|dir| dir.join("data").join("linkstash.db"))
}

/// Resolve the completion-endpoint base URL.
///
/// `LINKSTASH_API_BASE` overrides the default OpenAI endpoint; any
/// OpenAI-compatible server works. A trailing slash is stripped.
#[must_use]
pub fn resolve_api_base() -> String {
    std::env::var("LINKSTASH_API_BASE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map_or_else(
            || "https://api.openai.com/v1".to_string(),
            |v| v.trim_end_matches('/').to_string(),
        )
}

/// Resolve the completion model identifier.
///
/// `LINKSTASH_MODEL` overrides the default.
#[must_use]
pub fn resolve_model() -> String {
    std::env::var("LINKSTASH_MODEL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "gpt-3.5-turbo".to_string())
}
