//! Data types for LinkStash.

use serde::{Deserialize, Serialize};

/// Setting key under which the completion-endpoint credential is stored.
pub const API_KEY_SETTING: &str = "api_key";

/// A saved link with its generated summary.
///
/// Created once by the save flow and never mutated afterwards; removal
/// is an explicit user action. The `id` is assigned by the store and is
/// stable for the record's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLink {
    /// Store-assigned, monotonically increasing identifier.
    pub id: i64,
    /// Exact URL string as captured. Not normalized: `http://x` and
    /// `http://x/` are distinct records.
    pub url: String,
    pub title: String,
    /// Generated summary, or a placeholder/failure string when the
    /// completion endpoint was unavailable at save time.
    pub summary: String,
    /// ISO-8601 creation instant, set once when the record is inserted.
    pub timestamp: String,
    /// Reserved for future use; always empty in current flows.
    #[serde(default)]
    pub tags: Vec<String>,
}

