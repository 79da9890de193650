//! Error types for LinkStash CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=conflict, 4=validation, etc.)
//! - Retryability flags for scripted consumers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for LinkStash operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    NotInitialized,
    AlreadyInitialized,
    DatabaseError,

    // Conflict (exit 3)
    DuplicateUrl,

    // Validation (exit 4)
    InvalidApiKey,
    InvalidArgument,

    // Capture (exit 5)
    UnsupportedScheme,
    CaptureError,

    // Remote API (exit 6)
    ApiKeyMissing,
    ApiError,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DuplicateUrl => "DUPLICATE_URL",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::UnsupportedScheme => "UNSUPPORTED_SCHEME",
            Self::CaptureError => "CAPTURE_ERROR",
            Self::ApiKeyMissing => "API_KEY_MISSING",
            Self::ApiError => "API_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotInitialized | Self::AlreadyInitialized | Self::DatabaseError => 2,
            Self::DuplicateUrl => 3,
            Self::InvalidApiKey | Self::InvalidArgument => 4,
            Self::UnsupportedScheme | Self::CaptureError => 5,
            Self::ApiKeyMissing | Self::ApiError => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether a scripted caller should retry with corrected input.
    ///
    /// True for validation errors (bad key format, bad argument) and
    /// transient database contention. False for conflicts, capture
    /// failures, or internal errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey | Self::InvalidArgument | Self::DatabaseError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in LinkStash CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `lks init` first")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("URL already saved")]
    DuplicateUrl { url: String },

    #[error("API key not configured")]
    ApiKeyMissing,

    #[error("Invalid API key format")]
    InvalidApiKey,

    #[error("Cannot save internal browser pages: {url}")]
    UnsupportedScheme { url: String },

    #[error("Page capture failed: {0}")]
    Capture(String),

    #[error("{0}")]
    Api(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::AlreadyInitialized { .. } => ErrorCode::AlreadyInitialized,
            Self::DuplicateUrl { .. } => ErrorCode::DuplicateUrl,
            Self::ApiKeyMissing => ErrorCode::ApiKeyMissing,
            Self::InvalidApiKey => ErrorCode::InvalidApiKey,
            Self::UnsupportedScheme { .. } => ErrorCode::UnsupportedScheme,
            Self::Capture(_) => ErrorCode::CaptureError,
            Self::Api(_) => ErrorCode::ApiError,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => Some("Run `lks init` to create the database".to_string()),

            Self::AlreadyInitialized { path } => Some(format!(
                "Database already exists at {}. Use `--force` to reinitialize.",
                path.display()
            )),

            Self::DuplicateUrl { url } => Some(format!(
                "'{url}' is already in your collection. Use `lks list` to see it."
            )),

            Self::ApiKeyMissing => Some(
                "Set one with `lks key set <value>`. Summaries degrade to a \
                 placeholder without it; `lks ask` requires it."
                    .to_string(),
            ),

            Self::InvalidApiKey => {
                Some("API keys start with \"sk-\". Check the value and try again.".to_string())
            }

            Self::UnsupportedScheme { .. } => Some(
                "Browser-internal pages (chrome://, edge://, about:) cannot be captured. \
                 Only http(s) URLs are supported."
                    .to_string(),
            ),

            Self::Capture(_) => Some(
                "Pass the page text yourself: `lks save <url> --title <t> --content <text>` \
                 or pipe it with `--stdin`."
                    .to_string(),
            ),

            Self::Api(_)
            | Self::Database(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint. Scripts parse this instead of stderr text.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "ok": false,
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
