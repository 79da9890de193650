//! LinkStash CLI - save links with AI summaries, ask questions later
//!
//! This crate provides the core functionality for the `lks` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (SavedLink, Setting)
//! - [`storage`] - SQLite database layer
//! - [`router`] - Typed request/response dispatch over store and clients
//! - [`llm`] - Completion-endpoint clients (summarize, answer)
//! - [`capture`] - Page fetch and text extraction
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod router;
pub mod storage;

pub use error::{Error, Result};

/// Global silent mode flag for `--silent` output.
///
/// When set, the save command prints only the assigned id instead of
/// full output. Avoids threading a `silent` bool through every handler
/// signature.
pub static SILENT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Global CSV output flag (set when `--format csv`).
pub static CSV_OUTPUT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if silent mode is active.
#[inline]
pub fn is_silent() -> bool {
    SILENT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Check if CSV output is requested.
#[inline]
pub fn is_csv() -> bool {
    CSV_OUTPUT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Escape a value for CSV output (wrap in quotes if it contains commas, quotes, or newlines).
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
