//! Completion-endpoint clients.
//!
//! One HTTP surface ([`ChatClient`]) shared by two thin callers:
//!
//! - [`summarize`] - turns a captured page into a 2-3 sentence summary,
//!   degrading to a placeholder string rather than failing
//! - [`answer`] - answers a question against the whole saved collection
//!
//! # Configuration
//!
//! Environment variables:
//! - `LINKSTASH_API_BASE` - endpoint base URL (default: `https://api.openai.com/v1`)
//! - `LINKSTASH_MODEL` - model identifier (default: `gpt-3.5-turbo`)

pub mod answer;
pub mod client;
pub mod summarize;

pub use answer::answer_question;
pub use client::{ChatClient, KeyCheck};
pub use summarize::{generate_summary, NO_KEY_PLACEHOLDER};
