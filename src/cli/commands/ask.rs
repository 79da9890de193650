//! Ask command implementation.

use crate::error::{Error, Result};
use crate::router::{Request, Response};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct AskOutput {
    ok: bool,
    answer: String,
}

/// Execute the ask command.
///
/// # Errors
///
/// Returns an error for an empty question, a missing API key, or a
/// failed endpoint call.
pub fn execute(question: &str, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        return Err(Error::InvalidArgument(
            "question must not be empty".to_string(),
        ));
    }

    let mut router = super::open_router(db_path)?;
    let response = super::dispatch(
        &mut router,
        Request::Search {
            question: question.to_string(),
        },
    )?;

    let Response::Answer(answer) = response else {
        return Err(Error::Other("unexpected response for ask".to_string()));
    };

    if json {
        let output = AskOutput { ok: true, answer };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{answer}");
    }

    Ok(())
}
