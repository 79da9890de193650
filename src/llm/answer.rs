//! Question answering over the saved collection.
//!
//! Not a search index: every record's title/URL/summary is serialized
//! into one prompt and relevance ranking is delegated entirely to the
//! model. Prompt size grows linearly with the collection; that ceiling
//! is accepted.

use super::client::ChatClient;
use crate::error::{Error, Result};
use crate::model::SavedLink;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that helps users find relevant \
links from their saved collection. Based on the user's question, identify and recommend \
the most relevant links.";

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

/// Serialize the whole collection for the prompt, one block per link.
#[must_use]
pub fn build_context(links: &[SavedLink]) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                "Title: {}\nURL: {}\nSummary: {}\n---",
                link.title, link.url, link.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Answer a free-text question against the saved links.
///
/// # Errors
///
/// Returns `Error::Api` with `"Search failed: <reason>"` when the
/// endpoint call fails. Credential presence is the caller's concern.
pub async fn answer_question(
    client: &ChatClient,
    api_key: &str,
    links: &[SavedLink],
    question: &str,
) -> Result<String> {
    let context = build_context(links);
    let prompt = format!(
        "Here are my saved links:\n\n{context}\n\nQuestion: {question}\n\n\
         Please recommend the most relevant links and explain why they are relevant."
    );

    tracing::debug!(links = links.len(), "answering question over collection");

    client
        .complete(api_key, SYSTEM_PROMPT, &prompt, MAX_TOKENS, TEMPERATURE)
        .await
        .map_err(|e| Error::Api(format!("Search failed: {e}")))
}
