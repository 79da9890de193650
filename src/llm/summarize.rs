//! Page summarization.
//!
//! Summary generation must never block or fail a save: every failure
//! mode resolves to a degraded-but-valid string. The caller always gets
//! text back, never an error.

use super::client::ChatClient;

/// Returned when no credential is configured. Save flows treat this as
/// a perfectly good summary.
pub const NO_KEY_PLACEHOLDER: &str = "No summary available (API key not configured)";

/// Hard character cutoff applied to the page content before prompting.
pub const CONTENT_PREVIEW_CHARS: usize = 1000;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that creates concise summaries \
of web pages. Provide a brief summary in 2-3 sentences.";

const MAX_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

/// Build the user message embedding title, URL, and a content preview.
///
/// The preview is the first [`CONTENT_PREVIEW_CHARS`] characters, cut at
/// a character boundary regardless of words.
#[must_use]
pub fn build_prompt(url: &str, title: &str, content: &str) -> String {
    let preview: String = content.chars().take(CONTENT_PREVIEW_CHARS).collect();
    format!("Please summarize this webpage:\nTitle: {title}\nURL: {url}\nContent preview: {preview}")
}

/// Generate a summary for a captured page.
///
/// Without a credential, returns [`NO_KEY_PLACEHOLDER`]. On any endpoint
/// failure, returns `"Summary generation failed: <reason>"`.
pub async fn generate_summary(
    client: &ChatClient,
    api_key: Option<&str>,
    url: &str,
    title: &str,
    content: &str,
) -> String {
    let Some(api_key) = api_key else {
        tracing::info!("no API key configured, skipping summary generation");
        return NO_KEY_PLACEHOLDER.to_string();
    };

    let prompt = build_prompt(url, title, content);

    match client
        .complete(api_key, SYSTEM_PROMPT, &prompt, MAX_TOKENS, TEMPERATURE)
        .await
    {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "summary generation failed");
            format!("Summary generation failed: {e}")
        }
    }
}
