//! Save command implementation.

use crate::capture;
use crate::cli::SaveArgs;
use crate::error::{Error, Result};
use crate::router::{Request, Response};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

#[derive(Serialize)]
struct SaveOutput {
    ok: bool,
    id: i64,
    url: String,
    summary: String,
}

/// Execute the save command.
///
/// The page text comes from `--content`/`--content-file`/`--stdin` when
/// given; otherwise the page is fetched and its title and visible text
/// extracted. Either way the URL scheme is checked first, so
/// browser-internal pages are refused before any work happens.
///
/// # Errors
///
/// Returns an error for unsupported schemes, capture failures,
/// duplicate URLs, or store failures. A failed summary is not an
/// error - the link is saved with a degraded summary string.
pub fn execute(args: &SaveArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    capture::check_capturable(&args.url)?;

    let mut router = super::open_router(db_path)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    let (title, content) = rt.block_on(resolve_page(args))?;

    let response = rt.block_on(router.handle(Request::SaveLink {
        url: args.url.clone(),
        title,
        content,
    }))?;

    let Response::Saved { id, summary } = response else {
        return Err(Error::Other("unexpected response for save".to_string()));
    };

    if crate::is_silent() {
        println!("{id}");
        return Ok(());
    }

    if json {
        let output = SaveOutput {
            ok: true,
            id,
            url: args.url.clone(),
            summary,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Saved: {} (id {id})", args.url);
        println!("  {summary}");
    }

    Ok(())
}

/// Resolve (title, content) from flags or by fetching the page.
async fn resolve_page(args: &SaveArgs) -> Result<(String, String)> {
    let explicit_content = if let Some(content) = &args.content {
        Some(content.clone())
    } else if let Some(path) = &args.content_file {
        Some(std::fs::read_to_string(path)?)
    } else if args.stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Some(buf)
    } else {
        None
    };

    if let Some(content) = explicit_content {
        // Offline path: no fetch. Title falls back to the URL string,
        // mirroring a page whose title cannot be read.
        let title = args.title.clone().unwrap_or_else(|| args.url.clone());
        return Ok((title, content));
    }

    let page = capture::capture(&args.url).await?;
    let title = args.title.clone().unwrap_or(page.title);
    Ok((title, page.text))
}
