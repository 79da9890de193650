//! List command implementation.

use crate::cli::ListArgs;
use crate::error::{Error, Result};
use crate::model::SavedLink;
use crate::router::{Request, Response};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ListOutput {
    ok: bool,
    count: usize,
    links: Vec<SavedLink>,
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or queried.
pub fn execute(args: &ListArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut router = super::open_router(db_path)?;
    let response = super::dispatch(&mut router, Request::ListLinks)?;

    let Response::Links(mut links) = response else {
        return Err(Error::Other("unexpected response for list".to_string()));
    };

    if let Some(limit) = args.limit {
        links.truncate(limit);
    }

    if crate::is_csv() {
        println!("id,url,title,summary,timestamp");
        for link in &links {
            println!(
                "{},{},{},{},{}",
                link.id,
                crate::csv_escape(&link.url),
                crate::csv_escape(&link.title),
                crate::csv_escape(&link.summary),
                link.timestamp
            );
        }
    } else if json {
        let output = ListOutput {
            ok: true,
            count: links.len(),
            links,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if links.is_empty() {
        println!("No saved links yet.");
        println!("Save one with: lks save <url>");
    } else {
        println!("Saved links ({} found):", links.len());
        println!();
        for link in &links {
            println!("#{} {}", link.id, link.title.bold());
            println!("  {}", link.url.blue());
            if !link.summary.is_empty() {
                println!("  {}", link.summary);
            }
            println!("  {}", link.timestamp.dimmed());
            println!();
        }
    }

    Ok(())
}
