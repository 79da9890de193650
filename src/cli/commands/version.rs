//! Version command implementation.

use crate::error::Result;

/// Print version information.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        let output = serde_json::json!({
            "name": "linkstash-cli",
            "version": version,
        });
        println!("{output}");
    } else {
        println!("lks {version}");
    }

    Ok(())
}
