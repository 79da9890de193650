//! LinkStash CLI entry point.

use clap::Parser;
use lks::cli::commands;
use lks::cli::{Cli, Commands, OutputFormat};
use lks::error::Error;
use std::process::ExitCode;

/// Rewrite named flags to positional args for scripting ergonomics.
///
/// Scripted callers naturally generate `--url "https://..."` instead of
/// the positional form. This preprocessor transparently converts known
/// flag patterns so both work.
fn preprocess_args(args: impl Iterator<Item = String>) -> Vec<String> {
    // Only flags that shadow positional args are listed here - named
    // flags like --title already work via clap.
    const POSITIONAL_ALIASES: &[&str] = &[
        "--url",      // save
        "--id",       // delete
        "--question", // ask
        "--value",    // key set
    ];

    let mut result = Vec::new();
    let mut iter = args.peekable();

    while let Some(arg) = iter.next() {
        if POSITIONAL_ALIASES.contains(&arg.as_str()) {
            // Strip the flag, keep the value
            if let Some(value) = iter.next() {
                result.push(value);
            }
        } else if let Some(flag) = POSITIONAL_ALIASES
            .iter()
            .find(|f| arg.starts_with(&format!("{f}=")))
        {
            // Handle --flag=value form
            let value = arg[flag.len() + 1..].to_string();
            result.push(value);
        } else {
            result.push(arg);
        }
    }

    result
}

fn main() -> ExitCode {
    let args = preprocess_args(std::env::args());
    let cli = Cli::parse_from(args);

    if cli.silent {
        lks::SILENT.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.format == OutputFormat::Csv {
        lks::CSV_OUTPUT.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // Resolve effective JSON mode: --json OR --format json OR non-TTY stdout
    let json = cli.json
        || cli.format == OutputFormat::Json
        || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    // Run the command and handle errors
    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    match &cli.command {
        Commands::Init { force } => commands::init::execute(*force, cli.db.as_ref(), json),
        Commands::Version => commands::version::execute(json),

        Commands::Save(args) => commands::save::execute(args, cli.db.as_ref(), json),
        Commands::List(args) => commands::list::execute(args, cli.db.as_ref(), json),
        Commands::Delete { id } => commands::delete::execute(*id, cli.db.as_ref(), json),
        Commands::Ask { question } => commands::ask::execute(question, cli.db.as_ref(), json),

        Commands::Key { command } => commands::key::execute(command, cli.db.as_ref(), json),

        Commands::Completions { shell } => commands::completions::execute(*shell),
    }
}
