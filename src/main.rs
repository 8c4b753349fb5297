//! CLI entry point for the gradebook editor.
//!
//! Each subcommand loads the roster file, applies one operation through the
//! [`Gradebook`] model, and writes the regraded roster back.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gradebook::config::AppConfig;
use gradebook::output::{print_pretty, write_json, write_lines};
use gradebook::{Gradebook, roster};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Edit a curved gradebook stored as CSV", long_about = None)]
struct Cli {
    /// Roster CSV file (defaults to $GRADEBOOK_FILE or gradebook.csv)
    #[arg(short, long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every entry as "Name : Score : Grade", sorted
    List {
        /// Print a JSON report instead
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Add a student, or overwrite an existing student's score
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        score: String,
    },
    /// Replace the selected entry with a new name and score
    Edit {
        /// Selected display line, e.g. "Alice : 95 : A"
        #[arg(short, long)]
        line: Option<String>,

        name: String,
        #[arg(allow_hyphen_values = true)]
        score: String,
    },
    /// Delete the selected entry
    Delete {
        /// Selected display line, e.g. "Alice : 95 : A"
        #[arg(short, long)]
        line: Option<String>,
    },
    /// Regrade every entry and rewrite the file
    Curve,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let config = AppConfig::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let (log_dir, log_file_name) = config.log_location();
    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(LevelFilter::INFO.into()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(LevelFilter::DEBUG.into()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let path = cli.file.unwrap_or_else(|| config.roster_path.clone());

    match run(cli.command, &path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(path = %path.display(), error = %format!("{e:#}"), "Command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, path: &Path) -> Result<()> {
    match command {
        Commands::List { json } => {
            let book = roster::load(path)?;
            print_pretty(&book);

            let mut out = io::stdout().lock();
            if json {
                write_json(&mut out, &book)?;
            } else {
                write_lines(&mut out, &book)?;
            }
            out.flush()?;
        }
        Commands::Add { name, score } => {
            mutate(path, |book| book.add(&name, &score))?;
            info!(name = %name.trim(), "Entry added");
        }
        Commands::Edit { line, name, score } => {
            mutate(path, |book| book.edit_selected(line.as_deref(), &name, &score))?;
            info!(name = %name.trim(), "Entry edited");
        }
        Commands::Delete { line } => {
            mutate(path, |book| book.delete_selected(line.as_deref()))?;
            info!("Entry deleted");
        }
        Commands::Curve => {
            mutate(path, |_| Ok(()))?;
        }
    }

    Ok(())
}

/// Loads the roster, applies `op`, and saves it back. Nothing is written if `op` fails.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
fn mutate<F>(path: &Path, op: F) -> Result<()>
where
    F: FnOnce(&mut Gradebook) -> gradebook::Result<()>,
{
    let mut book = roster::load_or_default(path)?;
    op(&mut book)?;
    roster::save(&mut book, path)
        .with_context(|| format!("Failed to save gradebook to {}", path.display()))?;
    Ok(())
}
