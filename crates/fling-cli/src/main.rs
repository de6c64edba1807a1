mod app;
mod puzzle;
mod render;
mod store;

use anyhow::{Context, Result};
use app::App;
use clap::{ArgAction, Parser};
use puzzle::PuzzleConfig;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use store::Environment;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Solve a Fling puzzle by exhaustive search.
#[derive(Debug, Parser)]
#[command(name = "fling", version, about)]
struct Cli {
    /// Puzzle layout (TOML); the built-in puzzle when omitted
    #[arg(long, value_name = "FILE")]
    puzzle: Option<PathBuf>,

    /// Solution cache file
    #[arg(long, value_name = "FILE", conflicts_with = "no_cache")]
    cache: Option<PathBuf>,

    /// Always search, never read or write the cache
    #[arg(long)]
    no_cache: bool,

    /// Plain output without terminal colors
    #[arg(long)]
    no_color: bool,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.puzzle {
        Some(path) => PuzzleConfig::load(path)
            .with_context(|| format!("failed to load puzzle {}", path.display()))?,
        None => PuzzleConfig::default(),
    };
    let board = config.into_board().context("invalid puzzle layout")?;

    // A broken cache only costs a fresh search
    let cache = if cli.no_cache {
        None
    } else {
        match store::open_cache(Environment::detect(), cli.cache.clone()) {
            Ok(cache) => Some(cache),
            Err(err) => {
                warn!(error = %err, "solution cache unavailable, solving without it");
                None
            }
        }
    };

    let mut stdout = io::stdout();
    let color = !cli.no_color && stdout.is_terminal();
    let app = App::new(board, cache, color);
    let report = app.run(&mut stdout)?;
    stdout.flush()?;

    Ok(if report.outcome.is_solved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
