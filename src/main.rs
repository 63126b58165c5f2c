//! Word Hunt - CLI
//!
//! Daily Word Hunt client with TUI and CLI modes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use word_hunt::{
    api::HttpApi,
    commands::{fetch_daily, fetch_leaderboard, fetch_me, run_simple, submit_words},
    config::{ClientConfig, Overrides},
    output::{
        print_leaderboard, print_player_score, print_puzzle, print_submission_preview,
        print_submit_outcome,
    },
};

#[derive(Parser)]
#[command(
    name = "word_hunt",
    about = "Daily Word Hunt: trace words through a letter grid and submit them for scoring",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Scoring API base URL (default: http://localhost:8080/api/wordhunt)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Player name (default: guest)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Grid size, 3 to 6 (default: 4)
    #[arg(short, long, global = true)]
    size: Option<usize>,

    /// Puzzle date as YYYY-MM-DD (default: today)
    #[arg(short, long, global = true)]
    date: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based play without TUI)
    Simple,

    /// Print the daily grid
    Daily,

    /// Show the top scores for a date
    Leaderboard {
        /// Number of rows, 1 to 200
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show your score for a date
    Me,

    /// Submit words for a date
    Submit {
        /// Words to submit
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);
    let _guard = setup_logging(matches!(command, Commands::Play))?;

    let config = ClientConfig::from_env().with_overrides(Overrides {
        api_url: cli.api_url,
        username: cli.user,
        grid_size: cli.size,
        date: cli.date,
    });
    tracing::info!("Using API at {}", config.api_url);

    let api = HttpApi::new(&config).context("Failed to build HTTP client")?;
    let date = config.puzzle_date();

    match command {
        Commands::Play => {
            use word_hunt::interactive::run_tui;
            run_tui(config, Arc::new(api)).await
        }
        Commands::Simple => run_simple(&api, config).await,
        Commands::Daily => {
            let puzzle = fetch_daily(&api, date, config.grid_size).await?;
            print_puzzle(&puzzle, &[]);
            Ok(())
        }
        Commands::Leaderboard { limit } => {
            let limit = limit.map_or(config.leaderboard_limit, |n| n.clamp(1, 200));
            let board = fetch_leaderboard(&api, date, limit).await?;
            print_leaderboard(date, &board, Some(&config.username));
            Ok(())
        }
        Commands::Me => {
            let me = fetch_me(&api, date, &config.username).await?;
            print_player_score(&config.username, date, me.as_ref());
            Ok(())
        }
        Commands::Submit { words } => {
            let puzzle = fetch_daily(&api, date, config.grid_size).await?;
            let report = submit_words(&api, puzzle, &config.username, &words).await?;
            print_submission_preview(&report.words, &report.suspicious);
            print_submit_outcome(&report.outcome);
            Ok(())
        }
    }
}

/// Setup logging: a log file for the TUI, stderr for everything else
///
/// The returned guard must stay alive for file output to be flushed.
fn setup_logging(tui: bool) -> Result<Option<WorkerGuard>> {
    if tui {
        let log_dir = get_log_directory();
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create {}", log_dir.display()))?;

        let file_appender = tracing_appender::rolling::never(&log_dir, "word_hunt.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

        // File only: stderr would corrupt the alternate screen
        tracing_subscriber::registry()
            .with(env_filter("info"))
            .with(
                fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_ansi(false),
            )
            .try_init()?;

        tracing::info!("Log file: {}/word_hunt.log", log_dir.display());
        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(env_filter("warn"))
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
        Ok(None)
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Get the log directory: `WORD_HUNT_LOG_DIR`, else the platform cache dir
fn get_log_directory() -> PathBuf {
    if let Some(dir) = std::env::var_os("WORD_HUNT_LOG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Caches/word_hunt/logs");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
            return PathBuf::from(xdg_cache).join("word_hunt/logs");
        } else if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".cache/word_hunt/logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_appdata) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local_appdata).join("word_hunt\\logs");
        }
    }

    // Fallback to current directory
    PathBuf::from("logs")
}
