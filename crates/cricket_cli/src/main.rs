//! Cricket Scoring CLI
//!
//! Manual scoring console for cricket_core: replay a timed script of
//! gestures, or score live from stdin while a display poller prints the
//! scoreboard.

mod script;
mod session;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cricket_core::{ManualClock, ScoringConfig, ScoringEngine, Scoreboard};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use script::Command;
use session::DisplayPoller;

#[derive(Parser)]
#[command(name = "cricket_cli")]
#[command(about = "Score a cricket match from gesture symbols", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MatchArgs {
    /// Overs per innings (overrides the config file)
    #[arg(long)]
    overs: Option<u32>,

    /// Scoring config file (.json or .yaml); defaults to $CRICKET_SCORING_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cooldown between accepted events in seconds (overrides the config file)
    #[arg(long)]
    cooldown: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a timed script and print the final scoreboard as JSON
    Replay {
        /// Script file: one `<seconds> <symbol|undo|withdraw|reset>` per line
        #[arg(long)]
        script: PathBuf,

        #[command(flatten)]
        args: MatchArgs,

        /// Print the scoreboard line after every command
        #[arg(long, default_value = "false")]
        verbose: bool,
    },

    /// Score from stdin in real time
    Live {
        #[command(flatten)]
        args: MatchArgs,

        /// Display refresh interval in milliseconds
        #[arg(long, default_value = "1000")]
        poll_ms: u64,
    },
}

fn load_config(args: &MatchArgs) -> Result<ScoringConfig> {
    let mut config = match &args.config {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScoringConfig::from_env_or_default().context("failed to load config from environment")?,
    };
    if let Some(overs) = args.overs {
        config.overs_limit = overs;
    }
    if let Some(cooldown) = args.cooldown {
        config.cooldown_secs = cooldown;
    }
    config.validate().context("invalid scoring config")?;
    Ok(config)
}

fn replay(script_path: PathBuf, args: MatchArgs, verbose: bool) -> Result<()> {
    let config = load_config(&args)?;
    let lines = script::load_script(&script_path)?;
    tracing::info!(commands = lines.len(), overs = config.overs_limit, "replaying {}", script_path.display());

    let clock = ManualClock::new();
    let board = Scoreboard::with_clock(ScoringEngine::new(config)?, clock.clone());

    for line in lines {
        clock.set(line.at);
        let outcome = session::execute(&board, line.command);
        if verbose {
            println!("{:>8.2}s  {:<40} {}", line.at.as_secs_f64(), outcome, board.snapshot().score_line());
        }
    }

    let snapshot = board.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn live(args: MatchArgs, poll_ms: u64) -> Result<()> {
    let config = load_config(&args)?;
    let board = Scoreboard::new(config)?;
    let poller = DisplayPoller::spawn(board.clone(), Duration::from_millis(poll_ms.max(50)));

    println!("Enter 0-5, wide, no_ball, bye, leg_bye, dot_ball, undo, withdraw, reset or quit");
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("q") {
            break;
        }

        match Command::parse(word) {
            Ok(command) => println!("{}", session::execute(&board, command)),
            Err(err) => {
                tracing::error!(input = word, "rejected input: {err:#}");
            }
        }
    }

    poller.stop();
    println!("{}", board.snapshot().summary_line());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { script, args, verbose } => replay(script, args, verbose),
        Commands::Live { args, poll_ms } => live(args, poll_ms),
    }
}
