//! Headless Triad runner.
//!
//! Plays one seeded match, or a series of consecutive seeds, and prints the
//! result as JSON on stdout. Logs go to stderr and follow `RUST_LOG`.
//!
//! ```text
//! triad-sim --seed 7                      # one match report
//! triad-sim --seed 7 --history            # report plus every duel turn
//! triad-sim --seed 0 --series 100         # summary of seeds 0..100
//! triad-sim --config match.json --depth 4 # custom config, deeper search
//! triad-sim --print-config                # default config as JSON
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use triad_core::{play_series, Match, MatchConfig, MatchReport, SeriesSummary, TurnRecord};

/// Headless Triad runner - seeded matches with JSON output
#[derive(Parser, Debug)]
#[command(name = "triad-sim")]
#[command(about = "Play seeded Triad matches and print JSON reports")]
struct Args {
    /// Match seed (first seed of a series)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Play this many matches on consecutive seeds and print a summary
    #[arg(long)]
    series: Option<u64>,

    /// JSON match config; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the search depth
    #[arg(long)]
    depth: Option<u32>,

    /// Include the duel's turn history (single match only)
    #[arg(long)]
    history: bool,

    /// Include every match report in series output
    #[arg(long)]
    reports: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,

    /// Print the effective config and exit
    #[arg(long)]
    print_config: bool,
}

/// Single match output.
#[derive(Serialize)]
struct MatchOutput {
    report: MatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<TurnRecord>>,
}

/// Series output.
#[derive(Serialize)]
struct SeriesOutput {
    first_seed: u64,
    summary: SeriesSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    reports: Option<Vec<MatchReport>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let config = effective_config(&args)?;

    if args.print_config {
        return print_json(&config, args.pretty);
    }

    match args.series {
        Some(count) => {
            let seeds: Vec<u64> = (0..count).map(|i| args.seed.wrapping_add(i)).collect();
            tracing::info!(first_seed = args.seed, count, "running series");
            let reports = play_series(&config, &seeds).context("invalid match config")?;
            let output = SeriesOutput {
                first_seed: args.seed,
                summary: SeriesSummary::from_reports(&reports),
                reports: args.reports.then_some(reports),
            };
            print_json(&output, args.pretty)
        }
        None => {
            let game = Match::new(config, args.seed).context("invalid match config")?;
            let (report, history) = game.play_recorded();
            let output = MatchOutput {
                report,
                history: args.history.then_some(history),
            };
            print_json(&output, args.pretty)
        }
    }
}

/// Loads the config file (or defaults) and applies command-line overrides.
fn effective_config(args: &Args) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MatchConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.policy.depth = depth;
    }
    config.validate().context("invalid match config")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<MatchConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}
