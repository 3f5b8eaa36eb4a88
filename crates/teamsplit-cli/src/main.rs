// teamsplit entry point.
//
// Startup sequence:
// 1. Parse arguments, initialize tracing (stderr; stdout carries the report)
// 2. Load config, copying defaults/ into config/ on first run
// 3. Load the roster CSV
// 4. Select players, enforce the roster size policy
// 5. Split and print the report

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use teamsplit_core::config::{self, Config};
use teamsplit_core::partition::{Partitioner, Strategy};
use teamsplit_core::player::Player;
use teamsplit_core::report::{RosterSummary, SplitReport};
use teamsplit_core::{roster, selection};

#[derive(Parser)]
#[command(name = "teamsplit")]
#[command(about = "Split a roster into two evenly matched teams", long_about = None)]
struct Cli {
    /// Directory holding config/ and defaults/
    #[arg(short, long = "config", value_name = "DIR", default_value = ".")]
    base_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split players into two teams
    Split {
        /// Roster CSV (defaults to data.roster from the config)
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Override the configured strategy (greedy or exhaustive)
        #[arg(long)]
        strategy: Option<Strategy>,
        /// Only these players take part (comma separated)
        #[arg(long, value_delimiter = ',')]
        players: Vec<String>,
        /// Leave these players out (comma separated)
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the score leaderboard, best player and averages
    Scores {
        /// Roster CSV (defaults to data.roster from the config)
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Copy default config files into config/
    Init,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Init => {
            let copied = config::ensure_config_files(&cli.base_dir)
                .context("failed to initialize config files")?;
            if copied.is_empty() {
                println!("Config already present, nothing copied");
            }
            for path in copied {
                println!("Created {}", path.display());
            }
        }
        Commands::Scores { roster, format } => {
            let config =
                config::load_config(&cli.base_dir).context("failed to load configuration")?;
            let players = load_players(&cli.base_dir, &config, roster.as_deref())?;
            let summary = RosterSummary::new(&players, &config.weights);
            match format {
                OutputFormat::Text => print!("{}", summary.to_text()),
                OutputFormat::Json => println!("{}", summary.to_json()?),
            }
        }
        Commands::Split {
            roster,
            strategy,
            players,
            exclude,
            format,
        } => {
            let config =
                config::load_config(&cli.base_dir).context("failed to load configuration")?;
            let all = load_players(&cli.base_dir, &config, roster.as_deref())?;
            let lineup = choose_lineup(&all, &players, &exclude)?;
            let partitioner = build_partitioner(&config, strategy, lineup.len())?;

            let split = partitioner.split(&lineup).context("failed to split teams")?;
            let report = SplitReport::new(&split, partitioner.weights(), partitioner.strategy());
            match format {
                OutputFormat::Text => print!("{}", report.to_text()),
                OutputFormat::Json => println!("{}", report.to_json()?),
            }
        }
    }

    Ok(())
}

/// Roster path from the command line, or the configured one resolved
/// against the base directory.
fn roster_path(base_dir: &Path, config: &Config, cli_roster: Option<&Path>) -> PathBuf {
    match cli_roster {
        Some(path) => path.to_path_buf(),
        None => base_dir.join(&config.data_paths.roster),
    }
}

fn load_players(
    base_dir: &Path,
    config: &Config,
    cli_roster: Option<&Path>,
) -> anyhow::Result<Vec<Player>> {
    let path = roster_path(base_dir, config, cli_roster);
    roster::load_roster(&path)
        .with_context(|| format!("failed to load roster {}", path.display()))
}

/// Apply `--players` then `--exclude` to the roster.
fn choose_lineup(
    all: &[Player],
    only: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<Player>> {
    let selected = selection::select_players(all, only)?;
    let lineup = if exclude.is_empty() {
        selected
    } else {
        selection::exclude_players(&selected, exclude)?
    };
    info!("{} of {} roster players selected", lineup.len(), all.len());
    Ok(lineup)
}

/// Build the partitioner and enforce the caller-side size limits: the
/// configured roster bounds, and the exhaustive search cap.
fn build_partitioner(
    config: &Config,
    strategy: Option<Strategy>,
    player_count: usize,
) -> anyhow::Result<Partitioner> {
    selection::check_roster_size(player_count, &config.roster)?;

    let mut partitioner = Partitioner::from_config(config);
    if let Some(strategy) = strategy {
        partitioner = partitioner.with_strategy(strategy);
    }

    let cap = config.partition.max_exhaustive_players;
    if partitioner.strategy() == Strategy::Exhaustive && player_count > cap {
        bail!(
            "exhaustive search is limited to {cap} players, got {player_count}; \
             use --strategy greedy or raise partition.max_exhaustive_players"
        );
    }

    Ok(partitioner)
}

/// Initialize tracing to stderr so reports on stdout stay clean.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "teamsplit=debug,teamsplit_core=debug,warn"
    } else {
        "teamsplit=info,teamsplit_core=info,warn"
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
