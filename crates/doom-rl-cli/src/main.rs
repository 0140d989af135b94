//! Doom RL command line
//!
//! - `run`: launch training runs for named scenario sequences
//! - `list`: print the known sequences
//! - `config`: print the effective shaping config
//! - `replay`: shape a recorded trace offline

mod launcher;
mod replay;
mod sequences;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use doom_rl_core::Scenario;
use doom_rl_shaping::{ShapingConfig, Trace};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::launcher::{LaunchOptions, LaunchPlan};

#[derive(Debug, Parser)]
#[command(
    name = "doom-rl",
    version,
    about = "Doom scenario reward shaping and training launcher"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Launch one training run per sequence, in order
    Run(RunArgs),
    /// List the known sequences
    List,
    /// Print the shaping config, with defaults filled in
    Config {
        /// JSON file with overrides
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print only this scenario's tuning
        #[arg(long)]
        scenario: Option<Scenario>,
    },
    /// Shape a recorded trace and print per-step rewards as JSON lines
    Replay {
        #[arg(long)]
        scenario: Scenario,
        /// Trace JSON file
        #[arg(long)]
        trace: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Sequences to run (all when omitted)
    #[arg(long, num_args = 1..)]
    only: Vec<String>,
    #[arg(long, default_value = "PPO")]
    algo: String,
    /// Total environment steps per sequence
    #[arg(long, default_value_t = 7_000_000)]
    train_steps: u64,
    #[arg(long, default_value_t = 123)]
    seed: u64,
    #[arg(long)]
    with_wandb: bool,
    #[arg(long)]
    log_heatmap: bool,
    #[arg(long, default_value = "cpu")]
    device: String,
    #[arg(long)]
    wandb_user: String,
    #[arg(long, default_value = "doomination_sequence_eval")]
    wandb_project: String,
    #[arg(long, default_value = "python")]
    program: String,
    #[arg(long, default_value = "sample_factory/doom/train_vizdoom.py")]
    entry_point: String,
    /// Print the commands instead of running them
    #[arg(long)]
    dry_run: bool,
}

impl From<&RunArgs> for LaunchOptions {
    fn from(args: &RunArgs) -> Self {
        Self {
            algo: args.algo.clone(),
            train_steps: args.train_steps,
            seed: args.seed,
            with_wandb: args.with_wandb,
            log_heatmap: args.log_heatmap,
            device: args.device.clone(),
            wandb_user: args.wandb_user.clone(),
            wandb_project: args.wandb_project.clone(),
            program: args.program.clone(),
            entry_point: args.entry_point.clone(),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ShapingConfig> {
    Ok(match path {
        Some(path) => ShapingConfig::from_path(path)?,
        None => ShapingConfig::default(),
    })
}

async fn run(args: RunArgs) -> Result<()> {
    let selected = sequences::select(&args.only)?;
    let options = LaunchOptions::from(&args);
    let plans: Vec<LaunchPlan> = selected
        .iter()
        .map(|sequence| LaunchPlan::new(sequence, &options))
        .collect();

    info!("Running {} sequence(s)", plans.len());

    if args.dry_run {
        for plan in &plans {
            println!("{}", plan.command_line());
        }
        return Ok(());
    }

    launcher::launch_all(&plans).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args).await?,
        Command::List => {
            for sequence in sequences::build_sequences() {
                let names: Vec<&str> = sequence.scenarios.iter().map(|s| s.as_str()).collect();
                println!("{}: {}", sequence.name, names.join(", "));
            }
        }
        Command::Config { config, scenario } => {
            let config = load_config(config.as_ref())?;
            let value = match scenario {
                Some(scenario) => config.scenario_value(scenario)?,
                None => serde_json::to_value(&config)?,
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Replay {
            scenario,
            trace,
            config,
        } => {
            let config = load_config(config.as_ref())?;
            let trace = Trace::from_path(&trace)?;
            let stdout = std::io::stdout();
            replay::replay(scenario, trace, &config, &mut stdout.lock())?;
        }
    }

    Ok(())
}
