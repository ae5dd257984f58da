use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lifedice_execution::MonotonicClock;
use lifedice_simulator::{run, Config, DiceDemo, LifeDemo, TerminalRenderer};
use tokio::io::{stdin, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `log_level` from the configuration.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    demo: DemoCommand,
}

#[derive(Subcommand, Debug)]
enum DemoCommand {
    /// Two-roll dice game: space rolls, 1-5 hold, r resets, q quits.
    Dice,
    /// Game of Life: space pauses, n steps, c clears, r randomizes, q quits.
    Life {
        /// Run this many generations without input, then exit.
        #[arg(short, long)]
        generations: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml::from_str::<Config>(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => Config::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    let config = config.validate().context("invalid configuration")?;

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "seeded");

    let renderer = TerminalRenderer::new(std::io::stdout());
    let clock = MonotonicClock::new();
    let input = BufReader::new(stdin());
    match args.demo {
        DemoCommand::Dice => {
            let mut demo =
                DiceDemo::new(&config, seed, renderer).context("failed to start renderer")?;
            run(&mut demo, input, &clock, config.frame).await?;
            let session = demo.session();
            info!(
                rounds = session.rounds(),
                balance = session.balance(),
                "dice finished"
            );
        }
        DemoCommand::Life { generations } => {
            let mut demo =
                LifeDemo::new(&config, seed, renderer).context("failed to start renderer")?;
            match generations {
                Some(generations) => demo.run_generations(generations)?,
                None => {
                    run(&mut demo, input, &clock, config.frame).await?;
                }
            }
            info!(
                generation = demo.sim().generation(),
                population = demo.sim().population(),
                "life finished"
            );
        }
    }

    Ok(())
}
