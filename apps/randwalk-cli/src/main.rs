use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use randwalk_kernel::{DEFAULT_TRIAL_STEPS, SimulationConfig, SimulationDriver, run_trials};
use randwalk_render::{DebugTextRenderer, PlotView, Renderer, SeriesSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "randwalk-cli", about = "Headless runner for 2D random walks")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Simulation parameters shared by every run command.
#[derive(Args, Debug, Clone)]
struct SimArgs {
    /// YAML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of walkers
    #[arg(short, long)]
    walkers: Option<usize>,
    /// Steps per frame
    #[arg(long)]
    steps: Option<usize>,
    /// RNG seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,
}

impl SimArgs {
    fn resolve(&self) -> anyhow::Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimulationConfig::default(),
        };
        if let Some(walkers) = self.walkers {
            config.walkers = walkers;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Run the mean-distance animation headlessly, one line per frame
    Animate {
        #[command(flatten)]
        sim: SimArgs,
        /// Number of frames
        #[arg(short, long)]
        frames: Option<u64>,
        /// Emit JSON lines instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run one trial per step count and print the field after each
    Trials {
        #[command(flatten)]
        sim: SimArgs,
        /// Comma-separated step counts; overrides --steps
        #[arg(long, value_delimiter = ',')]
        steps_list: Vec<usize>,
    },
    /// Run a single trial and print every walker
    Field {
        #[command(flatten)]
        sim: SimArgs,
    },
}

/// Step counts for `trials`: an explicit list wins, then `--steps` as a single
/// trial, then the default progression.
fn trial_step_counts(steps: Option<usize>, steps_list: Vec<usize>) -> Vec<usize> {
    match (steps_list.is_empty(), steps) {
        (false, _) => steps_list,
        (true, Some(steps)) => vec![steps],
        (true, None) => DEFAULT_TRIAL_STEPS.to_vec(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("randwalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", randwalk_kernel::crate_info());
            println!("render: {}", randwalk_render::crate_info());
            let defaults = SimulationConfig::default();
            println!(
                "defaults: walkers={} steps={} frames={} origin={}",
                defaults.walkers, defaults.steps, defaults.frames, defaults.origin
            );
        }
        Commands::Animate { sim, frames, json } => {
            let mut config = sim.resolve()?;
            if let Some(frames) = frames {
                config.frames = frames;
            }
            let view = PlotView::from_config(&config);
            let mut driver = SimulationDriver::from_config(&config)?;
            let mut series = SeriesSink::new();
            tracing::info!(
                walkers = config.walkers,
                steps = config.steps,
                frames = config.frames,
                "animating"
            );

            for _ in 0..config.frames {
                let report = driver.advance(&mut series)?;
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    let marker = if view.contains(report.point) { "" } else { " (off plot)" };
                    println!(
                        "frame {:>4}: mean distance {:.3}{marker}",
                        report.frame, report.mean_distance
                    );
                }
            }

            if let Some(avg) = series.running_mean() {
                tracing::info!(frames = series.len(), average = avg, "animation finished");
            }
        }
        Commands::Trials { sim, steps_list } => {
            let config = sim.resolve()?;
            let steps_list = trial_step_counts(sim.steps, steps_list);
            let mut field = SimulationDriver::from_config(&config)?.into_field();
            for outcome in run_trials(&mut field, config.origin, &steps_list)? {
                println!("A trial with {} steps:", outcome.steps);
                for (name, distance) in &outcome.distances {
                    println!("  {name}: {distance:.3}");
                }
                println!("mean: {:.3}", outcome.mean_distance);
            }
        }
        Commands::Field { sim } => {
            let config = sim.resolve()?;
            let mut driver = SimulationDriver::from_config(&config)?;
            driver.advance(&mut SeriesSink::new())?;
            println!("{}", driver.field());
            println!();
            print!(
                "{}",
                DebugTextRenderer::new().render(driver.field(), &PlotView::from_config(&config))
            );
        }
    }

    Ok(())
}
