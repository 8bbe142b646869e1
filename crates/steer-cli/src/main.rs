//! steer CLI - segment/box steering queries from the terminal
//!
//! Runs the intersection step on inputs given as flags or as a JSON batch,
//! printing JSON reports in the host's state-property naming.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use steer_ir::{Config, StepInputs, StepReport};
use steer_kernel::IntersectionStep;

mod logger;

use logger::LogLevel;

#[derive(Parser)]
#[command(name = "steer")]
#[command(about = "Segment/box intersection and steering deflection", long_about = None)]
struct Cli {
    /// Path to a .toml or .json config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Logging level (RUST_LOG overrides per module)
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single query given as flags
    #[command(allow_negative_numbers = true)]
    Query(QueryArgs),
    /// Run every query in a JSON array file ("-" reads stdin)
    Batch {
        /// Input JSON file
        input: PathBuf,
    },
    /// Validate a config file and print the effective settings
    CheckConfig {
        /// Config file to check
        file: PathBuf,
    },
}

/// Step inputs as flags, defaulting like the host properties.
#[derive(Args)]
struct QueryArgs {
    /// Segment origin X
    #[arg(long, default_value_t = 0.0)]
    ox: f64,
    /// Segment origin Y
    #[arg(long, default_value_t = 0.0)]
    oy: f64,
    /// Segment origin Z
    #[arg(long, default_value_t = 0.0)]
    oz: f64,
    /// Direction X
    #[arg(long, default_value_t = 1.0)]
    rx: f64,
    /// Direction Y
    #[arg(long, default_value_t = 1.0)]
    ry: f64,
    /// Direction Z
    #[arg(long, default_value_t = 1.0)]
    rz: f64,
    /// Segment length
    #[arg(long, default_value_t = 1.0)]
    rlength: f64,
    /// Box minimum X
    #[arg(long, default_value_t = 0.0)]
    b0x: f64,
    /// Box minimum Y
    #[arg(long, default_value_t = 0.0)]
    b0y: f64,
    /// Box minimum Z
    #[arg(long, default_value_t = 0.0)]
    b0z: f64,
    /// Box maximum X
    #[arg(long, default_value_t = 0.0)]
    b1x: f64,
    /// Box maximum Y
    #[arg(long, default_value_t = 0.0)]
    b1y: f64,
    /// Box maximum Z
    #[arg(long, default_value_t = 0.0)]
    b1z: f64,
}

impl From<QueryArgs> for StepInputs {
    fn from(a: QueryArgs) -> Self {
        StepInputs {
            ox: a.ox,
            oy: a.oy,
            oz: a.oz,
            rx: a.rx,
            ry: a.ry,
            rz: a.rz,
            rlength: a.rlength,
            b0x: a.b0x,
            b0y: a.b0y,
            b0z: a.b0z,
            b1x: a.b1x,
            b1y: a.b1y,
            b1z: a.b1z,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.log_level);

    match cli.command {
        Commands::Query(args) => {
            let step = load_step(cli.config.as_deref())?;
            let report = StepReport::run(&step, &args.into());
            println!("{}", report.to_json()?);
        }
        Commands::Batch { input } => {
            let step = load_step(cli.config.as_deref())?;
            run_batch(&step, &input)?;
        }
        Commands::CheckConfig { file } => {
            let config = Config::load(&file)
                .with_context(|| format!("checking {}", file.display()))?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn load_step(path: Option<&Path>) -> Result<IntersectionStep> {
    let config = Config::load_or_default(path).context("loading config")?;
    log::info!("face strategy: {:?}", config.face.strategy);
    Ok(IntersectionStep::new(config.query_options()))
}

fn run_batch(step: &IntersectionStep, input: &Path) -> Result<()> {
    let json = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("reading {}", input.display()))?
    };

    let batch = StepInputs::batch_from_json(&json).context("parsing batch")?;
    let reports: Vec<StepReport> = batch
        .iter()
        .map(|inputs| StepReport::run(step, inputs))
        .collect();

    let hits = reports.iter().filter(|r| r.outputs.distance_from_intersection.is_some()).count();
    log::info!("{} queries, {} hits", reports.len(), hits);

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
