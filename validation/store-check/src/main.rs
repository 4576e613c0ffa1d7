//! Command-line validation of inflow stores.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use inflow_reader::testdata::{channel_points, channel_velocity, write_store};
use inflow_reader::{
    describe_store, make_velocity_reader_with_layout, read_points_with_layout, ReaderConfig,
    VelocityReader,
};
use store_check::report::{
    format_json, format_points_table, format_snapshot_table, format_summary_table,
    format_sweep_table,
};
use store_check::logging::init_tracing;
use store_check::{sweep, PointsReport, SnapshotReport};

#[derive(Parser)]
#[command(name = "store-check")]
#[command(about = "Load an inflow HDF5 store through the readers and report the result", long_about = None)]
struct Cli {
    /// Path to the HDF5 store (overrides `store` in the config file)
    #[arg(short, long, env = "INFLOW_STORE", global = true)]
    store: Option<PathBuf>,

    /// YAML reader configuration
    #[arg(short, long, env = "INFLOW_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format: table (default), json
    #[arg(short, long, default_value = "table", global = true)]
    output: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset shapes and the number of stored times
    Info,

    /// Read the coordinates with the configured points options
    Points,

    /// Read one velocity snapshot with the configured velocity options
    Velocity {
        /// Time index to read
        #[arg(short, long, default_value = "0")]
        time: usize,
    },

    /// Read every time step and check shapes and values
    Sweep,

    /// Write a synthetic channel store to the store path
    Generate {
        /// Number of time steps
        #[arg(long, default_value = "10")]
        times: usize,

        /// Wall-normal points
        #[arg(long, default_value = "32")]
        ny: usize,

        /// Spanwise points
        #[arg(long, default_value = "16")]
        nz: usize,

        /// Channel half-width
        #[arg(long, default_value = "1.0")]
        half_width: f64,

        /// Spanwise extent
        #[arg(long, default_value = "3.14159")]
        span: f64,
    },
}

#[derive(Clone, Copy, PartialEq)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    let output = match cli.output.to_lowercase().as_str() {
        "table" => OutputFormat::Table,
        "json" => OutputFormat::Json,
        other => bail!("Unknown output format: {}", other),
    };

    let mut config = match &cli.config {
        Some(path) => ReaderConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReaderConfig::default(),
    };
    if cli.store.is_some() {
        config.store = cli.store.clone();
    }
    let store = config
        .store
        .clone()
        .context("No store given (use --store, INFLOW_STORE or `store` in the config)")?;

    match cli.command {
        Commands::Info => {
            let summary = describe_store(&store, &config.layout)?;
            print(output, &summary, format_summary_table)?;
        }

        Commands::Points => {
            let points = read_points_with_layout(&store, &config.layout, &config.points)?;
            print(output, &PointsReport::new(&points), format_points_table)?;
        }

        Commands::Velocity { time } => {
            let reader =
                make_velocity_reader_with_layout(&store, config.layout.clone(), config.velocity.clone());
            let snapshot = reader.read(time)?;
            let report = SnapshotReport::new(reader.kind().as_str(), time, &snapshot);
            print(output, &report, format_snapshot_table)?;
        }

        Commands::Sweep => {
            let reader =
                make_velocity_reader_with_layout(&store, config.layout.clone(), config.velocity.clone());
            let n_times = reader.n_times()?;
            info!(n_times, "Sweeping velocity snapshots");
            let result = sweep(&reader, n_times)?;
            print(output, &result, format_sweep_table)?;
            if !result.is_ok() {
                bail!("{} problem(s) found", result.problems.len());
            }
        }

        Commands::Generate {
            times,
            ny,
            nz,
            half_width,
            span,
        } => {
            if store.exists() {
                bail!("Refusing to overwrite existing store {}", store.display());
            }
            let points = channel_points(ny, nz, half_width, span);
            let velocity = channel_velocity(times, ny, nz);
            write_store(&store, &config.layout, &points, &velocity)?;
            println!("Created: {}", store.display());
        }
    }

    Ok(())
}

fn print<T: serde::Serialize>(output: OutputFormat, report: &T, table: fn(&T) -> String) -> Result<()> {
    match output {
        OutputFormat::Table => println!("{}", table(report)),
        OutputFormat::Json => println!("{}", format_json(report)?),
    }
    Ok(())
}
