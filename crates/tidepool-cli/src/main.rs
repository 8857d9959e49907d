//! Tidepool CLI: headless simulation, benchmarking, and validation.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tidepool")]
#[command(version, about = "Tidepool: interactive water pool simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pool headless for a number of frames.
    Simulate {
        /// Path to scene config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Ball mesh (OBJ), overriding the config.
        #[arg(short, long)]
        mesh: Option<String>,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 300)]
        frames: u64,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (ball_drop, ripple, drag_release, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a ball mesh or scene config.
    Validate {
        /// Path to an .obj mesh or a .toml scene config.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate { config, mesh, frames } => {
            commands::simulate(config.as_deref(), mesh.as_deref(), frames)
        }
        Commands::Benchmark { scenario, output } => commands::benchmark(&scenario, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
