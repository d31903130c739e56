mod commands;
mod config;
mod input;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "termcal")]
#[command(about = "Generate an iCalendar feed for a recurring school timetable")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the ICS feed from the timetable data
    Generate {
        /// Directory holding the JSON input files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path of the generated ICS file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory of static assets copied next to the ICS file
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Path of the termcal.toml config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pin "today" for reproducible runs (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Validate the timetable data without writing output
    Check {
        /// Directory holding the JSON input files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Path of the termcal.toml config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Default to warn so a normal run prints only the data problems;
    // RUST_LOG overrides.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            data_dir,
            output,
            static_dir,
            config,
            today,
        } => commands::generate::run(data_dir, output, static_dir, config, today),
        Commands::Check { data_dir, config } => commands::check::run(data_dir, config),
    }
}
