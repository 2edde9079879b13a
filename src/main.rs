use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markreset::{group_lines, window_lines, GroupOptions, MarkResetConfig, SpaceTracker};

#[derive(Parser, Debug)]
#[command(name = "markreset", about = "Key-run grouping and windowed scans over line streams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the replay buffer profile to stderr when done.
    #[arg(long, global = true)]
    profile: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Group consecutive rows sharing a key column and count each run.
    Group {
        /// Delimited input file, sorted (or at least clustered) by key.
        input: PathBuf,
        /// Zero-based index of the key column.
        #[arg(long, default_value_t = 0)]
        key_column: usize,
        /// Column delimiter.
        #[arg(long, default_value_t = '\t')]
        delimiter: char,
        /// Skip the first line.
        #[arg(long)]
        skip_header: bool,
    },
    /// Print every window of consecutive lines, rewinding after each one.
    Windows {
        /// Input file (one record per line).
        input: PathBuf,
        /// Lines per window.
        #[arg(long, default_value_t = 3)]
        size: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = MarkResetConfig::default().with_profile(cli.profile);

    let space = match cli.command {
        Commands::Group {
            input,
            key_column,
            delimiter,
            skip_header,
        } => run_group(
            input,
            GroupOptions {
                key_column,
                delimiter,
                skip_header,
            },
            config,
        )?,
        Commands::Windows { input, size } => run_windows(input, size, config)?,
    };

    if let Some(profile) = space.profile() {
        eprintln!("{}", profile.report());
    }

    Ok(())
}

fn run_group(
    input_path: PathBuf,
    options: GroupOptions,
    config: MarkResetConfig,
) -> Result<SpaceTracker> {
    let reader = open_input(&input_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    group_lines(reader, &mut out, &options, config)
        .with_context(|| format!("grouping {} failed", input_path.display()))
}

fn run_windows(input_path: PathBuf, size: usize, config: MarkResetConfig) -> Result<SpaceTracker> {
    let reader = open_input(&input_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    window_lines(reader, &mut out, size, config)
        .with_context(|| format!("windowing {} failed", input_path.display()))
}

fn open_input(path: &PathBuf) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
