//! Terminal frontend for the Gamebook engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gamebook",
    about = "Gamebook: play a stat-driven branching story in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story interactively
    Play {
        /// Directory containing investigators.json, entries.json and locations.json
        #[arg(short, long, default_value = ".")]
        content: PathBuf,

        /// RNG seed for reproducible dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory for save slots
        #[arg(long, default_value = "saves")]
        saves: PathBuf,
    },

    /// Load content and report broken links
    Check {
        /// Directory containing the content files
        #[arg(short, long, default_value = ".")]
        content: PathBuf,
    },

    /// Roll a dice spec such as 3D6 or 20
    Roll {
        /// Dice spec
        spec: String,

        /// RNG seed for reproducible dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of rolls
        #[arg(short = 'n', long, default_value = "1")]
        times: u32,
    },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            content,
            seed,
            saves,
        } => commands::play::run(&content, seed, &saves),
        Commands::Check { content } => commands::check::run(&content),
        Commands::Roll { spec, seed, times } => commands::roll::run(&spec, seed, times),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
