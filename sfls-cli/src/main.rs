// SPDX-License-Identifier: AGPL-3.0-or-later
//! sfls CLI
//!
//! Renders `ls`-style listings of remote file-system entries.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;

use crate::commands::LsFlags;
use crate::config::{ColorChoice, Config};

/// Environment variable selecting the log level
const LOG_ENV_VAR: &str = "SFLS_LOG";

#[derive(Parser)]
#[command(name = "sfls")]
#[command(author, version, about = "ls for remote file systems", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List directory contents
    #[command(alias = "dir")]
    Ls {
        /// Path being listed
        #[arg(default_value = ".")]
        path: String,

        /// JSON listing to read, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Long format with details
        #[arg(short, long)]
        long: bool,

        /// One entry per line
        #[arg(short = '1')]
        one: bool,

        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,

        /// List directories as plain entries
        #[arg(short, long)]
        dir: bool,

        /// Group directories before files
        #[arg(long)]
        dirs_first: bool,

        /// Sort by modification time, newest first
        #[arg(short = 't')]
        sort_time: bool,

        /// Sort by size, largest first
        #[arg(short = 'S')]
        sort_size: bool,

        /// Reverse the sort order
        #[arg(short, long)]
        reverse: bool,

        /// Show all files including hidden
        #[arg(short, long)]
        all: bool,

        /// Colorize names
        #[arg(long, value_enum)]
        color: Option<ColorChoice>,

        /// Terminal width in columns
        #[arg(short, long)]
        width: Option<usize>,
    },

    /// Show the resolved color map
    Colors {
        /// Colorize the keys
        #[arg(long, value_enum)]
        color: Option<ColorChoice>,
    },
}

fn log_level(verbose: u8, env: Option<&str>) -> LevelFilter {
    match verbose {
        0 => env
            .and_then(|value| value.parse().ok())
            .unwrap_or(LevelFilter::WARN),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::prelude::*;

    let level = log_level(verbose, std::env::var(LOG_ENV_VAR).ok().as_deref());
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .try_init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Ls {
            path,
            input,
            long,
            one,
            human,
            dir,
            dirs_first,
            sort_time,
            sort_size,
            reverse,
            all,
            color,
            width,
        } => {
            let flags = LsFlags {
                input,
                long,
                one,
                human,
                dir,
                dirs_first,
                sort_time,
                sort_size,
                reverse,
                all,
                color,
                width,
            };
            commands::ls(&path, &flags, &config).await
        }
        Commands::Colors { color } => commands::colors(color, &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
