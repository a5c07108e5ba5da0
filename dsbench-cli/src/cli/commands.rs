//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Corpus generation, benchmark runs and comparison plots for data structures
#[derive(Parser)]
#[command(name = "dsbench", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Configuration file merged over the defaults (default: ./dsbench.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Main command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Plot result files into one multi-panel figure
    Plot {
        /// Figure to write (.svg)
        output: PathBuf,

        /// Result files, one panel each, in grid order
        #[arg(required = true)]
        results: Vec<PathBuf>,
    },

    /// Generate a synthetic corpus (kept as-is if it already exists)
    Corpus {
        /// Corpus file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of tokens
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Word list for word-salad tokens
        #[arg(short, long)]
        word_list: Option<PathBuf>,

        /// Seed for a reproducible corpus
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Run the configured benchmark suite and plot its results
    Run {
        /// Directory the benchmarks run in; relative paths resolve against it
        #[arg(short, long, default_value = ".")]
        workdir: PathBuf,
    },

    /// Configuration management
    Config {
        /// Configuration action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
}
