use crate::algorithm::AlgorithmKind;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "movemap")]
#[command(about = "Move method and move field refactoring recommender", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend refactorings for the entities in a JSON records file
    Analyze {
        /// Entity records produced by discovery
        input: PathBuf,

        /// Configuration file (default: search for .movemap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Algorithms to run, in order (repeatable; default from config)
        #[arg(short = 'a', long = "algorithm", value_enum, ignore_case = true)]
        algorithms: Vec<AlgorithmKind>,

        /// Also propose field moves
        #[arg(long = "fields")]
        enable_field_refactorings: bool,

        /// Worker threads per algorithm (0 = all cores)
        #[arg(short = 'j', long = "jobs")]
        jobs: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop proposals below this accuracy
        #[arg(long = "min-accuracy")]
        min_accuracy: Option<f64>,

        /// Also report the proposals every successful algorithm agrees on
        #[arg(long)]
        combine: bool,

        /// Label attached to every proposal
        #[arg(long)]
        scope: Option<String>,

        /// Hide progress bars
        #[arg(short, long)]
        quiet: bool,

        /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .movemap.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
