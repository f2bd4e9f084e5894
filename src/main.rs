use anyhow::Result;
use movemap::cli::{self, Commands};
use movemap::commands::analyze::{handle_analyze, AnalyzeConfig};
use movemap::commands::init::init_config;
use std::path::Path;

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v flags
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            algorithms,
            enable_field_refactorings,
            jobs,
            format,
            output,
            min_accuracy,
            combine,
            scope,
            quiet,
            verbosity,
        } => {
            init_logging(verbosity);
            handle_analyze(AnalyzeConfig {
                input,
                config,
                algorithms,
                enable_field_refactorings,
                jobs,
                format,
                output,
                min_accuracy,
                combine,
                scope,
                quiet,
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            init_config(Path::new("."), force)
        }
    }
}
