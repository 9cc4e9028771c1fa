use clap::Parser;
use std::process::ExitCode;
use towerstats::cli::{run_gen_cli, GenCli};
use towerstats::logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    let cli = GenCli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    let _guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run_gen_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
