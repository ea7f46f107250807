//! Main entry point for the lorasim CLI application

use clap::Parser;
use lorasim::LorasimError;
use lorasim::cli::{Cli, exit_code, run};
use lorasim_common::{ErrorKind, LoggingTransformer};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging
    LoggingTransformer::init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.kind() == ErrorKind::MalformedInput {
                let field = match &e {
                    LorasimError::Input(input) => input.field(),
                    _ => "command line",
                };
                LoggingTransformer::log_rejected_input(field, &e);
            }
            eprintln!("Error: {e}");
            exit_code(e.kind())
        }
    }
}
