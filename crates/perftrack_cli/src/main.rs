//! `perftrack` command-line entry point.

use clap::Parser;
use perftrack_cli::{error_envelope, run_cli, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run_cli(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", error_envelope(&err));
            ExitCode::FAILURE
        }
    }
}
