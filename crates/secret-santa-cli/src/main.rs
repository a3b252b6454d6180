//! `secret-santa` command line entry point.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use secret_santa::ExchangeError;

use crate::cli::Cli;

fn main() -> ExitCode {
    secret_santa::console::init();
    let cli = Cli::parse();

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let infeasible = err
                .downcast_ref::<ExchangeError>()
                .is_some_and(ExchangeError::is_no_feasible_assignment);

            if infeasible {
                eprintln!("{} {err}", "no valid assignment:".bright_red().bold());
                eprintln!(
                    "Every group must hold at most half of the participants, and at least \
                     three people must take part."
                );
                ExitCode::from(2)
            } else {
                eprintln!("{} {err:#}", "error:".bright_red().bold());
                ExitCode::FAILURE
            }
        }
    }
}
