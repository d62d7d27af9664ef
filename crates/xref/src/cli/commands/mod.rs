//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod explain;
pub mod init;
pub mod search;
pub mod shared;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Explain(cmd) => explain::run(&cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Status => status::run(ctx),
    }
}
