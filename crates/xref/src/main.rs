//! Command-line interface for the `xref` cross-reference search tool.

use std::process::ExitCode;

use xref::cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let ctx = match cli.command {
        Commands::Init(_) | Commands::Explain(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
