//! Clap argument definitions for the `xref` CLI.

use std::{env, path::PathBuf, process::exit};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "xref")]
#[command(about = "Cross-reference search - find descriptions through a dictionary")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Table paths that override the configured ones.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Dictionary table (.csv, .tsv or .json)
    #[arg(long, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Descriptions table (.csv, .tsv or .json)
    #[arg(long, value_name = "PATH")]
    pub descriptions: Option<PathBuf>,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Maximum rows to render, 0 for all [default: 50]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long, conflicts_with = "list")]
    pub json: bool,

    /// Output matching row indices only
    #[arg(long)]
    pub list: bool,
}

/// Arguments for `xref search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Query text; several arguments are joined with spaces
    #[arg(required = true)]
    pub queries: Vec<String>,

    #[command(flatten)]
    /// Table path overrides.
    pub tables: TableArgs,

    /// Search the descriptions directly, skipping the dictionary
    #[arg(long, conflicts_with = "fallback")]
    pub direct: bool,

    /// Search the descriptions directly when the dictionary yields nothing
    #[arg(long)]
    pub fallback: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    /// Write the matching description rows to a .csv, .tsv or .json file
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

impl SearchCommand {
    /// Joins the query arguments into one raw query string.
    pub fn query(&self) -> String {
        self.queries.join(" ")
    }
}

/// Arguments for `xref explain`.
#[derive(Args, Debug, Clone)]
pub struct ExplainCommand {
    /// Query text; several arguments are joined with spaces
    #[arg(required = true)]
    pub queries: Vec<String>,
}

impl ExplainCommand {
    /// Joins the query arguments into one raw query string.
    pub fn query(&self) -> String {
        self.queries.join(" ")
    }
}

/// Arguments for `xref init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.xref.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `xref` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the descriptions through the dictionary
    #[command(after_help = "\
QUERY SYNTAX:
  term              Whole word, case- and accent-insensitive
  \"phrase\"          Quoted text kept as one term
  a + b             Both must match (spaces around + required)
  a | b             Either may match
  a/b               Either may match (when no | is present)
  #term             Remove rows matching term
  >=48A  <2,5mm     Compare numbers found in cells, optional unit
  48A               Equal to 48 with unit A
  10-20V            Inclusive range, bounds in any order

HOW IT WORKS:
  The query is first matched against the dictionary. Words from the matching
  dictionary rows are then searched, with OR, in the descriptions. Use --direct
  to search the descriptions with the query itself.

EXAMPLES:
  xref search router
  xref search 'router + >=16'
  xref search 'router | switch #cisco'
  xref search '\"power supply\" + 10-20V'
  xref search --fallback cable --export cables.csv")]
    Search(SearchCommand),

    /// Show how a query is parsed without searching
    Explain(ExplainCommand),

    /// Initialize xref configuration in current directory
    Init(InitCommand),

    /// Validate configuration and tables
    Check,

    /// Show effective configuration settings
    Config,

    /// Show configuration files and table statistics
    Status,
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_command_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints custom top-level help listing each subcommand on one line.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: xref [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Increase log verbosity (-v info, -vv debug, -vvv trace)");
    println!("  -h, --help        Print help");
}

#[cfg(test)]
mod tests {
    use xref_config::DEFAULT_DISPLAY_LIMIT;

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    /// Catches drift between the display limit default and the help text.
    #[test]
    fn cli_help_defaults_match_constants() {
        let cmd = Cli::command();
        let limit_help = get_arg_help(&cmd, "search", "limit");
        assert!(
            limit_help.contains(&format!("[default: {DEFAULT_DISPLAY_LIMIT}]")),
            "search --limit help should contain default {DEFAULT_DISPLAY_LIMIT}: {limit_help}"
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn queries_are_joined_with_spaces() {
        let cli = Cli::try_parse_from(["xref", "search", "router", "+", "cisco"]).unwrap();
        let Commands::Search(cmd) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(cmd.query(), "router + cisco");
    }

    #[test]
    fn json_and_list_conflict() {
        let result = Cli::try_parse_from(["xref", "search", "x", "--json", "--list"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["xref", "search", "x", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
