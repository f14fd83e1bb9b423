//! # holdem CLI Library
//!
//! Terminal front end for the `holdem-engine` rules engine: play against
//! baseline AIs, run AI-only simulations, deal and evaluate hands, and read
//! stored player statistics.
//!
//! The entry point is [`run`], which parses arguments, resolves the layered
//! configuration and dispatches to a command handler. Output goes to the
//! streams passed in, so the whole CLI can be driven from tests.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "play", "--opponents", "3", "--hands", "10"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play hands against baseline AI opponents
//! - `sim`: Run AI-only hands and optionally write a JSONL hand history
//! - `deal`: Deal one board with every player's hole cards
//! - `eval`: Evaluate 5 to 7 cards
//! - `stats`: Show stored player statistics
//! - `cfg`: Show the resolved configuration

use clap::Parser;
use std::io::{BufRead, Write};

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod storage;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli, TableArgs};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command, handle_stats_command,
};
pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "deal", "eval", "stats", "cfg"];

/// Main entry point for the CLI application; `play` reads from stdin.
///
/// Returns the process exit code: `0` on success, `2` on errors and `130`
/// when a run was interrupted.
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "deal", "--seed", "42"];
/// let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    match dispatch(cli.cmd, input, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::warn!(error = %e, "command failed");
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::for_error(&e)
        }
    }
}

fn dispatch(
    cmd: Commands,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        Commands::Play {
            opponents,
            hands,
            table,
        } => {
            let config = resolve(&table)?;
            handle_play_command(opponents, hands, &config, out, err, input)
        }
        Commands::Sim {
            players,
            hands,
            output,
            table,
        } => {
            let config = resolve(&table)?;
            handle_sim_command(players, hands, output, &config, out, err)
        }
        Commands::Deal { players, seed } => {
            let config = resolve(&TableArgs {
                seed,
                ..TableArgs::default()
            })?;
            handle_deal_command(players, config.seed, out)
        }
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Stats => handle_stats_command(&config::load()?, out),
        Commands::Cfg => handle_cfg_command(out, err),
    }
}

fn resolve(table: &TableArgs) -> Result<config::Config, CliError> {
    let resolved = config::load_with_sources()?.with_overrides(&table.overrides())?;
    Ok(resolved.config)
}

/// Help and version go to stdout with code 0; anything else is a usage
/// error on stderr followed by the command list.
fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }
    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "Usage: holdem <command> [options]\n");
    let _ = writeln!(err, "Commands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut input = std::io::Cursor::new(Vec::new());
        let code = run_with_input(args.iter().copied(), &mut input, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_lists_every_command() {
        let (code, out, _) = run_args(&["holdem", "--help"]);
        assert_eq!(code, 0);
        for c in COMMANDS {
            assert!(out.contains(c), "help is missing {}", c);
        }
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        let (code, _, err) = run_args(&["holdem", "shuffle"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.contains("Usage: holdem"));
    }

    #[test]
    fn eval_errors_exit_with_2() {
        let (code, _, err) = run_args(&["holdem", "eval", "Ah", "Kh"]);
        assert_eq!(code, 2);
        assert!(err.starts_with("Error: Invalid input"));
    }
}
