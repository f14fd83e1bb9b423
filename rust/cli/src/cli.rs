//! Command-line definition for the `holdem` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Texas Hold'em at the terminal: play against AIs, simulate, evaluate hands"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table settings that override the config file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Seed for reproducible deals
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub small_blind: Option<u32>,
    #[arg(long)]
    pub big_blind: Option<u32>,
    /// Starting stack for new players
    #[arg(long)]
    pub stack: Option<u32>,
}

impl TableArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            starting_stack: self.stack,
            seed: self.seed,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play against baseline AI opponents (you are seat 1)
    Play {
        #[arg(long, default_value_t = 1)]
        opponents: usize,
        #[arg(long, default_value_t = 1)]
        hands: u64,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Play AI-only hands, optionally writing a JSONL hand history
    Sim {
        #[arg(long, default_value_t = 2)]
        players: usize,
        #[arg(long)]
        hands: u64,
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        table: TableArgs,
    },
    /// Deal one board and every player's hole cards
    Deal {
        #[arg(long, default_value_t = 2)]
        players: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate 5 to 7 cards, e.g. `holdem eval As Kd Qh Jc Ts`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },
    /// Show stored player statistics
    Stats,
    /// Show the resolved configuration and where each value came from
    Cfg,
}
