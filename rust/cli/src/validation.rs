//! Input parsing and validation for interactive commands.
//!
//! Human input is parsed into a [`PlayerAction`] and then checked against the
//! engine's legal-action menu, so a typo or an out-of-range amount is
//! answered at the prompt and never reaches the table.

use holdem_engine::engine::MAX_SEATS;
use holdem_engine::player::PlayerAction;
use holdem_engine::rules::LegalActions;

use crate::formatters::{format_action, format_legal};

/// Outcome of parsing one line of player input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(PlayerAction),
    /// `q` or `quit`
    Quit,
    /// Unusable input, with a message for the player
    Invalid(String),
}

/// Parses `fold|check|call|bet X|raise X|allin|q` (case-insensitive, with
/// `f`, `c` and `all-in` as shorthands).
///
/// # Example
///
/// ```rust
/// # use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::player::PlayerAction;
///
/// assert_eq!(parse_player_action("bet 100"), ParseResult::Action(PlayerAction::Bet(100)));
/// assert_eq!(parse_player_action("Q"), ParseResult::Quit);
/// assert!(matches!(parse_player_action("shove"), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(PlayerAction::Fold),
        "check" | "c" => ParseResult::Action(PlayerAction::Check),
        "call" => ParseResult::Action(PlayerAction::Call),
        "allin" | "all-in" => ParseResult::Action(PlayerAction::AllIn),
        "bet" => match parse_amount(&parts, "bet") {
            Ok(amount) => ParseResult::Action(PlayerAction::Bet(amount)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        "raise" => match parse_amount(&parts, "raise") {
            Ok(amount) => ParseResult::Action(PlayerAction::Raise(amount)),
            Err(msg) => ParseResult::Invalid(msg),
        },
        other => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, bet <amount>, raise <amount>, allin, q",
            other
        )),
    }
}

fn parse_amount(parts: &[&str], verb: &str) -> Result<u32, String> {
    let Some(raw) = parts.get(1) else {
        return Err(format!("{} requires an amount (e.g., '{} 100')", verb, verb));
    };
    match raw.parse::<u32>() {
        Ok(0) => Err(format!("{} amount must be positive", verb)),
        Ok(amount) => Ok(amount),
        Err(_) => Err(format!("Invalid {} amount '{}'", verb, raw)),
    }
}

/// Accepts `action` only if the legal-action menu offers it.
pub fn check_legal(action: PlayerAction, legal: &LegalActions) -> Result<PlayerAction, String> {
    if legal.allows(action) {
        Ok(action)
    } else {
        Err(format!(
            "{} is not allowed now. Options: {}",
            format_action(&action),
            format_legal(legal)
        ))
    }
}

/// Seats a table needs for `opponents` plus the human.
pub fn validate_opponents(opponents: usize) -> Result<usize, String> {
    if opponents == 0 || opponents >= MAX_SEATS {
        return Err(format!("opponents must be between 1 and {}", MAX_SEATS - 1));
    }
    Ok(opponents + 1)
}

pub fn validate_players(players: usize) -> Result<usize, String> {
    if !(2..=MAX_SEATS).contains(&players) {
        return Err(format!("players must be between 2 and {}", MAX_SEATS));
    }
    Ok(players)
}

pub fn validate_hands(hands: u64) -> Result<u64, String> {
    if hands == 0 {
        return Err("hands must be >= 1".to_string());
    }
    Ok(hands)
}
