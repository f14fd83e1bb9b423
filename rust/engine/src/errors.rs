use thiserror::Error;

use crate::player::PlayerStatus;

/// Contract violations raised by the engine. Every variant means the caller
/// broke a precondition; no state has been mutated when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("hand evaluation needs 5 to 7 distinct cards, got {count} ({distinct} distinct)")]
    InvalidHandSize { count: usize, distinct: usize },
    #[error("deck has {remaining} cards left, {requested} requested")]
    EmptyDeck { requested: usize, remaining: usize },
    #[error("seat {seat} cannot put in {needed} chips with a stack of {available}")]
    InsufficientChips {
        seat: usize,
        needed: u32,
        available: u32,
    },
    #[error("illegal action by seat {seat}: {reason}")]
    IllegalAction { seat: usize, reason: ActionViolation },
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("at least two players with chips are required, found {0}")]
    NotEnoughPlayers(usize),
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
}

/// Why an action was rejected by the betting round.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionViolation {
    #[error("not this player's turn (expected {expected:?})")]
    OutOfTurn { expected: Option<usize> },
    #[error("player cannot act while {0:?}")]
    NotActive(PlayerStatus),
    #[error("cannot check facing {to_call} to call")]
    CheckFacingBet { to_call: u32 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("cannot bet into an existing wager of {current_bet}, raise instead")]
    BetIntoWager { current_bet: u32 },
    #[error("bet of {amount} is below the minimum of {minimum}")]
    BetBelowMinimum { amount: u32, minimum: u32 },
    #[error("cannot raise without a wager to raise")]
    RaiseWithoutWager,
    #[error("raise to {to} is below the minimum of {minimum}")]
    RaiseBelowMinimum { to: u32, minimum: u32 },
    #[error("betting was not reopened by a full raise; only call or fold")]
    RaiseNotReopened,
    #[error("no chips left to go all-in with")]
    NoChips,
}

impl GameError {
    pub(crate) fn illegal(seat: usize, reason: ActionViolation) -> Self {
        GameError::IllegalAction { seat, reason }
    }
}
