//! Betting round state machine for one street.
//!
//! A [`BettingRound`] tracks the highest stake `B`, the minimum raise
//! increment, the last aggressor and the ordered set of seats still owed an
//! action. Seats act strictly in that order; [`BettingRound::apply`]
//! validates, moves chips through the [`PotManager`] and reports whether the
//! street continues, is complete, or ended early because at most one player
//! is left contesting the pot.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::errors::{ActionViolation, GameError};
use crate::player::{Player, PlayerAction, PlayerStatus};
use crate::pot::PotManager;
use crate::rules::{validate_action, BetContext, LegalActions, ValidatedAction};

/// Represents a betting street in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Street {
    /// Before flop (hole cards dealt)
    PreFlop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub fn next(self) -> Option<Street> {
        match self {
            Street::PreFlop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Community cards on the board once this street is dealt.
    pub fn board_len(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::PreFlop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(s)
    }
}

/// What happened to the round after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// More seats owe an action
    Continue,
    /// Every active player has acted and matched `B` (or is all-in)
    StreetComplete,
    /// At most one player is still contesting the pot
    EarlyEnd,
}

/// Seats in table order starting at `start`, wrapping around.
pub fn seats_from(start: usize, n: usize) -> impl Iterator<Item = usize> {
    (0..n).map(move |i| (start + i) % n.max(1))
}

#[derive(Debug, Clone)]
pub struct BettingRound {
    street: Street,
    current_bet: u32,
    min_raise: u32,
    big_blind: u32,
    last_aggressor: Option<usize>,
    /// Seats owed an action, next to act first
    to_act: Vec<usize>,
    /// Seats that acted since the last full raise; they may not re-raise
    acted: Vec<bool>,
}

impl BettingRound {
    /// Opens a street. `current_bet` is the big blind pre-flop and zero
    /// afterwards; `first` is the seat that acts first.
    ///
    /// When two or more players can still act every one of them is owed an
    /// action. With a single player able to act, that player only acts if
    /// their stake is below the current bet.
    pub fn new(
        street: Street,
        players: &[Player],
        first: usize,
        current_bet: u32,
        big_blind: u32,
    ) -> Self {
        let active: Vec<usize> = seats_from(first, players.len())
            .filter(|&s| players[s].is_active())
            .collect();
        let to_act = if active.len() >= 2 {
            active
        } else {
            active
                .into_iter()
                .filter(|&s| players[s].street_stake() < current_bet)
                .collect()
        };
        debug!(%street, current_bet, to_act = ?to_act, "betting round opened");
        Self {
            street,
            current_bet,
            min_raise: big_blind,
            big_blind,
            last_aggressor: None,
            to_act,
            acted: vec![false; players.len()],
        }
    }

    pub fn street(&self) -> Street {
        self.street
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }
    pub fn last_aggressor(&self) -> Option<usize> {
        self.last_aggressor
    }
    pub fn to_act(&self) -> &[usize] {
        &self.to_act
    }

    /// Next seat owed an action, if any.
    pub fn next_to_act(&self) -> Option<usize> {
        self.to_act.first().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.to_act.is_empty()
    }

    pub fn context(&self, seat: usize, player: &Player) -> BetContext {
        BetContext {
            seat,
            stack: player.stack(),
            stake: player.street_stake(),
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            big_blind: self.big_blind,
            can_raise: !self.acted.get(seat).copied().unwrap_or(false),
        }
    }

    pub fn legal_actions(&self, seat: usize, player: &Player) -> LegalActions {
        LegalActions::from_context(&self.context(seat, player))
    }

    /// Validates and applies `action` for `seat`.
    ///
    /// Nothing is mutated when an error is returned.
    pub fn apply(
        &mut self,
        seat: usize,
        action: PlayerAction,
        players: &mut [Player],
        pot: &mut PotManager,
    ) -> Result<(ValidatedAction, RoundStatus), GameError> {
        let player = players.get(seat).ok_or(GameError::IllegalAction {
            seat,
            reason: ActionViolation::OutOfTurn {
                expected: self.next_to_act(),
            },
        })?;
        if player.status() != PlayerStatus::Active {
            return Err(GameError::illegal(
                seat,
                ActionViolation::NotActive(player.status()),
            ));
        }
        if self.next_to_act() != Some(seat) {
            return Err(GameError::illegal(
                seat,
                ActionViolation::OutOfTurn {
                    expected: self.next_to_act(),
                },
            ));
        }
        let validated = validate_action(&self.context(seat, player), action)?;
        let stake = player.street_stake();

        let added = match validated {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(x) | ValidatedAction::Bet(x) | ValidatedAction::AllIn(x) => x,
            ValidatedAction::Raise(to) => to - stake,
        };
        if added > 0 {
            pot.contribute(seat, &mut players[seat], added)?;
        }
        if validated == ValidatedAction::Fold {
            players[seat].set_status(PlayerStatus::Folded);
            pot.mark_folded(seat);
        }

        self.to_act.retain(|&s| s != seat);
        if let Some(a) = self.acted.get_mut(seat) {
            *a = true;
        }

        let new_stake = stake + added;
        if new_stake > self.current_bet {
            let increment = new_stake - self.current_bet;
            if increment >= self.min_raise {
                self.min_raise = increment;
                for (s, a) in self.acted.iter_mut().enumerate() {
                    if s != seat {
                        *a = false;
                    }
                }
            }
            self.current_bet = new_stake;
            self.last_aggressor = Some(seat);
            let n = players.len();
            self.to_act = seats_from(seat + 1, n)
                .filter(|&s| s != seat && players[s].is_active())
                .collect();
        }

        debug!(
            seat,
            street = %self.street,
            action = ?validated,
            amount = added,
            current_bet = self.current_bet,
            "action applied"
        );

        let contesting = players.iter().filter(|p| p.in_hand()).count();
        let status = if contesting <= 1 {
            RoundStatus::EarlyEnd
        } else if self.to_act.is_empty() {
            RoundStatus::StreetComplete
        } else {
            RoundStatus::Continue
        };
        Ok((validated, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(stacks: &[u32]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let mut p = Player::new(format!("p{i}"), s);
                p.begin_hand();
                p
            })
            .collect()
    }

    #[test]
    fn check_around_completes_street() {
        let mut players = table(&[100, 100, 100]);
        let mut pot = PotManager::new(3);
        let mut round = BettingRound::new(Street::Flop, &players, 1, 0, 10);
        assert_eq!(round.to_act(), &[1, 2, 0]);
        for seat in [1, 2] {
            let (_, st) = round
                .apply(seat, PlayerAction::Check, &mut players, &mut pot)
                .unwrap();
            assert_eq!(st, RoundStatus::Continue);
        }
        let (_, st) = round
            .apply(0, PlayerAction::Check, &mut players, &mut pot)
            .unwrap();
        assert_eq!(st, RoundStatus::StreetComplete);
    }

    #[test]
    fn raise_reopens_action_for_everyone_else() {
        let mut players = table(&[200, 200, 200]);
        let mut pot = PotManager::new(3);
        let mut round = BettingRound::new(Street::Flop, &players, 0, 0, 10);
        round
            .apply(0, PlayerAction::Bet(20), &mut players, &mut pot)
            .unwrap();
        round
            .apply(1, PlayerAction::Call, &mut players, &mut pot)
            .unwrap();
        round
            .apply(2, PlayerAction::Raise(60), &mut players, &mut pot)
            .unwrap();
        assert_eq!(round.to_act(), &[0, 1]);
        assert_eq!(round.min_raise(), 40);
        assert_eq!(round.last_aggressor(), Some(2));
    }

    #[test]
    fn out_of_turn_is_rejected_without_mutation() {
        let mut players = table(&[100, 100]);
        let mut pot = PotManager::new(2);
        let mut round = BettingRound::new(Street::Flop, &players, 0, 0, 10);
        let err = round
            .apply(1, PlayerAction::Bet(50), &mut players, &mut pot)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalAction {
                seat: 1,
                reason: ActionViolation::OutOfTurn { expected: Some(0) }
            }
        );
        assert_eq!(players[1].stack(), 100);
        assert_eq!(pot.total(), 0);
    }

    #[test]
    fn fold_to_one_player_ends_early() {
        let mut players = table(&[100, 100]);
        let mut pot = PotManager::new(2);
        let mut round = BettingRound::new(Street::Turn, &players, 0, 0, 10);
        let (_, st) = round
            .apply(0, PlayerAction::Fold, &mut players, &mut pot)
            .unwrap();
        assert_eq!(st, RoundStatus::EarlyEnd);
    }

    #[test]
    fn lone_active_player_with_matched_stake_does_not_act() {
        let mut players = table(&[100, 0]);
        players[1].set_status(PlayerStatus::AllIn);
        let round = BettingRound::new(Street::River, &players, 0, 0, 10);
        assert!(round.is_complete());
    }
}
