use serde::{Deserialize, Serialize};

use crate::errors::{ActionViolation as V, GameError};
use crate::player::PlayerAction as A;

/// Everything needed to judge one player's action, taken from the betting
/// round and the player at the moment they act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetContext {
    pub seat: usize,
    /// Chips behind
    pub stack: u32,
    /// Chips already put in this street
    pub stake: u32,
    /// Highest stake this street
    pub current_bet: u32,
    /// Minimum raise increment
    pub min_raise: u32,
    pub big_blind: u32,
    /// False once the player has acted and only a short all-in came after
    pub can_raise: bool,
}

impl BetContext {
    pub fn to_call(&self) -> u32 {
        self.current_bet.saturating_sub(self.stake)
    }

    /// Total stake the player reaches by shoving.
    pub fn all_in_to(&self) -> u32 {
        self.stake + self.stack
    }
}

/// An action that passed validation, expressed in chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips added to match the current bet
    Call(u32),
    /// Chips wagered to open the street
    Bet(u32),
    /// New total stake for the street
    Raise(u32),
    /// Whole stack added; may be a call, bet or raise depending on size
    AllIn(u32),
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts a [`crate::player::PlayerAction`] into a [`ValidatedAction`].
/// A call the stack cannot cover, or a bet/raise that uses exactly the whole
/// stack, becomes [`ValidatedAction::AllIn`]; an all-in may be below the
/// minimum bet or raise.
///
/// # Errors
///
/// - [`GameError::IllegalAction`] - check facing a bet, bet into a wager,
///   raise without a wager, amounts below the minimum, or a raise after a
///   short all-in that did not reopen the betting
/// - [`GameError::InsufficientChips`] - bet or raise larger than the stack
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, BetContext, ValidatedAction};
/// use holdem_engine::player::PlayerAction;
///
/// let ctx = BetContext {
///     seat: 0,
///     stack: 15,
///     stake: 0,
///     current_bet: 20,
///     min_raise: 20,
///     big_blind: 20,
///     can_raise: true,
/// };
/// // short call goes all-in
/// assert_eq!(
///     validate_action(&ctx, PlayerAction::Call),
///     Ok(ValidatedAction::AllIn(15))
/// );
/// // no check facing a bet
/// assert!(validate_action(&ctx, PlayerAction::Check).is_err());
/// ```
pub fn validate_action(ctx: &BetContext, action: A) -> Result<ValidatedAction, GameError> {
    let seat = ctx.seat;
    let illegal = |reason| GameError::illegal(seat, reason);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if ctx.stake == ctx.current_bet {
                Ok(ValidatedAction::Check)
            } else {
                Err(illegal(V::CheckFacingBet {
                    to_call: ctx.to_call(),
                }))
            }
        }
        A::Call => {
            let to_call = ctx.to_call();
            if to_call == 0 {
                Err(illegal(V::NothingToCall))
            } else if ctx.stack <= to_call {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Bet(amount) => {
            if ctx.current_bet > 0 {
                return Err(illegal(V::BetIntoWager {
                    current_bet: ctx.current_bet,
                }));
            }
            if amount > ctx.stack {
                return Err(GameError::InsufficientChips {
                    seat,
                    needed: amount,
                    available: ctx.stack,
                });
            }
            if amount == ctx.stack && amount > 0 {
                Ok(ValidatedAction::AllIn(amount))
            } else if amount < ctx.big_blind || amount == 0 {
                Err(illegal(V::BetBelowMinimum {
                    amount,
                    minimum: ctx.big_blind,
                }))
            } else {
                Ok(ValidatedAction::Bet(amount))
            }
        }
        A::Raise(to) => {
            if ctx.current_bet == 0 {
                return Err(illegal(V::RaiseWithoutWager));
            }
            if !ctx.can_raise {
                return Err(illegal(V::RaiseNotReopened));
            }
            if to > ctx.all_in_to() {
                return Err(GameError::InsufficientChips {
                    seat,
                    needed: to.saturating_sub(ctx.stake),
                    available: ctx.stack,
                });
            }
            let minimum = ctx.current_bet + ctx.min_raise;
            if to == ctx.all_in_to() && to > ctx.stake {
                Ok(ValidatedAction::AllIn(ctx.stack))
            } else if to < minimum {
                Err(illegal(V::RaiseBelowMinimum { to, minimum }))
            } else {
                Ok(ValidatedAction::Raise(to))
            }
        }
        A::AllIn => {
            if ctx.stack == 0 {
                return Err(illegal(V::NoChips));
            }
            if ctx.all_in_to() > ctx.current_bet && !ctx.can_raise {
                return Err(illegal(V::RaiseNotReopened));
            }
            Ok(ValidatedAction::AllIn(ctx.stack))
        }
    }
}

/// The menu of legal actions for the player to act, used by providers and
/// front ends to pre-filter choices before they reach the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalActions {
    pub can_check: bool,
    /// Chips a call would add (capped at the stack)
    pub call: Option<u32>,
    /// Inclusive bet amount range
    pub bet: Option<(u32, u32)>,
    /// Inclusive raise-to range (total street stake)
    pub raise: Option<(u32, u32)>,
    /// Chips an all-in would add, when allowed
    pub all_in: Option<u32>,
}

impl LegalActions {
    pub fn from_context(ctx: &BetContext) -> Self {
        let to_call = ctx.to_call();
        let shove_to = ctx.all_in_to();
        let call = (to_call > 0).then(|| to_call.min(ctx.stack));
        let bet = (ctx.current_bet == 0 && ctx.stack > 0)
            .then(|| (ctx.big_blind.min(ctx.stack), ctx.stack));
        let raise = (ctx.current_bet > 0 && ctx.can_raise && shove_to > ctx.current_bet)
            .then(|| ((ctx.current_bet + ctx.min_raise).min(shove_to), shove_to));
        let all_in = (ctx.stack > 0 && (shove_to <= ctx.current_bet || ctx.can_raise))
            .then_some(ctx.stack);
        Self {
            can_check: to_call == 0,
            call,
            bet,
            raise,
            all_in,
        }
    }

    /// Whether `action` would pass [`validate_action`] in the same context.
    pub fn allows(&self, action: A) -> bool {
        match action {
            A::Fold => true,
            A::Check => self.can_check,
            A::Call => self.call.is_some(),
            A::Bet(x) => self.bet.is_some_and(|(lo, hi)| x >= lo && x <= hi),
            A::Raise(x) => self.raise.is_some_and(|(lo, hi)| x >= lo && x <= hi),
            A::AllIn => self.all_in.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(stack: u32, stake: u32, current_bet: u32) -> BetContext {
        BetContext {
            seat: 1,
            stack,
            stake,
            current_bet,
            min_raise: 20,
            big_blind: 20,
            can_raise: true,
        }
    }

    #[test]
    fn legal_menu_matches_validation() {
        let samples = [
            ctx(100, 0, 0),
            ctx(100, 0, 20),
            ctx(15, 0, 20),
            ctx(100, 20, 20),
            ctx(30, 10, 40),
            BetContext {
                can_raise: false,
                ..ctx(500, 20, 60)
            },
        ];
        let actions = [
            A::Fold,
            A::Check,
            A::Call,
            A::Bet(10),
            A::Bet(20),
            A::Bet(100),
            A::Raise(40),
            A::Raise(50),
            A::Raise(100),
            A::Raise(120),
            A::AllIn,
        ];
        for c in samples.iter() {
            let menu = LegalActions::from_context(c);
            for &a in actions.iter() {
                assert_eq!(
                    menu.allows(a),
                    validate_action(c, a).is_ok(),
                    "{:?} in {:?}",
                    a,
                    c
                );
            }
        }
    }

    #[test]
    fn short_bet_is_an_all_in() {
        assert_eq!(
            validate_action(&ctx(12, 0, 0), A::Bet(12)),
            Ok(ValidatedAction::AllIn(12))
        );
    }

    #[test]
    fn capped_player_may_call_but_not_raise() {
        let c = BetContext {
            can_raise: false,
            ..ctx(500, 20, 60)
        };
        assert_eq!(validate_action(&c, A::Call), Ok(ValidatedAction::Call(40)));
        assert!(matches!(
            validate_action(&c, A::Raise(200)),
            Err(GameError::IllegalAction {
                reason: V::RaiseNotReopened,
                ..
            })
        ));
    }
}
