//! Baseline AI implementation for poker gameplay.
//!
//! A rule-based opponent: hand strength on a 0.0-1.0 scale, adjusted for
//! table position and an aggression setting, an occasional bluff, and pot
//! odds when facing a bet. Every decision is finally mapped onto the legal
//! action menu, so the engine never sees an illegal action from it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::AIOpponent;
use holdem_engine::cards::{Card, Rank};
use holdem_engine::engine::ActionProvider;
use holdem_engine::game::TableView;
use holdem_engine::hand::{HandRank, evaluate_holdem};
use holdem_engine::player::PlayerAction;
use holdem_engine::rules::LegalActions;

/// Where a seat acts relative to the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Early,
    Middle,
    Late,
}

impl Position {
    /// Splits the dealt seats into thirds, counted from the first seat
    /// left of the button.
    pub fn from_view(position: usize, dealt: usize) -> Self {
        let dealt = dealt.max(1);
        if position < dealt / 3 {
            Position::Early
        } else if position < 2 * dealt / 3 {
            Position::Middle
        } else {
            Position::Late
        }
    }

    fn modifier(self) -> f32 {
        match self {
            Position::Early => -0.1,
            Position::Middle => 0.0,
            Position::Late => 0.1,
        }
    }
}

/// Tunable parameters of [`BaselineAI`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineConfig {
    /// 0.0 plays tight, 1.0 plays loose and raises more
    pub aggression: f32,
    /// Chance per decision of playing a weak hand as a strong one
    pub bluff_factor: f32,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            aggression: 0.5,
            bluff_factor: 0.2,
        }
    }
}

impl BaselineConfig {
    pub fn new(aggression: f32, bluff_factor: f32) -> Self {
        Self {
            aggression: aggression.clamp(0.0, 1.0),
            bluff_factor: bluff_factor.clamp(0.0, 1.0),
        }
    }
}

/// Simple rule-based opponent.
///
/// # Strategy
///
/// **Preflop:** pairs score from 0.5 (deuces) to 1.0 (aces); other hands
/// score on the high card, with bonuses for connected and suited cards.
///
/// **Postflop:** the made hand category, discounted while board cards are
/// still to come.
///
/// Strong hands bet and raise (with an occasional slow play), medium hands
/// call when the price is right, weak hands check or fold.
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::{BaselineAI, BaselineConfig};
/// use holdem_ai::AIOpponent;
///
/// let ai = BaselineAI::with_seed(BaselineConfig::default(), 42);
/// assert_eq!(ai.name(), "BaselineAI");
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI {
    config: BaselineConfig,
    rng: ChaCha20Rng,
}

impl BaselineAI {
    pub fn new(config: BaselineConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    pub fn with_seed(config: BaselineConfig, seed: u64) -> Self {
        Self {
            config,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> BaselineConfig {
        self.config
    }

    /// Preflop strength of two hole cards, 0.0-1.0.
    pub fn evaluate_preflop_strength(hole_cards: [Card; 2]) -> f32 {
        let r1 = hole_cards[0].rank.value();
        let r2 = hole_cards[1].rank.value();
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };

        if high == low {
            return 0.5 + f32::from(high - 2) / 24.0;
        }

        let mut value = f32::from(high - 2) / 12.0 * 0.5;
        match high - low {
            1 => value += 0.1,
            2 => value += 0.05,
            _ => {}
        }
        if hole_cards[0].suit == hole_cards[1].suit {
            value += 0.2;
        }
        value.clamp(0.1, 0.85)
    }

    /// Postflop strength from the made hand, or `None` before the flop.
    pub fn evaluate_postflop_strength(hole_cards: &[Card], board: &[Card]) -> Option<f32> {
        if board.len() < 3 {
            return None;
        }
        let hs = evaluate_holdem(hole_cards, board).ok()?;
        let base = match hs.rank {
            HandRank::HighCard => 0.1,
            HandRank::Pair => 0.2,
            HandRank::TwoPair => 0.4,
            HandRank::ThreeOfAKind => 0.6,
            HandRank::Straight => 0.7,
            HandRank::Flush => 0.8,
            HandRank::FullHouse => 0.9,
            HandRank::FourOfAKind => 0.95,
            HandRank::StraightFlush if hs.kickers[0] == Rank::Ace.value() => 1.0,
            HandRank::StraightFlush => 0.98,
        };
        // more of the board out means more certainty
        let certainty = board.len() as f32 / 5.0;
        Some(base * certainty + base * (1.0 - certainty) * 0.8)
    }

    /// Share of the final pot a call pays for.
    pub fn calculate_pot_odds(pot_size: u32, call_amount: u32) -> f32 {
        if call_amount == 0 {
            return 0.0;
        }
        call_amount as f32 / (pot_size + call_amount) as f32
    }

    fn hand_strength(view: &TableView) -> f32 {
        match view.hole.as_slice() {
            [a, b] => Self::evaluate_postflop_strength(&view.hole, &view.board)
                .unwrap_or_else(|| Self::evaluate_preflop_strength([*a, *b])),
            _ => 0.0,
        }
    }

    fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn decide_action(&mut self, view: &TableView, adjusted: f32, bluffing: bool) -> PlayerAction {
        let pot = view.pot.max(1);
        if view.to_call == 0 {
            return self.decide_no_bet_action(view, adjusted);
        }
        let price = Self::calculate_pot_odds(pot, view.to_call);

        if adjusted > 0.8 {
            let to = (view.current_bet as f32 * 2.5 + self.roll() * pot as f32 * 0.2) as u32;
            let shove_to = view.current_bet - view.to_call + view.stack();
            if to >= shove_to {
                return PlayerAction::AllIn;
            }
            PlayerAction::Raise(to)
        } else if adjusted > 0.5 {
            if price < 0.17 || bluffing {
                if self.roll() < 0.3 {
                    return PlayerAction::Raise((view.current_bet as f32 * 1.5) as u32);
                }
                PlayerAction::Call
            } else {
                PlayerAction::Fold
            }
        } else if adjusted > 0.3 {
            if price < 0.09 || bluffing {
                PlayerAction::Call
            } else {
                PlayerAction::Fold
            }
        } else if price < 0.05 && bluffing {
            PlayerAction::Call
        } else {
            PlayerAction::Fold
        }
    }

    fn decide_no_bet_action(&mut self, view: &TableView, adjusted: f32) -> PlayerAction {
        let pot = view.pot.max(view.big_blind) as f32;
        if adjusted > 0.8 {
            // slow play now and then
            if self.roll() < 0.3 {
                PlayerAction::Check
            } else {
                PlayerAction::Bet((pot * (0.5 + self.roll() * 0.5)) as u32)
            }
        } else if adjusted > 0.5 {
            if self.roll() < 0.7 {
                PlayerAction::Check
            } else {
                PlayerAction::Bet((pot * 0.5) as u32)
            }
        } else if adjusted <= 0.3
            && Position::from_view(view.position, view.dealt) == Position::Late
            && self.roll() < 0.1
        {
            PlayerAction::Bet((pot * 0.3) as u32)
        } else {
            PlayerAction::Check
        }
    }
}

/// Maps a desired action onto the closest legal one.
///
/// Amounts are clamped into the legal range, a bet becomes a raise (and the
/// other way round) when only that is open, and folding is never chosen
/// when checking is free.
pub fn legalize(action: PlayerAction, legal: &LegalActions) -> PlayerAction {
    let passive = || {
        if legal.can_check {
            PlayerAction::Check
        } else {
            PlayerAction::Fold
        }
    };
    let sized = |amount: u32| match (legal.bet, legal.raise) {
        (Some((lo, hi)), _) => Some(PlayerAction::Bet(amount.clamp(lo, hi))),
        (None, Some((lo, hi))) => Some(PlayerAction::Raise(amount.clamp(lo, hi))),
        (None, None) => None,
    };
    let chosen = match action {
        PlayerAction::Fold => passive(),
        PlayerAction::Check => passive(),
        PlayerAction::Call if legal.call.is_some() => PlayerAction::Call,
        PlayerAction::Call => passive(),
        PlayerAction::Bet(x) | PlayerAction::Raise(x) => sized(x)
            .or(legal.call.map(|_| PlayerAction::Call))
            .unwrap_or_else(passive),
        PlayerAction::AllIn if legal.all_in.is_some() => PlayerAction::AllIn,
        PlayerAction::AllIn => legal
            .call
            .map(|_| PlayerAction::Call)
            .unwrap_or_else(passive),
    };
    if legal.allows(chosen) { chosen } else { passive() }
}

impl ActionProvider for BaselineAI {
    fn get_action(&mut self, view: &TableView) -> PlayerAction {
        let strength = Self::hand_strength(view);
        let bluffing = self.roll() < self.config.bluff_factor;
        let strength = if bluffing && strength < 0.5 { 0.8 } else { strength };
        let position = Position::from_view(view.position, view.dealt);
        let adjusted = strength + position.modifier() + (self.config.aggression - 0.5) * 0.3;

        let wanted = self.decide_action(view, adjusted, bluffing);
        let action = legalize(wanted, &view.legal);
        debug!(
            seat = view.seat,
            street = %view.street,
            strength,
            adjusted,
            bluffing,
            ?position,
            ?action,
            "baseline decision"
        );
        action
    }
}

impl AIOpponent for BaselineAI {
    fn name(&self) -> &str {
        "BaselineAI"
    }
}
