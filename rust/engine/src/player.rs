use crate::cards::Card;
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// Where a player stands in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlayerStatus {
    /// Still in the hand and able to act
    Active,
    /// Gave up the hand; never eligible for any pot
    Folded,
    /// Every chip is committed; stays eligible but takes no more actions
    AllIn,
    /// Not dealt into this hand (no chips, or seated out)
    SittingOut,
}

/// Represents a player action during a betting round.
/// `Bet` carries the amount wagered, `Raise` the new total stake for the street.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet, or as much of it as the stack covers
    Call,
    /// Open the betting for the street with the given amount
    Bet(u32),
    /// Raise so the player's total stake this street becomes the given amount
    Raise(u32),
    /// Commit every remaining chip
    AllIn,
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 1_000;

/// Engine view of a seated player: chips, hole cards, and what they have
/// put into the current street and the whole hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier chosen by the caller (persistence key)
    id: String,
    /// Current chip stack
    stack: u32,
    /// Hole cards, empty between hands
    hole: Vec<Card>,
    /// Chips put in during the current street
    street_stake: u32,
    /// Chips put in during the whole hand
    hand_contribution: u32,
    status: PlayerStatus,
}

impl Player {
    pub fn new(id: impl Into<String>, stack: u32) -> Self {
        Self {
            id: id.into(),
            stack,
            hole: Vec::with_capacity(2),
            street_stake: 0,
            hand_contribution: 0,
            status: PlayerStatus::SittingOut,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn status(&self) -> PlayerStatus {
        self.status
    }
    pub fn street_stake(&self) -> u32 {
        self.street_stake
    }
    pub fn hand_contribution(&self) -> u32 {
        self.hand_contribution
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub(crate) fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    /// Resets per-hand state. Players without chips sit the hand out.
    pub fn begin_hand(&mut self) {
        self.hole.clear();
        self.street_stake = 0;
        self.hand_contribution = 0;
        self.status = if self.stack > 0 {
            PlayerStatus::Active
        } else {
            PlayerStatus::SittingOut
        };
    }

    pub(crate) fn begin_street(&mut self) {
        self.street_stake = 0;
    }

    pub(crate) fn deal_hole(&mut self, cards: [Card; 2]) {
        self.hole.clear();
        self.hole.extend_from_slice(&cards);
    }

    pub(crate) fn clear_cards(&mut self) {
        self.hole.clear();
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Moves chips from the stack into this player's stake. Validates before
    /// mutating; committing the last chip marks the player all-in.
    pub(crate) fn commit(&mut self, seat: usize, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips {
                seat,
                needed: amount,
                available: self.stack,
            });
        }
        self.stack -= amount;
        self.street_stake += amount;
        self.hand_contribution += amount;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        Ok(())
    }
}
