use serde::{Deserialize, Serialize};

use crate::betting::Street;
use crate::cards::Card;
use crate::hand::HandRank;
use crate::rules::ValidatedAction;

/// State changes reported by the engine while a hand is played.
///
/// Hole cards are reported per seat; a front end decides which of them it
/// may show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    HandStarted {
        hand_no: u64,
        button: usize,
        seats: Vec<usize>,
    },
    BlindPosted {
        seat: usize,
        amount: u32,
        big: bool,
    },
    HoleCardsDealt {
        seat: usize,
        cards: Vec<Card>,
    },
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },
    ActionTaken {
        seat: usize,
        street: Street,
        action: ValidatedAction,
        stack_after: u32,
    },
    StreetComplete {
        street: Street,
        pot: u32,
    },
    Showdown {
        seat: usize,
        cards: Vec<Card>,
        rank: HandRank,
        description: String,
    },
    PotAwarded {
        pot_index: usize,
        seat: usize,
        amount: u32,
    },
    HandComplete {
        hand_no: u64,
        stacks: Vec<u32>,
    },
}

/// Receives engine events. Calls are best effort: a notifier cannot fail or
/// influence the hand.
pub trait Notifier {
    fn notify(&mut self, event: &GameEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Collects events in order; handy for tests and hand histories.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Notifier for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

impl<F: FnMut(&GameEvent)> Notifier for F {
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}
