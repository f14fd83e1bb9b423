use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// A 52-card deck with a draw pointer and its own seeded RNG.
///
/// Cards are never removed from the backing vector; drawing only advances
/// the pointer, so no card can be drawn twice until [`Deck::shuffle`] or
/// [`Deck::reset`] rewinds it.
///
/// # Examples
///
/// ```
/// use holdem_engine::deck::Deck;
///
/// let mut deck = Deck::new_with_seed(42);
/// deck.shuffle();
/// let hole = deck.draw_n(2).unwrap();
/// assert_eq!(hole.len(), 2);
/// assert_eq!(deck.remaining(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Unshuffled deck seeded from OS entropy.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = self
            .cards
            .get(self.position)
            .copied()
            .ok_or(GameError::EmptyDeck {
                requested: 1,
                remaining: 0,
            })?;
        self.position += 1;
        Ok(c)
    }

    /// Draws exactly `n` cards or none at all.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::EmptyDeck {
                requested: n,
                remaining,
            });
        }
        let out = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(out)
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw().map(|_| ())
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
