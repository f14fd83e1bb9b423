//! # holdem-engine: Texas Hold'em Rules Engine
//!
//! A deterministic, synchronous Texas Hold'em engine for 2 to 22 seats.
//! Enforces betting-round rules, evaluates 5 to 7 card hands, builds main and
//! side pots and settles them at showdown. Presentation, decision making and
//! storage stay outside: the engine asks an [`engine::ActionProvider`] for
//! each decision and reports what happens to an [`events::Notifier`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded ChaCha20 deck shuffling and drawing
//! - [`hand`] - Best-of-seven hand evaluation and comparison
//! - [`player`] - Player state, actions, and stack management
//! - [`pot`] - Contributions, side pot construction and settlement
//! - [`rules`] - Action validation and the legal-action menu
//! - [`betting`] - Per-street betting state machine
//! - [`game`] - One hand of play and the no-hand/in-progress state
//! - [`engine`] - Table orchestration across hands
//! - [`events`] - Notifier events
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`config`] - Table configuration
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, HandRank};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate(&cards).unwrap();
//! assert_eq!(strength.rank, HandRank::StraightFlush);
//! assert_eq!(strength.describe(), "Royal Flush");
//! ```
//!
//! ## Deterministic Gameplay
//!
//! A table seeded through [`config::TableConfig::with_seed`] deals the same
//! cards every run:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.draw_n(5).unwrap(), b.draw_n(5).unwrap());
//! ```

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
