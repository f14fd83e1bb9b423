//! # holdem-ai: AI Opponents for Texas Hold'em
//!
//! Action providers that need no I/O. Each one implements the engine's
//! [`ActionProvider`] and can be seated at a
//! [`holdem_engine::engine::Table`] directly.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait for named AI players
//! - [`baseline`] - Rule-based AI with aggression, bluffing and position play
//! - [`scripted`] - Replays a fixed action list
//! - [`create_ai`] - Factory building an AI from an [`AiKind`]
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{create_ai, AiKind};
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::engine::Table;
//! use holdem_engine::events::NullNotifier;
//!
//! let cfg = TableConfig::new(5, 10, 1000).with_seed(42);
//! let mut table = Table::new(cfg, ["a", "b", "c"]).unwrap();
//! let mut seats: Vec<_> = (0..3)
//!     .map(|i| create_ai(&"baseline".parse::<AiKind>().unwrap(), Some(i)))
//!     .collect();
//! let summary = table.play_hand(&mut seats, &mut NullNotifier).unwrap();
//! assert_eq!(summary.stacks.iter().sum::<u32>(), 3000);
//! ```

use std::fmt;
use std::str::FromStr;

use holdem_engine::engine::ActionProvider;
use holdem_engine::player::PlayerAction;

pub mod baseline;
pub mod scripted;

use baseline::{BaselineAI, BaselineConfig};
use scripted::ScriptedAI;

/// An action provider with a display name.
pub trait AIOpponent: ActionProvider + Send {
    /// Return the name/identifier of this AI implementation.
    fn name(&self) -> &str;
}

/// Which AI to build.
#[derive(Debug, Clone, PartialEq)]
pub enum AiKind {
    Baseline(BaselineConfig),
    Scripted(Vec<PlayerAction>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAiKind(pub String);

impl fmt::Display for UnknownAiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown AI type: {} (expected baseline or scripted)", self.0)
    }
}

impl std::error::Error for UnknownAiKind {}

impl FromStr for AiKind {
    type Err = UnknownAiKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" | "basic" => Ok(AiKind::Baseline(BaselineConfig::default())),
            "scripted" => Ok(AiKind::Scripted(Vec::new())),
            other => Err(UnknownAiKind(other.to_string())),
        }
    }
}

/// Builds an AI. `seed` makes the baseline AI's random choices reproducible.
///
/// ```rust
/// use holdem_ai::{create_ai, AiKind};
/// use holdem_ai::baseline::BaselineConfig;
///
/// let ai = create_ai(&AiKind::Baseline(BaselineConfig::default()), Some(7));
/// assert_eq!(ai.name(), "BaselineAI");
/// ```
pub fn create_ai(kind: &AiKind, seed: Option<u64>) -> Box<dyn AIOpponent> {
    match kind {
        AiKind::Baseline(cfg) => match seed {
            Some(seed) => Box::new(BaselineAI::with_seed(*cfg, seed)),
            None => Box::new(BaselineAI::new(*cfg)),
        },
        AiKind::Scripted(actions) => Box::new(ScriptedAI::new(actions.iter().copied())),
    }
}
