use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::STARTING_STACK;

/// Stakes and stack settings for a table. Built once and passed by value
/// into [`crate::engine::Table`]; nothing in the engine changes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
    /// Deck seed; `None` draws one from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 5,
            big_blind: 10,
            starting_stack: STARTING_STACK,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn new(small_blind: u32, big_blind: u32, starting_stack: u32) -> Self {
        Self {
            small_blind,
            big_blind,
            starting_stack,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig("small_blind must be > 0".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig("big_blind must be >= small_blind".into()));
        }
        if self.starting_stack < self.big_blind {
            return Err(GameError::InvalidConfig("starting_stack must cover the big blind".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_blinds() {
        let cfg = TableConfig::new(20, 10, 1000);
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_stack_below_big_blind() {
        let cfg = TableConfig::new(5, 10, 9);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_small_blind() {
        let err = TableConfig::new(0, 10, 1000).validate().unwrap_err();
        assert_eq!(err, GameError::InvalidConfig("small_blind must be > 0".into()));
    }
}
