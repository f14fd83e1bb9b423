use std::collections::VecDeque;

use crate::AIOpponent;
use holdem_engine::engine::ActionProvider;
use holdem_engine::game::TableView;
use holdem_engine::player::PlayerAction;

/// Replays a fixed list of actions, then checks when it can and folds
/// otherwise. Used for reproducible scenarios.
///
/// Queued actions are passed through unchanged, so a script can also be
/// used to drive the engine into its error paths.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAI {
    queue: VecDeque<PlayerAction>,
}

impl ScriptedAI {
    pub fn new<I: IntoIterator<Item = PlayerAction>>(actions: I) -> Self {
        Self {
            queue: actions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, action: PlayerAction) {
        self.queue.push_back(action);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ActionProvider for ScriptedAI {
    fn get_action(&mut self, view: &TableView) -> PlayerAction {
        self.queue.pop_front().unwrap_or(if view.legal.can_check {
            PlayerAction::Check
        } else {
            PlayerAction::Fold
        })
    }
}

impl AIOpponent for ScriptedAI {
    fn name(&self) -> &str {
        "ScriptedAI"
    }
}
