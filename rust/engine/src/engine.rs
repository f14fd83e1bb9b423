use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn};

use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::Notifier;
use crate::game::{GameState, HandState, HandSummary, Progress, TableView};
use crate::player::{Player, PlayerAction};
use crate::rules::LegalActions;

/// Most seats a single deck can serve (2 hole cards each plus 5 board
/// cards and 3 burns).
pub const MAX_SEATS: usize = 22;

/// Decides actions for one seat. Implementations may block (a human at a
/// terminal); the engine only asks the seat that is owed an action.
pub trait ActionProvider {
    fn get_action(&mut self, view: &TableView) -> PlayerAction;
}

impl<T: ActionProvider + ?Sized> ActionProvider for Box<T> {
    fn get_action(&mut self, view: &TableView) -> PlayerAction {
        (**self).get_action(view)
    }
}

/// Core game engine: a table of players that plays hands one at a time.
/// Holds the configuration, the seats and the dealer button between hands.
///
/// # Examples
///
/// ```
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::engine::{ActionProvider, Table};
/// use holdem_engine::events::NullNotifier;
/// use holdem_engine::game::TableView;
/// use holdem_engine::player::PlayerAction;
///
/// struct CheckOrCall;
/// impl ActionProvider for CheckOrCall {
///     fn get_action(&mut self, view: &TableView) -> PlayerAction {
///         if view.legal.can_check { PlayerAction::Check } else { PlayerAction::Call }
///     }
/// }
///
/// let cfg = TableConfig::new(5, 10, 500).with_seed(12345);
/// let mut table = Table::new(cfg, ["alice", "bob", "carol"]).unwrap();
/// let mut seats = [CheckOrCall, CheckOrCall, CheckOrCall];
/// let summary = table.play_hand(&mut seats, &mut NullNotifier).unwrap();
/// assert_eq!(summary.board.len(), 5);
/// assert_eq!(table.total_chips(), 1500);
/// ```
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    /// Seats between hands; empty while a hand holds the players
    seats: Vec<Player>,
    button: Option<usize>,
    hand_no: u64,
    rng: ChaCha20Rng,
    state: GameState,
}

impl Table {
    /// Seats one player per id with the configured starting stack.
    pub fn new<I, S>(config: TableConfig, ids: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players = ids
            .into_iter()
            .map(|id| Player::new(id, config.starting_stack))
            .collect();
        Self::with_players(config, players)
    }

    /// Seats existing players, e.g. with stacks restored from storage.
    pub fn with_players(config: TableConfig, players: Vec<Player>) -> Result<Self, GameError> {
        config.validate()?;
        if players.len() < 2 {
            return Err(GameError::NotEnoughPlayers(players.len()));
        }
        if players.len() > MAX_SEATS {
            return Err(GameError::InvalidConfig(format!(
                "at most {MAX_SEATS} seats, got {}",
                players.len()
            )));
        }
        let rng = ChaCha20Rng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Ok(Self {
            config,
            seats: players,
            button: None,
            hand_no: 0,
            rng,
            state: GameState::NoHand,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn button(&self) -> Option<usize> {
        self.button
    }
    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Players in seat order, wherever they currently live.
    pub fn players(&self) -> &[Player] {
        match &self.state {
            GameState::InProgress(hand) => hand.players(),
            GameState::NoHand => &self.seats,
        }
    }

    pub fn total_chips(&self) -> u32 {
        let stacks: u32 = self.players().iter().map(|p| p.stack()).sum();
        let in_pot = match &self.state {
            GameState::InProgress(hand) => hand.pot().total(),
            GameState::NoHand => 0,
        };
        stacks + in_pot
    }

    /// At most one player still has chips.
    pub fn is_game_over(&self) -> bool {
        !self.state.is_in_progress() && self.seats.iter().filter(|p| p.stack() > 0).count() <= 1
    }

    /// Next button: the first seat holding chips after the previous one.
    fn next_button(&self) -> Option<usize> {
        let n = self.seats.len();
        let start = self.button.map(|b| b + 1).unwrap_or(0);
        (0..n)
            .map(|i| (start + i) % n)
            .find(|&s| self.seats[s].stack() > 0)
    }

    /// Moves the button, shuffles a fresh deck and starts the next hand.
    ///
    /// Returns the summary right away when no decision is needed (the blinds
    /// put every player all-in).
    pub fn start_hand(
        &mut self,
        notifier: &mut dyn Notifier,
    ) -> Result<Option<HandSummary>, GameError> {
        if self.state.is_in_progress() {
            return Err(GameError::HandInProgress);
        }
        let with_chips = self.seats.iter().filter(|p| p.stack() > 0).count();
        let button = match self.next_button() {
            Some(b) if with_chips >= 2 => b,
            _ => return Err(GameError::NotEnoughPlayers(with_chips)),
        };
        let seed: u64 = self.rng.random();
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let hand_no = self.hand_no + 1;
        let mut hand = HandState::start(
            &self.config,
            hand_no,
            button,
            &mut self.seats,
            deck,
            seed,
            notifier,
        )?;
        self.hand_no = hand_no;
        self.button = Some(button);

        if hand.current_player().is_none() {
            let summary = hand.finish(notifier)?;
            self.seats = hand.into_players();
            return Ok(Some(summary));
        }
        self.state = GameState::InProgress(Box::new(hand));
        Ok(None)
    }

    /// Seat owed the next action.
    pub fn current_player(&self) -> Result<Option<usize>, GameError> {
        Ok(self.state.hand()?.current_player())
    }

    pub fn legal_actions(&self) -> Result<LegalActions, GameError> {
        self.state.hand()?.legal_actions()
    }

    pub fn view(&self, seat: usize) -> Result<TableView, GameError> {
        Ok(self.state.hand()?.view(seat))
    }

    /// Applies one action. Returns the summary when it finished the hand.
    pub fn apply_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
        notifier: &mut dyn Notifier,
    ) -> Result<Option<HandSummary>, GameError> {
        let progress = self.state.hand_mut()?.apply_action(seat, action, notifier)?;
        match progress {
            Progress::NextToAct(_) => Ok(None),
            Progress::Complete(summary) => {
                if let GameState::InProgress(hand) = std::mem::take(&mut self.state) {
                    self.seats = hand.into_players();
                }
                Ok(Some(summary))
            }
        }
    }

    /// Plays a whole hand, asking `providers[seat]` for every decision.
    ///
    /// An action the engine rejects is returned as an error and the hand
    /// stays in progress; providers are expected to pick from
    /// [`TableView::legal`].
    pub fn play_hand<P: ActionProvider>(
        &mut self,
        providers: &mut [P],
        notifier: &mut dyn Notifier,
    ) -> Result<HandSummary, GameError> {
        if providers.len() != self.players().len() {
            return Err(GameError::InvalidConfig(format!(
                "{} providers for {} seats",
                providers.len(),
                self.players().len()
            )));
        }
        if let Some(summary) = self.start_hand(notifier)? {
            return Ok(summary);
        }
        loop {
            let hand = self.state.hand()?;
            let Some(seat) = hand.current_player() else {
                return Err(GameError::NoHandInProgress);
            };
            let view = hand.view(seat);
            let action = providers[seat].get_action(&view);
            match self.apply_action(seat, action, notifier) {
                Ok(Some(summary)) => {
                    info!(
                        hand_no = summary.hand_no,
                        winners = ?summary.winners(),
                        pot = summary.pot_total(),
                        "hand played"
                    );
                    return Ok(summary);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(seat, ?action, error = %e, "provider chose an illegal action");
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullNotifier;

    struct Folder;
    impl ActionProvider for Folder {
        fn get_action(&mut self, view: &TableView) -> PlayerAction {
            if view.legal.can_check {
                PlayerAction::Check
            } else {
                PlayerAction::Fold
            }
        }
    }

    #[test]
    fn button_rotates_over_seats_with_chips() {
        let cfg = TableConfig::new(1, 2, 100).with_seed(7);
        let mut t = Table::new(cfg, ["a", "b", "c"]).unwrap();
        let mut p = [Folder, Folder, Folder];
        t.play_hand(&mut p, &mut NullNotifier).unwrap();
        assert_eq!(t.button(), Some(0));
        t.play_hand(&mut p, &mut NullNotifier).unwrap();
        assert_eq!(t.button(), Some(1));
        assert_eq!(t.total_chips(), 300);
    }

    #[test]
    fn starting_twice_is_an_error() {
        let cfg = TableConfig::new(1, 2, 100).with_seed(7);
        let mut t = Table::new(cfg, ["a", "b"]).unwrap();
        t.start_hand(&mut NullNotifier).unwrap();
        assert_eq!(
            t.start_hand(&mut NullNotifier).unwrap_err(),
            GameError::HandInProgress
        );
    }

    #[test]
    fn actions_without_a_hand_fail() {
        let cfg = TableConfig::default();
        let mut t = Table::new(cfg, ["a", "b"]).unwrap();
        assert_eq!(
            t.apply_action(0, PlayerAction::Check, &mut NullNotifier)
                .unwrap_err(),
            GameError::NoHandInProgress
        );
    }
}
