//! One hand of play: blinds, dealing, four betting streets, showdown.
//!
//! A [`HandState`] owns the players, deck, board and pots from the moment the
//! hand starts until it completes; [`GameState`] makes "is a hand running?"
//! explicit at the type level.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::betting::{seats_from, BettingRound, RoundStatus, Street};
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{GameEvent, Notifier};
use crate::hand::evaluate_holdem;
use crate::logger::{ActionRecord, ShownHand};
use crate::player::{Player, PlayerAction, PlayerStatus};
use crate::pot::{settle, Payout, Pot, PotManager};
use crate::rules::LegalActions;

/// Public view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub id: String,
    pub stack: u32,
    pub street_stake: u32,
    pub status: PlayerStatus,
}

/// What a player may know when asked to act: public table state plus their
/// own hole cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub hand_no: u64,
    pub seat: usize,
    pub street: Street,
    pub button: usize,
    pub hole: Vec<Card>,
    pub board: Vec<Card>,
    /// Everything put in this hand, current street included
    pub pot: u32,
    pub current_bet: u32,
    pub to_call: u32,
    pub min_raise: u32,
    pub big_blind: u32,
    pub legal: LegalActions,
    pub seats: Vec<SeatView>,
    /// Players dealt into the hand
    pub dealt: usize,
    /// 0 for the first seat left of the button, `dealt - 1` for the button
    pub position: usize,
}

impl TableView {
    pub fn stack(&self) -> u32 {
        self.seats.get(self.seat).map(|s| s.stack).unwrap_or(0)
    }
}

/// Result of a finished hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSummary {
    pub hand_no: u64,
    pub seed: u64,
    pub button: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub board: Vec<Card>,
    pub actions: Vec<ActionRecord>,
    pub pots: Vec<Pot>,
    pub payouts: Vec<Payout>,
    /// Empty when the hand ended before showdown
    pub showdown: Vec<ShownHand>,
    /// Stacks after payouts, by seat
    pub stacks: Vec<u32>,
}

impl HandSummary {
    /// Seats that won chips, ascending.
    pub fn winners(&self) -> Vec<usize> {
        let mut seats: Vec<usize> = self.payouts.iter().map(|p| p.seat).collect();
        seats.sort_unstable();
        seats.dedup();
        seats
    }

    pub fn won_by(&self, seat: usize) -> u32 {
        self.payouts
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.amount)
            .sum()
    }

    pub fn pot_total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }
}

/// Outcome of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The hand continues with this seat to act
    NextToAct(usize),
    Complete(HandSummary),
}

/// Either no hand is running or one is, with all of its state.
#[derive(Debug, Default)]
pub enum GameState {
    #[default]
    NoHand,
    InProgress(Box<HandState>),
}

impl GameState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, GameState::InProgress(_))
    }

    pub fn hand(&self) -> Result<&HandState, GameError> {
        match self {
            GameState::InProgress(h) => Ok(h),
            GameState::NoHand => Err(GameError::NoHandInProgress),
        }
    }

    pub fn hand_mut(&mut self) -> Result<&mut HandState, GameError> {
        match self {
            GameState::InProgress(h) => Ok(h),
            GameState::NoHand => Err(GameError::NoHandInProgress),
        }
    }
}

#[derive(Debug)]
pub struct HandState {
    hand_no: u64,
    seed: u64,
    small_blind: u32,
    big_blind: u32,
    button: usize,
    players: Vec<Player>,
    deck: Deck,
    board: Vec<Card>,
    pot: PotManager,
    round: BettingRound,
    actions: Vec<ActionRecord>,
    /// Dealt seats in order from the first seat left of the button
    dealt: Vec<usize>,
    settled: bool,
}

impl HandState {
    /// Starts a hand: deals hole cards, posts blinds and opens pre-flop betting.
    ///
    /// The players are taken out of `seats` only once the hand can start;
    /// on error `seats` is left untouched. `deck` must be shuffled.
    pub fn start(
        config: &TableConfig,
        hand_no: u64,
        button: usize,
        seats: &mut Vec<Player>,
        mut deck: Deck,
        seed: u64,
        notifier: &mut dyn Notifier,
    ) -> Result<Self, GameError> {
        let n = seats.len();
        let with_chips = seats.iter().filter(|p| p.stack() > 0).count();
        if with_chips < 2 {
            return Err(GameError::NotEnoughPlayers(with_chips));
        }
        if button >= n || seats[button].stack() == 0 {
            return Err(GameError::InvalidConfig(format!(
                "button seat {button} has no chips"
            )));
        }
        let dealt: Vec<usize> = seats_from(button + 1, n)
            .filter(|&s| seats[s].stack() > 0)
            .collect();
        let hole = deck.draw_n(dealt.len() * 2)?;

        let mut players = std::mem::take(seats);
        for p in players.iter_mut() {
            p.begin_hand();
        }
        let k = dealt.len();
        for (i, &seat) in dealt.iter().enumerate() {
            players[seat].deal_hole([hole[i], hole[i + k]]);
        }

        // heads-up the button posts the small blind
        let (sb_seat, bb_seat) = if k == 2 {
            (button, dealt[0])
        } else {
            (dealt[0], dealt[1])
        };
        info!(hand_no, button, players = k, "hand started");
        notifier.notify(&GameEvent::HandStarted {
            hand_no,
            button,
            seats: dealt.clone(),
        });

        let mut pot = PotManager::new(n);
        for (seat, blind, big) in [
            (sb_seat, config.small_blind, false),
            (bb_seat, config.big_blind, true),
        ] {
            let amount = blind.min(players[seat].stack());
            pot.contribute(seat, &mut players[seat], amount)?;
            debug!(seat, amount, big, "blind posted");
            notifier.notify(&GameEvent::BlindPosted { seat, amount, big });
        }
        for &seat in &dealt {
            notifier.notify(&GameEvent::HoleCardsDealt {
                seat,
                cards: players[seat].hole_cards().to_vec(),
            });
        }

        let first = if k == 2 { button } else { (bb_seat + 1) % n };
        let round = BettingRound::new(
            Street::PreFlop,
            &players,
            first,
            config.big_blind,
            config.big_blind,
        );
        let mut hand = Self {
            hand_no,
            seed,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            button,
            players,
            deck,
            board: Vec::with_capacity(5),
            pot,
            round,
            actions: Vec::new(),
            dealt,
            settled: false,
        };
        if hand.round.is_complete() {
            // blinds put everyone all-in, or nobody is left to act
            if let Err(e) = hand.run_streets(notifier) {
                *seats = hand.abort();
                return Err(e);
            }
        }
        Ok(hand)
    }

    pub fn hand_no(&self) -> u64 {
        self.hand_no
    }
    pub fn street(&self) -> Street {
        self.round.street()
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn pot(&self) -> &PotManager {
        &self.pot
    }
    pub fn round(&self) -> &BettingRound {
        &self.round
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Seat owed the next action; `None` once the hand is over.
    pub fn current_player(&self) -> Option<usize> {
        if self.is_over() {
            None
        } else {
            self.round.next_to_act()
        }
    }

    /// Betting is finished for good: showdown or a single contender.
    pub fn is_over(&self) -> bool {
        self.contesting() <= 1 || (self.round.is_complete() && self.street() == Street::River)
    }

    fn contesting(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    pub fn legal_actions(&self) -> Result<LegalActions, GameError> {
        let seat = self.current_player().ok_or(GameError::NoHandInProgress)?;
        Ok(self.round.legal_actions(seat, &self.players[seat]))
    }

    pub fn view(&self, seat: usize) -> TableView {
        let seats = self
            .players
            .iter()
            .map(|p| SeatView {
                id: p.id().to_string(),
                stack: p.stack(),
                street_stake: p.street_stake(),
                status: p.status(),
            })
            .collect();
        let (stake, legal) = match self.players.get(seat) {
            Some(p) => (p.street_stake(), self.round.legal_actions(seat, p)),
            None => (0, LegalActions::default()),
        };
        TableView {
            hand_no: self.hand_no,
            seat,
            street: self.street(),
            button: self.button,
            hole: self
                .players
                .get(seat)
                .map(|p| p.hole_cards().to_vec())
                .unwrap_or_default(),
            board: self.board.clone(),
            pot: self.pot.total(),
            current_bet: self.round.current_bet(),
            to_call: self.round.current_bet().saturating_sub(stake),
            min_raise: self.round.min_raise(),
            big_blind: self.big_blind,
            legal,
            seats,
            dealt: self.dealt.len(),
            position: self
                .dealt
                .iter()
                .position(|&s| s == seat)
                .unwrap_or(self.dealt.len()),
        }
    }

    /// Applies an action for `seat` and moves the hand forward as far as it
    /// goes without another decision.
    pub fn apply_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
        notifier: &mut dyn Notifier,
    ) -> Result<Progress, GameError> {
        if self.is_over() || self.settled {
            return Err(GameError::NoHandInProgress);
        }
        let street = self.street();
        let (validated, status) = self
            .round
            .apply(seat, action, &mut self.players, &mut self.pot)
            .inspect_err(|e| warn!(seat, %street, error = %e, "action rejected"))?;
        self.actions.push(ActionRecord {
            seat,
            street,
            action: validated,
        });
        notifier.notify(&GameEvent::ActionTaken {
            seat,
            street,
            action: validated,
            stack_after: self.players[seat].stack(),
        });

        match status {
            RoundStatus::Continue => {}
            RoundStatus::StreetComplete => self.run_streets(notifier)?,
            RoundStatus::EarlyEnd => {}
        }
        match self.current_player() {
            Some(next) => Ok(Progress::NextToAct(next)),
            None => Ok(Progress::Complete(self.settle(notifier))),
        }
    }

    /// Settles a hand that needs no further decisions, e.g. when the blinds
    /// put everyone all-in. Fails if betting is still open or the hand was
    /// already settled.
    pub fn finish(&mut self, notifier: &mut dyn Notifier) -> Result<HandSummary, GameError> {
        if !self.is_over() || self.settled {
            return Err(GameError::HandInProgress);
        }
        Ok(self.settle(notifier))
    }

    /// Deals streets until someone must act or the river betting is done.
    fn run_streets(&mut self, notifier: &mut dyn Notifier) -> Result<(), GameError> {
        while self.round.is_complete() && self.contesting() > 1 {
            let street = self.street();
            notifier.notify(&GameEvent::StreetComplete {
                street,
                pot: self.pot.total(),
            });
            let Some(next) = street.next() else {
                break;
            };
            self.deck.burn()?;
            let cards = self.deck.draw_n(next.board_len() - self.board.len())?;
            self.board.extend_from_slice(&cards);
            debug!(street = %next, board = ?self.board, "board dealt");
            notifier.notify(&GameEvent::BoardDealt {
                street: next,
                cards,
            });
            for p in self.players.iter_mut() {
                p.begin_street();
            }
            self.round = BettingRound::new(
                next,
                &self.players,
                (self.button + 1) % self.players.len(),
                0,
                self.big_blind,
            );
        }
        Ok(())
    }

    /// Evaluates showdown hands and pays every pot.
    fn settle(&mut self, notifier: &mut dyn Notifier) -> HandSummary {
        self.settled = true;
        let pots = self.pot.pots();
        let mut showdown = Vec::new();
        let mut hands = Vec::new();
        if self.contesting() > 1 {
            for seat in seats_from(self.button + 1, self.players.len()) {
                let p = &self.players[seat];
                if !p.in_hand() {
                    continue;
                }
                match evaluate_holdem(p.hole_cards(), &self.board) {
                    Ok(hs) => {
                        let description = hs.describe();
                        notifier.notify(&GameEvent::Showdown {
                            seat,
                            cards: p.hole_cards().to_vec(),
                            rank: hs.rank,
                            description: description.clone(),
                        });
                        showdown.push(ShownHand {
                            seat,
                            cards: p.hole_cards().to_vec(),
                            rank: hs.rank,
                            best_five: hs.best_five.to_vec(),
                            description,
                        });
                        hands.push((seat, hs));
                    }
                    Err(e) => warn!(seat, error = %e, "showdown hand not evaluated"),
                }
            }
        }

        let order: Vec<usize> = seats_from(self.button + 1, self.players.len()).collect();
        let payouts = settle(&pots, &hands, &order);
        for p in &payouts {
            self.players[p.seat].add_chips(p.amount);
            info!(seat = p.seat, amount = p.amount, pot = p.pot_index, "pot awarded");
            notifier.notify(&GameEvent::PotAwarded {
                pot_index: p.pot_index,
                seat: p.seat,
                amount: p.amount,
            });
        }
        debug_assert_eq!(
            payouts.iter().map(|p| p.amount).sum::<u32>(),
            self.pot.total()
        );

        let stacks: Vec<u32> = self.players.iter().map(|p| p.stack()).collect();
        info!(hand_no = self.hand_no, stacks = ?stacks, "hand complete");
        notifier.notify(&GameEvent::HandComplete {
            hand_no: self.hand_no,
            stacks: stacks.clone(),
        });
        HandSummary {
            hand_no: self.hand_no,
            seed: self.seed,
            button: self.button,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            board: self.board.clone(),
            actions: self.actions.clone(),
            pots,
            payouts,
            showdown,
            stacks,
        }
    }

    /// Hands the players back after the hand has been settled.
    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    /// Returns every chip put in this hand to its owner and hands the
    /// players back.
    fn abort(mut self) -> Vec<Player> {
        for (seat, p) in self.players.iter_mut().enumerate() {
            p.add_chips(self.pot.contribution(seat));
            p.clear_cards();
            p.set_status(PlayerStatus::SittingOut);
        }
        self.players
    }
}
