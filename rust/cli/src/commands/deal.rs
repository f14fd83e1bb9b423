//! Deal command: shuffle once, deal every seat and a full board.
//!
//! Cards come off the deck the way a dealer pulls them: one card per seat
//! in two passes, then burn and flop, burn and turn, burn and river. Each
//! seat's best hand on the finished board is shown next to its cards.

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::hand::evaluate_holdem;
use std::io::Write;

use crate::error::CliError;
use crate::formatters::{format_board, format_cards};
use crate::validation::validate_players;

pub fn handle_deal_command(
    players: usize,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let players = validate_players(players).map_err(CliError::InvalidInput)?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    let mut holes: Vec<Vec<Card>> = vec![Vec::with_capacity(2); players];
    for _ in 0..2 {
        for hole in holes.iter_mut() {
            hole.push(deck.draw()?);
        }
    }
    let mut board = Vec::with_capacity(5);
    for count in [3, 1, 1] {
        deck.burn()?;
        board.extend(deck.draw_n(count)?);
    }

    writeln!(out, "deal: players={} seed={}", players, seed)?;
    for (seat, hole) in holes.iter().enumerate() {
        let best = evaluate_holdem(hole, &board)?;
        writeln!(
            out,
            "Seat {}: {}  ({})",
            seat + 1,
            format_cards(hole),
            best.describe()
        )?;
    }
    writeln!(out, "Board: {}", format_board(&board))?;
    Ok(())
}
