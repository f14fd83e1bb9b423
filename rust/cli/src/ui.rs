//! Terminal rendering for the interactive table.
//!
//! Engine events arrive through an [`holdem_engine::events::EventLog`] and
//! are printed here. Hole cards are shown only for the seat the terminal
//! belongs to, or for everyone at showdown.

use std::io::Write;

use holdem_engine::events::GameEvent;
use holdem_engine::game::TableView;

use crate::formatters::{format_applied, format_board, format_cards, format_legal};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Prints one engine event. `names` is indexed by seat; `viewer` is the
/// seat whose hole cards may be shown.
pub fn render_event(
    out: &mut dyn Write,
    event: &GameEvent,
    names: &[String],
    viewer: Option<usize>,
) -> std::io::Result<()> {
    let name = |seat: usize| names.get(seat).map(String::as_str).unwrap_or("?");
    match event {
        GameEvent::HandStarted {
            hand_no, button, ..
        } => writeln!(out, "--- Hand {} (button: {}) ---", hand_no, name(*button)),
        GameEvent::BlindPosted { seat, amount, big } => {
            let which = if *big { "big" } else { "small" };
            writeln!(out, "{} posts {} blind {}", name(*seat), which, amount)
        }
        GameEvent::HoleCardsDealt { seat, cards } if Some(*seat) == viewer => {
            writeln!(out, "Your cards: {}", format_cards(cards))
        }
        GameEvent::HoleCardsDealt { .. } => Ok(()),
        GameEvent::BoardDealt { street, cards } => {
            writeln!(out, "*** {} *** {}", street, format_board(cards))
        }
        GameEvent::ActionTaken {
            seat,
            action,
            stack_after,
            ..
        } => writeln!(
            out,
            "{} {} (stack {})",
            name(*seat),
            format_applied(action),
            stack_after
        ),
        GameEvent::StreetComplete { pot, .. } => writeln!(out, "Pot: {}", pot),
        GameEvent::Showdown {
            seat,
            cards,
            description,
            ..
        } => writeln!(
            out,
            "{} shows {} ({})",
            name(*seat),
            format_cards(cards),
            description
        ),
        GameEvent::PotAwarded {
            pot_index,
            seat,
            amount,
        } => {
            let pot = if *pot_index == 0 {
                "the main pot".to_string()
            } else {
                format!("side pot {}", pot_index)
            };
            writeln!(out, "{} wins {} from {}", name(*seat), amount, pot)
        }
        GameEvent::HandComplete { stacks, .. } => {
            let line = stacks
                .iter()
                .enumerate()
                .map(|(seat, chips)| format!("{}={}", name(seat), chips))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "Stacks: {}", line)
        }
    }
}

/// The decision prompt for the viewing seat.
pub fn render_prompt(out: &mut dyn Write, view: &TableView) -> std::io::Result<()> {
    writeln!(
        out,
        "Board: {}  Pot: {}  To call: {}  Stack: {}",
        format_board(&view.board),
        view.pot,
        view.to_call,
        view.stack()
    )?;
    writeln!(out, "Hole: {}", format_cards(&view.hole))?;
    writeln!(out, "Options: {}", format_legal(&view.legal))?;
    write!(out, "Enter action (fold/check/call/bet X/raise X/allin/q): ")?;
    out.flush()
}
