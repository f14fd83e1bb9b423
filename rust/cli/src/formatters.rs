//! Card, board, action and legal-menu formatters for terminal display.
//!
//! Cards use Unicode suit symbols (`A♠`) where the terminal supports them and
//! fall back to letters (`As`) elsewhere. Detection checks a few environment
//! variables on Windows and assumes Unicode everywhere else.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use holdem_engine::cards::{Card, Suit};
use holdem_engine::player::PlayerAction;
use holdem_engine::rules::{LegalActions, ValidatedAction};

pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn suit_letter(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'c',
        Suit::Diamonds => 'd',
        Suit::Hearts => 'h',
        Suit::Spades => 's',
    }
}

/// `A♠` or `As`; tens print as `10`.
pub fn format_card(card: &Card) -> String {
    if supports_unicode() {
        card.to_string()
    } else {
        format!("{}{}", card.rank, suit_letter(card.suit))
    }
}

pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

/// Board in brackets, `[]` before the flop.
pub fn format_board(cards: &[Card]) -> String {
    format!("[{}]", format_cards(cards))
}

/// # Example
///
/// ```rust
/// use holdem_engine::player::PlayerAction;
/// # use holdem_cli::formatters::format_action;
///
/// assert_eq!(format_action(&PlayerAction::Fold), "fold");
/// assert_eq!(format_action(&PlayerAction::Raise(60)), "raise to 60");
/// assert_eq!(format_action(&PlayerAction::AllIn), "all-in");
/// ```
pub fn format_action(action: &PlayerAction) -> String {
    match action {
        PlayerAction::Fold => "fold".to_string(),
        PlayerAction::Check => "check".to_string(),
        PlayerAction::Call => "call".to_string(),
        PlayerAction::Bet(amount) => format!("bet {}", amount),
        PlayerAction::Raise(to) => format!("raise to {}", to),
        PlayerAction::AllIn => "all-in".to_string(),
    }
}

/// An applied action, in chips.
pub fn format_applied(action: &ValidatedAction) -> String {
    match action {
        ValidatedAction::Fold => "folds".to_string(),
        ValidatedAction::Check => "checks".to_string(),
        ValidatedAction::Call(amount) => format!("calls {}", amount),
        ValidatedAction::Bet(amount) => format!("bets {}", amount),
        ValidatedAction::Raise(to) => format!("raises to {}", to),
        ValidatedAction::AllIn(amount) => format!("is all-in for {}", amount),
    }
}

/// The options a player has, in input syntax: `check | bet 10-500 | allin (500)`.
pub fn format_legal(legal: &LegalActions) -> String {
    let mut options = vec!["fold".to_string()];
    if legal.can_check {
        options.push("check".to_string());
    }
    if let Some(amount) = legal.call {
        options.push(format!("call ({})", amount));
    }
    if let Some((lo, hi)) = legal.bet {
        options.push(range("bet", lo, hi));
    }
    if let Some((lo, hi)) = legal.raise {
        options.push(range("raise", lo, hi));
    }
    if let Some(amount) = legal.all_in {
        options.push(format!("allin ({})", amount));
    }
    options.join(" | ")
}

fn range(verb: &str, lo: u32, hi: u32) -> String {
    if lo == hi {
        format!("{} {}", verb, lo)
    } else {
        format!("{} {}-{}", verb, lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::Rank;

    #[test]
    fn card_uses_symbol_or_letter() {
        let ten = Card::new(Rank::Ten, Suit::Hearts);
        let formatted = format_card(&ten);
        assert!(formatted == "10♥" || formatted == "10h");
    }

    #[test]
    fn empty_board_is_brackets() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn legal_menu_lists_every_option() {
        let legal = LegalActions {
            can_check: false,
            call: Some(20),
            bet: None,
            raise: Some((40, 500)),
            all_in: Some(500),
        };
        assert_eq!(
            format_legal(&legal),
            "fold | call (20) | raise 40-500 | allin (500)"
        );
    }

    #[test]
    fn applied_actions_read_as_sentences() {
        assert_eq!(format_applied(&ValidatedAction::Call(15)), "calls 15");
        assert_eq!(
            format_applied(&ValidatedAction::AllIn(80)),
            "is all-in for 80"
        );
    }
}
