//! Eval command: name the best hand in 5 to 7 cards.

use holdem_engine::cards::parse_cards;
use holdem_engine::hand::evaluate;
use std::io::Write;

use crate::error::CliError;
use crate::formatters::format_cards;

/// Cards may be given as separate arguments or in one quoted string.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(&cards.join(" "))?;
    let strength = evaluate(&cards).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    writeln!(out, "Cards: {}", format_cards(&cards))?;
    writeln!(out, "Hand: {}", strength.describe())?;
    writeln!(out, "Category: {}", strength.rank)?;
    writeln!(out, "Best five: {}", format_cards(&strength.best_five))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(args: &[&str]) -> Result<String, CliError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        handle_eval_command(&args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn names_a_full_house() {
        let output = eval(&["Kh", "Kd", "Ks", "5c", "5d", "2h", "9s"]).unwrap();
        assert!(output.contains("Hand: Full House, Kings over Fives"), "{}", output);
    }

    #[test]
    fn accepts_one_quoted_argument() {
        let output = eval(&["Ah Kh Qh Jh Th"]).unwrap();
        assert!(output.contains("Royal Flush"));
    }

    #[test]
    fn rejects_bad_notation_and_sizes() {
        assert!(matches!(eval(&["Ah", "Xx"]), Err(CliError::InvalidInput(_))));
        assert!(matches!(
            eval(&["Ah", "Kh", "Qh", "Jh"]),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            eval(&["Ah", "Ah", "Qh", "Jh", "Th"]),
            Err(CliError::InvalidInput(_))
        ));
    }
}
