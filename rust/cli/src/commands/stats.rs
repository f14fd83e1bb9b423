//! Stats command: lifetime numbers from the player store.

use std::io::Write;

use crate::config::Config;
use crate::error::CliError;
use crate::storage::{JsonFileStore, PlayerStore};

pub fn handle_stats_command(config: &Config, out: &mut dyn Write) -> Result<(), CliError> {
    let store = JsonFileStore::in_dir(&config.data_dir);
    run_stats(&store, out)
}

fn run_stats(store: &dyn PlayerStore, out: &mut dyn Write) -> Result<(), CliError> {
    let mut players = store.load_all()?;
    if players.is_empty() {
        writeln!(out, "No player statistics recorded yet.")?;
        return Ok(());
    }
    players.sort_by(|a, b| b.chips.cmp(&a.chips).then_with(|| a.id.cmp(&b.id)));

    writeln!(
        out,
        "{:<12} {:>8} {:>7} {:>6} {:>6} {:>12}",
        "player", "chips", "hands", "won", "win%", "biggest pot"
    )?;
    for p in &players {
        writeln!(
            out,
            "{:<12} {:>8} {:>7} {:>6} {:>5.1}% {:>12}",
            p.name,
            p.chips,
            p.hands_played,
            p.hands_won,
            p.win_rate() * 100.0,
            p.biggest_pot_won
        )?;
    }
    Ok(())
}
