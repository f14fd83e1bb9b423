//! Simulation command: AI-only hands, optionally recorded as JSONL.
//!
//! Every seat is a baseline AI. With `--output`, each finished hand is
//! appended to the file as one [`holdem_engine::logger::HandRecord`] line.
//! The run stops early once a single player holds every chip.
//!
//! `HOLDEM_SIM_BREAK_AFTER=N` stops after N hands and reports an
//! interruption; tests use it to exercise exit code 130.

use std::io::Write;
use std::path::PathBuf;

use holdem_ai::baseline::BaselineConfig;
use holdem_ai::{AIOpponent, AiKind, create_ai};
use holdem_engine::engine::Table;
use holdem_engine::events::NullNotifier;
use holdem_engine::logger::HandLogger;
use tracing::info;

use crate::config::Config;
use crate::error::CliError;
use crate::ui;
use crate::validation::{validate_hands, validate_players};

pub const BREAK_AFTER_ENV: &str = "HOLDEM_SIM_BREAK_AFTER";

pub fn handle_sim_command(
    players: usize,
    hands: u64,
    output: Option<PathBuf>,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let players = validate_players(players).map_err(CliError::InvalidInput)?;
    let total = validate_hands(hands).map_err(CliError::InvalidInput)?;

    let ids: Vec<String> = (1..=players).map(|i| format!("ai-{}", i)).collect();
    let mut table = Table::new(config.table_config(), ids.iter().cloned())?;

    let kind = AiKind::Baseline(BaselineConfig {
        aggression: config.ai_aggression,
        ..BaselineConfig::default()
    });
    let mut ais: Vec<Box<dyn AIOpponent>> = (0..players)
        .map(|seat| create_ai(&kind, config.seed.map(|s| s.wrapping_add(seat as u64 + 1))))
        .collect();

    let mut logger = match &output {
        Some(path) => match HandLogger::create(path) {
            Ok(logger) => Some(logger),
            Err(e) => {
                ui::write_error(err, &format!("Failed to open {}: {}", path.display(), e))?;
                return Err(CliError::Io(e));
            }
        },
        None => None,
    };

    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok());

    let mut wins = vec![0u64; players];
    let mut completed = 0u64;
    while completed < total {
        if table.is_game_over() {
            ui::display_warning(
                err,
                &format!(
                    "one player holds every chip after {} hands; stopping",
                    completed
                ),
            )?;
            break;
        }
        let summary = table.play_hand(&mut ais, &mut NullNotifier)?;
        for seat in summary.winners() {
            wins[seat] += 1;
        }
        if let Some(logger) = logger.as_mut() {
            logger.log_summary(&summary)?;
        }
        completed += 1;

        if let Some(b) = break_after
            && completed == b
            && completed < total
        {
            writeln!(out, "Interrupted: saved {}/{}", completed, total)?;
            return Err(CliError::Interrupted(format!(
                "saved {}/{}",
                completed, total
            )));
        }
    }

    info!(hands = completed, players, "simulation finished");
    writeln!(out, "Simulated: {} hands", completed)?;
    for (seat, p) in table.players().iter().enumerate() {
        writeln!(
            out,
            "  {}: won {} hands, stack {}",
            p.id(),
            wins[seat],
            p.stack()
        )?;
    }
    if let Some(path) = &output {
        writeln!(out, "Hand history: {}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Config {
        Config {
            seed: Some(7),
            ..Config::default()
        }
    }

    #[test]
    fn runs_without_output_file() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(3, 5, None, &seeded(), &mut out, &mut err).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("ai-3:"));
        assert!(output.contains("Simulated:"));
    }

    #[test]
    fn hands_are_traced() {
        use crate::logging::TestLogSubscriber;
        use tracing_subscriber::Registry;
        use tracing_subscriber::layer::SubscriberExt;

        let logs = TestLogSubscriber::new();
        let registry = Registry::default().with(logs.clone().into_layer::<Registry>());
        tracing::subscriber::with_default(registry, || {
            handle_sim_command(2, 3, None, &seeded(), &mut Vec::new(), &mut Vec::new()).unwrap();
        });

        let entries = logs.entries();
        let started = entries
            .iter()
            .filter(|e| e.target.starts_with("holdem_engine") && e.message == "hand started")
            .count();
        assert!((1..=3).contains(&started));
        let done = entries
            .iter()
            .find(|e| e.message == "simulation finished")
            .expect("summary event");
        assert_eq!(done.field("players"), Some("2"));
    }

    #[test]
    fn rejects_bad_counts() {
        let cfg = seeded();
        let mut sink = Vec::new();
        assert!(matches!(
            handle_sim_command(1, 5, None, &cfg, &mut Vec::new(), &mut sink),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            handle_sim_command(2, 0, None, &cfg, &mut Vec::new(), &mut sink),
            Err(CliError::InvalidInput(_))
        ));
    }
}
