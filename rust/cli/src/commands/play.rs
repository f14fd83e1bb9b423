//! # Play Command
//!
//! Interactive hands at the terminal: the human sits in the first seat
//! against baseline AI opponents. Input is parsed and checked against the
//! legal-action menu before it is sent to the table, so the engine only ever
//! sees actions it will accept. `q` (or end of input) folds the current hand
//! and ends the session once the hand is settled.
//!
//! Stacks and statistics are loaded from and saved to the player store
//! after every hand.

use std::io::{BufRead, Write};

use holdem_ai::baseline::BaselineConfig;
use holdem_ai::{AIOpponent, AiKind, create_ai};
use holdem_engine::engine::{ActionProvider, Table};
use holdem_engine::errors::GameError;
use holdem_engine::events::EventLog;
use holdem_engine::game::TableView;
use holdem_engine::player::{Player, PlayerAction};

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::storage::{JsonFileStore, PlayerStore, record_hand};
use crate::ui;
use crate::validation::{
    ParseResult, check_legal, parse_player_action, validate_hands, validate_opponents,
};

pub const HUMAN_SEAT: usize = 0;
pub const HUMAN_ID: &str = "human";

/// Plays up to `hands` hands of human vs `opponents` baseline AIs.
pub fn handle_play_command(
    opponents: usize,
    hands: u64,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seats = validate_opponents(opponents).map_err(CliError::InvalidInput)?;
    let hands = validate_hands(hands).map_err(CliError::InvalidInput)?;

    let mut store = JsonFileStore::in_dir(&config.data_dir);
    let mut stats = store.load_all()?;

    let ids: Vec<String> = std::iter::once(HUMAN_ID.to_string())
        .chain((1..seats).map(|i| format!("ai-{}", i)))
        .collect();
    let players = ids
        .iter()
        .map(|id| {
            let chips = stats
                .iter()
                .find(|p| &p.id == id)
                .map(|p| p.chips)
                .filter(|&c| c > 0)
                .unwrap_or(config.starting_stack);
            Player::new(id.clone(), chips)
        })
        .collect();
    let mut table = Table::with_players(config.table_config(), players)?;

    let kind = AiKind::Baseline(BaselineConfig {
        aggression: config.ai_aggression,
        ..BaselineConfig::default()
    });
    let mut ais: Vec<Box<dyn AIOpponent>> = (1..seats)
        .map(|seat| create_ai(&kind, config.seed.map(|s| s.wrapping_add(seat as u64))))
        .collect();

    let seed = config
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "random".to_string());
    writeln!(
        out,
        "play: opponents={} hands={} seed={}",
        opponents, hands, seed
    )?;
    writeln!(
        out,
        "Blinds: SB={} BB={}",
        config.small_blind, config.big_blind
    )?;

    let mut log = EventLog::new();
    let mut played = 0u64;
    let mut quit = false;

    while played < hands && !quit {
        if table.players()[HUMAN_SEAT].stack() == 0 {
            writeln!(out, "You are out of chips.")?;
            break;
        }
        if table.is_game_over() {
            writeln!(out, "Game over.")?;
            break;
        }
        let dealt: Vec<bool> = table.players().iter().map(|p| p.stack() > 0).collect();

        let mut finished = table.start_hand(&mut log)?;
        show_events(&mut log, out, &ids)?;
        let summary = loop {
            if let Some(summary) = finished.take() {
                break summary;
            }
            let seat = table.current_player()?.ok_or(GameError::NoHandInProgress)?;
            let view = table.view(seat)?;
            let action = if seat == HUMAN_SEAT {
                match prompt_human(&view, stdin, out, err)? {
                    Some(action) => action,
                    None => {
                        quit = true;
                        PlayerAction::Fold
                    }
                }
            } else {
                ais[seat - 1].get_action(&view)
            };
            finished = table.apply_action(seat, action, &mut log)?;
            show_events(&mut log, out, &ids)?;
        };

        record_hand(&mut stats, &ids, &dealt, &summary);
        store.save_all(&stats)?;
        played += 1;
    }

    writeln!(out, "Hands played: {}", played)?;
    Ok(())
}

/// Asks until the human enters an allowed action. `None` means quit.
fn prompt_human(
    view: &TableView,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Option<PlayerAction>, CliError> {
    loop {
        ui::render_prompt(out, view)?;
        let Some(line) = read_stdin_line(stdin) else {
            writeln!(out)?;
            return Ok(None);
        };
        match parse_player_action(&line) {
            ParseResult::Quit => return Ok(None),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Action(action) => match check_legal(action, &view.legal) {
                Ok(action) => return Ok(Some(action)),
                Err(msg) => ui::write_error(err, &msg)?,
            },
        }
    }
}

fn show_events(log: &mut EventLog, out: &mut dyn Write, names: &[String]) -> std::io::Result<()> {
    for event in log.take() {
        ui::render_event(out, &event, names, Some(HUMAN_SEAT))?;
    }
    Ok(())
}
