//! Player persistence between sessions.
//!
//! Stats are keyed by player id and kept in `players.json` under the data
//! directory as `{"players": [...]}`. A missing file is an empty store.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use holdem_engine::game::HandSummary;

use crate::io_utils::ensure_parent_dir;

pub const PLAYERS_FILE: &str = "players.json";

/// Lifetime record of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub id: String,
    pub name: String,
    pub chips: u32,
    #[serde(default)]
    pub hands_played: u32,
    #[serde(default)]
    pub hands_won: u32,
    /// Largest amount taken down in a single hand
    #[serde(default)]
    pub biggest_pot_won: u32,
}

impl PlayerStats {
    pub fn new(id: impl Into<String>, name: impl Into<String>, chips: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            chips,
            hands_played: 0,
            hands_won: 0,
            biggest_pot_won: 0,
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            0.0
        } else {
            f64::from(self.hands_won) / f64::from(self.hands_played)
        }
    }
}

pub trait PlayerStore {
    fn load_all(&self) -> io::Result<Vec<PlayerStats>>;
    fn save_all(&mut self, players: &[PlayerStats]) -> io::Result<()>;

    fn get(&self, id: &str) -> io::Result<Option<PlayerStats>> {
        Ok(self.load_all()?.into_iter().find(|p| p.id == id))
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct PlayersFile {
    players: Vec<PlayerStats>,
}

/// [`PlayerStore`] backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `players.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PLAYERS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlayerStore for JsonFileStore {
    fn load_all(&self) -> io::Result<Vec<PlayerStats>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let file: PlayersFile = serde_json::from_str(&text).map_err(io::Error::other)?;
        Ok(file.players)
    }

    fn save_all(&mut self, players: &[PlayerStats]) -> io::Result<()> {
        ensure_parent_dir(&self.path)?;
        let file = PlayersFile {
            players: players.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(io::Error::other)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), count = players.len(), "players saved");
        Ok(())
    }
}

/// Folds one finished hand into `stats`. `ids[seat]` names each seat and
/// `dealt[seat]` says whether the seat was dealt in. Unknown ids get a new
/// entry named after the id.
pub fn record_hand(
    stats: &mut Vec<PlayerStats>,
    ids: &[String],
    dealt: &[bool],
    summary: &HandSummary,
) {
    for (seat, id) in ids.iter().enumerate() {
        let chips = summary.stacks.get(seat).copied().unwrap_or(0);
        let idx = match stats.iter().position(|p| &p.id == id) {
            Some(idx) => idx,
            None => {
                stats.push(PlayerStats::new(id.clone(), id.clone(), chips));
                stats.len() - 1
            }
        };
        let entry = &mut stats[idx];
        entry.chips = chips;
        if !dealt.get(seat).copied().unwrap_or(false) {
            continue;
        }
        entry.hands_played += 1;
        let won = summary.won_by(seat);
        if won > 0 {
            entry.hands_won += 1;
            entry.biggest_pot_won = entry.biggest_pot_won.max(won);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.get("human").unwrap(), None);
    }

    #[test]
    fn saves_and_loads_under_players_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::in_dir(&dir.path().join("nested"));
        let mut alice = PlayerStats::new("alice", "Alice", 1200);
        alice.hands_played = 10;
        alice.hands_won = 4;
        store.save_all(&[alice.clone()]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json["players"].is_array());
        assert_eq!(store.get("alice").unwrap(), Some(alice));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load_all().is_err());
    }

    #[test]
    fn win_rate_handles_no_hands() {
        let p = PlayerStats::new("x", "x", 0);
        assert_eq!(p.win_rate(), 0.0);
    }
}
