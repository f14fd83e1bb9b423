use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::betting::Street;
use crate::cards::Card;
use crate::game::HandSummary;
use crate::hand::HandRank;
use crate::pot::Payout;
use crate::rules::ValidatedAction;

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: usize,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action as applied, in chips
    pub action: ValidatedAction,
}

/// A hand revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShownHand {
    pub seat: usize,
    pub cards: Vec<Card>,
    pub rank: HandRank,
    pub best_five: Vec<Card>,
    pub description: String,
}

/// Information about the showdown phase when hands are revealed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// Seats that won at least one pot
    pub winners: Vec<usize>,
    pub hands: Vec<ShownHand>,
    /// Optional notes about the showdown (e.g., "split pot")
    #[serde(default)]
    pub notes: Option<String>,
}

/// Complete record of a poker hand including all actions, board cards, and outcome.
/// Serialized to JSONL format for hand history storage.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Seed of the deck shuffle for this hand
    pub seed: Option<u64>,
    pub button: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Community cards on the board (up to 5 cards)
    pub board: Vec<Card>,
    pub payouts: Vec<Payout>,
    /// Stacks after the hand, by seat
    pub stacks: Vec<u32>,
    /// Hand result summary
    pub result: Option<String>,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    /// Showdown information if hand went to showdown
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl HandRecord {
    pub fn from_summary(hand_id: String, summary: &HandSummary) -> Self {
        let winners = summary.winners();
        let result = match winners.as_slice() {
            [] => None,
            [only] => Some(format!("seat {} wins {}", only, summary.won_by(*only))),
            many => Some(format!(
                "split between seats {}",
                many.iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        };
        let showdown = (!summary.showdown.is_empty()).then(|| ShowdownInfo {
            winners: winners.clone(),
            hands: summary.showdown.clone(),
            notes: (winners.len() > 1).then(|| "split pot".to_string()),
        });
        Self {
            hand_id,
            seed: Some(summary.seed),
            button: summary.button,
            small_blind: summary.small_blind,
            big_blind: summary.big_blind,
            actions: summary.actions.clone(),
            board: summary.board.clone(),
            payouts: summary.payouts.clone(),
            stacks: summary.stacks.clone(),
            result,
            ts: None,
            meta: None,
            showdown,
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends hand records as JSON lines and hands out sequential ids.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    /// Creates (truncating) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref())?;
        let f = File::create(path)?;
        Ok(Self::with_writer(Some(BufWriter::new(f))))
    }

    /// Opens `path` for appending, creating it when missing.
    pub fn append<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref())?;
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(Some(BufWriter::new(f))))
    }

    /// Logger that numbers hands under a fixed date and writes nothing.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    fn with_writer(writer: Option<BufWriter<File>>) -> Self {
        Self {
            writer,
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }

    /// Assigns the next id to `summary` and writes it.
    pub fn log_summary(&mut self, summary: &HandSummary) -> std::io::Result<HandRecord> {
        let record = HandRecord::from_summary(self.next_id(), summary);
        self.write(&record)?;
        Ok(record)
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dated_and_sequential() {
        let mut log = HandLogger::detached("20250102");
        assert_eq!(log.next_id(), "20250102-000001");
        assert_eq!(log.next_id(), "20250102-000002");
    }
}
