use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::WinCondition;
use crate::player::TurnAction;

/// Records a single player action within a round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat index of the acting player
    pub player_id: usize,
    /// The action taken
    pub action: TurnAction,
}

/// Complete record of one round: every action, the outcome, and scoring.
/// Serialized to JSONL for round-history storage and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// RNG seed used for the deck (enables deterministic replay)
    pub seed: Option<u64>,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    /// Winning seat, if the round completed
    pub winner: Option<usize>,
    /// How the round ended
    pub condition: Option<WinCondition>,
    /// Cumulative match scores after the round, per seat
    pub scores: Vec<u32>,
    /// Pot paid to the winner
    pub pot: u32,
    /// Final top of the discard pile, if any
    #[serde(default)]
    pub top_discard: Option<Card>,
    /// Timestamp when the round finished (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`RoundRecord`]s to a JSONL file, one line per round, assigning
/// sequential round ids.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Id-sequencing only, no backing file.
    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_round_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
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
}
