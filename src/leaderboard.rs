/// Fastest-clear leaderboard, persisted as a JSON array sorted by time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub team: String,
    /// Seconds to clear every stage, rounded to hundredths.
    pub score: f64,
}

impl Entry {
    /// Times are finite and never negative.
    fn is_valid(&self) -> bool {
        self.score.is_finite() && self.score >= 0.0
    }
}

#[derive(Clone, Debug)]
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<Entry>,
}

/// Match clock as a leaderboard score.
pub fn score_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}

impl Leaderboard {
    /// Read the board at `path`.  A missing or unreadable file is an empty
    /// board, never an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Vec<Entry>>(&text) {
                Ok(mut entries) => {
                    let before = entries.len();
                    entries.retain(Entry::is_valid);
                    if entries.len() < before {
                        log::warn!(
                            "dropped {} invalid leaderboard entries from {}",
                            before - entries.len(),
                            path.display()
                        );
                    }
                    sort(&mut entries);
                    entries
                }
                Err(err) => {
                    log::warn!("ignoring corrupt leaderboard {}: {err}", path.display());
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                log::warn!("cannot read leaderboard {}: {err}", path.display());
                Vec::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn top(&self, n: usize) -> &[Entry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Insert a result, keeping the board sorted fastest first.  Ties keep
    /// the earlier entry ahead.  Returns the 0-based rank.
    pub fn record(&mut self, team: impl Into<String>, score: f64) -> usize {
        let rank = self.entries.partition_point(|e| e.score <= score);
        self.entries.insert(
            rank,
            Entry {
                team: team.into(),
                score,
            },
        );
        rank
    }

    pub fn save(&self) -> Result<(), LeaderboardError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

fn sort(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.score.total_cmp(&b.score));
}
