//! High score leaderboard and score persistence
//!
//! The simulation only hands over a final score. Everything here runs
//! outside the tick loop, and store failures never reach the game: the
//! [`Leaderboard`] drops to offline mode and keeps answering.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to show
pub const MAX_HIGH_SCORES: usize = 10;

/// Two submissions with the same name and score this close together are duplicates
pub const DUPLICATE_WINDOW_MS: u64 = 60_000;

/// Name used when the player leaves theirs blank
pub const ANONYMOUS: &str = "Anonymous";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when submitted
    pub created_at: u64,
}

/// High score leaderboard, highest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a top-`limit` board from unsorted entries
    pub fn from_entries(mut entries: Vec<ScoreEntry>, limit: usize) -> Self {
        // Stable sort keeps earlier submissions ahead on ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        Self { entries }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Why a store operation failed
#[derive(Debug)]
pub enum ScoreStoreError {
    Io(io::Error),
    Serialization(serde_json::Error),
    /// Same name and score submitted within the duplicate window
    Duplicate,
    /// Store not configured or not reachable
    Offline,
}

impl fmt::Display for ScoreStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "score store i/o error: {e}"),
            Self::Serialization(e) => write!(f, "score store data error: {e}"),
            Self::Duplicate => write!(f, "duplicate score submission"),
            Self::Offline => write!(f, "score store offline"),
        }
    }
}

impl std::error::Error for ScoreStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ScoreStoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ScoreStoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

/// Persistence collaborator for high scores
pub trait ScoreStore {
    /// Top `limit` entries, highest first
    fn list_high_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, ScoreStoreError>;
    /// Persist one entry
    fn submit_score(&mut self, entry: ScoreEntry) -> Result<(), ScoreStoreError>;
}

/// Scores kept in a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn list_high_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
        Ok(HighScores::from_entries(self.read_all()?, limit).entries)
    }

    fn submit_score(&mut self, entry: ScoreEntry) -> Result<(), ScoreStoreError> {
        let mut scores = self.read_all()?;
        let duplicate = scores.iter().any(|e| {
            e.name == entry.name
                && e.score == entry.score
                && entry.created_at.abs_diff(e.created_at) < DUPLICATE_WINDOW_MS
        });
        if duplicate {
            return Err(ScoreStoreError::Duplicate);
        }
        scores.push(entry);
        fs::write(&self.path, serde_json::to_string(&scores)?)?;
        log::info!(
            "High scores saved ({} entries) to {}",
            scores.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Store used when no persistence is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineStore;

impl ScoreStore for OfflineStore {
    fn list_high_scores(&self, _limit: usize) -> Result<Vec<ScoreEntry>, ScoreStoreError> {
        Err(ScoreStoreError::Offline)
    }

    fn submit_score(&mut self, _entry: ScoreEntry) -> Result<(), ScoreStoreError> {
        Err(ScoreStoreError::Offline)
    }
}

/// Result of submitting a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Persisted; rank on the board if it made the top ten
    Saved { rank: Option<usize> },
    /// Rejected as a repeat of a recent submission
    Duplicate,
    /// Store unavailable; nothing saved
    Offline,
}

/// Leaderboard client that degrades to offline on store failure
pub struct Leaderboard<S: ScoreStore> {
    store: S,
    online: bool,
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            online: true,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    fn go_offline(&mut self, err: &ScoreStoreError) {
        if self.online {
            log::error!("High scores unavailable, switching to offline mode: {}", err);
            self.online = false;
        }
    }

    /// Current top scores; empty when offline
    pub fn high_scores(&mut self) -> HighScores {
        if !self.online {
            return HighScores::new();
        }
        match self.store.list_high_scores(MAX_HIGH_SCORES) {
            Ok(entries) => HighScores::from_entries(entries, MAX_HIGH_SCORES),
            Err(e) => {
                self.go_offline(&e);
                HighScores::new()
            }
        }
    }

    /// Submit a final score stamped with the current time
    pub fn submit(&mut self, name: &str, score: u64) -> SubmitOutcome {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.submit_at(name, score, now)
    }

    /// Submit a final score with an explicit timestamp (unix ms)
    pub fn submit_at(&mut self, name: &str, score: u64, created_at: u64) -> SubmitOutcome {
        if !self.online {
            return SubmitOutcome::Offline;
        }
        let name = match name.trim() {
            "" => ANONYMOUS,
            trimmed => trimmed,
        };
        let rank = self.high_scores().potential_rank(score);
        if !self.online {
            return SubmitOutcome::Offline;
        }

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
            created_at,
        };
        match self.store.submit_score(entry) {
            Ok(()) => SubmitOutcome::Saved { rank },
            Err(ScoreStoreError::Duplicate) => {
                log::warn!("Duplicate score submission from {}", name);
                SubmitOutcome::Duplicate
            }
            Err(e) => {
                self.go_offline(&e);
                SubmitOutcome::Offline
            }
        }
    }
}
