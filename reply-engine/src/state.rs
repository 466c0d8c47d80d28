//! Persisted record of tweet ids already replied to. A flat JSON object
//! mapping id -> true, read at run start and rewritten wholesale on save.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of a save attempt. Persistence is best-effort: a failed write
/// costs at most one duplicate reply in a future run, so callers log a
/// `Failed` outcome and keep going rather than aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted,
    /// Nothing new to write since the last save.
    Skipped,
    Failed(String),
}

#[derive(Debug)]
pub struct ReplyState {
    entries: HashMap<String, bool>,
    path: PathBuf,
    dirty: bool,
}

impl ReplyState {
    /// Load state from `path`. An absent or unparseable file is treated
    /// as empty state, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "State file {} is corrupt ({}); starting with empty state",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(_) => {
                debug!("No state file at {}; starting fresh", path.display());
                HashMap::new()
            }
        };

        Self {
            entries,
            path,
            dirty: false,
        }
    }

    pub fn contains(&self, tweet_id: &str) -> bool {
        self.entries.contains_key(tweet_id)
    }

    /// Record a tweet id as handled. Once marked, the id is never
    /// selected again as long as the file survives.
    pub fn mark_handled(&mut self, tweet_id: &str) {
        if self.entries.insert(tweet_id.to_string(), true).is_none() {
            self.dirty = true;
        }
    }

    /// Rewrite the state file if anything changed since the last save.
    pub fn save(&mut self) -> PersistOutcome {
        if !self.dirty {
            return PersistOutcome::Skipped;
        }

        let serialized = match serde_json::to_string(&self.entries) {
            Ok(serialized) => serialized,
            Err(e) => return PersistOutcome::Failed(e.to_string()),
        };

        match fs::write(&self.path, serialized) {
            Ok(()) => {
                self.dirty = false;
                debug!(
                    "Persisted {} handled ids to {}",
                    self.entries.len(),
                    self.path.display()
                );
                PersistOutcome::Persisted
            }
            Err(e) => PersistOutcome::Failed(e.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
