//! High score persistence
//!
//! The game only ever talks to a `ScoreStore` through `ScoreReporter`, which
//! treats every call as best effort: failures are logged and play goes on.
//! Stores keep the maximum score they have been sent.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::sim::GameEvent;

/// Backend holding the all-time best score
pub trait ScoreStore {
    fn fetch_high_score(&mut self) -> Result<u64>;
    /// Offer a score; the store keeps it if it beats the current best
    fn submit_score(&mut self, score: u64) -> Result<()>;
}

/// Serialized form shared by the file and LocalStorage stores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u64,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn fetch_high_score(&mut self) -> Result<u64> {
        Ok(self.best)
    }

    fn submit_score(&mut self, score: u64) -> Result<()> {
        self.best = self.best.max(score);
        Ok(())
    }
}

/// JSON file on disk. Writes go to a temp file first, then replace the save.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileScoreStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<HighScoreRecord> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HighScoreRecord::default()),
            Err(e) => Err(GameError::Persistence(format!(
                "reading {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&self, record: &HighScoreRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)
            .and_then(|_| std::fs::rename(&tmp, &self.path))
            .map_err(|e| GameError::Persistence(format!("writing {}: {}", self.path.display(), e)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for JsonFileScoreStore {
    fn fetch_high_score(&mut self) -> Result<u64> {
        Ok(self.read()?.high_score)
    }

    fn submit_score(&mut self, score: u64) -> Result<()> {
        let record = match self.read() {
            Ok(record) => record,
            // Overwrite a corrupt record rather than failing every submit
            Err(GameError::Json(e)) => {
                log::warn!("Replacing unreadable score file {}: {}", self.path.display(), e);
                HighScoreRecord::default()
            }
            Err(e) => return Err(e),
        };
        if score > record.high_score {
            self.write(&HighScoreRecord { high_score: score })?;
            log::info!("New high score {} saved", score);
        }
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageScoreStore {
    const STORAGE_KEY: &'static str = "bubble_pop_highscore";

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::Persistence("LocalStorage unavailable".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageScoreStore {
    fn fetch_high_score(&mut self) -> Result<u64> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(serde_json::from_str::<HighScoreRecord>(&json)?.high_score),
            Ok(None) => Ok(0),
            Err(_) => Err(GameError::Persistence("LocalStorage read failed".into())),
        }
    }

    fn submit_score(&mut self, score: u64) -> Result<()> {
        if score <= self.fetch_high_score()? {
            return Ok(());
        }
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| GameError::Persistence("LocalStorage write failed".into()))?;
        log::info!("New high score {} saved", score);
        Ok(())
    }
}

/// Forwards session scores to a store and caches the displayed high score
#[derive(Debug, Clone)]
pub struct ScoreReporter<S: ScoreStore> {
    store: S,
    high_score: Option<u64>,
}

impl<S: ScoreStore> ScoreReporter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            high_score: None,
        }
    }

    /// Last high score fetched from the store, if any fetch has succeeded
    pub fn high_score(&self) -> Option<u64> {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Refresh the displayed high score
    pub fn refresh(&mut self) -> Option<u64> {
        match self.store.fetch_high_score() {
            Ok(score) => {
                log::info!("High score: {}", score);
                self.high_score = Some(score);
            }
            Err(e) => log::warn!("Error loading high score: {}", e),
        }
        self.high_score
    }

    /// Submit the cumulative session score, then refresh on success
    pub fn report(&mut self, total: u64) {
        match self.store.submit_score(total) {
            Ok(()) => {
                self.refresh();
            }
            Err(e) => log::warn!("Error updating high score: {}", e),
        }
    }

    /// Report every match in a tick's events
    pub fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Matched { total, .. } = event {
                self.report(*total);
            }
        }
    }
}
