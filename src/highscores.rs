//! Best score persistence
//!
//! A single number kept in one storage slot. Storage trouble never reaches
//! the game: a failed load reads as 0 and a failed save is dropped.

use crate::platform::{KeyValueStore, StorageError};

/// Best-score slot over any key-value backend
#[derive(Debug)]
pub struct HighScoreStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> HighScoreStore<S> {
    /// Storage key for the best score
    pub const STORAGE_KEY: &'static str = "dnd-best";

    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Stored best score, or 0 if absent or unreadable
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(Some(best)) => {
                log::info!("Loaded best score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not load best score: {}", e);
                0
            }
        }
    }

    /// Persist `best`, best-effort
    pub fn save(&mut self, best: u32) {
        match self.backend.set(Self::STORAGE_KEY, &best.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", best),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }

    fn try_load(&self) -> Result<Option<u32>, StorageError> {
        let Some(raw) = self.backend.get(Self::STORAGE_KEY)? else {
            return Ok(None);
        };
        // Older saves may hold a float string
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| Some(v.floor() as u32))
            .ok_or(StorageError::Corrupt(raw))
    }

    #[cfg(test)]
    fn backend(&self) -> &S {
        &self.backend
    }
}
