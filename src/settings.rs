//! Game settings and preferences
//!
//! Persisted separately from the best score, as JSON in one storage slot.
//! Settings only change presentation; the simulation never reads them.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on dash, pickups and death
    pub screen_shake: bool,
    /// Particle effects
    pub particles: bool,
    /// Scrolling background grid
    pub background_grid: bool,

    // === HUD ===
    /// Show the dash cooldown bar
    pub show_dash_meter: bool,
    /// Show the keyboard hint in the HUD
    pub show_key_hints: bool,

    // === Accessibility ===
    /// Reduced motion (no shake, static grid)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            background_grid: true,

            show_dash_meter: true,
            show_key_hints: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "dnd-settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Whether the background grid scrolls (respects reduced_motion)
    pub fn grid_scrolls(&self) -> bool {
        self.background_grid && !self.reduced_motion
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings, best-effort
    pub fn save<S: KeyValueStore>(&self, store: &mut S) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode settings: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}
