//! Game settings and preferences
//!
//! Stored as a JSON file. Missing fields take their defaults, and a missing
//! or corrupt file falls back to `Settings::default()`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Playfield, ShipClass};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Initial state of the shared sound switch
    pub sound_enabled: bool,

    // === Player ===
    /// Ship class name (scout, fighter, heavy)
    pub ship_class: String,
    /// Name submitted with high scores
    pub player_name: String,

    // === Simulation ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Base bomb check interval (ms) before the per-level speed-up
    pub bomb_interval_ms: f64,
    /// Level transition length in frames
    pub transition_frames: u32,
    /// Fixed RNG seed; random per session when absent
    pub seed: Option<u64>,

    // === Persistence ===
    /// High score file
    pub scores_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,

            ship_class: ShipClass::default().as_str().to_string(),
            player_name: "Anonymous".to_string(),

            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            bomb_interval_ms: BOMB_INTERVAL_MS,
            transition_frames: TRANSITION_FRAMES,
            seed: None,

            scores_path: PathBuf::from("scores.json"),
        }
    }
}

impl Settings {
    /// Check every field a session depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playfield()?;
        self.ship()?;
        if !self.bomb_interval_ms.is_finite() || self.bomb_interval_ms <= 0.0 {
            return Err(ConfigError::InvalidBombInterval {
                ms: self.bomb_interval_ms,
            });
        }
        Ok(())
    }

    pub fn playfield(&self) -> Result<Playfield, ConfigError> {
        Playfield::new(self.playfield_width, self.playfield_height)
    }

    pub fn ship(&self) -> Result<ShipClass, ConfigError> {
        self.ship_class.parse()
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not read settings file {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
