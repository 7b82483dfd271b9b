//! Alien Onslaught - a five-level alien-wave arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (waves, enemy AI, collisions, game state)
//! - `highscores`: Leaderboard and the score persistence collaborator
//! - `audio`: Sound cue dispatch behind a shared sound switch
//! - `settings`: User settings and session configuration
//!
//! Rendering, raw input capture and UI chrome are external collaborators;
//! they consume [`sim::RenderState`] and [`sim::GameEvent`] values.

pub mod audio;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, SoundEffect, SoundSwitch};
pub use error::ConfigError;
pub use highscores::{HighScores, Leaderboard};
pub use settings::Settings;
pub use sim::GameSession;

/// Game configuration constants
pub mod consts {
    /// Default playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship sits this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 50.0;

    /// Bullet defaults (pixels, pixels per tick)
    pub const BULLET_WIDTH: f32 = 3.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    pub const BULLET_SPEED: f32 = 7.0;

    /// Bomb defaults; actual speed is `BOMB_BASE_SPEED + level`
    pub const BOMB_WIDTH: f32 = 5.0;
    pub const BOMB_HEIGHT: f32 = 10.0;
    pub const BOMB_BASE_SPEED: f32 = 2.0;

    /// Base bomb check interval (ms), shrunk by `1 + level * 0.1`
    pub const BOMB_INTERVAL_MS: f64 = 2000.0;
    /// Per-alien bomb probability is `BOMB_BASE_CHANCE + level * BOMB_CHANCE_PER_LEVEL`
    pub const BOMB_BASE_CHANCE: f64 = 0.02;
    pub const BOMB_CHANCE_PER_LEVEL: f64 = 0.02;

    /// Alien grid layout
    pub const ALIEN_SIZE: f32 = 30.0;
    pub const ALIEN_SPACING: f32 = 50.0;
    pub const ALIEN_ORIGIN: f32 = 50.0;
    /// Boss collision box
    pub const BOSS_WIDTH: f32 = 60.0;
    pub const BOSS_HEIGHT: f32 = 40.0;
    pub const BOSS_TOP: f32 = 5.0;

    /// Horizontal sweep distance per move, before the per-type multiplier
    pub const SWEEP_STEP: f32 = 30.0;
    /// Vertical formation advance on an edge hit
    pub const STEP_DOWN: f32 = 30.0;
    /// Sweep interval at speed multiplier 1.0 (ms)
    pub const BASE_MOVE_INTERVAL_MS: f64 = 1000.0;

    /// Highest level; clearing it wins the game
    pub const MAX_LEVEL: u32 = 5;

    /// Level transition length in frames (2 seconds at 60 fps)
    pub const TRANSITION_FRAMES: u32 = 120;
    /// Host frame cadence assumed by the native driver
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
