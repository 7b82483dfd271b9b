//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes in as an argument, never read from the system
//! - Stable iteration order (wave order, spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod rect;
pub mod session;
pub mod state;
pub mod tick;
pub mod wave;

pub use autopilot::Autopilot;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use collision::{
    HitReport, WaveStatus, resolve_bomb_hits, resolve_bullet_hits, resolve_wave_clear,
};
pub use enemy::{
    SweepOutcome, advance_bombs, bomb_chance, bomb_check_interval_ms, drop_bombs, update_sweep,
};
pub use rect::{Rect, overlaps};
pub use session::{GameSession, RenderState};
pub use state::{
    Alien, AlienKind, Bomb, Bullet, GameEvent, GamePhase, GameState, Playfield, Player, ShipClass,
};
pub use tick::{InputSnapshot, fire, tick, transition_progress};
pub use wave::{LEVEL_CONFIGS, LevelConfig, Wave, generate_wave, spawn_wave};
