//! Wave generation
//!
//! Each level maps to a row of the formation table. Levels past the end of
//! the table replay the last row instead of failing.

use glam::Vec2;
use rand::Rng;

use super::state::{Alien, AlienKind, GameState, Playfield};
use crate::consts::*;
use crate::error::ConfigError;

/// Formation parameters for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub rows: u32,
    pub cols: u32,
    /// Types sampled uniformly for each grid cell
    pub types: &'static [AlienKind],
    /// Scales the sweep rate (interval is `1000ms / speed`)
    pub speed: f64,
    pub boss: bool,
}

const NORMAL_ONLY: &[AlienKind] = &[AlienKind::Normal];
const NORMAL_AND_FAST: &[AlienKind] = &[AlienKind::Normal, AlienKind::Fast];

/// Formation table, index 0 is level 1
pub const LEVEL_CONFIGS: [LevelConfig; MAX_LEVEL as usize] = [
    LevelConfig { rows: 3, cols: 8, types: NORMAL_ONLY, speed: 1.0, boss: false },
    LevelConfig { rows: 3, cols: 9, types: NORMAL_AND_FAST, speed: 1.2, boss: false },
    LevelConfig { rows: 4, cols: 9, types: NORMAL_AND_FAST, speed: 1.4, boss: false },
    LevelConfig { rows: 4, cols: 10, types: NORMAL_AND_FAST, speed: 1.6, boss: true },
    LevelConfig { rows: 5, cols: 10, types: NORMAL_AND_FAST, speed: 1.8, boss: true },
];

impl LevelConfig {
    /// Look up a level, falling back to the last row for levels past the table
    pub fn for_level(level: u32) -> Result<&'static LevelConfig, ConfigError> {
        if level == 0 {
            return Err(ConfigError::InvalidLevel { level });
        }
        let idx = (level.min(MAX_LEVEL) - 1) as usize;
        Ok(&LEVEL_CONFIGS[idx])
    }

    /// Sweep interval for this formation
    pub fn move_interval_ms(&self) -> f64 {
        BASE_MOVE_INTERVAL_MS / self.speed
    }
}

/// A freshly generated formation
#[derive(Debug, Clone)]
pub struct Wave {
    pub aliens: Vec<Alien>,
    pub move_interval_ms: f64,
}

/// Build the formation for `level`.
///
/// Aliens get consecutive IDs starting at `first_id`.
pub fn generate_wave<R: Rng + ?Sized>(
    level: u32,
    field: &Playfield,
    rng: &mut R,
    first_id: u32,
) -> Result<Wave, ConfigError> {
    let config = LevelConfig::for_level(level)?;
    let mut aliens = Vec::with_capacity((config.rows * config.cols) as usize + 1);

    for row in 0..config.rows {
        for col in 0..config.cols {
            let kind = config.types[rng.random_range(0..config.types.len())];
            let pos = Vec2::new(
                col as f32 * ALIEN_SPACING + ALIEN_ORIGIN,
                row as f32 * ALIEN_SPACING + ALIEN_ORIGIN,
            );
            let id = first_id + aliens.len() as u32;
            aliens.push(Alien::new(id, kind, pos));
        }
    }

    if config.boss {
        let pos = Vec2::new((field.width - BOSS_WIDTH) / 2.0, BOSS_TOP);
        let id = first_id + aliens.len() as u32;
        aliens.push(Alien::new(id, AlienKind::Boss, pos));
    }

    log::info!(
        "Level {}: {}x{} formation, boss={}, {} aliens",
        level,
        config.rows,
        config.cols,
        config.boss,
        aliens.len()
    );

    Ok(Wave {
        aliens,
        move_interval_ms: config.move_interval_ms(),
    })
}

/// Replace the state's formation with the wave for its current level
pub fn spawn_wave(state: &mut GameState) -> Result<(), ConfigError> {
    let field = state.playfield;
    let first_id = state.peek_entity_id();
    let wave = generate_wave(state.level, &field, &mut state.rng, first_id)?;
    state.skip_entity_ids(wave.aliens.len());

    state.aliens = wave.aliens;
    state.move_interval_ms = wave.move_interval_ms;
    state.direction = 1.0;
    Ok(())
}
