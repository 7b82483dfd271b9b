//! Per-frame simulation tick
//!
//! Core game loop: one call per host animation frame. Player and projectile
//! movement is per frame; the alien sweep and bomb checks compare `now_ms`
//! against their last-action timestamps.

use serde::{Deserialize, Serialize};

use super::collision::{resolve_bomb_hits, resolve_bullet_hits, resolve_wave_clear};
use super::enemy::{SweepOutcome, advance_bombs, drop_bombs, update_sweep};
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use super::wave::spawn_wave;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Normalized input state, refreshed by the input collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Move left (held)
    pub left: bool,
    /// Move right (held)
    pub right: bool,
    /// Fire key is down; only the rising edge shoots
    pub fire: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &InputSnapshot, now_ms: f64) {
    match state.phase {
        GamePhase::ShipSelectPending | GamePhase::GameOver => return,
        _ => {}
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::LevelTransition => {
            state.transition_ticks = state.transition_ticks.saturating_sub(1);
            if state.transition_ticks == 0 {
                start_wave(state, now_ms);
            }
        }

        GamePhase::Playing => {
            let field = state.playfield;
            state.player.steer(input.left, input.right, &field);

            advance_bullets(state);

            drop_bombs(state, now_ms);
            advance_bombs(state);
            if resolve_bomb_hits(state) {
                return;
            }

            if update_sweep(state, now_ms) == SweepOutcome::ReachedPlayer {
                return;
            }

            resolve_bullet_hits(state);
            resolve_wave_clear(state);
        }

        _ => {}
    }
}

/// Spawn a bullet at the player's top-center.
///
/// Returns false (and does nothing) outside of active play.
pub fn fire(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let mut pos = state.player.top_center();
    pos.x -= BULLET_WIDTH / 2.0;
    let id = state.next_entity_id();
    state.bullets.push(Bullet::new(id, pos));
    state.emit_sound(SoundEffect::Shoot);
    true
}

/// Move bullets up and drop the ones past the top edge
pub fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);
}

/// Fraction of the current level transition already played, 0..=1
pub fn transition_progress(state: &GameState) -> f32 {
    if state.phase != GamePhase::LevelTransition || state.transition_duration == 0 {
        return 1.0;
    }
    1.0 - state.transition_ticks as f32 / state.transition_duration as f32
}

/// Generate the wave for the current level and start playing it
fn start_wave(state: &mut GameState, now_ms: f64) {
    if let Err(err) = spawn_wave(state) {
        // Level is kept in 1..=MAX_LEVEL, so this means corrupted state
        debug_assert!(false, "wave generation failed: {err}");
        log::error!("Wave generation failed: {}", err);
        state.end_game(false);
        return;
    }
    state.last_move_ms = now_ms;
    state.last_bomb_ms = now_ms;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::TransitionFinished { level: state.level });
}
