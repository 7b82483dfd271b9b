//! Enemy behavior: formation sweep and bomb drops
//!
//! Both behaviors run on wall-clock intervals (milliseconds from the
//! session's monotonic clock), not on frame counts, so a slow host frame
//! rate doesn't slow the aliens down.

use glam::Vec2;
use rand::Rng;

use super::state::{Bomb, GameState};
use crate::consts::*;

/// What a sweep step did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Interval hasn't elapsed yet
    Idle,
    /// Formation shifted sideways
    Moved,
    /// Formation hit an edge, reversed and stepped down
    SteppedDown,
    /// A step-down brought an alien to the player's row
    ReachedPlayer,
}

/// Bomb check interval for a level; shrinks as the level rises
pub fn bomb_check_interval_ms(base_ms: f64, level: u32) -> f64 {
    base_ms / (1.0 + level as f64 * 0.1)
}

/// Per-alien chance of dropping a bomb on a bomb check
pub fn bomb_chance(level: u32) -> f64 {
    (BOMB_BASE_CHANCE + level as f64 * BOMB_CHANCE_PER_LEVEL).min(1.0)
}

/// Shift the formation if the sweep interval has elapsed.
///
/// Ends the game when a step-down reaches the player.
pub fn update_sweep(state: &mut GameState, now_ms: f64) -> SweepOutcome {
    if now_ms - state.last_move_ms < state.move_interval_ms {
        return SweepOutcome::Idle;
    }
    state.last_move_ms = now_ms;

    let width = state.playfield.width;
    let mut touched_edge = false;
    for alien in &mut state.aliens {
        alien.pos.x += SWEEP_STEP * state.direction * alien.kind.speed_multiplier();
        let rect = alien.rect();
        if rect.x <= 0.0 || rect.right() >= width {
            touched_edge = true;
        }
    }

    if !touched_edge {
        return SweepOutcome::Moved;
    }

    state.direction = -state.direction;
    let player_y = state.player.pos.y;
    let mut reached = false;
    for alien in &mut state.aliens {
        alien.pos.y += STEP_DOWN;
        if alien.rect().bottom() >= player_y {
            reached = true;
        }
    }
    log::debug!(
        "Formation stepped down, direction now {}",
        state.direction
    );

    if reached {
        state.end_game(false);
        SweepOutcome::ReachedPlayer
    } else {
        SweepOutcome::SteppedDown
    }
}

/// Roll for bombs if the bomb interval has elapsed.
///
/// Each living alien rolls independently; returns how many bombs spawned.
pub fn drop_bombs(state: &mut GameState, now_ms: f64) -> usize {
    let interval = bomb_check_interval_ms(state.bomb_interval_ms, state.level);
    if now_ms - state.last_bomb_ms < interval {
        return 0;
    }
    state.last_bomb_ms = now_ms;

    let chance = bomb_chance(state.level);
    let mut spawn_points = Vec::new();
    for alien in state.aliens.iter().filter(|a| a.is_alive()) {
        if state.rng.random_bool(chance) {
            // Bottom-center of the alien
            spawn_points.push(Vec2::new(
                alien.pos.x + (alien.size.x - BOMB_WIDTH) / 2.0,
                alien.pos.y + alien.size.y,
            ));
        }
    }

    let level = state.level;
    for pos in &spawn_points {
        let id = state.next_entity_id();
        state.bombs.push(Bomb::new(id, *pos, level));
    }
    if !spawn_points.is_empty() {
        log::debug!("{} bombs dropped", spawn_points.len());
    }
    spawn_points.len()
}

/// Move bombs down and drop the ones below the playfield
pub fn advance_bombs(state: &mut GameState) {
    for bomb in &mut state.bombs {
        bomb.pos.y += bomb.speed;
    }
    let height = state.playfield.height;
    state.bombs.retain(|b| b.pos.y <= height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundSwitch;
    use crate::sim::state::{Alien, AlienKind, GamePhase, Playfield};

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Playfield::default(), SoundSwitch::new(true));
        state.phase = GamePhase::Playing;
        state
    }

    fn alien_at(state: &mut GameState, kind: AlienKind, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.aliens.push(Alien::new(id, kind, Vec2::new(x, y)));
    }

    #[test]
    fn test_sweep_waits_for_interval() {
        let mut state = playing_state();
        alien_at(&mut state, AlienKind::Normal, 100.0, 50.0);
        assert_eq!(update_sweep(&mut state, 999.0), SweepOutcome::Idle);
        assert_eq!(state.aliens[0].pos.x, 100.0);
        assert_eq!(update_sweep(&mut state, 1000.0), SweepOutcome::Moved);
        assert_eq!(state.aliens[0].pos.x, 130.0);
        assert_eq!(state.last_move_ms, 1000.0);
    }

    #[test]
    fn test_sweep_scales_by_kind() {
        let mut state = playing_state();
        alien_at(&mut state, AlienKind::Fast, 100.0, 50.0);
        alien_at(&mut state, AlienKind::Boss, 300.0, 5.0);
        update_sweep(&mut state, 1000.0);
        assert_eq!(state.aliens[0].pos.x, 145.0);
        assert_eq!(state.aliens[1].pos.x, 315.0);
    }

    #[test]
    fn test_right_edge_flips_and_steps_down() {
        let mut state = playing_state();
        let width = state.playfield.width;
        // Rightmost alien's right edge lands exactly on the boundary
        alien_at(&mut state, AlienKind::Normal, width - 30.0 - 30.0, 50.0);
        alien_at(&mut state, AlienKind::Normal, 100.0, 100.0);

        assert_eq!(update_sweep(&mut state, 1000.0), SweepOutcome::SteppedDown);
        assert_eq!(state.direction, -1.0);
        assert_eq!(state.aliens[0].pos.y, 80.0);
        assert_eq!(state.aliens[1].pos.y, 130.0);
        assert_eq!(state.aliens[0].rect().right(), width);
    }

    #[test]
    fn test_left_edge_flips_back() {
        let mut state = playing_state();
        state.direction = -1.0;
        alien_at(&mut state, AlienKind::Normal, 20.0, 50.0);
        assert_eq!(update_sweep(&mut state, 1000.0), SweepOutcome::SteppedDown);
        assert_eq!(state.direction, 1.0);
        assert_eq!(state.aliens[0].pos, Vec2::new(-10.0, 80.0));
    }

    #[test]
    fn test_step_down_to_player_row_loses() {
        let mut state = playing_state();
        let player_y = state.player.pos.y;
        let width = state.playfield.width;
        alien_at(&mut state, AlienKind::Normal, width - 40.0, player_y - 40.0);
        assert_eq!(update_sweep(&mut state, 1000.0), SweepOutcome::ReachedPlayer);
        assert!(state.is_over());
        assert!(!state.won);
    }

    #[test]
    fn test_bomb_interval_shrinks_with_level() {
        let interval = bomb_check_interval_ms(2000.0, 3);
        assert!((interval - 1538.46).abs() < 0.01);
        assert!(bomb_check_interval_ms(2000.0, 5) < interval);
        assert!((bomb_chance(1) - 0.04).abs() < 1e-12);
        assert!((bomb_chance(5) - 0.12).abs() < 1e-12);
    }

    #[test]
    fn test_no_bomb_check_before_interval() {
        let mut state = playing_state();
        state.level = 3;
        state.bomb_interval_ms = 2000.0;
        for i in 0..50 {
            alien_at(&mut state, AlienKind::Normal, 50.0 + i as f32, 50.0);
        }
        assert_eq!(drop_bombs(&mut state, 1538.0), 0);
        assert!(state.bombs.is_empty());
        assert_eq!(state.last_bomb_ms, 0.0);

        drop_bombs(&mut state, 1539.0);
        assert_eq!(state.last_bomb_ms, 1539.0);
    }

    #[test]
    fn test_certain_chance_drops_one_bomb_per_alien() {
        let mut state = playing_state();
        // Level high enough that the chance caps at 1.0
        state.level = 60;
        alien_at(&mut state, AlienKind::Normal, 100.0, 50.0);
        alien_at(&mut state, AlienKind::Normal, 200.0, 50.0);
        assert_eq!(drop_bombs(&mut state, 10_000.0), 2);
        let bomb = &state.bombs[0];
        assert_eq!(bomb.pos, Vec2::new(112.5, 80.0));
        assert_eq!(bomb.speed, BOMB_BASE_SPEED + 60.0);
    }

    #[test]
    fn test_bombs_removed_below_playfield() {
        let mut state = playing_state();
        let height = state.playfield.height;
        let id = state.next_entity_id();
        state.bombs.push(Bomb::new(id, Vec2::new(10.0, height - 1.0), 1));
        advance_bombs(&mut state);
        assert!(state.bombs.is_empty());

        let id = state.next_entity_id();
        state.bombs.push(Bomb::new(id, Vec2::new(10.0, height - 10.0), 1));
        advance_bombs(&mut state);
        assert_eq!(state.bombs.len(), 1);
    }
}
