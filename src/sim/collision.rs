//! Collision resolution and scoring
//!
//! Removals are deferred: hits are marked during the pairwise scan and the
//! collections are compacted once at the end, so indices never shift
//! mid-iteration.

use super::state::GameState;
use crate::audio::SoundEffect;
use crate::consts::MAX_LEVEL;

/// Summary of one bullet/alien pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    /// Bullets that struck something
    pub hits: u32,
    /// Aliens whose health reached zero
    pub destroyed: u32,
    /// Score added this pass
    pub points: u64,
}

/// What clearing (or not clearing) the wave led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStatus {
    /// Aliens remain
    InProgress,
    /// Advanced to the given level; a transition is running
    LevelUp(u32),
    /// Final wave cleared
    Won,
}

/// Resolve bullet/alien overlaps.
///
/// Each bullet strikes at most one alien: the first living one in wave
/// order. An alien destroyed earlier in the pass is never hit again.
pub fn resolve_bullet_hits(state: &mut GameState) -> HitReport {
    let mut report = HitReport::default();
    let mut spent = vec![false; state.bullets.len()];

    for (bullet_idx, bullet) in state.bullets.iter().enumerate() {
        let bullet_rect = bullet.rect();
        let Some(alien) = state
            .aliens
            .iter_mut()
            .find(|a| a.is_alive() && a.rect().overlaps(&bullet_rect))
        else {
            continue;
        };

        spent[bullet_idx] = true;
        report.hits += 1;
        alien.health = alien.health.saturating_sub(1);
        if alien.health == 0 {
            report.destroyed += 1;
            report.points += alien.kind.score_value();
        }
    }

    if report.hits == 0 {
        return report;
    }

    let mut idx = 0;
    state.bullets.retain(|_| {
        let keep = !spent[idx];
        idx += 1;
        keep
    });
    state.aliens.retain(|a| a.is_alive());
    state.score += report.points;

    for _ in 0..report.destroyed {
        state.emit_sound(SoundEffect::Explosion);
    }
    report
}

/// Check bombs against the player. One hit is lethal.
///
/// Returns true if the player was hit (the game is over).
pub fn resolve_bomb_hits(state: &mut GameState) -> bool {
    let player_rect = state.player.rect();
    let Some(idx) = state
        .bombs
        .iter()
        .position(|b| b.rect().overlaps(&player_rect))
    else {
        return false;
    };

    state.bombs.remove(idx);
    state.emit_sound(SoundEffect::PlayerHit);
    state.emit_sound(SoundEffect::Explosion);
    state.end_game(false);
    true
}

/// Advance the level or win once the formation is gone
pub fn resolve_wave_clear(state: &mut GameState) -> WaveStatus {
    if !state.aliens.is_empty() {
        return WaveStatus::InProgress;
    }
    if state.level < MAX_LEVEL {
        state.level += 1;
        log::info!("Wave cleared, advancing to level {}", state.level);
        state.begin_transition();
        WaveStatus::LevelUp(state.level)
    } else {
        state.end_game(true);
        WaveStatus::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundSwitch;
    use crate::sim::state::{
        Alien, AlienKind, Bomb, Bullet, GameEvent, GamePhase, Playfield,
    };
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Playfield::default(), SoundSwitch::new(true));
        state.phase = GamePhase::Playing;
        state
    }

    fn add_alien(state: &mut GameState, kind: AlienKind, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.aliens.push(Alien::new(id, kind, Vec2::new(x, y)));
        id
    }

    fn add_bullet(state: &mut GameState, x: f32, y: f32) {
        let id = state.next_entity_id();
        state.bullets.push(Bullet::new(id, Vec2::new(x, y)));
    }

    fn explosions(state: &GameState) -> usize {
        state
            .events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    GameEvent::Sound {
                        effect: SoundEffect::Explosion
                    }
                )
            })
            .count()
    }

    #[test]
    fn test_normal_alien_dies_to_one_bullet() {
        let mut state = playing_state();
        add_alien(&mut state, AlienKind::Normal, 100.0, 100.0);
        add_alien(&mut state, AlienKind::Normal, 300.0, 100.0);
        add_bullet(&mut state, 110.0, 110.0);

        let report = resolve_bullet_hits(&mut state);
        assert_eq!(report.destroyed, 1);
        assert_eq!(state.score, 100);
        assert_eq!(state.aliens.len(), 1);
        assert!(state.bullets.is_empty());
        assert_eq!(explosions(&state), 1);
    }

    #[test]
    fn test_boss_takes_five_hits() {
        let mut state = playing_state();
        add_alien(&mut state, AlienKind::Boss, 370.0, 5.0);
        for hit in 1..=5 {
            add_bullet(&mut state, 390.0, 10.0);
            resolve_bullet_hits(&mut state);
            if hit < 5 {
                assert_eq!(state.aliens[0].health, 5 - hit);
                assert_eq!(state.score, 0);
            }
        }
        assert!(state.aliens.is_empty());
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_one_bullet_cannot_score_twice() {
        let mut state = playing_state();
        // Two aliens stacked so a single bullet overlaps both
        add_alien(&mut state, AlienKind::Normal, 100.0, 100.0);
        add_alien(&mut state, AlienKind::Fast, 105.0, 105.0);
        add_bullet(&mut state, 110.0, 110.0);

        let report = resolve_bullet_hits(&mut state);
        assert_eq!(report.hits, 1);
        assert_eq!(report.destroyed, 1);
        assert_eq!(state.score, 100);
        // Lower index wins; the fast alien survives
        assert_eq!(state.aliens.len(), 1);
        assert_eq!(state.aliens[0].kind, AlienKind::Fast);
    }

    #[test]
    fn test_destroyed_alien_not_hit_again() {
        let mut state = playing_state();
        add_alien(&mut state, AlienKind::Normal, 100.0, 100.0);
        add_bullet(&mut state, 110.0, 110.0);
        add_bullet(&mut state, 115.0, 110.0);

        let report = resolve_bullet_hits(&mut state);
        assert_eq!(report.hits, 1);
        assert_eq!(state.score, 100);
        // The second bullet flies on
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.x, 115.0);
    }

    #[test]
    fn test_two_bullets_on_boss_same_tick() {
        let mut state = playing_state();
        add_alien(&mut state, AlienKind::Boss, 370.0, 5.0);
        add_bullet(&mut state, 380.0, 10.0);
        add_bullet(&mut state, 400.0, 10.0);
        let report = resolve_bullet_hits(&mut state);
        assert_eq!(report.hits, 2);
        assert_eq!(state.aliens[0].health, 3);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_miss_leaves_everything() {
        let mut state = playing_state();
        add_alien(&mut state, AlienKind::Normal, 100.0, 100.0);
        add_bullet(&mut state, 300.0, 300.0);
        assert_eq!(resolve_bullet_hits(&mut state), HitReport::default());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.aliens.len(), 1);
    }

    #[test]
    fn test_bomb_hit_ends_game() {
        let mut state = playing_state();
        let target = state.player.top_center();
        let id = state.next_entity_id();
        state.bombs.push(Bomb::new(id, target, 1));

        assert!(resolve_bomb_hits(&mut state));
        assert!(state.is_over());
        assert!(!state.won);
        assert!(state.bombs.is_empty());
        assert!(state.events.contains(&GameEvent::Sound {
            effect: SoundEffect::PlayerHit
        }));
        assert!(state.events.contains(&GameEvent::GameOver {
            won: false,
            score: 0
        }));
    }

    #[test]
    fn test_bomb_miss() {
        let mut state = playing_state();
        let id = state.next_entity_id();
        state.bombs.push(Bomb::new(id, Vec2::new(0.0, 0.0), 1));
        assert!(!resolve_bomb_hits(&mut state));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_clear_advances_level() {
        let mut state = playing_state();
        assert_eq!(resolve_wave_clear(&mut state), WaveStatus::LevelUp(2));
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::LevelTransition);
        assert!(state.events.contains(&GameEvent::LevelChanged { level: 2 }));
    }

    #[test]
    fn test_clear_on_last_level_wins() {
        let mut state = playing_state();
        state.level = MAX_LEVEL;
        state.score = 1234;
        assert_eq!(resolve_wave_clear(&mut state), WaveStatus::Won);
        assert_eq!(state.level, MAX_LEVEL);
        assert!(state.is_over());
        assert!(state.won);
    }

    #[test]
    fn test_aliens_remaining_keeps_playing() {
        let mut state = playing_state();
        add_alien(&mut state, AlienKind::Normal, 100.0, 100.0);
        assert_eq!(resolve_wave_clear(&mut state), WaveStatus::InProgress);
        assert_eq!(state.level, 1);
    }
}
