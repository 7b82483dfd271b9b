//! Demo-mode autopilot
//!
//! Plays the game from the same view a renderer gets, producing the key
//! snapshot a human would. Used by the headless driver and soak tests.

use super::session::RenderState;
use super::state::GamePhase;
use super::tick::InputSnapshot;

/// How far above the ship a falling bomb counts as a threat (pixels)
const DODGE_RANGE: f32 = 160.0;
/// Extra horizontal clearance kept around the ship when dodging
const DODGE_MARGIN: f32 = 8.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Fire state sent last frame; released between shots to make fresh presses
    fire_held: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this frame's keys
    pub fn next_input(&mut self, view: &RenderState<'_>) -> InputSnapshot {
        if view.phase != GamePhase::Playing {
            self.fire_held = false;
            return InputSnapshot::default();
        }

        let player = view.player;
        let ship_left = player.pos.x - DODGE_MARGIN;
        let ship_right = player.pos.x + player.size.x + DODGE_MARGIN;
        let ship_center = player.pos.x + player.size.x / 2.0;

        // Closest bomb falling onto the ship
        let threat = view
            .bombs
            .iter()
            .filter(|b| {
                let gap = player.pos.y - (b.pos.y + b.size.y);
                gap >= 0.0
                    && gap < DODGE_RANGE
                    && b.pos.x + b.size.x > ship_left
                    && b.pos.x < ship_right
            })
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(bomb) = threat {
            let bomb_center = bomb.pos.x + bomb.size.x / 2.0;
            let room_left = player.pos.x;
            let room_right = view.playfield.width - (player.pos.x + player.size.x);
            // Run away from the bomb unless that side is walled in
            let go_left = if bomb_center >= ship_center {
                room_left > player.speed
            } else {
                room_right <= player.speed
            };
            self.fire_held = false;
            return InputSnapshot {
                left: go_left,
                right: !go_left,
                fire: false,
            };
        }

        // Lowest alien is the most urgent; break ties by distance
        let target = view.aliens.iter().filter(|a| a.is_alive()).max_by(|a, b| {
            let a_bottom = a.pos.y + a.size.y;
            let b_bottom = b.pos.y + b.size.y;
            a_bottom.total_cmp(&b_bottom).then_with(|| {
                let a_dx = (a.pos.x + a.size.x / 2.0 - ship_center).abs();
                let b_dx = (b.pos.x + b.size.x / 2.0 - ship_center).abs();
                b_dx.total_cmp(&a_dx)
            })
        });

        let Some(alien) = target else {
            self.fire_held = false;
            return InputSnapshot::default();
        };

        let dx = alien.pos.x + alien.size.x / 2.0 - ship_center;
        let aligned = dx.abs() <= alien.size.x / 2.0;
        let fire = aligned && !self.fire_held;
        self.fire_held = fire;

        InputSnapshot {
            left: dx < -player.speed,
            right: dx > player.speed,
            fire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Alien, AlienKind, Bomb, Playfield, Player, ShipClass};
    use glam::Vec2;

    fn view<'a>(
        player: &'a Player,
        bombs: &'a [Bomb],
        aliens: &'a [Alien],
        phase: GamePhase,
    ) -> RenderState<'a> {
        RenderState {
            phase,
            level: 1,
            score: 0,
            playfield: Playfield::default(),
            player,
            bullets: &[],
            bombs,
            aliens,
            transition_progress: 1.0,
        }
    }

    #[test]
    fn test_idle_outside_play() {
        let player = Player::new(ShipClass::Fighter, &Playfield::default());
        let aliens = [Alien::new(1, AlienKind::Normal, Vec2::new(385.0, 50.0))];
        let mut pilot = Autopilot::new();
        let input = pilot.next_input(&view(&player, &[], &aliens, GamePhase::LevelTransition));
        assert_eq!(input, InputSnapshot::default());
    }

    #[test]
    fn test_steers_toward_lowest_alien() {
        let player = Player::new(ShipClass::Fighter, &Playfield::default());
        let aliens = [
            Alien::new(1, AlienKind::Normal, Vec2::new(700.0, 50.0)),
            Alien::new(2, AlienKind::Normal, Vec2::new(50.0, 150.0)),
        ];
        let mut pilot = Autopilot::new();
        let input = pilot.next_input(&view(&player, &[], &aliens, GamePhase::Playing));
        assert!(input.left);
        assert!(!input.right);
        assert!(!input.fire);
    }

    #[test]
    fn test_fire_releases_between_shots() {
        let player = Player::new(ShipClass::Fighter, &Playfield::default());
        // Centered over the ship
        let aliens = [Alien::new(1, AlienKind::Normal, Vec2::new(385.0, 100.0))];
        let mut pilot = Autopilot::new();
        let v = view(&player, &[], &aliens, GamePhase::Playing);
        let presses: Vec<bool> = (0..4).map(|_| pilot.next_input(&v).fire).collect();
        assert_eq!(presses, vec![true, false, true, false]);
    }

    #[test]
    fn test_dodges_bomb_overhead() {
        let player = Player::new(ShipClass::Fighter, &Playfield::default());
        let aliens = [Alien::new(1, AlienKind::Normal, Vec2::new(385.0, 100.0))];
        // Slightly right of the ship's center, just above it
        let bomb_x = player.pos.x + player.size.x / 2.0 + 2.0;
        let bombs = [Bomb::new(5, Vec2::new(bomb_x, player.pos.y - 60.0), 1)];
        let mut pilot = Autopilot::new();
        let input = pilot.next_input(&view(&player, &bombs, &aliens, GamePhase::Playing));
        assert!(input.left);
        assert!(!input.fire);
    }

    #[test]
    fn test_dodges_away_from_wall() {
        let field = Playfield::default();
        let mut player = Player::new(ShipClass::Fighter, &field);
        player.pos.x = 0.0;
        let bombs = [Bomb::new(5, Vec2::new(25.0, player.pos.y - 40.0), 1)];
        let mut pilot = Autopilot::new();
        let input = pilot.next_input(&view(&player, &bombs, &[], GamePhase::Playing));
        assert!(input.right);
    }
}
