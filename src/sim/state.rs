//! Game state and core simulation types
//!
//! Entities are plain data; all mutation happens in the tick pipeline
//! (`tick`, `enemy`, `collision`) or through [`super::GameSession`].

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::audio::{SoundEffect, SoundSwitch};
use crate::consts::*;
use crate::error::ConfigError;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to pick a ship
    ShipSelectPending,
    /// Non-interactive interstitial before a wave starts
    LevelTransition,
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Selectable player hulls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipClass {
    /// Small and quick
    Scout,
    #[default]
    Fighter,
    /// Big and slow
    Heavy,
}

impl ShipClass {
    pub const ALL: [ShipClass; 3] = [ShipClass::Scout, ShipClass::Fighter, ShipClass::Heavy];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShipClass::Scout => "scout",
            ShipClass::Fighter => "fighter",
            ShipClass::Heavy => "heavy",
        }
    }

    /// Horizontal speed in pixels per tick
    pub fn speed(&self) -> f32 {
        match self {
            ShipClass::Scout => 7.0,
            ShipClass::Fighter => 5.0,
            ShipClass::Heavy => 3.5,
        }
    }

    /// Collision box size
    pub fn size(&self) -> Vec2 {
        match self {
            ShipClass::Scout => Vec2::new(30.0, 30.0),
            ShipClass::Fighter => Vec2::new(40.0, 40.0),
            ShipClass::Heavy => Vec2::new(50.0, 50.0),
        }
    }
}

impl FromStr for ShipClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scout" => Ok(ShipClass::Scout),
            "fighter" => Ok(ShipClass::Fighter),
            "heavy" => Ok(ShipClass::Heavy),
            _ => Err(ConfigError::UnknownShipClass {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Playfield bounds; origin top-left, +y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ConfigError::InvalidPlayfield { width, height });
        }
        Ok(Self { width, height })
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels per tick)
    pub speed: f32,
    pub class: ShipClass,
}

impl Player {
    /// Spawn horizontally centered near the bottom of the playfield
    pub fn new(class: ShipClass, field: &Playfield) -> Self {
        let size = class.size();
        Self {
            pos: Vec2::new(
                (field.width - size.x) / 2.0,
                field.height - PLAYER_BOTTOM_OFFSET,
            ),
            size,
            speed: class.speed(),
            class,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Where new bullets appear
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }

    /// Apply one tick of held movement keys, staying inside the playfield
    pub fn steer(&mut self, left: bool, right: bool, field: &Playfield) {
        if left && self.pos.x > 0.0 {
            self.pos.x = (self.pos.x - self.speed).max(0.0);
        }
        if right && self.pos.x + self.size.x < field.width {
            self.pos.x = (self.pos.x + self.speed).min(field.width - self.size.x);
        }
    }
}

/// A player projectile travelling up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bullet {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// An alien projectile travelling down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick, fixed at spawn from the level
    pub speed: f32,
}

impl Bomb {
    pub fn new(id: u32, pos: Vec2, level: u32) -> Self {
        Self {
            id,
            pos,
            size: Vec2::new(BOMB_WIDTH, BOMB_HEIGHT),
            speed: BOMB_BASE_SPEED + level as f32,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Alien types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlienKind {
    #[default]
    Normal,
    /// Sweeps further per move; drawn smaller but collides like a normal
    Fast,
    /// One per wave on late levels, takes several hits
    Boss,
}

impl AlienKind {
    /// Points awarded on destruction
    pub fn score_value(&self) -> u64 {
        match self {
            AlienKind::Normal => 100,
            AlienKind::Fast => 200,
            AlienKind::Boss => 500,
        }
    }

    pub fn max_health(&self) -> u8 {
        match self {
            AlienKind::Boss => 5,
            _ => 1,
        }
    }

    /// Scales the horizontal sweep distance
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            AlienKind::Normal => 1.0,
            AlienKind::Fast => 1.5,
            AlienKind::Boss => 0.5,
        }
    }

    /// Collision box; fast aliens keep the full box despite their sprite
    pub fn size(&self) -> Vec2 {
        match self {
            AlienKind::Boss => Vec2::new(BOSS_WIDTH, BOSS_HEIGHT),
            _ => Vec2::new(ALIEN_SIZE, ALIEN_SIZE),
        }
    }
}

/// An alien entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub id: u32,
    pub kind: AlienKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u8,
}

impl Alien {
    pub fn new(id: u32, kind: AlienKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: kind.size(),
            health: kind.max_health(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Events for audio and UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Play a sound cue (only queued while sound is enabled)
    Sound { effect: SoundEffect },
    /// A level-transition started for this level
    LevelChanged { level: u32 },
    /// The transition ended and the wave for this level is live
    TransitionFinished { level: u32 },
    /// Run ended; the score is final
    GameOver { won: bool, score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub playfield: Playfield,
    pub phase: GamePhase,
    /// Current level, 1..=MAX_LEVEL
    pub level: u32,
    /// Monotonic score
    pub score: u64,
    /// Only meaningful once `phase == GameOver`
    pub won: bool,
    /// Formation direction, +1.0 (right) or -1.0 (left)
    pub direction: f32,
    /// Sweep interval for the current wave (ms)
    pub move_interval_ms: f64,
    /// Base bomb check interval before the level adjustment (ms)
    pub bomb_interval_ms: f64,
    pub last_move_ms: f64,
    pub last_bomb_ms: f64,
    /// Frames left in the current level transition
    pub transition_ticks: u32,
    /// Configured transition length
    pub transition_duration: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub bombs: Vec<Bomb>,
    /// Living aliens in wave order
    pub aliens: Vec<Alien>,
    /// Pending events for collaborators
    pub events: Vec<GameEvent>,
    sound: SoundSwitch,
    next_id: u32,
}

impl GameState {
    /// Create a fresh state waiting for ship selection
    pub fn new(seed: u64, playfield: Playfield, sound: SoundSwitch) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            phase: GamePhase::ShipSelectPending,
            level: 1,
            score: 0,
            won: false,
            direction: 1.0,
            move_interval_ms: BASE_MOVE_INTERVAL_MS,
            bomb_interval_ms: BOMB_INTERVAL_MS,
            last_move_ms: 0.0,
            last_bomb_ms: 0.0,
            transition_ticks: 0,
            transition_duration: TRANSITION_FRAMES,
            time_ticks: 0,
            player: Player::new(ShipClass::default(), &playfield),
            bullets: Vec::new(),
            bombs: Vec::new(),
            aliens: Vec::new(),
            events: Vec::new(),
            sound,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// ID the next allocation will return
    pub fn peek_entity_id(&self) -> u32 {
        self.next_id
    }

    /// Mark `count` IDs as used (after a bulk spawn starting at `peek_entity_id`)
    pub fn skip_entity_ids(&mut self, count: usize) {
        self.next_id += count as u32;
    }

    /// Queue a sound cue if the external sound switch is on
    pub fn emit_sound(&mut self, effect: SoundEffect) {
        if self.sound.is_enabled() {
            self.events.push(GameEvent::Sound { effect });
        }
    }

    /// End the run. Idempotent: the first outcome sticks.
    pub fn end_game(&mut self, won: bool) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.won = won;
        log::info!(
            "Game over on level {}: {} with score {}",
            self.level,
            if won { "won" } else { "lost" },
            self.score
        );
        self.events.push(GameEvent::GameOver {
            won,
            score: self.score,
        });
    }

    /// Enter the level transition for the current level
    pub fn begin_transition(&mut self) {
        self.bullets.clear();
        self.bombs.clear();
        self.transition_ticks = self.transition_duration;
        self.phase = GamePhase::LevelTransition;
        self.events.push(GameEvent::LevelChanged { level: self.level });
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
