//! Game session: the single mutation boundary for a run
//!
//! Hosts drive a session with three calls per frame: `handle_input` with the
//! latest key snapshot, `tick` with the current monotonic time, and
//! `render_state`/`drain_events` to feed the renderer, audio and UI.

use serde::Serialize;

use super::state::{
    Alien, Bomb, Bullet, GameEvent, GamePhase, GameState, Playfield, Player, ShipClass,
};
use super::tick::{InputSnapshot, fire, tick, transition_progress};
use crate::audio::SoundSwitch;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Read-only view of everything the renderer draws
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderState<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub playfield: Playfield,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub bombs: &'a [Bomb],
    pub aliens: &'a [Alien],
    /// Level transition animation progress, 0..=1
    pub transition_progress: f32,
}

/// One run of the game, from ship selection to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    input: InputSnapshot,
}

impl GameSession {
    /// Build a session from validated settings.
    ///
    /// Uses the configured seed, or a random one when none is set.
    pub fn new(settings: &Settings, sound: SoundSwitch) -> Result<Self, ConfigError> {
        settings.validate()?;
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        let mut session = Self::with_seed(seed, settings.playfield()?, sound);
        session.state.bomb_interval_ms = settings.bomb_interval_ms;
        session.state.transition_duration = settings.transition_frames;
        Ok(session)
    }

    /// Build a session with default tuning
    pub fn with_seed(seed: u64, playfield: Playfield, sound: SoundSwitch) -> Self {
        log::info!("New session with seed {}", seed);
        Self {
            state: GameState::new(seed, playfield, sound),
            input: InputSnapshot::default(),
        }
    }

    /// Pick the player's ship and start the first level transition.
    ///
    /// Returns false if a ship was already chosen.
    pub fn select_ship(&mut self, class: ShipClass) -> bool {
        if self.state.phase != GamePhase::ShipSelectPending {
            return false;
        }
        log::info!("Ship selected: {}", class);
        self.state.player = Player::new(class, &self.state.playfield);
        self.state.level = 1;
        self.state.begin_transition();
        true
    }

    /// Parse and select a ship by name
    pub fn select_ship_named(&mut self, name: &str) -> Result<bool, ConfigError> {
        let class: ShipClass = name.parse()?;
        Ok(self.select_ship(class))
    }

    /// Record the latest input snapshot.
    ///
    /// Fire is edge-triggered: one shot per press, not per held frame.
    pub fn handle_input(&mut self, snapshot: InputSnapshot) {
        let pressed = snapshot.fire && !self.input.fire;
        self.input = snapshot;
        if pressed {
            self.fire();
        }
    }

    /// Run one frame at monotonic time `now_ms`. No-op once the game is over.
    pub fn tick(&mut self, now_ms: f64) {
        let input = self.input;
        tick(&mut self.state, &input, now_ms);
    }

    /// Shoot from the player's position. No-op unless playing.
    pub fn fire(&mut self) -> bool {
        fire(&mut self.state)
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            phase: self.state.phase,
            level: self.state.level,
            score: self.state.score,
            playfield: self.state.playfield,
            player: &self.state.player,
            bullets: &self.state.bullets,
            bombs: &self.state.bombs,
            aliens: &self.state.aliens,
            transition_progress: transition_progress(&self.state),
        }
    }

    /// `(over, won)`; `won` is false until the game is over
    pub fn is_over(&self) -> (bool, bool) {
        let over = self.state.is_over();
        (over, over && self.state.won)
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Final score once the game is over
    pub fn final_score(&self) -> Option<u64> {
        self.state.is_over().then_some(self.state.score)
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Full state, for inspection
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state, for test setup
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
