//! Sound cue dispatch
//!
//! The simulation only emits [`SoundEffect`] identities. The audio manager
//! turns them into cues for whatever backend the host plugs in.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Alien destroyed or bomb detonated
    Explosion,
    /// Player struck by a bomb
    PlayerHit,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explosion => "explosion",
            SoundEffect::PlayerHit => "player-hit",
        }
    }

    /// Synth note and length in seconds
    fn tone(&self) -> (&'static str, f32) {
        match self {
            SoundEffect::Shoot => ("C4", 0.1),
            SoundEffect::Explosion => ("G2", 0.1),
            SoundEffect::PlayerHit => ("C2", 0.4),
        }
    }
}

/// Shared on/off toggle owned by the UI.
///
/// Clones share the same flag; the simulation only reads it.
#[derive(Debug, Clone)]
pub struct SoundSwitch(Rc<Cell<bool>>);

impl SoundSwitch {
    pub fn new(enabled: bool) -> Self {
        Self(Rc::new(Cell::new(enabled)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.0.set(enabled);
    }

    /// Flip the switch, returning the new state
    pub fn toggle(&self) -> bool {
        let enabled = !self.0.get();
        self.0.set(enabled);
        enabled
    }
}

impl Default for SoundSwitch {
    fn default() -> Self {
        Self::new(true)
    }
}

/// A fully resolved sound to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: SoundEffect,
    pub note: &'static str,
    pub duration: f32,
    pub volume: f32,
}

/// Something that can actually make noise
pub trait SoundBackend {
    fn play(&mut self, cue: &Cue);
}

/// Backend that writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, cue: &Cue) {
        log::debug!(
            "♪ {} ({} for {:.2}s at {:.0}%)",
            cue.effect.name(),
            cue.note,
            cue.duration,
            cue.volume * 100.0
        );
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn SoundBackend>,
    switch: SoundSwitch,
    master_volume: f32,
    sfx_volume: f32,
}

impl AudioManager {
    pub fn new(backend: Box<dyn SoundBackend>, switch: SoundSwitch) -> Self {
        Self {
            backend,
            switch,
            master_volume: 0.8,
            sfx_volume: 1.0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.switch.is_enabled() {
            self.master_volume * self.sfx_volume
        } else {
            0.0
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        let (note, duration) = effect.tone();
        self.backend.play(&Cue {
            effect,
            note,
            duration,
            volume,
        });
    }

    /// Play every sound event in a drained batch, ignoring the rest
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::Sound { effect } = event {
                self.play(*effect);
            }
        }
    }
}
