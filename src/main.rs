//! Alien Onslaught entry point
//!
//! Native headless driver: plays one session with the autopilot at a fixed
//! 60 fps cadence, logs sound cues and level changes, then submits the final
//! score to the leaderboard.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use alien_onslaught::audio::{AudioManager, LogBackend, SoundSwitch};
#[cfg(not(target_arch = "wasm32"))]
use alien_onslaught::consts::FRAME_MS;
#[cfg(not(target_arch = "wasm32"))]
use alien_onslaught::highscores::{JsonFileStore, Leaderboard, SubmitOutcome};
#[cfg(not(target_arch = "wasm32"))]
use alien_onslaught::settings::Settings;
#[cfg(not(target_arch = "wasm32"))]
use alien_onslaught::sim::{Autopilot, Clock, GameEvent, GameSession, ManualClock};

/// Settings file used when none is given on the command line
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Hard stop for a demo run (about an hour of game time)
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u64 = 60 * 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Alien Onslaught (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ALIEN_ONSLAUGHT_SETTINGS").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load(&settings_path);

    let sound = SoundSwitch::new(settings.sound_enabled);
    let mut session = match GameSession::new(&settings, sound.clone()) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid settings in {}: {}", settings_path.display(), e);
            std::process::exit(1);
        }
    };
    if let Err(e) = session.select_ship_named(&settings.ship_class) {
        log::error!("Invalid settings in {}: {}", settings_path.display(), e);
        std::process::exit(1);
    }

    let mut audio = AudioManager::new(Box::new(LogBackend), sound);
    let mut pilot = Autopilot::new();
    let mut clock = ManualClock::new(0.0);
    let mut frames = 0u64;

    while !session.is_over().0 && frames < MAX_FRAMES {
        let input = pilot.next_input(&session.render_state());
        session.handle_input(input);
        clock.advance(FRAME_MS);
        session.tick(clock.now_ms());
        frames += 1;

        let events = session.drain_events();
        audio.handle_events(&events);
        for event in &events {
            match event {
                GameEvent::LevelChanged { level } => log::info!("Level {} incoming", level),
                GameEvent::TransitionFinished { level } => {
                    log::info!("Level {} started at frame {}", level, frames)
                }
                GameEvent::GameOver { won, score } => log::info!(
                    "{} with {} points after {} frames",
                    if *won { "Victory" } else { "Defeat" },
                    score,
                    frames
                ),
                GameEvent::Sound { .. } => {}
            }
        }
    }

    let Some(score) = session.final_score() else {
        log::warn!("Demo stopped after {} frames without finishing", frames);
        return;
    };

    let mut leaderboard = Leaderboard::new(JsonFileStore::new(&settings.scores_path));
    match leaderboard.submit(&settings.player_name, score) {
        SubmitOutcome::Saved { rank: Some(rank) } => log::info!("New high score! Rank #{}", rank),
        SubmitOutcome::Saved { rank: None } => log::info!("Score saved"),
        SubmitOutcome::Duplicate => log::warn!("Score already submitted"),
        SubmitOutcome::Offline => log::warn!("Leaderboard offline, score not saved"),
    }

    let board = leaderboard.high_scores();
    if !board.is_empty() {
        log::info!("=== High Scores ===");
        for (i, entry) in board.entries.iter().enumerate() {
            log::info!("{:>2}. {:<16} {:>8}", i + 1, entry.name, entry.score);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive GameSession directly; nothing to run here
}
