//! Configuration errors
//!
//! Only construction and level entry can fail. A running tick is total over
//! valid state, so nothing in here is ever produced by `tick`.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Ship class name did not match any known hull
    UnknownShipClass { name: String },
    /// Levels start at 1
    InvalidLevel { level: u32 },
    /// Playfield must have finite, positive dimensions
    InvalidPlayfield { width: f32, height: f32 },
    /// Bomb interval must be a positive number of milliseconds
    InvalidBombInterval { ms: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownShipClass { name } => {
                write!(f, "unknown ship class: {name:?} (expected scout, fighter or heavy)")
            }
            Self::InvalidLevel { level } => write!(f, "invalid level: {level} (levels start at 1)"),
            Self::InvalidPlayfield { width, height } => {
                write!(f, "invalid playfield: {width}x{height}")
            }
            Self::InvalidBombInterval { ms } => write!(f, "invalid bomb interval: {ms}ms"),
        }
    }
}

impl std::error::Error for ConfigError {}
