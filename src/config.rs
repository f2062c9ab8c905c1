//! Game configuration
//!
//! Collected by the setup shell and handed to the engine at start time;
//! immutable for the duration of one game.

use crate::board::Stone;
use crate::rules::PlacementRule;
use serde::{Deserialize, Serialize};

/// Who plays which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two humans sharing one instance (hotseat)
    LocalTwoPlayer,
    /// Human vs the heuristic engine
    VsAi { human: Stone },
    /// Two instances linked by a peer transport; `local` is the color this
    /// instance controls
    Online { local: Stone },
}

/// Configuration for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cube side length. The UI offers 3–6; the engine accepts any size
    /// that can hold the win length.
    pub grid_size: usize,
    /// Run length required to win
    pub win_length: usize,
    pub mode: GameMode,
    pub placement: PlacementRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            win_length: 4,
            mode: GameMode::LocalTwoPlayer,
            placement: PlacementRule::Gravity,
        }
    }
}

/// Errors reported by [`GameConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("win_length must be at least 3 (got {0})")]
    WinLengthTooShort(usize),

    #[error("win_length {win_length} does not fit grid_size {grid_size}")]
    WinLengthExceedsGrid { win_length: usize, grid_size: usize },
}

impl GameConfig {
    /// Validate configuration values.
    ///
    /// The setup shell is expected to enforce these before starting; the
    /// session additionally clamps on start so a violating config can
    /// never corrupt win-detection bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_length < 3 {
            return Err(ConfigError::WinLengthTooShort(self.win_length));
        }
        if self.win_length > self.grid_size {
            return Err(ConfigError::WinLengthExceedsGrid {
                win_length: self.win_length,
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }

    /// Color driven by the engine, if any.
    pub fn ai_color(&self) -> Option<Stone> {
        match self.mode {
            GameMode::VsAi { human } => Some(human.opponent()),
            _ => None,
        }
    }
}
