#![warn(clippy::all, clippy::pedantic)]

pub mod loader;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use rules::Rules;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: Rules,
    pub controls: ControlsConfig,
    pub terminal: TerminalConfig,
}

// Character keys; the arrow keys are always bound
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub rotate_cw: char,
    pub rotate_ccw: char,
    pub quit: char,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_cw: 't',
            rotate_ccw: 'r',
            quit: 'q',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub frame_ms: u64,
    // How long a key stays down after its last event when the terminal
    // doesn't report releases
    pub key_hold_ms: u64,
    pub flash_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            key_hold_ms: 150,
            flash_ms: 500,
        }
    }
}

impl TerminalConfig {
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    #[must_use]
    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }

    #[must_use]
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}
