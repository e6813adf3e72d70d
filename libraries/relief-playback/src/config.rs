//! Player configuration

use relief_core::{AssetRef, LoadOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PlaybackError, Result};

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Session length a fresh player starts with (default: 30 minutes)
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,

    /// Shortest selectable session (default: 5 minutes)
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: u32,

    /// Longest selectable session (default: 120 minutes)
    #[serde(default = "default_max_duration_minutes")]
    pub max_duration_minutes: u32,

    /// Slider step (default: 5 minutes)
    #[serde(default = "default_duration_step_minutes")]
    pub duration_step_minutes: u32,

    /// Countdown resolution (default: 1000 ms)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Sound asset to loop
    #[serde(default = "default_asset")]
    pub asset: AssetRef,

    /// Playback gain, 0.0 - 1.0 (default: 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_duration_minutes() -> u32 {
    30
}

fn default_min_duration_minutes() -> u32 {
    5
}

fn default_max_duration_minutes() -> u32 {
    120
}

fn default_duration_step_minutes() -> u32 {
    5
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_asset() -> AssetRef {
    AssetRef::new("assets/sounds/white_noise.mp3")
}

fn default_volume() -> f32 {
    1.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            min_duration_minutes: default_min_duration_minutes(),
            max_duration_minutes: default_max_duration_minutes(),
            duration_step_minutes: default_duration_step_minutes(),
            tick_interval_ms: default_tick_interval_ms(),
            asset: default_asset(),
            volume: default_volume(),
        }
    }
}

impl PlayerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_duration_minutes == 0 {
            return Err(PlaybackError::InvalidConfig(
                "min_duration_minutes must be positive".to_string(),
            ));
        }
        if self.duration_step_minutes == 0 {
            return Err(PlaybackError::InvalidConfig(
                "duration_step_minutes must be positive".to_string(),
            ));
        }
        if self.min_duration_minutes > self.max_duration_minutes {
            return Err(PlaybackError::InvalidConfig(format!(
                "min_duration_minutes ({}) exceeds max_duration_minutes ({})",
                self.min_duration_minutes, self.max_duration_minutes
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume {} outside 0.0-1.0",
                self.volume
            )));
        }
        self.check_duration(self.default_duration_minutes)
            .map_err(|e| PlaybackError::InvalidConfig(format!("default duration: {e}")))
    }

    /// Check that `minutes` is a selectable duration
    pub fn check_duration(&self, minutes: u32) -> Result<()> {
        let in_range = (self.min_duration_minutes..=self.max_duration_minutes).contains(&minutes);
        let offset = minutes.saturating_sub(self.min_duration_minutes);
        let on_step = self.duration_step_minutes != 0 && offset % self.duration_step_minutes == 0;

        if in_range && on_step {
            Ok(())
        } else {
            Err(PlaybackError::InvalidDuration {
                minutes,
                min: self.min_duration_minutes,
                max: self.max_duration_minutes,
                step: self.duration_step_minutes,
            })
        }
    }

    /// Every selectable duration, shortest first
    pub fn duration_choices(&self) -> Vec<u32> {
        if self.duration_step_minutes == 0 {
            return vec![self.min_duration_minutes];
        }
        (self.min_duration_minutes..=self.max_duration_minutes)
            .step_by(self.duration_step_minutes as usize)
            .collect()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::ambient_loop(self.volume)
    }
}
