//! Session state
//!
//! The single authoritative record of one player session. Every mutation
//! goes through a method that keeps `remaining_seconds` within
//! `[0, duration * 60]`.

use relief_core::{AppVisibility, PlaybackStatus, SessionSnapshot};

/// Result of advancing the countdown by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed
    Ignored,
    /// Countdown moved, time still left
    Counting { remaining_seconds: u32 },
    /// Countdown hit zero while playing
    Expired,
}

/// In-memory state of one player session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    duration_minutes: u32,
    remaining_seconds: u32,
    status: PlaybackStatus,
}

impl Session {
    /// Fresh idle session with the full duration on the clock
    pub fn new(duration_minutes: u32) -> Self {
        Self {
            duration_minutes,
            remaining_seconds: duration_minutes * 60,
            status: PlaybackStatus::Idle,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn total_seconds(&self) -> u32 {
        self.duration_minutes * 60
    }

    /// Put the full duration back on the clock
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds();
    }

    /// Enter `Playing`; a session started from idle begins at full duration
    pub fn start(&mut self) {
        if self.status == PlaybackStatus::Idle {
            self.reset();
        }
        self.status = PlaybackStatus::Playing;
    }

    /// Enter `Paused`, keeping the remaining time
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Enter `Idle` with the full duration restored
    pub fn stop(&mut self) {
        self.status = PlaybackStatus::Idle;
        self.reset();
    }

    /// Change the duration; only allowed while idle
    ///
    /// Returns false (and changes nothing) otherwise.
    pub fn set_duration(&mut self, minutes: u32) -> bool {
        if self.status != PlaybackStatus::Idle {
            return false;
        }
        self.duration_minutes = minutes;
        self.reset();
        true
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != PlaybackStatus::Playing {
            return TickOutcome::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Counting {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    /// Read-only view for the UI and the notification presenter
    pub fn snapshot(&self, audio_available: bool, visibility: AppVisibility) -> SessionSnapshot {
        SessionSnapshot {
            remaining_seconds: self.remaining_seconds,
            status: self.status,
            duration_minutes: self.duration_minutes,
            audio_available,
            visibility,
        }
    }
}
