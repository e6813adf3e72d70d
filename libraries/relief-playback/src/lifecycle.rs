//! App lifecycle observer
//!
//! Folds the operating system's app-state events into foreground/background
//! transitions. Only a move away from `Active` counts as entering the
//! background; `Inactive -> Background` is the same absence continuing.

use relief_core::{AppState, AppVisibility};

/// What the player should do about an app-state event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleTransition {
    /// The app just left the screen
    EnteredBackground,
    /// The app is on screen (reported on every `Active` event)
    EnteredForeground,
    /// Nothing the player needs to react to
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct LifecycleObserver {
    state: AppState,
}

impl LifecycleObserver {
    /// Observer for an app that starts on screen
    pub fn new() -> Self {
        Self::with_state(AppState::Active)
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn visibility(&self) -> AppVisibility {
        self.state.into()
    }

    /// Record an app-state event and classify it
    pub fn observe(&mut self, next: AppState) -> LifecycleTransition {
        let previous = std::mem::replace(&mut self.state, next);
        match (previous, next) {
            (_, AppState::Active) => LifecycleTransition::EnteredForeground,
            (AppState::Active, AppState::Inactive | AppState::Background) => {
                LifecycleTransition::EnteredBackground
            }
            _ => LifecycleTransition::Unchanged,
        }
    }
}

impl Default for LifecycleObserver {
    fn default() -> Self {
        Self::new()
    }
}
