//! Playback controller - core orchestration
//!
//! Owns the session, the countdown clock, the loaded sound and the
//! notification presenter, and is the only place any of them change. The UI
//! and the notification are both fed from `snapshot()`; neither keeps its
//! own copy of playback state.
//!
//! Audio calls happen before the state change they stand for. When a call
//! fails the session is left exactly as it was, so the visible state never
//! claims something the audio engine disagrees with.

use relief_core::{
    AppState, AppVisibility, AudioEngine, AudioOperation, NotificationAction, PlaybackStatus,
    ReliefError, SessionSnapshot, SoundHandle, WakeLock,
};
use relief_notification::{NotificationError, NotificationPresenter};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::{
    clock::Clock,
    command::PlayerCommand,
    config::PlayerConfig,
    error::{PlaybackError, Result},
    events::{PlayerEvent, UserNotice},
    lifecycle::{LifecycleObserver, LifecycleTransition},
    session::{Session, TickOutcome},
};

/// Capacity of the event channel; slow subscribers see `Lagged`
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Platform collaborators handed to the controller
pub struct PlayerDeps {
    /// Native audio engine
    pub audio: Box<dyn AudioEngine>,

    /// Notification presenter for this session
    pub presenter: NotificationPresenter,

    /// Keep-awake lock held while playing
    pub wake_lock: Box<dyn WakeLock>,
}

/// Single source of truth for one player session
pub struct PlaybackController {
    config: PlayerConfig,
    session: Session,
    clock: Clock,
    lifecycle: LifecycleObserver,

    engine: Box<dyn AudioEngine>,
    /// Loaded sound; `None` before load, after a failed load, and after shutdown
    sound: Option<SoundHandle>,
    load_failed: bool,
    /// The engine refused the stop at expiry and may still be looping
    stop_pending: bool,

    presenter: NotificationPresenter,
    wake_lock: Box<dyn WakeLock>,

    events: broadcast::Sender<PlayerEvent>,
    snapshot_tx: watch::Sender<SessionSnapshot>,

    notification_failure_reported: bool,
    shut_down: bool,
}

impl PlaybackController {
    /// Create a controller for a fresh idle session
    ///
    /// The sound is not loaded yet; call [`load`](Self::load) before playing.
    pub fn new(config: PlayerConfig, deps: PlayerDeps) -> Result<Self> {
        config.validate()?;

        let session = Session::new(config.default_duration_minutes);
        let lifecycle = LifecycleObserver::new();
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (snapshot_tx, _) = watch::channel(session.snapshot(false, lifecycle.visibility()));

        Ok(Self {
            clock: Clock::new(config.tick_interval()),
            config,
            session,
            lifecycle,
            engine: deps.audio,
            sound: None,
            load_failed: false,
            stop_pending: false,
            presenter: deps.presenter,
            wake_lock: deps.wake_lock,
            events,
            snapshot_tx,
            notification_failure_reported: false,
            shut_down: false,
        })
    }

    // ===== Queries =====

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn status(&self) -> PlaybackStatus {
        self.session.status()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.session.remaining_seconds()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.session.duration_minutes()
    }

    pub fn visibility(&self) -> AppVisibility {
        self.lifecycle.visibility()
    }

    /// Whether the sound is loaded and playable
    pub fn is_audio_available(&self) -> bool {
        self.sound.is_some()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_wake_lock_held(&self) -> bool {
        self.wake_lock.is_held()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn presenter(&self) -> &NotificationPresenter {
        &self.presenter
    }

    /// Current read-only view of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session
            .snapshot(self.is_audio_available(), self.lifecycle.visibility())
    }

    /// Subscribe to player events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Watch the session snapshot
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<PlayerEvent> {
        self.events.clone()
    }

    pub(crate) fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    // ===== Startup =====

    /// Load the configured sound
    ///
    /// A failure is permanent for this session: the user is told once and
    /// play stays disabled.
    pub async fn load(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.sound.is_some() {
            return Ok(());
        }
        if self.load_failed {
            return Err(PlaybackError::AudioUnavailable);
        }

        let options = self.config.load_options();
        info!(asset = %self.config.asset, "Loading sound");
        match self.engine.load(&self.config.asset, options).await {
            Ok(handle) => {
                info!(asset = %self.config.asset, "Sound loaded");
                self.sound = Some(handle);
                self.notify_state_changed();
                Ok(())
            }
            Err(e) => {
                error!(asset = %self.config.asset, error = %e, "Sound failed to load");
                self.load_failed = true;
                self.emit(PlayerEvent::Notice(UserNotice::AudioLoadFailed {
                    message: e.to_string(),
                }));
                self.notify_state_changed();
                Err(PlaybackError::AudioUnavailable)
            }
        }
    }

    // ===== Commands =====

    /// Dispatch a command to its transition
    pub async fn execute(&mut self, command: PlayerCommand) -> Result<()> {
        match command {
            PlayerCommand::Play => self.play().await,
            PlayerCommand::Pause => self.pause().await,
            PlayerCommand::Stop => self.stop().await,
            PlayerCommand::TogglePlayback => self.toggle_playback().await,
            PlayerCommand::SetDuration(minutes) => self.set_duration(minutes),
            PlayerCommand::AppState(state) => self.on_app_state(state).await,
            PlayerCommand::Shutdown => self.shutdown().await,
        }
    }

    /// Start from idle (full duration) or resume from paused
    pub async fn play(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.sound.is_none() {
            debug!("Play ignored: audio unavailable");
            return Err(PlaybackError::AudioUnavailable);
        }
        if self.session.status() == PlaybackStatus::Playing {
            debug!("Play ignored: already playing");
            return Ok(());
        }

        if let Err(e) = self.settle_pending_stop().await {
            warn!(error = %e, "Pending audio stop failed again; playing over it");
        }
        let Some(handle) = self.sound.as_ref() else {
            return Err(PlaybackError::AudioUnavailable);
        };
        if let Err(e) = self.engine.play(handle).await {
            return Err(self.audio_failure(AudioOperation::Play, e));
        }

        self.stop_pending = false;
        self.session.start();
        self.clock.start();
        if let Err(e) = self.wake_lock.acquire() {
            warn!(error = %e, "Failed to acquire wake lock");
        }
        info!(
            remaining_seconds = self.session.remaining_seconds(),
            "Playback started"
        );
        self.notify_state_changed();

        if self.lifecycle.visibility() == AppVisibility::Background {
            self.mirror_to_notification().await;
            self.presenter.start_background_updates();
        }
        Ok(())
    }

    /// Pause, keeping the remaining time
    pub async fn pause(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.session.status() != PlaybackStatus::Playing {
            debug!(status = %self.session.status(), "Pause ignored: not playing");
            return Ok(());
        }
        let Some(handle) = self.sound.as_ref() else {
            return Err(PlaybackError::AudioUnavailable);
        };

        if let Err(e) = self.engine.pause(handle).await {
            return Err(self.audio_failure(AudioOperation::Pause, e));
        }

        self.session.pause();
        self.clock.stop();
        self.wake_lock.release();
        info!(
            remaining_seconds = self.session.remaining_seconds(),
            "Playback paused"
        );
        self.notify_state_changed();

        if self.lifecycle.visibility() == AppVisibility::Background {
            self.mirror_to_notification().await;
        }
        Ok(())
    }

    /// Stop audio, reset the countdown and clear the notification
    ///
    /// From idle this re-asserts the idle state. The engine is only called
    /// if an earlier stop at expiry failed and the sound may still be looping.
    pub async fn stop(&mut self) -> Result<()> {
        self.ensure_live()?;
        if self.session.status() == PlaybackStatus::Idle {
            let settled = self
                .settle_pending_stop()
                .await
                .map_err(|e| self.audio_failure(AudioOperation::Stop, e));
            self.clock.stop();
            self.session.stop();
            self.clear_notification().await;
            self.publish();
            return settled;
        }
        let Some(handle) = self.sound.as_ref() else {
            return Err(PlaybackError::AudioUnavailable);
        };

        if let Err(e) = self.engine.stop(handle).await {
            return Err(self.audio_failure(AudioOperation::Stop, e));
        }

        self.finish_session();
        self.clear_notification().await;
        info!("Playback stopped");
        Ok(())
    }

    /// The in-app play/pause button
    pub async fn toggle_playback(&mut self) -> Result<()> {
        if self.session.status() == PlaybackStatus::Playing {
            self.pause().await
        } else {
            self.play().await
        }
    }

    /// Change the session length; rejected unless idle
    pub fn set_duration(&mut self, minutes: u32) -> Result<()> {
        self.ensure_live()?;
        let status = self.session.status();
        if status != PlaybackStatus::Idle {
            debug!(minutes, status = %status, "Duration change rejected");
            return Err(PlaybackError::DurationLocked { status });
        }
        self.config.check_duration(minutes)?;

        self.session.set_duration(minutes);
        debug!(minutes, "Duration changed");
        self.notify_state_changed();
        Ok(())
    }

    /// A tap on a notification button
    ///
    /// Routed through the same transitions as the in-app buttons.
    pub async fn handle_action(&mut self, action: NotificationAction) -> Result<()> {
        debug!(action = %action, "Notification action");
        self.execute(action.into()).await
    }

    /// An app-state event from the operating system
    pub async fn on_app_state(&mut self, state: AppState) -> Result<()> {
        self.ensure_live()?;
        match self.lifecycle.observe(state) {
            LifecycleTransition::EnteredBackground => {
                debug!("App entered background");
                self.publish();
                if self.snapshot().is_in_progress() {
                    self.mirror_to_notification().await;
                    self.presenter.start_background_updates();
                }
            }
            LifecycleTransition::EnteredForeground => {
                debug!("App entered foreground");
                self.clear_notification().await;
                self.publish();
            }
            LifecycleTransition::Unchanged => {}
        }
        Ok(())
    }

    /// One clock tick: advance the countdown and refresh the notification
    ///
    /// The notification refresh rides on the same tick as the countdown, so
    /// the two can never show different values.
    pub async fn on_tick(&mut self) -> TickOutcome {
        if self.shut_down {
            return TickOutcome::Ignored;
        }

        let outcome = self.session.tick();
        match outcome {
            TickOutcome::Ignored => self.clock.stop(),
            TickOutcome::Counting { remaining_seconds } => {
                self.publish();
                self.emit(PlayerEvent::Tick { remaining_seconds });
                if self.presenter.background_updates_active() {
                    let snapshot = self.snapshot();
                    if let Err(e) = self.presenter.refresh(&snapshot).await {
                        self.notification_failure(e);
                    }
                }
            }
            TickOutcome::Expired => self.expire().await,
        }
        outcome
    }

    // ===== Teardown =====

    /// Tear the session down
    ///
    /// Every step runs even when an earlier one fails; failures are logged.
    /// Safe to call more than once.
    pub async fn shutdown(&mut self) -> Result<()> {
        if self.shut_down {
            return Ok(());
        }
        info!("Shutting down player");

        self.clock.stop();

        if let Some(handle) = self.sound.as_ref() {
            if self.session.status() != PlaybackStatus::Idle || self.stop_pending {
                if let Err(e) = self.engine.stop(handle).await {
                    warn!(error = %e, "Failed to stop audio during shutdown");
                }
            }
        }
        if let Some(handle) = self.sound.take() {
            if let Err(e) = self.engine.unload(handle).await {
                warn!(error = %e, "Failed to unload sound");
            }
        }

        if let Err(e) = self.presenter.dispose().await {
            warn!(error = %e, "Failed to clear notification during shutdown");
        }
        self.wake_lock.release();

        self.session.stop();
        self.stop_pending = false;
        self.shut_down = true;
        self.publish();
        self.emit(PlayerEvent::ShutDown);
        Ok(())
    }

    // ===== Internals =====

    fn ensure_live(&self) -> Result<()> {
        if self.shut_down {
            Err(PlaybackError::ShutDown)
        } else {
            Ok(())
        }
    }

    /// Natural expiry: equivalent to `stop()` without an external caller
    async fn expire(&mut self) {
        info!("Session complete");
        if let Some(handle) = self.sound.as_ref() {
            if let Err(e) = self.engine.stop(handle).await {
                // The countdown has ended either way; the session goes idle
                // and the stop is retried by the next stop, play or shutdown.
                self.audio_failure(AudioOperation::Stop, e);
                self.stop_pending = true;
            }
        }
        self.finish_session();
        self.clear_notification().await;
        self.emit(PlayerEvent::Expired);
    }

    /// Retry an engine stop left over from a failed expiry
    async fn settle_pending_stop(&mut self) -> std::result::Result<(), ReliefError> {
        if !self.stop_pending {
            return Ok(());
        }
        if let Some(handle) = self.sound.as_ref() {
            self.engine.stop(handle).await?;
        }
        self.stop_pending = false;
        debug!("Pending audio stop settled");
        Ok(())
    }

    /// Idle, full duration, clock stopped, wake lock released
    fn finish_session(&mut self) {
        self.session.stop();
        self.clock.stop();
        self.wake_lock.release();
        self.notify_state_changed();
    }

    async fn mirror_to_notification(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.presenter.show(&snapshot).await {
            self.notification_failure(e);
        }
    }

    async fn clear_notification(&mut self) {
        self.presenter.stop_background_updates();
        if let Err(e) = self.presenter.hide().await {
            self.notification_failure(e);
        }
    }

    fn audio_failure(&self, operation: AudioOperation, err: ReliefError) -> PlaybackError {
        warn!(operation = %operation, error = %err, "Audio operation failed");
        let err = PlaybackError::audio(operation, err);
        if let PlaybackError::AudioOperation { operation, message } = &err {
            self.emit(PlayerEvent::Notice(UserNotice::PlaybackFailed {
                operation: *operation,
                message: message.clone(),
            }));
        }
        err
    }

    fn notification_failure(&mut self, err: NotificationError) {
        warn!(error = %err, "Notification update failed");
        if matches!(err, NotificationError::PermissionDenied) || self.notification_failure_reported
        {
            return;
        }
        self.notification_failure_reported = true;
        self.emit(PlayerEvent::Notice(UserNotice::NotificationFailed {
            message: err.to_string(),
        }));
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }

    fn notify_state_changed(&self) {
        let snapshot = self.snapshot();
        self.snapshot_tx.send_replace(snapshot.clone());
        self.emit(PlayerEvent::StateChanged { snapshot });
    }

    fn emit(&self, event: PlayerEvent) {
        // No subscribers is fine
        self.events.send(event).ok();
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if !self.shut_down {
            warn!("Player dropped without shutdown; releasing wake lock");
            self.clock.stop();
            self.wake_lock.release();
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("session", &self.session)
            .field("clock", &self.clock)
            .field("lifecycle", &self.lifecycle)
            .field("sound", &self.sound)
            .field("load_failed", &self.load_failed)
            .field("stop_pending", &self.stop_pending)
            .field("presenter", &self.presenter)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}
