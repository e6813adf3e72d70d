//! Shared test collaborators
//!
//! Mocks record every call into shared logs so tests can keep a handle after
//! the mock itself has been boxed into the controller.

#![allow(dead_code)]

use async_trait::async_trait;
use relief_core::{
    AssetRef, AudioEngine, AudioOperation, LoadOptions, NotificationBackend, NotificationContent,
    NotificationId, PermissionStatus, ReliefError, SoundHandle, WakeLock,
};
use relief_notification::{NotificationConfig, NotificationPresenter};
use relief_playback::{PlaybackController, PlayerConfig, PlayerDeps};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

// ===== Audio =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    Load,
    Play,
    Pause,
    Stop,
    Unload,
}

#[derive(Debug, Default)]
struct AudioState {
    calls: Vec<AudioCall>,
    fail_load: bool,
    fail_next: Option<AudioOperation>,
    play_delay: Option<Duration>,
    in_flight: bool,
    overlapped: bool,
    /// Whether the engine is audibly playing
    sounding: bool,
}

/// Scriptable audio engine
#[derive(Debug, Clone, Default)]
pub struct MockAudioEngine {
    state: Arc<Mutex<AudioState>>,
}

impl MockAudioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose `load` always fails
    pub fn failing_load() -> Self {
        let engine = Self::new();
        engine.state.lock().unwrap().fail_load = true;
        engine
    }

    /// Make the next call of `operation` fail once
    pub fn fail_next(&self, operation: AudioOperation) {
        self.state.lock().unwrap().fail_next = Some(operation);
    }

    /// Make every `play` take this long to settle
    pub fn set_play_delay(&self, delay: Duration) {
        self.state.lock().unwrap().play_delay = Some(delay);
    }

    pub fn calls(&self) -> Vec<AudioCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: AudioCall) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    pub fn last_call(&self) -> Option<AudioCall> {
        self.calls().last().copied()
    }

    /// Whether the engine itself believes the sound is playing
    pub fn is_sounding(&self) -> bool {
        self.state.lock().unwrap().sounding
    }

    /// Whether two calls were ever in flight at once
    pub fn saw_overlap(&self) -> bool {
        self.state.lock().unwrap().overlapped
    }

    fn begin(&self, call: AudioCall, operation: AudioOperation) -> relief_core::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.in_flight {
            state.overlapped = true;
        }
        state.calls.push(call);
        if state.fail_next == Some(operation) {
            state.fail_next = None;
            return Err(ReliefError::audio_operation(operation, "engine busy"));
        }
        state.in_flight = true;
        Ok(())
    }

    fn end(&self, sounding: bool) {
        let mut state = self.state.lock().unwrap();
        state.in_flight = false;
        state.sounding = sounding;
    }
}

#[async_trait]
impl AudioEngine for MockAudioEngine {
    async fn load(
        &mut self,
        _asset: &AssetRef,
        options: LoadOptions,
    ) -> relief_core::Result<SoundHandle> {
        assert!(options.looping);
        assert!(!options.autoplay);
        let mut state = self.state.lock().unwrap();
        state.calls.push(AudioCall::Load);
        if state.fail_load {
            return Err(ReliefError::audio_load("file not found"));
        }
        Ok(SoundHandle::new(1))
    }

    async fn play(&mut self, _handle: &SoundHandle) -> relief_core::Result<()> {
        self.begin(AudioCall::Play, AudioOperation::Play)?;
        let delay = self.state.lock().unwrap().play_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.end(true);
        Ok(())
    }

    async fn pause(&mut self, _handle: &SoundHandle) -> relief_core::Result<()> {
        self.begin(AudioCall::Pause, AudioOperation::Pause)?;
        self.end(false);
        Ok(())
    }

    async fn stop(&mut self, _handle: &SoundHandle) -> relief_core::Result<()> {
        self.begin(AudioCall::Stop, AudioOperation::Stop)?;
        self.end(false);
        Ok(())
    }

    async fn unload(&mut self, _handle: SoundHandle) -> relief_core::Result<()> {
        self.begin(AudioCall::Unload, AudioOperation::Unload)?;
        self.end(false);
        Ok(())
    }
}

// ===== Notifications =====

#[derive(Debug, Default)]
pub struct NotificationLog {
    pub presented: Vec<NotificationContent>,
    pub dismissed: Vec<NotificationId>,
    pub visible: Option<NotificationId>,
    pub fail_present: bool,
    next_id: u32,
}

/// Notification backend that records posts and dismissals
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    log: Arc<Mutex<NotificationLog>>,
    permission: PermissionStatus,
}

impl RecordingBackend {
    pub fn granted() -> Self {
        Self::with_permission(PermissionStatus::Granted)
    }

    pub fn with_permission(permission: PermissionStatus) -> Self {
        Self {
            log: Arc::new(Mutex::new(NotificationLog::default())),
            permission,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.log.lock().unwrap().visible.is_some()
    }

    pub fn presented_count(&self) -> usize {
        self.log.lock().unwrap().presented.len()
    }

    pub fn last_presented(&self) -> Option<NotificationContent> {
        self.log.lock().unwrap().presented.last().cloned()
    }

    pub fn set_fail_present(&self, fail: bool) {
        self.log.lock().unwrap().fail_present = fail;
    }
}

#[async_trait]
impl NotificationBackend for RecordingBackend {
    async fn request_permission(&mut self) -> relief_core::Result<PermissionStatus> {
        Ok(self.permission)
    }

    async fn present(
        &mut self,
        content: &NotificationContent,
    ) -> relief_core::Result<NotificationId> {
        let mut log = self.log.lock().unwrap();
        if log.fail_present {
            return Err(ReliefError::notification("renderer unavailable"));
        }
        log.next_id += 1;
        let id = NotificationId::new(format!("n{}", log.next_id));
        log.presented.push(content.clone());
        log.visible = Some(id.clone());
        Ok(id)
    }

    async fn dismiss(&mut self, id: &NotificationId) -> relief_core::Result<()> {
        let mut log = self.log.lock().unwrap();
        log.dismissed.push(id.clone());
        if log.visible.as_ref() == Some(id) {
            log.visible = None;
        }
        Ok(())
    }
}

// ===== Wake lock =====

#[derive(Debug, Clone, Default)]
pub struct MockWakeLock {
    held: Arc<AtomicBool>,
    acquisitions: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl MockWakeLock {
    pub fn held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    /// Make every `acquire` fail, as on a device without a power manager
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl WakeLock for MockWakeLock {
    fn acquire(&mut self) -> relief_core::Result<()> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ReliefError::wake_lock("power manager unavailable"));
        }
        self.held.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn release(&mut self) {
        self.held.store(false, Ordering::SeqCst);
    }

    fn is_held(&self) -> bool {
        self.held()
    }
}

// ===== Harness =====

/// Handles onto the collaborators of one controller
#[derive(Debug, Clone)]
pub struct Harness {
    pub audio: MockAudioEngine,
    pub notifications: RecordingBackend,
    pub wake_lock: MockWakeLock,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_audio(MockAudioEngine::new())
    }

    pub fn with_audio(audio: MockAudioEngine) -> Self {
        Self {
            audio,
            notifications: RecordingBackend::granted(),
            wake_lock: MockWakeLock::default(),
        }
    }

    pub fn with_permission(permission: PermissionStatus) -> Self {
        Self {
            notifications: RecordingBackend::with_permission(permission),
            ..Self::new()
        }
    }

    /// Build a controller without loading the sound
    pub async fn controller(&self, config: PlayerConfig) -> PlaybackController {
        let presenter = NotificationPresenter::create(
            Box::new(self.notifications.clone()),
            NotificationConfig::default(),
        )
        .await;
        let deps = PlayerDeps {
            audio: Box::new(self.audio.clone()),
            presenter,
            wake_lock: Box::new(self.wake_lock.clone()),
        };
        PlaybackController::new(config, deps).unwrap()
    }

    /// Build a controller and load the sound
    pub async fn loaded(&self, config: PlayerConfig) -> PlaybackController {
        let mut controller = self.controller(config).await;
        controller.load().await.unwrap();
        controller
    }
}

pub fn config_with_duration(minutes: u32) -> PlayerConfig {
    PlayerConfig {
        default_duration_minutes: minutes,
        ..PlayerConfig::default()
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("relief_playback=debug")
        .try_init()
        .ok();
}
