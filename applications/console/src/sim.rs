//! Simulated platform collaborators
//!
//! Stand-ins for the native audio engine, notification shade and wake lock,
//! so the session core can be driven from a terminal. Each one logs what a
//! real platform would have done.

use async_trait::async_trait;
use relief_core::{
    AssetRef, AudioEngine, AudioOperation, LoadOptions, NotificationBackend, NotificationContent,
    NotificationId, PermissionStatus, ReliefError, SoundHandle, WakeLock,
};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Audio engine that only tracks whether it would be making sound
#[derive(Debug)]
pub struct SimulatedAudio {
    latency: Duration,
    fail_load: bool,
    next_handle: u64,
    loaded: Option<SoundHandle>,
    playing: bool,
}

impl SimulatedAudio {
    pub fn new(latency: Duration, fail_load: bool) -> Self {
        Self {
            latency,
            fail_load,
            next_handle: 1,
            loaded: None,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    async fn settle(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn check(&self, operation: AudioOperation, handle: &SoundHandle) -> relief_core::Result<()> {
        if self.loaded.as_ref() == Some(handle) {
            Ok(())
        } else {
            Err(ReliefError::audio_operation(operation, "unknown sound handle"))
        }
    }
}

#[async_trait]
impl AudioEngine for SimulatedAudio {
    async fn load(
        &mut self,
        asset: &AssetRef,
        options: LoadOptions,
    ) -> relief_core::Result<SoundHandle> {
        self.settle().await;
        if self.fail_load {
            return Err(ReliefError::audio_load(format!("cannot open {asset}")));
        }
        let handle = SoundHandle::new(self.next_handle);
        self.next_handle += 1;
        self.loaded = Some(handle.clone());
        info!(
            asset = %asset,
            looping = options.looping,
            volume = options.volume,
            "[audio] loaded"
        );
        Ok(handle)
    }

    async fn play(&mut self, handle: &SoundHandle) -> relief_core::Result<()> {
        self.check(AudioOperation::Play, handle)?;
        self.settle().await;
        self.playing = true;
        debug!("[audio] playing");
        Ok(())
    }

    async fn pause(&mut self, handle: &SoundHandle) -> relief_core::Result<()> {
        self.check(AudioOperation::Pause, handle)?;
        self.settle().await;
        self.playing = false;
        debug!("[audio] paused");
        Ok(())
    }

    async fn stop(&mut self, handle: &SoundHandle) -> relief_core::Result<()> {
        self.check(AudioOperation::Stop, handle)?;
        self.settle().await;
        self.playing = false;
        debug!("[audio] stopped");
        Ok(())
    }

    async fn unload(&mut self, handle: SoundHandle) -> relief_core::Result<()> {
        self.check(AudioOperation::Unload, &handle)?;
        self.loaded = None;
        self.playing = false;
        debug!("[audio] unloaded");
        Ok(())
    }
}

/// Notification backend that logs the rendered payload
#[derive(Debug)]
pub struct LoggingNotifications {
    grant: bool,
    visible: Option<NotificationId>,
}

impl LoggingNotifications {
    pub fn new(grant: bool) -> Self {
        Self {
            grant,
            visible: None,
        }
    }
}

#[async_trait]
impl NotificationBackend for LoggingNotifications {
    async fn request_permission(&mut self) -> relief_core::Result<PermissionStatus> {
        Ok(if self.grant {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    async fn configure_channel(
        &mut self,
        channel_id: &str,
        channel_name: &str,
    ) -> relief_core::Result<()> {
        info!(channel_id, channel_name, "[notification] channel configured");
        Ok(())
    }

    async fn present(
        &mut self,
        content: &NotificationContent,
    ) -> relief_core::Result<NotificationId> {
        let id = NotificationId::new(Uuid::new_v4().to_string());
        info!(
            id = %id,
            body = %content.body,
            subtitle = %content.subtitle,
            "[notification] {}",
            content.title
        );
        let payload = content.to_payload()?;
        debug!(payload = %payload, "[notification] payload");
        self.visible = Some(id.clone());
        Ok(id)
    }

    async fn dismiss(&mut self, id: &NotificationId) -> relief_core::Result<()> {
        if self.visible.as_ref() == Some(id) {
            self.visible = None;
            debug!(id = %id, "[notification] dismissed");
        }
        Ok(())
    }
}

/// Wake lock that just remembers whether it is held
#[derive(Debug, Default)]
pub struct NoopWakeLock {
    held: bool,
}

impl WakeLock for NoopWakeLock {
    fn acquire(&mut self) -> relief_core::Result<()> {
        if !self.held {
            debug!("[wake lock] acquired");
        }
        self.held = true;
        Ok(())
    }

    fn release(&mut self) {
        if self.held {
            debug!("[wake lock] released");
        }
        self.held = false;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}
