//! Notification presenter
//!
//! Owns the platform backend and the identity of the notification currently
//! on screen. One instance per player session; it is created with the
//! session and disposed with it.
//!
//! Every `show` dismisses the previous notification and posts a new one
//! rather than updating in place, so the platform identifier changes on each
//! refresh. Callers must not hold on to it.

use relief_core::{NotificationBackend, NotificationId, PermissionStatus, SessionSnapshot};
use tracing::{debug, info, warn};

use crate::config::{NotificationConfig, Platform};
use crate::content;
use crate::error::{NotificationError, Result};

/// Renders session state as a system notification while the app is backgrounded
pub struct NotificationPresenter {
    backend: Box<dyn NotificationBackend>,
    config: NotificationConfig,
    permission: PermissionStatus,
    current: Option<NotificationId>,
    background_updates: bool,
    disposed: bool,
}

impl NotificationPresenter {
    /// Create a presenter, configuring the channel and requesting permission
    ///
    /// Never fails: a denied permission or a broken backend leaves the
    /// presenter inert and playback unaffected.
    pub async fn create(backend: Box<dyn NotificationBackend>, config: NotificationConfig) -> Self {
        let mut presenter = Self {
            backend,
            config,
            permission: PermissionStatus::Undetermined,
            current: None,
            background_updates: false,
            disposed: false,
        };

        if presenter.config.platform == Platform::Android {
            if let Err(e) = presenter
                .backend
                .configure_channel(&presenter.config.channel_id, &presenter.config.channel_name)
                .await
            {
                warn!(error = %e, "Failed to configure notification channel");
            }
        }

        match presenter.request_permission().await {
            Ok(_) => info!("Notification presenter ready"),
            Err(NotificationError::PermissionDenied) => {
                warn!("Notification permission denied; background notification disabled");
            }
            Err(e) => warn!(error = %e, "Notification permission request failed"),
        }

        presenter
    }

    /// Ask the backend for permission and remember the answer
    pub async fn request_permission(&mut self) -> Result<PermissionStatus> {
        let status = self.backend.request_permission().await?;
        self.permission = status;
        if status.is_granted() {
            Ok(status)
        } else {
            Err(NotificationError::PermissionDenied)
        }
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    /// Whether notifications can actually be posted
    pub fn is_enabled(&self) -> bool {
        !self.disposed && self.permission.is_granted()
    }

    /// Whether a notification is currently posted
    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }

    /// Identifier of the notification on screen, if any
    pub fn current_id(&self) -> Option<&NotificationId> {
        self.current.as_ref()
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Replace the posted notification with one rendered from `snapshot`
    pub async fn show(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        if self.disposed {
            return Err(NotificationError::Disposed);
        }
        if !self.permission.is_granted() {
            debug!("Skipping notification, permission not granted");
            return Ok(());
        }

        self.dismiss_current().await?;

        let rendered = content::render(snapshot, &self.config);
        let id = self.backend.present(&rendered).await?;
        debug!(
            id = %id,
            remaining_seconds = snapshot.remaining_seconds,
            status = %snapshot.status,
            "Notification posted"
        );
        self.current = Some(id);
        Ok(())
    }

    /// Remove the posted notification; a no-op when nothing is posted
    pub async fn hide(&mut self) -> Result<()> {
        self.dismiss_current().await
    }

    /// Begin mirroring the session on every tick
    pub fn start_background_updates(&mut self) {
        if !self.disposed {
            self.background_updates = true;
        }
    }

    /// Stop mirroring; a no-op when not mirroring
    pub fn stop_background_updates(&mut self) {
        self.background_updates = false;
    }

    pub fn background_updates_active(&self) -> bool {
        self.background_updates
    }

    /// Per-tick refresh while background updates are active
    ///
    /// Re-renders while playing with time left, and hides once the countdown
    /// has run out. A paused session keeps its last notification.
    ///
    /// The player handles expiry itself before refreshing, so the zero branch
    /// only matters to callers driving the presenter directly.
    pub async fn refresh(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        if !self.background_updates {
            return Ok(());
        }

        if snapshot.status.is_playing() && snapshot.remaining_seconds > 0 {
            self.show(snapshot).await
        } else if snapshot.remaining_seconds == 0 {
            self.hide().await
        } else {
            Ok(())
        }
    }

    /// Tear down: stop updates, remove the notification, refuse further posts
    ///
    /// Safe to call more than once.
    pub async fn dispose(&mut self) -> Result<()> {
        self.background_updates = false;
        let result = self.dismiss_current().await;
        if !self.disposed {
            debug!("Notification presenter disposed");
        }
        self.disposed = true;
        result
    }

    async fn dismiss_current(&mut self) -> Result<()> {
        // Forget the id even if the dismissal fails; the platform may have
        // already removed it and a stale id must not be dismissed twice.
        if let Some(id) = self.current.take() {
            self.backend.dismiss(&id).await?;
            debug!(id = %id, "Notification dismissed");
        }
        Ok(())
    }
}

impl std::fmt::Debug for NotificationPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationPresenter")
            .field("permission", &self.permission)
            .field("current", &self.current)
            .field("background_updates", &self.background_updates)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
