/// Collaborator traits for Relief Player
///
/// Each trait is the boundary to something the operating system or an
/// external service owns. Implementations live in the front ends; the
/// playback core only talks to these traits.
use crate::error::Result;
use crate::types::{
    AssetRef, AuthenticationResponse, LoadOptions, NotificationContent, NotificationId,
    PermissionStatus, SoundHandle,
};
use async_trait::async_trait;

/// Native audio engine
///
/// Every call is asynchronous and fallible. Callers must not issue
/// overlapping calls against the same handle; `&mut self` enforces that for
/// a single owner.
#[async_trait]
pub trait AudioEngine: Send {
    /// Load an asset and return a handle to it
    ///
    /// # Errors
    /// Returns `ReliefError::AudioLoad` if the asset cannot be decoded or found
    async fn load(&mut self, asset: &AssetRef, options: LoadOptions) -> Result<SoundHandle>;

    /// Start or resume playback
    async fn play(&mut self, handle: &SoundHandle) -> Result<()>;

    /// Pause playback, keeping the position
    async fn pause(&mut self, handle: &SoundHandle) -> Result<()>;

    /// Stop playback and rewind
    async fn stop(&mut self, handle: &SoundHandle) -> Result<()>;

    /// Release the handle
    async fn unload(&mut self, handle: SoundHandle) -> Result<()>;
}

/// Operating-system notification renderer
#[async_trait]
pub trait NotificationBackend: Send {
    /// Ask the user for permission to post notifications
    async fn request_permission(&mut self) -> Result<PermissionStatus>;

    /// Register the low-importance, silent channel used for the player (Android only)
    async fn configure_channel(&mut self, channel_id: &str, channel_name: &str) -> Result<()> {
        let _ = (channel_id, channel_name);
        Ok(())
    }

    /// Post a notification and return the platform identifier for it
    async fn present(&mut self, content: &NotificationContent) -> Result<NotificationId>;

    /// Remove a previously posted notification
    async fn dismiss(&mut self, id: &NotificationId) -> Result<()>;
}

/// Keeps the process from being suspended while audio plays
pub trait WakeLock: Send {
    /// Acquire the lock; acquiring twice is harmless
    fn acquire(&mut self) -> Result<()>;

    /// Release the lock; releasing when not held is harmless
    fn release(&mut self);

    /// Whether the lock is currently held
    fn is_held(&self) -> bool;
}

/// External identity provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Run the provider's login flow
    ///
    /// # Errors
    /// Returns `ReliefError::AuthFailed` or `ReliefError::AuthCancelled`
    async fn login(&self) -> Result<AuthenticationResponse>;
}
