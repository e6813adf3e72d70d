//! Domain types for Relief Player

pub mod audio;
pub mod notification;
pub mod playback;
pub mod user;

pub use audio::{AssetRef, AudioOperation, LoadOptions, SoundHandle};
pub use notification::{
    AndroidExtras, NotificationAction, NotificationContent, NotificationData, NotificationId,
    PermissionStatus, ProgressBar,
};
pub use playback::{format_time, AppState, AppVisibility, PlaybackStatus, SessionSnapshot};
pub use user::{AuthenticationResponse, User};
