//! Notification content rendering
//!
//! Turns a session snapshot into the payload the platform renders. Pure
//! functions only; nothing here talks to the backend.

use relief_core::{
    AndroidExtras, NotificationAction, NotificationContent, NotificationData, PlaybackStatus,
    ProgressBar, SessionSnapshot,
};

use crate::config::{NotificationConfig, Platform};

/// Buttons offered for a given status
pub fn actions_for(status: PlaybackStatus) -> Vec<NotificationAction> {
    match status {
        PlaybackStatus::Playing => vec![NotificationAction::Pause, NotificationAction::Stop],
        PlaybackStatus::Idle | PlaybackStatus::Paused => {
            vec![NotificationAction::Play, NotificationAction::Stop]
        }
    }
}

fn body(snapshot: &SessionSnapshot) -> String {
    match snapshot.status {
        PlaybackStatus::Playing => format!("Playing - {} left", snapshot.formatted_remaining()),
        PlaybackStatus::Paused => format!("Paused - {} left", snapshot.formatted_remaining()),
        PlaybackStatus::Idle => "Stopped".to_string(),
    }
}

fn subtitle(snapshot: &SessionSnapshot) -> String {
    let percent = (snapshot.progress() * 100.0).round();
    format!(
        "{} min session - {}% complete",
        snapshot.duration_minutes, percent as u32
    )
}

/// Render the notification for a snapshot
pub fn render(snapshot: &SessionSnapshot, config: &NotificationConfig) -> NotificationContent {
    let data = NotificationData {
        remaining_seconds: snapshot.remaining_seconds,
        playback_state: snapshot.status,
        duration_setting: snapshot.duration_minutes,
        progress: snapshot.progress(),
    };

    let android = (config.platform == Platform::Android).then(|| AndroidExtras {
        channel_id: config.channel_id.clone(),
        category: config.category.clone(),
        ongoing: snapshot.status.is_playing(),
        low_priority: true,
        progress: ProgressBar {
            max: snapshot.total_seconds(),
            current: snapshot.elapsed_seconds(),
            indeterminate: false,
        },
        actions: actions_for(snapshot.status),
    });

    NotificationContent {
        title: config.title.clone(),
        body: body(snapshot),
        subtitle: subtitle(snapshot),
        data,
        sticky: true,
        android,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(duration_minutes: u32, remaining_seconds: u32) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot::idle(duration_minutes);
        snapshot.status = PlaybackStatus::Playing;
        snapshot.remaining_seconds = remaining_seconds;
        snapshot
    }

    #[test]
    fn progress_matches_the_snapshot() {
        let config = NotificationConfig::default();
        let half = render(&playing(30, 900), &config);
        assert_eq!(half.data.progress, 0.5);
        assert_eq!(half.subtitle, "30 min session - 50% complete");

        // Inconsistent input stays in range
        let over = render(&playing(5, 600), &config);
        assert_eq!(over.data.progress, 0.0);
    }

    #[test]
    fn playing_offers_pause_and_stop() {
        assert_eq!(
            actions_for(PlaybackStatus::Playing),
            vec![NotificationAction::Pause, NotificationAction::Stop]
        );
        assert_eq!(
            actions_for(PlaybackStatus::Paused),
            vec![NotificationAction::Play, NotificationAction::Stop]
        );
    }

    #[test]
    fn render_playing_on_android() {
        let content = render(&playing(30, 1799), &NotificationConfig::default());

        assert_eq!(content.title, "Tinnitus Relief Therapy");
        assert_eq!(content.body, "Playing - 29:59 left");
        assert_eq!(content.subtitle, "30 min session - 0% complete");
        assert!(content.sticky);
        assert_eq!(content.data.remaining_seconds, 1799);
        assert_eq!(content.data.duration_setting, 30);
        assert_eq!(content.data.progress, 1.0 / 1800.0);

        let android = content.android.expect("android extras");
        assert!(android.ongoing);
        assert_eq!(android.progress.max, 1800);
        assert_eq!(android.progress.current, 1);
        assert_eq!(android.channel_id, "tinnitus-player");
        assert_eq!(android.actions.len(), 2);
    }

    #[test]
    fn render_paused_is_not_ongoing() {
        let mut snapshot = playing(5, 150);
        snapshot.status = PlaybackStatus::Paused;

        let content = render(&snapshot, &NotificationConfig::default());
        assert_eq!(content.body, "Paused - 2:30 left");
        assert_eq!(content.subtitle, "5 min session - 50% complete");
        assert!(!content.android.unwrap().ongoing);
    }

    #[test]
    fn ios_gets_no_android_extras() {
        let config = NotificationConfig {
            platform: Platform::Ios,
            ..NotificationConfig::default()
        };
        let content = render(&playing(30, 1000), &config);
        assert!(content.android.is_none());
        assert!(content.sticky);
    }
}
