//! Runtime tests on a paused tokio clock
//!
//! Sleeps land half a second past the tick they wait for so the assertion
//! never races a tick due at the same instant.

mod common;

use common::{config_with_duration, AudioCall, Harness, MockAudioEngine};
use relief_core::{AppState, NotificationAction, PlaybackStatus};
use relief_playback::{PlaybackError, PlayerConfig, PlayerEvent, PlayerRuntime, UserNotice};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::time::sleep;

// ===== Test Helpers =====

/// Whether `event` is still buffered, skipping over any lag
fn saw(events: &mut broadcast::Receiver<PlayerEvent>, event: &PlayerEvent) -> bool {
    let mut found = false;
    loop {
        match events.try_recv() {
            Ok(e) => found |= &e == event,
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => return found,
        }
    }
}

// ===== Tests =====

#[tokio::test(start_paused = true)]
async fn clock_drives_countdown() {
    common::init_tracing();
    let harness = Harness::new();
    let controller = harness.controller(config_with_duration(30)).await;
    let (player, _events, task) = PlayerRuntime::spawn(controller);

    player.play().await.unwrap();
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(player.snapshot().remaining_seconds, 1799);
    assert_eq!(player.snapshot().status, PlaybackStatus::Playing);

    player.pause().await.unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(player.snapshot().remaining_seconds, 1799);

    player.play().await.unwrap();
    sleep(Duration::from_millis(2500)).await;
    assert_eq!(player.snapshot().remaining_seconds, 1797);

    player.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn session_expires_after_full_duration() {
    let harness = Harness::new();
    let controller = harness.controller(config_with_duration(5)).await;
    let (player, mut events, task) = PlayerRuntime::spawn(controller);

    player.play().await.unwrap();
    sleep(Duration::from_millis(299_500)).await;
    assert_eq!(player.snapshot().remaining_seconds, 1);

    sleep(Duration::from_secs(1)).await;
    let snapshot = player.snapshot();
    assert_eq!(snapshot.status, PlaybackStatus::Idle);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert!(!harness.wake_lock.held());

    assert!(saw(&mut events, &PlayerEvent::Expired));

    // Nothing keeps ticking after expiry
    sleep(Duration::from_secs(30)).await;
    assert_eq!(player.snapshot().remaining_seconds, 300);

    player.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stop_queued_behind_slow_play_is_not_lost() {
    let audio = MockAudioEngine::new();
    audio.set_play_delay(Duration::from_secs(2));
    let harness = Harness::with_audio(audio);
    let controller = harness.controller(PlayerConfig::default()).await;
    let (player, _events, task) = PlayerRuntime::spawn(controller);

    // Enqueue play without waiting, then stop right behind it
    player.notify_action(NotificationAction::Play).unwrap();
    player.stop().await.unwrap();

    assert_eq!(
        harness.audio.calls(),
        vec![AudioCall::Load, AudioCall::Play, AudioCall::Stop]
    );
    assert!(!harness.audio.saw_overlap());
    assert_eq!(player.snapshot().status, PlaybackStatus::Idle);
    assert!(!harness.wake_lock.held());

    player.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn background_notification_follows_countdown() {
    let harness = Harness::new();
    let controller = harness.controller(config_with_duration(30)).await;
    let (player, _events, task) = PlayerRuntime::spawn(controller);

    player.play().await.unwrap();
    player.app_state(AppState::Background).await.unwrap();
    sleep(Duration::from_millis(3500)).await;

    let content = harness.notifications.last_presented().unwrap();
    assert_eq!(content.data.remaining_seconds, 1797);
    assert_eq!(
        content.data.remaining_seconds,
        player.snapshot().remaining_seconds
    );

    player.notify_action(NotificationAction::Pause).unwrap();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(player.snapshot().status, PlaybackStatus::Paused);
    let content = harness.notifications.last_presented().unwrap();
    assert_eq!(content.data.playback_state, PlaybackStatus::Paused);

    player.app_state(AppState::Active).await.unwrap();
    assert!(!harness.notifications.is_visible());

    player.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn load_failure_is_announced_to_early_subscribers() {
    let harness = Harness::with_audio(MockAudioEngine::failing_load());
    let controller = harness.controller(PlayerConfig::default()).await;
    let (player, mut events, task) = PlayerRuntime::spawn(controller);

    let first = events.recv().await.unwrap();
    assert!(matches!(
        first,
        PlayerEvent::Notice(UserNotice::AudioLoadFailed { .. })
    ));
    assert!(matches!(
        player.play().await,
        Err(PlaybackError::AudioUnavailable)
    ));
    assert!(!player.snapshot().can_play());

    player.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn watch_sees_state_changes() {
    let harness = Harness::new();
    let controller = harness.controller(PlayerConfig::default()).await;
    let (player, _events, task) = PlayerRuntime::spawn(controller);
    let mut watch = player.watch();

    player.set_duration(10).await.unwrap();
    watch.changed().await.unwrap();
    assert_eq!(watch.borrow_and_update().duration_minutes, 10);

    player.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_tears_down() {
    let harness = Harness::new();
    let controller = harness.controller(PlayerConfig::default()).await;
    let (player, mut events, task) = PlayerRuntime::spawn(controller);

    player.play().await.unwrap();
    player.app_state(AppState::Background).await.unwrap();
    assert!(harness.wake_lock.held());
    assert!(harness.notifications.is_visible());

    drop(player);
    task.await.unwrap();

    assert!(!harness.wake_lock.held());
    assert!(!harness.notifications.is_visible());
    assert_eq!(harness.audio.last_call(), Some(AudioCall::Unload));

    assert!(saw(&mut events, &PlayerEvent::ShutDown));
}

#[tokio::test(start_paused = true)]
async fn commands_after_shutdown_report_closed() {
    let harness = Harness::new();
    let controller = harness.controller(PlayerConfig::default()).await;
    let (player, _events, task) = PlayerRuntime::spawn(controller);

    player.shutdown().await.unwrap();
    task.await.unwrap();

    assert!(player.is_closed());
    assert!(matches!(player.play().await, Err(PlaybackError::PlayerClosed)));
    assert!(matches!(
        player.notify_action(NotificationAction::Stop),
        Err(PlaybackError::PlayerClosed)
    ));
    // A second shutdown is harmless
    player.shutdown().await.unwrap();
}
