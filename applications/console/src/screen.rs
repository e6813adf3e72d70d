//! Player screen
//!
//! Wires the simulated collaborators to a running player for one signed-in
//! user. Opening the screen starts the player task; closing it runs the
//! teardown and waits for the task to finish.

use crate::{
    config::ConsoleConfig,
    error::Result,
    input::{ConsoleCommand, HELP},
    sim::{LoggingNotifications, NoopWakeLock, SimulatedAudio},
};
use relief_core::{PlaybackStatus, SessionSnapshot, User};
use relief_notification::NotificationPresenter;
use relief_playback::{
    PlaybackController, PlayerDeps, PlayerEvent, PlayerHandle, PlayerRuntime,
};
use std::time::Duration;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::info;

/// What the input loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading; print the message if any
    Continue(Option<String>),
    Logout,
    Quit,
}

pub struct PlayerScreen {
    user: User,
    player: PlayerHandle,
    task: JoinHandle<()>,
}

impl PlayerScreen {
    /// Build the collaborators and start the player
    pub async fn open(
        config: &ConsoleConfig,
        user: User,
    ) -> Result<(Self, broadcast::Receiver<PlayerEvent>)> {
        let simulation = &config.simulation;
        let audio = SimulatedAudio::new(
            Duration::from_millis(simulation.audio_latency_ms),
            simulation.fail_audio_load,
        );
        let presenter = NotificationPresenter::create(
            Box::new(LoggingNotifications::new(simulation.grant_notifications)),
            config.notification.clone(),
        )
        .await;
        let deps = PlayerDeps {
            audio: Box::new(audio),
            presenter,
            wake_lock: Box::new(NoopWakeLock::default()),
        };

        let controller = PlaybackController::new(config.player.clone(), deps)?;
        let (player, events, task) = PlayerRuntime::spawn(controller);
        info!(user = %user.display_name(), "Player screen opened");

        Ok((Self { user, player, task }, events))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn player(&self) -> &PlayerHandle {
        &self.player
    }

    /// Run one console command against the player
    pub async fn execute(&self, command: ConsoleCommand) -> Result<Flow> {
        match command {
            ConsoleCommand::Player(command) => {
                self.player.send(command).await?;
                Ok(Flow::Continue(None))
            }
            ConsoleCommand::Tap(action) => {
                self.player.notify_action(action)?;
                Ok(Flow::Continue(None))
            }
            ConsoleCommand::Status => Ok(Flow::Continue(Some(status_line(
                &self.player.snapshot(),
            )))),
            ConsoleCommand::Help => Ok(Flow::Continue(Some(HELP.to_string()))),
            ConsoleCommand::Logout => Ok(Flow::Logout),
            ConsoleCommand::Quit => Ok(Flow::Quit),
        }
    }

    /// Tear the player down and wait for its task
    pub async fn close(self) -> Result<()> {
        self.player.shutdown().await?;
        // A panicked player task has nothing left to clean up
        self.task.await.ok();
        info!(user = %self.user.display_name(), "Player screen closed");
        Ok(())
    }
}

/// One-line rendering of the session, as the player screen shows it
pub fn status_line(snapshot: &SessionSnapshot) -> String {
    let mut line = format!(
        "[{}] {} left of {} min ({:.0}%)",
        snapshot.status,
        snapshot.formatted_remaining(),
        snapshot.duration_minutes,
        snapshot.progress() * 100.0
    );
    if !snapshot.audio_available {
        line.push_str(" - sound unavailable");
    } else if snapshot.status == PlaybackStatus::Idle {
        line.push_str(" - press play to start");
    }
    line
}

/// Text to print for an event, if it is worth printing
pub fn describe_event(event: &PlayerEvent) -> Option<String> {
    match event {
        PlayerEvent::StateChanged { snapshot } => Some(status_line(snapshot)),
        PlayerEvent::Expired => Some("Session complete".to_string()),
        PlayerEvent::Notice(notice) => Some(format!("! {}: {}", notice.title(), notice.body())),
        PlayerEvent::Tick { .. } | PlayerEvent::ShutDown => None,
    }
}
