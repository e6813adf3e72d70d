//! Player runtime
//!
//! Runs a [`PlaybackController`] on its own task. Commands and clock ticks
//! are handled one at a time in arrival order, so a stop queued behind an
//! in-flight play always lands after it.

use relief_core::{AppState, NotificationAction, SessionSnapshot};
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    command::PlayerCommand,
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlayerEvent,
};

const COMMAND_CHANNEL_CAPACITY: usize = 32;

struct Request {
    command: PlayerCommand,
    reply: Option<oneshot::Sender<Result<()>>>,
}

/// Spawns the player task
pub struct PlayerRuntime;

impl PlayerRuntime {
    /// Load the sound and start serving commands on a new task
    ///
    /// Returns the handle, an event receiver subscribed before the task
    /// starts (so the load outcome is never missed), and the task handle.
    /// The task ends after `shutdown()` or when every handle is dropped.
    pub fn spawn(
        controller: PlaybackController,
    ) -> (
        PlayerHandle,
        broadcast::Receiver<PlayerEvent>,
        JoinHandle<()>,
    ) {
        let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let events = controller.subscribe();
        let handle = PlayerHandle {
            tx,
            snapshot: controller.watch(),
            events: controller.event_sender(),
        };
        let task = tokio::spawn(run(controller, rx));
        (handle, events, task)
    }
}

async fn run(mut controller: PlaybackController, mut rx: mpsc::Receiver<Request>) {
    if let Err(e) = controller.load().await {
        warn!(error = %e, "Player started without audio");
    }

    loop {
        tokio::select! {
            request = rx.recv() => {
                let Some(Request { command, reply }) = request else {
                    debug!("All player handles dropped");
                    shutdown(&mut controller).await;
                    break;
                };
                let result = controller.execute(command).await;
                if let Some(reply) = reply {
                    // The caller may have stopped waiting
                    reply.send(result).ok();
                } else if let Err(e) = result {
                    debug!(command = ?command, error = %e, "Command failed");
                }
                if command == PlayerCommand::Shutdown {
                    break;
                }
            }
            () = controller.clock_mut().tick() => {
                controller.on_tick().await;
            }
        }
    }
    info!("Player task finished");
}

async fn shutdown(controller: &mut PlaybackController) {
    if let Err(e) = controller.shutdown().await {
        warn!(error = %e, "Shutdown failed");
    }
}

/// Cloneable handle to a running player
#[derive(Clone)]
pub struct PlayerHandle {
    tx: mpsc::Sender<Request>,
    snapshot: watch::Receiver<SessionSnapshot>,
    events: broadcast::Sender<PlayerEvent>,
}

impl PlayerHandle {
    /// Send a command and wait for its result
    pub async fn send(&self, command: PlayerCommand) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Request {
                command,
                reply: Some(reply),
            })
            .await
            .map_err(|_| PlaybackError::PlayerClosed)?;
        response.await.map_err(|_| PlaybackError::PlayerClosed)?
    }

    pub async fn play(&self) -> Result<()> {
        self.send(PlayerCommand::Play).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.send(PlayerCommand::Pause).await
    }

    pub async fn stop(&self) -> Result<()> {
        self.send(PlayerCommand::Stop).await
    }

    pub async fn toggle(&self) -> Result<()> {
        self.send(PlayerCommand::TogglePlayback).await
    }

    pub async fn set_duration(&self, minutes: u32) -> Result<()> {
        self.send(PlayerCommand::SetDuration(minutes)).await
    }

    pub async fn app_state(&self, state: AppState) -> Result<()> {
        self.send(PlayerCommand::AppState(state)).await
    }

    /// Forward a notification button tap without waiting
    ///
    /// Notification callbacks cannot block; the outcome shows up in the
    /// snapshot and event stream instead.
    pub fn notify_action(&self, action: NotificationAction) -> Result<()> {
        self.tx
            .try_send(Request {
                command: action.into(),
                reply: None,
            })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    warn!(action = %action, "Player busy; notification action dropped");
                    PlaybackError::PlayerBusy
                }
                mpsc::error::TrySendError::Closed(_) => PlaybackError::PlayerClosed,
            })
    }

    /// Tear the player down and wait for it to finish
    pub async fn shutdown(&self) -> Result<()> {
        match self.send(PlayerCommand::Shutdown).await {
            Err(PlaybackError::PlayerClosed) => Ok(()),
            other => other,
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver that wakes on every snapshot change
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    /// Subscribe to events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    /// Whether the player task is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("snapshot", &*self.snapshot.borrow())
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
