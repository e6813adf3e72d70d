//! Typed console commands
//!
//! One line of input maps to one command. Player controls become the same
//! `PlayerCommand`s the in-app buttons send; `tap` goes through the
//! notification action path instead.

use crate::error::{ConsoleError, Result};
use relief_core::{AppState, NotificationAction};
use relief_playback::PlayerCommand;

/// Help text listing every command
pub const HELP: &str = "\
commands:
  play | pause | stop | toggle   player buttons
  duration <minutes>             change session length (only while stopped)
  background | inactive          send the app to the background
  foreground                     bring the app back
  tap <play|pause|stop>          press a notification button
  status                         show the session
  logout                         leave the player
  quit                           exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// An in-app control or lifecycle event
    Player(PlayerCommand),
    /// A notification button tap
    Tap(NotificationAction),
    Status,
    Help,
    Logout,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(ConsoleError::InvalidCommand(format!(
            "too many arguments: {line}"
        )));
    }

    let command = match (word.to_ascii_lowercase().as_str(), arg) {
        ("play", None) => ConsoleCommand::Player(PlayerCommand::Play),
        ("pause", None) => ConsoleCommand::Player(PlayerCommand::Pause),
        ("stop", None) => ConsoleCommand::Player(PlayerCommand::Stop),
        ("toggle", None) => ConsoleCommand::Player(PlayerCommand::TogglePlayback),
        ("duration", Some(minutes)) => {
            let minutes = minutes.parse().map_err(|_| {
                ConsoleError::InvalidCommand(format!("not a number of minutes: {minutes}"))
            })?;
            ConsoleCommand::Player(PlayerCommand::SetDuration(minutes))
        }
        ("background", None) => ConsoleCommand::Player(AppState::Background.into()),
        ("inactive", None) => ConsoleCommand::Player(AppState::Inactive.into()),
        ("foreground", None) => ConsoleCommand::Player(AppState::Active.into()),
        ("tap", Some(action)) => {
            let action = NotificationAction::from_str(&action.to_ascii_lowercase()).ok_or_else(|| {
                ConsoleError::InvalidCommand(format!("unknown notification action: {action}"))
            })?;
            ConsoleCommand::Tap(action)
        }
        ("status", None) => ConsoleCommand::Status,
        ("help" | "?", None) => ConsoleCommand::Help,
        ("logout", None) => ConsoleCommand::Logout,
        ("quit" | "exit", None) => ConsoleCommand::Quit,
        _ => {
            return Err(ConsoleError::InvalidCommand(format!(
                "unknown command: {line} (try `help`)"
            )))
        }
    };
    Ok(Some(command))
}
