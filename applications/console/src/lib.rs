//! Relief Console Library
//!
//! Headless terminal front end for the Relief Player session core. It stands
//! in for the login and player screens: simulated platform collaborators,
//! a line-based command parser, and the player screen that wires them to a
//! running player.
//!
//! This library exposes the components for testing purposes.

pub mod config;
pub mod error;
pub mod input;
pub mod screen;
pub mod sim;

// Re-export commonly used types for convenience
pub use config::{ConsoleConfig, SimulationSettings};
pub use error::{ConsoleError, Result};
pub use input::ConsoleCommand;
pub use screen::{Flow, PlayerScreen};
