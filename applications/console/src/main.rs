/// Relief Console - terminal front end for the tinnitus relief player
use anyhow::Context;
use clap::Parser;
use relief_console::{
    input::{self, HELP},
    screen::{self, describe_event},
    ConsoleCommand, ConsoleConfig, Flow, PlayerScreen,
};
use relief_core::{AuthGate, User};
use relief_notification::Platform;
use relief_playback::PlayerEvent;
use std::path::PathBuf;
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "relief-console")]
#[command(about = "Tinnitus relief ambient player (terminal front end)", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./relief.toml if present)
    #[arg(short, long, env = "RELIEF_CONFIG")]
    config: Option<PathBuf>,

    /// Session length in minutes
    #[arg(short, long)]
    duration: Option<u32>,

    /// Platform to render notifications for (android, ios, other)
    #[arg(long)]
    platform: Option<String>,

    /// Simulate a sound that fails to load
    #[arg(long)]
    fail_audio_load: bool,

    /// Simulate the user refusing notification permission
    #[arg(long)]
    deny_notifications: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Logout,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "relief_console=info,relief_playback=info,relief_notification=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut gate = AuthGate::new();

    loop {
        // Login screen
        println!("Tinnitus Relief - type `login` for the demo account, or `quit`");
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "login" | "demo" => {}
            "quit" | "exit" => break,
            other => {
                println!("unknown command: {other}");
                continue;
            }
        }

        let user = match gate.login_demo().await {
            Ok(user) => user.clone(),
            Err(e) => {
                println!("! Login failed: {e}. Please try again.");
                continue;
            }
        };

        let exit = run_player(&config, user, &mut lines).await?;
        gate.logout();
        if exit == Exit::Quit {
            break;
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ConsoleConfig> {
    let mut config =
        ConsoleConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(minutes) = cli.duration {
        config.player.default_duration_minutes = minutes;
    }
    if let Some(platform) = &cli.platform {
        config.notification.platform = Platform::from_str(platform)
            .with_context(|| format!("unknown platform: {platform}"))?;
    }
    if cli.fail_audio_load {
        config.simulation.fail_audio_load = true;
    }
    if cli.deny_notifications {
        config.simulation.grant_notifications = false;
    }

    config.validate()?;
    Ok(config)
}

/// Player screen loop; returns when the user logs out, quits or closes input
async fn run_player(
    config: &ConsoleConfig,
    user: User,
    lines: &mut Lines<BufReader<Stdin>>,
) -> anyhow::Result<Exit> {
    println!("Welcome, {}", user.display_name());
    let (screen, events) = PlayerScreen::open(config, user).await?;
    let printer = spawn_event_printer(events);

    println!("{}", screen::status_line(&screen.player().snapshot()));
    println!("{HELP}");

    let exit = loop {
        let Some(line) = lines.next_line().await? else {
            break Exit::Quit;
        };
        let command: ConsoleCommand = match input::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("! {e}");
                continue;
            }
        };

        match screen.execute(command).await {
            Ok(Flow::Continue(Some(message))) => println!("{message}"),
            Ok(Flow::Continue(None)) => {}
            Ok(Flow::Logout) => break Exit::Logout,
            Ok(Flow::Quit) => break Exit::Quit,
            Err(e) => println!("! {e}"),
        }
    };

    // Teardown runs for logout and quit alike
    screen.close().await?;
    printer.await.ok();
    Ok(exit)
}

fn spawn_event_printer(mut events: broadcast::Receiver<PlayerEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(PlayerEvent::ShutDown) | Err(RecvError::Closed) => break,
                Ok(event) => {
                    if let Some(text) = describe_event(&event) {
                        println!("{text}");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Event printer lagged");
                }
            }
        }
    })
}
