extern crate playtime_hud;

use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use playtime_hud::hud::{BossBarManager, ConsoleDisplay, HudCommand, PlaytimeHud};
use playtime_hud::player::{LocalPlayer, LocalRegistry};
use playtime_hud::playtime::SessionTracker;
use playtime_hud::settings::HudSettings;

#[derive(Parser, Debug)]
struct Args {
    /// Path to a json settings file; defaults apply when omitted.
    #[arg(long, env = "HUD_SETTINGS")]
    settings: Option<String>,
    /// How many players the demo host simulates.
    #[arg(long, env = "HUD_PLAYERS", default_value_t = 3)]
    players: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => HudSettings::load(path)?,
        None => HudSettings::default(),
    };

    let tracker = SessionTracker::new(settings.daily_allowance_secs);
    let registry = LocalRegistry::default();
    for id in 1..=args.players {
        registry.connect(LocalPlayer::new(id, format!("player-{}", id)))?;
        tracker.connect(id)?;
    }

    let ct = CancellationToken::new();
    let manager = BossBarManager::with_completion_label(
        tracker.clone(),
        ConsoleDisplay,
        settings.completion_label.clone(),
    );
    let hud = PlaytimeHud::start_with(manager, registry.clone(), settings.update_period(), ct.clone());
    tracing::info!("hud started for {} players", args.players);

    // one player leaves after a while so the disconnect path shows up in the demo
    if args.players > 1 {
        let registry = registry.clone();
        let tracker = tracker.clone();
        let command_sender = hud.command_sender();
        let leaver = args.players;
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            if let Err(err) = registry.disconnect(leaver) {
                tracing::warn!("failed to disconnect player {}: {}", leaver, err);
            }
            if let Err(err) = tracker.disconnect(leaver) {
                tracing::warn!("failed to bank playtime for player {}: {}", leaver, err);
            }
            if let Err(err) = command_sender.send(HudCommand::Disconnect { player: leaver }) {
                tracing::warn!("failed to queue bar removal for player {}: {}", leaver, err);
            }
            tracing::info!("player {} left", leaver);
        });
    }

    if let Err(err) = signal::ctrl_c().await {
        tracing::warn!("unable to listen for shutdown signal: {}", err);
    }
    ct.cancel();
    if let Err(err) = hud.into_worker().await {
        tracing::warn!("hud worker join failed: {}", err);
    }

    Ok(())
}
