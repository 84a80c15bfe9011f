use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use super::bar::BossBar;
use super::display::BossBarDisplay;
use super::error::HudResult;
use super::manager::BossBarManager;
use super::UPDATE_PERIOD;
use crate::player::{Player, PlayerId, PlayerRegistry};
use crate::playtime::PlaytimeSource;

#[derive(Debug)]
pub enum HudCommand {
    /// Refresh a single player's bar outside the regular tick.
    Refresh { player: PlayerId },
    /// Drop a player's bar after they leave.
    Disconnect { player: PlayerId },
}

/// Task that refreshes every online player's bar at a fixed rate and
/// services hud commands in between ticks.
pub struct UpdateWorker(JoinHandle<()>);

impl IntoFuture for UpdateWorker {
    type Output = <JoinHandle<()> as Future>::Output;
    type IntoFuture = JoinHandle<()>;

    fn into_future(self) -> Self::IntoFuture {
        self.0.into_future()
    }
}

impl UpdateWorker {
    pub fn new<S, D, R>(
        manager: Arc<BossBarManager<S, D>>,
        registry: R,
        mut command_receiver: UnboundedReceiver<HudCommand>,
        period: Duration,
        ct: CancellationToken,
    ) -> Self
    where
        S: PlaytimeSource + Send + Sync + 'static,
        D: BossBarDisplay + Send + Sync + 'static,
        R: PlayerRegistry + Send + 'static,
    {
        let worker = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            loop {
                tokio::select! {
                    biased;
                    _ = ct.cancelled() => {
                        tracing::info!("hud worker: cancelled");
                        break;
                    }
                    command = command_receiver.recv() => {
                        let Some(command) = command else {
                            tracing::info!("hud worker: command channel closed");
                            break;
                        };
                        match command {
                            HudCommand::Refresh { player } => {
                                if let Err(err) = manager.update(player) {
                                    tracing::warn!(
                                        "hud worker: failed to refresh bar for player {}: {}",
                                        player,
                                        err
                                    );
                                }
                            }
                            HudCommand::Disconnect { player } => {
                                if let Err(err) = manager.remove(player) {
                                    tracing::warn!(
                                        "hud worker: failed to remove bar for player {}: {}",
                                        player,
                                        err
                                    );
                                }
                            }
                        }
                    }
                    _ = ticker.tick() => {
                        let online: Vec<PlayerId> = registry
                            .online_players()
                            .iter()
                            .map(|player| player.id())
                            .collect();
                        for &player in &online {
                            if let Err(err) = manager.update(player) {
                                tracing::warn!(
                                    "hud worker: failed to update bar for player {}: {}",
                                    player,
                                    err
                                );
                            }
                        }
                        if let Err(err) = manager.retain(&online) {
                            tracing::warn!("hud worker: failed to prune stale bars: {}", err);
                        }
                    }
                }
            }
            tracing::info!("hud worker: finished");
        });
        Self(worker)
    }
}

/// Composition-root handle for the playtime hud: owns the bar manager, the
/// command channel and the update worker. The periodic refresh starts on
/// construction and runs until the token is cancelled or every command
/// sender is gone.
pub struct PlaytimeHud<S, D> {
    manager: Arc<BossBarManager<S, D>>,
    command_sender: UnboundedSender<HudCommand>,
    worker: UpdateWorker,
}

impl<S, D> PlaytimeHud<S, D>
where
    S: PlaytimeSource + Send + Sync + 'static,
    D: BossBarDisplay + Send + Sync + 'static,
{
    /// Start the refresh loop at the default 1-second rate, first tick fires
    /// immediately.
    pub fn start<R>(source: S, display: D, registry: R, ct: CancellationToken) -> Self
    where
        R: PlayerRegistry + Send + 'static,
    {
        Self::start_with(BossBarManager::new(source, display), registry, UPDATE_PERIOD, ct)
    }

    pub fn start_with<R>(
        manager: BossBarManager<S, D>,
        registry: R,
        period: Duration,
        ct: CancellationToken,
    ) -> Self
    where
        R: PlayerRegistry + Send + 'static,
    {
        let manager = Arc::new(manager);
        let (command_sender, command_receiver) = unbounded_channel();
        let worker = UpdateWorker::new(manager.clone(), registry, command_receiver, period, ct);
        Self {
            manager,
            command_sender,
            worker,
        }
    }

    pub fn command_sender(&self) -> UnboundedSender<HudCommand> {
        self.command_sender.clone()
    }

    /// Queue an off-schedule refresh of a single player's bar.
    pub fn refresh(&self, player: PlayerId) -> HudResult<()> {
        Ok(self.command_sender.send(HudCommand::Refresh { player })?)
    }

    /// Queue removal of a player's bar.
    pub fn remove(&self, player: PlayerId) -> HudResult<()> {
        Ok(self.command_sender.send(HudCommand::Disconnect { player })?)
    }

    /// Snapshot of the player's bar, if one is shown.
    pub fn bar(&self, player: PlayerId) -> HudResult<Option<BossBar>> {
        self.manager.bar(player)
    }

    /// Hand back the worker so the host can await it on shutdown. Dropping
    /// the rest of the hud closes the command channel.
    pub fn into_worker(self) -> UpdateWorker {
        self.worker
    }
}
