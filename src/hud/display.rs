use super::bar::BossBar;
use crate::player::PlayerId;

/// Rendering side of the hud. Implementations only draw what they are told;
/// every call is fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait BossBarDisplay {
    /// Attach a freshly created bar to the player's view.
    fn show(&self, player: PlayerId, bar: &BossBar);

    /// Push the bar's current label/progress/color to the player's view.
    fn update(&self, player: PlayerId, bar: &BossBar);

    /// Detach the bar from the player's view.
    fn hide(&self, player: PlayerId, bar: &BossBar);
}

/// Writes bar updates to the log, standing in for a real renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleDisplay;

impl BossBarDisplay for ConsoleDisplay {
    fn show(&self, player: PlayerId, bar: &BossBar) {
        tracing::info!("display: show bar for player {}: \"{}\"", player, bar.name());
    }

    fn update(&self, player: PlayerId, bar: &BossBar) {
        tracing::info!(
            "display: player {}: \"{}\" {:.0}% {:?}",
            player,
            bar.name(),
            bar.progress() * 100.0,
            bar.color()
        );
    }

    fn hide(&self, player: PlayerId, _bar: &BossBar) {
        tracing::info!("display: hide bar for player {}", player);
    }
}
