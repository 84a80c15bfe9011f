use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use super::bar::{BarColor, BarOverlay, BossBar};
use super::display::BossBarDisplay;
use super::error::HudResult;
use crate::player::PlayerId;
use crate::playtime::{PlaytimeSource, DAILY_PLAYTIME_SECS};

/// Label shown once a player has used up the daily allowance.
pub const COMPLETION_LABEL: &str = "✅ You've completed today's playtime!";

/// Format a remaining time as a zero-padded "MM:SS" countdown label.
/// Negative input clamps to zero.
pub fn format_remaining(seconds_left: i64) -> String {
    let seconds_left = seconds_left.max(0);
    format!(
        "Remaining playtime: {:02}:{:02}",
        seconds_left / 60,
        seconds_left % 60
    )
}

/// Fraction of the daily cap already used, clamped to [0.0, 1.0]. Time
/// banked beyond the cap reads as zero progress.
pub fn progress_toward_cap(seconds_left: i64) -> f32 {
    let used =
        (DAILY_PLAYTIME_SECS - seconds_left.max(0)) as f64 / DAILY_PLAYTIME_SECS as f64;
    used.clamp(0.0, 1.0) as f32
}

/// Urgency color for the current progress: cap reached → blue, past the
/// halfway mark → yellow, otherwise red.
pub fn color_for(progress: f32) -> BarColor {
    if progress >= 1.0 {
        BarColor::Blue
    } else if progress >= 0.5 {
        BarColor::Yellow
    } else {
        BarColor::Red
    }
}

/// Owns every player's boss bar and keeps it in sync with the playtime
/// source. Bars are created lazily on a player's first update and dropped on
/// remove/retain.
pub struct BossBarManager<S, D> {
    bars: Mutex<HashMap<PlayerId, BossBar>>,
    source: S,
    display: D,
    completion_label: String,
}

impl<S, D> BossBarManager<S, D>
where
    S: PlaytimeSource,
    D: BossBarDisplay,
{
    pub fn new(source: S, display: D) -> Self {
        Self::with_completion_label(source, display, COMPLETION_LABEL)
    }

    pub fn with_completion_label(
        source: S,
        display: D,
        completion_label: impl Into<String>,
    ) -> Self {
        Self {
            bars: Default::default(),
            source,
            display,
            completion_label: completion_label.into(),
        }
    }

    /// Recompute the player's remaining playtime and push it to the display,
    /// lazily creating the bar on first sight.
    pub fn update(&self, player: PlayerId) -> HudResult<()> {
        let seconds_left = self.source.seconds_remaining(player).max(0);
        let label = format_remaining(seconds_left);
        let progress = progress_toward_cap(seconds_left);

        let mut guard = self.bars.lock()?;
        let bar = match guard.entry(player) {
            Entry::Occupied(e) => {
                let bar = e.into_mut();
                bar.set_name(label);
                bar.set_progress(progress);
                bar
            }
            Entry::Vacant(e) => {
                let bar = e.insert(BossBar::new(
                    label,
                    progress,
                    BarColor::Green,
                    BarOverlay::Progress,
                ));
                self.display.show(player, bar);
                bar
            }
        };

        bar.set_color(color_for(bar.progress()));
        if bar.progress() >= 1.0 {
            bar.set_name(self.completion_label.clone());
        }
        self.display.update(player, bar);
        Ok(())
    }

    /// Drop the player's bar and tell the display to stop rendering it.
    /// Silent no-op when no bar exists.
    pub fn remove(&self, player: PlayerId) -> HudResult<()> {
        let mut guard = self.bars.lock()?;
        if let Some(bar) = guard.remove(&player) {
            self.display.hide(player, &bar);
        }
        Ok(())
    }

    /// Drop (and hide) every bar whose player is not in `online`.
    pub fn retain(&self, online: &[PlayerId]) -> HudResult<()> {
        let mut guard = self.bars.lock()?;
        let orphaned: Vec<_> = guard
            .keys()
            .filter(|player| !online.contains(player))
            .copied()
            .collect();
        for player in orphaned {
            if let Some(bar) = guard.remove(&player) {
                self.display.hide(player, &bar);
            }
        }
        Ok(())
    }

    /// Snapshot of the player's bar, if one is shown.
    pub fn bar(&self, player: PlayerId) -> HudResult<Option<BossBar>> {
        let guard = self.bars.lock()?;
        Ok(guard.get(&player).cloned())
    }
}
