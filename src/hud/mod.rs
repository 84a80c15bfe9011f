mod bar;
mod display;
mod error;
mod manager;
mod worker;

use std::time::Duration;

pub use bar::{BarColor, BarOverlay, BossBar};
pub use display::{BossBarDisplay, ConsoleDisplay};
pub use error::{HudError, HudResult};
pub use manager::{
    color_for, format_remaining, progress_toward_cap, BossBarManager, COMPLETION_LABEL,
};
pub use worker::{HudCommand, PlaytimeHud, UpdateWorker};

#[cfg(test)]
pub(crate) use display::MockBossBarDisplay;

/// Fixed rate at which every online player's bar is refreshed.
pub const UPDATE_PERIOD: Duration = Duration::from_secs(1);
