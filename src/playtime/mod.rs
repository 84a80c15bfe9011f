mod error;
mod tracker;

pub use error::{PlaytimeError, PlaytimeResult};
pub use tracker::SessionTracker;

use crate::player::PlayerId;

/// Seconds a player may spend online per day.
pub const DAILY_PLAYTIME_SECS: i64 = 60 * 60;

/// Remaining-time source consumed by the hud.
///
/// Reported values may be negative once a player runs past the daily cap;
/// consumers clamp for display.
#[cfg_attr(test, mockall::automock)]
pub trait PlaytimeSource {
    fn seconds_remaining(&self, player: PlayerId) -> i64;
}
