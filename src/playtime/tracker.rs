use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::{PlaytimeResult, PlaytimeSource, DAILY_PLAYTIME_SECS};
use crate::player::PlayerId;

#[derive(Clone, Copy, Debug)]
struct Session {
    banked_secs: i64,
    connected_at: Option<Instant>,
}

impl Session {
    fn seconds_left(&self) -> i64 {
        match self.connected_at {
            Some(connected_at) => self.banked_secs - connected_at.elapsed().as_secs() as i64,
            None => self.banked_secs,
        }
    }
}

/// Tracks per-player playtime balances for the current day.
///
/// A player is granted the daily allowance on first connect; disconnecting
/// banks whatever is left so a later reconnect resumes the countdown. The
/// balance is allowed to go negative once a player overdraws the allowance.
pub struct SessionTracker {
    sessions: Arc<Mutex<HashMap<PlayerId, Session>>>,
    daily_allowance_secs: i64,
}

impl Clone for SessionTracker {
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            daily_allowance_secs: self.daily_allowance_secs,
        }
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new(DAILY_PLAYTIME_SECS)
    }
}

impl SessionTracker {
    pub fn new(daily_allowance_secs: i64) -> Self {
        Self {
            sessions: Default::default(),
            daily_allowance_secs,
        }
    }

    /// Open a session. First sight of a player grants the daily allowance, a
    /// reconnect resumes the banked balance. No-op for a connected player.
    pub fn connect(&self, player: PlayerId) -> PlaytimeResult<()> {
        let mut guard = self.sessions.lock()?;
        match guard.entry(player) {
            Entry::Vacant(e) => {
                e.insert(Session {
                    banked_secs: self.daily_allowance_secs,
                    connected_at: Some(Instant::now()),
                });
            }
            Entry::Occupied(mut e) => {
                let session = e.get_mut();
                if session.connected_at.is_none() {
                    session.connected_at = Some(Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Bank the remaining balance and mark the session offline. No-op for
    /// unknown players.
    pub fn disconnect(&self, player: PlayerId) -> PlaytimeResult<()> {
        let mut guard = self.sessions.lock()?;
        if let Some(session) = guard.get_mut(&player) {
            session.banked_secs = session.seconds_left();
            session.connected_at = None;
        }
        Ok(())
    }

    /// Adjust a player's balance by `secs` (negative values take time away),
    /// returning the new remaining seconds. Unknown players get an offline
    /// session seeded with the daily allowance first.
    pub fn grant(&self, player: PlayerId, secs: i64) -> PlaytimeResult<i64> {
        let mut guard = self.sessions.lock()?;
        let session = guard.entry(player).or_insert(Session {
            banked_secs: self.daily_allowance_secs,
            connected_at: None,
        });
        session.banked_secs += secs;
        Ok(session.seconds_left())
    }

    /// Remaining seconds for the player; unknown players report the full
    /// allowance.
    pub fn seconds_left(&self, player: PlayerId) -> PlaytimeResult<i64> {
        let guard = self.sessions.lock()?;
        Ok(guard
            .get(&player)
            .map(Session::seconds_left)
            .unwrap_or(self.daily_allowance_secs))
    }
}

impl PlaytimeSource for SessionTracker {
    fn seconds_remaining(&self, player: PlayerId) -> i64 {
        self.seconds_left(player).unwrap_or(self.daily_allowance_secs)
    }
}
