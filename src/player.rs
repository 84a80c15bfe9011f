use std::sync::{Arc, Mutex, PoisonError};

use smallvec::SmallVec;

/// Stable unique identity of a player, assigned by the host.
pub type PlayerId = u64;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("failed to lock player registry: {reason}")]
    MutexPoison { reason: String },
}

impl<T> From<PoisonError<T>> for RegistryError {
    fn from(value: PoisonError<T>) -> Self {
        Self::MutexPoison {
            reason: value.to_string(),
        }
    }
}

pub trait Player {
    fn id(&self) -> PlayerId;
}

/// Enumerable set of currently connected players.
///
/// `online_players` returns a snapshot; players may join or leave while the
/// caller is still iterating it.
pub trait PlayerRegistry {
    type Item: Player;

    fn online_players(&self) -> Vec<Self::Item>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocalPlayer {
    id: PlayerId,
    name: String,
}

impl LocalPlayer {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Player for LocalPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }
}

/// In-memory registry for hosts that don't bring their own player engine.
#[derive(Debug, Default)]
pub struct LocalRegistry(Arc<Mutex<SmallVec<[LocalPlayer; 8]>>>);

impl Clone for LocalRegistry {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl LocalRegistry {
    /// Add a player to the online set. A player that is already connected is
    /// left untouched.
    pub fn connect(&self, player: LocalPlayer) -> RegistryResult<()> {
        let mut guard = self.0.lock()?;
        if guard.iter().all(|p| p.id() != player.id()) {
            guard.push(player);
        }
        Ok(())
    }

    /// Remove a player from the online set, returning them if they were
    /// connected.
    pub fn disconnect(&self, player: PlayerId) -> RegistryResult<Option<LocalPlayer>> {
        let mut guard = self.0.lock()?;
        let Some(position) = guard.iter().position(|p| p.id() == player) else {
            return Ok(None);
        };
        Ok(Some(guard.remove(position)))
    }
}

impl PlayerRegistry for LocalRegistry {
    type Item = LocalPlayer;

    fn online_players(&self) -> Vec<LocalPlayer> {
        self.0
            .lock()
            .map(|guard| guard.iter().cloned().collect())
            .unwrap_or_default()
    }
}
