use std::sync::PoisonError;

use tokio::sync::mpsc::error::SendError;

pub type HudResult<T> = Result<T, HudError>;

#[derive(thiserror::Error, Debug)]
pub enum HudError {
    #[error("failed to lock bar storage: {reason}")]
    MutexPoison { reason: String },
    #[error("failed to send command over channel: {reason}")]
    ChannelSendFailed { reason: String },
}

impl<T> From<PoisonError<T>> for HudError {
    fn from(value: PoisonError<T>) -> Self {
        Self::MutexPoison {
            reason: value.to_string(),
        }
    }
}

impl<T> From<SendError<T>> for HudError {
    fn from(value: SendError<T>) -> Self {
        Self::ChannelSendFailed {
            reason: value.to_string(),
        }
    }
}
