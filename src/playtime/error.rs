use std::sync::PoisonError;

pub type PlaytimeResult<T> = Result<T, PlaytimeError>;

#[derive(thiserror::Error, Debug)]
pub enum PlaytimeError {
    #[error("failed to lock session storage: {reason}")]
    MutexPoison { reason: String },
}

impl<T> From<PoisonError<T>> for PlaytimeError {
    fn from(value: PoisonError<T>) -> Self {
        Self::MutexPoison {
            reason: value.to_string(),
        }
    }
}
