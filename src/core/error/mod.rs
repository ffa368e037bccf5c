//! Error types returned by queue operations.
//!
//! Every push-side error carries the rejected value so the caller keeps
//! ownership of it.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError<T> {
    #[error("push on a closed queue")]
    Closed(T),
    #[error("queue storage could not grow")]
    Alloc(T),
}

impl<T> PushError<T> {
    /// Recover the value that could not be pushed
    pub fn into_inner(self) -> T {
        match self {
            PushError::Closed(value) | PushError::Alloc(value) => value,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TryPushError<T> {
    #[error("queue is full")]
    Full(T),
    #[error("push on a closed queue")]
    Closed(T),
    #[error("queue storage could not grow")]
    Alloc(T),
}

impl<T> TryPushError<T> {
    pub fn into_inner(self) -> T {
        match self {
            TryPushError::Full(value)
            | TryPushError::Closed(value)
            | TryPushError::Alloc(value) => value,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, TryPushError::Full(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, TryPushError::Closed(_))
    }
}

impl<T> From<PushError<T>> for TryPushError<T> {
    fn from(err: PushError<T>) -> Self {
        match err {
            PushError::Closed(value) => TryPushError::Closed(value),
            PushError::Alloc(value) => TryPushError::Alloc(value),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushTimeoutError<T> {
    #[error("timed out waiting for free capacity")]
    Timeout(T),
    #[error("push on a closed queue")]
    Closed(T),
    #[error("queue storage could not grow")]
    Alloc(T),
}

impl<T> PushTimeoutError<T> {
    pub fn into_inner(self) -> T {
        match self {
            PushTimeoutError::Timeout(value)
            | PushTimeoutError::Closed(value)
            | PushTimeoutError::Alloc(value) => value,
        }
    }
}

impl<T> From<PushError<T>> for PushTimeoutError<T> {
    fn from(err: PushError<T>) -> Self {
        match err {
            PushError::Closed(value) => PushTimeoutError::Closed(value),
            PushError::Alloc(value) => PushTimeoutError::Alloc(value),
        }
    }
}

/// The queue was closed and every remaining item has been delivered.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PopError {
    #[error("queue is closed and drained")]
    Closed,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TryPopError {
    #[error("queue is empty")]
    Empty,
    #[error("queue is closed and drained")]
    Closed,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PopTimeoutError {
    #[error("timed out waiting for an item")]
    Timeout,
    #[error("queue is closed and drained")]
    Closed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: must be greater than zero")]
    InvalidCapacity { field: &'static str },
}
