use thiserror::Error;

use crate::lifecycle::LifecycleError;

/// Failure of a read against the Flow API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A checklist mutation refused before anything was changed locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    #[error("task description cannot be empty")]
    EmptyDescription,

    #[error("no task with id {0}")]
    UnknownItem(String),

    #[error("task {0} is still being saved")]
    PendingCreate(String),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}
