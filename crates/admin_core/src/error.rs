use shared::error::ApiError;
use thiserror::Error;

use crate::session::SessionPhase;

/// Failure at the remote directory boundary.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("invalid service endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("remote service unavailable: {0}")]
    Unavailable(String),
    #[error("remote protocol failure: {0}")]
    Protocol(String),
    #[error("remote service rejected request: {}", .0.message)]
    Rejected(ApiError),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            DirectoryError::Unavailable(err.to_string())
        } else {
            DirectoryError::Protocol(err.to_string())
        }
    }
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,
    #[error("team required")]
    TeamRequired,
    #[error("customer required")]
    CustomerRequired,
    #[error("invalid date")]
    InvalidDate,
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("no projects available")]
    NoProjectsAvailable,
    #[error("transport error: {0}")]
    Transport(#[source] DirectoryError),
    #[error("{operation} requires an authenticated session")]
    NotAuthenticated { operation: &'static str },
    #[error("{operation} is not valid while {phase}")]
    InvalidState {
        operation: &'static str,
        phase: SessionPhase,
    },
    #[error("no project at index {index} (list holds {len})")]
    ProjectIndexOutOfRange { index: usize, len: usize },
}

impl From<DirectoryError> for WorkflowError {
    fn from(err: DirectoryError) -> Self {
        WorkflowError::Transport(err)
    }
}

impl WorkflowError {
    /// Create calls are the only ones whose payload the remote side may refuse.
    pub fn from_submission(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Rejected(api) => {
                WorkflowError::Validation(ValidationError::Rejected(api.message))
            }
            other => WorkflowError::Transport(other),
        }
    }

    /// True when the same command may be retried with corrected input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation(_) | WorkflowError::AuthenticationFailed
        )
    }
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;
