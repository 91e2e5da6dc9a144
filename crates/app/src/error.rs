use thiserror::Error;

use larder_ai::AiError;
use larder_core::DomainError;

/// Failure of a session operation.
///
/// Neither variant is fatal: the session state is left as it was before the
/// call and the message is kept for display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ai(#[from] AiError),
}

impl SessionError {
    /// Text suitable for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Domain(err) => err.user_message(),
            SessionError::Ai(err) => err.to_string(),
        }
    }
}
