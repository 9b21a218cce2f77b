use super::BackendFailure;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Please upload and analyze a document first.")]
    NoDocument,
    #[error("Maximum limit of quiz questions reached.")]
    QuotaExceeded,
    #[error("A document upload is already in progress.")]
    ConcurrentOperation,
    #[error("{0}")]
    Backend(String),
    #[error("Network error: {0}")]
    Network(String),
}

impl From<BackendFailure> for SessionError {
    fn from(failure: BackendFailure) -> SessionError {
        match failure {
            BackendFailure::Backend(reason) => return SessionError::Backend(reason),
            BackendFailure::Network(reason) => return SessionError::Network(reason),
        }
    }
}
