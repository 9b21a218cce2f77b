#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use async_trait::async_trait;

use super::DocumentFile;
use super::HistoryEntry;
use super::QuizBatchRequest;
use super::QuizQuestion;
use super::UploadPayload;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendFailure {
    /// The backend answered, but with an error status or an `{error}` body.
    #[error("{0}")]
    Backend(String),
    /// The request never got an answer.
    #[error("Network error: {0}")]
    Network(String),
}

/// Outcome of every backend call. A redirect is not a failure: it means the
/// caller has to go through the sign in flow first, and each caller decides
/// what to do about it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply<T> {
    Data(T),
    AuthRequired { location: String },
    Failed(BackendFailure),
}

impl<T> Reply<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reply<U> {
        match self {
            Reply::Data(data) => return Reply::Data(f(data)),
            Reply::AuthRequired { location } => return Reply::AuthRequired { location },
            Reply::Failed(failure) => return Reply::Failed(failure),
        }
    }

    /// Collapses the reply for callers that treat a redirect as any other
    /// failure.
    pub fn into_result(self) -> Result<T, BackendFailure> {
        match self {
            Reply::Data(data) => return Ok(data),
            Reply::AuthRequired { location } => {
                return Err(BackendFailure::Backend(format!(
                    "Authentication required, sign in at {location}"
                )));
            }
            Reply::Failed(failure) => return Err(failure),
        }
    }
}

#[async_trait]
pub trait Backend {
    /// Sends a document for indexing. Returns the summary, the first quiz
    /// batch, related videos, and the extracted text.
    async fn upload(&self, file: DocumentFile) -> Reply<UploadPayload>;

    /// Requests another batch of questions. The backend may return fewer
    /// questions than `request.count`.
    async fn generate_quiz(&self, request: &QuizBatchRequest) -> Reply<Vec<QuizQuestion>>;

    /// Asks a question about the indexed document. Only the latest question is
    /// sent, the backend holds the document context.
    async fn chat(&self, question: &str) -> Reply<String>;

    /// Lists documents previously processed for the caller.
    async fn list_documents(&self) -> Reply<Vec<HistoryEntry>>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
