#[cfg(test)]
#[path = "document_session_test.rs"]
mod tests;

use super::ChatSession;
use super::QuizQuotaTracker;
use crate::domain::models::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentPhase {
    Empty,
    Pending,
    Indexed,
    /// The last upload failed and no document was ever indexed.
    Failed,
}

/// The currently analyzed document.
///
/// The text is only ever replaced as a whole by a successful upload, so it
/// can be read freely between two upload completions.
#[derive(Default)]
pub struct DocumentSession {
    raw_text: String,
    filename: Option<String>,
    indexed: bool,
    pending: Option<String>,
    last_error: Option<String>,
}

impl DocumentSession {
    pub fn is_indexed(&self) -> bool {
        return self.indexed;
    }

    pub fn raw_text(&self) -> &str {
        return &self.raw_text;
    }

    pub fn filename(&self) -> Option<&str> {
        return self.filename.as_deref();
    }

    pub fn last_error(&self) -> Option<&str> {
        return self.last_error.as_deref();
    }

    pub fn phase(&self) -> DocumentPhase {
        if self.pending.is_some() {
            return DocumentPhase::Pending;
        }
        if self.indexed {
            return DocumentPhase::Indexed;
        }
        if self.last_error.is_some() {
            return DocumentPhase::Failed;
        }

        return DocumentPhase::Empty;
    }

    pub fn begin_upload(&mut self, filename: &str) -> Result<(), SessionError> {
        if let Some(pending) = &self.pending {
            tracing::warn!(pending, filename, "Rejected upload while another is in flight");
            return Err(SessionError::ConcurrentOperation);
        }

        self.pending = Some(filename.to_string());
        return Ok(());
    }

    /// Swaps in the new document and starts the quiz and the chat over for
    /// it.
    pub fn complete_upload(
        &mut self,
        raw_text: String,
        quota: &mut QuizQuotaTracker,
        chat: &mut ChatSession,
    ) {
        self.filename = self.pending.take();
        self.raw_text = raw_text;
        self.indexed = true;
        self.last_error = None;

        quota.reset();
        chat.clear();

        tracing::debug!(
            filename = ?self.filename,
            length = self.raw_text.len(),
            "Document indexed"
        );
    }

    /// Records a failed upload. A previously indexed document stays usable.
    pub fn fail_upload(&mut self, message: &str) {
        self.pending = None;
        self.last_error = Some(message.to_string());
    }

    /// Drops the in-flight upload without counting it as a failure.
    pub fn abandon_upload(&mut self) {
        self.pending = None;
    }
}
