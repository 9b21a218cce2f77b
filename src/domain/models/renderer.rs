#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;

use tokio::sync::mpsc;

use super::BatchApplied;
use super::Event;
use super::HistoryEntry;
use super::Message;
use super::NumberedQuestion;
use super::Video;

/// Presentation side of a session. The orchestrator reports every state
/// change here and never reads anything back.
pub trait Renderer {
    fn on_upload_started(&mut self, filename: &str);
    fn on_document_indexed(&mut self, summary: &str, batch: &BatchApplied, videos: &[Video]);
    fn on_upload_failed(&mut self, message: &str);
    /// The backend wants the user to sign in at `location` first.
    fn on_auth_required(&mut self, location: &str);
    /// Previously rendered questions are discarded.
    fn on_quiz_cleared(&mut self);
    fn on_quiz_batch_ready(&mut self, questions: &[NumberedQuestion], more_available: bool);
    fn on_quiz_quota_exceeded(&mut self);
    fn on_quiz_failed(&mut self, message: &str);
    fn on_chat_message(&mut self, message: &Message);
    fn on_history_updated(&mut self, entries: &[HistoryEntry]);
    fn on_notice(&mut self, message: &str);
}

pub type RendererBox = Box<dyn Renderer + Send>;

fn forward(tx: &mpsc::UnboundedSender<Event>, event: Event) {
    if let Err(err) = tx.send(event) {
        tracing::warn!(event = ?err.0, "UI is gone, dropping event");
    }
}

/// Forwards notifications to the UI loop as events.
impl Renderer for mpsc::UnboundedSender<Event> {
    fn on_upload_started(&mut self, filename: &str) {
        forward(self, Event::UploadStarted(filename.to_string()));
    }

    fn on_document_indexed(&mut self, summary: &str, batch: &BatchApplied, videos: &[Video]) {
        forward(
            self,
            Event::DocumentIndexed {
                summary: summary.to_string(),
                questions: batch.questions.to_vec(),
                more_available: batch.more_available,
                videos: videos.to_vec(),
            },
        );
    }

    fn on_upload_failed(&mut self, message: &str) {
        forward(self, Event::UploadFailed(message.to_string()));
    }

    fn on_auth_required(&mut self, location: &str) {
        forward(self, Event::AuthRequired(location.to_string()));
    }

    fn on_quiz_cleared(&mut self) {
        forward(self, Event::QuizCleared());
    }

    fn on_quiz_batch_ready(&mut self, questions: &[NumberedQuestion], more_available: bool) {
        forward(self, Event::QuizBatchReady(questions.to_vec(), more_available));
    }

    fn on_quiz_quota_exceeded(&mut self) {
        forward(self, Event::QuizQuotaExceeded());
    }

    fn on_quiz_failed(&mut self, message: &str) {
        forward(self, Event::QuizFailed(message.to_string()));
    }

    fn on_chat_message(&mut self, message: &Message) {
        forward(self, Event::ChatMessage(message.clone()));
    }

    fn on_history_updated(&mut self, entries: &[HistoryEntry]) {
        forward(self, Event::HistoryUpdated(entries.to_vec()));
    }

    fn on_notice(&mut self, message: &str) {
        forward(self, Event::Notice(message.to_string()));
    }
}
