#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use super::ChatSession;
use super::DocumentSession;
use super::HistorySync;
use super::QuizQuotaTracker;
use super::QuizResetPolicy;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::DocumentFile;
use crate::domain::models::RendererBox;
use crate::domain::models::Reply;
use crate::domain::models::SessionError;
use crate::domain::models::UploadPayload;

/// Owns every piece of state of one user session and sequences intents
/// against the backend.
pub struct SessionOrchestrator {
    backend: BackendBox,
    renderer: RendererBox,
    document: DocumentSession,
    quota: QuizQuotaTracker,
    chat: ChatSession,
    history: HistorySync,
}

impl SessionOrchestrator {
    pub fn new(
        backend: BackendBox,
        renderer: RendererBox,
        policy: QuizResetPolicy,
    ) -> SessionOrchestrator {
        return SessionOrchestrator {
            backend,
            renderer,
            document: DocumentSession::default(),
            quota: QuizQuotaTracker::new(policy),
            chat: ChatSession::default(),
            history: HistorySync::default(),
        };
    }

    pub fn document(&self) -> &DocumentSession {
        return &self.document;
    }

    pub fn quota(&self) -> &QuizQuotaTracker {
        return &self.quota;
    }

    pub fn chat(&self) -> &ChatSession {
        return &self.chat;
    }

    pub fn history(&self) -> &HistorySync {
        return &self.history;
    }

    /// Runs one intent to completion. Precondition errors become notices for
    /// the user; backend failures were already reported by the intent itself.
    pub async fn dispatch(&mut self, action: Action) {
        let res = match action {
            Action::Startup() | Action::RefreshHistory() => {
                self.refresh_history().await;
                Ok(())
            }
            Action::Upload(path) => match DocumentFile::load(&path).await {
                Ok(file) => self.upload(Some(file)).await,
                Err(err) => {
                    self.renderer
                        .on_notice(&format!("Unable to read {}: {err}", path.display()));
                    Ok(())
                }
            },
            Action::GenerateQuiz(difficulty, reset) => self.generate_quiz(&difficulty, reset).await,
            Action::SendChat(text) => self.send_chat(&text).await,
        };

        match res {
            Ok(()) => (),
            Err(SessionError::QuotaExceeded) => self.renderer.on_quiz_quota_exceeded(),
            Err(err @ SessionError::NoDocument) | Err(err @ SessionError::ConcurrentOperation) => {
                self.renderer.on_notice(&err.to_string());
            }
            Err(err) => {
                tracing::debug!(error = %err, "Intent finished with a backend failure");
            }
        }
    }

    pub async fn refresh_history(&mut self) {
        if let Some(entries) = self.history.refresh(&self.backend).await {
            self.renderer.on_history_updated(entries);
        }
    }

    /// Uploads a document and, once indexed, renders its summary, first quiz
    /// batch and videos. `None` means no file was picked and nothing happens.
    pub async fn upload(&mut self, file: Option<DocumentFile>) -> Result<(), SessionError> {
        let file = match file {
            Some(file) => file,
            None => return Ok(()),
        };

        self.document.begin_upload(&file.filename)?;
        self.renderer.on_upload_started(&file.filename);

        match self.backend.upload(file).await {
            Reply::Data(payload) => {
                let UploadPayload {
                    summary,
                    quiz,
                    videos,
                    raw_text,
                    index_status,
                } = payload;

                self.document
                    .complete_upload(raw_text, &mut self.quota, &mut self.chat);
                let batch = self.quota.apply_batch(quiz);
                self.renderer.on_document_indexed(&summary, &batch, &videos);
                if !index_status.is_empty() {
                    self.renderer.on_notice(&index_status);
                }

                self.refresh_history().await;
                return Ok(());
            }
            Reply::AuthRequired { location } => {
                tracing::info!(location, "Upload redirected to sign in");
                self.document.abandon_upload();
                self.renderer.on_auth_required(&location);
                return Ok(());
            }
            Reply::Failed(failure) => {
                let message = failure.to_string();
                self.document.fail_upload(&message);
                self.renderer.on_upload_failed(&message);
                return Err(failure.into());
            }
        }
    }

    /// Requests the next page of questions, or a fresh first page with
    /// `reset`. Only one request may be in flight at a time.
    pub async fn generate_quiz(&mut self, difficulty: &str, reset: bool) -> Result<(), SessionError> {
        let reset = self.quota.effective_reset(difficulty, reset);
        let request = self.quota.request_more(&self.document, difficulty, reset)?;
        if reset {
            self.renderer.on_quiz_cleared();
        }

        match self.backend.generate_quiz(&request).await.into_result() {
            Ok(questions) => {
                let batch = self.quota.apply_batch(questions);
                self.renderer
                    .on_quiz_batch_ready(&batch.questions, batch.more_available);
                return Ok(());
            }
            Err(failure) => {
                tracing::error!(error = %failure, difficulty, "Quiz generation failed");
                self.renderer.on_quiz_failed(&failure.to_string());
                return Err(failure.into());
            }
        }
    }

    /// Asks a question about the indexed document. Blank input is ignored.
    pub async fn send_chat(&mut self, text: &str) -> Result<(), SessionError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        if !self.document.is_indexed() {
            return Err(SessionError::NoDocument);
        }

        let exchange = match self.chat.begin(text) {
            Some(exchange) => exchange,
            None => return Ok(()),
        };
        if let Some(question) = self.chat.messages().last() {
            self.renderer.on_chat_message(question);
        }

        let outcome = self.backend.chat(exchange.question()).await.into_result();
        let failure = outcome.as_ref().err().cloned();

        let answer = self.chat.settle(exchange, outcome);
        self.renderer.on_chat_message(answer);

        if let Some(failure) = failure {
            return Err(failure.into());
        }

        return Ok(());
    }
}
