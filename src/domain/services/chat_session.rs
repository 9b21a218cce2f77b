#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use crate::domain::models::Author;
use crate::domain::models::BackendFailure;
use crate::domain::models::Message;

/// A question already shown in the transcript, waiting for its answer.
#[derive(Debug)]
pub struct PendingExchange {
    question: String,
    position: usize,
}

impl PendingExchange {
    pub fn question(&self) -> &str {
        return &self.question;
    }
}

/// Append-only transcript for the current document.
#[derive(Default)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Shows the user's question right away. Returns `None` when there is
    /// nothing to send.
    pub fn begin(&mut self, question: &str) -> Option<PendingExchange> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.messages.push(Message::new(Author::User, question));

        return Some(PendingExchange {
            question: question.to_string(),
            position: self.messages.len() - 1,
        });
    }

    /// Appends the answer, or an error notice when the backend failed. The
    /// question stays in the transcript either way.
    pub fn settle(
        &mut self,
        exchange: PendingExchange,
        outcome: Result<String, BackendFailure>,
    ) -> &Message {
        let message = match outcome {
            Ok(answer) => Message::new(Author::Assistant, &answer),
            Err(failure) => {
                tracing::error!(
                    error = %failure,
                    position = exchange.position,
                    "Chat request failed"
                );
                Message::new(Author::System, &format!("Error: {failure}"))
            }
        };

        self.messages.push(message);
        return &self.messages[self.messages.len() - 1];
    }
}
