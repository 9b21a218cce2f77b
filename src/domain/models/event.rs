use super::HistoryEntry;
use super::Message;
use super::NumberedQuestion;
use super::Video;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    UploadStarted(String),
    DocumentIndexed {
        summary: String,
        questions: Vec<NumberedQuestion>,
        more_available: bool,
        videos: Vec<Video>,
    },
    UploadFailed(String),
    AuthRequired(String),
    QuizCleared(),
    QuizBatchReady(Vec<NumberedQuestion>, bool),
    QuizQuotaExceeded(),
    QuizFailed(String),
    ChatMessage(Message),
    HistoryUpdated(Vec<HistoryEntry>),
    Notice(String),
}
