use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use async_trait::async_trait;

use crate::domain::models::Backend;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendFailure;
use crate::domain::models::DocumentFile;
use crate::domain::models::HistoryEntry;
use crate::domain::models::QuizBatchRequest;
use crate::domain::models::QuizQuestion;
use crate::domain::models::Reply;
use crate::domain::models::UploadPayload;
use crate::domain::models::Video;

#[derive(Default)]
pub struct Calls {
    pub uploads: Vec<String>,
    pub quiz_requests: Vec<QuizBatchRequest>,
    pub questions: Vec<String>,
    pub document_listings: usize,
}

impl Calls {
    pub fn total(&self) -> usize {
        return self.uploads.len()
            + self.quiz_requests.len()
            + self.questions.len()
            + self.document_listings;
    }
}

#[derive(Default)]
struct Script {
    uploads: VecDeque<Reply<UploadPayload>>,
    quizzes: VecDeque<Reply<Vec<QuizQuestion>>>,
    answers: VecDeque<Reply<String>>,
    documents: VecDeque<Reply<Vec<HistoryEntry>>>,
}

/// Backend answering from scripted replies and recording every call.
#[derive(Clone, Default)]
pub struct TestBackend {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Calls>>,
}

fn unscripted<T>(endpoint: &str) -> Reply<T> {
    return Reply::Failed(BackendFailure::Backend(format!(
        "No scripted reply for {endpoint}"
    )));
}

impl TestBackend {
    pub fn boxed(&self) -> BackendBox {
        return Box::new(self.clone());
    }

    pub fn calls(&self) -> MutexGuard<'_, Calls> {
        return self.calls.lock().unwrap();
    }

    pub fn push_upload(&self, reply: Reply<UploadPayload>) {
        self.script.lock().unwrap().uploads.push_back(reply);
    }

    pub fn push_quiz(&self, reply: Reply<Vec<QuizQuestion>>) {
        self.script.lock().unwrap().quizzes.push_back(reply);
    }

    pub fn push_answer(&self, reply: Reply<String>) {
        self.script.lock().unwrap().answers.push_back(reply);
    }

    pub fn push_documents(&self, reply: Reply<Vec<HistoryEntry>>) {
        self.script.lock().unwrap().documents.push_back(reply);
    }
}

#[async_trait]
impl Backend for TestBackend {
    async fn upload(&self, file: DocumentFile) -> Reply<UploadPayload> {
        self.calls.lock().unwrap().uploads.push(file.filename);
        return self
            .script
            .lock()
            .unwrap()
            .uploads
            .pop_front()
            .unwrap_or_else(|| return unscripted("upload"));
    }

    async fn generate_quiz(&self, request: &QuizBatchRequest) -> Reply<Vec<QuizQuestion>> {
        self.calls.lock().unwrap().quiz_requests.push(request.clone());
        return self
            .script
            .lock()
            .unwrap()
            .quizzes
            .pop_front()
            .unwrap_or_else(|| return unscripted("quiz-more"));
    }

    async fn chat(&self, question: &str) -> Reply<String> {
        self.calls.lock().unwrap().questions.push(question.to_string());
        return self
            .script
            .lock()
            .unwrap()
            .answers
            .pop_front()
            .unwrap_or_else(|| return unscripted("chat"));
    }

    async fn list_documents(&self) -> Reply<Vec<HistoryEntry>> {
        self.calls.lock().unwrap().document_listings += 1;
        return self
            .script
            .lock()
            .unwrap()
            .documents
            .pop_front()
            .unwrap_or(Reply::Data(vec![]));
    }
}

pub fn questions(first: usize, count: usize) -> Vec<QuizQuestion> {
    return (first..first + count)
        .map(|idx| {
            return QuizQuestion::new(
                &format!("Question {idx}?"),
                &["True", "False"],
                "True",
            );
        })
        .collect();
}

pub fn upload_payload(raw_text: &str, quiz_count: usize) -> UploadPayload {
    return UploadPayload {
        summary: "**Cells** are the basic unit of life.".to_string(),
        quiz: questions(1, quiz_count),
        videos: vec![Video {
            title: "Cell biology in 10 minutes".to_string(),
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            thumbnail: "https://i.ytimg.com/vi/abc/hqdefault.jpg".to_string(),
        }],
        raw_text: raw_text.to_string(),
        index_status: "".to_string(),
    };
}

pub fn document_file(filename: &str) -> DocumentFile {
    return DocumentFile {
        filename: filename.to_string(),
        bytes: b"Cells are the basic unit of life.".to_vec(),
    };
}
