use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A generated question. The payload is opaque to the session: it is never
/// validated or scored, only numbered and passed along.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestion {
    pub fn new(question: &str, options: &[&str], answer: &str) -> QuizQuestion {
        return QuizQuestion {
            question: question.to_string(),
            options: options.iter().map(|e| return e.to_string()).collect(),
            answer: answer.to_string(),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedQuestion {
    /// 1-based, continuous across every page of one document session.
    pub number: usize,
    #[serde(flatten)]
    pub question: QuizQuestion,
}

/// Body of a request for another page of questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBatchRequest {
    pub text: String,
    pub difficulty: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchApplied {
    pub questions: Vec<NumberedQuestion>,
    pub more_available: bool,
}
