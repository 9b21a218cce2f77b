#[cfg(test)]
#[path = "quiz_quota_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::DocumentSession;
use crate::domain::models::BatchApplied;
use crate::domain::models::NumberedQuestion;
use crate::domain::models::QuizBatchRequest;
use crate::domain::models::QuizQuestion;
use crate::domain::models::SessionError;

/// Upper bound of questions generated for one document.
pub const QUIZ_CAP: usize = 50;
/// Questions requested per page. The backend may return fewer.
pub const QUIZ_PAGE_SIZE: usize = 10;

/// Whether picking another difficulty throws away the current quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizResetPolicy {
    OnDifficultyChange,
    ExplicitOnly,
}

impl QuizResetPolicy {
    pub fn parse(text: &str) -> Result<QuizResetPolicy> {
        match text.trim() {
            "" | "true" => return Ok(QuizResetPolicy::OnDifficultyChange),
            "false" => return Ok(QuizResetPolicy::ExplicitOnly),
            _ => bail!(format!("Invalid quiz reset policy '{text}', expected true or false")),
        }
    }
}

/// Counts the questions generated for the current document.
///
/// Pagination calls are expected to be serialized by the caller: issuing a
/// second `request_more` before the first batch has been applied is not
/// supported.
pub struct QuizQuotaTracker {
    generated_count: usize,
    last_difficulty: Option<String>,
    policy: QuizResetPolicy,
}

impl Default for QuizQuotaTracker {
    fn default() -> QuizQuotaTracker {
        return QuizQuotaTracker::new(QuizResetPolicy::OnDifficultyChange);
    }
}

impl QuizQuotaTracker {
    pub fn new(policy: QuizResetPolicy) -> QuizQuotaTracker {
        return QuizQuotaTracker {
            generated_count: 0,
            last_difficulty: None,
            policy,
        };
    }

    pub fn generated_count(&self) -> usize {
        return self.generated_count;
    }

    pub fn more_available(&self) -> bool {
        return self.generated_count < QUIZ_CAP;
    }

    /// Starts over for a newly indexed document.
    pub fn reset(&mut self) {
        self.generated_count = 0;
        self.last_difficulty = None;
    }

    /// Resolves whether a request has to start a fresh quiz, taking the reset
    /// policy into account. Does not change any state.
    pub fn effective_reset(&self, difficulty: &str, reset: bool) -> bool {
        if reset || self.policy == QuizResetPolicy::ExplicitOnly {
            return reset;
        }

        return self
            .last_difficulty
            .as_ref()
            .map(|last| return last != difficulty)
            .unwrap_or(false);
    }

    /// Builds the request for the next page of questions.
    ///
    /// With `reset` the count starts over before the request is issued, so the
    /// caller must discard previously rendered questions. Without it the
    /// request is refused once the cap is reached.
    pub fn request_more(
        &mut self,
        document: &DocumentSession,
        difficulty: &str,
        reset: bool,
    ) -> Result<QuizBatchRequest, SessionError> {
        if !document.is_indexed() {
            return Err(SessionError::NoDocument);
        }

        if !reset && self.generated_count >= QUIZ_CAP {
            return Err(SessionError::QuotaExceeded);
        }

        if reset {
            self.generated_count = 0;
        }
        self.last_difficulty = Some(difficulty.to_string());

        return Ok(QuizBatchRequest {
            text: document.raw_text().to_string(),
            difficulty: difficulty.to_string(),
            count: QUIZ_PAGE_SIZE,
        });
    }

    /// Numbers a returned batch after the questions already generated and
    /// counts it against the quota. Questions past the cap are dropped.
    pub fn apply_batch(&mut self, mut questions: Vec<QuizQuestion>) -> BatchApplied {
        let remaining = QUIZ_CAP - self.generated_count;
        if questions.len() > remaining {
            tracing::warn!(
                returned = questions.len(),
                remaining,
                "Backend returned more questions than the quota allows"
            );
            questions.truncate(remaining);
        }

        let start = self.generated_count + 1;
        self.generated_count += questions.len();

        let numbered = questions
            .into_iter()
            .enumerate()
            .map(|(idx, question)| {
                return NumberedQuestion {
                    number: start + idx,
                    question,
                };
            })
            .collect::<Vec<NumberedQuestion>>();

        tracing::debug!(
            applied = numbered.len(),
            generated_count = self.generated_count,
            "Applied quiz batch"
        );

        return BatchApplied {
            questions: numbered,
            more_available: self.more_available(),
        };
    }
}
