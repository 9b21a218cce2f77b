#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Message;
use crate::domain::models::NumberedQuestion;
use crate::domain::models::SlashCommand;
use crate::domain::models::Video;

pub const DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

/// A line of terminal output, styled by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Heading(String),
    Text(String),
    Notice(String),
    Error(String),
    Chat(Message),
}

pub fn help_text() -> String {
    return r#"
COMMANDS:
- /upload (/u) PATH - Upload a document to summarize, quiz and chat about.
- /quiz (/qz) [DIFFICULTY] - Start a new quiz. Difficulty is Easy, Medium or Hard.
- /more (/m) - Load the next page of questions.
- /answers (/a) - Reveal the answers of the current quiz.
- /history (/hi) - List previously processed documents.
- /help (/h) - Show this message.
- /quit (/q) - Exit.

Anything else is sent as a question about the uploaded document."#
        .trim()
        .to_string();
}

/// Matches a difficulty regardless of case, returning its canonical name.
pub fn parse_difficulty(text: &str) -> Option<String> {
    return DIFFICULTIES
        .iter()
        .find(|e| return e.eq_ignore_ascii_case(text.trim()))
        .map(|e| return e.to_string());
}

fn format_question(question: &NumberedQuestion) -> String {
    let mut lines = vec![format!("{}. {}", question.number, question.question.question)];
    for (idx, option) in question.question.options.iter().enumerate() {
        let letter = (b'a' + (idx % 26) as u8) as char;
        lines.push(format!("   {letter}) {option}"));
    }

    return lines.join("\n");
}

fn format_video(video: &Video) -> String {
    return format!("- {} ({})", video.title, video.url);
}

/// What the terminal front end remembers between events: the questions on
/// screen, the selected difficulty, and the last known history.
pub struct AppState {
    pub difficulty: String,
    pub quiz: Vec<NumberedQuestion>,
    pub history: Vec<HistoryEntry>,
}

impl AppState {
    pub fn new(difficulty: &str) -> AppState {
        return AppState {
            difficulty: parse_difficulty(difficulty).unwrap_or_else(|| return "Medium".to_string()),
            quiz: vec![],
            history: vec![],
        };
    }

    /// Turns one line of user input into actions. Returns whether the session
    /// should end, plus anything to print right away.
    pub fn handle_input(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, Vec<Output>)> {
        if text.trim().is_empty() {
            return Ok((false, vec![]));
        }

        let cmd = match SlashCommand::parse(text) {
            Some(cmd) => cmd,
            None => {
                tx.send(Action::SendChat(text.trim().to_string()))?;
                return Ok((false, vec![]));
            }
        };

        if cmd.is_quit() {
            return Ok((true, vec![]));
        }

        if cmd.is_help() {
            return Ok((false, vec![Output::Text(help_text())]));
        }

        if cmd.is_upload() {
            match cmd.argument() {
                Some(path) => tx.send(Action::Upload(PathBuf::from(path)))?,
                None => {
                    return Ok((
                        false,
                        vec![Output::Notice("Usage: /upload PATH".to_string())],
                    ));
                }
            }
            return Ok((false, vec![]));
        }

        if cmd.is_quiz() {
            if let Some(arg) = cmd.argument() {
                match parse_difficulty(&arg) {
                    Some(difficulty) => self.difficulty = difficulty,
                    None => {
                        return Ok((
                            false,
                            vec![Output::Notice(format!(
                                "Unknown difficulty {arg}, pick one of {}.",
                                DIFFICULTIES.join(", ")
                            ))],
                        ));
                    }
                }
            }
            tx.send(Action::GenerateQuiz(self.difficulty.to_string(), true))?;
            return Ok((false, vec![]));
        }

        if cmd.is_more() {
            tx.send(Action::GenerateQuiz(self.difficulty.to_string(), false))?;
            return Ok((false, vec![]));
        }

        if cmd.is_answers() {
            return Ok((false, self.answers()));
        }

        if cmd.is_history() {
            tx.send(Action::RefreshHistory())?;
            return Ok((false, vec![]));
        }

        return Ok((false, vec![]));
    }

    fn answers(&self) -> Vec<Output> {
        if self.quiz.is_empty() {
            return vec![Output::Notice(
                "There is no quiz to check yet. Try /quiz first.".to_string(),
            )];
        }

        let lines = self
            .quiz
            .iter()
            .map(|e| return format!("{}. {}", e.number, e.question.answer))
            .collect::<Vec<String>>();

        return vec![
            Output::Heading("Answers".to_string()),
            Output::Text(lines.join("\n")),
        ];
    }

    fn push_questions(&mut self, questions: &[NumberedQuestion], out: &mut Vec<Output>) {
        if questions.first().map(|e| return e.number) == Some(1) {
            self.quiz.clear();
        }
        self.quiz.extend_from_slice(questions);

        out.extend(
            questions
                .iter()
                .map(|e| return Output::Text(format_question(e))),
        );
    }

    fn more_hint(more_available: bool) -> Output {
        if more_available {
            return Output::Notice("Type /more for more questions.".to_string());
        }

        return Output::Notice("Maximum limit of quiz questions reached.".to_string());
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Output> {
        let mut out = vec![];
        match event {
            Event::UploadStarted(filename) => {
                out.push(Output::Notice(format!("Uploading and analyzing {filename}...")));
            }
            Event::DocumentIndexed {
                summary,
                questions,
                more_available,
                videos,
            } => {
                out.push(Output::Heading("Summary".to_string()));
                out.push(Output::Text(summary.replace("**", "")));
                out.push(Output::Heading("Quiz".to_string()));
                self.quiz.clear();
                self.push_questions(&questions, &mut out);
                out.push(AppState::more_hint(more_available));
                if !videos.is_empty() {
                    out.push(Output::Heading("Videos".to_string()));
                    out.extend(videos.iter().map(|e| return Output::Text(format_video(e))));
                }
            }
            Event::UploadFailed(message) => {
                out.push(Output::Error(format!("Upload failed: {message}")));
            }
            Event::AuthRequired(location) => {
                out.push(Output::Error(format!(
                    "Sign in required. Open {location} in your browser, then set the session-cookie config."
                )));
            }
            Event::QuizCleared() => {
                self.quiz.clear();
                out.push(Output::Heading("Quiz".to_string()));
            }
            Event::QuizBatchReady(questions, more_available) => {
                self.push_questions(&questions, &mut out);
                out.push(AppState::more_hint(more_available));
            }
            Event::QuizQuotaExceeded() => {
                out.push(Output::Notice(
                    "Maximum limit of quiz questions reached.".to_string(),
                ));
            }
            Event::QuizFailed(message) => {
                out.push(Output::Error(format!("Quiz generation failed: {message}")));
            }
            Event::ChatMessage(message) => {
                out.push(Output::Chat(message));
            }
            Event::HistoryUpdated(entries) => {
                self.history = entries;
                out.push(Output::Heading("History".to_string()));
                if self.history.is_empty() {
                    out.push(Output::Text("No history yet.".to_string()));
                } else {
                    out.extend(
                        self.history
                            .iter()
                            .map(|e| return Output::Text(format!("- {}", e.filename))),
                    );
                }
            }
            Event::Notice(message) => {
                out.push(Output::Notice(message));
            }
        }

        return out;
    }
}
