use std::path::PathBuf;

/// User intents queued for the orchestrator. Intents are processed one at a
/// time, in the order they were sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Startup(),
    Upload(PathBuf),
    /// Difficulty, and whether to discard the questions generated so far.
    GenerateQuiz(String, bool),
    SendChat(String),
    RefreshHistory(),
}
