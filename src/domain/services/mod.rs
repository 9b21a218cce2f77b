pub mod actions;
mod app_state;
mod chat_session;
mod document_session;
mod history_sync;
mod orchestrator;
mod quiz_quota;
#[cfg(test)]
pub mod test_backend;

pub use app_state::*;
pub use chat_session::*;
pub use document_session::*;
pub use history_sync::*;
pub use orchestrator::*;
pub use quiz_quota::*;
