#[cfg(test)]
#[path = "history_sync_test.rs"]
mod tests;

use crate::domain::models::BackendBox;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Reply;

/// Local copy of the backend's document list. Never patched locally, only
/// replaced by a fresh listing.
#[derive(Default)]
pub struct HistorySync {
    entries: Vec<HistoryEntry>,
}

impl HistorySync {
    pub fn entries(&self) -> &[HistoryEntry] {
        return &self.entries;
    }

    /// Returns the new list, or `None` when it was left untouched. Neither a
    /// redirect to sign in nor a failure is surfaced.
    pub async fn refresh(&mut self, backend: &BackendBox) -> Option<&[HistoryEntry]> {
        match backend.list_documents().await {
            Reply::Data(entries) => {
                tracing::debug!(count = entries.len(), "History refreshed");
                self.entries = entries;
                return Some(&self.entries);
            }
            Reply::AuthRequired { location } => {
                tracing::debug!(location, "History requires sign in, keeping current list");
            }
            Reply::Failed(failure) => {
                tracing::warn!(error = %failure, "History refresh failed, keeping current list");
            }
        }

        return None;
    }
}
