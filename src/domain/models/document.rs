#[cfg(test)]
#[path = "document_test.rs"]
mod tests;

use std::path::Path;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;

use super::QuizQuestion;

/// A document read from disk, ready to be sent for analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub async fn load(path: &Path) -> Result<DocumentFile> {
        let filename = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => bail!(format!("{} is not a file", path.display())),
        };

        let bytes = fs::read(path).await?;
        tracing::debug!(filename, size = bytes.len(), "Loaded document");

        return Ok(DocumentFile { filename, bytes });
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
}

/// Everything the backend produces for a freshly indexed document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadPayload {
    pub summary: String,
    pub quiz: Vec<QuizQuestion>,
    pub videos: Vec<Video>,
    pub raw_text: String,
    /// Indexing status reported by the service, may be empty.
    pub index_status: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl HistoryEntry {
    pub fn new(filename: &str) -> HistoryEntry {
        return HistoryEntry {
            filename: filename.to_string(),
            id: None,
        };
    }
}
