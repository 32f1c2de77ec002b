pub mod config;
pub mod coordinator;
pub mod endpoint;
pub mod error;
pub mod presenter;
pub mod round;
pub mod selection;
pub mod task;

pub use error::{Error, Result};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classes the closed-set classifier was trained on. The open-set classifier
/// answers one of these or `Unknown`.
pub const AVAILABLE_CLASSES: [&str; 5] = [
    "Air Conditioner",
    "Car Horn",
    "Children Playing",
    "Dog Bark",
    "Drilling",
];

/// A local file chosen by the user. Replaced wholesale on every new selection.
///
/// The content is held as [`Bytes`], so both endpoint requests of a round
/// share one buffer.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
    content: Bytes,
}

/// Displayable metadata of a [`SelectedFile`], without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        last_modified: DateTime<Utc>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            last_modified,
            content: content.into(),
        }
    }

    /// Read a file from disk. The MIME type is guessed from the extension and
    /// the timestamp comes from the file's modification time.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} does not name a file", path.display()),
                )
            })?;

        let metadata = tokio::fs::metadata(path).await?;
        let last_modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        let content = tokio::fs::read(path).await?;

        Ok(Self::new(name, guess_mime_type(path), last_modified, content))
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn meta(&self) -> FileMeta {
        FileMeta {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            last_modified: self.last_modified,
        }
    }
}

/// MIME type for common audio extensions, `application/octet-stream` otherwise.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}
