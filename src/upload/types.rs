use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a selected file's bytes come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Read once, when the request is built.
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A file picked by the user. Duplicates by name are allowed.
#[derive(Debug, Clone)]
pub struct FileHandle {
    pub name: String,
    pub source: FileSource,
    /// Taken once at selection time.
    size: Option<u64>,
}

impl FileHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let size = std::fs::metadata(&path).ok().map(|m| m.len());
        Self {
            name,
            source: FileSource::Path(path),
            size,
        }
    }

    pub fn in_memory(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        Self {
            name: name.into(),
            size: Some(bytes.len() as u64),
            source: FileSource::Memory(bytes),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(path) => Some(path),
            FileSource::Memory(_) => None,
        }
    }

    /// Size in bytes as seen when the file was selected.
    pub fn size_hint(&self) -> Option<u64> {
        self.size
    }
}

/// Extracted key-value pairs: either free text or whatever JSON the extractor produced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KeyValues {
    Text(String),
    Structured(serde_json::Value),
}

impl Default for KeyValues {
    fn default() -> Self {
        KeyValues::Text(String::new())
    }
}

/// Processing output for one uploaded file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub extracted_text: String,
    #[serde(default)]
    pub prompt: String,
    /// `true` when the prompt was generated for this upload, `false` when reused.
    #[serde(default)]
    pub prompt_created: bool,
    #[serde(default)]
    pub key_values: KeyValues,
}

impl FileResult {
    pub fn prompt_label(&self) -> &'static str {
        if self.prompt_created {
            "(Newly Created Prompt)"
        } else {
            "(Reused Prompt)"
        }
    }
}

/// A validated upload. Only built through [`SubmissionRequest::new`], which validates.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub(crate) document_type: String,
    pub(crate) files: Vec<FileHandle>,
}

impl SubmissionRequest {
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }
}
