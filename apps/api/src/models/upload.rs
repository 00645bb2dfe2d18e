use bytes::Bytes;
use serde::Serialize;

/// An uploaded file held in memory for the lifetime of one workflow run.
/// The raw bytes are opaque to this service; only the remote model reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Metadata-only projection, safe to render to clients.
    pub fn meta(&self) -> FileMeta {
        FileMeta {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size: self.bytes.len(),
        }
    }
}

/// What the workflow view exposes about an uploaded file — never the bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMeta {
    pub name: String,
    pub content_type: String,
    pub size: usize,
}
