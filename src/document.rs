//! Input documents.

use crate::detect::{detect_format_from_bytes, FormatType};
use crate::error::Result;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

/// A named byte blob handed to the viewer.
#[derive(Clone)]
pub struct SourceDocument {
    name: String,
    bytes: Arc<[u8]>,
    digest: u64,
}

impl SourceDocument {
    /// Wrap in-memory bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Self {
            name: name.into(),
            digest: hasher.finish(),
            bytes,
        }
    }

    /// Read a document from disk; the file name becomes the document name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Ok(Self::new(display_name(path), bytes))
    }

    /// Read a document from disk without blocking the runtime.
    #[cfg(feature = "async")]
    pub async fn from_path_async(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(display_name(path), bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the bytes.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Sniffed package format, if the bytes are a recognizable OOXML package.
    pub fn format(&self) -> Option<FormatType> {
        detect_format_from_bytes(&self.bytes).ok()
    }

    /// Identity used to key per-document caches. The content digest is
    /// computed once when the document is created.
    pub fn key(&self) -> DocumentKey {
        DocumentKey {
            name: self.name.clone(),
            size: self.size(),
            digest: self.digest,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl std::fmt::Debug for SourceDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDocument")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Identity of a document: name, size and content digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub name: String,
    pub size: u64,
    pub digest: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_key() {
        let a = SourceDocument::new("deck.pptx", b"abc".to_vec());
        let b = SourceDocument::new("deck.pptx", b"abc".to_vec());
        let c = SourceDocument::new("deck.pptx", b"abd".to_vec());
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert_eq!(a.size(), 3);
        assert_eq!(a.key(), a.clone().key());
        assert_eq!(a.key().digest, a.digest);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.pptx");
        std::fs::write(&path, b"not a zip").unwrap();

        let doc = SourceDocument::from_path(&path).unwrap();
        assert_eq!(doc.name(), "talk.pptx");
        assert_eq!(doc.bytes(), b"not a zip");
        assert_eq!(doc.format(), None);
    }
}
