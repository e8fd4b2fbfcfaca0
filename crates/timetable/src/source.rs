//! Document retrieval.
//!
//! [`DocumentSource`] is the seam to whatever fetches timetable documents
//! (HTTP with its own timeouts and retries, a file share, a test double).
//! [`FileSource`] reads local files.

use std::path::{Path, PathBuf};

use crate::error::FetchError;

/// Document bytes together with their content fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub bytes: Vec<u8>,
    /// Hex MD5 of `bytes`.
    pub fingerprint: String,
}

impl SourceDocument {
    /// Wrap `bytes`, computing the fingerprint.
    pub fn new(bytes: Vec<u8>) -> Self {
        let fingerprint = fingerprint(&bytes);
        Self { bytes, fingerprint }
    }
}

/// Hex MD5 digest identifying a document's content.
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", md5::compute(bytes))
}

/// Retrieves source documents by resource identifier.
pub trait DocumentSource: Send + Sync {
    /// Fetch the document named by `resource`.
    ///
    /// # Errors
    ///
    /// [`FetchError`] when the document cannot be retrieved.
    fn fetch(&self, resource: &str) -> Result<SourceDocument, FetchError>;
}

/// Reads documents from the local filesystem.
///
/// Resources are paths, resolved against an optional base directory.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative resources against `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, resource: &str) -> PathBuf {
        let path = Path::new(resource);
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self, resource: &str) -> Result<SourceDocument, FetchError> {
        let path = self.resolve(resource);
        let bytes = std::fs::read(&path).map_err(|source| FetchError::Io {
            resource: path.display().to_string(),
            source,
        })?;
        Ok(SourceDocument::new(bytes))
    }
}
