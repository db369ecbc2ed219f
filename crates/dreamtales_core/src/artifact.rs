//! References to persisted artifacts.

use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Type of artifact produced by the pipeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Narrated story audio
    #[display("audio")]
    Audio,
    /// Rendered storybook
    #[display("document")]
    Document,
    /// Downloaded illustration
    #[display("image")]
    Image,
}

impl ArtifactKind {
    /// Directory name used by filesystem storage.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ArtifactKind::Audio => "audio",
            ArtifactKind::Document => "documents",
            ArtifactKind::Image => "images",
        }
    }

    /// Default MIME type for the kind.
    pub fn default_mime(&self) -> &'static str {
        match self {
            ArtifactKind::Audio => "audio/mpeg",
            ArtifactKind::Document => "application/pdf",
            ArtifactKind::Image => "image/png",
        }
    }
}

/// Reference to a stored artifact.
///
/// Contains everything needed to retrieve the bytes from the storage backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactReference {
    /// Unique identifier for this reference
    pub id: Uuid,
    /// SHA-256 hash of the content
    pub content_hash: String,
    /// Storage backend name (e.g., "filesystem")
    pub storage_backend: String,
    /// Backend-specific path to the artifact
    pub storage_path: String,
    /// Size of the artifact in bytes
    pub size_bytes: u64,
    /// Type of artifact
    pub kind: ArtifactKind,
    /// MIME type
    pub mime_type: String,
}

impl ArtifactReference {
    /// Storage path as a filesystem path.
    pub fn path(&self) -> &Path {
        Path::new(&self.storage_path)
    }
}
