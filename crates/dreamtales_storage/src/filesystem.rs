//! Filesystem-based artifact storage.

use dreamtales_core::{ArtifactKind, ArtifactReference};
use dreamtales_error::{DreamTalesResult, StorageError, StorageErrorKind};
use dreamtales_interface::ArtifactStorage;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

const BACKEND_NAME: &str = "filesystem";

/// Filesystem storage backend.
///
/// Stores artifacts in a content-addressable structure:
/// `{base_path}/{kind}/{hash[0:2]}/{hash[2:4]}/{hash}`
///
/// ```text
/// /tmp/.tmpXyZ123/
/// ├── audio/
/// │   └── 12/
/// │       └── 34/
/// │           └── 123456abcdef...  (MP3)
/// └── documents/
///     └── ab/
///         └── cd/
///             └── abcdef123456...  (PDF)
/// ```
///
/// Identical bytes hash to the same path, so storing them twice writes once.
/// Writes go to a temp file that is renamed into place.
#[derive(Debug)]
pub struct FileSystemStorage {
    base_path: PathBuf,
    // Held so the directory is removed when the storage is dropped.
    _scratch: Option<TempDir>,
}

impl FileSystemStorage {
    /// Create a storage backend rooted at `base_path`.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> DreamTalesResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self {
            base_path,
            _scratch: None,
        })
    }

    /// Create a storage backend in a fresh temporary directory.
    ///
    /// The directory and everything in it is deleted when the storage is
    /// dropped, so references stay valid for as long as the owner lives.
    #[tracing::instrument]
    pub fn temporary() -> DreamTalesResult<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("dreamtales-")
            .tempdir()
            .map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "temporary directory: {}",
                    e
                )))
            })?;

        let base_path = scratch.path().to_path_buf();
        tracing::info!(path = %base_path.display(), "Created temporary filesystem storage");
        Ok(Self {
            base_path,
            _scratch: Some(scratch),
        })
    }

    /// Root directory of this backend.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    fn path_for(&self, hash: &str, kind: ArtifactKind) -> PathBuf {
        self.base_path
            .join(kind.dir_name())
            .join(&hash[0..2])
            .join(&hash[2..4])
            .join(hash)
    }

    fn verify_hash(data: &[u8], expected_hash: &str) -> DreamTalesResult<()> {
        let actual_hash = Self::compute_hash(data);
        if actual_hash != expected_hash {
            return Err(StorageError::new(StorageErrorKind::HashMismatch(format!(
                "expected {}, got {}",
                expected_hash, actual_hash
            )))
            .into());
        }
        Ok(())
    }

    fn reference(
        hash: String,
        path: &Path,
        size: usize,
        kind: ArtifactKind,
        mime: &str,
    ) -> ArtifactReference {
        ArtifactReference {
            id: Uuid::new_v4(),
            content_hash: hash,
            storage_backend: BACKEND_NAME.to_string(),
            storage_path: path.to_string_lossy().to_string(),
            size_bytes: size as u64,
            kind,
            mime_type: mime.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ArtifactStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(size = data.len(), kind = %kind))]
    async fn store(
        &self,
        data: &[u8],
        kind: ArtifactKind,
        mime_type: &str,
    ) -> DreamTalesResult<ArtifactReference> {
        let hash = Self::compute_hash(data);
        let path = self.path_for(&hash, kind);

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(
                hash = %hash,
                path = %path.display(),
                "Artifact already exists, returning existing reference"
            );
            return Ok(Self::reference(hash, &path, data.len(), kind, mime_type));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            kind = %kind,
            "Stored artifact"
        );

        Ok(Self::reference(hash, &path, data.len(), kind, mime_type))
    }

    #[tracing::instrument(skip(self, reference), fields(hash = %reference.content_hash, path = %reference.storage_path))]
    async fn retrieve(&self, reference: &ArtifactReference) -> DreamTalesResult<Vec<u8>> {
        let path = reference.path();

        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        Self::verify_hash(&data, &reference.content_hash)?;

        tracing::debug!(size = data.len(), "Retrieved artifact");
        Ok(data)
    }

    #[tracing::instrument(skip(self, reference), fields(hash = %reference.content_hash, path = %reference.storage_path))]
    async fn delete(&self, reference: &ArtifactReference) -> DreamTalesResult<()> {
        let path = reference.path();

        tokio::fs::remove_file(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!("Deleted artifact");
        Ok(())
    }

    #[tracing::instrument(skip(self, reference), fields(path = %reference.storage_path))]
    async fn exists(&self, reference: &ArtifactReference) -> DreamTalesResult<bool> {
        Ok(tokio::fs::try_exists(reference.path()).await.unwrap_or(false))
    }
}
