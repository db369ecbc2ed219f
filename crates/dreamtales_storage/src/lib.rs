//! Content-addressable artifact storage for DreamTales.
//!
//! Narrated audio and rendered storybooks are written here so that a
//! [`StoryBundle`](dreamtales_core::StoryBundle) can carry small references
//! instead of raw bytes.
//!
//! # Example
//!
//! ```rust
//! use dreamtales_core::ArtifactKind;
//! use dreamtales_interface::ArtifactStorage;
//! use dreamtales_storage::FileSystemStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::temporary()?;
//!
//! let data = b"%PDF-1.5 ...".to_vec();
//! let reference = storage
//!     .store(&data, ArtifactKind::Document, "application/pdf")
//!     .await?;
//!
//! let retrieved = storage.retrieve(&reference).await?;
//! assert_eq!(data, retrieved);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;

pub use dreamtales_error::{StorageError, StorageErrorKind};
pub use filesystem::FileSystemStorage;
