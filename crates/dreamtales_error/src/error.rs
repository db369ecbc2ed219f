//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GenerationError, ProviderError, RenderError, StorageError};

/// Every error condition the pipeline can surface.
///
/// # Examples
///
/// ```
/// use dreamtales_error::{DreamTalesError, ProviderError, ProviderErrorKind, ProviderStage};
///
/// let provider_err = ProviderError::new(
///     ProviderStage::Text,
///     ProviderErrorKind::Http("Connection failed".to_string()),
/// );
/// let err: DreamTalesError = provider_err.into();
/// assert!(format!("{}", err).contains("Connection failed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DreamTalesErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Remote generation provider error
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Document rendering error
    #[from(RenderError)]
    Render(RenderError),
    /// Story generation error
    #[from(GenerationError)]
    Generation(GenerationError),
}

/// DreamTales error with kind discrimination.
///
/// # Examples
///
/// ```
/// use dreamtales_error::{ConfigError, DreamTalesErrorKind, DreamTalesResult};
///
/// fn might_fail() -> DreamTalesResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), DreamTalesErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("DreamTales Error: {}", _0)]
pub struct DreamTalesError(Box<DreamTalesErrorKind>);

impl DreamTalesError {
    /// Create a new error from a kind.
    pub fn new(kind: DreamTalesErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DreamTalesErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to DreamTalesErrorKind
impl<T> From<T> for DreamTalesError
where
    T: Into<DreamTalesErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for DreamTales operations.
pub type DreamTalesResult<T> = std::result::Result<T, DreamTalesError>;
