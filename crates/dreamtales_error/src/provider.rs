//! Remote generation provider errors.

/// Pipeline stage whose provider call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ProviderStage {
    /// Text completion
    #[display("text")]
    Text,
    /// Image synthesis
    #[display("image")]
    Image,
    /// Speech synthesis
    #[display("speech")]
    Speech,
    /// Downloading a generated image
    #[display("image fetch")]
    ImageFetch,
}

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Request could not be sent or the connection dropped
    #[display("HTTP error: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Response body did not match the expected shape
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// Response was well-formed but carried no usable payload
    #[display("Empty response: {}", _0)]
    EmptyResponse(String),
    /// Credentials were not configured
    #[display("Missing API key: {}", _0)]
    MissingApiKey(String),
    /// Call did not complete within the configured bound
    #[display("Timed out after {}s", _0)]
    Timeout(u64),
}

/// Provider error with stage and location tracking.
///
/// # Examples
///
/// ```
/// use dreamtales_error::{ProviderError, ProviderErrorKind, ProviderStage};
///
/// let err = ProviderError::new(ProviderStage::Image, ProviderErrorKind::Timeout(30));
/// assert!(format!("{}", err).contains("image"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error ({}): {} at {}:{}", stage, kind, file, line)]
pub struct ProviderError {
    /// Stage whose call failed
    pub stage: ProviderStage,
    /// The specific error kind
    pub kind: ProviderErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error.
    #[track_caller]
    pub fn new(stage: ProviderStage, kind: ProviderErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            stage,
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
