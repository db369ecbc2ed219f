//! Document rendering errors.

/// Specific error conditions for document rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RenderErrorKind {
    /// Page geometry leaves no room for body text
    #[display("Invalid page layout: {}", _0)]
    Layout(String),
    /// Embedded image bytes could not be decoded
    #[display("Failed to decode image: {}", _0)]
    ImageDecode(String),
    /// PDF serialization failed
    #[display("Failed to write PDF: {}", _0)]
    Pdf(String),
}

/// Render error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Render Error: {} at line {} in {}", kind, line, file)]
pub struct RenderError {
    /// The specific error condition
    pub kind: RenderErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl RenderError {
    /// Create a new RenderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
