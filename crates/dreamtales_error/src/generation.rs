//! Story generation error types.

/// Specific error conditions for story generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Topic is empty or whitespace only
    #[display("Story topic cannot be empty")]
    EmptyTopic,
    /// Text provider returned no story text
    #[display("Text provider returned an empty story")]
    EmptyStory,
    /// Word-limited generation never hit its target
    #[display(
        "No story within {} words of the {}-word limit after {} attempts (last had {})",
        tolerance,
        word_limit,
        attempts,
        last_word_count
    )]
    WordLimitExhausted {
        /// Requested word count
        word_limit: usize,
        /// Accepted deviation from the word count
        tolerance: usize,
        /// Attempts made
        attempts: u32,
        /// Word count of the final attempt
        last_word_count: usize,
    },
}

/// Error type for story generation.
///
/// # Examples
///
/// ```
/// use dreamtales_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::EmptyTopic);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
