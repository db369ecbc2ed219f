//! Content policy: prompt instructions and refusal detection.

/// Default answer the text model gives for topics it must not write about.
pub const DEFAULT_REFUSAL_SENTINEL: &str =
    "I'm sorry, but I can only tell gentle bedtime stories for little ones.";

/// Detects the refusal sentinel in text responses.
///
/// Matching is case-insensitive substring containment, so stray whitespace,
/// punctuation or a polite preamble around the sentinel still count.
///
/// ```
/// use dreamtales_story::RefusalPolicy;
///
/// let policy = RefusalPolicy::new("Sorry, no story.");
/// assert!(policy.is_refusal("  sorry, NO STORY.\n"));
/// assert!(!policy.is_refusal("Once upon a time..."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefusalPolicy {
    sentinel: String,
    needle: String,
}

impl RefusalPolicy {
    /// Policy answering with `sentinel`.
    pub fn new(sentinel: impl Into<String>) -> Self {
        let sentinel = sentinel.into().trim().to_string();
        let needle = sentinel.to_lowercase();
        Self { sentinel, needle }
    }

    /// The configured sentinel.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Whether `text` is a refusal. A blank sentinel never matches.
    pub fn is_refusal(&self, text: &str) -> bool {
        !self.needle.is_empty() && text.to_lowercase().contains(&self.needle)
    }

    /// System instructions asking the model to refuse unsuitable topics.
    pub fn instructions(&self) -> String {
        format!(
            "You write bedtime stories for children aged 2-5. \
             If the requested topic involves violence, vulgarity, scary or evil content, \
             or anything else unsuitable for young children, do not write a story. \
             Instead reply with exactly this sentence and nothing else: {}",
            self.sentinel
        )
    }
}

impl Default for RefusalPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REFUSAL_SENTINEL)
    }
}
