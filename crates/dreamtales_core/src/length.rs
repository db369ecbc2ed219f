//! Story length classes.

use serde::{Deserialize, Serialize};

/// How long the generated story should be.
///
/// The length class shapes the text prompt: word budget, reading time and the
/// number of scenes.
///
/// # Examples
///
/// ```
/// use dreamtales_core::StoryLength;
///
/// assert_eq!(StoryLength::Short.word_limit(), 250);
/// assert_eq!(StoryLength::Medium.word_limit(), 400);
/// assert_eq!("medium".parse::<StoryLength>().unwrap(), StoryLength::Medium);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum StoryLength {
    /// Two to three minutes of reading
    #[default]
    #[display("short")]
    Short,
    /// Five to seven minutes of reading
    #[display("medium")]
    Medium,
}

impl StoryLength {
    /// Target word count for the story.
    pub fn word_limit(&self) -> usize {
        match self {
            StoryLength::Short => 250,
            StoryLength::Medium => 400,
        }
    }

    /// Human-readable reading time.
    pub fn reading_time(&self) -> &'static str {
        match self {
            StoryLength::Short => "2-3 minutes",
            StoryLength::Medium => "5-7 minutes",
        }
    }

    /// Number of scenes the story should contain.
    pub fn scenes(&self) -> &'static str {
        match self {
            StoryLength::Short => "2-3",
            StoryLength::Medium => "3-4",
        }
    }
}

impl std::str::FromStr for StoryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(StoryLength::Short),
            "medium" => Ok(StoryLength::Medium),
            other => Err(format!("Unknown story length: {}", other)),
        }
    }
}
