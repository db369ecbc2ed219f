//! Generated story bundles.

use crate::ArtifactReference;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wall-clock duration of each pipeline stage.
///
/// A stage that did not run (for example everything after a policy refusal)
/// is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StageTimings {
    text: Option<Duration>,
    image: Option<Duration>,
    audio: Option<Duration>,
    document: Option<Duration>,
}

impl StageTimings {
    /// Record the text stage.
    pub fn record_text(&mut self, elapsed: Duration) {
        self.text = Some(elapsed);
    }

    /// Record the image stage.
    pub fn record_image(&mut self, elapsed: Duration) {
        self.image = Some(elapsed);
    }

    /// Record the audio stage.
    pub fn record_audio(&mut self, elapsed: Duration) {
        self.audio = Some(elapsed);
    }

    /// Record the document stage.
    pub fn record_document(&mut self, elapsed: Duration) {
        self.document = Some(elapsed);
    }

    /// Sum of the stages that ran.
    ///
    /// # Examples
    ///
    /// ```
    /// use dreamtales_core::StageTimings;
    /// use std::time::Duration;
    ///
    /// let mut timings = StageTimings::default();
    /// timings.record_text(Duration::from_millis(300));
    /// timings.record_audio(Duration::from_millis(200));
    /// assert_eq!(timings.total(), Duration::from_millis(500));
    /// ```
    pub fn total(&self) -> Duration {
        [self.text, self.image, self.audio, self.document]
            .into_iter()
            .flatten()
            .sum()
    }
}

/// Result of one orchestration.
///
/// Image, audio and document are independently optional: each is `None` when
/// its stage failed, and all three are `None` when the content policy refused
/// the topic.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct StoryBundle {
    /// Story text, or the refusal sentinel
    story: String,
    /// Generated illustration URI
    #[builder(default)]
    image_url: Option<String>,
    /// Narrated audio artifact
    #[builder(default)]
    audio: Option<ArtifactReference>,
    /// Rendered storybook artifact
    #[builder(default)]
    document: Option<ArtifactReference>,
    /// Per-stage durations
    #[builder(default)]
    timings: StageTimings,
    /// Whether the text stage returned the refusal sentinel
    #[builder(default)]
    refused: bool,
    /// Whether this bundle was served from the result cache
    #[builder(default)]
    from_cache: bool,
}

impl StoryBundle {
    /// Creates a new builder.
    pub fn builder() -> StoryBundleBuilder {
        StoryBundleBuilder::default()
    }

    /// Bundle for a topic the content policy refused.
    pub fn refusal(sentinel: impl Into<String>, timings: StageTimings) -> Self {
        Self {
            story: sentinel.into(),
            image_url: None,
            audio: None,
            document: None,
            timings,
            refused: true,
            from_cache: false,
        }
    }

    /// Copy of this bundle with the cache marker set or cleared.
    pub fn marked_from_cache(&self, from_cache: bool) -> Self {
        Self {
            from_cache,
            ..self.clone()
        }
    }
}
