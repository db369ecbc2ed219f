//! Sequencing of the text, image, speech and document stages.

use crate::{image_prompt, story_messages, ModelConfig, PipelineConfig, RefusalPolicy};
use dreamtales_core::{
    ArtifactKind, ArtifactReference, CompletionRequest, GenerationRequest, ImageRequest,
    SpeechRequest, StageTimings, StoryBundle, StoryDocument,
};
use dreamtales_error::{
    BuilderError, DreamTalesResult, GenerationError, GenerationErrorKind, ProviderError,
    ProviderErrorKind, ProviderStage,
};
use dreamtales_interface::{
    ArtifactStorage, DocumentRenderer, ImageFetch, ImageSynthesis, SpeechSynthesis,
    TextCompletion,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Produces one [`StoryBundle`] per request.
///
/// Stages run strictly in order: text, image, speech, document. Only a text
/// failure is an error. A refusal stops the pipeline after the text stage,
/// and image, speech or document failures leave their field empty.
///
/// # Example
///
/// ```rust,ignore
/// let orchestrator = StoryOrchestrator::builder()
///     .text(client.clone())
///     .image(client.clone())
///     .speech(client.clone())
///     .fetcher(client)
///     .renderer(Arc::new(PdfRenderer::default()))
///     .storage(Arc::new(FileSystemStorage::temporary()?))
///     .build()?;
///
/// let request = GenerationRequest::new("a sleepy bunny", StoryLength::Short)?;
/// let bundle = orchestrator.produce(&request).await?;
/// ```
#[derive(Clone, derive_builder::Builder)]
#[builder(pattern = "owned", build_fn(private, name = "build_internal"))]
pub struct StoryOrchestrator {
    /// Text completion provider
    text: Arc<dyn TextCompletion>,
    /// Image synthesis provider
    image: Arc<dyn ImageSynthesis>,
    /// Speech synthesis provider
    speech: Arc<dyn SpeechSynthesis>,
    /// Downloads generated images for the storybook
    fetcher: Arc<dyn ImageFetch>,
    /// Storybook renderer
    renderer: Arc<dyn DocumentRenderer>,
    /// Where audio and documents are written
    storage: Arc<dyn ArtifactStorage>,
    /// Model selection
    #[builder(default)]
    models: ModelConfig,
    /// Pipeline behavior
    #[builder(default)]
    pipeline: PipelineConfig,
}

impl StoryOrchestratorBuilder {
    /// Build the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns error if a provider is missing or the pipeline settings are
    /// invalid.
    pub fn build(self) -> DreamTalesResult<StoryOrchestrator> {
        let orchestrator = self
            .build_internal()
            .map_err(|e| BuilderError::from(e.to_string()))?;
        orchestrator.pipeline.validate()?;
        Ok(orchestrator)
    }
}

impl std::fmt::Debug for StoryOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryOrchestrator")
            .field("text", &self.text.provider_name())
            .field("models", &self.models)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

impl StoryOrchestrator {
    /// Creates a new builder.
    pub fn builder() -> StoryOrchestratorBuilder {
        StoryOrchestratorBuilder::default()
    }

    /// Model selection in use.
    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    /// Pipeline behavior in use.
    pub fn pipeline(&self) -> &PipelineConfig {
        &self.pipeline
    }

    /// Refusal detection for the configured sentinel.
    pub fn policy(&self) -> RefusalPolicy {
        RefusalPolicy::new(self.pipeline.refusal_sentinel())
    }

    /// Run the full pipeline for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the text stage fails, times out or yields
    /// an empty story.
    #[instrument(skip(self, request), fields(topic = %request.topic(), length = %request.length()))]
    pub async fn produce(&self, request: &GenerationRequest) -> DreamTalesResult<StoryBundle> {
        let policy = self.policy();
        let mut timings = StageTimings::default();

        let started = Instant::now();
        let story = self.write_story(request, &policy).await?;
        timings.record_text(started.elapsed());

        if policy.is_refusal(&story) {
            info!("Topic refused by content policy");
            return Ok(StoryBundle::refusal(policy.sentinel(), timings));
        }

        let started = Instant::now();
        let image_url = match self.illustrate(request).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "Image stage failed, continuing without illustration");
                None
            }
        };
        timings.record_image(started.elapsed());

        let audio = if *self.pipeline.narrate() {
            let started = Instant::now();
            let audio = match self.narrate(&story).await {
                Ok(reference) => Some(reference),
                Err(e) => {
                    warn!(error = %e, "Speech stage failed, continuing without audio");
                    None
                }
            };
            timings.record_audio(started.elapsed());
            audio
        } else {
            None
        };

        let document = if *self.pipeline.render_document() {
            let started = Instant::now();
            let document = match self.bind(request, &story, image_url.as_deref()).await {
                Ok(reference) => Some(reference),
                Err(e) => {
                    warn!(error = %e, "Document stage failed, continuing without storybook");
                    None
                }
            };
            timings.record_document(started.elapsed());
            document
        } else {
            None
        };

        info!(
            has_image = image_url.is_some(),
            has_audio = audio.is_some(),
            has_document = document.is_some(),
            total_ms = timings.total().as_millis() as u64,
            "Story bundle produced"
        );

        StoryBundle::builder()
            .story(story)
            .image_url(image_url)
            .audio(audio)
            .document(document)
            .timings(timings)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()).into())
    }

    async fn bounded<T, F>(&self, stage: ProviderStage, call: F) -> DreamTalesResult<T>
    where
        F: Future<Output = DreamTalesResult<T>>,
    {
        let limit = self.pipeline.stage_timeout();
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                Err(ProviderError::new(stage, ProviderErrorKind::Timeout(limit.as_secs())).into())
            }
        }
    }

    async fn write_story(
        &self,
        request: &GenerationRequest,
        policy: &RefusalPolicy,
    ) -> DreamTalesResult<String> {
        let completion = CompletionRequest::builder()
            .model(self.models.text_model().as_str())
            .messages(story_messages(request, policy))
            .temperature(*self.models.temperature())
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let story = self
            .bounded(ProviderStage::Text, self.text.complete(&completion))
            .await?;

        let story = story.trim();
        if story.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyStory).into());
        }

        debug!(words = story.split_whitespace().count(), "Story text received");
        Ok(story.to_string())
    }

    async fn illustrate(&self, request: &GenerationRequest) -> DreamTalesResult<String> {
        let image_request = ImageRequest::builder()
            .model(self.models.image_model().as_str())
            .prompt(image_prompt(request))
            .size(self.models.image_size().as_str())
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        self.bounded(
            ProviderStage::Image,
            self.image.synthesize_image(&image_request),
        )
        .await
    }

    async fn narrate(&self, story: &str) -> DreamTalesResult<ArtifactReference> {
        let speech_request = SpeechRequest::builder()
            .model(self.models.speech_model().as_str())
            .voice(self.models.voice().as_str())
            .input(story)
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let audio = self
            .bounded(
                ProviderStage::Speech,
                self.speech.synthesize_speech(&speech_request),
            )
            .await?;

        let kind = ArtifactKind::Audio;
        self.storage
            .store(&audio, kind, kind.default_mime())
            .await
    }

    async fn bind(
        &self,
        request: &GenerationRequest,
        story: &str,
        image_url: Option<&str>,
    ) -> DreamTalesResult<ArtifactReference> {
        let mut document = StoryDocument::new(request.topic().trim(), story);

        if let Some(url) = image_url {
            match self
                .bounded(ProviderStage::ImageFetch, self.fetcher.fetch_image(url))
                .await
            {
                Ok(bytes) => document = document.with_image(bytes),
                Err(e) => warn!(error = %e, "Image download failed, storybook will have no picture"),
            }
        }

        let pdf = self.renderer.render(&document)?;
        self.storage
            .store(&pdf, ArtifactKind::Document, self.renderer.mime_type())
            .await
    }
}
