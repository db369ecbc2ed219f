//! Mock providers for pipeline tests.
//!
//! Each mock counts its calls so tests can assert which stages ran.

#![allow(dead_code)]

use async_trait::async_trait;
use dreamtales_core::{
    ArtifactKind, ArtifactReference, CompletionRequest, ImageRequest, SpeechRequest,
    StoryDocument,
};
use dreamtales_error::{
    DreamTalesResult, ProviderError, ProviderErrorKind, ProviderStage, RenderError,
    RenderErrorKind, StorageError, StorageErrorKind,
};
use dreamtales_interface::{
    ArtifactStorage, DocumentRenderer, ImageFetch, ImageSynthesis, SpeechSynthesis,
    TextCompletion,
};
use dreamtales_story::{PipelineConfig, StoryOrchestrator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// How a mock answers.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Always succeed with the value
    Success(T),
    /// Always fail with the error
    Error(ProviderErrorKind),
    /// Answer from the list in order, repeating the last entry
    Sequence(Vec<Result<T, ProviderErrorKind>>),
    /// Never answer
    Hang,
}

struct MockCore<T> {
    behavior: MockBehavior<T>,
    calls: Mutex<usize>,
}

impl<T: Clone> MockCore<T> {
    fn new(behavior: MockBehavior<T>) -> Self {
        Self {
            behavior,
            calls: Mutex::new(0),
        }
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    async fn respond(&self, stage: ProviderStage) -> DreamTalesResult<T> {
        let current = {
            let mut calls = self.calls.lock().unwrap();
            let current = *calls;
            *calls += 1;
            current
        };

        let outcome = match &self.behavior {
            MockBehavior::Success(value) => Ok(value.clone()),
            MockBehavior::Error(kind) => Err(kind.clone()),
            MockBehavior::Sequence(responses) => responses
                .get(current)
                .or_else(|| responses.last())
                .cloned()
                .expect("mock sequence must not be empty"),
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        outcome.map_err(|kind| ProviderError::new(stage, kind).into())
    }
}

/// Text provider double.
pub struct MockText {
    core: MockCore<String>,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockText {
    pub fn new(behavior: MockBehavior<String>) -> Arc<Self> {
        Arc::new(Self {
            core: MockCore::new(behavior),
            last_request: Mutex::new(None),
        })
    }

    pub fn success(text: impl Into<String>) -> Arc<Self> {
        Self::new(MockBehavior::Success(text.into()))
    }

    pub fn call_count(&self) -> usize {
        self.core.call_count()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for MockText {
    async fn complete(&self, req: &CompletionRequest) -> DreamTalesResult<String> {
        *self.last_request.lock().unwrap() = Some(req.clone());
        self.core.respond(ProviderStage::Text).await
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Image provider double.
pub struct MockImage {
    core: MockCore<String>,
}

impl MockImage {
    pub fn new(behavior: MockBehavior<String>) -> Arc<Self> {
        Arc::new(Self {
            core: MockCore::new(behavior),
        })
    }

    pub fn call_count(&self) -> usize {
        self.core.call_count()
    }
}

#[async_trait]
impl ImageSynthesis for MockImage {
    async fn synthesize_image(&self, _req: &ImageRequest) -> DreamTalesResult<String> {
        self.core.respond(ProviderStage::Image).await
    }
}

/// Speech provider double.
pub struct MockSpeech {
    core: MockCore<Vec<u8>>,
}

impl MockSpeech {
    pub fn new(behavior: MockBehavior<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            core: MockCore::new(behavior),
        })
    }

    pub fn call_count(&self) -> usize {
        self.core.call_count()
    }
}

#[async_trait]
impl SpeechSynthesis for MockSpeech {
    async fn synthesize_speech(&self, _req: &SpeechRequest) -> DreamTalesResult<Vec<u8>> {
        self.core.respond(ProviderStage::Speech).await
    }
}

/// Image download double.
pub struct MockFetcher {
    core: MockCore<Vec<u8>>,
}

impl MockFetcher {
    pub fn new(behavior: MockBehavior<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            core: MockCore::new(behavior),
        })
    }

    pub fn call_count(&self) -> usize {
        self.core.call_count()
    }
}

#[async_trait]
impl ImageFetch for MockFetcher {
    async fn fetch_image(&self, _url: &str) -> DreamTalesResult<Vec<u8>> {
        self.core.respond(ProviderStage::ImageFetch).await
    }
}

/// Renderer double recording what it was asked to draw.
pub struct MockRenderer {
    fail: bool,
    documents: Mutex<Vec<StoryDocument>>,
}

impl MockRenderer {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            documents: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            documents: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn last_document(&self) -> Option<StoryDocument> {
        self.documents.lock().unwrap().last().cloned()
    }
}

impl DocumentRenderer for MockRenderer {
    fn render(&self, document: &StoryDocument) -> DreamTalesResult<Vec<u8>> {
        self.documents.lock().unwrap().push(document.clone());
        if self.fail {
            return Err(RenderError::new(RenderErrorKind::Pdf("disk on fire".to_string())).into());
        }
        Ok(format!("%PDF-mock {}", document.title).into_bytes())
    }
}

/// In-memory artifact storage.
#[derive(Default)]
pub struct MemoryStorage {
    artifacts: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn len(&self) -> usize {
        self.artifacts.lock().unwrap().len()
    }
}

#[async_trait]
impl ArtifactStorage for MemoryStorage {
    async fn store(
        &self,
        data: &[u8],
        kind: ArtifactKind,
        mime_type: &str,
    ) -> DreamTalesResult<ArtifactReference> {
        let id = Uuid::new_v4();
        let path = format!("memory://{}/{}", kind.dir_name(), id);
        self.artifacts
            .lock()
            .unwrap()
            .insert(path.clone(), data.to_vec());
        Ok(ArtifactReference {
            id,
            content_hash: format!("{:016x}", data.len()),
            storage_backend: "memory".to_string(),
            storage_path: path,
            size_bytes: data.len() as u64,
            kind,
            mime_type: mime_type.to_string(),
        })
    }

    async fn retrieve(&self, reference: &ArtifactReference) -> DreamTalesResult<Vec<u8>> {
        self.artifacts
            .lock()
            .unwrap()
            .get(&reference.storage_path)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
                    .into()
            })
    }

    async fn delete(&self, reference: &ArtifactReference) -> DreamTalesResult<()> {
        self.artifacts.lock().unwrap().remove(&reference.storage_path);
        Ok(())
    }

    async fn exists(&self, reference: &ArtifactReference) -> DreamTalesResult<bool> {
        Ok(self
            .artifacts
            .lock()
            .unwrap()
            .contains_key(&reference.storage_path))
    }
}

pub const STORY: &str = "The sleepy bunny yawned, stretched, and curled up under the stars.";
pub const IMAGE_URL: &str = "https://images.example/bunny.png";

pub fn server_error() -> ProviderErrorKind {
    ProviderErrorKind::Api {
        status: 500,
        message: "upstream exploded".to_string(),
    }
}

/// All doubles used by one orchestrator.
pub struct Harness {
    pub text: Arc<MockText>,
    pub image: Arc<MockImage>,
    pub speech: Arc<MockSpeech>,
    pub fetcher: Arc<MockFetcher>,
    pub renderer: Arc<MockRenderer>,
    pub storage: Arc<MemoryStorage>,
    pub pipeline: PipelineConfig,
}

impl Harness {
    /// Every stage succeeds.
    pub fn happy() -> Self {
        Self {
            text: MockText::success(STORY),
            image: MockImage::new(MockBehavior::Success(IMAGE_URL.to_string())),
            speech: MockSpeech::new(MockBehavior::Success(b"ID3 audio".to_vec())),
            fetcher: MockFetcher::new(MockBehavior::Success(b"PNG bytes".to_vec())),
            renderer: MockRenderer::working(),
            storage: MemoryStorage::new(),
            pipeline: PipelineConfig::default().with_stage_timeout_secs(5_u64),
        }
    }

    pub fn with_text(mut self, text: Arc<MockText>) -> Self {
        self.text = text;
        self
    }

    pub fn with_image(mut self, image: Arc<MockImage>) -> Self {
        self.image = image;
        self
    }

    pub fn with_speech(mut self, speech: Arc<MockSpeech>) -> Self {
        self.speech = speech;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<MockFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<MockRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn orchestrator(&self) -> StoryOrchestrator {
        StoryOrchestrator::builder()
            .text(self.text.clone())
            .image(self.image.clone())
            .speech(self.speech.clone())
            .fetcher(self.fetcher.clone())
            .renderer(self.renderer.clone())
            .storage(self.storage.clone())
            .pipeline(self.pipeline.clone())
            .build()
            .unwrap()
    }

    /// Calls made to every stage after text.
    pub fn downstream_calls(&self) -> usize {
        self.image.call_count()
            + self.speech.call_count()
            + self.fetcher.call_count()
            + self.renderer.call_count()
    }
}
