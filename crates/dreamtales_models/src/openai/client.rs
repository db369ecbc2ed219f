//! OpenAI-compatible HTTP client.

use crate::openai::dto::{
    ChatCompletionRequest, ChatCompletionResponse, ImageGenerationRequest,
    ImageGenerationResponse, SpeechGenerationRequest,
};
use async_trait::async_trait;
use dreamtales_core::{CompletionRequest, ImageRequest, SpeechRequest};
use dreamtales_error::{DreamTalesResult, ProviderError, ProviderErrorKind, ProviderStage};
use dreamtales_interface::{ImageFetch, ImageSynthesis, SpeechSynthesis, TextCompletion};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, instrument};

/// Base URL of the hosted OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Client for an OpenAI-compatible API.
///
/// One client serves all four provider stages. The base URL can point at any
/// compatible server.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client using the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    #[instrument]
    pub fn new() -> DreamTalesResult<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|e| {
            ProviderError::new(
                ProviderStage::Text,
                ProviderErrorKind::MissingApiKey(format!("{} not set: {}", API_KEY_VAR, e)),
            )
        })?;

        Ok(Self::with_api_key(api_key))
    }

    /// Creates a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another OpenAI-compatible server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        stage: ProviderStage,
        endpoint: &str,
        body: &T,
    ) -> DreamTalesResult<Response> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(url = %url, stage = %stage, "Sending OpenAI API request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                ProviderError::new(stage, ProviderErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        check_status(stage, response).await
    }
}

async fn check_status(stage: ProviderStage, response: Response) -> DreamTalesResult<Response> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::new(stage, ProviderErrorKind::Api { status, message }).into());
    }
    Ok(response)
}

#[async_trait]
impl TextCompletion for OpenAiClient {
    #[instrument(skip(self, req), fields(model = %req.model(), messages = req.messages().len()))]
    async fn complete(&self, req: &CompletionRequest) -> DreamTalesResult<String> {
        let stage = ProviderStage::Text;
        let body = ChatCompletionRequest::from(req);
        let response = self.post_json(stage, "chat/completions", &body).await?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            ProviderError::new(stage, ProviderErrorKind::Parse(e.to_string()))
        })?;

        let content = parsed
            .first_content()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ProviderError::new(
                    stage,
                    ProviderErrorKind::EmptyResponse("no completion content".to_string()),
                )
            })?;

        debug!(chars = content.len(), "Received completion");
        Ok(content.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[async_trait]
impl ImageSynthesis for OpenAiClient {
    #[instrument(skip(self, req), fields(model = %req.model(), size = %req.size()))]
    async fn synthesize_image(&self, req: &ImageRequest) -> DreamTalesResult<String> {
        let stage = ProviderStage::Image;
        let body = ImageGenerationRequest::from(req);
        let response = self.post_json(stage, "images/generations", &body).await?;

        let parsed: ImageGenerationResponse = response.json().await.map_err(|e| {
            ProviderError::new(stage, ProviderErrorKind::Parse(e.to_string()))
        })?;

        let url = parsed.first_url().ok_or_else(|| {
            ProviderError::new(
                stage,
                ProviderErrorKind::EmptyResponse("no image url".to_string()),
            )
        })?;

        debug!(url = %url, "Received image reference");
        Ok(url.to_string())
    }
}

#[async_trait]
impl SpeechSynthesis for OpenAiClient {
    #[instrument(skip(self, req), fields(model = %req.model(), voice = %req.voice(), chars = req.input().len()))]
    async fn synthesize_speech(&self, req: &SpeechRequest) -> DreamTalesResult<Vec<u8>> {
        let stage = ProviderStage::Speech;
        let body = SpeechGenerationRequest::from(req);
        let response = self.post_json(stage, "audio/speech", &body).await?;

        let bytes = response.bytes().await.map_err(|e| {
            ProviderError::new(stage, ProviderErrorKind::Http(format!("Body read failed: {}", e)))
        })?;

        if bytes.is_empty() {
            return Err(ProviderError::new(
                stage,
                ProviderErrorKind::EmptyResponse("no audio bytes".to_string()),
            )
            .into());
        }

        debug!(bytes = bytes.len(), "Received speech audio");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageFetch for OpenAiClient {
    #[instrument(skip(self))]
    async fn fetch_image(&self, url: &str) -> DreamTalesResult<Vec<u8>> {
        let stage = ProviderStage::ImageFetch;

        // Generated image URLs are pre-signed; no bearer token.
        let response = self.client.get(url).send().await.map_err(|e| {
            ProviderError::new(stage, ProviderErrorKind::Http(format!("Request failed: {}", e)))
        })?;
        let response = check_status(stage, response).await?;

        let bytes = response.bytes().await.map_err(|e| {
            ProviderError::new(stage, ProviderErrorKind::Http(format!("Body read failed: {}", e)))
        })?;

        debug!(bytes = bytes.len(), "Fetched image");
        Ok(bytes.to_vec())
    }
}
