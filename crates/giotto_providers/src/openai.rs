//! OpenAI content and image backends.

use crate::prompt::{PromptSettings, strip_hashtags, truncate_preserving_hashtags};
use crate::storage::write_atomic;
use async_trait::async_trait;
use giotto_core::{MediaArtifact, MediaType};
use giotto_error::{ProviderError, ProviderErrorKind};
use giotto_interface::{ContentProvider, MediaProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error, instrument};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_IMAGES_URL: &str = "https://api.openai.com/v1/images/generations";
const MAX_COMPLETION_TOKENS: u32 = 250;

/// Text generation through the OpenAI chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiContentProvider {
    client: Client,
    api_key: String,
    model: String,
    prompt: PromptSettings,
}

impl OpenAiContentProvider {
    /// Create a new OpenAI content provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g. "gpt-4o-mini")
    /// * `prompt` - Prompt settings shared across cycles
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        prompt: PromptSettings,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            prompt,
        }
    }
}

#[async_trait]
impl ContentProvider for OpenAiContentProvider {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn generate(&self, topic_hint: &str) -> Result<String, ProviderError> {
        debug!("Requesting text from OpenAI");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.prompt.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: self.prompt.user_prompt(topic_hint),
                },
            ],
            temperature: *self.prompt.temperature(),
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, "OpenAI returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status,
                message,
            }));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Parse(e.to_string()))
        })?;

        let text = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyResponse));
        }

        Ok(truncate_preserving_hashtags(&text, *self.prompt.max_length()))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Image generation through the OpenAI images API.
///
/// The returned image URL is downloaded and stored locally so the publish
/// step never depends on a short-lived remote URL.
#[derive(Debug, Clone)]
pub struct OpenAiImageProvider {
    client: Client,
    api_key: String,
    model: String,
    size: String,
    output_dir: PathBuf,
    prompt: PromptSettings,
}

impl OpenAiImageProvider {
    /// Create a new OpenAI image provider.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        prompt: PromptSettings,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            size: "1024x1024".to_string(),
            output_dir: output_dir.into(),
            prompt,
        }
    }
}

#[async_trait]
impl MediaProvider for OpenAiImageProvider {
    #[instrument(skip(self, text), fields(model = %self.model))]
    async fn create_image(
        &self,
        text: &str,
        output_hint: &str,
    ) -> Result<MediaArtifact, ProviderError> {
        let clean = strip_hashtags(text);
        debug!("Requesting image from OpenAI");

        let request = ImageRequest {
            model: &self.model,
            prompt: self.prompt.image_prompt(&clean),
            n: 1,
            size: &self.size,
        };

        let response = self
            .client
            .post(OPENAI_IMAGES_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Http(e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, "OpenAI image generation failed");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status,
                message,
            }));
        }

        let parsed: ImageResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Parse(e.to_string()))
        })?;

        let url = parsed
            .data
            .first()
            .map(|d| d.url.as_str())
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))?;

        let image = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Http(e.to_string())))?
            .error_for_status()
            .map_err(|e| ProviderError::new(ProviderErrorKind::Http(e.to_string())))?
            .bytes()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Http(e.to_string())))?;

        let path = self.output_dir.join(format!("{output_hint}.png"));
        write_atomic(&path, &image).await?;

        debug!(path = %path.display(), bytes = image.len(), "Stored generated image");
        Ok(MediaArtifact::new(path, MediaType::Png))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: String,
    n: u32,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    url: String,
}
