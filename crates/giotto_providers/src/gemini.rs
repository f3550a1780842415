//! Gemini content backend.

use crate::prompt::{PromptSettings, truncate_preserving_hashtags};
use async_trait::async_trait;
use giotto_error::{ProviderError, ProviderErrorKind};
use giotto_interface::ContentProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 250;

/// Text generation through the Gemini generateContent API.
#[derive(Debug, Clone)]
pub struct GeminiContentProvider {
    client: Client,
    api_key: String,
    model: String,
    prompt: PromptSettings,
}

impl GeminiContentProvider {
    /// Create a new Gemini content provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `model` - Model identifier (e.g. "gemini-1.5-flash")
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

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model)
    }
}

#[async_trait]
impl ContentProvider for GeminiContentProvider {
    #[instrument(skip(self), fields(model = %self.model))]
    async fn generate(&self, topic_hint: &str) -> Result<String, ProviderError> {
        debug!("Requesting text from Gemini");

        let request = GenerateContentRequest {
            contents: vec![ContentPart {
                parts: vec![TextPart {
                    text: format!(
                        "{}\n\n{}",
                        self.prompt.system_prompt(),
                        self.prompt.user_prompt(topic_hint)
                    ),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: *self.prompt.temperature(),
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini");
                ProviderError::new(ProviderErrorKind::Http(e.to_string()))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            error!(status, "Gemini returned error");
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status,
                message,
            }));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            ProviderError::new(ProviderErrorKind::Parse(e.to_string()))
        })?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ProviderError::new(ProviderErrorKind::EmptyResponse));
        }

        Ok(truncate_preserving_hashtags(&text, *self.prompt.max_length()))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<ContentPart>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct ContentPart {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}
