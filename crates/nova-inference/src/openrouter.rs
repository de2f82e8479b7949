//! OpenRouter generation backend.
//!
//! Talks to the OpenRouter chat-completions API over reqwest with a fixed
//! request timeout. Failures surface as `AiService` errors with the
//! provider's own message where one is returned; there are no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use nova_core::defaults::{GEN_MODEL, GEN_TIMEOUT_SECS, OPENROUTER_URL};
use nova_core::{Error, GenerationBackend, GenerationRequest, Result};

/// Connection settings for the OpenRouter API.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub base_url: String,
    /// Missing key is allowed at startup; generation calls then fail with
    /// a descriptive `AiService` error.
    pub api_key: Option<String>,
    pub model: String,
    /// Sent as HTTP-Referer, per OpenRouter's attribution scheme.
    pub referer: String,
    /// Sent as X-Title.
    pub site_name: String,
    pub timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: OPENROUTER_URL.to_string(),
            api_key: None,
            model: GEN_MODEL.to_string(),
            referer: "http://localhost:3000".to_string(),
            site_name: "NoteNova".to_string(),
            timeout_secs: GEN_TIMEOUT_SECS,
        }
    }
}

impl OpenRouterConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("OPENROUTER_BASE_URL").unwrap_or(defaults.base_url),
            api_key: std::env::var("OPENROUTER_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("OPENROUTER_MODEL").unwrap_or(defaults.model),
            referer: std::env::var("OPENROUTER_REFERER").unwrap_or(defaults.referer),
            site_name: std::env::var("OPENROUTER_SITE_NAME").unwrap_or(defaults.site_name),
            timeout_secs: std::env::var("OPENROUTER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ModelEntry {
    id: String,
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

/// OpenRouter-backed [`GenerationBackend`].
pub struct OpenRouterBackend {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterBackend {
    /// Create a backend from explicit configuration.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openrouter",
            op = "init",
            model = %config.model,
            timeout_secs = config.timeout_secs,
            "Initializing OpenRouter backend"
        );

        Ok(Self { client, config })
    }

    /// Create a backend from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenRouterConfig::from_env())
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::AiService("OpenRouter API key is not configured".to_string()))
    }

    /// Whether the configured model shows up in the provider's model list.
    /// Used for the startup warning; availability itself only needs the
    /// listing endpoint to answer.
    pub async fn model_listed(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/models", self.config.base_url))
            .bearer_auth(self.api_key()?)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let models: ModelsResponse = response.json().await?;
        Ok(models.data.iter().any(|m| m.id == self.config.model))
    }

    /// Log a warning when the configured model is not visible. Called once
    /// at server startup.
    pub async fn warn_if_model_missing(&self) {
        match self.model_listed().await {
            Ok(true) => {
                info!(
                    subsystem = "inference",
                    component = "openrouter",
                    model = %self.config.model,
                    "Configured model is available"
                );
            }
            Ok(false) => {
                warn!(
                    subsystem = "inference",
                    component = "openrouter",
                    model = %self.config.model,
                    "Configured model was not found in the provider's model list"
                );
            }
            Err(e) => {
                warn!(
                    subsystem = "inference",
                    component = "openrouter",
                    error = %e,
                    "Could not verify model availability at startup"
                );
            }
        }
    }
}

#[async_trait]
impl GenerationBackend for OpenRouterBackend {
    async fn generate(&self, req: GenerationRequest) -> Result<String> {
        let api_key = self.api_key()?.to_string();

        debug!(
            subsystem = "inference",
            component = "openrouter",
            op = "generate",
            model = %self.config.model,
            prompt_len = req.prompt.len(),
            max_tokens = req.max_tokens,
            "Sending generation request"
        );

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &req.prompt,
            }],
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.site_name)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::AiService(format!("OpenRouter request failed: {}", e)))?;

        let status = response.status();
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::AiService(format!("OpenRouter response unreadable: {}", e)))?;

        if let Some(err) = parsed.error {
            return Err(Error::AiService(format!("OpenRouter API error: {}", err.message)));
        }
        if !status.is_success() {
            return Err(Error::AiService(format!(
                "OpenRouter API returned status {}",
                status
            )));
        }

        match parsed.choices.into_iter().next() {
            Some(choice) => {
                debug!(
                    subsystem = "inference",
                    component = "openrouter",
                    op = "generate",
                    response_len = choice.message.content.len(),
                    "Generation complete"
                );
                Ok(choice.message.content)
            }
            None => Err(Error::AiService(
                "Invalid response format from OpenRouter API".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/models", self.config.base_url))
            .bearer_auth(self.api_key()?)
            .send()
            .await?;
        Ok(response.status().is_success())
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
