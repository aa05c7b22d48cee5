//! OpenAI API client implementing both boundary traits

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::debug;

use cora_core::{
    AnswerSynthesizer, EmbeddingProvider, Error, QueryContextBundle, Result,
};

use crate::config::OpenAiConfig;
use crate::prompt;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);
const CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI client: embeddings for query resolution, chat completions for
/// answer synthesis.
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
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
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl OpenAiClient {
    /// Create a new client from configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Configuration(format!("http client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    async fn perform_embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let url = format!("{}/embeddings", self.config.api_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::EmbeddingUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable body".to_string());
            return Err(Error::EmbeddingUnavailable(format!(
                "embeddings API answered {status}: {body}"
            )));
        }

        let decoded: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::EmbeddingUnavailable(format!("malformed response: {e}")))?;

        let vector = decoded
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                Error::EmbeddingUnavailable("embeddings API returned no data".to_string())
            })?;

        if vector.len() != self.config.embedding_dimension {
            return Err(Error::Configuration(format!(
                "model {} returned dimension {}, configured for {}",
                self.config.embedding_model,
                vector.len(),
                self.config.embedding_dimension
            )));
        }

        Ok(vector)
    }

    async fn perform_chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.7,
            max_tokens: 500,
        };

        let url = format!("{}/chat/completions", self.config.api_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Synthesis(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable body".to_string());
            return Err(Error::Synthesis(format!(
                "chat API answered {status}: {body}"
            )));
        }

        let decoded: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Synthesis(format!("malformed response: {e}")))?;

        let text = decoded
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Synthesis("chat API returned no choices".to_string()))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Synthesis("chat API returned empty text".to_string()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match timeout(CALL_TIMEOUT, self.perform_embed(text)).await {
            Ok(result) => result,
            Err(_) => Err(Error::EmbeddingUnavailable(
                "embedding request timed out".to_string(),
            )),
        }
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dimension
    }
}

#[async_trait]
impl AnswerSynthesizer for OpenAiClient {
    async fn synthesize(&self, question: &str, bundle: &QueryContextBundle) -> Result<String> {
        let system = prompt::system_prompt(question, bundle);
        debug!(
            candidates = bundle.len(),
            prompt_bytes = system.len(),
            "synthesizing answer"
        );

        match timeout(CALL_TIMEOUT, self.perform_chat(&system, question)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Synthesis("chat request timed out".to_string())),
        }
    }
}
