//! OpenAI configuration

use std::env;

use serde::{Deserialize, Serialize};

use cora_core::{Error, Result};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;
const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for the OpenAI client.
///
/// The embedding model and dimension must match what the offline index
/// build used; the resolver verifies the dimension against the loaded
/// index at boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_url: String,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub chat_model: String,
}

impl OpenAiConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Configuration("OPENAI_API_KEY environment variable not found".to_string())
        })?;

        let api_url = env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let embedding_model = env::var("OPENAI_EMBEDDING_MODEL")
            .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());

        let embedding_dimension = match env::var("OPENAI_EMBEDDING_DIMENSION") {
            Ok(raw) => raw.parse().map_err(|_| {
                Error::Configuration(format!(
                    "OPENAI_EMBEDDING_DIMENSION must be a positive integer, got \"{raw}\""
                ))
            })?,
            Err(_) => DEFAULT_EMBEDDING_DIMENSION,
        };

        let chat_model =
            env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        Ok(Self {
            api_key,
            api_url,
            embedding_model,
            embedding_dimension,
            chat_model,
        })
    }

    /// Create configuration with explicit key and default endpoints.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
        }
    }
}
