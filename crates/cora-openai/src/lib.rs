//! OpenAI integration for the cora course advisor
//!
//! This crate provides the OpenAI implementations of the EmbeddingProvider
//! and AnswerSynthesizer traits. Prompt construction lives here, behind the
//! synthesis boundary; the resolver never sees it.

mod client;
mod config;
mod prompt;

#[cfg(test)]
mod tests;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;

// Re-export core types for convenience
pub use cora_core::{AnswerSynthesizer, EmbeddingProvider, Error, Result};
