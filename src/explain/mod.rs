//! Natural-language explanations of predictions via a local LLM service

pub mod ollama;
pub mod prompt;

pub use ollama::OllamaClient;
pub use prompt::{explanation_prompt, TeamNames};

use crate::error::Result;
use async_trait::async_trait;

/// Anything that turns a prompt into generated text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
