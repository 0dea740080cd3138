//! Async LLM client for the campaign's text-generation boundary
//!
//! Model-agnostic HTTP client speaking both the Anthropic messages API
//! and OpenAI-compatible chat APIs. The client is optional everywhere it
//! is used: email drafting and the post-campaign analysis degrade to
//! fixed fallback text without it.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::error::{CampaignError, Result};

/// Wire format the configured endpoint speaks
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Async LLM client for drafting copy and summarizing results
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    api_format: ApiFormat,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        let api_format = Self::detect_api_format(&api_url);
        Self {
            client: Client::new(),
            api_key,
            api_url,
            model,
            api_format,
        }
    }

    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAI
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: COLDREACH_LLM_API_KEY
    /// Optional: COLDREACH_LLM_API_URL (defaults to the Anthropic API)
    /// Optional: COLDREACH_LLM_MODEL (defaults to claude-3-haiku-20240307)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("COLDREACH_LLM_API_KEY")
            .map_err(|_| CampaignError::Llm("COLDREACH_LLM_API_KEY not set".into()))?;
        let api_url = std::env::var("COLDREACH_LLM_API_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".into());
        let model = std::env::var("COLDREACH_LLM_MODEL")
            .unwrap_or_else(|_| "claude-3-haiku-20240307".into());

        Ok(Self::new(api_key, api_url, model))
    }

    /// Send a completion request and return the response text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            // Subject lines and one-sentence analyses are short
            max_tokens: 1024,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CampaignError::Llm(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CampaignError::Llm(format!("API error: {}", error_text)));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| CampaignError::Llm(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| CampaignError::Llm("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: 1024,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CampaignError::Llm(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CampaignError::Llm(format!("API error: {}", error_text)));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| CampaignError::Llm(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| CampaignError::Llm("Empty response".into()))
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible chat format
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_api_format_from_url() {
        let anthropic = LlmClient::new(
            "key".into(),
            "https://api.anthropic.com/v1/messages".into(),
            "claude-3-haiku-20240307".into(),
        );
        assert_eq!(anthropic.api_format, ApiFormat::Anthropic);

        let openai = LlmClient::new(
            "key".into(),
            "https://api.deepseek.com/chat/completions".into(),
            "deepseek-chat".into(),
        );
        assert_eq!(openai.api_format, ApiFormat::OpenAI);
    }

    #[test]
    fn from_env_requires_api_key() {
        if std::env::var("COLDREACH_LLM_API_KEY").is_err() {
            assert!(LlmClient::from_env().is_err());
        }
    }
}
