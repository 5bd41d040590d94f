// HTTP client for the Groq chat-completions API

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::{ChatRequest, ChatResponse, Message};
use super::CompletionBackend;
use crate::errors::{Error, Result};

const GROQ_API_URL: &str = "https://api.groq.com";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Groq API client.
///
/// Stateless across calls; cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: GROQ_API_URL.to_string(),
        })
    }

    /// Point the client at a different host (integration tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompletionBackend for GroqClient {
    async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest {
            model,
            messages,
            temperature,
            max_tokens,
        };
        let url = format!("{}/openai/v1/chat/completions", self.base_url);

        tracing::debug!(model, temperature, max_tokens, "Sending request to Groq API");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Completion(format!("Failed to send request to Groq API: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Error::Completion(format!(
                "Groq API request failed\n\nStatus: {}\nBody: {}",
                status, error_body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Completion(format!("Failed to parse Groq API response: {}", e)))?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                Error::Completion("Groq API returned no choices in response".to_string())
            })?;

        tracing::debug!(bytes = text.len(), "Received completion text");

        Ok(text)
    }
}
