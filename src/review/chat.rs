use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::client::{HttpClient, ReqwestClient};
use super::{Reviewer, endpoint_url, render_prompt};
use crate::category::Category;
use crate::config::{ApiConfig, PromptConfig};
use crate::error::{CodebuddyError, Result};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Reviewer backed by an OpenAI-compatible chat completion endpoint.
///
/// Each review is one POST carrying a system message and a user message
/// built from the category prompt.
#[derive(Debug)]
pub struct ChatReviewer<C: HttpClient = ReqwestClient> {
    client: C,
    url: Url,
    system_prompt: String,
    max_tokens: u32,
    temperature: f64,
}

impl ChatReviewer<ReqwestClient> {
    /// # Errors
    /// Returns an error if the API URL is invalid or the HTTP client cannot be built.
    pub fn from_config(api: &ApiConfig, prompts: &PromptConfig) -> Result<Self> {
        let client = ReqwestClient::new(api.timeout_secs.map(Duration::from_secs))?;
        Self::with_client(client, api, prompts)
    }
}

impl<C: HttpClient> ChatReviewer<C> {
    /// # Errors
    /// Returns `InvalidArgument` if the API URL or endpoint cannot be resolved.
    pub fn with_client(client: C, api: &ApiConfig, prompts: &PromptConfig) -> Result<Self> {
        let url = endpoint_url(&api.url, &api.endpoint)?;
        tracing::debug!(url = %url, "Initialized chat reviewer");
        Ok(Self {
            client,
            url,
            system_prompt: prompts.system.clone(),
            max_tokens: api.max_tokens,
            temperature: api.temperature,
        })
    }

    /// Fully resolved completion URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    fn request_body(&self, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        Ok(serde_json::to_string(&request)?)
    }
}

fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CodebuddyError::Upstream(format!("Malformed response: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CodebuddyError::Upstream("Response contains no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| CodebuddyError::Upstream("First choice has no message content".to_string()))
}

impl<C: HttpClient> Reviewer for ChatReviewer<C> {
    fn review(&self, category: &Category, content: &str) -> Result<String> {
        let prompt = render_prompt(&category.prompt, content);
        let body = self.request_body(&prompt)?;
        tracing::trace!(body = %body, "Sending review request");

        let response = self.client.post_json(self.url.as_str(), &body)?;
        tracing::debug!(status = response.status, "Received review response");

        if !response.is_success() {
            return Err(CodebuddyError::Upstream(format!(
                "Request failed with status code {}",
                response.status
            )));
        }

        extract_content(&response.body)
    }
}

#[cfg(test)]
#[path = "chat_tests.rs"]
mod tests;
