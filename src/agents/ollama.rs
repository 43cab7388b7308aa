//! Ollama chat client.
//!
//! Sends the prompt as a single non-streaming user message to the chat
//! endpoint and returns `message.content` from the response.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::error::AgentError;
use super::llm::ReplySource;

pub const DEFAULT_URL: &str = "http://localhost:11434/api/chat";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

#[derive(Clone, Debug)]
pub struct OllamaClient {
    client: Client,
    url: String,
    model: String,
}

impl OllamaClient {
    /// Client for `model` on the default local endpoint.
    pub fn new(model: impl Into<String>) -> Result<Self, AgentError> {
        Self::with_timeout(model, Duration::from_secs(120))
    }

    pub fn with_timeout(model: impl Into<String>, timeout: Duration) -> Result<Self, AgentError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: DEFAULT_URL.to_string(),
            model: model.into(),
        })
    }

    /// Point at a different endpoint.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ReplySource for OllamaClient {
    fn name(&self) -> &str {
        &self.model
    }

    fn query(&self, prompt: &str) -> Result<String, AgentError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response: ChatResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        response
            .message
            .map(|m| m.content)
            .ok_or_else(|| AgentError::Response("missing message in chat response".into()))
    }
}
