use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::narrator::{decode_reply, NarrativeReply, Narrator, NarratorError};
use crate::model::message::ChatMessage;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

// A stuck upstream call is indistinguishable from a dead one; past this
// the request becomes the ordinary narrator-failure path.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Narrator backed by an OpenAI-compatible chat-completions endpoint.
pub struct ChatCompletionNarrator {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionNarrator {
    pub fn new(api_key: impl Into<String>) -> Result<Self, NarratorError> {
        Self::with_endpoint(DEFAULT_BASE_URL, DEFAULT_MODEL, api_key)
    }

    pub fn with_endpoint(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, NarratorError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

impl Narrator for ChatCompletionNarrator {
    fn narrate(&self, history: &[ChatMessage]) -> Result<NarrativeReply, NarratorError> {
        let req = ChatCompletionRequest {
            model: &self.model,
            messages: history,
            temperature: 1.0,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()?
            .error_for_status()?
            .json::<ChatCompletionResponse>()?;

        let raw = resp
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or(NarratorError::EmptyCompletion)?;

        decode_reply(raw)
    }
}
