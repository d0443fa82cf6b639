// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Response payloads and text extraction

use crate::provider::{Endpoint, Provider};
use declm::{Error, Result};
use serde::Deserialize;

/// OpenAI chat or text completion response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    /// Generated alternatives
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage, when reported
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One completion alternative.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    /// Chat message (chat completions)
    #[serde(default)]
    pub message: Option<ChoiceMessage>,

    /// Raw text (text completions)
    #[serde(default)]
    pub text: Option<String>,
}

/// Message inside a chat choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage {
    /// Content, absent for tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// Anthropic Messages response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessagesResponse {
    /// Content blocks
    #[serde(default)]
    pub content: Vec<ContentBlock>,

    /// Token usage, when reported
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Anthropic content block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentBlock {
    /// Text, absent for non-text blocks
    #[serde(default)]
    pub text: Option<String>,
}

/// Token usage statistics. Field names differ per provider.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    #[serde(default, alias = "input_tokens")]
    pub prompt_tokens: u32,

    /// Completion tokens
    #[serde(default, alias = "output_tokens")]
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Text and usage pulled out of a successful response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    /// Generated text, trimmed
    pub text: String,
    /// Prompt tokens, zero when not reported
    pub prompt_tokens: u32,
    /// Completion tokens, zero when not reported
    pub completion_tokens: u32,
}

/// Parse a 2xx body for `endpoint`.
///
/// A missing first choice or content block yields empty text.
pub fn parse_completion(provider: Provider, endpoint: Endpoint, body: &str) -> Result<Completion> {
    let malformed =
        |e: serde_json::Error| Error::lm(provider.name(), format!("Failed to parse response: {}", e));

    let (text, usage) = match endpoint {
        Endpoint::Messages => {
            let resp: MessagesResponse = serde_json::from_str(body).map_err(malformed)?;
            let text = resp.content.into_iter().next().and_then(|block| block.text);
            (text, resp.usage)
        }
        Endpoint::ChatCompletions => {
            let resp: CompletionResponse = serde_json::from_str(body).map_err(malformed)?;
            let text = resp
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message)
                .and_then(|m| m.content);
            (text, resp.usage)
        }
        Endpoint::TextCompletions => {
            let resp: CompletionResponse = serde_json::from_str(body).map_err(malformed)?;
            let text = resp.choices.into_iter().next().and_then(|c| c.text);
            (text, resp.usage)
        }
    };

    let usage = usage.unwrap_or_default();
    Ok(Completion {
        text: text.unwrap_or_default().trim().to_string(),
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
    })
}

/// Build the error for a non-2xx response.
///
/// Uses the provider's `error.message` when the body carries one, otherwise
/// the raw body.
pub fn error_from_body(provider: Provider, status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|env| env.error.message)
        .unwrap_or_else(|| body.trim().to_string());
    Error::lm_status(provider.name(), status, message)
}
