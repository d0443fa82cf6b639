// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Completion providers and their endpoint conventions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anthropic Messages API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Token limit sent to Anthropic when none is requested; the API requires one.
pub const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 1024;

/// Supported completion backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat and text completions (and compatible endpoints)
    OpenAI,
    /// Anthropic Messages API
    Anthropic,
}

/// Request shape used for a given provider and model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /v1/chat/completions`
    ChatCompletions,
    /// `POST /v1/completions`
    TextCompletions,
    /// `POST /v1/messages`
    Messages,
}

impl Provider {
    /// Name used in errors and log fields.
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }

    /// Public API root.
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com",
            Provider::Anthropic => "https://api.anthropic.com",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-3.5-turbo",
            Provider::Anthropic => "claude-3-opus-20240229",
        }
    }

    /// Environment variable holding the API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Pick the endpoint for `model`.
    ///
    /// OpenAI model names containing `gpt` or `turbo` go to the chat API,
    /// everything else to the legacy text completions API.
    pub fn endpoint(self, model: &str) -> Endpoint {
        match self {
            Provider::Anthropic => Endpoint::Messages,
            Provider::OpenAI if is_chat_model(model) => Endpoint::ChatCompletions,
            Provider::OpenAI => Endpoint::TextCompletions,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Endpoint {
    /// Path appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ChatCompletions => "/v1/chat/completions",
            Endpoint::TextCompletions => "/v1/completions",
            Endpoint::Messages => "/v1/messages",
        }
    }

    /// Full URL under `base_url`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// Whether an OpenAI model name refers to a chat model.
pub fn is_chat_model(model: &str) -> bool {
    model.contains("gpt") || model.contains("turbo")
}
