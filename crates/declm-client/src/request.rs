// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Request payloads

use serde::Serialize;
use std::borrow::Cow;

/// Message in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message<'a> {
    /// Role (system, user, assistant)
    pub role: Cow<'a, str>,

    /// Content
    pub content: Cow<'a, str>,
}

impl<'a> Message<'a> {
    /// Create a user message
    pub fn user(content: impl Into<Cow<'a, str>>) -> Self {
        Self {
            role: Cow::Borrowed("user"),
            content: content.into(),
        }
    }
}

/// Body for chat completions and Anthropic messages.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Model identifier
    pub model: &'a str,

    /// Single-turn conversation
    pub messages: Vec<Message<'a>>,

    /// Sampling temperature
    pub temperature: f32,

    /// Token limit, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl<'a> ChatRequest<'a> {
    /// Create a request holding one user message.
    pub fn new(model: &'a str, prompt: &'a str, temperature: f32) -> Self {
        Self {
            model,
            messages: vec![Message::user(prompt)],
            temperature,
            max_tokens: None,
        }
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Body for legacy text completions.
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest<'a> {
    /// Model identifier
    pub model: &'a str,

    /// Raw prompt
    pub prompt: &'a str,

    /// Sampling temperature
    pub temperature: f32,

    /// Token limit, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}
