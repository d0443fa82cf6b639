// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Language model interface.
//!
//! This module provides the [`LanguageModel`] trait that [`Predict`] and
//! [`ChainOfThought`] call, plus in-process models for tests and examples.
//! Network-backed implementations live in the `declm-client` crate.
//!
//! # Examples
//!
//! ```
//! use declm::lm::{CompletionOptions, LanguageModel, MockLm};
//!
//! let lm = MockLm::new(|prompt| format!("Generated response for: {}", prompt.len()));
//! let text = lm.complete("Task:", &CompletionOptions::default()).unwrap();
//! assert_eq!(text, "Generated response for: 5");
//! ```
//!
//! [`Predict`]: crate::predict::Predict
//! [`ChainOfThought`]: crate::modules::ChainOfThought

use crate::error::{Error, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Per-request generation options.
///
/// Unset fields defer to the model's own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Upper bound on generated tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionOptions {
    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Trait for language model providers.
///
/// Calls block until the completion is available. Implementations must be
/// shareable across threads; [`Predict`](crate::predict::Predict) holds them
/// as `Arc<dyn LanguageModel>`.
pub trait LanguageModel: Send + Sync {
    /// Complete a single prompt.
    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String>;

    /// Complete several prompts in order, stopping at the first failure.
    fn batch_complete(&self, prompts: &[&str], options: &CompletionOptions) -> Result<Vec<String>> {
        prompts.iter().map(|p| self.complete(p, options)).collect()
    }

    /// Get the model name for logging.
    fn model_name(&self) -> &str {
        "unknown"
    }
}

impl<L: LanguageModel + ?Sized> LanguageModel for Arc<L> {
    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        (**self).complete(prompt, options)
    }

    fn batch_complete(&self, prompts: &[&str], options: &CompletionOptions) -> Result<Vec<String>> {
        (**self).batch_complete(prompts, options)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

impl<L: LanguageModel + ?Sized> LanguageModel for Box<L> {
    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        (**self).complete(prompt, options)
    }

    fn batch_complete(&self, prompts: &[&str], options: &CompletionOptions) -> Result<Vec<String>> {
        (**self).batch_complete(prompts, options)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// A mock language model for testing and examples.
///
/// This model uses a closure to produce completions synchronously.
pub struct MockLm<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    generator: F,
    name: &'static str,
}

impl<F> MockLm<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    /// Create a new mock model with the given generator function.
    pub fn new(generator: F) -> Self {
        Self {
            generator,
            name: "mock",
        }
    }

    /// Set a custom name for the mock model.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl MockLm<Box<dyn Fn(&str) -> String + Send + Sync>> {
    /// A mock that ignores the prompt and always answers `text`.
    pub fn fixed(text: impl Into<String>) -> Self {
        let text = text.into();
        MockLm::new(Box::new(move |_: &str| text.clone()))
    }
}

impl<F> LanguageModel for MockLm<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn complete(&self, prompt: &str, _options: &CompletionOptions) -> Result<String> {
        Ok((self.generator)(prompt))
    }

    fn model_name(&self) -> &str {
        self.name
    }
}

/// A mock model whose reply depends on how many times it has been called.
pub struct SequenceLm<F>
where
    F: Fn(u32, &str) -> String + Send + Sync,
{
    generator: F,
    calls: AtomicU32,
}

impl<F> SequenceLm<F>
where
    F: Fn(u32, &str) -> String + Send + Sync,
{
    /// Create a new sequence model.
    ///
    /// The generator receives the call number (0-based) and the prompt.
    pub fn new(generator: F) -> Self {
        Self {
            generator,
            calls: AtomicU32::new(0),
        }
    }

    /// Number of completions served so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<F> LanguageModel for SequenceLm<F>
where
    F: Fn(u32, &str) -> String + Send + Sync,
{
    fn complete(&self, prompt: &str, _options: &CompletionOptions) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok((self.generator)(n, prompt))
    }

    fn model_name(&self) -> &str {
        "sequence_mock"
    }
}

/// A model that answers with fixed text and remembers every prompt it saw.
#[derive(Debug, Default)]
pub struct RecordingLm {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingLm {
    /// Create a recording model that always replies `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// The most recent prompt.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().last().cloned()
    }
}

impl LanguageModel for RecordingLm {
    fn complete(&self, prompt: &str, _options: &CompletionOptions) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

/// A model that fails every request with an [`Error::Lm`].
///
/// Useful for testing error propagation.
#[derive(Debug, Clone)]
pub struct FailingLm {
    message: String,
    status: Option<u16>,
}

impl FailingLm {
    /// Create a new failing model with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Attach an HTTP-style status to the produced error.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl LanguageModel for FailingLm {
    fn complete(&self, _prompt: &str, _options: &CompletionOptions) -> Result<String> {
        Err(match self.status {
            Some(status) => Error::lm_status("mock", status, self.message.clone()),
            None => Error::lm("mock", self.message.clone()),
        })
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}
