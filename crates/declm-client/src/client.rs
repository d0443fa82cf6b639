// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! HTTP language model client for OpenAI and Anthropic.
//!
//! [`ApiLm`] implements [`LanguageModel`] with blocking requests
//! (`reqwest::blocking`), so it can be handed straight to
//! [`Predict`](declm::Predict) or registered as the process default.
//!
//! # Examples
//!
//! ```ignore
//! use declm_client::ApiLm;
//!
//! // ANTHROPIC_API_KEY, then OPENAI_API_KEY
//! let lm = ApiLm::from_env()?;
//!
//! // Explicit providers
//! let lm = ApiLm::openai("sk-...").with_model("gpt-4o");
//! let lm = ApiLm::anthropic("sk-ant-...");
//! ```

use crate::config::{LmConfig, ENV_BASE_URL, ENV_MODEL};
use crate::provider::{Endpoint, Provider, ANTHROPIC_DEFAULT_MAX_TOKENS, ANTHROPIC_VERSION};
use crate::request::{ChatRequest, TextRequest};
use crate::response::{error_from_body, parse_completion, Completion};
use declm::{CompletionOptions, Error, LanguageModel, Result};
use reqwest::blocking::{Client, RequestBuilder};
use std::fmt;

/// Blocking completion client.
#[derive(Clone)]
pub struct ApiLm {
    client: Client,
    provider: Provider,
    api_key: String,
    base_url: String,
    config: LmConfig,
}

impl ApiLm {
    /// Create a client for `provider` with its default model and base URL.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            provider,
            api_key: api_key.into(),
            base_url: provider.default_base_url().to_string(),
            config: LmConfig::for_provider(provider),
        }
    }

    /// Create an OpenAI client.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(Provider::OpenAI, api_key)
    }

    /// Create an Anthropic client.
    pub fn anthropic(api_key: impl Into<String>) -> Self {
        Self::new(Provider::Anthropic, api_key)
    }

    /// Auto-detect the provider from the environment.
    ///
    /// Checked in order:
    /// 1. `ANTHROPIC_API_KEY` → Anthropic
    /// 2. `OPENAI_API_KEY` → OpenAI
    ///
    /// `DECLM_MODEL` and `DECLM_BASE_URL` override the model and endpoint.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let (provider, key) = [Provider::Anthropic, Provider::OpenAI]
            .into_iter()
            .find_map(|p| var(p.api_key_var()).map(|key| (p, key)))
            .ok_or_else(|| {
                Error::configuration(
                    "No LLM provider found. Set ANTHROPIC_API_KEY or OPENAI_API_KEY.",
                )
            })?;

        let mut lm = Self::new(provider, key);
        if let Some(model) = var(ENV_MODEL) {
            lm.config.model = model;
        }
        if let Some(url) = var(ENV_BASE_URL) {
            lm.base_url = url;
        }
        Ok(lm)
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Point at a compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: LmConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Backend in use.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current configuration.
    pub fn config(&self) -> &LmConfig {
        &self.config
    }

    /// Endpoint used for the configured model.
    pub fn endpoint(&self) -> Endpoint {
        self.provider.endpoint(&self.config.model)
    }

    /// JSON body sent for `prompt`.
    pub fn request_body(&self, prompt: &str, options: &CompletionOptions) -> Result<serde_json::Value> {
        let model = self.config.model.as_str();
        let temperature = options.temperature.unwrap_or(self.config.temperature);
        let max_tokens = options.max_tokens.or(self.config.max_tokens);

        let body = match self.endpoint() {
            Endpoint::ChatCompletions => serde_json::to_value(
                ChatRequest::new(model, prompt, temperature).with_max_tokens(max_tokens),
            )?,
            Endpoint::Messages => serde_json::to_value(
                ChatRequest::new(model, prompt, temperature)
                    .with_max_tokens(Some(max_tokens.unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS))),
            )?,
            Endpoint::TextCompletions => serde_json::to_value(TextRequest {
                model,
                prompt,
                temperature,
                max_tokens,
            })?,
        };
        Ok(body)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.provider {
            Provider::OpenAI => request.bearer_auth(&self.api_key),
            Provider::Anthropic => request
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
        }
    }

    fn send(&self, url: &str, body: &serde_json::Value) -> Result<Completion> {
        let name = self.provider.name();
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .map_err(|e| Error::lm(name, format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| Error::lm(name, format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(error_from_body(self.provider, status.as_u16(), &text));
        }
        parse_completion(self.provider, self.endpoint(), &text)
    }

    fn call_api(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "llm_call",
            provider = self.provider.name(),
            model = self.config.model.as_str(),
        )
        .entered();

        let url = self.endpoint().url(&self.base_url);
        let body = self.request_body(prompt, options)?;
        let completion = self.config.retry.run(|_| self.send(&url, &body))?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            prompt_tokens = completion.prompt_tokens,
            completion_tokens = completion.completion_tokens,
            "llm call complete"
        );

        Ok(completion.text)
    }
}

impl fmt::Debug for ApiLm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiLm")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LanguageModel for ApiLm {
    fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        self.call_api(prompt, options)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
