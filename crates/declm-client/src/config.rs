// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Client configuration

use crate::provider::Provider;
use crate::retry::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "DECLM_MODEL";

/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "DECLM_BASE_URL";

/// Generation settings for an [`ApiLm`](crate::ApiLm).
///
/// Per-call [`CompletionOptions`](declm::CompletionOptions) take precedence
/// over `temperature` and `max_tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LmConfig {
    /// Model name
    pub model: String,

    /// Temperature
    pub temperature: f32,

    /// Max tokens, provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Retry policy
    pub retry: RetryPolicy,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self::for_provider(Provider::OpenAI)
    }
}

impl LmConfig {
    /// Defaults for `provider`.
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            model: provider.default_model().to_string(),
            temperature: 0.0,
            max_tokens: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = LmConfig::default();
        assert_eq!(c.model, "gpt-3.5-turbo");
        assert_eq!(c.temperature, 0.0);
        assert_eq!(c.max_tokens, None);
        assert_eq!(c.retry, RetryPolicy::default());

        let c = LmConfig::for_provider(Provider::Anthropic);
        assert_eq!(c.model, "claude-3-opus-20240229");
    }

    #[test]
    fn test_partial_json() {
        let c: LmConfig =
            serde_json::from_str(r#"{"model": "gpt-4o", "retry": {"max_retries": 0}}"#).unwrap();
        assert_eq!(c.model, "gpt-4o");
        assert_eq!(c.temperature, 0.0);
        assert_eq!(c.retry.max_retries, 0);
        assert_eq!(c.retry.statuses.len(), 5);
    }
}
