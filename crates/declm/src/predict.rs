// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Predict module for LM-based predictions
//!
//! This module provides the [`Predict`] type: render a prompt from the bound
//! inputs, send it to a [`LanguageModel`], and store the completion in the
//! first declared output.
//!
//! ## Prompt selection
//!
//! 1. a template set with [`Predict::with_template`], filled by
//!    [`fill_template`](crate::prompt::fill_template);
//! 2. otherwise a formatter set with [`Predict::with_prompt_fn`];
//! 3. otherwise the default layout from [`crate::prompt::default_prompt`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use declm::lm::MockLm;
//! use declm::{inputs, Declare, Module, Predict, Result, Signature, TypeTag};
//!
//! struct Qa;
//!
//! impl Declare for Qa {
//!     fn declare(sig: &mut Signature) -> Result<()> {
//!         sig.add_input("question", TypeTag::String, None, None)?;
//!         sig.add_output("answer", TypeTag::String, None)?;
//!         Ok(())
//!     }
//! }
//!
//! let lm = Arc::new(MockLm::fixed("Paris"));
//! let mut qa = Predict::with_lm::<Qa>(lm).unwrap();
//! let out = qa.call(inputs! { "question" => "Capital of France?" }).unwrap();
//! assert_eq!(out.get_str("answer"), Some("Paris"));
//! ```

use crate::error::{Error, Result};
use crate::lm::{CompletionOptions, LanguageModel};
use crate::module::{Module, ModuleState};
use crate::prompt::{self, PromptFn};
use crate::settings;
use crate::signature::{signature_of, Declare, Signature};
use std::fmt;
use std::sync::Arc;

/// Predict module that uses an LM to fill its first output.
#[derive(Clone)]
pub struct Predict {
    state: ModuleState,
    lm: Arc<dyn LanguageModel>,
    template: Option<String>,
    prompt_fn: Option<PromptFn>,
    options: CompletionOptions,
    name: &'static str,
}

impl Predict {
    /// Create a predictor for `T`'s signature using the process-wide default
    /// model.
    ///
    /// Fails with [`Error::Configuration`] when no default is configured.
    pub fn new<T: Declare>() -> Result<Self> {
        Self::from_parts(std::any::type_name::<T>(), signature_of::<T>()?, None)
    }

    /// Create a predictor for `T`'s signature with an explicit model.
    pub fn with_lm<T: Declare>(lm: Arc<dyn LanguageModel>) -> Result<Self> {
        Self::from_parts(std::any::type_name::<T>(), signature_of::<T>()?, Some(lm))
    }

    /// Create a predictor over an explicit signature.
    ///
    /// `lm` falls back to the process-wide default.
    pub fn from_parts(
        name: &'static str,
        signature: &'static Signature,
        lm: Option<Arc<dyn LanguageModel>>,
    ) -> Result<Self> {
        let lm = lm.or_else(settings::default_lm).ok_or_else(|| {
            Error::configuration(format!("No language model provided for {}", name))
        })?;
        Ok(Self {
            state: ModuleState::new(signature),
            lm,
            template: None,
            prompt_fn: None,
            options: CompletionOptions::default(),
            name,
        })
    }

    /// Use a `{field}` template instead of the default prompt.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Replace the default prompt layout with a custom formatter.
    ///
    /// A template, when set, still takes precedence.
    pub fn with_prompt_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ModuleState) -> String + Send + Sync + 'static,
    {
        self.prompt_fn = Some(Arc::new(f));
        self
    }

    /// Options passed to every completion.
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// The model in use.
    pub fn lm(&self) -> &Arc<dyn LanguageModel> {
        &self.lm
    }

    /// The template, if any.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Options passed to every completion.
    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Build the prompt for the current inputs.
    pub fn generate_prompt(&self) -> String {
        self.render_prompt(None)
    }

    /// The prompt body used when no template is set.
    pub fn default_prompt(&self) -> String {
        self.prompt_body(None)
    }

    /// Store `response` verbatim in the first output field.
    ///
    /// Does nothing when the signature has no outputs.
    pub fn parse_response(&mut self, response: impl Into<String>) {
        let target = self.state.signature().first_output().map(|f| f.name.as_str());
        if let Some(name) = target {
            self.state.set(name, response.into());
        }
    }

    /// Send a prompt to the model with this module's options.
    pub fn complete(&self, prompt: &str) -> Result<String> {
        self.lm.complete(prompt, &self.options)
    }

    /// Template, else formatter, else default layout with `instruction`.
    pub(crate) fn render_prompt(&self, instruction: Option<&str>) -> String {
        match self.template {
            Some(ref template) => prompt::fill_template(template, &self.state),
            None => self.prompt_body(instruction),
        }
    }

    /// Formatter, else default layout with `instruction`.
    pub(crate) fn prompt_body(&self, instruction: Option<&str>) -> String {
        match self.prompt_fn {
            Some(ref f) => f(&self.state),
            None => prompt::default_prompt(&self.state, instruction),
        }
    }
}

impl fmt::Debug for Predict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predict")
            .field("name", &self.name)
            .field("model", &self.lm.model_name())
            .field("template", &self.template)
            .field("custom_prompt", &self.prompt_fn.is_some())
            .field("state", &self.state)
            .finish()
    }
}

impl Module for Predict {
    fn state(&self) -> &ModuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModuleState {
        &mut self.state
    }

    fn forward(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::info_span!("predict", module = self.name, model = self.lm.model_name())
                .entered();

        let prompt = self.generate_prompt();

        #[cfg(feature = "tracing")]
        tracing::debug!(prompt_len = prompt.len(), "prompt generated");

        let response = self.complete(&prompt)?;
        self.parse_response(response);
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::TypeTag;
    use crate::lm::{FailingLm, MockLm, RecordingLm};
    use crate::types::Inputs;

    struct Qa;

    impl Declare for Qa {
        fn declare(sig: &mut Signature) -> Result<()> {
            sig.add_input("question", TypeTag::String, Some("The question"), None)?;
            sig.add_output("answer", TypeTag::String, Some("The answer"))?;
            Ok(())
        }
    }

    struct Sink;

    impl Declare for Sink {
        fn declare(sig: &mut Signature) -> Result<()> {
            sig.add_input("text", TypeTag::String, None, None)?;
            Ok(())
        }
    }

    #[test]
    fn test_forward_sets_first_output() {
        let mut qa = Predict::with_lm::<Qa>(Arc::new(MockLm::fixed("Paris"))).unwrap();
        let out = qa
            .call(Inputs::new().with("question", "Capital of France?"))
            .unwrap();
        assert_eq!(out.get_str("answer"), Some("Paris"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_default_prompt_sent_to_lm() {
        let lm = Arc::new(RecordingLm::new("ok"));
        let mut qa = Predict::with_lm::<Qa>(lm.clone()).unwrap();
        qa.call(Inputs::new().with("question", "Why?")).unwrap();
        assert_eq!(
            lm.last_prompt().unwrap(),
            "Task:\n\nGenerate the following: answer (The answer)\n\nQuestion:\n\nWhy?"
        );
    }

    #[test]
    fn test_template_wins_over_prompt_fn() {
        let mut qa = Predict::with_lm::<Qa>(Arc::new(MockLm::fixed("")))
            .unwrap()
            .with_prompt_fn(|_| "custom".to_string())
            .with_template("Q: {question}");
        qa.bind(Inputs::new().with("question", "x"));
        assert_eq!(qa.generate_prompt(), "Q: x");
        assert_eq!(qa.default_prompt(), "custom");
    }

    #[test]
    fn test_prompt_fn_replaces_default() {
        let mut qa = Predict::with_lm::<Qa>(Arc::new(MockLm::fixed("")))
            .unwrap()
            .with_prompt_fn(|state| format!("Question: {}\n\nAnswer:", state.value("question")));
        qa.bind(Inputs::new().with("question", "x"));
        assert_eq!(qa.generate_prompt(), "Question: x\n\nAnswer:");
    }

    #[test]
    fn test_lm_error_propagates_unchanged() {
        let mut qa = Predict::with_lm::<Qa>(Arc::new(FailingLm::new("boom").with_status(500)))
            .unwrap();
        let err = qa.call(Inputs::new()).unwrap_err();
        match err {
            Error::Lm {
                provider,
                message,
                status,
            } => {
                assert_eq!(provider, "mock");
                assert_eq!(message, "boom");
                assert_eq!(status, Some(500));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_outputs_parse_is_noop() {
        let mut sink = Predict::with_lm::<Sink>(Arc::new(MockLm::fixed("ignored"))).unwrap();
        let out = sink.call(Inputs::new().with("text", "hi")).unwrap();
        assert!(out.is_empty());
        assert_eq!(sink.get("text").and_then(|v| v.as_str()), Some("hi"));
    }

    #[test]
    fn test_debug_hides_closures() {
        let qa = Predict::with_lm::<Qa>(Arc::new(MockLm::fixed("")))
            .unwrap()
            .with_prompt_fn(|_| String::new());
        let dbg = format!("{:?}", qa);
        assert!(dbg.contains("custom_prompt: true"));
        assert!(dbg.contains("mock"));
    }
}
