// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Chain of Thought module
//!
//! Implements the Chain of Thought (CoT) reasoning strategy where the LM
//! is prompted to show its reasoning steps before providing an answer.
//!
//! ## Segmentation
//!
//! The response is split into lines and scanned with a two-state machine:
//! lines belong to the reasoning until one contains an answer cue
//! (`Therefore,`, `Thus,`, `In conclusion,`, `So,`, `The answer is`,
//! `Final answer:`, `Answer:`; case-insensitive, anywhere in the line). That
//! line and every later one form the answer.
//!
//! Without a cue, the last two lines are the answer when there are more than
//! two lines, otherwise the last line is.

use crate::error::Result;
use crate::lm::LanguageModel;
use crate::module::{Module, ModuleState};
use crate::predict::Predict;
use crate::prompt::STEP_BY_STEP;
use crate::signature::Declare;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::{Arc, OnceLock};

const ANSWER_CUES: &str =
    r"(?i)Therefore,|Thus,|In conclusion,|So,|The answer is|Final answer:|Answer:";

const REASONING_CUES: &str = r"(?i)Let's think through this step by step|Let me think|Let's analyze|Step 1|First,|To solve this|Reasoning:|I'll analyze";

fn answer_cue() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ANSWER_CUES).expect("invalid regex pattern"))
}

fn reasoning_cue() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REASONING_CUES).expect("invalid regex pattern"))
}

/// Check whether a line opens the answer section.
pub fn is_answer_cue(line: &str) -> bool {
    answer_cue().is_match(line)
}

/// Check whether a line reads like the start of step-by-step reasoning.
///
/// Recognized for callers' inspection only; segmentation ignores it.
pub fn is_reasoning_cue(line: &str) -> bool {
    reasoning_cue().is_match(line)
}

/// A response split into reasoning and answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    /// Lines before the answer, joined and trimmed.
    pub reasoning: String,
    /// The answer lines, joined and trimmed.
    pub answer: String,
}

/// Split a chain-of-thought response. Never fails.
pub fn segment(response: &str) -> Segments {
    let mut lines: SmallVec<[&str; 16]> = response.split('\n').collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let split = match lines.iter().position(|l| is_answer_cue(l)) {
        Some(i) => i,
        None if lines.len() > 2 => lines.len() - 2,
        None => lines.len().saturating_sub(1),
    };

    let (reasoning, answer) = lines.split_at(split);
    Segments {
        reasoning: reasoning.join("\n").trim().to_string(),
        answer: answer.join("\n").trim().to_string(),
    }
}

/// Chain of Thought module.
///
/// Wraps a [`Predict`], adds a step-by-step instruction to the default prompt
/// and separates the reasoning from the answer. The answer goes to the first
/// output field; the reasoning is available from [`ChainOfThought::reasoning`].
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use declm::lm::MockLm;
/// use declm::{inputs, ChainOfThought, Declare, Module, Result, Signature, TypeTag};
///
/// struct Qa;
///
/// impl Declare for Qa {
///     fn declare(sig: &mut Signature) -> Result<()> {
///         sig.add_input("question", TypeTag::String, None, None)?;
///         sig.add_output("answer", TypeTag::String, None)?;
///         Ok(())
///     }
/// }
///
/// let lm = Arc::new(MockLm::fixed("120 * 2.5 = 300\nTherefore, 300 km"));
/// let mut cot = ChainOfThought::with_lm::<Qa>(lm).unwrap();
/// let out = cot.call(inputs! { "question" => "How far?" }).unwrap();
/// assert_eq!(out.get_str("answer"), Some("Therefore, 300 km"));
/// assert_eq!(cot.reasoning(), Some("120 * 2.5 = 300"));
/// ```
#[derive(Debug, Clone)]
pub struct ChainOfThought {
    predict: Predict,
    reasoning: Option<String>,
}

impl ChainOfThought {
    /// Create using the process-wide default model.
    pub fn new<T: Declare>() -> Result<Self> {
        Ok(Self::from_predict(Predict::new::<T>()?))
    }

    /// Create with an explicit model.
    pub fn with_lm<T: Declare>(lm: Arc<dyn LanguageModel>) -> Result<Self> {
        Ok(Self::from_predict(Predict::with_lm::<T>(lm)?))
    }

    /// Wrap a configured predictor.
    pub fn from_predict(predict: Predict) -> Self {
        Self {
            predict,
            reasoning: None,
        }
    }

    /// Use a `{field}` template, bypassing the step-by-step instruction.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.predict = self.predict.with_template(template);
        self
    }

    /// Replace the default prompt layout with a custom formatter.
    ///
    /// The formatter produces the whole body, step-by-step instruction included.
    pub fn with_prompt_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&ModuleState) -> String + Send + Sync + 'static,
    {
        self.predict = self.predict.with_prompt_fn(f);
        self
    }

    /// Get the underlying predict module.
    #[inline]
    pub fn predict(&self) -> &Predict {
        &self.predict
    }

    /// Reasoning extracted from the last response, `None` before the first.
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    /// Build the prompt for the current inputs.
    pub fn generate_prompt(&self) -> String {
        self.predict.render_prompt(Some(STEP_BY_STEP))
    }

    /// The default prompt with the step-by-step instruction.
    pub fn default_prompt(&self) -> String {
        self.predict.prompt_body(Some(STEP_BY_STEP))
    }

    /// Segment `response`, store the reasoning, and write the answer to the
    /// first output field.
    pub fn parse_response(&mut self, response: &str) {
        let Segments { reasoning, answer } = segment(response);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            reasoning_len = reasoning.len(),
            answer_len = answer.len(),
            "response segmented"
        );

        self.reasoning = Some(reasoning);
        self.predict.parse_response(answer);
    }
}

impl Module for ChainOfThought {
    fn state(&self) -> &ModuleState {
        self.predict.state()
    }

    fn state_mut(&mut self) -> &mut ModuleState {
        self.predict.state_mut()
    }

    fn forward(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "chain_of_thought",
            module = self.predict.name(),
            model = self.predict.lm().model_name()
        )
        .entered();

        let prompt = self.generate_prompt();
        let response = self.predict.complete(&prompt)?;
        self.parse_response(&response);
        Ok(())
    }

    fn name(&self) -> &str {
        self.predict.name()
    }
}
