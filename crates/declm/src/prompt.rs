// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Prompt rendering from module state.
//!
//! The default layout is a sequence of blocks separated by a blank line:
//!
//! ```text
//! Task:
//!
//! Generate the following: answer (The answer), confidence
//!
//! <instruction, when given>
//!
//! Question:
//!
//! What is the capital of France?
//! ```

use crate::module::ModuleState;
use std::fmt::Write;
use std::sync::Arc;

/// Separator between prompt blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// First block of every default prompt.
pub const TASK_HEADER: &str = "Task:";

/// Instruction inserted by chain-of-thought prompting.
pub const STEP_BY_STEP: &str =
    "Let's think through this step by step to ensure we have the right answer.";

/// Caller-supplied prompt body, replacing the default layout.
pub type PromptFn = Arc<dyn Fn(&ModuleState) -> String + Send + Sync>;

/// Replace each `{input}` placeholder with the input's string form.
///
/// Only declared inputs are substituted; other placeholders stay verbatim.
pub fn fill_template(template: &str, state: &ModuleState) -> String {
    let mut result = template.to_string();
    for field in &state.signature().input_fields {
        let placeholder = format!("{{{}}}", field.name);
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, &state.value(&field.name).to_string());
        }
    }
    result
}

/// `Generate the following: a (desc), b`, or `None` without outputs.
pub fn output_description(state: &ModuleState) -> Option<String> {
    let outputs = &state.signature().output_fields;
    if outputs.is_empty() {
        return None;
    }
    let mut line = String::from("Generate the following: ");
    for (i, field) in outputs.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        line.push_str(&field.name);
        if let Some(ref desc) = field.description {
            let _ = write!(line, " ({})", desc);
        }
    }
    Some(line)
}

/// Render the default prompt, optionally with an instruction block placed
/// between the task description and the inputs.
pub fn default_prompt(state: &ModuleState, instruction: Option<&str>) -> String {
    let mut buf = String::with_capacity(256);
    buf.push_str(TASK_HEADER);

    if let Some(desc) = output_description(state) {
        buf.push_str(BLOCK_SEPARATOR);
        buf.push_str(&desc);
    }

    if let Some(instruction) = instruction {
        buf.push_str(BLOCK_SEPARATOR);
        buf.push_str(instruction);
    }

    for field in &state.signature().input_fields {
        let _ = write!(
            buf,
            "{sep}{}:{sep}{}",
            field.label(),
            state.value(&field.name),
            sep = BLOCK_SEPARATOR
        );
    }

    buf
}
