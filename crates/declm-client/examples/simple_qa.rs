// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Question answering with Predict and ChainOfThought
//!
//! Registers an [`ApiLm`] as the process default, then asks one direct
//! question and one that benefits from step-by-step reasoning.
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run -p declm-client --example simple_qa
//! ```

use declm::prelude::*;
use declm_client::ApiLm;
use std::sync::Arc;

struct Qa;

impl Declare for Qa {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("question", TypeTag::String, Some("The question to answer"), None)?;
        sig.add_output("answer", TypeTag::String, Some("The answer to the question"))?;
        Ok(())
    }
}

struct QaWithCot;

impl Declare for QaWithCot {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("question", TypeTag::String, Some("The question to answer"), None)?;
        sig.add_output("answer", TypeTag::String, Some("The answer to the question"))?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let lm = ApiLm::from_env()?;
    println!("Using {} ({})\n", lm.model_name(), lm.provider());
    configure(|s| s.default_lm = Some(Arc::new(lm)));

    let question = "What is the capital of France?";
    let mut qa = Predict::new::<Qa>()?;
    let result = qa.call(inputs! { "question" => question })?;
    println!("Simple QA:");
    println!("Question: {}", question);
    println!("Answer: {}", result.get_str("answer").unwrap_or_default());
    println!();

    let question = "If a train travels at 120 km/h, how far will it go in 2.5 hours?";
    let mut cot = ChainOfThought::new::<QaWithCot>()?;
    let result = cot.call(inputs! { "question" => question })?;
    println!("Chain of Thought QA:");
    println!("Question: {}", question);
    println!("Reasoning: {}", cot.reasoning().unwrap_or_default());
    println!("Answer: {}", result.get_str("answer").unwrap_or_default());

    Ok(())
}
