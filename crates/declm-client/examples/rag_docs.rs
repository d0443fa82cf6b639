// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Retrieval-augmented QA over a small in-memory corpus
//!
//! ```bash
//! ANTHROPIC_API_KEY=sk-ant-... cargo run -p declm-client --example rag_docs
//! ```

use declm::prelude::*;
use declm::rag::CONTEXT_FIELD;
use declm_client::ApiLm;
use std::sync::Arc;

struct ContextQa;

impl Declare for ContextQa {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("question", TypeTag::String, Some("The question to answer"), None)?;
        sig.add_input(
            CONTEXT_FIELD,
            TypeTag::String,
            Some("Relevant context for answering the question"),
            None,
        )?;
        sig.add_output(
            "answer",
            TypeTag::String,
            Some("The answer to the question based on the context"),
        )?;
        Ok(())
    }
}

struct RubyDocsQa;

impl Declare for RubyDocsQa {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("question", TypeTag::String, Some("The question about Ruby to answer"), None)?;
        sig.add_output("answer", TypeTag::String, Some("The answer to the question about Ruby"))?;
        Ok(())
    }
}

fn corpus() -> Vec<Document> {
    [
        "Ruby is a dynamic, open source programming language with a focus on simplicity and productivity. It has an elegant syntax that is natural to read and easy to write.",
        "Python is a programming language that lets you work quickly and integrate systems more effectively. It supports multiple programming paradigms.",
        "JavaScript is a scripting language that enables you to create dynamically updating content, control multimedia, animate images, and much more.",
        "Ruby on Rails is a web application framework written in Ruby. It is designed to make programming web applications easier by making assumptions about what every developer needs to get started.",
        "Sinatra is a DSL for quickly creating web applications in Ruby with minimal effort. It's not a full MVC framework like Rails, but can be used for small applications or APIs.",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, text)| Document::new(i + 1, text))
    .collect()
}

fn context_prompt(state: &ModuleState) -> String {
    format!(
        "Please answer the question based only on the provided context. \
         If the context doesn't contain the answer, say \"I don't have enough information to answer this question.\"\n\
         \n\
         Context:\n{}\n\
         \n\
         Question: {}\n\
         \n\
         Answer:\n",
        state.value(CONTEXT_FIELD),
        state.value("question"),
    )
}

fn main() -> Result<()> {
    let lm: Arc<dyn LanguageModel> = Arc::new(ApiLm::from_env()?);

    let generator = Predict::with_lm::<ContextQa>(lm)?.with_prompt_fn(context_prompt);
    let mut rag = Rag::new::<RubyDocsQa>(SimpleRetriever::new(corpus()), generator)?.with_num_docs(2);

    for question in [
        "What is Ruby on Rails?",
        "What is Sinatra?",
        "What programming language has a focus on simplicity?",
    ] {
        let result = rag.call(inputs! { "question" => question })?;
        println!("Question: {}", question);
        println!("Answer: {}", result.get_str("answer").unwrap_or_default());
        println!();
    }

    Ok(())
}
