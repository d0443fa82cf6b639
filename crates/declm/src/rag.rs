// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Retrieval-augmented generation.
//!
//! [`Rag`] uses its first input as the query, retrieves `num_docs`
//! documents, renders them into a `context` string, and calls a generator
//! module with every Rag input plus that `context`. Outputs the generator
//! shares by name with the Rag are copied back.

use crate::error::{Error, Result};
use crate::module::{Module, ModuleState};
use crate::retrieve::{Document, Retriever};
use crate::signature::{signature_of, Declare, Signature};
use crate::types::Inputs;
use std::fmt;

/// Name of the generator input receiving the rendered documents.
pub const CONTEXT_FIELD: &str = "context";

/// Documents retrieved per call unless configured otherwise.
pub const DEFAULT_NUM_DOCS: usize = 3;

/// Render documents as a prompt context block.
///
/// Empty for no documents.
pub fn format_documents(documents: &[Document]) -> String {
    if documents.is_empty() {
        return String::new();
    }
    let mut parts = Vec::with_capacity(documents.len() * 2 + 2);
    parts.push("Here are some relevant documents:".to_string());
    for (i, doc) in documents.iter().enumerate() {
        parts.push(format!("[Document {}]", i + 1));
        parts.push(doc.text.to_string());
    }
    parts.push("Please use these documents to help answer the question.".to_string());
    parts.join("\n\n")
}

/// Retrieval-augmented generation module.
pub struct Rag {
    state: ModuleState,
    retriever: Box<dyn Retriever>,
    generator: Box<dyn Module>,
    num_docs: usize,
    name: &'static str,
}

impl Rag {
    /// Create a RAG module for `T`'s signature.
    ///
    /// Fails with [`Error::Signature`] when `T` declares no inputs.
    pub fn new<T: Declare>(
        retriever: impl Retriever + 'static,
        generator: impl Module + 'static,
    ) -> Result<Self> {
        Self::from_parts(
            std::any::type_name::<T>(),
            signature_of::<T>()?,
            Box::new(retriever),
            Box::new(generator),
        )
    }

    /// Create a RAG module over an explicit signature.
    pub fn from_parts(
        name: &'static str,
        signature: &'static Signature,
        retriever: Box<dyn Retriever>,
        generator: Box<dyn Module>,
    ) -> Result<Self> {
        if signature.first_input().is_none() {
            return Err(Error::signature(format!(
                "{} needs at least one input to use as the query",
                name
            )));
        }
        Ok(Self {
            state: ModuleState::new(signature),
            retriever,
            generator,
            num_docs: DEFAULT_NUM_DOCS,
            name,
        })
    }

    /// Set how many documents to retrieve per call.
    pub fn with_num_docs(mut self, num_docs: usize) -> Self {
        self.num_docs = num_docs;
        self
    }

    /// Documents retrieved per call.
    #[inline]
    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    /// The retriever.
    pub fn retriever(&self) -> &dyn Retriever {
        self.retriever.as_ref()
    }

    /// The generator module.
    pub fn generator(&self) -> &dyn Module {
        self.generator.as_ref()
    }

    /// Mutable access to the generator module.
    pub fn generator_mut(&mut self) -> &mut dyn Module {
        self.generator.as_mut()
    }

    /// String form of the first input.
    pub fn query(&self) -> String {
        self.state
            .signature()
            .first_input()
            .map(|f| self.state.value(&f.name).to_string())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Rag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rag")
            .field("name", &self.name)
            .field("generator", &self.generator.name())
            .field("num_docs", &self.num_docs)
            .field("state", &self.state)
            .finish()
    }
}

impl Module for Rag {
    fn state(&self) -> &ModuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModuleState {
        &mut self.state
    }

    fn forward(&mut self) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("rag", module = self.name, num_docs = self.num_docs).entered();

        let query = self.query();
        let documents = self.retriever.retrieve(&query, self.num_docs)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(retrieved = documents.len(), "documents retrieved");

        let mut inputs: Inputs = self.state.inputs().into();
        inputs.insert(CONTEXT_FIELD, format_documents(&documents));

        let results = self.generator.call(inputs)?;
        for field in &self.state.signature().output_fields {
            if let Some(value) = results.get(&field.name) {
                self.state.set(&field.name, value.clone());
            }
        }
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
    use crate::module::FnModule;
    use crate::retrieve::{FnRetriever, SimpleRetriever};
    use crate::value::Value;

    struct Docs;

    impl Declare for Docs {
        fn declare(sig: &mut Signature) -> Result<()> {
            sig.add_input("question", TypeTag::String, None, None)?;
            sig.add_output("answer", TypeTag::String, None)?;
            sig.add_output("sources", TypeTag::String, None)?;
            Ok(())
        }
    }

    struct Gen;

    impl Declare for Gen {
        fn declare(sig: &mut Signature) -> Result<()> {
            sig.add_input("question", TypeTag::String, None, None)?;
            sig.add_input(CONTEXT_FIELD, TypeTag::String, None, None)?;
            sig.add_output("answer", TypeTag::String, None)?;
            Ok(())
        }
    }

    struct Empty;

    impl Declare for Empty {
        fn declare(sig: &mut Signature) -> Result<()> {
            sig.add_output("answer", TypeTag::String, None)?;
            Ok(())
        }
    }

    fn echo_context() -> impl Module {
        FnModule::declared::<Gen>(|state: &mut ModuleState| {
            let answer = format!("{} | {}", state.value("question"), state.value(CONTEXT_FIELD));
            state.set("answer", answer);
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn test_format_documents() {
        assert_eq!(format_documents(&[]), "");
        let docs = [Document::new(1, "alpha"), Document::new(2, "beta")];
        assert_eq!(
            format_documents(&docs),
            "Here are some relevant documents:\n\n[Document 1]\n\nalpha\n\n[Document 2]\n\nbeta\n\n\
             Please use these documents to help answer the question."
        );
    }

    #[test]
    fn test_rejects_signature_without_inputs() {
        let err = Rag::new::<Empty>(SimpleRetriever::default(), echo_context()).unwrap_err();
        assert!(matches!(err, Error::Signature(_)));
    }

    #[test]
    fn test_defaults_and_copy_back() {
        let retriever = SimpleRetriever::new(vec![Document::new(1, "cats purr")]);
        let mut rag = Rag::new::<Docs>(retriever, echo_context()).unwrap();
        assert_eq!(rag.num_docs(), DEFAULT_NUM_DOCS);

        let out = rag.call(Inputs::new().with("question", "cats")).unwrap();
        let answer = out.get_str("answer").unwrap();
        assert!(answer.starts_with("cats | Here are some relevant documents:"));
        assert!(answer.contains("cats purr"));
        // Not produced by the generator.
        assert_eq!(out.get("sources"), Some(&Value::Null));
    }

    #[test]
    fn test_query_and_k_passed_to_retriever() {
        let retriever = FnRetriever::new(|q: &str, k: usize| {
            assert_eq!(q, "what");
            assert_eq!(k, 5);
            Ok(Vec::new())
        });
        let mut rag = Rag::new::<Docs>(retriever, echo_context())
            .unwrap()
            .with_num_docs(5);
        let out = rag.call(Inputs::new().with("question", "what")).unwrap();
        assert_eq!(out.get_str("answer"), Some("what | "));
    }

    #[test]
    fn test_retrieval_error_propagates() {
        let retriever = FnRetriever::new(|_: &str, _: usize| Err(Error::retrieval("index offline")));
        let mut rag = Rag::new::<Docs>(retriever, echo_context()).unwrap();
        assert!(matches!(rag.call(Inputs::new()), Err(Error::Retrieval(_))));
    }
}
