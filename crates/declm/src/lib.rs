// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! # declm - Declarative Language-Model Programs
//!
//! Compose programs that call a language model through typed input/output
//! contracts instead of hand-written prompt strings.
//!
//! ## Architecture
//!
//! - **Signatures**: each module type declares its typed input and output
//!   fields once, through [`Declare`]; every instance shares the result.
//! - **Modules**: [`Module::call`] binds named inputs, runs `forward`, and
//!   returns the declared outputs.
//! - **Predict / ChainOfThought**: render a prompt, call a [`LanguageModel`],
//!   parse the completion into outputs.
//! - **RAG**: [`Rag`] feeds retrieved documents to a generator module as
//!   `context`.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use declm::prelude::*;
//!
//! struct Qa;
//!
//! impl Declare for Qa {
//!     fn declare(sig: &mut Signature) -> Result<()> {
//!         sig.add_input("question", TypeTag::String, Some("The question to answer"), None)?;
//!         sig.add_output("answer", TypeTag::String, Some("The answer to the question"))?;
//!         Ok(())
//!     }
//! }
//!
//! let lm = Arc::new(MockLm::new(|prompt| {
//!     if prompt.contains("France") { "Paris".into() } else { "unknown".into() }
//! }));
//!
//! let mut qa = Predict::with_lm::<Qa>(lm).unwrap();
//! let out = qa.call(inputs! { "question" => "What is the capital of France?" }).unwrap();
//! assert_eq!(out.get_str("answer"), Some("Paris"));
//! ```
//!
//! ## Feature Flags
//!
//! - `tracing` (default): spans and events through the `tracing` crate
//! - `yaml`: load [`Settings`] from YAML files

#![warn(missing_docs)]
#![allow(clippy::new_ret_no_self)]
#![allow(clippy::type_complexity)]

pub mod error;
pub mod field;
pub mod lm;
pub mod module;
pub mod modules;
pub mod predict;
pub mod prediction;
pub mod prompt;
pub mod rag;
pub mod retrieve;
pub mod settings;
pub mod signature;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use field::{Field, FieldRole, InputField, OutputField, TypeTag};
pub use lm::{CompletionOptions, LanguageModel};
pub use module::{FnModule, Module, ModuleState};
pub use modules::ChainOfThought;
pub use predict::Predict;
pub use prediction::Prediction;
pub use rag::Rag;
pub use retrieve::{Document, FnRetriever, Retriever, SimpleRetriever};
pub use settings::{LogLevel, Settings};
pub use signature::{signature_of, Declare, Signature, SignatureBuilder};
pub use types::{FieldMap, Inputs};
pub use value::Value;

/// Prelude module for convenient imports.
pub mod prelude {
    // Error handling
    pub use crate::{Error, Result};

    // Core types
    pub use crate::{
        signature_of, Declare, Field, FieldMap, FieldRole, InputField, Inputs, Module,
        ModuleState, OutputField, Prediction, Signature, SignatureBuilder, TypeTag, Value,
    };

    // Modules
    pub use crate::{ChainOfThought, FnModule, Predict, Rag};

    // Retrieval
    pub use crate::{Document, FnRetriever, Retriever, SimpleRetriever};

    // Language models
    pub use crate::lm::{FailingLm, MockLm, RecordingLm, SequenceLm};
    pub use crate::{CompletionOptions, LanguageModel};

    // Configuration
    pub use crate::settings::{configure, settings};
    pub use crate::{LogLevel, Settings};

    pub use crate::inputs;
}

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
