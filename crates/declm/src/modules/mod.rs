// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Reasoning strategies built on [`Predict`](crate::predict::Predict)

pub mod chain_of_thought;

pub use chain_of_thought::{is_answer_cue, is_reasoning_cue, segment, ChainOfThought, Segments};
