// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Benchmarks for prompt rendering, response segmentation and retrieval.
//!
//! These measure the framework's own overhead with in-process models.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use declm::lm::MockLm;
use declm::modules::chain_of_thought::segment;
use declm::*;
use std::sync::Arc;

struct Qa;

impl Declare for Qa {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("question", TypeTag::String, Some("The question to answer"), None)?;
        sig.add_input("context", TypeTag::String, Some("Supporting text"), None)?;
        sig.add_output("answer", TypeTag::String, Some("The answer"))?;
        Ok(())
    }
}

fn bench_prompts(c: &mut Criterion) {
    let mut predict = Predict::with_lm::<Qa>(Arc::new(MockLm::fixed("ok"))).unwrap();
    predict.bind(inputs! {
        "question" => "What is the capital of France?",
        "context" => "France is a country in Western Europe. Its capital is Paris.",
    });

    c.bench_function("default_prompt", |b| b.iter(|| black_box(predict.generate_prompt())));

    let templated = predict
        .clone()
        .with_template("Context: {context}\nQuestion: {question}\nAnswer:");
    c.bench_function("template_prompt", |b| b.iter(|| black_box(templated.generate_prompt())));

    c.bench_function("predict_call", |b| {
        b.iter(|| predict.call(black_box(Inputs::new())).unwrap())
    });
}

fn bench_segment(c: &mut Criterion) {
    let with_cue = "Step 1: 120 km/h for 2 hours is 240 km.\n\
                    Step 2: half an hour adds 60 km.\n\
                    Therefore, the train travels 300 km.";
    let without_cue: String = (0..40).map(|i| format!("line {}\n", i)).collect();

    c.bench_function("segment_with_cue", |b| b.iter(|| segment(black_box(with_cue))));
    c.bench_function("segment_fallback_40_lines", |b| {
        b.iter(|| segment(black_box(&without_cue)))
    });
}

fn bench_retrieve(c: &mut Criterion) {
    let docs: Vec<Document> = (0..500)
        .map(|i| Document::new(i, format!("document {} about topic {} and ruby {}", i, i % 7, i % 3)))
        .collect();
    let retriever = SimpleRetriever::new(docs);

    c.bench_function("simple_retrieve_500", |b| {
        b.iter(|| retriever.retrieve(black_box("ruby topic 3"), 5).unwrap())
    });
}

criterion_group!(benches, bench_prompts, bench_segment, bench_retrieve);
criterion_main!(benches);
