// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Property-based tests for the text parsers: signature strings, type tags,
//! chain-of-thought segmentation, template filling and retrieval ranking.

use declm::modules::chain_of_thought::{is_answer_cue, segment};
use declm::prompt::fill_template;
use declm::*;
use proptest::prelude::*;

struct Echo;

impl Declare for Echo {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("question", TypeTag::String, None, None)?;
        sig.add_output("answer", TypeTag::String, None)?;
        Ok(())
    }
}

proptest! {
    /// Signature parsing never panics on arbitrary input.
    #[test]
    fn signature_parse_never_panics(text in "\\PC{0,200}") {
        let _ = Signature::parse(&text);
    }

    /// Well-formed signature strings keep their field order.
    #[test]
    fn signature_parse_keeps_order(
        inputs in prop::collection::btree_set("[a-z][a-z_]{0,8}", 1..5),
        outputs in prop::collection::btree_set("[a-z][a-z_]{0,8}", 1..4),
    ) {
        let inputs: Vec<String> = inputs.into_iter().collect();
        let outputs: Vec<String> = outputs.into_iter().collect();
        let text = format!("{} -> {}", inputs.join(", "), outputs.join(", "));
        let sig = Signature::parse(&text).unwrap();
        let got: Vec<&str> = sig.input_fields.iter().map(|f| f.name.as_str()).collect();
        prop_assert_eq!(got, inputs.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(sig.to_string_format(), text);
    }

    /// Alphabetic tag names parse and display back to an equal tag.
    #[test]
    fn type_tag_display_reparses(text in "[A-Za-z]{1,12}") {
        let tag: TypeTag = text.parse().unwrap();
        let again: TypeTag = tag.to_string().parse().unwrap();
        prop_assert_eq!(tag, again);
    }

    /// Segmentation never panics and never invents text.
    #[test]
    fn segment_never_panics(text in "\\PC{0,300}(\n\\PC{0,40}){0,8}") {
        let s = segment(&text);
        prop_assert!(text.contains(s.answer.as_str()));
        prop_assert!(text.contains(s.reasoning.as_str()));
    }

    /// With a cue line, the answer starts at that line.
    #[test]
    fn segment_answer_starts_at_cue(
        before in prop::collection::vec("[a-z ]{1,20}", 0..5),
        answer in "[a-z ]{0,20}",
    ) {
        let mut lines = before.clone();
        lines.push(format!("Therefore, {}", answer));
        let s = segment(&lines.join("\n"));
        prop_assert!(s.answer.starts_with("Therefore,"));
        prop_assert_eq!(s.reasoning, before.join("\n").trim().to_string());
    }

    /// Cue-free responses put at most two lines in the answer.
    #[test]
    fn segment_fallback_is_bounded(lines in prop::collection::vec("[a-z]{1,10}", 1..10)) {
        prop_assume!(lines.iter().all(|l| !is_answer_cue(l)));
        let s = segment(&lines.join("\n"));
        let answer_lines = s.answer.lines().count();
        prop_assert!(answer_lines >= 1 && answer_lines <= 2);
    }

    /// Template filling substitutes every occurrence and leaves the rest alone.
    #[test]
    fn fill_template_substitutes(value in "[^{}]{0,30}", prefix in "[^{}]{0,20}") {
        let mut state = ModuleState::of::<Echo>().unwrap();
        state.set("question", value.as_str());
        let template = format!("{}{{question}}|{{question}}|{{other}}", prefix);
        let filled = fill_template(&template, &state);
        prop_assert_eq!(filled, format!("{}{}|{}|{{other}}", prefix, value, value));
    }

    /// Retrieval returns at most k documents and never more than the corpus.
    #[test]
    fn retrieve_is_bounded(
        texts in prop::collection::vec("[a-z ]{0,40}", 0..12),
        query in "[a-z ]{0,20}",
        k in 0usize..15,
    ) {
        let retriever = SimpleRetriever::new(
            texts.iter().enumerate().map(|(i, t)| Document::new(i, t.as_str())).collect(),
        );
        let docs = retriever.retrieve(&query, k).unwrap();
        prop_assert_eq!(docs.len(), k.min(texts.len()));
    }
}
