// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Integration tests for field declaration and validation

use declm::*;
use std::collections::BTreeMap;

struct Profile;

impl Declare for Profile {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("name", TypeTag::String, Some("Full name"), None)?;
        sig.add_input("age", TypeTag::Integer, None, Some(Value::from(30)))?;
        sig.add_input("height", TypeTag::Float, None, None)?;
        sig.add_input("tags", TypeTag::List, None, None)?;
        sig.add_output("summary", TypeTag::String, Some("One line"))?;
        sig.add_output("score", TypeTag::Float, None)?;
        Ok(())
    }
}

struct DuplicateInputs;

impl Declare for DuplicateInputs {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("q", TypeTag::String, None, None)?;
        sig.add_input("q", TypeTag::String, None, None)?;
        Ok(())
    }
}

#[test]
fn test_declaration_order_is_kept() {
    let sig = signature_of::<Profile>().unwrap();
    let inputs: Vec<&str> = sig.input_fields.iter().map(|f| f.name.as_str()).collect();
    let outputs: Vec<&str> = sig.output_fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(inputs, vec!["name", "age", "height", "tags"]);
    assert_eq!(outputs, vec!["summary", "score"]);
    assert_eq!(sig.first_input().unwrap().name, "name");
    assert_eq!(sig.first_output().unwrap().name, "summary");
}

#[test]
fn test_signature_shared_across_instances() {
    let a = ModuleState::of::<Profile>().unwrap();
    let b = ModuleState::of::<Profile>().unwrap();
    assert!(std::ptr::eq(a.signature(), b.signature()));
}

#[test]
fn test_duplicate_field_rejected() {
    let err = signature_of::<DuplicateInputs>().unwrap_err();
    assert!(matches!(err, Error::Signature(_)));
    assert_eq!(err.category(), "signature");
}

#[test]
fn test_validate_by_shape() {
    let sig = signature_of::<Profile>().unwrap();
    let mut values = FieldMap::new();
    values.insert("name".into(), "Ann".into());
    values.insert("age".into(), 41.into());
    values.insert("height".into(), 1.7.into());
    values.insert("tags".into(), vec!["a", "b"].into());
    assert!(sig.validate_inputs(&values));

    values.insert("height".into(), 2.into());
    assert!(!sig.validate_inputs(&values), "integer is not a float");
}

#[test]
fn test_missing_defaulted_input_is_invalid() {
    let sig = signature_of::<Profile>().unwrap();
    let values = FieldMap::new();
    // `age` declares a default, so an absent value does not validate.
    assert!(!sig.validate_inputs(&values));
    assert!(sig.validate_outputs(&values));
}

#[test]
fn test_class_and_dict_tags() {
    let mut sig = Signature::new();
    sig.add_input("when", TypeTag::class("Date"), None, None).unwrap();
    sig.add_input("meta", TypeTag::Dict, None, None).unwrap();

    let mut values = FieldMap::new();
    values.insert("when".into(), Value::object("Date", "2024-01-01"));
    values.insert("meta".into(), Value::Dict(BTreeMap::new()));
    assert!(sig.validate_inputs(&values));

    values.insert("when".into(), Value::object("Time", "12:00"));
    assert!(!sig.validate_inputs(&values));
}

#[test]
fn test_parse_and_builder_agree() {
    let parsed = Signature::parse("question, context -> answer").unwrap();
    let built = SignatureBuilder::new()
        .input(InputField::create("question", TypeTag::String))
        .unwrap()
        .input(InputField::create("context", TypeTag::String))
        .unwrap()
        .output(OutputField::create("answer", TypeTag::String))
        .unwrap()
        .build();
    assert_eq!(parsed, built);
    assert_eq!(built.to_string_format(), "question, context -> answer");
}

#[test]
fn test_parse_rejects_malformed() {
    assert!(Signature::parse("no arrow here").is_err());
    assert!(Signature::parse("a -> b -> c").is_err());
    assert!(Signature::parse("a, a -> b").is_err());
    assert!(Signature::parse("a: -> b").is_err());
}

#[test]
fn test_signature_serde() {
    let sig = signature_of::<Profile>().unwrap();
    let json = serde_json::to_string(sig).unwrap();
    let back: Signature = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, sig);
}
