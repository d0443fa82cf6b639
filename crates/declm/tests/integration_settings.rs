// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Integration tests for process-wide settings.
//!
//! The settings slot is global, so everything that touches it lives in a
//! single test function.

use declm::lm::MockLm;
use declm::settings::{self, ENV_LOG_LEVEL};
use declm::*;
use std::path::PathBuf;
use std::sync::Arc;

struct Qa;

impl Declare for Qa {
    fn declare(sig: &mut Signature) -> Result<()> {
        sig.add_input("question", TypeTag::String, None, None)?;
        sig.add_output("answer", TypeTag::String, None)?;
        Ok(())
    }
}

#[test]
fn test_default_lm_lifecycle() {
    settings::reset();

    // Nothing configured.
    let err = Predict::new::<Qa>().unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(ChainOfThought::new::<Qa>().is_err());

    // Configured default is picked up at construction.
    settings::configure(|s| {
        s.default_lm = Some(Arc::new(MockLm::fixed("from default")));
        s.cache_dir = PathBuf::from("/tmp/declm-test");
        s.log_level = LogLevel::Debug;
    });
    let snapshot = settings::settings();
    assert_eq!(snapshot.cache_dir, PathBuf::from("/tmp/declm-test"));
    assert_eq!(snapshot.log_level, LogLevel::Debug);

    let mut qa = Predict::new::<Qa>().unwrap();
    assert_eq!(qa.lm().model_name(), "mock");
    let out = qa.call(inputs! { "question" => "?" }).unwrap();
    assert_eq!(out.get_str("answer"), Some("from default"));

    // An explicit model wins over the default.
    let mut explicit = Predict::with_lm::<Qa>(Arc::new(MockLm::fixed("explicit"))).unwrap();
    assert_eq!(
        explicit.call(Inputs::new()).unwrap().get_str("answer"),
        Some("explicit")
    );

    // Existing modules keep the model they were built with.
    settings::reset();
    assert!(settings::default_lm().is_none());
    assert_eq!(qa.call(Inputs::new()).unwrap().get_str("answer"), Some("from default"));
    assert!(Predict::new::<Qa>().is_err());
}

#[test]
fn test_env_overrides_without_global_state() {
    let mut s = Settings::default();
    s.apply_env(|key| (key == ENV_LOG_LEVEL).then(|| "error".to_string()))
        .unwrap();
    assert_eq!(s.log_level, LogLevel::Error);
    assert!(s.default_lm.is_none());
}
