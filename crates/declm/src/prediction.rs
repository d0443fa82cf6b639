// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Prediction results from module execution

use crate::types::FieldMap;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Output values returned by [`Module::call`](crate::module::Module::call).
///
/// Holds one entry per declared output field, never the inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prediction {
    /// Output fields
    pub outputs: FieldMap,
}

impl Prediction {
    /// Create a new prediction
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with outputs
    pub fn with_outputs(outputs: FieldMap) -> Self {
        Self { outputs }
    }

    /// Get an output field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.outputs.get(key)
    }

    /// Get an output field as text, if it holds a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.outputs.get(key).and_then(Value::as_str)
    }

    /// Check whether an output is present
    pub fn contains(&self, key: &str) -> bool {
        self.outputs.contains_key(key)
    }

    /// Insert an output field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.outputs.insert(key.into(), value.into());
    }

    /// Number of outputs
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Check for no outputs
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Iterate over outputs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.outputs.iter()
    }

    /// Unwrap into the underlying map
    pub fn into_inner(self) -> FieldMap {
        self.outputs
    }
}

impl From<FieldMap> for Prediction {
    fn from(outputs: FieldMap) -> Self {
        Self { outputs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_creation() {
        let pred = Prediction::new();
        assert!(pred.is_empty());
    }

    #[test]
    fn test_prediction_insert_and_get() {
        let mut pred = Prediction::new();
        pred.insert("answer", "42");
        pred.insert("confidence", 0.95);

        assert_eq!(pred.get_str("answer"), Some("42"));
        assert_eq!(pred.get("confidence"), Some(&Value::from(0.95)));
        assert_eq!(pred.get_str("confidence"), None);
        assert!(pred.contains("answer"));
        assert_eq!(pred.len(), 2);
    }

    #[test]
    fn test_prediction_null_output_is_present() {
        let mut pred = Prediction::new();
        pred.insert("answer", Value::Null);
        assert!(pred.contains("answer"));
        assert_eq!(pred.get_str("answer"), None);
    }
}
