// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Core type definitions

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field name to value map
pub type FieldMap = HashMap<String, Value>;

/// Named bindings passed to [`Module::call`](crate::module::Module::call).
///
/// Keys that do not name a declared field are ignored by the receiving module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inputs {
    fields: FieldMap,
}

impl Inputs {
    /// Create new inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Insert a field, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check for no bindings
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over bindings
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Get all fields
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Unwrap into the underlying map
    pub fn into_inner(self) -> FieldMap {
        self.fields
    }
}

impl From<FieldMap> for Inputs {
    fn from(fields: FieldMap) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Inputs {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Build [`Inputs`] from `key => value` pairs.
///
/// ```
/// let inputs = declm::inputs! { "name" => "Bob", "age" => 25 };
/// assert_eq!(inputs.len(), 2);
/// ```
#[macro_export]
macro_rules! inputs {
    () => {
        $crate::types::Inputs::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut inputs = $crate::types::Inputs::new();
        $(inputs.insert($key, $value);)+
        inputs
    }};
}
