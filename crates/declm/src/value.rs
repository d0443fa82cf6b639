// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Dynamically-typed values bound to module fields.
//!
//! A [`Value`] is what a field holds at runtime. Its shape is checked against
//! a field's [`TypeTag`](crate::field::TypeTag) by
//! [`Field::is_valid`](crate::field::Field::is_valid), and its [`Display`]
//! form is what gets substituted into prompts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A field value.
///
/// `Null` doubles as "absent": unset fields and missing map keys read as `Null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Text
    String(String),
    /// Ordered list
    List(Vec<Value>),
    /// Instance of a nominal class
    Object(Object),
    /// String-keyed dictionary
    Dict(BTreeMap<String, Value>),
}

/// A value tagged with the name of the class it is an instance of.
///
/// Nominal field types (`TypeTag::Class`) only accept objects whose class
/// name matches exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Object {
    /// Class name
    #[serde(rename = "$class")]
    pub class: String,
    /// Payload
    pub value: Box<Value>,
}

impl Value {
    /// Create an instance of a nominal class.
    pub fn object(class: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Object(Object {
            class: class.into(),
            value: Box::new(value.into()),
        })
    }

    /// Check for `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer payload, if any.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Class name of an `Object` value.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Object(obj) => Some(&obj.class),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in logs and `Display` of defaults.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Object(_) => "object",
            Self::Dict(_) => "dict",
        }
    }

    /// Debug-style rendering: strings are quoted, everything else as displayed.
    pub fn inspect(&self) -> String {
        match self {
            Self::Null => "nil".to_string(),
            Self::String(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    /// The string form used for prompt substitution. `Null` renders empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(n) => fmt_float(*n, f),
            Self::String(s) => f.write_str(s),
            Self::List(_) | Self::Dict(_) | Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Floats always show a fractional part so `3.0` never reads as an integer.
fn fmt_float(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() < 1e16 {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Float(n.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Dict(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string_forms() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(3.0).to_string(), "3.0");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1,2]");
    }

    #[test]
    fn test_display_containers_as_json() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), Value::from(1));
        assert_eq!(Value::Dict(map).to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_object_class_name() {
        let point = Value::object("Point", vec![1, 2]);
        assert_eq!(point.class_name(), Some("Point"));
        assert_eq!(point.kind(), "object");
        assert_eq!(Value::from("p").class_name(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<&str>).is_null());
        assert_eq!(Value::from(Some("x")), "x");
    }

    #[test]
    fn test_deserialize_shapes() {
        let v: Value = serde_json::from_str(r#"[null, true, 1, 1.5, "s", {"k": 2}]"#).unwrap();
        let Value::List(items) = v else {
            panic!("expected list");
        };
        assert!(items[0].is_null());
        assert_eq!(items[1].as_bool(), Some(true));
        assert_eq!(items[2].as_i64(), Some(1));
        assert_eq!(items[3].as_f64(), Some(1.5));
        assert_eq!(items[4], "s");
        assert_eq!(items[5].kind(), "dict");
    }

    #[test]
    fn test_deserialize_object() {
        let v: Value = serde_json::from_str(r#"{"$class": "Point", "value": [1, 2]}"#).unwrap();
        assert_eq!(v.class_name(), Some("Point"));

        // Extra keys fall back to a plain dict.
        let v: Value =
            serde_json::from_str(r#"{"$class": "Point", "value": 1, "other": 2}"#).unwrap();
        assert_eq!(v.kind(), "dict");
    }

    #[test]
    fn test_inspect() {
        assert_eq!(Value::from("hi").inspect(), "\"hi\"");
        assert_eq!(Value::from(30).inspect(), "30");
        assert_eq!(Value::Null.inspect(), "nil");
    }
}
