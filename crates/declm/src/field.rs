// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Field definitions for signatures

use crate::error::{Error, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a field within its signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Input field
    Input,
    /// Output field
    Output,
}

/// Declared type of a field.
///
/// The set is closed. `Unknown` only comes out of parsing a lower-case tag
/// name that is not recognized, and no value ever validates against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TypeTag {
    /// Text
    String,
    /// Whole number
    Integer,
    /// Floating point number
    Float,
    /// `true` / `false`
    Boolean,
    /// Ordered list
    List,
    /// String-keyed dictionary
    Dict,
    /// Accepts every value
    Any,
    /// Instance of the named class
    Class(String),
    /// Unrecognized tag
    Unknown(String),
}

impl TypeTag {
    /// Create a nominal class tag.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Check whether `value`'s runtime shape matches this tag.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::String, Value::String(_)) => true,
            (Self::Integer, Value::Integer(_)) => true,
            (Self::Float, Value::Float(_)) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::List, Value::List(_)) => true,
            (Self::Dict, Value::Dict(_)) => true,
            (Self::Class(name), Value::Object(obj)) => obj.class == *name,
            _ => false,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::List => f.write_str("list"),
            Self::Dict => f.write_str("dict"),
            Self::Any => f.write_str("any"),
            Self::Class(name) | Self::Unknown(name) => f.write_str(name),
        }
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    /// Parse a tag name. Capitalized names are nominal classes.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let tag = match s {
            "" => return Err(Error::parse("empty type tag")),
            "string" | "str" => Self::String,
            "integer" | "int" => Self::Integer,
            "float" => Self::Float,
            "boolean" | "bool" => Self::Boolean,
            "list" | "array" => Self::List,
            "dict" | "hash" => Self::Dict,
            "any" => Self::Any,
            other if other.starts_with(|c: char| c.is_uppercase()) => {
                Self::Class(other.to_string())
            }
            other => Self::Unknown(other.to_string()),
        };
        Ok(tag)
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for TypeTag {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A named, typed field in a signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeTag,

    /// Field description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default value for inputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Input or output
    pub role: FieldRole,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, ty: TypeTag, role: FieldRole) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
            default: None,
            role,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Validate a value against this field's type.
    ///
    /// `Null` is accepted only when no default is declared. Never fails.
    pub fn is_valid(&self, value: &Value) -> bool {
        if value.is_null() && self.default.is_none() {
            return true;
        }
        self.ty.matches(value)
    }

    /// Human-readable label used by prompt formatting.
    pub fn label(&self) -> String {
        humanize(&self.name)
    }

    /// Check if this is an input field.
    #[inline]
    pub fn is_input(&self) -> bool {
        self.role == FieldRole::Input
    }

    /// Check if this is an output field.
    #[inline]
    pub fn is_output(&self) -> bool {
        self.role == FieldRole::Output
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        if let Some(ref default) = self.default {
            write!(f, " = {}", default.inspect())?;
        }
        Ok(())
    }
}

/// Turn a field name into a label (`question_text` -> `Question text`).
///
/// Underscores become spaces, the first character is upper-cased and the
/// rest lower-cased.
pub fn humanize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for (i, ch) in name.chars().enumerate() {
        let ch = if ch == '_' { ' ' } else { ch };
        if i == 0 {
            result.extend(ch.to_uppercase());
        } else {
            result.extend(ch.to_lowercase());
        }
    }
    result
}

/// Helper to create an input field
pub struct InputField;

impl InputField {
    /// Create an input field.
    pub fn create(name: impl Into<String>, ty: TypeTag) -> Field {
        Field::new(name, ty, FieldRole::Input)
    }
}

/// Helper to create an output field
pub struct OutputField;

impl OutputField {
    /// Create an output field.
    pub fn create(name: impl Into<String>, ty: TypeTag) -> Field {
        Field::new(name, ty, FieldRole::Output)
    }
}
