// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Signature system for defining input/output contracts
//!
//! A [`Signature`] is the ordered list of a module type's input and output
//! fields. Types declare their fields once by implementing [`Declare`];
//! [`signature_of`] builds the signature on first use and hands out the same
//! `&'static` instance to every module of that type afterwards.
//!
//! ```
//! use declm::{signature_of, Declare, Result, Signature, TypeTag};
//!
//! struct Qa;
//!
//! impl Declare for Qa {
//!     fn declare(sig: &mut Signature) -> Result<()> {
//!         sig.add_input("question", TypeTag::String, Some("The question to answer"), None)?;
//!         sig.add_output("answer", TypeTag::String, Some("The answer"))?;
//!         Ok(())
//!     }
//! }
//!
//! let sig = signature_of::<Qa>().unwrap();
//! assert_eq!(sig.to_string_format(), "question -> answer");
//! ```

use crate::error::{Error, Result};
use crate::field::{Field, FieldRole, TypeTag};
use crate::types::FieldMap;
use crate::value::Value;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// A signature defining the input/output contract of a module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Input fields, in declaration order
    pub input_fields: Vec<Field>,

    /// Output fields, in declaration order
    pub output_fields: Vec<Field>,
}

impl Signature {
    /// Create an empty signature
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an input field and return it.
    pub fn add_input(
        &mut self,
        name: impl Into<String>,
        ty: TypeTag,
        description: Option<&str>,
        default: Option<Value>,
    ) -> Result<&Field> {
        let mut field = Field::new(name, ty, FieldRole::Input);
        field.description = description.map(str::to_string);
        field.default = default;
        self.push(field)
    }

    /// Declare an output field and return it.
    pub fn add_output(
        &mut self,
        name: impl Into<String>,
        ty: TypeTag,
        description: Option<&str>,
    ) -> Result<&Field> {
        let mut field = Field::new(name, ty, FieldRole::Output);
        field.description = description.map(str::to_string);
        self.push(field)
    }

    /// Append a prepared field to the collection matching its role.
    ///
    /// Names must be unique within the inputs and, separately, within the
    /// outputs.
    pub fn push(&mut self, field: Field) -> Result<&Field> {
        if field.name.is_empty() {
            return Err(Error::signature("field name must not be empty"));
        }
        if field.role == FieldRole::Output && field.default.is_some() {
            return Err(Error::signature(format!(
                "output field `{}` cannot declare a default",
                field.name
            )));
        }
        let (fields, role) = match field.role {
            FieldRole::Input => (&mut self.input_fields, "input"),
            FieldRole::Output => (&mut self.output_fields, "output"),
        };
        if fields.iter().any(|f| f.name == field.name) {
            return Err(Error::signature(format!(
                "duplicate {} field `{}`",
                role, field.name
            )));
        }
        fields.push(field);
        Ok(&fields[fields.len() - 1])
    }

    /// Get all fields (inputs then outputs)
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.input_fields.iter().chain(self.output_fields.iter())
    }

    /// Look up an input field by name.
    pub fn input(&self, name: &str) -> Option<&Field> {
        self.input_fields.iter().find(|f| f.name == name)
    }

    /// Look up an output field by name.
    pub fn output(&self, name: &str) -> Option<&Field> {
        self.output_fields.iter().find(|f| f.name == name)
    }

    /// Check whether `name` is a declared input or output.
    pub fn declares(&self, name: &str) -> bool {
        self.all_fields().any(|f| f.name == name)
    }

    /// The first declared input.
    #[inline]
    pub fn first_input(&self) -> Option<&Field> {
        self.input_fields.first()
    }

    /// The first declared output, the default parse target.
    #[inline]
    pub fn first_output(&self) -> Option<&Field> {
        self.output_fields.first()
    }

    /// Check every input field against `values`. Missing keys count as `Null`,
    /// extra keys are ignored.
    pub fn validate_inputs(&self, values: &FieldMap) -> bool {
        validate(&self.input_fields, values)
    }

    /// Check every output field against `values`. Missing keys count as `Null`,
    /// extra keys are ignored.
    pub fn validate_outputs(&self, values: &FieldMap) -> bool {
        validate(&self.output_fields, values)
    }

    /// Parse a signature from string format: `"input1, input2 -> output1"`.
    ///
    /// Each field may carry a type: `"question, age: integer -> answer"`.
    /// Untyped fields are strings.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split("->").map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err(Error::signature(
                "Signature must be in format 'inputs -> outputs'",
            ));
        }

        let mut sig = Self::new();
        for spec in parts[0].split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, ty) = parse_field_spec(spec)?;
            sig.push(Field::new(name, ty, FieldRole::Input))?;
        }
        for spec in parts[1].split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (name, ty) = parse_field_spec(spec)?;
            sig.push(Field::new(name, ty, FieldRole::Output))?;
        }

        Ok(sig)
    }

    /// Convert signature to string format
    pub fn to_string_format(&self) -> String {
        let inputs: Vec<&str> = self.input_fields.iter().map(|f| f.name.as_str()).collect();
        let outputs: Vec<&str> = self.output_fields.iter().map(|f| f.name.as_str()).collect();
        format!("{} -> {}", inputs.join(", "), outputs.join(", "))
    }
}

fn validate(fields: &[Field], values: &FieldMap) -> bool {
    fields
        .iter()
        .all(|f| f.is_valid(values.get(&f.name).unwrap_or(&Value::Null)))
}

fn parse_field_spec(spec: &str) -> Result<(&str, TypeTag)> {
    match spec.split_once(':') {
        Some((name, ty)) => Ok((name.trim(), ty.parse()?)),
        None => Ok((spec, TypeTag::String)),
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |fields: &[Field]| {
            fields
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "Signature(inputs: [{}], outputs: [{}])",
            join(&self.input_fields),
            join(&self.output_fields)
        )
    }
}

/// Builder for creating signatures
#[derive(Debug, Default)]
pub struct SignatureBuilder {
    signature: Signature,
}

impl SignatureBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input field
    pub fn input(mut self, field: Field) -> Result<Self> {
        if field.role != FieldRole::Input {
            return Err(Error::signature("Field must be an input field"));
        }
        self.signature.push(field)?;
        Ok(self)
    }

    /// Add an output field
    pub fn output(mut self, field: Field) -> Result<Self> {
        if field.role != FieldRole::Output {
            return Err(Error::signature("Field must be an output field"));
        }
        self.signature.push(field)?;
        Ok(self)
    }

    /// Build the signature
    pub fn build(self) -> Signature {
        self.signature
    }
}

/// Field declarations of a module type.
///
/// `declare` runs once per type, the first time [`signature_of`] is asked
/// for it.
pub trait Declare: 'static {
    /// Register this type's input and output fields, in order.
    fn declare(sig: &mut Signature) -> Result<()>;
}

type Registry = RwLock<HashMap<TypeId, &'static Signature>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The shared signature of type `T`, declared on first use.
///
/// Every call for the same type returns the same instance. A failing
/// declaration is not cached.
pub fn signature_of<T: Declare + ?Sized>() -> Result<&'static Signature> {
    let id = TypeId::of::<T>();
    if let Some(sig) = registry().read().get(&id) {
        return Ok(*sig);
    }

    // Declared outside the lock so `declare` may look up other signatures.
    let mut sig = Signature::new();
    T::declare(&mut sig)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        module = std::any::type_name::<T>(),
        inputs = sig.input_fields.len(),
        outputs = sig.output_fields.len(),
        "signature declared"
    );

    let mut map = registry().write();
    Ok(*map.entry(id).or_insert_with(|| &*Box::leak(Box::new(sig))))
}
