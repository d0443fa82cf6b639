// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Module trait and base implementations
//!
//! A module binds named values to the fields of its type's [`Signature`],
//! runs a `forward` computation, and hands back its output fields.
//!
//! ## Protocol
//!
//! [`Module::call`] does three things, in order:
//!
//! 1. binds the supplied [`Inputs`]: every key naming a declared field (input
//!    *or* output) is stored, every other key is silently dropped;
//! 2. runs [`Module::forward`];
//! 3. returns a [`Prediction`] with the current value of every declared
//!    output.
//!
//! Values live in the module's [`ModuleState`] and are never reset between
//! calls, so an output the next `forward` does not write keeps its old value.
//!
//! ## Example
//!
//! ```
//! use declm::{inputs, signature_of, Declare, Module, ModuleState, Result, Signature, TypeTag};
//!
//! struct Greeter {
//!     state: ModuleState,
//! }
//!
//! impl Declare for Greeter {
//!     fn declare(sig: &mut Signature) -> Result<()> {
//!         sig.add_input("name", TypeTag::String, None, None)?;
//!         sig.add_output("greeting", TypeTag::String, None)?;
//!         Ok(())
//!     }
//! }
//!
//! impl Module for Greeter {
//!     fn state(&self) -> &ModuleState {
//!         &self.state
//!     }
//!
//!     fn state_mut(&mut self) -> &mut ModuleState {
//!         &mut self.state
//!     }
//!
//!     fn forward(&mut self) -> Result<()> {
//!         let greeting = format!("Hello, {}!", self.state.value("name"));
//!         self.state.set("greeting", greeting);
//!         Ok(())
//!     }
//! }
//!
//! let mut greeter = Greeter { state: ModuleState::of::<Greeter>().unwrap() };
//! let out = greeter.call(inputs! { "name" => "Ann" }).unwrap();
//! assert_eq!(out.get_str("greeting"), Some("Hello, Ann!"));
//! ```

use crate::error::{Error, Result};
use crate::prediction::Prediction;
use crate::signature::{signature_of, Declare, Signature};
use crate::types::{FieldMap, Inputs};
use crate::value::Value;

/// Per-instance field values of a module.
///
/// Every declared field always has an entry; unset fields hold
/// [`Value::Null`]. Inputs declared with a default start at that default.
#[derive(Debug, Clone)]
pub struct ModuleState {
    signature: &'static Signature,
    values: FieldMap,
}

impl ModuleState {
    /// Create state for a signature, seeding declared defaults.
    pub fn new(signature: &'static Signature) -> Self {
        let values = signature
            .all_fields()
            .map(|f| (f.name.clone(), f.default.clone().unwrap_or_default()))
            .collect();
        Self { signature, values }
    }

    /// Create state for the declared signature of `T`.
    pub fn of<T: Declare + ?Sized>() -> Result<Self> {
        Ok(Self::new(signature_of::<T>()?))
    }

    /// The signature this state is laid out for.
    #[inline]
    pub fn signature(&self) -> &'static Signature {
        self.signature
    }

    /// Current value of a declared field; `None` if `name` is not declared.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Current value of a field, `Null` when undeclared.
    pub fn value(&self, name: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        self.values.get(name).unwrap_or(NULL)
    }

    /// Set a declared field. Returns `false`, leaving the state untouched,
    /// when `name` is not declared.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Apply bindings. Unknown keys are ignored. Returns how many applied.
    pub fn bind(&mut self, inputs: Inputs) -> usize {
        let mut applied = 0;
        for (name, value) in inputs {
            if self.set(&name, value) {
                applied += 1;
            }
        }
        applied
    }

    /// Snapshot of every declared input.
    pub fn inputs(&self) -> FieldMap {
        self.snapshot(&self.signature.input_fields)
    }

    /// Snapshot of every declared output.
    pub fn outputs(&self) -> Prediction {
        Prediction::with_outputs(self.snapshot(&self.signature.output_fields))
    }

    /// All current values.
    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    /// Check the current inputs against their declared types.
    pub fn inputs_valid(&self) -> bool {
        self.signature.validate_inputs(&self.values)
    }

    /// Check the current outputs against their declared types.
    pub fn outputs_valid(&self) -> bool {
        self.signature.validate_outputs(&self.values)
    }

    fn snapshot(&self, fields: &[crate::field::Field]) -> FieldMap {
        fields
            .iter()
            .map(|f| (f.name.clone(), self.value(&f.name).clone()))
            .collect()
    }
}

/// Core trait for executable modules.
///
/// Implementors own a [`ModuleState`] and usually supply [`forward`](Module::forward);
/// everything else has a default.
pub trait Module: Send {
    /// The module's field values.
    fn state(&self) -> &ModuleState;

    /// Mutable access to the module's field values.
    fn state_mut(&mut self) -> &mut ModuleState;

    /// The module's computation.
    ///
    /// Reads inputs from, and writes outputs to, the module's state. The
    /// default fails with [`Error::Unimplemented`].
    fn forward(&mut self) -> Result<()> {
        Err(Error::unimplemented(self.name(), "forward"))
    }

    /// Bind `inputs`, run [`forward`](Module::forward), return the outputs.
    fn call(&mut self, inputs: Inputs) -> Result<Prediction> {
        self.state_mut().bind(inputs);
        self.forward()?;
        Ok(self.state().outputs())
    }

    /// Apply bindings without running the module.
    fn bind(&mut self, inputs: Inputs) {
        self.state_mut().bind(inputs);
    }

    /// Get module name for debugging and tracing.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// The module type's signature.
    fn signature(&self) -> &'static Signature {
        self.state().signature()
    }

    /// Current value of a declared field.
    fn get(&self, name: &str) -> Option<&Value> {
        self.state().get(name)
    }

    /// `Name(Signature(inputs: [..], outputs: [..]))`
    fn describe(&self) -> String {
        format!("{}({})", self.name(), self.signature())
    }
}

impl<M: Module + ?Sized> Module for Box<M> {
    fn state(&self) -> &ModuleState {
        (**self).state()
    }

    fn state_mut(&mut self) -> &mut ModuleState {
        (**self).state_mut()
    }

    fn forward(&mut self) -> Result<()> {
        (**self).forward()
    }

    fn call(&mut self, inputs: Inputs) -> Result<Prediction> {
        (**self).call(inputs)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A module whose `forward` is a closure.
///
/// Handy for deterministic generators and glue steps that do not need their
/// own type.
pub struct FnModule<F> {
    state: ModuleState,
    f: F,
    name: &'static str,
}

impl<F> FnModule<F>
where
    F: FnMut(&mut ModuleState) -> Result<()> + Send,
{
    /// Create a function module over an explicit signature.
    pub fn new(name: &'static str, signature: &'static Signature, f: F) -> Self {
        Self {
            state: ModuleState::new(signature),
            f,
            name,
        }
    }

    /// Create a function module over the declared signature of `T`.
    pub fn declared<T: Declare>(f: F) -> Result<Self> {
        Ok(Self::new(std::any::type_name::<T>(), signature_of::<T>()?, f))
    }
}

impl<F> Module for FnModule<F>
where
    F: FnMut(&mut ModuleState) -> Result<()> + Send,
{
    fn state(&self) -> &ModuleState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ModuleState {
        &mut self.state
    }

    fn forward(&mut self) -> Result<()> {
        (self.f)(&mut self.state)
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::TypeTag;

    struct Bare {
        state: ModuleState,
    }

    impl Declare for Bare {
        fn declare(sig: &mut Signature) -> Result<()> {
            sig.add_input("x", TypeTag::String, None, None)?;
            sig.add_input("n", TypeTag::Integer, None, Some(Value::from(7)))?;
            sig.add_output("y", TypeTag::String, None)?;
            Ok(())
        }
    }

    impl Module for Bare {
        fn state(&self) -> &ModuleState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ModuleState {
            &mut self.state
        }
    }

    fn bare() -> Bare {
        Bare {
            state: ModuleState::of::<Bare>().unwrap(),
        }
    }

    #[test]
    fn test_state_seeds_defaults() {
        let m = bare();
        assert_eq!(m.get("n"), Some(&Value::from(7)));
        assert_eq!(m.get("x"), Some(&Value::Null));
        assert_eq!(m.get("y"), Some(&Value::Null));
        assert_eq!(m.get("missing"), None);
    }

    #[test]
    fn test_bind_ignores_unknown_keys() {
        let mut state = ModuleState::of::<Bare>().unwrap();
        let applied = state.bind(Inputs::new().with("x", "a").with("bogus", 1));
        assert_eq!(applied, 1);
        assert_eq!(state.value("x"), &Value::from("a"));
        assert!(state.get("bogus").is_none());
    }

    #[test]
    fn test_set_undeclared_is_noop() {
        let mut state = ModuleState::of::<Bare>().unwrap();
        assert!(!state.set("nope", "v"));
        assert!(state.set("y", "v"));
    }

    #[test]
    fn test_forward_unimplemented() {
        let mut m = bare();
        let err = m.call(Inputs::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::Unimplemented {
                operation: "forward",
                ..
            }
        ));
        assert!(err.to_string().contains("Bare"));
    }

    #[test]
    fn test_snapshots() {
        let mut state = ModuleState::of::<Bare>().unwrap();
        state.set("x", "in");
        state.set("y", "out");

        let inputs = state.inputs();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs["x"], Value::from("in"));

        let outputs = state.outputs();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.get_str("y"), Some("out"));
    }

    #[test]
    fn test_validity_checks() {
        let mut state = ModuleState::of::<Bare>().unwrap();
        assert!(state.inputs_valid());
        state.set("n", "seven");
        assert!(!state.inputs_valid());
        assert!(state.outputs_valid());
    }

    #[test]
    fn test_fn_module() {
        let mut m = FnModule::declared::<Bare>(|state: &mut ModuleState| {
            let y = format!("{}-{}", state.value("x"), state.value("n"));
            state.set("y", y);
            Ok(())
        })
        .unwrap();

        let out = m.call(Inputs::new().with("x", "a")).unwrap();
        assert_eq!(out.get_str("y"), Some("a-7"));
        assert!(m.name().contains("Bare"));
    }

    #[test]
    fn test_boxed_module_delegates() {
        let mut m: Box<dyn Module> = Box::new(
            FnModule::declared::<Bare>(|state: &mut ModuleState| {
                state.set("y", "boxed");
                Ok(())
            })
            .unwrap(),
        );
        let out = m.call(Inputs::new()).unwrap();
        assert_eq!(out.get_str("y"), Some("boxed"));
    }
}
