//! Scalar parameters and constants handed to a component.
//!
//! Parameters are required: a component declares them with
//! [`FieldDef`](crate::FieldDef)s and the model refuses to start without
//! a value for each. Constants are optional: each [`ConstantDef`]
//! carries a default that a configured value overrides.

use indexmap::IndexMap;

use crate::field::FieldName;

/// Declaration of a component constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantDef {
    /// Constant name.
    pub name: FieldName,
    /// Units string.
    pub units: &'static str,
    /// Value used when none is configured.
    pub default: f64,
}

impl ConstantDef {
    /// Create a constant declaration.
    pub const fn new(name: FieldName, units: &'static str, default: f64) -> Self {
        Self {
            name,
            units,
            default,
        }
    }
}

/// Parameter and constant values for one component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters {
    parameters: IndexMap<String, f64>,
    constants: IndexMap<String, f64>,
}

impl Parameters {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_parameter`](Self::set_parameter).
    pub fn with_parameter(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Builder form of [`set_constant`](Self::set_constant).
    pub fn with_constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set_constant(name, value);
        self
    }

    /// Set parameter `name`, replacing any earlier value.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: f64) {
        self.parameters.insert(name.into(), value);
    }

    /// Set constant `name`, replacing any earlier value.
    pub fn set_constant(&mut self, name: impl Into<String>, value: f64) {
        self.constants.insert(name.into(), value);
    }

    /// Value of parameter `name`.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    /// Value of constant `name`.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Fill every constant in `defs` that has no value with its default.
    pub fn fill_defaults(&mut self, defs: &[ConstantDef]) {
        for def in defs {
            self.constants
                .entry(def.name.to_string())
                .or_insert(def.default);
        }
    }

    /// Names of the parameters set, in insertion order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.parameters.keys().map(String::as_str)
    }

    /// Whether no parameter or constant is set.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty() && self.constants.is_empty()
    }
}
