//! Test utilities and mock types for twc development.
//!
//! Provides mock implementations of the core field traits
//! ([`FieldReader`], [`FieldWriter`]), reusable fixture components, and
//! seeded random grid generation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod grids;

use std::collections::HashMap;

use twc_core::{FieldReader, FieldWriter};

pub use fixtures::{
    ConstComponent, EchoComponent, FailingComponent, FailingInitComponent, ScaledComponent,
};
pub use grids::{random_field, ramp_field};

/// Mock implementation of [`FieldReader`].
///
/// Backed by a `HashMap<String, Vec<f64>>` for flexible test setup.
/// Pre-populate fields with [`set_field`](MockFieldReader::set_field)
/// before passing to code under test.
pub struct MockFieldReader {
    fields: HashMap<String, Vec<f64>>,
}

impl MockFieldReader {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Pre-populate a field with data for testing.
    pub fn set_field(&mut self, name: &str, data: Vec<f64>) {
        self.fields.insert(name.to_string(), data);
    }
}

impl Default for MockFieldReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldReader for MockFieldReader {
    fn read(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(|v| v.as_slice())
    }
}

/// Mock implementation of [`FieldWriter`].
///
/// Pre-allocate field buffers with [`add_field`](MockFieldWriter::add_field),
/// then pass to code under test. Inspect results with
/// [`get_field`](MockFieldWriter::get_field).
pub struct MockFieldWriter {
    fields: HashMap<String, Vec<f64>>,
}

impl MockFieldWriter {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Pre-allocate a field buffer with the given size, initialized to zero.
    pub fn add_field(&mut self, name: &str, size: usize) {
        self.fields.insert(name.to_string(), vec![0.0; size]);
    }

    /// Read back the current field data for test assertions.
    pub fn get_field(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(|v| v.as_slice())
    }
}

impl Default for MockFieldWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldWriter for MockFieldWriter {
    fn write(&mut self, name: &str) -> Option<&mut [f64]> {
        self.fields.get_mut(name).map(|v| v.as_mut_slice())
    }

    fn write_many(&mut self, names: &[&str]) -> Vec<Option<&mut [f64]>> {
        let mut slots: Vec<Option<&mut [f64]>> = names.iter().map(|_| None).collect();
        for (name, buf) in self.fields.iter_mut() {
            if let Some(pos) = names.iter().position(|n| *n == name.as_str()) {
                slots[pos] = Some(buf.as_mut_slice());
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_round_trips_through_mock() {
        let mut w = MockFieldWriter::new();
        w.add_field("x", 2);
        w.add_field("y", 2);
        {
            let slots = w.write_many(&["y", "z", "x"]);
            assert!(slots[1].is_none());
        }
        w.write("x").unwrap().copy_from_slice(&[1.0, 2.0]);
        assert_eq!(w.get_field("x").unwrap(), &[1.0, 2.0]);
        assert!(w.get_field("z").is_none());
    }
}
