//! Named, heap-backed field buffers.

use indexmap::IndexMap;

use crate::field::FieldName;
use crate::traits::{FieldReader, FieldWriter};

/// An ordered collection of named `f64` buffers.
///
/// Used by the model driver for every per-component buffer it owns
/// (outbound transfers, outputs) and as the backing store of the
/// exchanger. Iteration order is declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldBuffers {
    fields: IndexMap<FieldName, Vec<f64>>,
}

impl FieldBuffers {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a zero-filled buffer of `len` values for `name`.
    ///
    /// Re-declaring an existing name replaces its buffer but keeps its
    /// position in iteration order.
    pub fn declare(&mut self, name: FieldName, len: usize) {
        self.fields.insert(name, vec![0.0; len]);
    }

    /// Whether a buffer named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names of all buffers, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.keys().copied()
    }

    /// Number of buffers.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the collection holds no buffers.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Set every value of every buffer to zero.
    pub fn zero_all(&mut self) {
        for buf in self.fields.values_mut() {
            buf.fill(0.0);
        }
    }

    /// Copy every buffer of `other` that also exists in `self`.
    ///
    /// Returns the number of buffers copied. Buffers whose lengths
    /// differ are skipped.
    pub fn copy_matching(&mut self, other: &FieldBuffers) -> usize {
        let mut copied = 0;
        for (name, src) in &other.fields {
            if let Some(dst) = self.fields.get_mut(name) {
                if dst.len() == src.len() {
                    dst.copy_from_slice(src);
                    copied += 1;
                }
            }
        }
        copied
    }
}

impl FieldReader for FieldBuffers {
    fn read(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(|v| v.as_slice())
    }
}

impl FieldWriter for FieldBuffers {
    fn write(&mut self, name: &str) -> Option<&mut [f64]> {
        self.fields.get_mut(name).map(|v| v.as_mut_slice())
    }

    fn write_many(&mut self, names: &[&str]) -> Vec<Option<&mut [f64]>> {
        let mut slots: Vec<Option<&mut [f64]>> = names.iter().map(|_| None).collect();
        for (name, buf) in self.fields.iter_mut() {
            if let Some(pos) = names.iter().position(|n| n == name) {
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
    fn declare_allocates_zeroed_buffers_in_order() {
        let mut bufs = FieldBuffers::new();
        bufs.declare("b", 2);
        bufs.declare("a", 3);
        assert_eq!(bufs.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(bufs.read("a").unwrap(), &[0.0; 3]);
        assert_eq!(bufs.len(), 2);
        assert!(bufs.read("c").is_none());
    }

    #[test]
    fn copy_matching_skips_unknown_and_mismatched() {
        let mut dst = FieldBuffers::new();
        dst.declare("x", 2);
        dst.declare("y", 3);

        let mut src = FieldBuffers::new();
        src.declare("x", 2);
        src.declare("y", 2);
        src.declare("z", 2);
        src.write("x").unwrap().fill(4.0);
        src.write("y").unwrap().fill(5.0);

        assert_eq!(dst.copy_matching(&src), 1);
        assert_eq!(dst.read("x").unwrap(), &[4.0, 4.0]);
        assert_eq!(dst.read("y").unwrap(), &[0.0; 3]);
        assert!(!dst.contains("z"));
    }

    #[test]
    fn write_many_marks_unknown_fields() {
        let mut bufs = FieldBuffers::new();
        bufs.declare("x", 1);
        let slots = bufs.write_many(&["missing", "x"]);
        assert!(slots[0].is_none());
        assert_eq!(slots[1].as_deref(), Some(&[0.0][..]));
    }

    #[test]
    fn zero_all_resets_values() {
        let mut bufs = FieldBuffers::new();
        bufs.declare("x", 2);
        bufs.write("x").unwrap().fill(9.0);
        bufs.zero_all();
        assert_eq!(bufs.read("x").unwrap(), &[0.0; 2]);
    }
}
