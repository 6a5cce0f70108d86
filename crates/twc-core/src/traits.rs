//! Core abstraction traits for named field access.

use crate::error::ComponentError;
use crate::field::FieldName;

/// Read-only access to named field data.
///
/// Implemented by the exchanger, the data set views and
/// [`FieldBuffers`](crate::FieldBuffers). Returns `None` if the field
/// is not readable through this reader.
pub trait FieldReader {
    /// Read the data for a field as a flat f64 slice.
    fn read(&self, name: &str) -> Option<&[f64]>;
}

/// Mutable access to named field buffers.
pub trait FieldWriter {
    /// Get a mutable slice for writing one field.
    ///
    /// Returns `None` if the field is not writable through this writer.
    fn write(&mut self, name: &str) -> Option<&mut [f64]>;

    /// Get mutable slices for several distinct fields at once.
    ///
    /// The result has one entry per requested name, in request order;
    /// an entry is `None` if that field is not writable. If a name is
    /// requested more than once only its first occurrence is filled.
    fn write_many(&mut self, names: &[&str]) -> Vec<Option<&mut [f64]>>;
}

/// Read a field that must exist and hold exactly `len` values.
pub fn read_required<'r>(
    reader: &'r dyn FieldReader,
    name: &str,
    len: usize,
) -> Result<&'r [f64], ComponentError> {
    let data = reader
        .read(name)
        .ok_or_else(|| ComponentError::MissingField {
            name: name.to_string(),
        })?;
    check_len(name, data.len(), len)?;
    Ok(data)
}

/// Borrow `N` distinct writable fields at once, each holding exactly
/// `len` values.
pub fn write_disjoint<'w, const N: usize>(
    writer: &'w mut dyn FieldWriter,
    names: [FieldName; N],
    len: usize,
) -> Result<[&'w mut [f64]; N], ComponentError> {
    for (idx, name) in names.iter().enumerate() {
        if names[..idx].contains(name) {
            return Err(ComponentError::ExecutionFailed {
                reason: format!("field '{name}' requested twice for writing"),
            });
        }
    }

    let slots = writer.write_many(&names);
    let mut found = Vec::with_capacity(N);
    for (slot, name) in slots.into_iter().zip(names) {
        let buf = slot.ok_or_else(|| ComponentError::MissingField {
            name: name.to_string(),
        })?;
        check_len(name, buf.len(), len)?;
        found.push(buf);
    }
    found
        .try_into()
        .map_err(|_: Vec<&mut [f64]>| ComponentError::ExecutionFailed {
            reason: format!("writer returned the wrong number of fields for {names:?}"),
        })
}

fn check_len(name: &str, actual: usize, expected: usize) -> Result<(), ComponentError> {
    if actual == expected {
        Ok(())
    } else {
        Err(ComponentError::ShapeMismatch {
            name: name.to_string(),
            expected,
            actual,
        })
    }
}
