//! Field names and definitions.
//!
//! Fields are identified by name, the same way the exchanger routes
//! transfers between components: an outward named `"throughfall"` on one
//! component feeds every inward named `"throughfall"` on another.

use smallvec::SmallVec;

/// Name of a field as declared by a component.
pub type FieldName = &'static str;

/// A short list of field names.
///
/// Components rarely declare more than a handful of fields of each
/// category, so eight fit inline without touching the heap.
pub type FieldNames = SmallVec<[FieldName; 8]>;

/// Definition of an externally supplied field: driving or ancillary data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    /// Name under which the data is looked up in the data set.
    pub name: FieldName,
    /// Units the component expects, e.g. `"kg m-2 s-1"`.
    pub units: &'static str,
}

impl FieldDef {
    /// Create a new field definition.
    pub const fn new(name: FieldName, units: &'static str) -> Self {
        Self { name, units }
    }

    /// Whether `units` names the same units as this definition.
    ///
    /// Comparison is textual after collapsing runs of whitespace, so
    /// `"kg m-2  s-1"` matches `"kg m-2 s-1"` but `"mm s-1"` does not.
    pub fn units_match(&self, units: &str) -> bool {
        self.units.split_whitespace().eq(units.split_whitespace())
    }
}
