//! A component that fills a model slot by replaying data.
//!
//! Stands in for a real component by reading, each timestep, a driving
//! field for every transfer the slot must emit and publishing it
//! unchanged. Useful to drive one component under test with observed
//! or previously simulated transfers instead of a live neighbour.

use twc_component::{Component, ComponentKind, RunContext};
use twc_core::{ComponentError, FieldDef, FieldWriter};

/// Copies driving data to identically named outbound transfers.
#[derive(Clone, Debug)]
pub struct DataComponent {
    kind: ComponentKind,
    fields: Vec<FieldDef>,
}

impl DataComponent {
    /// A data component replaying the given fields.
    ///
    /// Each field is both a driving input (looked up in the data set with
    /// the given units) and an outbound transfer of the same name.
    pub fn new(kind: ComponentKind, fields: Vec<FieldDef>) -> Self {
        Self { kind, fields }
    }

    /// A data component replaying the canonical outbound transfers of `kind`.
    pub fn for_kind(kind: ComponentKind) -> Self {
        Self::new(kind, kind.canonical_outwards().to_vec())
    }
}

impl Component for DataComponent {
    fn name(&self) -> &str {
        "DataComponent"
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn driving_data(&self) -> Vec<FieldDef> {
        self.fields.clone()
    }

    fn outwards(&self) -> Vec<FieldDef> {
        self.fields.clone()
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        for def in &self.fields {
            let src = ctx.driving_field(def.name)?;
            let dst = ctx
                .outwards()
                .write(def.name)
                .ok_or_else(|| ComponentError::MissingField {
                    name: def.name.to_string(),
                })?;
            if dst.len() != src.len() {
                return Err(ComponentError::ShapeMismatch {
                    name: def.name.to_string(),
                    expected: src.len(),
                    actual: dst.len(),
                });
            }
            dst.copy_from_slice(src);
        }
        Ok(())
    }
}
