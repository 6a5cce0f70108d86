//! A component that fills a model slot with zero-valued transfers.
//!
//! Used when a coupled run needs some slot occupied, but nothing about
//! that slot matters to the test: every outbound transfer is written as
//! zeros each timestep, and nothing is read.

use twc_component::{Component, ComponentKind, RunContext};
use twc_core::{ComponentError, FieldDef, FieldWriter};

/// Writes zeros to each of its outbound transfers every timestep.
#[derive(Clone, Debug)]
pub struct NullComponent {
    kind: ComponentKind,
    outwards: Vec<FieldDef>,
}

impl NullComponent {
    /// A null component emitting the given transfers.
    pub fn new(kind: ComponentKind, outwards: Vec<FieldDef>) -> Self {
        Self { kind, outwards }
    }

    /// A null component emitting the canonical outbound transfers of `kind`.
    pub fn for_kind(kind: ComponentKind) -> Self {
        Self::new(kind, kind.canonical_outwards().to_vec())
    }
}

impl Component for NullComponent {
    fn name(&self) -> &str {
        "NullComponent"
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn outwards(&self) -> Vec<FieldDef> {
        self.outwards.clone()
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        for def in &self.outwards {
            let out = ctx
                .outwards()
                .write(def.name)
                .ok_or_else(|| ComponentError::MissingField {
                    name: def.name.to_string(),
                })?;
            out.fill(0.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twc_core::{GridShape, StateStore, TimestepId};
    use twc_test_utils::{MockFieldReader, MockFieldWriter};

    #[test]
    fn for_kind_uses_canonical_outwards() {
        let c = NullComponent::for_kind(ComponentKind::SubSurface);
        let names: Vec<_> = c.outwards().iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["runoff", "soil_water_stress"]);
        assert!(c.inwards().is_empty());
        assert!(c.driving_data().is_empty());
        assert!(c.states().is_empty());
    }

    #[test]
    fn writes_zeros() {
        let c = NullComponent::for_kind(ComponentKind::OpenWater);
        let empty = MockFieldReader::new();
        let mut states = StateStore::new();
        let mut outwards = MockFieldWriter::new();
        outwards.add_field("discharge", 3);
        outwards.write("discharge").unwrap().fill(4.0);
        let mut outputs = MockFieldWriter::new();

        let mut ctx = RunContext::new(
            GridShape::new(1, 1, 3),
            TimestepId(0),
            &empty,
            &empty,
            &empty,
            &mut states,
            &mut outwards,
            &mut outputs,
        );
        c.run(&mut ctx).unwrap();
        assert_eq!(outwards.get_field("discharge").unwrap(), &[0.0; 3]);
    }

    #[test]
    fn missing_buffer_is_an_error() {
        let c = NullComponent::for_kind(ComponentKind::OpenWater);
        let empty = MockFieldReader::new();
        let mut states = StateStore::new();
        let mut outwards = MockFieldWriter::new();
        let mut outputs = MockFieldWriter::new();
        let mut ctx = RunContext::new(
            GridShape::new(1, 1, 1),
            TimestepId(0),
            &empty,
            &empty,
            &empty,
            &mut states,
            &mut outwards,
            &mut outputs,
        );
        assert_eq!(
            c.run(&mut ctx),
            Err(ComponentError::MissingField {
                name: "discharge".into()
            })
        );
    }
}
