//! The dummy kernel wrapped as a surface-layer [`Component`].
//!
//! [`DummySurfaceLayer`] resolves every buffer the kernel needs from its
//! [`RunContext`], checks that each holds one value per grid cell, and
//! hands them to [`dummy::run`](crate::dummy::run). All arithmetic lives
//! in the kernel; this wrapper only does the lookups the kernel leaves to
//! its caller.
//!
//! # Construction
//!
//! ```
//! use twc_component::{Component, ComponentKind};
//! use twc_components::DummySurfaceLayer;
//!
//! let c = DummySurfaceLayer::new();
//! assert_eq!(c.kind(), ComponentKind::SurfaceLayer);
//! assert_eq!(c.outwards().len(), 2);
//! ```

use smallvec::smallvec;
use twc_component::{Component, ComponentKind, InitContext, RunContext};
use twc_core::{write_disjoint, ComponentError, FieldDef, FieldNames};

use crate::dummy::{self, DummyInputs, DummyOutputs};
use crate::fields::{
    ANCILLARY_C, DRIVING_A, DRIVING_B, DRIVING_C, OUTPUT_X, STATE_A, STATE_B, TRANSFER_I,
    TRANSFER_J, TRANSFER_K, TRANSFER_L, TRANSFER_N, UNITS,
};

/// A surface-layer component with no physics and predictable outputs.
#[derive(Clone, Copy, Debug, Default)]
pub struct DummySurfaceLayer;

impl DummySurfaceLayer {
    /// Create a new dummy surface layer.
    pub fn new() -> Self {
        Self
    }
}

impl Component for DummySurfaceLayer {
    fn name(&self) -> &str {
        "DummySurfaceLayer"
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::SurfaceLayer
    }

    fn driving_data(&self) -> Vec<FieldDef> {
        vec![
            FieldDef::new(DRIVING_A, UNITS),
            FieldDef::new(DRIVING_B, UNITS),
            FieldDef::new(DRIVING_C, UNITS),
        ]
    }

    fn ancillary_data(&self) -> Vec<FieldDef> {
        vec![FieldDef::new(ANCILLARY_C, UNITS)]
    }

    fn inwards(&self) -> Vec<FieldDef> {
        vec![
            FieldDef::new(TRANSFER_K, UNITS),
            FieldDef::new(TRANSFER_L, UNITS),
            FieldDef::new(TRANSFER_N, UNITS),
        ]
    }

    fn outwards(&self) -> Vec<FieldDef> {
        vec![
            FieldDef::new(TRANSFER_I, UNITS),
            FieldDef::new(TRANSFER_J, UNITS),
        ]
    }

    fn states(&self) -> FieldNames {
        smallvec![STATE_A, STATE_B]
    }

    fn outputs(&self) -> FieldNames {
        smallvec![OUTPUT_X]
    }

    fn initialise(&self, ctx: &mut InitContext<'_>) -> Result<(), ComponentError> {
        let shape = ctx.shape();
        let [a, b] = ctx
            .states()
            .histories_mut([STATE_A, STATE_B], shape.cell_count())?;
        dummy::initialise(shape, a.previous_mut(), b.previous_mut());
        Ok(())
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        let shape = ctx.shape();
        let n = shape.cell_count();

        let transfer_k = ctx.inward_field(TRANSFER_K)?;
        let transfer_l = ctx.inward_field(TRANSFER_L)?;
        let transfer_n = ctx.inward_field(TRANSFER_N)?;
        let driving_a = ctx.driving_field(DRIVING_A)?;
        let driving_b = ctx.driving_field(DRIVING_B)?;
        let driving_c = ctx.driving_field(DRIVING_C)?;
        let ancillary_c = ctx.ancillary_field(ANCILLARY_C)?;

        let writers = ctx.writers();
        let [a, b] = writers.states.histories_mut([STATE_A, STATE_B], n)?;
        let (state_a_prev, state_a) = a.split();
        let (state_b_prev, state_b) = b.split();
        let [transfer_i, transfer_j] = write_disjoint(writers.outwards, [TRANSFER_I, TRANSFER_J], n)?;
        let [output_x] = write_disjoint(writers.outputs, [OUTPUT_X], n)?;

        let inputs = DummyInputs {
            transfer_k,
            transfer_l,
            transfer_n,
            driving_a,
            driving_b,
            driving_c,
            ancillary_c,
            state_a_prev,
            state_b_prev,
        };
        let mut outputs = DummyOutputs {
            state_a,
            state_b,
            transfer_i,
            transfer_j,
            output_x,
        };
        dummy::run(shape, &inputs, &mut outputs);
        Ok(())
    }

    fn finalise(&self) {
        dummy::finalise();
    }
}
