//! The [`Component`] trait.
//!
//! Components are interchangeable units of the coupled model, one per
//! [`ComponentKind`]. They declare their data needs once, up front, so
//! the model driver can validate routing and allocate every buffer
//! before the first timestep.

use twc_core::{ComponentError, ConstantDef, FieldDef, FieldNames};

use crate::context::{InitContext, RunContext};
use crate::kind::ComponentKind;

/// A coupled model component with an initialise / run / finalise lifecycle.
///
/// # Contract
///
/// - `run()` MUST be deterministic: same inputs produce identical outputs.
/// - `&self`: components keep no mutable state of their own; everything
///   carried between timesteps lives in the state histories the driver
///   hands back each call.
/// - The declaration methods are called once at model construction, not
///   per timestep.
///
/// # Examples
///
/// A component that publishes a constant field to the exchanger:
///
/// ```
/// use twc_component::{Component, ComponentKind, RunContext};
/// use twc_core::{ComponentError, FieldDef, FieldWriter};
///
/// struct ConstantRunoff {
///     value: f64,
/// }
///
/// impl Component for ConstantRunoff {
///     fn name(&self) -> &str { "constant_runoff" }
///
///     fn kind(&self) -> ComponentKind { ComponentKind::SubSurface }
///
///     fn outwards(&self) -> Vec<FieldDef> {
///         vec![FieldDef::new("runoff", "kg m-2 s-1")]
///     }
///
///     fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
///         let out = ctx.outwards().write("runoff").ok_or(
///             ComponentError::MissingField { name: "runoff".into() },
///         )?;
///         out.fill(self.value);
///         Ok(())
///     }
/// }
///
/// let c = ConstantRunoff { value: 0.5 };
/// assert_eq!(c.kind().category(), "subsurface");
/// ```
pub trait Component: Send + 'static {
    /// Human-readable name for error reporting and logging.
    fn name(&self) -> &str;

    /// Which slot of the coupled model this component fills.
    fn kind(&self) -> ComponentKind;

    /// Time-varying external forcing, looked up per timestep.
    fn driving_data(&self) -> Vec<FieldDef> {
        Vec::new()
    }

    /// Static auxiliary data, looked up once per run.
    fn ancillary_data(&self) -> Vec<FieldDef> {
        Vec::new()
    }

    /// Transfers this component reads from the exchanger.
    fn inwards(&self) -> Vec<FieldDef> {
        Vec::new()
    }

    /// Transfers this component writes for the exchanger to route.
    fn outwards(&self) -> Vec<FieldDef>;

    /// State fields carried from one timestep to the next.
    fn states(&self) -> FieldNames {
        FieldNames::new()
    }

    /// Diagnostic output fields, not routed through the exchanger.
    fn outputs(&self) -> FieldNames {
        FieldNames::new()
    }

    /// Scalar parameters the model must be configured with.
    fn parameters(&self) -> Vec<FieldDef> {
        Vec::new()
    }

    /// Scalar constants, each with a default the configuration may
    /// override.
    fn constants(&self) -> Vec<ConstantDef> {
        Vec::new()
    }

    /// Number of past instances kept for each state. Multi-step solvers
    /// raise this; must be at least 1.
    fn solver_history(&self) -> usize {
        1
    }

    /// Set initial conditions before the first timestep.
    ///
    /// Writes the past instances of each state; the first `run()` reads
    /// them as its history. Default: leave the zero-filled states as is.
    fn initialise(&self, ctx: &mut InitContext<'_>) -> Result<(), ComponentError> {
        let _ = ctx;
        Ok(())
    }

    /// Advance one coupling timestep.
    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError>;

    /// Called once after the last timestep. Default: no-op.
    fn finalise(&self) {}
}
