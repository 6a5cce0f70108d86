//! Execution contexts passed to components.
//!
//! [`RunContext`] gives a component read access to its driving data,
//! ancillary data and inbound transfers, plus split-borrow mutable access
//! to its state histories, outbound transfers and outputs. Every buffer
//! is owned by the model driver and only borrowed for one call. Both
//! contexts also carry the component's scalar parameters and constants.

use twc_core::{
    read_required, ComponentError, FieldReader, FieldWriter, GridShape, Parameters, StateStore,
    TimestepId,
};

fn lookup(
    params: Option<&Parameters>,
    name: &str,
    get: fn(&Parameters, &str) -> Option<f64>,
) -> Result<f64, ComponentError> {
    params
        .and_then(|p| get(p, name))
        .ok_or_else(|| ComponentError::MissingParameter {
            name: name.to_string(),
        })
}

/// Context passed to [`Component::initialise`](crate::Component::initialise).
pub struct InitContext<'a> {
    shape: GridShape,
    states: &'a mut StateStore,
    params: Option<&'a Parameters>,
}

impl<'a> InitContext<'a> {
    /// Construct a new init context with no parameters.
    pub fn new(shape: GridShape, states: &'a mut StateStore) -> Self {
        Self {
            shape,
            states,
            params: None,
        }
    }

    /// Attach the component's parameters and constants.
    pub fn with_parameters(mut self, params: &'a Parameters) -> Self {
        self.params = Some(params);
        self
    }

    /// Value of constant `name`.
    pub fn constant(&self, name: &str) -> Result<f64, ComponentError> {
        lookup(self.params, name, Parameters::constant)
    }

    /// Value of parameter `name`.
    pub fn parameter(&self, name: &str) -> Result<f64, ComponentError> {
        lookup(self.params, name, Parameters::parameter)
    }

    /// Grid extents shared by every buffer.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// The component's state histories, zero-filled.
    pub fn states(&mut self) -> &mut StateStore {
        self.states
    }
}

/// The mutable half of a [`RunContext`], borrowed all at once.
///
/// Lets a component hold its states, outbound transfers and outputs
/// simultaneously, which a single-accessor API cannot express.
pub struct RunWriters<'b> {
    /// State histories: previous instances to read, current to write.
    pub states: &'b mut StateStore,
    /// Outbound transfer buffers, routed by the exchanger after `run()`.
    pub outwards: &'b mut dyn FieldWriter,
    /// Output buffers.
    pub outputs: &'b mut dyn FieldWriter,
}

/// Execution context passed to each component's `run()` method.
///
/// Uses dynamic dispatch (`&dyn FieldReader`, `&mut dyn FieldWriter`) to
/// keep the [`Component`](crate::Component) trait object-safe while
/// supporting mock-based testing.
pub struct RunContext<'a> {
    shape: GridShape,
    timestep: TimestepId,
    driving: &'a dyn FieldReader,
    ancillary: &'a dyn FieldReader,
    inwards: &'a dyn FieldReader,
    states: &'a mut StateStore,
    outwards: &'a mut dyn FieldWriter,
    outputs: &'a mut dyn FieldWriter,
    params: Option<&'a Parameters>,
}

impl<'a> RunContext<'a> {
    /// Construct a new run context.
    ///
    /// Typically called by the model driver, not by components directly.
    /// For testing, construct with mock readers/writers from `twc-test-utils`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        shape: GridShape,
        timestep: TimestepId,
        driving: &'a dyn FieldReader,
        ancillary: &'a dyn FieldReader,
        inwards: &'a dyn FieldReader,
        states: &'a mut StateStore,
        outwards: &'a mut dyn FieldWriter,
        outputs: &'a mut dyn FieldWriter,
    ) -> Self {
        Self {
            shape,
            timestep,
            driving,
            ancillary,
            inwards,
            states,
            outwards,
            outputs,
            params: None,
        }
    }

    /// Attach the component's parameters and constants.
    pub fn with_parameters(mut self, params: &'a Parameters) -> Self {
        self.params = Some(params);
        self
    }

    /// Grid extents shared by every buffer.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Value of parameter `name`.
    pub fn parameter(&self, name: &str) -> Result<f64, ComponentError> {
        lookup(self.params, name, Parameters::parameter)
    }

    /// Value of constant `name`, configured or defaulted.
    pub fn constant(&self, name: &str) -> Result<f64, ComponentError> {
        lookup(self.params, name, Parameters::constant)
    }

    /// Index of the timestep being run.
    pub fn timestep(&self) -> TimestepId {
        self.timestep
    }

    /// Driving data for this timestep.
    pub fn driving(&self) -> &'a dyn FieldReader {
        self.driving
    }

    /// Ancillary data.
    pub fn ancillary(&self) -> &'a dyn FieldReader {
        self.ancillary
    }

    /// Inbound transfers, as last published to the exchanger.
    pub fn inwards(&self) -> &'a dyn FieldReader {
        self.inwards
    }

    /// A driving field that must exist with one value per cell.
    pub fn driving_field(&self, name: &str) -> Result<&'a [f64], ComponentError> {
        read_required(self.driving, name, self.shape.cell_count())
    }

    /// An ancillary field that must exist with one value per cell.
    pub fn ancillary_field(&self, name: &str) -> Result<&'a [f64], ComponentError> {
        read_required(self.ancillary, name, self.shape.cell_count())
    }

    /// An inbound transfer that must exist with one value per cell.
    pub fn inward_field(&self, name: &str) -> Result<&'a [f64], ComponentError> {
        read_required(self.inwards, name, self.shape.cell_count())
    }

    /// State histories.
    pub fn states(&mut self) -> &mut StateStore {
        self.states
    }

    /// Outbound transfer writer.
    pub fn outwards(&mut self) -> &mut dyn FieldWriter {
        self.outwards
    }

    /// Output writer.
    pub fn outputs(&mut self) -> &mut dyn FieldWriter {
        self.outputs
    }

    /// Borrow states, outbound transfers and outputs together.
    pub fn writers(&mut self) -> RunWriters<'_> {
        RunWriters {
            states: self.states,
            outwards: self.outwards,
            outputs: self.outputs,
        }
    }
}
