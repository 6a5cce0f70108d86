//! The coupled model driver.
//!
//! [`Model`] is the primary user-facing API. It consumes a validated
//! [`ModelConfig`], allocates every buffer once, and then sequences the
//! component lifecycle:
//!
//! ```text
//! Configured ──initialise()──▶ Initialised ──step()×N──▶ ──finalise()──▶ Finalised
//!      │                          ▲    │
//!      └─────────run()────────────┘    └──initialise()── resets to timestep 0
//! ```
//!
//! # Ownership model
//!
//! `Model` is [`Send`] but not [`Sync`]. Components only ever see
//! borrowed views of buffers the model owns, so no component can keep a
//! reference past the call it was handed one in.
//!
//! # Failure
//!
//! A failing component aborts the timestep: later components do not run,
//! states are not rotated, and the timestep counter does not advance.
//! Transfers already published by earlier components in that timestep
//! stay in the exchanger.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};
use twc_component::{Component, ComponentKind, InitContext, RunContext};
use twc_core::{
    FieldBuffers, FieldReader, GridShape, Parameters, StateHistory, StateStore, StepError,
    TimestepId,
};

use crate::config::{ConfigError, ModelConfig};
use crate::dataset::{AncillaryView, DataSet, DrivingView};
use crate::exchanger::{Exchanger, RoutingPlan};
use crate::metrics::StepMetrics;

// Compile-time assertion: Model is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Model>();
    }
};

/// Lifecycle phase of a [`Model`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Buffers allocated, no component initialised yet.
    Configured,
    /// Components initialised; timesteps may run.
    Initialised,
    /// Components finalised; the model accepts no further calls.
    Finalised,
}

struct Slot {
    component: Box<dyn Component>,
    params: Parameters,
    states: StateStore,
    outwards: FieldBuffers,
    outputs: FieldBuffers,
}

impl Slot {
    fn new(component: Box<dyn Component>, params: Parameters, cells: usize) -> Self {
        let history = component.solver_history();
        let mut states = StateStore::new();
        for name in component.states() {
            states.declare_with_history(name, cells, history);
        }
        let mut outwards = FieldBuffers::new();
        for def in component.outwards() {
            outwards.declare(def.name, cells);
        }
        let mut outputs = FieldBuffers::new();
        for name in component.outputs() {
            outputs.declare(name, cells);
        }
        Self {
            component,
            params,
            states,
            outwards,
            outputs,
        }
    }

    fn reset(&mut self) {
        self.states.clear_all();
        self.outwards.zero_all();
        self.outputs.zero_all();
    }
}

/// A coupled model: components, their buffers, and the data driving them.
///
/// Created from a [`ModelConfig`] via [`new()`](Model::new).
///
/// # Example
///
/// ```
/// use twc_component::ComponentKind;
/// use twc_components::NullComponent;
/// use twc_core::GridShape;
/// use twc_engine::{DataSet, Model, ModelConfig, ParameterSet};
///
/// let config = ModelConfig {
///     shape: GridShape::new(1, 2, 2),
///     timesteps: 3,
///     timestep_seconds: 3600.0,
///     components: vec![Box::new(NullComponent::for_kind(ComponentKind::SubSurface))],
///     dataset: DataSet::new(),
///     parameters: ParameterSet::new(),
/// };
/// let mut model = Model::new(config).unwrap();
/// assert_eq!(model.run().unwrap(), 3);
/// assert_eq!(model.transfer("runoff").unwrap(), &[0.0; 4]);
/// ```
pub struct Model {
    shape: GridShape,
    timesteps: usize,
    timestep_seconds: f64,
    slots: Vec<Slot>,
    dataset: DataSet,
    plan: RoutingPlan,
    exchanger: Exchanger,
    phase: Phase,
    next_timestep: usize,
    last_metrics: StepMetrics,
}

impl Model {
    /// Validate `config` and allocate every buffer.
    ///
    /// All buffers start zero-filled. No component method other than the
    /// declaration methods is called.
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        let plan = config.validate()?;
        let cells = config.shape.cell_count();
        let exchanger = Exchanger::from_plan(&plan, cells);
        let parameters = config.parameters;
        let slots = config
            .components
            .into_iter()
            .map(|c| {
                let params = parameters.resolve(c.as_ref());
                Slot::new(c, params, cells)
            })
            .collect();
        Ok(Self {
            shape: config.shape,
            timesteps: config.timesteps,
            timestep_seconds: config.timestep_seconds,
            slots,
            dataset: config.dataset,
            plan,
            exchanger,
            phase: Phase::Configured,
            next_timestep: 0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Set initial conditions for every component.
    ///
    /// Zeroes all buffers, rewinds to timestep 0, then calls each
    /// component's `initialise()` in run order. May be called again on an
    /// initialised model to restart the run.
    ///
    /// If a component fails, the model drops back to
    /// [`Phase::Configured`] with every buffer zeroed, and `step()` is
    /// refused until `initialise()` succeeds.
    pub fn initialise(&mut self) -> Result<(), StepError> {
        if self.phase == Phase::Finalised {
            return Err(StepError::Finalised);
        }
        self.phase = Phase::Configured;
        self.exchanger.reset();
        self.next_timestep = 0;
        self.last_metrics = StepMetrics::default();
        for slot in &mut self.slots {
            slot.reset();
        }
        for slot in &mut self.slots {
            let mut ctx =
                InitContext::new(self.shape, &mut slot.states).with_parameters(&slot.params);
            if let Err(reason) = slot.component.initialise(&mut ctx) {
                let name = slot.component.name().to_string();
                warn!(component = %name, error = %reason, "initialise failed");
                return Err(StepError::ComponentFailed { name, reason });
            }
        }
        self.phase = Phase::Initialised;
        info!(
            shape = %self.shape,
            components = self.slots.len(),
            transfers = self.exchanger.len(),
            timesteps = self.timesteps,
            "model initialised"
        );
        Ok(())
    }

    /// Run one coupling timestep.
    ///
    /// Each component runs in turn against the exchanger as last
    /// published, and its outbound transfers are published as soon as it
    /// returns. After all components succeed, every state history is
    /// rotated so the states just written become the previous states of
    /// the next timestep.
    pub fn step(&mut self) -> Result<StepMetrics, StepError> {
        match self.phase {
            Phase::Configured => return Err(StepError::NotInitialised),
            Phase::Finalised => return Err(StepError::Finalised),
            Phase::Initialised => {}
        }
        if self.next_timestep >= self.timesteps {
            return Err(StepError::OutOfTimesteps {
                timesteps: self.timesteps,
            });
        }

        let step_start = Instant::now();
        let t = self.next_timestep;
        let timestep = TimestepId(t as u64);
        let driving = DrivingView::new(&self.dataset, t);
        let ancillary = AncillaryView::new(&self.dataset);

        let mut component_us = Vec::with_capacity(self.slots.len());
        for slot in &mut self.slots {
            let start = Instant::now();
            let result = {
                let mut ctx = RunContext::new(
                    self.shape,
                    timestep,
                    &driving,
                    &ancillary,
                    &self.exchanger,
                    &mut slot.states,
                    &mut slot.outwards,
                    &mut slot.outputs,
                )
                .with_parameters(&slot.params);
                slot.component.run(&mut ctx)
            };
            if let Err(reason) = result {
                let name = slot.component.name().to_string();
                warn!(component = %name, %timestep, error = %reason, "component failed");
                return Err(StepError::ComponentFailed { name, reason });
            }
            let published = self.exchanger.publish(&slot.outwards);
            let us = start.elapsed().as_micros() as u64;
            debug!(
                component = slot.component.name(),
                %timestep,
                published,
                us,
                "component ran"
            );
            component_us.push((slot.component.name().to_string(), us));
        }

        for slot in &mut self.slots {
            slot.states.rotate_all();
        }
        self.next_timestep += 1;

        let metrics = StepMetrics {
            timestep,
            total_us: step_start.elapsed().as_micros() as u64,
            component_us,
        };
        debug!(%timestep, total_us = metrics.total_us, "timestep complete");
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// Run the whole simulation: initialise if needed, step through every
    /// remaining timestep, then finalise.
    ///
    /// Returns the number of timesteps run by this call.
    pub fn run(&mut self) -> Result<usize, StepError> {
        match self.phase {
            Phase::Finalised => return Err(StepError::Finalised),
            Phase::Configured => self.initialise()?,
            Phase::Initialised => {}
        }
        let mut steps = 0;
        while self.next_timestep < self.timesteps {
            self.step()?;
            steps += 1;
        }
        self.finalise()?;
        Ok(steps)
    }

    /// Call every component's `finalise()` and close the model.
    pub fn finalise(&mut self) -> Result<(), StepError> {
        match self.phase {
            Phase::Configured => return Err(StepError::NotInitialised),
            Phase::Finalised => return Err(StepError::Finalised),
            Phase::Initialised => {}
        }
        for slot in &self.slots {
            slot.component.finalise();
        }
        self.phase = Phase::Finalised;
        info!(timesteps_run = self.next_timestep, "model finalised");
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the next timestep `step()` will run.
    pub fn current_timestep(&self) -> TimestepId {
        TimestepId(self.next_timestep as u64)
    }

    /// Number of timesteps in a full run.
    pub fn timesteps(&self) -> usize {
        self.timesteps
    }

    /// Length of one coupling timestep, in seconds.
    pub fn timestep_seconds(&self) -> f64 {
        self.timestep_seconds
    }

    /// Simulated time elapsed since initialisation, in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.next_timestep as f64 * self.timestep_seconds
    }

    /// Grid extents shared by every buffer.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// The transfer buffers.
    pub fn exchanger(&self) -> &Exchanger {
        &self.exchanger
    }

    /// The routing plan built at validation.
    pub fn plan(&self) -> &RoutingPlan {
        &self.plan
    }

    /// Current value of transfer `name`.
    pub fn transfer(&self, name: &str) -> Option<&[f64]> {
        self.exchanger.transfer(name)
    }

    /// Output `name` of the component of `kind`, as of the last timestep.
    pub fn output(&self, kind: ComponentKind, name: &str) -> Option<&[f64]> {
        self.slot(kind)?.outputs.read(name)
    }

    /// Resolved parameters and constants of the component of `kind`.
    pub fn parameters(&self, kind: ComponentKind) -> Option<&Parameters> {
        self.slot(kind).map(|s| &s.params)
    }

    /// State `name` of the component of `kind`.
    ///
    /// Between timesteps, [`StateHistory::previous`] holds the state
    /// written by the last timestep (the initial condition before the
    /// first one).
    pub fn state(&self, kind: ComponentKind, name: &str) -> Option<&StateHistory> {
        self.slot(kind)?.states.get(name)
    }

    /// Names of the components, in run order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|s| s.component.name())
    }

    /// Metrics of the most recent successful timestep.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    fn slot(&self, kind: ComponentKind) -> Option<&Slot> {
        self.slots.iter().find(|s| s.component.kind() == kind)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("shape", &self.shape)
            .field("phase", &self.phase)
            .field("current_timestep", &self.next_timestep)
            .field("timesteps", &self.timesteps)
            .field("components", &self.slots.len())
            .field("transfers", &self.exchanger.len())
            .finish()
    }
}
