//! Reusable component test fixtures.
//!
//! Standard components for model validation and driver testing:
//!
//! - [`ConstComponent`]: writes a constant to each outbound transfer.
//! - [`EchoComponent`]: copies each inbound transfer to an output of
//!   the same name, so tests can see what the exchanger delivered.
//! - [`ScaledComponent`]: writes a value built from a required parameter
//!   and a defaulted constant.
//! - [`FailingComponent`]: `run` fails deterministically after N calls.
//! - [`FailingInitComponent`]: `initialise` fails after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use twc_component::{Component, ComponentKind, InitContext, RunContext};
use twc_core::{ComponentError, ConstantDef, FieldDef, FieldNames, FieldWriter};

fn write_required<'w>(
    writer: &'w mut dyn FieldWriter,
    name: &str,
) -> Result<&'w mut [f64], ComponentError> {
    writer.write(name).ok_or_else(|| ComponentError::MissingField {
        name: name.to_string(),
    })
}

/// Writes a constant value to every cell of each outbound transfer.
pub struct ConstComponent {
    pub name: String,
    pub kind: ComponentKind,
    pub outwards: Vec<FieldDef>,
    pub value: f64,
}

impl ConstComponent {
    pub fn new(
        name: impl Into<String>,
        kind: ComponentKind,
        outwards: Vec<FieldDef>,
        value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            outwards,
            value,
        }
    }
}

impl Component for ConstComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn outwards(&self) -> Vec<FieldDef> {
        self.outwards.clone()
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        for def in &self.outwards {
            write_required(ctx.outwards(), def.name)?.fill(self.value);
        }
        Ok(())
    }
}

/// Copies each inbound transfer to an identically named output.
pub struct EchoComponent {
    pub name: String,
    pub kind: ComponentKind,
    pub inwards: Vec<FieldDef>,
}

impl EchoComponent {
    pub fn new(name: impl Into<String>, kind: ComponentKind, inwards: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            kind,
            inwards,
        }
    }
}

impl Component for EchoComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn inwards(&self) -> Vec<FieldDef> {
        self.inwards.clone()
    }

    fn outwards(&self) -> Vec<FieldDef> {
        Vec::new()
    }

    fn outputs(&self) -> FieldNames {
        self.inwards.iter().map(|d| d.name).collect()
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        for def in &self.inwards {
            let src = ctx.inward_field(def.name)?;
            write_required(ctx.outputs(), def.name)?.copy_from_slice(src);
        }
        Ok(())
    }
}

/// Writes `scale * (t + 1) + offset` to every outbound transfer at
/// timestep `t`.
///
/// `scale` is a required parameter; `offset` is a constant defaulting to 0.
pub struct ScaledComponent {
    pub name: String,
    pub kind: ComponentKind,
    pub outwards: Vec<FieldDef>,
}

impl ScaledComponent {
    pub const SCALE: FieldDef = FieldDef::new("scale", "1");
    pub const OFFSET: ConstantDef = ConstantDef::new("offset", "1", 0.0);

    pub fn new(name: impl Into<String>, kind: ComponentKind, outwards: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            kind,
            outwards,
        }
    }
}

impl Component for ScaledComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn outwards(&self) -> Vec<FieldDef> {
        self.outwards.clone()
    }

    fn parameters(&self) -> Vec<FieldDef> {
        vec![Self::SCALE]
    }

    fn constants(&self) -> Vec<ConstantDef> {
        vec![Self::OFFSET]
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        let scale = ctx.parameter(Self::SCALE.name)?;
        let offset = ctx.constant(Self::OFFSET.name)?;
        let value = scale * (ctx.timestep().0 + 1) as f64 + offset;
        for def in &self.outwards {
            write_required(ctx.outwards(), def.name)?.fill(value);
        }
        Ok(())
    }
}

/// Succeeds in `initialise` a configurable number of times, then fails.
///
/// `run` writes zeros to each outbound transfer.
pub struct FailingInitComponent {
    pub name: String,
    pub kind: ComponentKind,
    pub outwards: Vec<FieldDef>,
    pub succeed_count: usize,
    init_count: AtomicUsize,
}

impl FailingInitComponent {
    pub fn new(
        name: impl Into<String>,
        kind: ComponentKind,
        outwards: Vec<FieldDef>,
        succeed_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            outwards,
            succeed_count,
            init_count: AtomicUsize::new(0),
        }
    }

    /// How many times `initialise()` has been called.
    pub fn initialisations(&self) -> usize {
        self.init_count.load(Ordering::Relaxed)
    }
}

impl Component for FailingInitComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn outwards(&self) -> Vec<FieldDef> {
        self.outwards.clone()
    }

    fn initialise(&self, _ctx: &mut InitContext<'_>) -> Result<(), ComponentError> {
        let n = self.init_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ComponentError::ExecutionFailed {
                reason: format!(
                    "deliberate initialise failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(())
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        for def in &self.outwards {
            write_required(ctx.outwards(), def.name)?.fill(0.0);
        }
        Ok(())
    }
}

/// Fails deterministically after a configurable number of successful calls.
///
/// Useful for testing error propagation in the model driver. Uses
/// `AtomicUsize` for the call counter so it satisfies `Send`.
pub struct FailingComponent {
    pub name: String,
    pub kind: ComponentKind,
    pub outwards: Vec<FieldDef>,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingComponent {
    /// Create a component that succeeds `succeed_count` times then fails.
    pub fn new(
        name: impl Into<String>,
        kind: ComponentKind,
        outwards: Vec<FieldDef>,
        succeed_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            outwards,
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `run()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Component for FailingComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn outwards(&self) -> Vec<FieldDef> {
        self.outwards.clone()
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<(), ComponentError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ComponentError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        // On success, fill outwards with the call index for traceability.
        for def in &self.outwards {
            write_required(ctx.outwards(), def.name)?.fill(n as f64);
        }
        Ok(())
    }
}
