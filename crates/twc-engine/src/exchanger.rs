//! Transfer routing between components.
//!
//! The [`Exchanger`] holds one buffer per routed transfer. After each
//! component runs, the driver publishes that component's outbound
//! buffers into it; later components read them back as inbound
//! transfers. Which component produces and which consume each transfer
//! is fixed at validation time in a [`RoutingPlan`].

use indexmap::IndexMap;
use twc_component::ComponentKind;
use twc_core::{FieldBuffers, FieldName, FieldReader};

/// Producer and consumers of one transfer.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Component writing the transfer.
    pub producer: ComponentKind,
    /// Units declared by the producer.
    pub units: &'static str,
    /// Components reading the transfer, in model order.
    pub consumers: Vec<ComponentKind>,
}

/// Every transfer of a validated model, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoutingPlan {
    routes: IndexMap<FieldName, Route>,
}

impl RoutingPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `producer` as the writer of `name`.
    ///
    /// Returns the existing producer if `name` is already routed; the plan
    /// is left unchanged in that case.
    pub fn add_producer(
        &mut self,
        name: FieldName,
        units: &'static str,
        producer: ComponentKind,
    ) -> Result<(), ComponentKind> {
        if let Some(route) = self.routes.get(name) {
            return Err(route.producer);
        }
        self.routes.insert(
            name,
            Route {
                producer,
                units,
                consumers: Vec::new(),
            },
        );
        Ok(())
    }

    /// Register `consumer` as a reader of `name`.
    ///
    /// Returns `None` if nothing produces `name`.
    pub fn add_consumer(&mut self, name: &str, consumer: ComponentKind) -> Option<&Route> {
        let route = self.routes.get_mut(name)?;
        route.consumers.push(consumer);
        Some(route)
    }

    /// The route of `name`, if any component produces it.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// The producer of `name`.
    pub fn producer(&self, name: &str) -> Option<ComponentKind> {
        self.route(name).map(|r| r.producer)
    }

    /// All routed transfers, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (FieldName, &Route)> + '_ {
        self.routes.iter().map(|(name, route)| (*name, route))
    }

    /// Number of routed transfers.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no transfers are routed.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Transfer buffers shared by all components of a model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Exchanger {
    transfers: FieldBuffers,
}

impl Exchanger {
    /// Create an exchanger with no transfers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a zero-filled buffer for every transfer of `plan`.
    pub fn from_plan(plan: &RoutingPlan, cell_count: usize) -> Self {
        let mut ex = Self::new();
        for (name, _) in plan.routes() {
            ex.declare(name, cell_count);
        }
        ex
    }

    /// Allocate a zero-filled buffer for `name`.
    pub fn declare(&mut self, name: FieldName, cell_count: usize) {
        self.transfers.declare(name, cell_count);
    }

    /// Copy every routed buffer of `outwards` into the exchanger.
    ///
    /// Buffers the exchanger does not route are ignored. Returns the
    /// number of transfers updated.
    pub fn publish(&mut self, outwards: &FieldBuffers) -> usize {
        self.transfers.copy_matching(outwards)
    }

    /// Current value of transfer `name`.
    pub fn transfer(&self, name: &str) -> Option<&[f64]> {
        self.transfers.read(name)
    }

    /// Names of all transfers, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.transfers.names()
    }

    /// Number of transfers.
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// Whether the exchanger routes nothing.
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Reset every transfer to zero.
    pub fn reset(&mut self) {
        self.transfers.zero_all();
    }
}

impl FieldReader for Exchanger {
    fn read(&self, name: &str) -> Option<&[f64]> {
        self.transfer(name)
    }
}
