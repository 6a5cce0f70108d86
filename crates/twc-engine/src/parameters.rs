//! Parameter and constant values for every component of a model.

use indexmap::IndexMap;

use twc_component::{Component, ComponentKind};
use twc_core::Parameters;

/// [`Parameters`] keyed by the kind of component they configure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterSet {
    by_kind: IndexMap<ComponentKind, Parameters>,
}

impl ParameterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, kind: ComponentKind, params: Parameters) -> Self {
        self.insert(kind, params);
        self
    }

    /// Set the values for the component of `kind`, replacing any earlier set.
    pub fn insert(&mut self, kind: ComponentKind, params: Parameters) {
        self.by_kind.insert(kind, params);
    }

    /// Values for the component of `kind`.
    pub fn get(&self, kind: ComponentKind) -> Option<&Parameters> {
        self.by_kind.get(&kind)
    }

    /// Configured values for `component`, with every declared constant
    /// that was left unset filled with its default.
    pub fn resolve(&self, component: &dyn Component) -> Parameters {
        let mut params = self.get(component.kind()).cloned().unwrap_or_default();
        params.fill_defaults(&component.constants());
        params
    }

    /// Number of kinds with values.
    pub fn len(&self) -> usize {
        self.by_kind.len()
    }

    /// Whether no kind has values.
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}
