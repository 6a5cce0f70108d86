//! Model configuration, validation, and error types.
//!
//! [`ModelConfig`] is the builder-input for constructing a [`Model`](crate::Model).
//! [`validate()`](ModelConfig::validate) checks every structural invariant
//! once, up front, and returns the [`RoutingPlan`] the model uses to
//! allocate its exchanger. Nothing is checked per timestep except buffer
//! shapes inside each component.

use std::error::Error;
use std::fmt;

use twc_component::{Component, ComponentKind};
use twc_core::{FieldDef, FieldName, GridError, GridShape};

use crate::dataset::{DataKind, DataSet};
use crate::exchanger::RoutingPlan;
use crate::parameters::ParameterSet;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during model configuration validation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// No components were supplied.
    NoComponents,
    /// The grid has zero cells.
    EmptyGrid,
    /// The grid extents overflow when multiplied.
    Grid(GridError),
    /// `timesteps` is zero.
    NoTimesteps,
    /// `timestep_seconds` is not finite and positive.
    InvalidTimestep {
        /// The rejected value.
        value: f64,
    },
    /// Two components fill the same slot.
    DuplicateKind {
        /// The contested kind.
        kind: ComponentKind,
    },
    /// A component declares the same field twice in one category.
    DuplicateField {
        /// Declaring component.
        component: String,
        /// Repeated field.
        field: String,
    },
    /// An inbound transfer no component produces.
    UnroutedTransfer {
        /// Consuming component.
        component: String,
        /// The transfer.
        field: String,
    },
    /// Two components produce the same transfer.
    ConflictingTransfer {
        /// The transfer.
        field: String,
        /// Component registered first.
        first: String,
        /// Component registered second.
        second: String,
    },
    /// A component declares zero solver history.
    InvalidSolverHistory {
        /// Declaring component.
        component: String,
    },
    /// A parameter the component declares has no configured value.
    MissingParameter {
        /// Declaring component.
        component: String,
        /// The parameter.
        name: String,
    },
    /// A parameter or constant value is not finite.
    NonFiniteParameter {
        /// Declaring component.
        component: String,
        /// The parameter or constant.
        name: String,
    },
    /// A driving or ancillary variable is absent from the data set.
    MissingData {
        /// Requesting component.
        component: String,
        /// The variable.
        field: String,
    },
    /// A variable is driving where ancillary is needed, or the reverse.
    DataKindMismatch {
        /// The variable.
        field: String,
        /// Kind the component declared.
        expected: DataKind,
    },
    /// Declared units disagree between producer and consumer.
    UnitsMismatch {
        /// The field.
        field: String,
        /// Units the consumer declared.
        expected: String,
        /// Units found on the producer or in the data set.
        actual: String,
    },
    /// A data grid does not hold one value per cell.
    DataShape {
        /// The variable.
        field: String,
        /// Cell count of the model grid.
        expected: usize,
        /// Length found.
        actual: usize,
    },
    /// A driving variable covers fewer timesteps than the run.
    TooFewTimesteps {
        /// The variable.
        field: String,
        /// Timesteps of the run.
        required: usize,
        /// Timesteps the variable covers.
        available: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoComponents => write!(f, "no components registered"),
            Self::EmptyGrid => write!(f, "grid has zero cells"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::NoTimesteps => write!(f, "timesteps must be at least 1"),
            Self::InvalidTimestep { value } => {
                write!(f, "timestep_seconds must be finite and positive, got {value}")
            }
            Self::DuplicateKind { kind } => {
                write!(f, "more than one {kind} component")
            }
            Self::DuplicateField { component, field } => {
                write!(f, "component '{component}' declares '{field}' twice")
            }
            Self::UnroutedTransfer { component, field } => {
                write!(
                    f,
                    "component '{component}' reads transfer '{field}' which no component produces"
                )
            }
            Self::ConflictingTransfer {
                field,
                first,
                second,
            } => {
                write!(
                    f,
                    "transfer '{field}' produced by both '{first}' and '{second}'"
                )
            }
            Self::InvalidSolverHistory { component } => {
                write!(f, "component '{component}' needs a solver history of at least 1")
            }
            Self::MissingParameter { component, name } => {
                write!(f, "component '{component}' requires parameter '{name}'")
            }
            Self::NonFiniteParameter { component, name } => {
                write!(f, "value of '{name}' for '{component}' is not finite")
            }
            Self::MissingData { component, field } => {
                write!(
                    f,
                    "data set has no variable '{field}' required by '{component}'"
                )
            }
            Self::DataKindMismatch { field, expected } => {
                write!(f, "variable '{field}' is not {expected} data")
            }
            Self::UnitsMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "units of '{field}': expected '{expected}', found '{actual}'"
                )
            }
            Self::DataShape {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "variable '{field}' has {actual} values, grid has {expected} cells"
                )
            }
            Self::TooFewTimesteps {
                field,
                required,
                available,
            } => {
                write!(
                    f,
                    "variable '{field}' covers {available} timesteps, run needs {required}"
                )
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── ModelConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a [`Model`](crate::Model).
///
/// Components run in the order given here. Each may fill one
/// [`ComponentKind`] slot; kinds without a component are simply absent.
pub struct ModelConfig {
    /// Extents shared by every component and every buffer.
    pub shape: GridShape,
    /// Number of timesteps in a full run.
    pub timesteps: usize,
    /// Length of one coupling timestep, in seconds.
    pub timestep_seconds: f64,
    /// Components, in execution order.
    pub components: Vec<Box<dyn Component>>,
    /// Driving and ancillary data for every component.
    pub dataset: DataSet,
    /// Parameter and constant values, by component kind.
    pub parameters: ParameterSet,
}

impl ModelConfig {
    /// Check all structural invariants and build the routing plan.
    ///
    /// Checks, in order: grid extents, timestep settings, component count,
    /// one component per kind, no repeated declarations, solver history,
    /// parameter values, transfer routing and units, then presence, kind,
    /// units and shape of every data variable a component declares.
    pub fn validate(&self) -> Result<RoutingPlan, ConfigError> {
        let cells = self.shape.try_cell_count()?;
        if cells == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.timesteps == 0 {
            return Err(ConfigError::NoTimesteps);
        }
        if !self.timestep_seconds.is_finite() || self.timestep_seconds <= 0.0 {
            return Err(ConfigError::InvalidTimestep {
                value: self.timestep_seconds,
            });
        }
        if self.components.is_empty() {
            return Err(ConfigError::NoComponents);
        }

        let mut seen = Vec::with_capacity(self.components.len());
        for c in &self.components {
            if seen.contains(&c.kind()) {
                return Err(ConfigError::DuplicateKind { kind: c.kind() });
            }
            seen.push(c.kind());
            check_unique(c.as_ref())?;
            if c.solver_history() == 0 {
                return Err(ConfigError::InvalidSolverHistory {
                    component: c.name().to_string(),
                });
            }
            self.check_parameters(c.as_ref())?;
        }

        let plan = self.build_plan()?;

        for c in &self.components {
            for def in c.driving_data() {
                self.check_data(c.as_ref(), &def, DataKind::Driving, cells)?;
            }
            for def in c.ancillary_data() {
                self.check_data(c.as_ref(), &def, DataKind::Ancillary, cells)?;
            }
        }
        Ok(plan)
    }

    fn build_plan(&self) -> Result<RoutingPlan, ConfigError> {
        let mut plan = RoutingPlan::new();
        for c in &self.components {
            for def in c.outwards() {
                if let Err(first) = plan.add_producer(def.name, def.units, c.kind()) {
                    return Err(ConfigError::ConflictingTransfer {
                        field: def.name.to_string(),
                        first: self.component_name(first),
                        second: c.name().to_string(),
                    });
                }
            }
        }
        for c in &self.components {
            for def in c.inwards() {
                let route = plan.add_consumer(def.name, c.kind()).ok_or_else(|| {
                    ConfigError::UnroutedTransfer {
                        component: c.name().to_string(),
                        field: def.name.to_string(),
                    }
                })?;
                if !def.units_match(route.units) {
                    return Err(ConfigError::UnitsMismatch {
                        field: def.name.to_string(),
                        expected: def.units.to_string(),
                        actual: route.units.to_string(),
                    });
                }
            }
        }
        Ok(plan)
    }

    fn check_parameters(&self, component: &dyn Component) -> Result<(), ConfigError> {
        let params = self.parameters.resolve(component);
        let non_finite = |name: &str| ConfigError::NonFiniteParameter {
            component: component.name().to_string(),
            name: name.to_string(),
        };
        for def in component.parameters() {
            let value = params
                .parameter(def.name)
                .ok_or_else(|| ConfigError::MissingParameter {
                    component: component.name().to_string(),
                    name: def.name.to_string(),
                })?;
            if !value.is_finite() {
                return Err(non_finite(def.name));
            }
        }
        for def in component.constants() {
            if !params.constant(def.name).is_some_and(f64::is_finite) {
                return Err(non_finite(def.name));
            }
        }
        Ok(())
    }

    fn check_data(
        &self,
        component: &dyn Component,
        def: &FieldDef,
        kind: DataKind,
        cells: usize,
    ) -> Result<(), ConfigError> {
        let var = self
            .dataset
            .get(def.name)
            .ok_or_else(|| ConfigError::MissingData {
                component: component.name().to_string(),
                field: def.name.to_string(),
            })?;
        if var.kind() != kind {
            return Err(ConfigError::DataKindMismatch {
                field: def.name.to_string(),
                expected: kind,
            });
        }
        if !def.units_match(var.units()) {
            return Err(ConfigError::UnitsMismatch {
                field: def.name.to_string(),
                expected: def.units.to_string(),
                actual: var.units().to_string(),
            });
        }
        if kind == DataKind::Driving && var.timesteps() < self.timesteps {
            return Err(ConfigError::TooFewTimesteps {
                field: def.name.to_string(),
                required: self.timesteps,
                available: var.timesteps(),
            });
        }
        if let Err((_, actual)) = var.check_len(cells) {
            return Err(ConfigError::DataShape {
                field: def.name.to_string(),
                expected: cells,
                actual,
            });
        }
        Ok(())
    }

    fn component_name(&self, kind: ComponentKind) -> String {
        self.components
            .iter()
            .find(|c| c.kind() == kind)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| kind.to_string())
    }
}

fn check_unique(c: &dyn Component) -> Result<(), ConfigError> {
    let defs = |v: Vec<FieldDef>| v.into_iter().map(|d| d.name).collect::<Vec<_>>();
    let groups: [Vec<FieldName>; 7] = [
        defs(c.driving_data()),
        defs(c.ancillary_data()),
        defs(c.inwards()),
        defs(c.outwards()),
        c.states().to_vec(),
        c.outputs().to_vec(),
        defs(c.parameters())
            .into_iter()
            .chain(c.constants().into_iter().map(|d| d.name))
            .collect(),
    ];
    for group in &groups {
        for (i, name) in group.iter().enumerate() {
            if group[..i].contains(name) {
                return Err(ConfigError::DuplicateField {
                    component: c.name().to_string(),
                    field: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use twc_components::{DataComponent, DummySurfaceLayer, NullComponent};
    use twc_core::Parameters;
    use twc_test_utils::{ConstComponent, ScaledComponent};

    struct NoHistory;

    impl Component for NoHistory {
        fn name(&self) -> &str {
            "no_history"
        }
        fn kind(&self) -> ComponentKind {
            ComponentKind::OpenWater
        }
        fn outwards(&self) -> Vec<FieldDef> {
            vec![N]
        }
        fn solver_history(&self) -> usize {
            0
        }
        fn run(
            &self,
            _ctx: &mut twc_component::RunContext<'_>,
        ) -> Result<(), twc_core::ComponentError> {
            Ok(())
        }
    }

    const K: FieldDef = FieldDef::new("transfer_k", "1");
    const L: FieldDef = FieldDef::new("transfer_l", "1");
    const N: FieldDef = FieldDef::new("transfer_n", "1");

    fn dataset(cells: usize, steps: usize) -> DataSet {
        let mut data = DataSet::new();
        for name in ["driving_a", "driving_b", "driving_c"] {
            data.insert_driving(name, "1", vec![vec![1.0; cells]; steps]);
        }
        data.insert_ancillary("ancillary_c", "1", vec![2.0; cells]);
        data
    }

    fn dummy_config() -> ModelConfig {
        ModelConfig {
            shape: GridShape::new(1, 2, 3),
            timesteps: 4,
            timestep_seconds: 3600.0,
            components: vec![
                Box::new(DummySurfaceLayer::new()),
                Box::new(NullComponent::new(ComponentKind::SubSurface, vec![K, L])),
                Box::new(NullComponent::new(ComponentKind::OpenWater, vec![N])),
            ],
            dataset: dataset(6, 4),
            parameters: ParameterSet::new(),
        }
    }

    #[test]
    fn valid_config_builds_plan() {
        let plan = dummy_config().validate().unwrap();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.producer("transfer_l"), Some(ComponentKind::SubSurface));
        assert_eq!(
            plan.route("transfer_n").unwrap().consumers,
            vec![ComponentKind::SurfaceLayer]
        );
        assert!(plan.route("transfer_i").unwrap().consumers.is_empty());
    }

    #[test]
    fn empty_grid_rejected() {
        let mut cfg = dummy_config();
        cfg.shape = GridShape::new(0, 2, 3);
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyGrid));
    }

    #[test]
    fn overflowing_grid_rejected() {
        let mut cfg = dummy_config();
        cfg.shape = GridShape::new(usize::MAX, 2, 1);
        assert!(matches!(cfg.validate(), Err(ConfigError::Grid(_))));
    }

    #[test]
    fn bad_timestep_settings_rejected() {
        let mut cfg = dummy_config();
        cfg.timesteps = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::NoTimesteps));

        let mut cfg = dummy_config();
        cfg.timestep_seconds = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidTimestep { .. })
        ));
        cfg.timestep_seconds = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidTimestep { .. })
        ));
    }

    #[test]
    fn no_components_rejected() {
        let mut cfg = dummy_config();
        cfg.components.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::NoComponents));
    }

    #[test]
    fn duplicate_kind_rejected() {
        let mut cfg = dummy_config();
        cfg.components
            .push(Box::new(NullComponent::for_kind(ComponentKind::OpenWater)));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DuplicateKind {
                kind: ComponentKind::OpenWater
            })
        );
    }

    #[test]
    fn duplicate_declaration_rejected() {
        let mut cfg = dummy_config();
        cfg.components[2] = Box::new(NullComponent::new(ComponentKind::OpenWater, vec![N, N]));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DuplicateField {
                component: "NullComponent".into(),
                field: "transfer_n".into()
            })
        );
    }

    #[test]
    fn unrouted_inward_rejected() {
        let mut cfg = dummy_config();
        cfg.components.pop();
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnroutedTransfer {
                component: "DummySurfaceLayer".into(),
                field: "transfer_n".into()
            })
        );
    }

    #[test]
    fn conflicting_producers_rejected() {
        let mut cfg = dummy_config();
        cfg.components[2] = Box::new(ConstComponent::new(
            "lake",
            ComponentKind::OpenWater,
            vec![N, K],
            1.0,
        ));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ConflictingTransfer {
                field: "transfer_k".into(),
                first: "NullComponent".into(),
                second: "lake".into()
            })
        );
    }

    #[test]
    fn transfer_units_must_agree() {
        let mut cfg = dummy_config();
        cfg.components[2] = Box::new(NullComponent::new(
            ComponentKind::OpenWater,
            vec![FieldDef::new("transfer_n", "kg m-2 s-1")],
        ));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnitsMismatch {
                field: "transfer_n".into(),
                expected: "1".into(),
                actual: "kg m-2 s-1".into()
            })
        );
    }

    #[test]
    fn missing_parameter_rejected() {
        let mut cfg = dummy_config();
        cfg.components[1] = Box::new(ScaledComponent::new(
            "soil",
            ComponentKind::SubSurface,
            vec![K, L],
        ));
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MissingParameter {
                component: "soil".into(),
                name: "scale".into()
            })
        );

        // Values set for another kind do not count.
        cfg.parameters.insert(
            ComponentKind::OpenWater,
            Parameters::new().with_parameter("scale", 1.0),
        );
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingParameter { .. })
        ));

        cfg.parameters.insert(
            ComponentKind::SubSurface,
            Parameters::new().with_parameter("scale", 1.0),
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn non_finite_values_rejected() {
        let mut cfg = dummy_config();
        cfg.components[1] = Box::new(ScaledComponent::new(
            "soil",
            ComponentKind::SubSurface,
            vec![K, L],
        ));
        cfg.parameters.insert(
            ComponentKind::SubSurface,
            Parameters::new().with_parameter("scale", f64::NAN),
        );
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonFiniteParameter {
                component: "soil".into(),
                name: "scale".into()
            })
        );

        cfg.parameters.insert(
            ComponentKind::SubSurface,
            Parameters::new()
                .with_parameter("scale", 1.0)
                .with_constant("offset", f64::INFINITY),
        );
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonFiniteParameter {
                component: "soil".into(),
                name: "offset".into()
            })
        );
    }

    #[test]
    fn zero_solver_history_rejected() {
        let mut cfg = dummy_config();
        cfg.components[2] = Box::new(NoHistory);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidSolverHistory {
                component: "no_history".into()
            })
        );
    }

    #[test]
    fn missing_data_rejected() {
        let mut cfg = dummy_config();
        cfg.dataset = DataSet::new().with_ancillary("ancillary_c", "1", vec![0.0; 6]);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MissingData {
                component: "DummySurfaceLayer".into(),
                field: "driving_a".into()
            })
        );
    }

    #[test]
    fn data_kind_must_match() {
        let mut cfg = dummy_config();
        cfg.dataset
            .insert_driving("ancillary_c", "1", vec![vec![0.0; 6]; 4]);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DataKindMismatch {
                field: "ancillary_c".into(),
                expected: DataKind::Ancillary
            })
        );
    }

    #[test]
    fn data_units_compared_after_whitespace_normalisation() {
        let mut cfg = dummy_config();
        cfg.dataset.insert_ancillary("ancillary_c", " 1 ", vec![0.0; 6]);
        assert!(cfg.validate().is_ok());

        cfg.dataset.insert_ancillary("ancillary_c", "m", vec![0.0; 6]);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnitsMismatch { .. })
        ));
    }

    #[test]
    fn short_driving_record_rejected() {
        let mut cfg = dummy_config();
        cfg.dataset
            .insert_driving("driving_b", "1", vec![vec![0.0; 6]; 3]);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::TooFewTimesteps {
                field: "driving_b".into(),
                required: 4,
                available: 3
            })
        );
    }

    #[test]
    fn mis_sized_grid_rejected() {
        let mut cfg = dummy_config();
        cfg.dataset.insert_ancillary("ancillary_c", "1", vec![0.0; 5]);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::DataShape {
                field: "ancillary_c".into(),
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn data_component_needs_driving_records() {
        let cfg = ModelConfig {
            shape: GridShape::new(1, 1, 2),
            timesteps: 1,
            timestep_seconds: 60.0,
            components: vec![Box::new(DataComponent::new(
                ComponentKind::SubSurface,
                vec![K],
            ))],
            dataset: DataSet::new(),
            parameters: ParameterSet::new(),
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingData { .. })
        ));
    }

    #[test]
    fn display_names_the_field() {
        let e = ConfigError::TooFewTimesteps {
            field: "driving_a".into(),
            required: 4,
            available: 2,
        };
        assert!(e.to_string().contains("driving_a"));
        assert!(ConfigError::Grid(GridError::CellCountOverflow {
            shape: GridShape::new(1, 1, 1)
        })
        .source()
        .is_some());
    }
}
