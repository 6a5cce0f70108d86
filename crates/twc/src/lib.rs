//! twc: a component coupling framework for terrestrial water cycle models.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! twc sub-crates. For most users, adding `twc` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use twc::prelude::*;
//!
//! // Couple the dummy surface layer to a neighbour feeding it zeros.
//! let shape = GridShape::new(1, 2, 2);
//! let cells = shape.cell_count();
//! let dataset = DataSet::new()
//!     .with_driving("driving_a", "1", vec![vec![1.0; cells]; 2])
//!     .with_driving("driving_b", "1", vec![vec![2.0; cells]; 2])
//!     .with_driving("driving_c", "1", vec![vec![3.0; cells]; 2])
//!     .with_ancillary("ancillary_c", "1", vec![2.0; cells]);
//! let neighbour = NullComponent::new(
//!     ComponentKind::OpenWater,
//!     vec![
//!         FieldDef::new("transfer_k", "1"),
//!         FieldDef::new("transfer_l", "1"),
//!         FieldDef::new("transfer_n", "1"),
//!     ],
//! );
//! let config = ModelConfig {
//!     shape,
//!     timesteps: 2,
//!     timestep_seconds: 3600.0,
//!     components: vec![Box::new(DummySurfaceLayer::new()), Box::new(neighbour)],
//!     dataset,
//!     parameters: ParameterSet::new(),
//! };
//! let mut model = Model::new(config).unwrap();
//! assert_eq!(model.run().unwrap(), 2);
//!
//! // After two timesteps: a = 2, so i = 1 + 2 + 0 + 2 * 2.
//! assert_eq!(model.transfer("transfer_i").unwrap(), &[7.0; 4]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `twc-core` | Grid shape, field definitions, buffers, state histories, errors |
//! | [`component`] | `twc-component` | Component trait, kinds, execution contexts |
//! | [`components`] | `twc-components` | Dummy kernel, dummy surface layer, null and data components |
//! | [`engine`] | `twc-engine` | Model driver, configuration, parameters, data set, exchanger |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`twc-core`).
///
/// Contains the grid shape and its linearisation, field definitions, the
/// buffer traits ([`types::FieldReader`], [`types::FieldWriter`]),
/// [`types::StateHistory`] and component [`types::Parameters`].
pub use twc_core as types;

/// The component lifecycle trait (`twc-component`).
///
/// [`component::Component`] is the main extension point for coupling new
/// models into a run.
pub use twc_component as component;

/// Concrete components (`twc-components`).
///
/// Includes [`components::DummySurfaceLayer`] and its kernel in
/// [`components::dummy`], plus the [`components::NullComponent`] and
/// [`components::DataComponent`] stand-ins.
pub use twc_components as components;

/// The model driver (`twc-engine`).
///
/// Build a [`engine::ModelConfig`], hand it to [`engine::Model::new`], then
/// `initialise`, `step` and `finalise` or simply `run`.
pub use twc_engine as engine;

/// Common imports for typical twc usage.
///
/// ```rust
/// use twc::prelude::*;
/// ```
///
/// This imports the most frequently used types: grid shape, field
/// definitions, the component trait and contexts, the bundled components
/// and the model driver.
pub mod prelude {
    // Core types and traits
    pub use twc_core::{
        ConstantDef, FieldDef, FieldReader, FieldWriter, GridShape, Parameters, StateHistory,
        TimestepId,
    };

    // Errors
    pub use twc_core::{ComponentError, StepError};

    // Component
    pub use twc_component::{Component, ComponentKind, InitContext, RunContext};

    // Components
    pub use twc_components::{DataComponent, DummySurfaceLayer, NullComponent};

    // Engine
    pub use twc_engine::{ConfigError, DataSet, Model, ModelConfig, ParameterSet, StepMetrics};
}
