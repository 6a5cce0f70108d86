//! Model driver for the twc coupling framework.
//!
//! [`Model`] owns every buffer of a coupled run: the data set, the
//! exchanger through which components trade transfers, and each
//! component's state histories and outputs. It validates a
//! [`ModelConfig`] once, then sequences the component lifecycle:
//! initialise, one `run` per component per timestep, finalise.
//!
//! # Timestep order
//!
//! Components run in the order they appear in the configuration. Each
//! sees the exchanger as last published: transfers from components
//! earlier in the order come from the current timestep, those from later
//! components from the previous one (zeros at the first timestep).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod exchanger;
pub mod metrics;
pub mod model;
pub mod parameters;

pub use config::{ConfigError, ModelConfig};
pub use dataset::{AncillaryView, DataKind, DataSet, DrivingView, Variable};
pub use exchanger::{Exchanger, Route, RoutingPlan};
pub use metrics::StepMetrics;
pub use model::{Model, Phase};
pub use parameters::ParameterSet;
