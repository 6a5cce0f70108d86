//! Benchmark profiles for the twc coupling framework.
//!
//! Provides pre-built [`ModelConfig`] profiles coupling the dummy surface
//! layer to a null neighbour:
//!
//! - [`reference_profile`]: 1x100x100 grid (10K cells)
//! - [`stress_profile`]: 10x100x100 grid (100K cells)

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use twc_component::ComponentKind;
use twc_components::{DummySurfaceLayer, NullComponent};
use twc_core::{FieldDef, GridShape};
use twc_engine::{DataSet, ModelConfig, ParameterSet};

/// Build a reference benchmark profile: 1x100x100 grid (10K cells).
pub fn reference_profile(timesteps: usize) -> ModelConfig {
    profile(GridShape::new(1, 100, 100), timesteps)
}

/// Build a stress benchmark profile: 10x100x100 grid (100K cells).
///
/// Same components as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(timesteps: usize) -> ModelConfig {
    profile(GridShape::new(10, 100, 100), timesteps)
}

/// Dummy surface layer plus a null open-water slot feeding it zeros.
pub fn profile(shape: GridShape, timesteps: usize) -> ModelConfig {
    ModelConfig {
        shape,
        timesteps,
        timestep_seconds: 3600.0,
        components: vec![
            Box::new(DummySurfaceLayer::new()),
            Box::new(NullComponent::new(
                ComponentKind::OpenWater,
                vec![
                    FieldDef::new("transfer_k", "1"),
                    FieldDef::new("transfer_l", "1"),
                    FieldDef::new("transfer_n", "1"),
                ],
            )),
        ],
        dataset: dummy_data(shape.cell_count(), timesteps),
        parameters: ParameterSet::new(),
    }
}

/// Driving and ancillary data for the dummy surface layer.
///
/// Values vary smoothly with cell and timestep so no two grids are equal.
pub fn dummy_data(cells: usize, timesteps: usize) -> DataSet {
    let grid = |scale: f64, t: usize| -> Vec<f64> {
        (0..cells)
            .map(|p| scale * ((p + t) as f64 * 0.01).sin())
            .collect()
    };
    let mut data = DataSet::new();
    for (name, scale) in [("driving_a", 1.0), ("driving_b", 2.0), ("driving_c", 3.0)] {
        let steps = (0..timesteps).map(|t| grid(scale, t)).collect();
        data.insert_driving(name, "1", steps);
    }
    data.insert_ancillary("ancillary_c", "1", grid(0.5, 0));
    data
}
