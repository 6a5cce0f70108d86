//! In-memory driving and ancillary data.
//!
//! A [`DataSet`] maps variable names to gridded values with declared
//! units. Driving variables hold one grid per timestep; ancillary
//! variables hold a single grid for the whole run. The model driver
//! exposes them to components through [`DrivingView`] and
//! [`AncillaryView`], which implement [`FieldReader`].

use std::fmt;

use indexmap::IndexMap;
use twc_core::FieldReader;

/// Whether a variable varies in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    /// One grid per timestep.
    Driving,
    /// One grid for the whole run.
    Ancillary,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driving => write!(f, "driving"),
            Self::Ancillary => write!(f, "ancillary"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Values {
    Driving(Vec<Vec<f64>>),
    Ancillary(Vec<f64>),
}

/// A named variable of a [`DataSet`].
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    units: String,
    values: Values,
}

impl Variable {
    /// Declared units.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Whether the variable is driving or ancillary.
    pub fn kind(&self) -> DataKind {
        match self.values {
            Values::Driving(_) => DataKind::Driving,
            Values::Ancillary(_) => DataKind::Ancillary,
        }
    }

    /// Number of timesteps covered. Ancillary variables cover one.
    pub fn timesteps(&self) -> usize {
        match &self.values {
            Values::Driving(steps) => steps.len(),
            Values::Ancillary(_) => 1,
        }
    }

    /// Check that every grid holds `expected` values.
    ///
    /// Returns the first offending `(timestep, length)` pair otherwise.
    pub fn check_len(&self, expected: usize) -> Result<(), (usize, usize)> {
        match &self.values {
            Values::Driving(steps) => match steps.iter().position(|s| s.len() != expected) {
                Some(t) => Err((t, steps[t].len())),
                None => Ok(()),
            },
            Values::Ancillary(grid) if grid.len() != expected => Err((0, grid.len())),
            Values::Ancillary(_) => Ok(()),
        }
    }
}

/// Named gridded variables feeding the components of a model.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataSet {
    variables: IndexMap<String, Variable>,
}

impl DataSet {
    /// Create an empty data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a time-varying variable, one grid per timestep.
    ///
    /// Replaces any existing variable of the same name.
    pub fn insert_driving(
        &mut self,
        name: impl Into<String>,
        units: impl Into<String>,
        steps: Vec<Vec<f64>>,
    ) {
        self.variables.insert(
            name.into(),
            Variable {
                units: units.into(),
                values: Values::Driving(steps),
            },
        );
    }

    /// Add a static variable.
    ///
    /// Replaces any existing variable of the same name.
    pub fn insert_ancillary(
        &mut self,
        name: impl Into<String>,
        units: impl Into<String>,
        grid: Vec<f64>,
    ) {
        self.variables.insert(
            name.into(),
            Variable {
                units: units.into(),
                values: Values::Ancillary(grid),
            },
        );
    }

    /// Builder-style [`insert_driving`](Self::insert_driving).
    pub fn with_driving(
        mut self,
        name: impl Into<String>,
        units: impl Into<String>,
        steps: Vec<Vec<f64>>,
    ) -> Self {
        self.insert_driving(name, units, steps);
        self
    }

    /// Builder-style [`insert_ancillary`](Self::insert_ancillary).
    pub fn with_ancillary(
        mut self,
        name: impl Into<String>,
        units: impl Into<String>,
        grid: Vec<f64>,
    ) -> Self {
        self.insert_ancillary(name, units, grid);
        self
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Declared units of `name`.
    pub fn units(&self, name: &str) -> Option<&str> {
        self.get(name).map(Variable::units)
    }

    /// Grid of driving variable `name` at `timestep`.
    ///
    /// `None` if the variable is absent, ancillary, or does not cover
    /// `timestep`.
    pub fn driving_at(&self, name: &str, timestep: usize) -> Option<&[f64]> {
        match &self.get(name)?.values {
            Values::Driving(steps) => steps.get(timestep).map(Vec::as_slice),
            Values::Ancillary(_) => None,
        }
    }

    /// Grid of ancillary variable `name`.
    pub fn ancillary(&self, name: &str) -> Option<&[f64]> {
        match &self.get(name)?.values {
            Values::Ancillary(grid) => Some(grid.as_slice()),
            Values::Driving(_) => None,
        }
    }

    /// Variable names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.keys().map(String::as_str)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the data set holds no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Driving data of one timestep, as a [`FieldReader`].
#[derive(Clone, Copy, Debug)]
pub struct DrivingView<'a> {
    data: &'a DataSet,
    timestep: usize,
}

impl<'a> DrivingView<'a> {
    /// View `data` at `timestep`.
    pub fn new(data: &'a DataSet, timestep: usize) -> Self {
        Self { data, timestep }
    }
}

impl FieldReader for DrivingView<'_> {
    fn read(&self, name: &str) -> Option<&[f64]> {
        self.data.driving_at(name, self.timestep)
    }
}

/// Ancillary data, as a [`FieldReader`].
#[derive(Clone, Copy, Debug)]
pub struct AncillaryView<'a> {
    data: &'a DataSet,
}

impl<'a> AncillaryView<'a> {
    /// View the ancillary variables of `data`.
    pub fn new(data: &'a DataSet) -> Self {
        Self { data }
    }
}

impl FieldReader for AncillaryView<'_> {
    fn read(&self, name: &str) -> Option<&[f64]> {
        self.data.ancillary(name)
    }
}
