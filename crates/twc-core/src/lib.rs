//! Core types and traits for the twc coupling framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by components and the model driver:
//! the row-major grid shape, field names and definitions, named field
//! buffers, state histories, parameter values, error types, and the reader/writer
//! traits through which components see their data.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffers;
pub mod error;
pub mod field;
pub mod grid;
pub mod id;
pub mod param;
pub mod state;
pub mod traits;

pub use buffers::FieldBuffers;
pub use error::{ComponentError, GridError, StepError};
pub use field::{FieldDef, FieldName, FieldNames};
pub use grid::GridShape;
pub use id::TimestepId;
pub use param::{ConstantDef, Parameters};
pub use state::{StateHistory, StateStore};
pub use traits::{read_required, write_disjoint, FieldReader, FieldWriter};
