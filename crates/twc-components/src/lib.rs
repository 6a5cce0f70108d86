//! Components for exercising the twc coupling framework.
//!
//! None of these components does any physics. They exist so the
//! framework's data passing, grid indexing and lifecycle can be tested
//! against outputs that are trivial to predict:
//!
//! - [`dummy`]: the allocation-free surface-layer kernel (initialise, run,
//!   finalise over caller-owned buffers).
//! - [`DummySurfaceLayer`]: the kernel wrapped as a [`Component`](twc_component::Component).
//! - [`NullComponent`]: fills a slot with zero-valued outbound transfers.
//! - [`DataComponent`]: fills a slot by replaying driving data as its
//!   outbound transfers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod data;
pub mod dummy;
pub mod fields;
pub mod null;
pub mod surface_layer;

pub use data::DataComponent;
pub use null::NullComponent;
pub use surface_layer::DummySurfaceLayer;
