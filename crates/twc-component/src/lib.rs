//! Component lifecycle trait and run context for the twc coupling framework.
//!
//! The [`Component`] trait defines the initialise / run / finalise
//! lifecycle every coupled component implements, with split-borrow
//! [`RunContext`] access to driving data, ancillary data, inbound
//! transfers, state histories, outbound transfers and outputs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod component;
pub mod context;
pub mod kind;

pub use component::Component;
pub use context::{InitContext, RunContext, RunWriters};
pub use kind::ComponentKind;
