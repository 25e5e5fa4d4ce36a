//! Shared types and fixed tuning for the sphere-map workspace.
//!
//! Tuning values are compile-time constants: nothing here is
//! runtime-configurable.

pub mod tuning;
pub mod types;

pub use types::Extent;
