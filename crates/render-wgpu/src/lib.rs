//! wgpu render backend.
//!
//! Draws a grey floor and a corner-coloured cube. The projection lives here;
//! the simulation only supplies a view matrix.
//!
//! # Invariants
//! - Built on the platform thread, then driven only from the simulation
//!   thread.
//! - Renderer never mutates camera state.

mod gpu;
mod scene;
mod shaders;

pub use gpu::{BackendError, WgpuBackend};
