//! Rendering port: the two calls the simulation thread makes into a graphics
//! backend.
//!
//! # Invariants
//! - Backends are driven only from the thread that owns the graphics context.
//! - A backend never mutates camera or simulation state.
//!
//! [`RecordingBackend`] stands in for a GPU backend in tests and headless
//! runs; swap in a real backend without changing the scheduler.

mod renderer;

pub use renderer::{RecordingBackend, RenderBackend, RenderCall};

pub fn crate_info() -> &'static str {
    "spheremap-render v0.1.0"
}
