//! Input: raw platform events in, per-tick movement and look deltas out.
//!
//! The platform thread pushes [`RawInputEvent`]s into an [`InputBuffer`];
//! the simulation thread drains it into an [`InputSnapshot`], folds key
//! transitions into [`HeldKeys`], and maps them through [`KeyBindings`].
//!
//! # Invariants
//! - Every pushed key transition lands in exactly one snapshot, in push order.
//! - Cursor motion is coalesced: only the latest absolute position is kept.
//! - The buffer lock is held for the copy-and-clear only.

pub mod action;
pub mod buffer;
pub mod event;
pub mod state;

pub use action::{Action, KeyBindings, look_delta};
pub use buffer::{InputBuffer, InputSnapshot};
pub use event::{Key, KeyTransition, RawInputEvent};
pub use state::{CursorTracker, HeldKeys};

pub fn crate_info() -> &'static str {
    "spheremap-input v0.1.0"
}
