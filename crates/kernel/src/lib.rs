//! Simulation kernel: the fixed-timestep tick/render loop and its clock.
//!
//! # Invariants
//! - Tick debt is below one tick period after every pass.
//! - At most one render per pass, however many ticks fired.
//! - Simulation state, the clock and the backend live on the simulation
//!   thread only; the input buffer is the sole shared state.
//! - A stop request takes effect at the top of the next pass.

pub mod clock;
pub mod scheduler;

pub use clock::{RateReport, SimClock};
pub use scheduler::{
    FixedStepScheduler, PassReport, SchedulerConfig, SchedulerError, SchedulerHandle,
};
