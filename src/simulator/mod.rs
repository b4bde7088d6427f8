//! Headless balance simulator.
//!
//! Plays many seeded runs with a simple autopilot to see how score and run
//! length respond to the difficulty tunables. Runs share one game, so the
//! high score carries across them exactly as it does in a play session.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::should_jump;
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
