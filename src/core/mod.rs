//! Tunables, configuration loading, and frame pacing.

pub mod config;
pub mod constants;
pub mod frame_clock;

pub use config::{ConfigError, GameConfig};
pub use frame_clock::FrameClock;
