//! Cube Runner - terminal endless runner.
//!
//! The simulation in [`runner`] is independent of the terminal; [`ui`] draws
//! it through a small canvas abstraction and [`input`] feeds key presses back.

pub mod assets;
pub mod build_info;
pub mod core;
pub mod input;
pub mod runner;
pub mod simulator;
pub mod ui;

pub use crate::assets::{AssetError, Assets, Sprite};
pub use crate::core::{ConfigError, FrameClock, GameConfig};
pub use crate::runner::{RunPhase, RunnerGame, RunnerInput};
