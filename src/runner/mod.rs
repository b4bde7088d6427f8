//! Cube Runner: jump the cube over cacti and birds until something hits it.

pub mod logic;
pub mod spawner;
pub mod types;

pub use logic::{FrameReport, RunPhase, RunState, RunnerGame, RunnerInput};
pub use spawner::{bird_chance, spawn_threshold, Spawner};
pub use types::{Aabb, CactusSize, Obstacle, ObstacleKind, ObstacleType, Player};
