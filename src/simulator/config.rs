//! Simulation configuration.

use crate::core::GameConfig;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Frames per run before the run is cut off
    pub max_frames_per_run: u64,

    /// Frames the autopilot looks ahead when deciding to jump
    pub lead_frames: f32,

    /// Tunables for the simulated game
    pub game: GameConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_frames_per_run: 60 * 60 * 10,
            lead_frames: 8.0,
            game: GameConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small deterministic batch for smoke tests.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 10,
            seed: Some(seed),
            max_frames_per_run: 60 * 60 * 2,
            ..Default::default()
        }
    }
}
