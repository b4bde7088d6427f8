//! Game tunables.
//!
//! Every number the simulation depends on lives in [`GameConfig`]. The defaults
//! reproduce the classic feel; a JSON file can override any subset of fields.

use super::constants::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,

    pub player_size: f32,
    pub player_x: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    pub initial_speed: f32,
    pub speed_ramp_per_frame: f32,
    pub milestone_speed_bump: f32,
    pub milestone_score_step: u32,

    pub score_per_obstacle: u32,
    pub retire_x: f32,

    pub spawn_base_frames: u32,
    pub spawn_floor_frames: u32,
    pub spawn_score_divisor: u32,

    pub bird_chance_base: f64,
    pub bird_chance_per_point: f64,
    pub cactus_cutoff: f64,

    /// (width, height) presets for ground cacti.
    pub cactus_sizes: [(f32, f32); 3],
    pub bird_width: f32,
    pub bird_height: f32,
    /// Inclusive band for the top edge of a bird.
    pub bird_min_y: u32,
    pub bird_max_y: u32,

    pub target_fps: u32,
    pub asset_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            player_size: PLAYER_SIZE,
            player_x: PLAYER_X,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            initial_speed: INITIAL_SPEED,
            speed_ramp_per_frame: SPEED_RAMP_PER_FRAME,
            milestone_speed_bump: MILESTONE_SPEED_BUMP,
            milestone_score_step: MILESTONE_SCORE_STEP,

            score_per_obstacle: SCORE_PER_OBSTACLE,
            retire_x: RETIRE_X,

            spawn_base_frames: SPAWN_BASE_FRAMES,
            spawn_floor_frames: SPAWN_FLOOR_FRAMES,
            spawn_score_divisor: SPAWN_SCORE_DIVISOR,

            bird_chance_base: BIRD_CHANCE_BASE,
            bird_chance_per_point: BIRD_CHANCE_PER_POINT,
            cactus_cutoff: CACTUS_CUTOFF,

            cactus_sizes: CACTUS_SIZES,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            bird_min_y: BIRD_MIN_Y,
            bird_max_y: BIRD_MAX_Y,

            target_fps: TARGET_FPS,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_size", self.player_size),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
            ("initial_speed", self.initial_speed),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }
        if self
            .cactus_sizes
            .iter()
            .any(|&(w, h)| !(w > 0.0) || !(h > 0.0))
        {
            return Err(ConfigError::Invalid(
                "cactus sizes must be positive".to_string(),
            ));
        }
        if self.ground_height < 0.0 || self.ground_height + self.player_size > self.field_height {
            return Err(ConfigError::Invalid(
                "ground_height leaves no room for the player".to_string(),
            ));
        }
        if self.bird_min_y > self.bird_max_y {
            return Err(ConfigError::Invalid(
                "bird_min_y must not exceed bird_max_y".to_string(),
            ));
        }
        if self.spawn_floor_frames > self.spawn_base_frames {
            return Err(ConfigError::Invalid(
                "spawn_floor_frames must not exceed spawn_base_frames".to_string(),
            ));
        }
        if self.spawn_score_divisor == 0 || self.milestone_score_step == 0 {
            return Err(ConfigError::Invalid(
                "spawn_score_divisor and milestone_score_step must be non-zero".to_string(),
            ));
        }
        if !(self.gravity > 0.0) {
            return Err(ConfigError::Invalid("gravity must be positive".to_string()));
        }
        if !(self.jump_impulse < 0.0) {
            return Err(ConfigError::Invalid(
                "jump_impulse must be negative (upward)".to_string(),
            ));
        }
        let widest = self
            .cactus_sizes
            .iter()
            .map(|&(w, _)| w)
            .fold(self.bird_width, f32::max);
        if !(self.retire_x + widest <= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "retire_x must be at most -{} so obstacles retire fully off screen",
                widest
            )));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be non-zero".to_string()));
        }
        if self.speed_ramp_per_frame < 0.0 || self.milestone_speed_bump < 0.0 {
            return Err(ConfigError::Invalid(
                "speed ramps must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Y coordinate of the ground surface.
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Top edge of the player when standing on the ground.
    pub fn player_rest_y(&self) -> f32 {
        self.ground_y() - self.player_size
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }
}
