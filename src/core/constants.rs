// Playfield (logical units, y grows downward)
pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 300.0;
pub const GROUND_HEIGHT: f32 = 80.0;

// Player
pub const PLAYER_SIZE: f32 = 40.0;
pub const PLAYER_X: f32 = 80.0;
pub const GRAVITY: f32 = 1.2;
pub const JUMP_IMPULSE: f32 = -18.0;

// Speed and difficulty ramp
pub const INITIAL_SPEED: f32 = 8.0;
pub const SPEED_RAMP_PER_FRAME: f32 = 0.0005;
pub const MILESTONE_SPEED_BUMP: f32 = 0.02;
pub const MILESTONE_SCORE_STEP: u32 = 100;

// Scoring
pub const SCORE_PER_OBSTACLE: u32 = 10;
/// Obstacles are retired once their x drops below this.
pub const RETIRE_X: f32 = -100.0;

// Spawn cadence: max(SPAWN_FLOOR, SPAWN_BASE - score / SPAWN_SCORE_DIVISOR)
pub const SPAWN_BASE_FRAMES: u32 = 90;
pub const SPAWN_FLOOR_FRAMES: u32 = 30;
pub const SPAWN_SCORE_DIVISOR: u32 = 100;

// Obstacle mix: cactus iff roll < CACTUS_CUTOFF - (BIRD_CHANCE_BASE + score * BIRD_CHANCE_PER_POINT)
pub const BIRD_CHANCE_BASE: f64 = 0.3;
pub const BIRD_CHANCE_PER_POINT: f64 = 0.0001;
pub const CACTUS_CUTOFF: f64 = 0.7;

// Obstacle geometry
pub const CACTUS_SIZES: [(f32, f32); 3] = [(20.0, 40.0), (30.0, 50.0), (40.0, 60.0)];
pub const BIRD_WIDTH: f32 = 50.0;
pub const BIRD_HEIGHT: f32 = 30.0;
pub const BIRD_MIN_Y: u32 = 100;
pub const BIRD_MAX_Y: u32 = 200;

// Timing
pub const TARGET_FPS: u32 = 60;

// Sprites
pub const PLAYER_SPRITE_FILE: &str = "player.png";
pub const CACTUS_SPRITE_FILE: &str = "cactus.png";
pub const BIRD_SPRITE_FILE: &str = "bird.png";
pub const DEFAULT_ASSET_DIR: &str = "assets";
