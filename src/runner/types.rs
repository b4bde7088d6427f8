//! Cube Runner entities.
//!
//! Coordinates are logical playfield units with the origin at the top-left
//! corner and y growing downward, so "higher" on screen means a smaller y.

use crate::core::GameConfig;
use glam::Vec2;
use rand::Rng;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// True if the boxes share interior area. Boxes that only touch along an
    /// edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// The player-controlled cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub on_ground: bool,
    /// Top edge when resting on the ground. `pos.y` never exceeds this.
    pub ground_y: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl Player {
    /// A fresh player standing on the ground.
    pub fn new(config: &GameConfig) -> Self {
        let ground_y = config.player_rest_y();
        Self {
            pos: Vec2::new(config.player_x, ground_y),
            vel: Vec2::ZERO,
            size: config.player_size,
            on_ground: true,
            ground_y,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
        }
    }

    /// Launch upward. Ignored while airborne.
    pub fn jump(&mut self) {
        if self.on_ground {
            self.vel.y = self.jump_impulse;
            self.on_ground = false;
        }
    }

    /// One explicit Euler step of gravity, clamped to the ground.
    pub fn update(&mut self) {
        self.vel.y += self.gravity;
        self.pos.y += self.vel.y;
        if self.pos.y >= self.ground_y {
            self.pos.y = self.ground_y;
            self.vel.y = 0.0;
            self.on_ground = true;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.size))
    }
}

/// Which kind of obstacle the spawner asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleType {
    Cactus,
    Bird,
}

/// Ground cactus size preset, indexes `GameConfig::cactus_sizes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CactusSize {
    Small,
    Medium,
    Large,
}

impl CactusSize {
    pub const ALL: [CactusSize; 3] = [CactusSize::Small, CactusSize::Medium, CactusSize::Large];

    pub fn index(self) -> usize {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Large => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Cactus(CactusSize),
    Bird,
}

impl ObstacleKind {
    pub fn obstacle_type(&self) -> ObstacleType {
        match self {
            Self::Cactus(_) => ObstacleType::Cactus,
            Self::Bird => ObstacleType::Bird,
        }
    }
}

/// A single obstacle scrolling toward the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Create an obstacle of the requested type at the right edge of the field,
    /// rolling its size preset or altitude from `rng`.
    pub fn spawn<R: Rng>(obstacle_type: ObstacleType, config: &GameConfig, rng: &mut R) -> Self {
        match obstacle_type {
            ObstacleType::Cactus => {
                let variant = CactusSize::ALL[rng.gen_range(0..CactusSize::ALL.len())];
                Self::cactus(variant, config.field_width, config)
            }
            ObstacleType::Bird => {
                let y = rng.gen_range(config.bird_min_y..=config.bird_max_y) as f32;
                Self::bird(config.field_width, y, config)
            }
        }
    }

    /// A cactus standing on the ground with its left edge at `x`.
    pub fn cactus(variant: CactusSize, x: f32, config: &GameConfig) -> Self {
        let (w, h) = config.cactus_sizes[variant.index()];
        Self {
            kind: ObstacleKind::Cactus(variant),
            pos: Vec2::new(x, config.ground_y() - h),
            size: Vec2::new(w, h),
        }
    }

    pub fn bird(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            kind: ObstacleKind::Bird,
            pos: Vec2::new(x, y),
            size: Vec2::new(config.bird_width, config.bird_height),
        }
    }

    /// Scroll left by `speed` units.
    pub fn update(&mut self, speed: f32) {
        self.pos.x -= speed;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn collides_with(&self, player: &Player) -> bool {
        self.bounds().intersects(&player.bounds())
    }
}
