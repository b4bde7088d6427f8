//! Sprite loading with primitive-shape fallback.
//!
//! Sprites are PNG files in the configured asset directory, scaled once to the
//! size of the entity they draw. If any of them fails to load, every entity
//! falls back to primitive shapes for the rest of the process.

use crate::core::constants::{BIRD_SPRITE_FILE, CACTUS_SPRITE_FILE, PLAYER_SPRITE_FILE};
use crate::core::GameConfig;
use crate::runner::ObstacleKind;
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load sprite {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// How one entity type is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    /// Pre-scaled image, blitted at the entity's position.
    Image(RgbaImage),
    /// Filled shape with an outline.
    Primitive,
}

impl Sprite {
    pub fn is_image(&self) -> bool {
        matches!(self, Sprite::Image(_))
    }
}

/// Immutable rendering context built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Assets {
    pub player: Sprite,
    /// One sprite per cactus size preset.
    pub cacti: [Sprite; 3],
    pub bird: Sprite,
}

impl Assets {
    /// Primitive shapes for every entity.
    pub fn primitive() -> Self {
        Self {
            player: Sprite::Primitive,
            cacti: [Sprite::Primitive, Sprite::Primitive, Sprite::Primitive],
            bird: Sprite::Primitive,
        }
    }

    /// Load sprites, logging and falling back to primitives on any failure.
    pub fn load(config: &GameConfig) -> Self {
        match Self::try_load(config) {
            Ok(assets) => {
                log::info!("sprites loaded from {}", config.asset_dir.display());
                assets
            }
            Err(e) => {
                log::warn!("{}; drawing primitive shapes instead", e);
                Self::primitive()
            }
        }
    }

    pub fn try_load(config: &GameConfig) -> Result<Self, AssetError> {
        let dir = config.asset_dir.as_path();
        let player = load_scaled(
            &dir.join(PLAYER_SPRITE_FILE),
            config.player_size,
            config.player_size,
        )?;

        // One source image serves all three cactus presets
        let cactus_path = dir.join(CACTUS_SPRITE_FILE);
        let [small, medium, large] = config.cactus_sizes;
        let cacti = [
            load_scaled(&cactus_path, small.0, small.1)?,
            load_scaled(&cactus_path, medium.0, medium.1)?,
            load_scaled(&cactus_path, large.0, large.1)?,
        ];

        let bird = load_scaled(
            &dir.join(BIRD_SPRITE_FILE),
            config.bird_width,
            config.bird_height,
        )?;

        Ok(Self {
            player: Sprite::Image(player),
            cacti: cacti.map(Sprite::Image),
            bird: Sprite::Image(bird),
        })
    }

    pub fn uses_images(&self) -> bool {
        self.player.is_image()
    }

    pub fn obstacle_sprite(&self, kind: ObstacleKind) -> &Sprite {
        match kind {
            ObstacleKind::Cactus(size) => &self.cacti[size.index()],
            ObstacleKind::Bird => &self.bird,
        }
    }
}

fn load_scaled(path: &Path, width: f32, height: f32) -> Result<RgbaImage, AssetError> {
    let image = image::open(path).map_err(|source| AssetError::Image {
        path: path.display().to_string(),
        source,
    })?;
    let width = width.round().max(1.0) as u32;
    let height = height.round().max(1.0) as u32;
    Ok(image
        .resize_exact(width, height, FilterType::Nearest)
        .to_rgba8())
}
