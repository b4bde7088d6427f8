//! Time-gated obstacle spawning.
//!
//! The spawner counts running frames and emits one obstacle whenever the count
//! passes a score-dependent threshold. Both the cadence and the bird share are
//! monotonic in score, which gives a smooth ramp with no level boundaries.

use super::types::{Obstacle, ObstacleType};
use crate::core::GameConfig;
use rand::Rng;

/// Frames between spawns at the given score: `max(floor, base - score / divisor)`.
pub fn spawn_threshold(config: &GameConfig, score: u32) -> u32 {
    config
        .spawn_base_frames
        .saturating_sub(score / config.spawn_score_divisor)
        .max(config.spawn_floor_frames)
}

/// Bird weight at the given score. The cactus cutoff is `cactus_cutoff - bird_chance`.
pub fn bird_chance(config: &GameConfig, score: u32) -> f64 {
    config.bird_chance_base + score as f64 * config.bird_chance_per_point
}

#[derive(Debug, Clone)]
pub struct Spawner<R: Rng> {
    /// Frames since the last spawn.
    pub timer: u32,
    rng: R,
}

impl<R: Rng> Spawner<R> {
    pub fn new(rng: R) -> Self {
        Self { timer: 0, rng }
    }

    /// Advance one running frame. Returns the new obstacle when the cadence
    /// threshold is exceeded.
    pub fn tick(&mut self, config: &GameConfig, score: u32) -> Option<Obstacle> {
        self.timer += 1;
        if self.timer <= spawn_threshold(config, score) {
            return None;
        }
        self.timer = 0;
        let obstacle_type = self.choose_type(config, score);
        Some(Obstacle::spawn(obstacle_type, config, &mut self.rng))
    }

    /// Weighted coin flip between cactus and bird.
    pub fn choose_type(&mut self, config: &GameConfig, score: u32) -> ObstacleType {
        let cactus_cutoff = config.cactus_cutoff - bird_chance(config, score);
        if self.rng.gen::<f64>() < cactus_cutoff {
            ObstacleType::Cactus
        } else {
            ObstacleType::Bird
        }
    }

    pub fn reset(&mut self) {
        self.timer = 0;
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_spawner() -> Spawner<ChaCha8Rng> {
        Spawner::new(ChaCha8Rng::seed_from_u64(12345))
    }

    #[test]
    fn test_threshold_starts_at_base() {
        let config = GameConfig::default();
        assert_eq!(spawn_threshold(&config, 0), 90);
        assert_eq!(spawn_threshold(&config, 99), 90);
        assert_eq!(spawn_threshold(&config, 100), 89);
        assert_eq!(spawn_threshold(&config, 2500), 65);
    }

    #[test]
    fn test_threshold_non_increasing_and_floored() {
        let config = GameConfig::default();
        let mut previous = spawn_threshold(&config, 0);
        for score in (0..20_000).step_by(10) {
            let threshold = spawn_threshold(&config, score);
            assert!(threshold <= previous, "threshold rose at score {}", score);
            assert!(threshold >= 30);
            previous = threshold;
        }
        assert_eq!(spawn_threshold(&config, u32::MAX), 30);
    }

    #[test]
    fn test_first_spawn_after_threshold_exceeded() {
        let config = GameConfig::default();
        let mut spawner = create_test_spawner();

        for frame in 1..=90 {
            assert!(
                spawner.tick(&config, 0).is_none(),
                "spawned early on frame {}",
                frame
            );
        }
        assert!(spawner.tick(&config, 0).is_some());
        assert_eq!(spawner.timer, 0);
    }

    #[test]
    fn test_spawn_cadence_is_steady() {
        let config = GameConfig::default();
        let mut spawner = create_test_spawner();
        let spawn_frames: Vec<u32> = (1..=400)
            .filter(|_| spawner.tick(&config, 0).is_some())
            .collect();
        assert_eq!(spawn_frames, vec![91, 182, 273, 364]);
    }

    #[test]
    fn test_spawned_obstacle_starts_at_right_edge() {
        let config = GameConfig::default();
        let mut spawner = create_test_spawner();
        spawner.timer = 1_000;
        let obstacle = spawner.tick(&config, 0).expect("timer past threshold");
        assert_eq!(obstacle.pos.x, config.field_width);
    }

    #[test]
    fn test_bird_chance_grows_with_score() {
        let config = GameConfig::default();
        assert!((bird_chance(&config, 0) - 0.3).abs() < 1e-12);
        assert!((bird_chance(&config, 1000) - 0.4).abs() < 1e-12);
        assert!(bird_chance(&config, 2000) > bird_chance(&config, 1000));
    }

    #[test]
    fn test_type_mix_at_start() {
        // Cactus cutoff is 0.7 - 0.3 = 0.4 at score 0
        let config = GameConfig::default();
        let mut spawner = create_test_spawner();
        let cacti = (0..10_000)
            .filter(|_| spawner.choose_type(&config, 0) == ObstacleType::Cactus)
            .count();
        assert!((3_600..4_400).contains(&cacti), "cacti: {}", cacti);
    }

    #[test]
    fn test_only_birds_once_cutoff_exhausted() {
        let config = GameConfig::default();
        let mut spawner = create_test_spawner();
        for _ in 0..1_000 {
            assert_eq!(spawner.choose_type(&config, 5_000), ObstacleType::Bird);
        }
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let config = GameConfig::default();
        let mut a = create_test_spawner();
        let mut b = create_test_spawner();
        for _ in 0..1_000 {
            assert_eq!(a.tick(&config, 300), b.tick(&config, 300));
        }
    }

    #[test]
    fn test_reset_clears_timer() {
        let config = GameConfig::default();
        let mut spawner = create_test_spawner();
        spawner.tick(&config, 0);
        spawner.tick(&config, 0);
        spawner.reset();
        assert_eq!(spawner.timer, 0);
    }
}
