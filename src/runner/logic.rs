//! Cube Runner game loop logic: input, per-frame update, scoring, difficulty.

use super::spawner::Spawner;
use super::types::{Obstacle, Player};
use crate::core::GameConfig;
use rand::Rng;

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerInput {
    Jump,  // Space or Up arrow; restarts after game over
    Other, // Any other key
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    GameOver,
}

/// Score and difficulty for the current run, plus the session high score.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub score: u32,
    /// Best score of any finished run in this process.
    pub high_score: u32,
    pub speed: f32,
    pub phase: RunPhase,
}

impl RunState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            high_score: 0,
            speed: config.initial_speed,
            phase: RunPhase::Running,
        }
    }
}

/// What happened during one call to [`RunnerGame::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: bool,
    /// Obstacles that scrolled off the left edge this frame.
    pub retired: u32,
    pub collided: bool,
}

/// Main game state. Owns every entity; nothing outlives a restart except the
/// high score and the random source.
#[derive(Debug, Clone)]
pub struct RunnerGame<R: Rng> {
    pub config: GameConfig,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub run: RunState,
    pub spawner: Spawner<R>,
    /// Jump input waiting for the next frame.
    pub jump_queued: bool,
    /// Running frames in the current run.
    pub frame_count: u64,
    /// Runs started in this process, including the first.
    pub runs_started: u32,
}

impl<R: Rng> RunnerGame<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            player: Player::new(&config),
            obstacles: Vec::new(),
            run: RunState::new(&config),
            spawner: Spawner::new(rng),
            jump_queued: false,
            frame_count: 0,
            runs_started: 1,
            config,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.run.phase == RunPhase::GameOver
    }

    /// Process player input. While running, Jump is buffered for the next
    /// frame; after game over it starts a new run.
    pub fn process_input(&mut self, input: RunnerInput) {
        match (self.run.phase, input) {
            (RunPhase::Running, RunnerInput::Jump) => self.jump_queued = true,
            (RunPhase::GameOver, RunnerInput::Jump) => self.restart(),
            (_, RunnerInput::Other) => {}
        }
    }

    /// Advance one frame. Does nothing after game over.
    ///
    /// Order: buffered jump, spawner, player physics, obstacle movement with
    /// collision and retirement, difficulty ramp, then game over on a crash.
    pub fn step(&mut self) -> FrameReport {
        let mut report = FrameReport::default();
        if self.is_game_over() {
            return report;
        }
        self.frame_count += 1;

        // 1. Input
        if std::mem::take(&mut self.jump_queued) {
            self.player.jump();
        }

        // 2. Spawner
        if let Some(obstacle) = self.spawner.tick(&self.config, self.run.score) {
            self.obstacles.push(obstacle);
            report.spawned = true;
        }

        // 3. Player physics
        self.player.update();

        // 4. Obstacles: move, collide, retire
        let score_before = self.run.score;
        let speed = self.run.speed;
        let retire_x = self.config.retire_x;
        let player = &self.player;
        let mut collided = false;
        let mut retired: u32 = 0;
        self.obstacles.retain_mut(|obstacle| {
            obstacle.update(speed);
            if obstacle.collides_with(player) {
                collided = true;
            }
            if obstacle.pos.x < retire_x {
                retired += 1;
                false
            } else {
                true
            }
        });
        self.run.score = self
            .run
            .score
            .saturating_add(retired.saturating_mul(self.config.score_per_obstacle));
        report.retired = retired;

        // 5. Difficulty ramp, applied on the crash frame too
        self.run.speed = next_speed(&self.config, self.run.speed, score_before, self.run.score);

        if collided {
            report.collided = true;
            self.end_run();
        }

        report
    }

    /// Start a fresh run. The high score survives.
    pub fn restart(&mut self) {
        self.player = Player::new(&self.config);
        self.obstacles.clear();
        self.run.score = 0;
        self.run.speed = self.config.initial_speed;
        self.run.phase = RunPhase::Running;
        self.spawner.reset();
        self.jump_queued = false;
        self.frame_count = 0;
        self.runs_started += 1;
        log::info!(
            "run {} started (high score {})",
            self.runs_started,
            self.run.high_score
        );
    }

    fn end_run(&mut self) {
        self.run.phase = RunPhase::GameOver;
        if self.run.score > self.run.high_score {
            self.run.high_score = self.run.score;
            log::info!("new high score {}", self.run.high_score);
        }
        log::info!(
            "run {} over after {} frames with score {}",
            self.runs_started,
            self.frame_count,
            self.run.score
        );
    }
}

/// Number of score milestones between `before` and `after`.
pub fn milestones_crossed(config: &GameConfig, before: u32, after: u32) -> u32 {
    let step = config.milestone_score_step;
    (after / step).saturating_sub(before / step)
}

/// Speed after one running frame: the continuous ramp plus one bump for each
/// milestone the score crossed this frame.
pub fn next_speed(config: &GameConfig, speed: f32, score_before: u32, score_after: u32) -> f32 {
    let bumps = milestones_crossed(config, score_before, score_after);
    speed + config.speed_ramp_per_frame + bumps as f32 * config.milestone_speed_bump
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::types::CactusSize;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_game() -> RunnerGame<ChaCha8Rng> {
        RunnerGame::new(GameConfig::default(), ChaCha8Rng::seed_from_u64(12345))
    }

    /// A cactus that sits right on top of the player.
    fn cactus_on_player(game: &RunnerGame<ChaCha8Rng>) -> Obstacle {
        Obstacle::cactus(CactusSize::Small, game.player.pos.x + 10.0, &game.config)
    }

    // ── Input tests ──

    #[test]
    fn test_jump_is_buffered_until_step() {
        let mut game = create_test_game();
        game.process_input(RunnerInput::Jump);
        assert!(game.jump_queued);
        assert!(game.player.on_ground);

        game.step();

        assert!(!game.jump_queued);
        assert!(!game.player.on_ground);
        assert!(game.player.vel.y < 0.0);
    }

    #[test]
    fn test_other_input_ignored() {
        let mut game = create_test_game();
        game.process_input(RunnerInput::Other);
        assert!(!game.jump_queued);
    }

    #[test]
    fn test_airborne_jump_is_dropped() {
        let mut game = create_test_game();
        game.process_input(RunnerInput::Jump);
        game.step();
        let vel = game.player.vel.y;

        game.process_input(RunnerInput::Jump);
        game.step();

        assert!(!game.jump_queued, "airborne jumps are not buffered");
        assert!(game.player.vel.y > vel, "gravity still applies");
    }

    // ── Frame tests ──

    #[test]
    fn test_idle_player_never_moves() {
        let mut game = create_test_game();
        let start = game.player.pos;
        for _ in 0..90 {
            game.step();
            assert_eq!(game.player.pos, start);
        }
        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn test_obstacles_move_left_by_speed() {
        let mut game = create_test_game();
        game.obstacles.push(Obstacle::bird(700.0, 100.0, &game.config));
        game.step();
        assert_eq!(game.obstacles[0].pos.x, 700.0 - 8.0);
    }

    #[test]
    fn test_retired_obstacle_scores_ten() {
        let mut game = create_test_game();
        game.obstacles.push(Obstacle::bird(-95.0, 100.0, &game.config));

        let report = game.step();

        assert_eq!(report.retired, 1);
        assert_eq!(game.run.score, 10);
        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_at_threshold_not_yet_retired() {
        let mut game = create_test_game();
        game.obstacles.push(Obstacle::bird(-92.0, 100.0, &game.config));

        game.step();

        // -92 - 8 = -100, not below the threshold
        assert_eq!(game.obstacles.len(), 1);
        assert_eq!(game.run.score, 0);
    }

    #[test]
    fn test_score_only_from_retirement() {
        let mut game = create_test_game();
        // A bird high above the grounded player never hits
        game.obstacles.push(Obstacle::bird(400.0, 100.0, &game.config));
        for _ in 0..80 {
            let before = game.run.score;
            let report = game.step();
            assert_eq!(game.run.score - before, report.retired * 10);
        }
        assert!(game.obstacles.is_empty());
        assert_eq!(game.run.score, 10);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut game = create_test_game();
        let cactus = cactus_on_player(&game);
        game.obstacles.push(cactus);

        let report = game.step();

        assert!(report.collided);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_crash_frame_still_ramps_speed() {
        let mut game = create_test_game();
        let cactus = cactus_on_player(&game);
        game.obstacles.push(cactus);

        game.step();

        assert!(game.is_game_over());
        assert!((game.run.speed - (8.0 + 0.0005)).abs() < 1e-6);
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let mut game = create_test_game();
        game.run.score = u32::MAX - 5;
        game.obstacles
            .push(Obstacle::cactus(CactusSize::Small, -95.0, &game.config));

        let report = game.step();

        assert_eq!(report.retired, 1);
        assert_eq!(game.run.score, u32::MAX);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut game = create_test_game();
        let cactus = cactus_on_player(&game);
        game.obstacles.push(cactus);
        game.step();
        let frozen_obstacles = game.obstacles.clone();
        let frozen_player = game.player.clone();
        let frozen_run = game.run.clone();

        for _ in 0..200 {
            assert_eq!(game.step(), FrameReport::default());
        }

        assert_eq!(game.obstacles, frozen_obstacles);
        assert_eq!(game.player, frozen_player);
        assert_eq!(game.run, frozen_run);
    }

    #[test]
    fn test_jump_after_game_over_restarts() {
        let mut game = create_test_game();
        game.run.score = 340;
        game.run.speed = 12.5;
        game.obstacles.push(Obstacle::bird(500.0, 120.0, &game.config));
        let cactus = cactus_on_player(&game);
        game.obstacles.push(cactus);
        game.step();
        assert!(game.is_game_over());

        game.process_input(RunnerInput::Jump);

        assert!(!game.is_game_over());
        assert_eq!(game.run.score, 0);
        assert_eq!(game.run.speed, 8.0);
        assert!(game.obstacles.is_empty());
        assert_eq!(game.player, Player::new(&game.config));
        assert_eq!(game.spawner.timer, 0);
        assert!(!game.jump_queued, "restart key is not also a jump");
        assert_eq!(game.run.high_score, 340);
        assert_eq!(game.runs_started, 2);
    }

    #[test]
    fn test_high_score_is_max_across_runs() {
        let mut game = create_test_game();

        game.run.score = 150;
        let cactus = cactus_on_player(&game);
        game.obstacles.push(cactus);
        game.step();
        assert_eq!(game.run.high_score, 150);

        game.restart();
        game.run.score = 80;
        let cactus = cactus_on_player(&game);
        game.obstacles.push(cactus);
        game.step();

        assert!(game.is_game_over());
        assert_eq!(game.run.score, 80);
        assert_eq!(game.run.high_score, 150);
    }

    // ── Difficulty tests ──

    #[test]
    fn test_speed_ramps_every_frame() {
        let mut game = create_test_game();
        let mut previous = game.run.speed;
        for _ in 0..50 {
            game.step();
            assert!(game.run.speed > previous);
            previous = game.run.speed;
        }
        assert!((game.run.speed - (8.0 + 50.0 * 0.0005)).abs() < 1e-4);
    }

    #[test]
    fn test_milestone_bump_once_per_hundred() {
        let config = GameConfig::default();
        assert_eq!(milestones_crossed(&config, 90, 100), 1);
        assert_eq!(milestones_crossed(&config, 100, 100), 0);
        assert_eq!(milestones_crossed(&config, 100, 110), 0);
        assert_eq!(milestones_crossed(&config, 190, 210), 1);
        assert_eq!(milestones_crossed(&config, 90, 310), 3);
        assert_eq!(milestones_crossed(&config, 0, 0), 0);
    }

    #[test]
    fn test_milestone_bump_applied_on_crossing_frame_only() {
        let mut game = create_test_game();
        game.run.score = 90;
        game.obstacles.push(Obstacle::bird(-95.0, 100.0, &game.config));

        game.step();
        assert_eq!(game.run.score, 100);
        let expected = 8.0 + 0.0005 + 0.02;
        assert!((game.run.speed - expected).abs() < 1e-5);

        game.step();
        assert!((game.run.speed - (expected + 0.0005)).abs() < 1e-5);
    }

    #[test]
    fn test_first_obstacle_spawns_on_frame_91() {
        let mut game = create_test_game();
        for _ in 0..90 {
            assert!(!game.step().spawned);
        }
        assert!(game.step().spawned);
        assert_eq!(game.obstacles.len(), 1);
    }

    #[test]
    fn test_player_stays_above_ground_through_play() {
        let mut game = create_test_game();
        for frame in 0..3_000 {
            if frame % 37 == 0 {
                game.process_input(RunnerInput::Jump);
            }
            game.step();
            assert!(game.player.pos.y <= game.player.ground_y);
            assert_eq!(
                game.player.on_ground,
                game.player.pos.y == game.player.ground_y
            );
            if game.is_game_over() {
                game.process_input(RunnerInput::Jump);
            }
        }
    }

    #[test]
    fn test_obstacles_strictly_move_left() {
        let mut game = create_test_game();
        for _ in 0..400 {
            let before: Vec<f32> = game.obstacles.iter().map(|o| o.pos.x).collect();
            let report = game.step();
            if game.is_game_over() {
                break;
            }
            if report.retired > 0 {
                continue;
            }
            for (old_x, obstacle) in before.iter().zip(&game.obstacles) {
                if obstacle.pos.x > *old_x {
                    panic!("obstacle moved right");
                }
            }
        }
    }
}
