//! Drives a real `RunnerGame` with the autopilot.

use super::autopilot::should_jump;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::runner::{RunnerGame, RunnerInput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = RunnerGame::new(config.game.clone(), rng);
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        if run_idx > 0 {
            game.restart();
        }
        let stats = simulate_single_run(&mut game, config);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Score {}, Frames {}, High {}{}",
                run_idx + 1,
                config.num_runs,
                stats.score,
                stats.frames,
                stats.high_score,
                if stats.timed_out { " (timed out)" } else { "" }
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Play one run to game over or the frame limit.
pub fn simulate_single_run<R: Rng>(game: &mut RunnerGame<R>, config: &SimConfig) -> RunStats {
    let mut obstacles_cleared = 0;
    while !game.is_game_over() && game.frame_count < config.max_frames_per_run {
        if should_jump(game, config.lead_frames) {
            game.process_input(RunnerInput::Jump);
        }
        obstacles_cleared += game.step().retired;
    }

    RunStats {
        score: game.run.score,
        frames: game.frame_count,
        obstacles_cleared,
        high_score: game.run.high_score,
        timed_out: !game.is_game_over(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_report() {
        let config = SimConfig {
            verbosity: 0,
            ..SimConfig::quick(42)
        };
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.run_stats, b.run_stats);
    }

    #[test]
    fn test_runs_counted_and_bounded() {
        let config = SimConfig {
            num_runs: 5,
            max_frames_per_run: 600,
            verbosity: 0,
            ..SimConfig::quick(7)
        };
        let report = run_simulation(&config);
        assert_eq!(report.num_runs, 5);
        for run in &report.run_stats {
            assert!(run.frames <= 600);
            assert_eq!(run.score, run.obstacles_cleared * 10);
        }
    }

    #[test]
    fn test_high_score_carries_across_runs() {
        let config = SimConfig {
            num_runs: 6,
            verbosity: 0,
            ..SimConfig::quick(11)
        };
        let report = run_simulation(&config);
        let mut best = 0;
        for run in &report.run_stats {
            // Only a crash records the high score
            if !run.timed_out {
                best = best.max(run.score);
            }
            assert_eq!(run.high_score, best);
        }
    }

    #[test]
    fn test_timed_out_run_flagged() {
        let config = SimConfig {
            num_runs: 1,
            max_frames_per_run: 50,
            verbosity: 0,
            ..SimConfig::quick(3)
        };
        let report = run_simulation(&config);
        // Nothing spawns before frame 91
        assert!(report.run_stats[0].timed_out);
        assert_eq!(report.run_stats[0].frames, 50);
        assert_eq!(report.runs_timed_out, 1);
    }
}
