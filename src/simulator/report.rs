//! Simulation report generation.

use serde::Serialize;

/// Outcome of a single simulated run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub score: u32,
    pub frames: u64,
    pub obstacles_cleared: u32,
    /// High score after this run ended.
    pub high_score: u32,
    /// True if the run hit the frame limit instead of crashing.
    pub timed_out: bool,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_timed_out: u32,

    pub min_score: u32,
    pub max_score: u32,
    pub avg_score: f64,
    pub median_score: u32,
    pub avg_frames: f64,
    pub high_score: u32,

    /// Runs bucketed by score: (bucket floor, count), 100 points per bucket.
    pub score_distribution: Vec<(u32, u32)>,

    pub run_stats: Vec<RunStats>,
}

const BUCKET_SIZE: u32 = 100;

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;
        let divisor = num_runs.max(1) as f64;

        let min_score = runs.iter().map(|r| r.score).min().unwrap_or(0);
        let max_score = runs.iter().map(|r| r.score).max().unwrap_or(0);
        let avg_score = runs.iter().map(|r| r.score as f64).sum::<f64>() / divisor;
        let median_score = {
            let mut sorted: Vec<u32> = runs.iter().map(|r| r.score).collect();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };
        let avg_frames = runs.iter().map(|r| r.frames as f64).sum::<f64>() / divisor;
        let high_score = runs.iter().map(|r| r.high_score).max().unwrap_or(0);

        let mut score_distribution: Vec<(u32, u32)> = Vec::new();
        for run in &runs {
            let bucket = run.score / BUCKET_SIZE * BUCKET_SIZE;
            match score_distribution.iter_mut().find(|(b, _)| *b == bucket) {
                Some((_, count)) => *count += 1,
                None => score_distribution.push((bucket, 1)),
            }
        }
        score_distribution.sort_unstable();

        Self {
            num_runs,
            runs_timed_out,
            min_score,
            max_score,
            avg_score,
            median_score,
            avg_frames,
            high_score,
            score_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── SCORE ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Min Score:     {}\n", self.min_score));
        report.push_str(&format!("  Median Score:  {}\n", self.median_score));
        report.push_str(&format!("  Avg Score:     {:.1}\n", self.avg_score));
        report.push_str(&format!("  Max Score:     {}\n", self.max_score));
        report.push_str(&format!("  High Score:    {}\n", self.high_score));
        report.push_str(&format!(
            "  Avg Frames:    {:.0} ({:.1}s at 60 FPS)\n\n",
            self.avg_frames,
            self.avg_frames / 60.0
        ));

        report.push_str("── DISTRIBUTION ─────────────────────────────────────────────────\n");
        for (bucket, count) in &self.score_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  {:>5}-{:<5} {:>5.1}% {}\n",
                bucket,
                bucket + BUCKET_SIZE - 1,
                pct,
                bar
            ));
        }
        report.push('\n');

        report
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
