//! Difficulty simulator CLI.
//!
//! Plays many runs with an autopilot to see how score and survival time
//! respond to the difficulty tunables.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # Default: 100 runs
//!   cargo run --bin simulate -- -n 500 --seed 42    # Reproducible batch
//!   cargo run --bin simulate -- --config hard.json  # Custom tunables

use cube_runner::core::GameConfig;
use cube_runner::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, write_json) = parse_args(&args);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CUBE RUNNER DIFFICULTY SIMULATOR                 ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Frames:     {}", config.max_frames_per_run);
    println!("  Lead Frames:    {}", config.lead_frames);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        let written = report
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&filename, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report {}: {}", filename, e);
                process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames_per_run = args[i + 1].parse().unwrap_or(36_000);
                    i += 1;
                }
            }
            "-l" | "--lead" => {
                if i + 1 < args.len() {
                    config.lead_frames = args[i + 1].parse().unwrap_or(8.0);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    match GameConfig::load(Path::new(&args[i + 1])) {
                        Ok(game) => config.game = game,
                        Err(e) => {
                            eprintln!("{}", e);
                            process::exit(1);
                        }
                    }
                    i += 1;
                }
            }
            "--json" => {
                write_json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick(config.seed.unwrap_or(0));
            }
            _ => {}
        }
        i += 1;
    }

    (config, write_json)
}

fn print_help() {
    println!("Cube Runner Difficulty Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>       Number of runs (default: 100)");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    -t, --frames <F>     Frame limit per run (default: 36000)");
    println!("    -l, --lead <F>       Autopilot look-ahead in frames (default: 8)");
    println!("    -c, --config <FILE>  Load game tunables from a JSON file");
    println!("        --json           Also write the report as JSON");
    println!("        --quick          10 short runs");
    println!("    -v, --verbose        Print every run");
    println!("    -h, --help           Print this help");
}
