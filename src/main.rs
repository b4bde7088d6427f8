use cube_runner::assets::Assets;
use cube_runner::build_info;
use cube_runner::core::{FrameClock, GameConfig};
use cube_runner::input::{handle_key, InputResult};
use cube_runner::runner::RunnerGame;
use cube_runner::ui::step_and_draw;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::backend::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

/// Command-line options for the game binary.
#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    config: Option<PathBuf>,
    assets: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    init_logging(options.log_file.as_ref());

    let mut config = match &options.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => {
                log::info!("config loaded from {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => {
            log::info!("using built-in config");
            GameConfig::default()
        }
    };
    if let Some(dir) = options.assets {
        config.asset_dir = dir;
    }

    let assets = Assets::load(&config);
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut game = RunnerGame::new(config, rng);
    log::info!("starting at {} FPS", game.config.target_fps);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game_loop(&mut terminal, &mut game, &assets);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("game loop failed: {}", e);
    }
    result
}

fn run_game_loop<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    game: &mut RunnerGame<R>,
    assets: &Assets,
) -> io::Result<()> {
    let mut clock = FrameClock::new(game.config.frame_interval());

    loop {
        step_and_draw(terminal, game, assets)?;

        // Input read here is applied by the next step
        while event::poll(clock.remaining())? {
            if let Event::Key(key) = event::read()? {
                if handle_key(key, game) == InputResult::Quit {
                    log::info!("quit after {} frames", clock.frame_count);
                    return Ok(());
                }
            }
        }

        clock.finish_frame();
    }
}

fn init_logging(log_file: Option<&PathBuf>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }
    builder.init();
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--seed" | "--config" | "--assets" | "--log-file" if i + 1 >= args.len() => {
                eprintln!("{} needs a value", args[i]);
                process::exit(1);
            }
            "--seed" => {
                match args[i + 1].parse() {
                    Ok(seed) => options.seed = Some(seed),
                    Err(_) => {
                        eprintln!("Invalid seed: {}", args[i + 1]);
                        process::exit(1);
                    }
                }
                i += 1;
            }
            "--config" => {
                options.config = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--assets" => {
                options.assets = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--log-file" => {
                options.log_file = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'cube-runner --help' for usage.");
                process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Cube Runner - Terminal Endless Runner\n");
    println!("Usage: cube-runner [options]\n");
    println!("Options:");
    println!("  --seed <N>         Seed the obstacle generator");
    println!("  --config <FILE>    Load game tunables from a JSON file");
    println!("  --assets <DIR>     Directory holding player.png, cactus.png, bird.png");
    println!("  --log-file <FILE>  Write logs to FILE (filter with RUST_LOG)");
    println!("  --version          Show version information");
    println!("  --help             Show this help message");
    println!();
    println!("Controls: SPACE or UP to jump, SPACE to restart, Q or ESC to quit");
}
