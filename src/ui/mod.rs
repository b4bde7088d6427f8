pub mod canvas;
pub mod runner_scene;

use crate::assets::Assets;
use crate::runner::{FrameReport, RunnerGame};
use rand::Rng;
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};
use std::io;

/// Main UI drawing function.
pub fn draw_ui<R: Rng>(frame: &mut Frame, game: &RunnerGame<R>, assets: &Assets) {
    let area = frame.size();
    runner_scene::render_runner_scene(frame, area, game, assets);
}

/// Advance the game one frame, then draw the state it produced.
pub fn step_and_draw<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    game: &mut RunnerGame<R>,
    assets: &Assets,
) -> io::Result<FrameReport> {
    let report = game.step();
    terminal.draw(|frame| draw_ui(frame, game, assets))?;
    Ok(report)
}
