//! Cube Runner scene rendering.
//!
//! `draw_field` issues logical draw calls against any [`Canvas`]; the ratatui
//! entry point wraps it with a border and a two-line status bar.

use super::canvas::{Canvas, CellCanvas};
use crate::assets::{Assets, Sprite};
use crate::runner::{Aabb, Obstacle, ObstacleKind, Player, RunnerGame};
use glam::Vec2;
use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

// ── Palette ─────────────────────────────────────────────────────────
pub const SKY: Color = Color::Rgb(135, 206, 235);
pub const GROUND: Color = Color::Rgb(200, 200, 200);
pub const CUBE: Color = Color::Rgb(0, 200, 0);
pub const CACTUS: Color = Color::Rgb(0, 100, 0);
pub const BIRD: Color = Color::Rgb(100, 100, 255);
pub const OUTLINE: Color = Color::Rgb(0, 0, 0);
pub const BANNER: Color = Color::Rgb(200, 0, 0);

pub const GAME_OVER_TEXT: &str = "GAME OVER - SPACE TO RESTART";

/// Smallest area the scene will draw into.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;

/// Render the whole scene into `area`.
pub fn render_runner_scene<R: Rng>(
    frame: &mut Frame,
    area: Rect,
    game: &RunnerGame<R>,
    assets: &Assets,
) {
    frame.render_widget(Clear, area);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = Paragraph::new("Terminal too small")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let border_color = if game.is_game_over() {
        Color::Red
    } else {
        Color::LightGreen
    };
    let block = Block::default()
        .title(" Cube Runner ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(2)])
        .split(inner);

    let field = Vec2::new(game.config.field_width, game.config.field_height);
    let mut canvas = CellCanvas::new(chunks[0].width, chunks[0].height, field);
    draw_field(&mut canvas, game, assets);
    canvas.render(frame, chunks[0]);

    render_status_bar(frame, chunks[1], game);
}

/// Draw background, entities, score overlay and, after a crash, the banner.
pub fn draw_field<R: Rng, C: Canvas>(canvas: &mut C, game: &RunnerGame<R>, assets: &Assets) {
    let config = &game.config;

    canvas.clear(SKY);
    canvas.fill_rect(
        Aabb::new(0.0, config.ground_y(), config.field_width, config.ground_height),
        GROUND,
    );
    canvas.hline(config.ground_y(), 0.0, config.field_width, OUTLINE);

    for obstacle in &game.obstacles {
        draw_obstacle(canvas, obstacle, assets.obstacle_sprite(obstacle.kind));
    }
    draw_player(canvas, &game.player, &assets.player);

    let score_x = config.field_width - 180.0;
    canvas.text(
        Vec2::new(score_x, 20.0),
        &format!("SCORE: {}", game.run.score),
        OUTLINE,
        true,
    );
    canvas.text(
        Vec2::new(score_x, 50.0),
        &format!("HI: {}", game.run.high_score),
        OUTLINE,
        true,
    );

    if game.is_game_over() {
        canvas.text(
            Vec2::new(100.0, config.field_height / 2.0 - 30.0),
            GAME_OVER_TEXT,
            BANNER,
            true,
        );
    }
}

fn draw_player<C: Canvas>(canvas: &mut C, player: &Player, sprite: &Sprite) {
    match sprite {
        Sprite::Image(image) => canvas.blit(player.pos, image),
        Sprite::Primitive => {
            let bounds = player.bounds();
            canvas.fill_rect(bounds, CUBE);
            canvas.stroke_rect(bounds, OUTLINE);
        }
    }
}

fn draw_obstacle<C: Canvas>(canvas: &mut C, obstacle: &Obstacle, sprite: &Sprite) {
    let bounds = obstacle.bounds();
    match (sprite, obstacle.kind) {
        (Sprite::Image(image), _) => canvas.blit(obstacle.pos, image),
        (Sprite::Primitive, ObstacleKind::Cactus(_)) => {
            canvas.fill_rect(bounds, CACTUS);
            canvas.stroke_rect(bounds, OUTLINE);
        }
        (Sprite::Primitive, ObstacleKind::Bird) => {
            canvas.fill_ellipse(bounds, BIRD);
            canvas.stroke_ellipse(bounds, OUTLINE);
        }
    }
}

/// Status message plus key hints below the field.
fn render_status_bar<R: Rng>(frame: &mut Frame, area: Rect, game: &RunnerGame<R>) {
    if area.height < 1 {
        return;
    }

    let (status, color, controls): (String, Color, &[(&str, &str)]) = if game.is_game_over() {
        (
            format!("Crashed at {} (best {})", game.run.score, game.run.high_score),
            Color::Red,
            &[("[Space/Up]", "Restart"), ("[Esc/q]", "Quit")],
        )
    } else {
        (
            format!("Speed {:.2}", game.run.speed),
            Color::LightGreen,
            &[("[Space/Up]", "Jump"), ("[Esc/q]", "Quit")],
        )
    };

    let status_line = Paragraph::new(status)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(status_line, Rect { height: 1, ..area });

    if area.height >= 2 {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}
