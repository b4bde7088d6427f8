//! Jump decisions for simulated runs.

use crate::runner::{Aabb, RunnerGame};
use rand::Rng;

/// Jump when the nearest obstacle that would hit a grounded player is within
/// `lead_frames` frames of reaching it. High birds are left alone.
pub fn should_jump<R: Rng>(game: &RunnerGame<R>, lead_frames: f32) -> bool {
    let player = &game.player;
    if !player.on_ground || game.is_game_over() {
        return false;
    }
    let grounded = Aabb::new(
        player.pos.x,
        player.ground_y,
        player.size,
        player.size,
    );

    let nearest_gap = game
        .obstacles
        .iter()
        .map(|o| o.bounds())
        .filter(|b| b.right() > grounded.x)
        .filter(|b| b.y < grounded.bottom() && grounded.y < b.bottom())
        .map(|b| b.x - grounded.right())
        .fold(f32::INFINITY, f32::min);

    nearest_gap <= game.run.speed * lead_frames
}
