#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure hazard system that reacts to the player touching spikes or the exit.

use ledgehop_core::{Command, LevelView, PlayerBody, Rect};

/// Inspects the post-step player rectangle against the level's spikes and exit.
#[derive(Debug, Default)]
pub struct Hazards;

impl Hazards {
    /// Emits a reset when any spike overlaps the player and a completion when the exit does.
    ///
    /// The exit test uses the rectangle the player occupies after any reset,
    /// so touching a spike and the exit in the same tick only completes the
    /// level when the start cell itself overlaps the exit.
    pub fn handle(&self, player: &PlayerBody, level: LevelView<'_>, out: &mut Vec<Command>) {
        let mut rect = player.rect;

        if level
            .spikes()
            .iter()
            .any(|spike| spike.rect().intersects(&rect))
        {
            let start = level.player_start();
            out.push(Command::ResetPlayer { cell: start });
            let origin = Rect::cell(start);
            rect.set_top_left(origin.x(), origin.y());
        }

        if let Some(exit) = level.exit() {
            if exit.rect().intersects(&rect) {
                out.push(Command::CompleteLevel);
            }
        }
    }
}
