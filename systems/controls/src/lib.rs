#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system that turns logical input actions into player commands.

pub use ledgehop_core::KeyTransition;

use ledgehop_core::{Command, MOVE_IMPULSE};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlsInput {
    /// Transitions of the move-left action.
    pub move_left: KeyTransition,
    /// Transitions of the move-right action.
    pub move_right: KeyTransition,
    /// Whether the jump action was pressed during the frame.
    pub jump: bool,
}

/// Maps logical actions onto world commands.
///
/// Key-downs adjust horizontal velocity by [`MOVE_IMPULSE`], releasing either
/// movement key stops horizontal motion, and jump presses request a jump.
#[derive(Debug, Default)]
pub struct Controls;

impl Controls {
    /// Emits the commands implied by the provided frame input.
    ///
    /// Presses are emitted before releases so a tap within a single frame
    /// leaves the player at rest.
    pub fn handle(&self, input: ControlsInput, out: &mut Vec<Command>) {
        if input.move_left.pressed {
            out.push(Command::NudgePlayer {
                delta: -MOVE_IMPULSE,
            });
        }
        if input.move_right.pressed {
            out.push(Command::NudgePlayer {
                delta: MOVE_IMPULSE,
            });
        }
        if input.move_left.released {
            out.push(Command::HaltPlayer);
        }
        if input.move_right.released {
            out.push(Command::HaltPlayer);
        }
        if input.jump {
            out.push(Command::Jump);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: ControlsInput) -> Vec<Command> {
        let mut commands = Vec::new();
        Controls.handle(input, &mut commands);
        commands
    }

    #[test]
    fn idle_input_emits_nothing() {
        assert!(run(ControlsInput::default()).is_empty());
    }

    #[test]
    fn key_downs_nudge_in_their_direction() {
        assert_eq!(
            run(ControlsInput {
                move_left: KeyTransition::PRESSED,
                ..ControlsInput::default()
            }),
            vec![Command::NudgePlayer { delta: -2.0 }]
        );
        assert_eq!(
            run(ControlsInput {
                move_right: KeyTransition::PRESSED,
                ..ControlsInput::default()
            }),
            vec![Command::NudgePlayer { delta: 2.0 }]
        );
    }

    #[test]
    fn releasing_either_key_halts() {
        assert_eq!(
            run(ControlsInput {
                move_right: KeyTransition::RELEASED,
                ..ControlsInput::default()
            }),
            vec![Command::HaltPlayer]
        );
        assert_eq!(
            run(ControlsInput {
                move_left: KeyTransition::RELEASED,
                ..ControlsInput::default()
            }),
            vec![Command::HaltPlayer]
        );
    }

    #[test]
    fn tap_within_one_frame_ends_at_rest() {
        let commands = run(ControlsInput {
            move_right: KeyTransition {
                pressed: true,
                released: true,
            },
            jump: true,
            ..ControlsInput::default()
        });
        assert_eq!(
            commands,
            vec![
                Command::NudgePlayer { delta: 2.0 },
                Command::HaltPlayer,
                Command::Jump,
            ]
        );
    }
}
