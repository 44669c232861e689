use ledgehop_rendering_macroquad::{MenuChoice, StartMenuInputState};

#[derive(Clone, Copy)]
enum Click {
    Nothing,
    Start,
    Quit,
    Both,
}

fn run_sequence(sequence: &[Click]) -> Vec<Option<MenuChoice>> {
    let mut state = StartMenuInputState::default();
    let mut choices = Vec::new();
    for &click in sequence {
        choices.push(state.take_choice());
        match click {
            Click::Nothing => {}
            Click::Start => state.register_start(),
            Click::Quit => state.register_quit(),
            Click::Both => {
                state.register_start();
                state.register_quit();
            }
        }
    }

    choices.push(state.take_choice());
    choices
}

#[test]
fn start_click_resolves_on_following_frame() {
    let choices = run_sequence(&[Click::Nothing, Click::Start, Click::Nothing]);
    assert_eq!(choices, vec![None, None, Some(MenuChoice::Start), None]);
}

#[test]
fn quit_wins_over_start_in_the_same_frame() {
    let choices = run_sequence(&[Click::Both]);
    assert_eq!(choices, vec![None, Some(MenuChoice::Quit)]);
}

#[test]
fn replayed_sequences_are_deterministic() {
    let sequence = [Click::Start, Click::Nothing, Click::Quit, Click::Start];

    let first_run = run_sequence(&sequence);
    let second_run = run_sequence(&sequence);

    assert_eq!(
        first_run,
        vec![
            None,
            Some(MenuChoice::Start),
            None,
            Some(MenuChoice::Quit),
            Some(MenuChoice::Start),
        ]
    );
    assert_eq!(first_run, second_run);
}
