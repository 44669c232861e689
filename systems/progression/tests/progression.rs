use std::fs;

use ledgehop_core::{Command, Event, LevelIndex};
use ledgehop_system_hazards::Hazards;
use ledgehop_system_level_loader::{LevelError, LevelLibrary};
use ledgehop_system_progression::{Outcome, Progression, Session};
use ledgehop_world::{self as world, query, World};

fn campaign(levels: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temporary directory");
    for (index, source) in levels.iter().enumerate() {
        fs::write(dir.path().join(format!("level_{}.txt", index + 1)), source)
            .expect("write level fixture");
    }
    dir
}

#[test]
fn exit_contact_advances_session_by_exactly_one() {
    let dir = campaign(&["PE\n##", "P\n#"]);
    let mut progression = Progression::new(LevelLibrary::new(dir.path()), Session::new());

    let mut world = World::new();
    let mut events = Vec::new();
    let load = progression
        .load_current()
        .expect("first level loads")
        .into_command()
        .expect("first level is playable");
    world::apply(&mut world, load, &mut events);

    events.clear();
    world::apply(&mut world, Command::NudgePlayer { delta: 20.0 }, &mut events);
    world::apply(&mut world, Command::Tick, &mut events);

    let mut commands = Vec::new();
    Hazards.handle(
        query::player(&world).expect("player present"),
        query::level_view(&world).expect("level loaded"),
        &mut commands,
    );
    assert_eq!(commands, vec![Command::CompleteLevel]);
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let before = progression.session().current_level();
    let next = progression.handle(&events);
    assert_eq!(next, Some(LevelIndex::new(2)));
    assert_eq!(
        progression.session().current_level().get(),
        before.get() + 1
    );

    match progression.load_current().expect("second level loads") {
        Outcome::Play { level, layout } => {
            assert_eq!(level, LevelIndex::new(2));
            assert_eq!((layout.rows, layout.columns), (2, 1));
        }
        other => panic!("expected playable level, got {other:?}"),
    }
}

#[test]
fn running_out_of_levels_completes_campaign() {
    let dir = campaign(&["PE\n##"]);
    let mut progression = Progression::new(LevelLibrary::new(dir.path()), Session::new());

    let next = progression.handle(&[Event::LevelCompleted {
        level: LevelIndex::FIRST,
    }]);
    assert_eq!(next, Some(LevelIndex::new(2)));

    let outcome = progression.load_current().expect("campaign end is not an error");
    assert_eq!(outcome, Outcome::CampaignComplete { cleared: 1 });
    assert!(outcome.into_command().is_none());
}

#[test]
fn missing_first_level_is_an_error() {
    let dir = campaign(&[]);
    let progression = Progression::new(LevelLibrary::new(dir.path()), Session::new());

    let error = progression
        .load_current()
        .expect_err("no levels means nothing to play");
    assert!(matches!(error, LevelError::InvalidLevelReference { .. }));
}

#[test]
fn malformed_next_level_is_an_error() {
    let dir = campaign(&["PE\n##", "####"]);
    let mut progression = Progression::new(LevelLibrary::new(dir.path()), Session::new());
    let _ = progression.handle(&[Event::LevelCompleted {
        level: LevelIndex::FIRST,
    }]);

    let error = progression
        .load_current()
        .expect_err("level without a player must be rejected");
    assert!(matches!(error, LevelError::Malformed { .. }));
}

#[test]
fn custom_start_level_is_honoured() {
    let dir = campaign(&["P\n#", "P.\n##"]);
    let progression = Progression::new(
        LevelLibrary::new(dir.path()),
        Session::starting_at(LevelIndex::new(2)),
    );

    match progression.load_current().expect("level two loads") {
        Outcome::Play { level, layout } => {
            assert_eq!(level, LevelIndex::new(2));
            assert_eq!(layout.columns, 2);
        }
        other => panic!("expected playable level, got {other:?}"),
    }
}
