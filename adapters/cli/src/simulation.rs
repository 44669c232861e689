//! Frame-to-tick driver that owns the world and the systems around it.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use ledgehop_core::{Command, Event, TICKS_PER_SECOND};
use ledgehop_rendering::{FrameFlow, FrameInput, GridPresentation, Scene, SceneSprite};
use ledgehop_system_controls::{Controls, ControlsInput};
use ledgehop_system_hazards::Hazards;
use ledgehop_system_progression::Progression;
use ledgehop_world::{self as world, query, World};

/// Upper bound on ticks simulated for a single rendered frame.
const MAX_TICKS_PER_FRAME: u32 = 8;

/// Converts variable frame deltas into a whole number of fixed ticks.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedTimestep {
    step: Duration,
    max_steps: u32,
    accumulator: Duration,
}

impl FixedTimestep {
    pub(crate) fn new(step: Duration, max_steps: u32) -> Self {
        Self {
            step,
            max_steps,
            accumulator: Duration::ZERO,
        }
    }

    /// Timestep running `ticks` fixed updates per second.
    pub(crate) fn per_second(ticks: u32) -> Self {
        Self::new(Duration::from_secs(1) / ticks.max(1), MAX_TICKS_PER_FRAME)
    }

    /// Accumulates `elapsed` and returns how many ticks are now due.
    ///
    /// Backlog beyond `max_steps` is discarded so a long stall does not
    /// replay seconds of simulation in one frame.
    pub(crate) fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_steps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            log::debug!(
                "dropping {:?} of simulation backlog after {ticks} ticks",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        ticks
    }
}

/// Result of asking progression for the session's current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadStatus {
    Playing,
    CampaignComplete,
}

/// Owns the world together with the systems that drive it each frame.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    controls: Controls,
    hazards: Hazards,
    progression: Progression,
    timestep: FixedTimestep,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates the simulation and loads the session's starting level.
    pub(crate) fn new(progression: Progression) -> Result<Self> {
        let mut simulation = Self {
            world: World::new(),
            controls: Controls,
            hazards: Hazards,
            progression,
            timestep: FixedTimestep::per_second(TICKS_PER_SECOND),
            commands: Vec::new(),
            events: Vec::new(),
        };
        log::info!("{}", query::welcome_banner(&simulation.world));

        if simulation.load_current()? == LoadStatus::CampaignComplete {
            bail!("no playable level to start from");
        }
        Ok(simulation)
    }

    /// Scene describing the current world state.
    pub(crate) fn scene(&self) -> Scene {
        let mut scene = Scene::empty(GridPresentation::new(0, 0));
        self.populate_scene(&mut scene);
        scene
    }

    /// Runs one rendered frame worth of simulation.
    ///
    /// Player input is applied first, then every due tick runs physics,
    /// hazards and exit handling in that order. Ticks remaining after a level
    /// is cleared are skipped so the next level starts from rest.
    pub(crate) fn advance(
        &mut self,
        elapsed: Duration,
        input: FrameInput,
        scene: &mut Scene,
    ) -> Result<FrameFlow> {
        self.events.clear();
        self.controls.handle(controls_input(input), &mut self.commands);
        self.flush_commands();

        let ticks = self.timestep.advance(elapsed);
        for _ in 0..ticks {
            self.events.clear();
            world::apply(&mut self.world, Command::Tick, &mut self.events);

            if let (Some(player), Some(level)) =
                (query::player(&self.world), query::level_view(&self.world))
            {
                self.hazards.handle(player, level, &mut self.commands);
            }
            self.flush_commands();

            if self.progression.handle(&self.events).is_some() {
                log::info!("Level cleared!");
                if self.load_current()? == LoadStatus::CampaignComplete {
                    return Ok(FrameFlow::Exit);
                }
                break;
            }
        }

        self.populate_scene(scene);
        Ok(FrameFlow::Continue)
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn load_current(&mut self) -> Result<LoadStatus> {
        let level = self.progression.session().current_level();
        let outcome = self
            .progression
            .load_current()
            .with_context(|| format!("failed to load level {level}"))?;

        match outcome.into_command() {
            Some(command) => {
                world::apply(&mut self.world, command, &mut self.events);
                self.timestep = FixedTimestep::per_second(TICKS_PER_SECOND);
                Ok(LoadStatus::Playing)
            }
            None => {
                log::info!(
                    "campaign complete: {} level(s) cleared",
                    self.progression.session().cleared()
                );
                Ok(LoadStatus::CampaignComplete)
            }
        }
    }

    fn populate_scene(&self, scene: &mut Scene) {
        let Some(level) = query::level_view(&self.world) else {
            return;
        };

        let (columns, rows) = level.dimensions();
        scene.grid = GridPresentation::new(columns, rows);
        scene.tiles.clear();
        scene
            .tiles
            .extend(level.tiles().iter().map(SceneSprite::from_tile));
        scene.spikes.clear();
        scene
            .spikes
            .extend(level.spikes().iter().map(SceneSprite::from_tile));
        scene.exit = level.exit().map(SceneSprite::from_tile);
        scene.player = query::player(&self.world).map(SceneSprite::from_player);
        scene.caption = query::level_index(&self.world).map(|level| format!("Level {level}"));
    }
}

fn controls_input(input: FrameInput) -> ControlsInput {
    ControlsInput {
        move_left: input.move_left,
        move_right: input.move_right,
        jump: input.jump,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgehop_core::LevelIndex;
    use ledgehop_rendering::{KeyTransition, SpriteKey};
    use ledgehop_system_level_loader::LevelLibrary;
    use ledgehop_system_progression::Session;
    use std::fs;

    const FRAME: Duration = Duration::from_millis(100);

    fn campaign(levels: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temporary directory");
        for (index, source) in levels.iter().enumerate() {
            fs::write(dir.path().join(format!("level_{}.txt", index + 1)), source)
                .expect("write level fixture");
        }
        dir
    }

    fn simulation_for(dir: &tempfile::TempDir) -> Simulation {
        let progression = Progression::new(LevelLibrary::new(dir.path()), Session::new());
        Simulation::new(progression).expect("first level loads")
    }

    fn press_right() -> FrameInput {
        FrameInput {
            move_right: KeyTransition::PRESSED,
            ..FrameInput::default()
        }
    }

    #[test]
    fn timestep_emits_whole_ticks_and_keeps_remainder() {
        let mut timestep = FixedTimestep::new(Duration::from_millis(10), 8);
        assert_eq!(timestep.advance(Duration::from_millis(25)), 2);
        assert_eq!(timestep.advance(Duration::from_millis(5)), 1);
        assert_eq!(timestep.advance(Duration::from_millis(9)), 0);
    }

    #[test]
    fn timestep_caps_ticks_and_drops_backlog() {
        let mut timestep = FixedTimestep::new(Duration::from_millis(10), 8);
        assert_eq!(timestep.advance(Duration::from_secs(1)), 8);
        assert_eq!(timestep.advance(Duration::from_millis(5)), 0);
    }

    #[test]
    fn sixty_hertz_timestep_runs_six_ticks_per_tenth_of_a_second() {
        let mut timestep = FixedTimestep::per_second(TICKS_PER_SECOND);
        assert_eq!(timestep.advance(FRAME), 6);
    }

    #[test]
    fn missing_first_level_fails_to_start() {
        let dir = campaign(&[]);
        let progression = Progression::new(LevelLibrary::new(dir.path()), Session::new());
        assert!(Simulation::new(progression).is_err());
    }

    #[test]
    fn initial_scene_mirrors_the_loaded_level() {
        let dir = campaign(&["P.SE\n####"]);
        let simulation = simulation_for(&dir);

        let scene = simulation.scene();
        assert_eq!(scene.grid, GridPresentation::new(4, 2));
        assert_eq!(scene.tiles.len(), 4);
        assert_eq!(scene.spikes.len(), 1);
        assert_eq!(scene.exit.map(|exit| exit.key), Some(SpriteKey::Exit));
        assert_eq!(scene.player.map(|player| player.key), Some(SpriteKey::Player));
        assert_eq!(scene.caption.as_deref(), Some("Level 1"));
    }

    #[test]
    fn walking_into_the_exit_loads_the_next_level() {
        let dir = campaign(&["P.E\n###", "P..E\n####"]);
        let mut simulation = simulation_for(&dir);
        let mut scene = simulation.scene();

        let flow = simulation
            .advance(FRAME, press_right(), &mut scene)
            .expect("frame runs");
        assert_eq!(flow, FrameFlow::Continue);

        for _ in 0..10 {
            let flow = simulation
                .advance(FRAME, FrameInput::default(), &mut scene)
                .expect("frame runs");
            assert_eq!(flow, FrameFlow::Continue);
        }

        assert_eq!(query::level_index(&simulation.world), Some(LevelIndex::new(2)));
        assert_eq!(scene.grid, GridPresentation::new(4, 2));
        assert_eq!(scene.caption.as_deref(), Some("Level 2"));
        let player = query::player(&simulation.world).expect("player present");
        assert_eq!(player.x_velocity, 0.0);
    }

    #[test]
    fn clearing_the_last_level_ends_the_loop() {
        let dir = campaign(&["PE\n##"]);
        let mut simulation = simulation_for(&dir);
        let mut scene = simulation.scene();

        let flow = simulation
            .advance(FRAME, press_right(), &mut scene)
            .expect("frame runs");
        assert_eq!(flow, FrameFlow::Exit);
        assert_eq!(simulation.progression.session().cleared(), 1);
    }

    #[test]
    fn spikes_send_the_player_back_to_the_start() {
        let dir = campaign(&["P.S.E\n#####"]);
        let mut simulation = simulation_for(&dir);
        let mut scene = simulation.scene();

        let _ = simulation
            .advance(FRAME, press_right(), &mut scene)
            .expect("frame runs");
        for _ in 0..5 {
            let _ = simulation
                .advance(FRAME, FrameInput::default(), &mut scene)
                .expect("frame runs");
        }

        let player = query::player(&simulation.world).expect("player present");
        assert!(player.rect.left() < 64.0, "player never passes the spike");
        assert_eq!(query::level_index(&simulation.world), Some(LevelIndex::FIRST));
    }
}
