#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Ledgehop.

use ledgehop_core::{Command, Event, LevelIndex, LevelLayout, PlayerBody, WELCOME_BANNER};
use ledgehop_system_physics as physics;

/// Represents the authoritative Ledgehop world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    level: Option<ActiveLevel>,
    tick_index: u64,
}

impl World {
    /// Creates a new world with no level loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            level: None,
            tick_index: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct ActiveLevel {
    index: LevelIndex,
    layout: LevelLayout,
    player: PlayerBody,
}

impl ActiveLevel {
    fn new(index: LevelIndex, layout: LevelLayout) -> Self {
        let player = PlayerBody::spawn_at(layout.player_start);
        Self {
            index,
            layout,
            player,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if let Command::LoadLevel { level, layout } = command {
        let rows = layout.rows;
        let columns = layout.columns;
        log::info!("level {level} loaded ({columns}x{rows})");
        world.level = Some(ActiveLevel::new(level, layout));
        out_events.push(Event::LevelLoaded {
            level,
            rows,
            columns,
        });
        return;
    }

    let Some(active) = world.level.as_mut() else {
        log::trace!("ignoring {command:?} while no level is loaded");
        return;
    };

    match command {
        Command::LoadLevel { .. } => {}
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            physics::step(&mut active.player, &active.layout.tiles);
            out_events.push(Event::TimeAdvanced);
        }
        Command::NudgePlayer { delta } => physics::nudge(&mut active.player, delta),
        Command::HaltPlayer => physics::halt(&mut active.player),
        Command::Jump => {
            if physics::jump(&mut active.player) {
                log::debug!("player jumped at tick {}", world.tick_index);
                out_events.push(Event::PlayerJumped);
            }
        }
        Command::ResetPlayer { cell } => {
            physics::reset(&mut active.player, cell);
            log::debug!(
                "player reset to column {}, row {}",
                cell.column(),
                cell.row()
            );
            out_events.push(Event::PlayerReset { cell });
        }
        Command::CompleteLevel => {
            out_events.push(Event::LevelCompleted {
                level: active.index,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use ledgehop_core::{CellCoord, LevelIndex, LevelView, PlayerBody, Tile};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of fixed ticks simulated since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Index of the loaded level, if any.
    #[must_use]
    pub fn level_index(world: &World) -> Option<LevelIndex> {
        world.level.as_ref().map(|level| level.index)
    }

    /// Captures a read-only view of the loaded level's static contents.
    #[must_use]
    pub fn level_view(world: &World) -> Option<LevelView<'_>> {
        world
            .level
            .as_ref()
            .map(|level| LevelView::new(&level.layout))
    }

    /// Current state of the player, if a level is loaded.
    #[must_use]
    pub fn player(world: &World) -> Option<&PlayerBody> {
        world.level.as_ref().map(|level| &level.player)
    }

    /// Solid tiles of the loaded level in collision order.
    #[must_use]
    pub fn tiles(world: &World) -> &[Tile] {
        world
            .level
            .as_ref()
            .map(|level| level.layout.tiles.as_slice())
            .unwrap_or_default()
    }

    /// Spike hazards of the loaded level.
    #[must_use]
    pub fn spikes(world: &World) -> &[Tile] {
        world
            .level
            .as_ref()
            .map(|level| level.layout.spikes.as_slice())
            .unwrap_or_default()
    }

    /// Exit tile of the loaded level, if present.
    #[must_use]
    pub fn exit(world: &World) -> Option<&Tile> {
        world
            .level
            .as_ref()
            .and_then(|level| level.layout.exit.as_ref())
    }

    /// Cell the player started the loaded level on.
    #[must_use]
    pub fn player_start(world: &World) -> Option<CellCoord> {
        world.level.as_ref().map(|level| level.layout.player_start)
    }

    /// Grid dimensions of the loaded level as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> Option<(u32, u32)> {
        world
            .level
            .as_ref()
            .map(|level| (level.layout.columns, level.layout.rows))
    }
}
