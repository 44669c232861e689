#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ledgehop platformer.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! The entity model lives here as well: static [`Tile`] records tagged with a
//! [`TileKind`], the single mutable [`PlayerBody`], and the [`LevelLayout`]
//! produced by the level loader.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Ledgehop.";

/// Side length of a single square grid cell expressed in world units.
pub const TILE_SIZE: f32 = 32.0;

/// Downward acceleration applied each tick while the player is airborne.
pub const GRAVITY: f32 = 0.4;

/// Terminal fall speed in world units per tick.
pub const MAX_FALL_SPEED: f32 = 6.0;

/// Vertical velocity assigned when a jump takes effect.
pub const JUMP_VELOCITY: f32 = -8.0;

/// Horizontal velocity change applied per movement key press.
pub const MOVE_IMPULSE: f32 = 2.0;

/// Number of fixed simulation ticks per second of wall-clock time.
pub const TICKS_PER_SECOND: u32 = 60;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the active level with a freshly parsed layout.
    LoadLevel {
        /// Number identifying the level within the campaign.
        level: LevelIndex,
        /// Parsed tile placements and player start.
        layout: LevelLayout,
    },
    /// Advances the simulation by exactly one fixed timestep.
    Tick,
    /// Adds the provided delta to the player's horizontal velocity.
    NudgePlayer {
        /// Velocity change in world units per tick.
        delta: f32,
    },
    /// Zeroes the player's horizontal velocity.
    HaltPlayer,
    /// Requests a jump; ignored unless the player touched ground since the last jump.
    Jump,
    /// Teleports the player to the provided cell and zeroes both velocities.
    ResetPlayer {
        /// Cell whose top-left corner the player is moved to.
        cell: CellCoord,
    },
    /// Marks the active level as cleared.
    CompleteLevel,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a new level became active.
    LevelLoaded {
        /// Number identifying the loaded level.
        level: LevelIndex,
        /// Number of lines in the level source.
        rows: u32,
        /// Length of the longest line in the level source.
        columns: u32,
    },
    /// Indicates that one fixed timestep was simulated.
    TimeAdvanced,
    /// Confirms that a jump request took effect.
    PlayerJumped,
    /// Confirms that the player was returned to a start cell.
    PlayerReset {
        /// Cell the player was moved to.
        cell: CellCoord,
    },
    /// Announces that the player reached the exit of the active level.
    LevelCompleted {
        /// Number identifying the cleared level.
        level: LevelIndex,
    },
}

/// One-based number identifying a level within the campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelIndex(u32);

impl LevelIndex {
    /// Index of the level every session starts with.
    pub const FIRST: Self = Self(1);

    /// Creates a new level index wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying level number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index of the level that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Axis-aligned rectangle measured in world units.
///
/// The origin is the top-left corner; the y axis grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and dimensions.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One-grid-unit rectangle covering the provided cell.
    #[must_use]
    pub fn cell(cell: CellCoord) -> Self {
        Self::new(
            cell.column() as f32 * TILE_SIZE,
            cell.row() as f32 * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        )
    }

    /// Horizontal coordinate of the left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate of the top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Horizontal extent of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shifts the rectangle horizontally by the provided amount.
    pub fn translate_x(&mut self, delta: f32) {
        self.x += delta;
    }

    /// Shifts the rectangle vertically by the provided amount.
    pub fn translate_y(&mut self, delta: f32) {
        self.y += delta;
    }

    /// Moves the rectangle so its left edge lies at `left`.
    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    /// Moves the rectangle so its right edge lies at `right`.
    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    /// Moves the rectangle so its top edge lies at `top`.
    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    /// Moves the rectangle so its bottom edge lies at `bottom`.
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Moves the rectangle so its top-left corner lies at the provided point.
    pub fn set_top_left(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Reports whether the two rectangles overlap.
    ///
    /// Rectangles that merely share an edge do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Edge transitions observed for a single key during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyTransition {
    /// The key went down during the frame.
    pub pressed: bool,
    /// The key went up during the frame.
    pub released: bool,
}

impl KeyTransition {
    /// Transition describing a key that went down.
    pub const PRESSED: Self = Self {
        pressed: true,
        released: false,
    };

    /// Transition describing a key that went up.
    pub const RELEASED: Self = Self {
        pressed: false,
        released: true,
    };
}

/// Kinds of static tiles that can appear in a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileKind {
    /// Plain wall, drawn from the `#` marker.
    Wall,
    /// Icy wall, drawn from the `@` marker. Collides like a plain wall.
    IceWall,
    /// Stone wall, drawn from the `$` marker. Collides like a plain wall.
    StoneWall,
    /// Hazard that returns the player to the level start, drawn from `S`.
    Spike,
    /// Level exit, drawn from `E`.
    Exit,
}

impl TileKind {
    /// Reports whether the player collides with tiles of this kind.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::IceWall | Self::StoneWall)
    }

    /// Logical image name used to resolve the tile's sprite.
    #[must_use]
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::IceWall => "ice-wall",
            Self::StoneWall => "stone-wall",
            Self::Spike => "spike",
            Self::Exit => "exit",
        }
    }
}

/// Immutable one-grid-unit tile placed at level load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    kind: TileKind,
    cell: CellCoord,
    rect: Rect,
}

impl Tile {
    /// Creates a tile of the provided kind covering the provided cell.
    #[must_use]
    pub fn new(kind: TileKind, cell: CellCoord) -> Self {
        Self {
            kind,
            cell,
            rect: Rect::cell(cell),
        }
    }

    /// Kind of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Grid cell occupied by the tile.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Rectangle covered by the tile in world units.
    #[must_use]
    pub const fn rect(&self) -> &Rect {
        &self.rect
    }
}

/// Mutable state of the single player character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerBody {
    /// Rectangle occupied by the player in world units.
    pub rect: Rect,
    /// Horizontal velocity in world units per tick.
    pub x_velocity: f32,
    /// Vertical velocity in world units per tick; positive values fall.
    pub y_velocity: f32,
    /// Whether the last vertical pass landed on a tile.
    pub on_ground: bool,
    /// Whether a jump may be started.
    pub can_jump: bool,
}

impl PlayerBody {
    /// Creates a resting player whose top-left corner sits on the provided cell.
    #[must_use]
    pub fn spawn_at(cell: CellCoord) -> Self {
        Self {
            rect: Rect::cell(cell),
            x_velocity: 0.0,
            y_velocity: 0.0,
            on_ground: false,
            can_jump: false,
        }
    }
}

/// Parsed contents of a level file.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    /// Number of lines in the level source.
    pub rows: u32,
    /// Character count of the longest line in the level source.
    pub columns: u32,
    /// Solid tiles in row-major order.
    pub tiles: Vec<Tile>,
    /// Spike hazards in row-major order.
    pub spikes: Vec<Tile>,
    /// Optional level exit.
    pub exit: Option<Tile>,
    /// Cell the player starts on and returns to after touching a hazard.
    pub player_start: CellCoord,
}

/// Read-only view into the static contents of the active level.
#[derive(Clone, Copy, Debug)]
pub struct LevelView<'a> {
    layout: &'a LevelLayout,
}

impl<'a> LevelView<'a> {
    /// Captures a new view backed by the provided layout.
    #[must_use]
    pub const fn new(layout: &'a LevelLayout) -> Self {
        Self { layout }
    }

    /// Solid tiles in the order collisions are resolved against them.
    #[must_use]
    pub fn tiles(&self) -> &'a [Tile] {
        &self.layout.tiles
    }

    /// Spike hazards in row-major order.
    #[must_use]
    pub fn spikes(&self) -> &'a [Tile] {
        &self.layout.spikes
    }

    /// Level exit, if the level has one.
    #[must_use]
    pub fn exit(&self) -> Option<&'a Tile> {
        self.layout.exit.as_ref()
    }

    /// Cell the player returns to after touching a hazard.
    #[must_use]
    pub const fn player_start(&self) -> CellCoord {
        self.layout.player_start
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.layout.columns, self.layout.rows)
    }
}
