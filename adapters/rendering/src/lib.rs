#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Ledgehop adapters.

pub use ledgehop_core::KeyTransition;

use anyhow::Result as AnyResult;
use glam::Vec2;
use ledgehop_core::{PlayerBody, Rect, Tile, TileKind, TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white, the background every frame is cleared to.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Logical image names resolved by rendering backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpriteKey {
    /// Plain wall tile.
    Wall,
    /// Icy wall tile.
    IceWall,
    /// Stone wall tile.
    StoneWall,
    /// Spike hazard.
    Spike,
    /// Level exit.
    Exit,
    /// Player character.
    Player,
}

impl SpriteKey {
    /// Every sprite a backend must be able to draw, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Wall,
        Self::IceWall,
        Self::StoneWall,
        Self::Spike,
        Self::Exit,
        Self::Player,
    ];

    /// Logical name used by sprite manifests.
    #[must_use]
    pub const fn logical_name(self) -> &'static str {
        match self.tile_kind() {
            Some(kind) => kind.asset_name(),
            None => "player",
        }
    }

    /// Tile kind drawn with this sprite, or `None` for the player.
    #[must_use]
    pub const fn tile_kind(self) -> Option<TileKind> {
        match self {
            Self::Wall => Some(TileKind::Wall),
            Self::IceWall => Some(TileKind::IceWall),
            Self::StoneWall => Some(TileKind::StoneWall),
            Self::Spike => Some(TileKind::Spike),
            Self::Exit => Some(TileKind::Exit),
            Self::Player => None,
        }
    }

    /// Resolves a logical manifest name into a sprite key.
    #[must_use]
    pub fn from_logical_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.logical_name() == name)
    }

    /// Solid color drawn in place of the sprite when textures are disabled.
    #[must_use]
    pub const fn fallback_color(self) -> Color {
        match self {
            Self::Wall => Color::from_rgb_u8(0x6b, 0x4f, 0x3a),
            Self::IceWall => Color::from_rgb_u8(0x9f, 0xd8, 0xf0),
            Self::StoneWall => Color::from_rgb_u8(0x80, 0x80, 0x88),
            Self::Spike => Color::from_rgb_u8(200, 0, 0),
            Self::Exit => Color::from_rgb_u8(0, 200, 50),
            Self::Player => Color::from_rgb_u8(0x30, 0x40, 0xd0),
        }
    }
}

impl From<TileKind> for SpriteKey {
    fn from(kind: TileKind) -> Self {
        match kind {
            TileKind::Wall => Self::Wall,
            TileKind::IceWall => Self::IceWall,
            TileKind::StoneWall => Self::StoneWall,
            TileKind::Spike => Self::Spike,
            TileKind::Exit => Self::Exit,
        }
    }
}

/// Drawable image handle paired with the rectangle it covers in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSprite {
    /// Image to draw.
    pub key: SpriteKey,
    /// Top-left corner in world units.
    pub position: Vec2,
    /// Extent in world units.
    pub size: Vec2,
}

impl SceneSprite {
    /// Creates a sprite covering the provided rectangle.
    #[must_use]
    pub fn new(key: SpriteKey, rect: &Rect) -> Self {
        Self {
            key,
            position: Vec2::new(rect.x(), rect.y()),
            size: Vec2::new(rect.width(), rect.height()),
        }
    }

    /// Sprite for a static tile.
    #[must_use]
    pub fn from_tile(tile: &Tile) -> Self {
        Self::new(tile.kind().into(), tile.rect())
    }

    /// Sprite for the player character.
    #[must_use]
    pub fn from_player(player: &PlayerBody) -> Self {
        Self::new(SpriteKey::Player, &player.rect)
    }
}

/// Describes the level grid that adapters scale into the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
}

impl GridPresentation {
    /// Creates a grid descriptor using the standard tile size.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            tile_length: TILE_SIZE,
        }
    }

    /// Total width of the grid measured in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid measured in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Transitions of the move-left action.
    pub move_left: KeyTransition,
    /// Transitions of the move-right action.
    pub move_right: KeyTransition,
    /// Whether the jump action was pressed.
    pub jump: bool,
}

/// Instruction returned by the per-frame update callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameFlow {
    /// Keep running the frame loop.
    Continue,
    /// Close the window and return from the backend.
    Exit,
}

/// Everything a backend draws in a single frame.
///
/// Backends draw tiles, then spikes, then the player, then the exit.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid the sprites are laid out on.
    pub grid: GridPresentation,
    /// Solid tiles.
    pub tiles: Vec<SceneSprite>,
    /// Spike hazards.
    pub spikes: Vec<SceneSprite>,
    /// Player character, absent until a level is loaded.
    pub player: Option<SceneSprite>,
    /// Level exit, if the level has one.
    pub exit: Option<SceneSprite>,
    /// Short status line shown over the scene.
    pub caption: Option<String>,
}

impl Scene {
    /// Creates an empty scene for a grid of the provided dimensions.
    #[must_use]
    pub fn empty(grid: GridPresentation) -> Self {
        Self {
            grid,
            tiles: Vec::new(),
            spikes: Vec::new(),
            player: None,
            exit: None,
            caption: None,
        }
    }

    /// Sprites in draw order.
    pub fn sprites(&self) -> impl Iterator<Item = &SceneSprite> {
        self.tiles
            .iter()
            .chain(self.spikes.iter())
            .chain(self.player.iter())
            .chain(self.exit.iter())
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Ledgehop scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the elapsed frame time and
    /// the input captured by the adapter, and refreshes the scene before it is
    /// drawn. Returning [`FrameFlow::Exit`] ends the loop cleanly; returning an
    /// error ends it and propagates the error to the caller.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> AnyResult<FrameFlow> + 'static;
}

/// Errors raised while preparing assets for presentation.
#[derive(Debug, Error)]
pub enum RenderingError {
    /// An image required to draw the scene could not be resolved.
    #[error("sprite `{}` is missing: {reason}", .key.logical_name())]
    AssetMissing {
        /// Sprite that could not be resolved.
        key: SpriteKey,
        /// Human-readable explanation of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgehop_core::CellCoord;

    #[test]
    fn sprite_keys_match_tile_asset_names() {
        for kind in [
            TileKind::Wall,
            TileKind::IceWall,
            TileKind::StoneWall,
            TileKind::Spike,
            TileKind::Exit,
        ] {
            let key = SpriteKey::from(kind);
            assert_eq!(key.logical_name(), kind.asset_name());
            assert_eq!(key.tile_kind(), Some(kind));
        }
        assert_eq!(SpriteKey::Player.tile_kind(), None);
        assert_eq!(SpriteKey::Player.logical_name(), "player");
    }

    #[test]
    fn logical_names_resolve_back_to_keys() {
        for key in SpriteKey::ALL {
            assert_eq!(SpriteKey::from_logical_name(key.logical_name()), Some(key));
        }
        assert_eq!(SpriteKey::from_logical_name("lava"), None);
    }

    #[test]
    fn serde_uses_logical_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            key: SpriteKey,
        }

        let parsed: Wrapper = toml::from_str("key = \"stone-wall\"").expect("valid key");
        assert_eq!(parsed.key, SpriteKey::StoneWall);
    }

    #[test]
    fn tile_sprites_cover_one_grid_unit() {
        let tile = Tile::new(TileKind::Spike, CellCoord::new(2, 1));
        let sprite = SceneSprite::from_tile(&tile);
        assert_eq!(sprite.key, SpriteKey::Spike);
        assert_eq!(sprite.position, Vec2::new(64.0, 32.0));
        assert_eq!(sprite.size, Vec2::splat(TILE_SIZE));
    }

    #[test]
    fn scene_sprites_follow_draw_order() {
        let mut scene = Scene::empty(GridPresentation::new(3, 2));
        scene.exit = Some(SceneSprite::from_tile(&Tile::new(
            TileKind::Exit,
            CellCoord::new(2, 0),
        )));
        scene.player = Some(SceneSprite::from_player(&PlayerBody::spawn_at(
            CellCoord::new(0, 0),
        )));
        scene.spikes = vec![SceneSprite::from_tile(&Tile::new(
            TileKind::Spike,
            CellCoord::new(1, 0),
        ))];
        scene.tiles = vec![SceneSprite::from_tile(&Tile::new(
            TileKind::Wall,
            CellCoord::new(0, 1),
        ))];

        let order: Vec<_> = scene.sprites().map(|sprite| sprite.key).collect();
        assert_eq!(
            order,
            vec![
                SpriteKey::Wall,
                SpriteKey::Spike,
                SpriteKey::Player,
                SpriteKey::Exit
            ]
        );
    }

    #[test]
    fn grid_dimensions_scale_with_tile_length() {
        let grid = GridPresentation::new(25, 19);
        assert_eq!(grid.width(), 800.0);
        assert_eq!(grid.height(), 608.0);
    }
}
