#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level loading for Ledgehop.
//!
//! Levels are plain text grids with one line per row and one character per
//! cell. [`parse_level`] turns such a grid into a [`LevelLayout`];
//! [`LevelLibrary`] resolves numbered level files inside a directory.

mod library;

pub use library::{LevelError, LevelLibrary};

use ledgehop_core::{CellCoord, LevelLayout, Tile, TileKind};
use thiserror::Error;

/// Reasons a level source cannot be turned into a playable layout.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MalformedLevel {
    /// The source did not contain a single line.
    #[error("level source contains no lines")]
    Empty,
    /// No `P` marker was found.
    #[error("level has no player start marker `P`")]
    MissingPlayer,
    /// More than one `P` marker was found.
    #[error(
        "level has more than one player start marker (column {}, row {} and column {}, row {})",
        .first.column(),
        .first.row(),
        .second.column(),
        .second.row()
    )]
    MultiplePlayers {
        /// Cell of the first marker in row-major order.
        first: CellCoord,
        /// Cell of the second marker in row-major order.
        second: CellCoord,
    },
}

/// Placement decoded from a single level character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Tile(TileKind),
    PlayerStart,
}

fn decode_marker(symbol: char) -> Option<Marker> {
    match symbol {
        '#' => Some(Marker::Tile(TileKind::Wall)),
        '@' => Some(Marker::Tile(TileKind::IceWall)),
        '$' => Some(Marker::Tile(TileKind::StoneWall)),
        'S' => Some(Marker::Tile(TileKind::Spike)),
        'E' => Some(Marker::Tile(TileKind::Exit)),
        'P' => Some(Marker::PlayerStart),
        _ => None,
    }
}

/// Parses a textual level grid into a layout.
///
/// Cells are visited row-major, top to bottom and left to right, so solid
/// tiles and spikes keep that order. When several exits are present the last
/// one wins. Line terminators are not cells; every other character is, and
/// anything outside the marker set is empty space.
pub fn parse_level(source: &str) -> Result<LevelLayout, MalformedLevel> {
    let mut rows = 0u32;
    let mut columns = 0u32;
    let mut tiles = Vec::new();
    let mut spikes = Vec::new();
    let mut exit = None;
    let mut player_start: Option<CellCoord> = None;

    for (row, line) in source.lines().enumerate() {
        let row = row as u32;
        rows = row + 1;

        let mut width = 0u32;
        for (column, symbol) in line.chars().enumerate() {
            let column = column as u32;
            width = column + 1;

            let cell = CellCoord::new(column, row);
            match decode_marker(symbol) {
                Some(Marker::Tile(kind)) if kind.is_solid() => tiles.push(Tile::new(kind, cell)),
                Some(Marker::Tile(TileKind::Spike)) => spikes.push(Tile::new(TileKind::Spike, cell)),
                Some(Marker::Tile(kind)) => exit = Some(Tile::new(kind, cell)),
                Some(Marker::PlayerStart) => {
                    if let Some(first) = player_start {
                        return Err(MalformedLevel::MultiplePlayers {
                            first,
                            second: cell,
                        });
                    }
                    player_start = Some(cell);
                }
                None => {}
            }
        }
        columns = columns.max(width);
    }

    if rows == 0 {
        return Err(MalformedLevel::Empty);
    }

    let player_start = player_start.ok_or(MalformedLevel::MissingPlayer)?;

    Ok(LevelLayout {
        rows,
        columns,
        tiles,
        spikes,
        exit,
        player_start,
    })
}
