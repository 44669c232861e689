use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ledgehop_core::{LevelIndex, LevelLayout};
use thiserror::Error;

use crate::{parse_level, MalformedLevel};

const LEVEL_FILE_PREFIX: &str = "level_";
const LEVEL_FILE_EXTENSION: &str = "txt";

/// Errors raised while resolving or reading level files.
#[derive(Debug, Error)]
pub enum LevelError {
    /// No file exists for the requested level number.
    #[error("level {level} does not exist (expected {})", .path.display())]
    InvalidLevelReference {
        /// Level that was requested.
        level: LevelIndex,
        /// Path the level was expected at.
        path: PathBuf,
    },
    /// The level file exists but could not be read.
    #[error("failed to read level file {}", .path.display())]
    Unreadable {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level file was read but does not describe a playable level.
    #[error("malformed level file {}", .path.display())]
    Malformed {
        /// Path of the malformed file.
        path: PathBuf,
        /// Specific defect found in the file.
        #[source]
        source: MalformedLevel,
    },
}

impl LevelError {
    /// Reports whether the error means the requested level does not exist.
    #[must_use]
    pub fn is_missing_level(&self) -> bool {
        matches!(self, Self::InvalidLevelReference { .. })
    }
}

/// Directory of numbered level files named `level_<n>.txt`.
#[derive(Clone, Debug)]
pub struct LevelLibrary {
    root: PathBuf,
}

impl LevelLibrary {
    /// Creates a library rooted at the provided directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the library reads level files from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file that stores the provided level.
    #[must_use]
    pub fn path_for(&self, level: LevelIndex) -> PathBuf {
        self.root.join(format!(
            "{LEVEL_FILE_PREFIX}{}.{LEVEL_FILE_EXTENSION}",
            level.get()
        ))
    }

    /// Reports whether a file exists for the provided level.
    #[must_use]
    pub fn contains(&self, level: LevelIndex) -> bool {
        self.path_for(level).is_file()
    }

    /// Reads and parses the provided level.
    pub fn load(&self, level: LevelIndex) -> Result<LevelLayout, LevelError> {
        let path = self.path_for(level);
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(LevelError::InvalidLevelReference { level, path });
            }
            Err(source) => return Err(LevelError::Unreadable { path, source }),
        };

        let layout = parse_level(&source).map_err(|source| LevelError::Malformed {
            path: path.clone(),
            source,
        })?;
        log::debug!(
            "parsed {} ({} rows, {} columns, {} solid tiles, {} spikes)",
            path.display(),
            layout.rows,
            layout.columns,
            layout.tiles.len(),
            layout.spikes.len()
        );
        Ok(layout)
    }

    /// Lists the consecutive levels present, starting from level one.
    ///
    /// The walk stops at the first missing number.
    #[must_use]
    pub fn scan(&self) -> Vec<LevelIndex> {
        let mut present = Vec::new();
        let mut level = LevelIndex::FIRST;
        while self.contains(level) {
            present.push(level);
            level = level.next();
        }
        present
    }
}
