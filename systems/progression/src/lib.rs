#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Campaign progression across numbered levels.
//!
//! A [`Session`] remembers which level the player is on for the lifetime of
//! the process. [`Progression`] advances the session when the world reports a
//! cleared level and fetches the next layout from a [`LevelLibrary`].

use ledgehop_core::{Command, Event, LevelIndex, LevelLayout};
use ledgehop_system_level_loader::{LevelError, LevelLibrary};

/// In-memory progress through the campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    current_level: LevelIndex,
    cleared: u32,
}

impl Session {
    /// Creates a session positioned on the first level.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(LevelIndex::FIRST)
    }

    /// Creates a session positioned on the provided level.
    #[must_use]
    pub const fn starting_at(level: LevelIndex) -> Self {
        Self {
            current_level: level,
            cleared: 0,
        }
    }

    /// Level the player is currently on.
    #[must_use]
    pub const fn current_level(&self) -> LevelIndex {
        self.current_level
    }

    /// Number of levels cleared during this session.
    #[must_use]
    pub const fn cleared(&self) -> u32 {
        self.cleared
    }

    /// Moves to the next level and returns it.
    pub fn advance(&mut self) -> LevelIndex {
        self.current_level = self.current_level.next();
        self.cleared = self.cleared.saturating_add(1);
        self.current_level
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of looking up the session's current level.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The level exists and should be loaded.
    Play {
        /// Level that was loaded.
        level: LevelIndex,
        /// Parsed layout of the level.
        layout: LevelLayout,
    },
    /// Every numbered level has been cleared.
    CampaignComplete {
        /// Number of levels cleared during the session.
        cleared: u32,
    },
}

impl Outcome {
    /// Converts a playable outcome into the world command that activates it.
    #[must_use]
    pub fn into_command(self) -> Option<Command> {
        match self {
            Self::Play { level, layout } => Some(Command::LoadLevel { level, layout }),
            Self::CampaignComplete { .. } => None,
        }
    }
}

/// Drives the session forward as levels are cleared.
#[derive(Debug)]
pub struct Progression {
    session: Session,
    library: LevelLibrary,
}

impl Progression {
    /// Creates a progression reading levels from the provided library.
    #[must_use]
    pub fn new(library: LevelLibrary, session: Session) -> Self {
        Self { session, library }
    }

    /// Read-only access to the session state.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Loads the session's current level.
    ///
    /// Running out of numbered levels after clearing at least one is reported
    /// as [`Outcome::CampaignComplete`]; a missing first level is an error.
    pub fn load_current(&self) -> Result<Outcome, LevelError> {
        let level = self.session.current_level();
        match self.library.load(level) {
            Ok(layout) => Ok(Outcome::Play { level, layout }),
            Err(error) if error.is_missing_level() && self.session.cleared() > 0 => {
                log::info!(
                    "no level {level} found; campaign complete after {} level(s)",
                    self.session.cleared()
                );
                Ok(Outcome::CampaignComplete {
                    cleared: self.session.cleared(),
                })
            }
            Err(error) => Err(error),
        }
    }

    /// Consumes world events, advancing the session once per cleared level.
    ///
    /// Returns the level that must be loaded next, if any. Completions that
    /// refer to a level other than the current one are ignored.
    pub fn handle(&mut self, events: &[Event]) -> Option<LevelIndex> {
        let mut next = None;
        for event in events {
            if let Event::LevelCompleted { level } = event {
                if *level != self.session.current_level() {
                    continue;
                }
                log::info!("level {level} cleared");
                next = Some(self.session.advance());
            }
        }
        next
    }
}
