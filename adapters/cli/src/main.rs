#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Ledgehop experience.

mod simulation;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ledgehop_core::LevelIndex;
use ledgehop_rendering::{Color, Presentation, RenderingBackend};
use ledgehop_rendering_macroquad::MacroquadBackend;
use ledgehop_system_level_loader::LevelLibrary;
use ledgehop_system_progression::{Progression, Session};

use crate::simulation::Simulation;

const WINDOW_TITLE: &str = "Ledgehop";

/// Command-line arguments accepted by the `ledgehop` binary.
#[derive(Debug, Parser)]
#[command(name = "ledgehop", version, about = "A tile-based platformer")]
struct CliArgs {
    /// Directory containing `level_<n>.txt` files.
    #[arg(long, value_name = "DIR", default_value = "levels")]
    levels_dir: PathBuf,
    /// Sprite manifest describing the image used for each tile kind.
    #[arg(long, value_name = "PATH", default_value = "assets/manifest.toml")]
    sprite_manifest: PathBuf,
    /// Level number the session starts on.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    start_level: u32,
    /// Draws solid rectangles instead of loading sprite images.
    #[arg(long)]
    no_sprites: bool,
    /// Synchronises presentation with the display refresh rate.
    #[arg(long, conflicts_with = "no_vsync")]
    vsync: bool,
    /// Renders frames as fast as possible.
    #[arg(long)]
    no_vsync: bool,
    /// Logs frame timing once per second.
    #[arg(long)]
    show_fps: bool,
    /// Starts playing immediately instead of showing the start menu.
    #[arg(long)]
    skip_menu: bool,
    /// Parses every consecutive level file, reports its size and exits.
    #[arg(long)]
    validate_levels: bool,
}

impl CliArgs {
    fn vsync(&self) -> Option<bool> {
        if self.vsync {
            Some(true)
        } else if self.no_vsync {
            Some(false)
        } else {
            None
        }
    }

    fn sprite_manifest(&self) -> Option<PathBuf> {
        (!self.no_sprites).then(|| self.sprite_manifest.clone())
    }
}

/// Entry point for the Ledgehop command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let library = LevelLibrary::new(&args.levels_dir);

    if args.validate_levels {
        return validate_levels(&library);
    }

    let session = Session::starting_at(LevelIndex::new(args.start_level));
    let mut simulation = Simulation::new(Progression::new(library, session))?;
    let presentation = Presentation::new(WINDOW_TITLE, Color::WHITE, simulation.scene());

    let mut backend = MacroquadBackend::new();
    if let Some(enabled) = args.vsync() {
        backend = backend.with_vsync(enabled);
    }
    let backend = backend
        .with_show_fps(args.show_fps)
        .with_sprite_manifest(args.sprite_manifest())
        .with_start_menu(!args.skip_menu);

    backend.run(presentation, move |elapsed, input, scene| {
        simulation.advance(elapsed, input, scene)
    })
}

fn validate_levels(library: &LevelLibrary) -> Result<()> {
    let levels = library.scan();
    if levels.is_empty() {
        bail!("no level files found in {}", library.root().display());
    }

    for level in levels {
        let layout = library
            .load(level)
            .with_context(|| format!("level {level} failed validation"))?;
        println!(
            "level {level}: {}x{} ({} solid tiles, {} spikes, {})",
            layout.columns,
            layout.rows,
            layout.tiles.len(),
            layout.spikes.len(),
            if layout.exit.is_some() {
                "exit present"
            } else {
                "no exit"
            }
        );
    }

    Ok(())
}
