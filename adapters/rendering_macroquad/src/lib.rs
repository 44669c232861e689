#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Ledgehop.
//!
//! Macroquad is pulled in with `default-features = false` because the game plays no audio.
//!
//! The start menu uses Macroquad's immediate-mode UI module. All UI-specific
//! calls live inside the local `ui` module to avoid leaking Macroquad UI types
//! throughout the renderer.

mod sprites;
mod ui;

use self::sprites::SpriteAtlas;
use self::ui::{draw_start_menu_ui, StartMenuUiContext, StartMenuUiResult};
use anyhow::{Context, Result};
use glam::Vec2;
use ledgehop_rendering::{
    Color, FrameFlow, FrameInput, GridPresentation, KeyTransition, Presentation,
    RenderingBackend, Scene, SceneSprite,
};
use macroquad::input::{is_key_pressed, is_key_released, KeyCode};
use std::{
    path::PathBuf,
    sync::mpsc,
    time::{Duration, Instant},
};

const WINDOW_WIDTH: i32 = 800;
const WINDOW_HEIGHT: i32 = 600;
const CAPTION_FONT_SIZE: f32 = 28.0;

/// Choice made on the start menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Begin playing the first level.
    Start,
    /// Close the window without playing.
    Quit,
}

/// Tracks start-menu interactions so that button clicks and key presses
/// observed during one frame resolve into a single choice on the next.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default)]
pub struct StartMenuInputState {
    start_latched: bool,
    quit_latched: bool,
}

impl StartMenuInputState {
    /// Records that "Start Game" was requested this frame.
    pub fn register_start(&mut self) {
        self.start_latched = true;
    }

    /// Records that "Quit" was requested this frame.
    pub fn register_quit(&mut self) {
        self.quit_latched = true;
    }

    /// Returns the latched choice, clearing both latches.
    ///
    /// Quitting wins when both were requested in the same frame.
    pub fn take_choice(&mut self) -> Option<MenuChoice> {
        let choice = if self.quit_latched {
            Some(MenuChoice::Quit)
        } else if self.start_latched {
            Some(MenuChoice::Start)
        } else {
            None
        };
        *self = Self::default();
        choice
    }
}

/// Raw keyboard edges observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyObservations {
    left_pressed: bool,
    left_released: bool,
    right_pressed: bool,
    right_released: bool,
    jump_pressed: bool,
    quit_requested: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        Self {
            left_pressed: is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            left_released: is_key_released(KeyCode::Left) || is_key_released(KeyCode::A),
            right_pressed: is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
            right_released: is_key_released(KeyCode::Right) || is_key_released(KeyCode::D),
            jump_pressed: is_key_pressed(KeyCode::Space)
                || is_key_pressed(KeyCode::Up)
                || is_key_pressed(KeyCode::W),
            quit_requested: is_key_pressed(KeyCode::Escape),
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            move_left: KeyTransition {
                pressed: self.left_pressed,
                released: self.left_released,
            },
            move_right: KeyTransition {
                pressed: self.right_pressed,
                released: self.right_released,
            },
            jump: self.jump_pressed,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    sprite_manifest: Option<PathBuf>,
    show_start_menu: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            sprite_manifest: Some(PathBuf::from("assets/manifest.toml")),
            show_start_menu: true,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        self.with_swap_interval(Some(i32::from(enabled)))
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Selects the sprite manifest to load, or `None` to draw solid rectangles.
    #[must_use]
    pub fn with_sprite_manifest(mut self, manifest: Option<PathBuf>) -> Self {
        self.sprite_manifest = manifest;
        self
    }

    /// Configures whether the start menu is shown before the first frame.
    #[must_use]
    pub fn with_start_menu(mut self, enabled: bool) -> Self {
        self.show_start_menu = enabled;
        self
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct FrameBreakdown {
    frame: Duration,
    update: Duration,
    render: Duration,
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    update_accum: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    avg_update: Duration,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns averages once a second has elapsed.
    fn record_frame(&mut self, breakdown: FrameBreakdown) -> Option<FpsMetrics> {
        self.elapsed += breakdown.frame;
        self.frames = self.frames.saturating_add(1);
        self.update_accum += breakdown.update;
        self.render_accum += breakdown.render;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        let metrics = FpsMetrics {
            per_second: frames as f32 / seconds,
            avg_update: self.update_accum / frames,
            avg_render: self.render_accum / frames,
        };
        *self = Self::default();
        Some(metrics)
    }
}

struct FrameLoop<F> {
    scene: Scene,
    background: macroquad::color::Color,
    update_scene: F,
    sprite_atlas: Option<SpriteAtlas>,
    show_fps: bool,
}

impl<F> FrameLoop<F>
where
    F: FnMut(Duration, FrameInput, &mut Scene) -> Result<FrameFlow>,
{
    async fn run(mut self) -> Result<()> {
        let mut fps_counter = FpsCounter::default();

        loop {
            let keys = KeyObservations::poll();
            if keys.quit_requested {
                log::info!("quit requested");
                return Ok(());
            }

            let dt_seconds = macroquad::time::get_frame_time();
            let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

            let update_start = Instant::now();
            let flow = (self.update_scene)(frame_dt, keys.frame_input(), &mut self.scene)?;
            let update_duration = update_start.elapsed();
            if flow == FrameFlow::Exit {
                return Ok(());
            }

            let render_start = Instant::now();
            macroquad::window::clear_background(self.background);
            let metrics = SceneMetrics::from_grid(
                self.scene.grid,
                macroquad::window::screen_width(),
                macroquad::window::screen_height(),
            );
            draw_scene(&self.scene, &metrics, self.sprite_atlas.as_ref())?;
            draw_caption(self.scene.caption.as_deref());
            let render_duration = render_start.elapsed();

            let fps_metrics = fps_counter.record_frame(FrameBreakdown {
                frame: frame_dt,
                update: update_duration,
                render: render_duration,
            });
            if self.show_fps {
                if let Some(FpsMetrics {
                    per_second,
                    avg_update,
                    avg_render,
                }) = fps_metrics
                {
                    log::info!(
                        "FPS: {:.2} | update: {:>6.2}ms render: {:>6.2}ms",
                        per_second,
                        avg_update.as_secs_f64() * 1_000.0,
                        avg_render.as_secs_f64() * 1_000.0,
                    );
                }
            }

            macroquad::window::next_frame().await;
        }
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> Result<FrameFlow> + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            sprite_manifest,
            show_start_menu,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title: window_title.clone(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (outcome_sender, outcome_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let outcome = run_window(
                window_title,
                to_macroquad_color(clear_color),
                scene,
                update_scene,
                WindowOptions {
                    show_fps,
                    sprite_manifest,
                    show_start_menu,
                },
            )
            .await;

            if let Err(error) = &outcome {
                log::error!("{error:#}");
            }
            let _ = outcome_sender.send(outcome);
        });

        outcome_receiver.recv().unwrap_or_else(|_| Ok(()))
    }
}

struct WindowOptions {
    show_fps: bool,
    sprite_manifest: Option<PathBuf>,
    show_start_menu: bool,
}

async fn run_window<F>(
    window_title: String,
    background: macroquad::color::Color,
    scene: Scene,
    update_scene: F,
    options: WindowOptions,
) -> Result<()>
where
    F: FnMut(Duration, FrameInput, &mut Scene) -> Result<FrameFlow>,
{
    let sprite_atlas = match options.sprite_manifest {
        Some(path) => Some(
            SpriteAtlas::from_manifest_path(&path)
                .with_context(|| format!("failed to load sprites listed in {}", path.display()))?,
        ),
        None => None,
    };

    if options.show_start_menu
        && run_start_menu(&window_title, background).await == MenuChoice::Quit
    {
        log::info!("quit from start menu");
        return Ok(());
    }

    FrameLoop {
        scene,
        background,
        update_scene,
        sprite_atlas,
        show_fps: options.show_fps,
    }
    .run()
    .await
}

async fn run_start_menu(title: &str, background: macroquad::color::Color) -> MenuChoice {
    let mut input = StartMenuInputState::default();

    loop {
        if let Some(choice) = input.take_choice() {
            return choice;
        }

        if is_key_pressed(KeyCode::Escape) {
            input.register_quit();
        }
        if is_key_pressed(KeyCode::Enter) {
            input.register_start();
        }

        macroquad::window::clear_background(background);
        let screen = macroquad::math::Vec2::new(
            macroquad::window::screen_width(),
            macroquad::window::screen_height(),
        );
        let mut root_ui = macroquad::ui::root_ui();
        let StartMenuUiResult {
            start_pressed,
            quit_pressed,
        } = draw_start_menu_ui(&mut root_ui, StartMenuUiContext { screen, title });
        drop(root_ui);
        if start_pressed {
            input.register_start();
        }
        if quit_pressed {
            input.register_quit();
        }

        macroquad::window::next_frame().await;
    }
}

/// Maps world units onto the window, letterboxing the level grid.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SceneMetrics {
    fn from_grid(grid: GridPresentation, screen_width: f32, screen_height: f32) -> Self {
        let world_width = grid.width();
        let world_height = grid.height();
        if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            return Self {
                scale: 1.0,
                offset_x: 0.0,
                offset_y: 0.0,
            };
        }

        let scale = (screen_width / world_width)
            .min(screen_height / world_height)
            .min(1.0);
        let offset_x = ((screen_width - world_width * scale) * 0.5).max(0.0);
        let offset_y = ((screen_height - world_height * scale) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    fn to_screen(&self, sprite: &SceneSprite) -> (Vec2, Vec2) {
        let position = Vec2::new(
            self.offset_x + sprite.position.x * self.scale,
            self.offset_y + sprite.position.y * self.scale,
        );
        (position, sprite.size * self.scale)
    }
}

fn draw_scene(
    scene: &Scene,
    metrics: &SceneMetrics,
    sprite_atlas: Option<&SpriteAtlas>,
) -> Result<()> {
    for sprite in scene.sprites() {
        let (position, size) = metrics.to_screen(sprite);
        match sprite_atlas {
            Some(atlas) => atlas.draw(sprite.key, position, size)?,
            None => macroquad::shapes::draw_rectangle(
                position.x,
                position.y,
                size.x,
                size.y,
                to_macroquad_color(sprite.key.fallback_color()),
            ),
        }
    }
    Ok(())
}

fn draw_caption(caption: Option<&str>) {
    let Some(caption) = caption else {
        return;
    };
    let _ = macroquad::text::draw_text(
        caption,
        12.0,
        CAPTION_FONT_SIZE,
        CAPTION_FONT_SIZE,
        macroquad::color::BLACK,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
