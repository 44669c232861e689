//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, BLACK, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};

const MENU_SIZE: Vec2 = Vec2::new(320.0, 220.0);

/// Snapshot of the start menu's layout for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StartMenuUiContext<'a> {
    /// Screen dimensions the menu is centred within.
    pub screen: Vec2,
    /// Title displayed above the buttons.
    pub title: &'a str,
}

/// Buttons clicked while drawing the start menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct StartMenuUiResult {
    /// Whether "Start Game" was clicked.
    pub start_pressed: bool,
    /// Whether "Quit" was clicked.
    pub quit_pressed: bool,
}

/// Renders the start menu window and reports which buttons were clicked.
pub(crate) fn draw_start_menu_ui(ui: &mut Ui, context: StartMenuUiContext<'_>) -> StartMenuUiResult {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(WHITE)
        .color_hovered(WHITE)
        .color_clicked(WHITE)
        .color_inactive(WHITE)
        .text_color(BLACK)
        .margin(RectOffset::new(24.0, 24.0, 24.0, 24.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(BLACK)
        .font_size(32)
        .margin(RectOffset::new(0.0, 0.0, 8.0, 16.0))
        .build();
    skin.label_style = label_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .font_size(24)
        .color(Color::from_rgba(48, 64, 208, 255))
        .color_hovered(Color::from_rgba(72, 90, 230, 255))
        .color_clicked(Color::from_rgba(32, 44, 160, 255))
        .margin(RectOffset::new(16.0, 16.0, 8.0, 8.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let origin = ((context.screen - MENU_SIZE) * 0.5).max(Vec2::ZERO);
    let mut result = StartMenuUiResult::default();
    let _ = ui.window(hash!("start_menu"), origin, MENU_SIZE, |ui| {
        ui.label(None, context.title);
        result.start_pressed = ui.button(None, "Start Game");
        result.quit_pressed = ui.button(None, "Quit");
    });

    ui.pop_skin();

    result
}
