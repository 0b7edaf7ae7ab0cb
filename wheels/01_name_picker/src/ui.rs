//! UI module - egui names panel, winner dialog and settings
//!
//! Provides the interactive UI components using nannou_egui.

use nannou_egui::egui;
use wheel_engine::{parse_hex, to_hex, WheelConfig};

pub const SIDE_PANEL_WIDTH: f32 = 280.0;

/// Result of the names panel for one frame
#[derive(Default)]
pub struct PanelResult {
    /// The names text was edited
    pub text_changed: bool,
    /// The spin button was pressed
    pub spin_clicked: bool,
    /// The names text box holds keyboard focus
    pub text_focused: bool,
}

/// Draw the left panel with the names text box and the spin button
pub fn draw_names_panel(
    ctx: &egui::Context,
    text: &mut String,
    name_count: usize,
    can_spin: bool,
    progress: Option<f32>,
) -> PanelResult {
    let mut result = PanelResult::default();

    egui::SidePanel::left("names_panel")
        .resizable(false)
        .exact_width(SIDE_PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Names");
            ui.label("One name per line");
            ui.separator();

            let response = ui.add(
                egui::TextEdit::multiline(text)
                    .hint_text("Alice\nBob\nCarol")
                    .desired_rows(16)
                    .desired_width(f32::INFINITY),
            );
            result.text_changed = response.changed();
            result.text_focused = response.has_focus();

            ui.label(format!("{} on the wheel", name_count));
            ui.separator();

            let label = if progress.is_some() { "Spinning..." } else { "Spin" };
            let button = egui::Button::new(label).min_size(egui::vec2(SIDE_PANEL_WIDTH - 20.0, 36.0));
            if ui
                .add_enabled(can_spin, button)
                .on_hover_text("Space or Enter also spins")
                .clicked()
            {
                result.spin_clicked = true;
            }
            if let Some(fraction) = progress {
                ui.add(egui::ProgressBar::new(fraction));
            }
        });

    result
}

/// Draw the winner dialog. Returns true when it was dismissed.
pub fn draw_winner_dialog(ctx: &egui::Context, winner: &str) -> bool {
    let mut dismissed = false;

    egui::Window::new("Today's post is by")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(winner);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    dismissed
}

/// Editable copy of the wheel settings
pub struct SettingsEdit {
    pub remove_winners: bool,
    pub spin_seconds: f32,
    pub min_turns: u32,
    pub max_turns: u32,
    pub font_size: f32,
    pub colors: Vec<[u8; 3]>,
}

impl SettingsEdit {
    pub fn from_config(config: &WheelConfig) -> Self {
        Self {
            remove_winners: config.remove_winners,
            spin_seconds: config.spin_duration_ms as f32 / 1000.0,
            min_turns: config.min_turns,
            max_turns: config.max_turns,
            font_size: config.font_size,
            colors: config
                .palette
                .iter()
                .filter_map(|hex| parse_hex(hex).ok())
                .map(|c| [c.red, c.green, c.blue])
                .collect(),
        }
    }

    /// Fold the edits back into `config`, keeping fields the panel does not show
    pub fn to_config(&self, config: &WheelConfig) -> WheelConfig {
        WheelConfig {
            remove_winners: self.remove_winners,
            spin_duration_ms: (self.spin_seconds * 1000.0).round() as u64,
            min_turns: self.min_turns,
            max_turns: self.max_turns.max(self.min_turns),
            font_size: self.font_size,
            palette: self
                .colors
                .iter()
                .map(|&[r, g, b]| to_hex(wheel_engine::palette::Srgb::new(r, g, b)))
                .collect(),
            ..config.clone()
        }
    }
}

/// Draw the settings panel. Returns true if a setting changed.
pub fn draw_settings_panel(ctx: &egui::Context, edit: &mut SettingsEdit) -> bool {
    let mut changed = false;

    egui::Window::new("Settings")
        .collapsible(true)
        .resizable(false)
        .default_open(false)
        .default_width(220.0)
        .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
        .show(ctx, |ui| {
            changed |= ui
                .checkbox(&mut edit.remove_winners, "Remove winner after each spin")
                .changed();
            ui.label("Nobody gets picked twice");
            ui.separator();

            changed |= ui
                .add(egui::Slider::new(&mut edit.spin_seconds, 2.0..=20.0).text("Spin seconds"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edit.min_turns, 1..=10).text("Fewest turns"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edit.max_turns, 1..=10).text("Most turns"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edit.font_size, 12.0..=48.0).text("Label size"))
                .changed();
            ui.separator();

            ui.label("Segment colors");
            ui.horizontal_wrapped(|ui| {
                for color in edit.colors.iter_mut() {
                    changed |= ui.color_edit_button_srgb(color).changed();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Add color").clicked() {
                    let last = edit.colors.last().copied().unwrap_or([255, 255, 255]);
                    edit.colors.push(last);
                    changed = true;
                }
                if ui
                    .add_enabled(edit.colors.len() > 1, egui::Button::new("Remove last"))
                    .clicked()
                {
                    edit.colors.pop();
                    changed = true;
                }
            });
        });

    changed
}
