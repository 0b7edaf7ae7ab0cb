//! Name Picker
//!
//! A wheel of names: type the candidates one per line, spin, and the wheel
//! settles on one of them. Winners can be struck off so nobody is picked twice.

mod drawing;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use nannou::prelude::*;
use nannou_egui::{self, Egui};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wheel_engine::{NameList, Tick, WheelConfig, WheelView};

use crate::drawing::{colors, draw_empty_hint, Layout, NannouCanvas};
use crate::ui::{
    draw_names_panel, draw_settings_panel, draw_winner_dialog, SettingsEdit, SIDE_PANEL_WIDTH,
};

const APP_NAME: &str = "name_picker";

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "name_picker=debug,wheel_engine=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    nannou::app(model).update(update).run();
}

/// Application state
struct Model {
    /// The wheel itself
    wheel: WheelView,
    /// Names as typed, plus the parsed list
    names: NameList,
    /// Text box contents
    text: String,
    /// Persisted settings
    config: WheelConfig,
    /// Settings window state
    settings: SettingsEdit,
    /// Winners reported by the wheel, not yet handled
    selected: Rc<RefCell<Vec<String>>>,
    /// Winner currently shown in the dialog
    winner_dialog: Option<String>,
    /// Whether the names text box has keyboard focus
    text_focused: bool,
    /// Whether the app is currently redrawing every frame
    animating: bool,
    /// egui integration
    egui: Egui,
}

impl Model {
    fn spin(&mut self) {
        if self.winner_dialog.is_some() {
            return;
        }
        // overlapping requests are expected (impatient taps); ignore them
        let _ = self.wheel.spin(Instant::now());
    }

    /// Push the current list onto the wheel
    fn sync_names(&mut self) {
        self.wheel.set_items(self.names.names().to_vec());
    }

    /// Push the settings window edits onto the wheel and save them
    fn apply_settings(&mut self) {
        let config = self.settings.to_config(&self.config);
        match self.wheel.apply_config(&config) {
            Ok(()) => {
                self.config = config;
                save_config(self);
            }
            Err(e) => tracing::warn!("Settings not applied: {}", e),
        }
    }

    fn handle_winner(&mut self, name: String) {
        if self.config.remove_winners && self.names.remove(&name) {
            self.sync_names();
        }
        self.winner_dialog = Some(name);
    }
}

fn save_config(model: &Model) {
    if let Err(e) = wheel_engine::save_config(APP_NAME, &model.config) {
        tracing::warn!("Failed to save config: {}", e);
    }
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Wheel of Names")
        .size(1000, 700)
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load configuration
    let config = wheel_engine::load_wheel_config(APP_NAME).unwrap_or_else(|e| {
        tracing::warn!("Ignoring config: {}", e);
        WheelConfig::default()
    });
    let mut wheel = WheelView::from_config(&config).unwrap_or_else(|e| {
        tracing::warn!("Falling back to the default wheel: {}", e);
        WheelView::default()
    });

    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = selected.clone();
    wheel.on_name_selected(move |name| sink.borrow_mut().push(name.to_string()));

    app.set_loop_mode(LoopMode::Wait);

    let settings = SettingsEdit::from_config(&config);

    Model {
        wheel,
        names: NameList::default(),
        text: String::new(),
        config,
        settings,
        selected,
        winner_dialog: None,
        text_focused: false,
        animating: false,
        egui,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    // Advance the spin
    if let Tick::Completed(result) = model.wheel.tick(Instant::now()) {
        tracing::debug!(turns = result.turn_count, "wheel came to rest on {}", result.name);
    }
    let winners: Vec<String> = model.selected.borrow_mut().drain(..).collect();
    for name in winners {
        model.handle_winner(name);
    }

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let can_spin = model.wheel.can_spin() && model.winner_dialog.is_none();
    let progress = model.wheel.progress(Instant::now());

    let panel = draw_names_panel(&ctx, &mut model.text, model.names.len(), can_spin, progress);
    let dismissed = match model.winner_dialog.as_deref() {
        Some(winner) => draw_winner_dialog(&ctx, winner),
        None => false,
    };
    let settings_changed = draw_settings_panel(&ctx, &mut model.settings);

    drop(ctx);

    model.text_focused = panel.text_focused;
    if panel.text_changed && model.names.set_text(&model.text) {
        model.sync_names();
    }
    if panel.spin_clicked {
        model.spin();
    }
    if dismissed {
        model.winner_dialog = None;
    }
    if settings_changed {
        model.apply_settings();
    }

    // Redraw every frame only while something is moving
    let wants_frames = model.wheel.take_repaint_request() || model.wheel.is_spinning();
    if wants_frames != model.animating {
        model.animating = wants_frames;
        app.set_loop_mode(if wants_frames {
            LoopMode::RefreshSync
        } else {
            LoopMode::Wait
        });
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    // Clear background
    draw.background().color(colors::BACKGROUND);

    let layout = Layout::calculate(window_rect, SIDE_PANEL_WIDTH);

    // Draw the wheel
    let mut canvas = NannouCanvas::new(&draw);
    model.wheel.draw(&mut canvas, layout.wheel_bounds());

    if model.wheel.items().is_empty() {
        draw_empty_hint(&draw, layout.wheel_rect);
    }

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // Space/Enter spins unless the user is typing names
        Key::Space | Key::Return => {
            if !model.text_focused {
                model.spin();
            }
        }
        // Escape closes the winner dialog
        Key::Escape => {
            model.winner_dialog = None;
        }
        _ => {}
    }
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);
}
