//! Wheel view - the one binding of segments, spin engine and renderer
//!
//! Every host embeds a `WheelView` instead of wiring the three parts itself.
//! The host feeds it names, forwards its spin trigger, calls `tick` once per
//! frame and repaints whenever `take_repaint_request` says so.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::color::Palette;
use crate::config::{ConfigError, WheelConfig};
use crate::render::{Bounds, Canvas, RenderStyle, Renderer};
use crate::segments::SegmentModel;
use crate::spin::{SpinEngine, SpinParameters, SpinRejected, SpinResult, SpinSettings, Tick};

pub struct WheelView<R = SmallRng> {
    model: SegmentModel,
    engine: SpinEngine<R>,
    renderer: Renderer,
    repaint_requested: bool,
}

impl WheelView<SmallRng> {
    pub fn new(palette: Palette, settings: SpinSettings, style: RenderStyle) -> Self {
        Self::with_engine(palette, style, SpinEngine::new(settings))
    }

    pub fn from_config(config: &WheelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.palette()?,
            config.spin_settings(),
            config.render_style(),
        ))
    }
}

impl Default for WheelView<SmallRng> {
    fn default() -> Self {
        Self::new(Palette::default(), SpinSettings::default(), RenderStyle::default())
    }
}

impl<R: Rng> WheelView<R> {
    pub fn with_engine(palette: Palette, style: RenderStyle, engine: SpinEngine<R>) -> Self {
        Self {
            model: SegmentModel::new(palette),
            engine,
            renderer: Renderer::new(style),
            repaint_requested: true,
        }
    }

    pub fn model(&self) -> &SegmentModel {
        &self.model
    }

    pub fn engine(&self) -> &SpinEngine<R> {
        &self.engine
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn items(&self) -> &[String] {
        self.model.names()
    }

    /// Replace the names on the wheel. A running spin still resolves against
    /// the names it started with.
    pub fn set_items(&mut self, names: Vec<String>) {
        // an empty list is a blank wheel, not a failure
        let _ = self.model.set_names(names);
        self.repaint_requested = true;
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.model.set_palette(palette);
        self.repaint_requested = true;
    }

    pub fn set_style(&mut self, style: RenderStyle) {
        self.renderer = Renderer::new(style);
        self.repaint_requested = true;
    }

    /// Applies from the next spin on
    pub fn set_spin_settings(&mut self, settings: SpinSettings) {
        self.engine.set_settings(settings);
    }

    /// Apply edited settings to the live wheel. Nothing changes if `config`
    /// does not validate.
    pub fn apply_config(&mut self, config: &WheelConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let palette = config.palette()?;
        self.set_palette(palette);
        self.set_style(config.render_style());
        self.set_spin_settings(config.spin_settings());
        Ok(())
    }

    pub fn rotation(&self) -> f32 {
        self.engine.rotation()
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    /// Whether a spin trigger should be enabled right now
    pub fn can_spin(&self) -> bool {
        !self.engine.is_spinning() && !self.model.is_empty()
    }

    pub fn spin(&mut self, now: Instant) -> Result<SpinParameters, SpinRejected> {
        let params = self.engine.spin(&self.model, now)?;
        self.repaint_requested = true;
        Ok(params)
    }

    /// Fraction of the running spin that has elapsed at `now`
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.engine.progress(now)
    }

    pub fn cancel(&mut self) -> bool {
        self.engine.cancel()
    }

    /// Register a handler receiving the winning name of each completed spin
    pub fn on_name_selected<F>(&mut self, mut handler: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.engine.on_complete(move |result: &SpinResult| handler(&result.name));
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        let tick = self.engine.tick(now);
        if tick.needs_repaint() {
            self.repaint_requested = true;
        }
        tick
    }

    /// Returns true once per pending repaint request
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, bounds: Bounds) {
        self.renderer
            .draw(canvas, &self.model, self.engine.rotation(), bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::named;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn view() -> WheelView<SmallRng> {
        WheelView::with_engine(
            Palette::default(),
            RenderStyle::default(),
            SpinEngine::with_rng(SpinSettings::default(), SmallRng::seed_from_u64(21)),
        )
    }

    fn items(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_can_spin_gating() {
        let mut view = view();
        assert!(!view.can_spin());
        view.set_items(items(&["Alice", "Bob"]));
        assert!(view.can_spin());

        let t0 = Instant::now();
        view.spin(t0).unwrap();
        assert!(!view.can_spin());
        assert_eq!(view.spin(t0), Err(SpinRejected::Busy));
    }

    #[test]
    fn test_repaint_requests() {
        let mut view = view();
        assert!(view.take_repaint_request());
        assert!(!view.take_repaint_request());

        view.set_items(items(&["Alice"]));
        assert!(view.take_repaint_request());

        let t0 = Instant::now();
        view.spin(t0).unwrap();
        view.take_repaint_request();
        assert_eq!(view.tick(t0 + Duration::from_millis(1)), Tick::Pending);
        assert!(!view.take_repaint_request());
        view.tick(t0 + Duration::from_millis(16));
        assert!(view.take_repaint_request());
    }

    #[test]
    fn test_name_selected_fires_once_per_spin() {
        let mut view = view();
        let selected = Rc::new(RefCell::new(Vec::new()));
        let sink = selected.clone();
        view.on_name_selected(move |name| sink.borrow_mut().push(name.to_string()));
        view.set_items(items(&["Alice", "Bob", "Carol"]));

        let t0 = Instant::now();
        view.spin(t0).unwrap();
        let mut ms = 0;
        while view.is_spinning() {
            ms += 16;
            view.tick(t0 + Duration::from_millis(ms));
        }
        view.tick(t0 + Duration::from_millis(ms + 16));

        let selected = selected.borrow();
        assert_eq!(selected.len(), 1);
        assert!(["Alice", "Bob", "Carol"].contains(&selected[0].as_str()));
    }

    #[test]
    fn test_empty_view_rejects_spin() {
        let mut view = view();
        view.set_items(Vec::new());
        assert_eq!(view.spin(Instant::now()), Err(SpinRejected::NoSegments));
        assert!(!view.is_spinning());
        assert_eq!(view.rotation(), 0.0);
    }

    #[test]
    fn test_apply_config_updates_live_wheel() {
        let mut view = view();
        view.set_items(items(&["Alice", "Bob"]));
        view.take_repaint_request();

        let config = WheelConfig {
            palette: vec!["#000000".to_string(), "#ffffff".to_string()],
            font_size: 24.0,
            spin_duration_ms: 2_000,
            ..WheelConfig::default()
        };
        view.apply_config(&config).unwrap();
        assert!(view.take_repaint_request());
        assert_eq!(view.model().color_at(1), Some(named::WHITE));
        assert_eq!(view.renderer().style.font_size, 24.0);
        assert_eq!(view.engine().settings().duration, Duration::from_millis(2_000));

        let t0 = Instant::now();
        view.spin(t0).unwrap();
        assert_eq!(view.progress(t0 + Duration::from_millis(500)), Some(0.25));
        assert!(matches!(
            view.tick(t0 + Duration::from_millis(2_000)),
            Tick::Completed(_)
        ));
        assert_eq!(view.progress(t0 + Duration::from_millis(2_100)), None);
    }

    #[test]
    fn test_apply_config_rejects_invalid_settings() {
        let mut view = view();
        let bad = WheelConfig {
            min_turns: 5,
            max_turns: 2,
            font_size: 12.0,
            ..WheelConfig::default()
        };
        assert!(view.apply_config(&bad).is_err());
        assert_eq!(view.engine().settings(), SpinSettings::default());
        assert_eq!(view.renderer().style, RenderStyle::default());
    }

    #[test]
    fn test_from_config_rejects_bad_palette() {
        let config = WheelConfig {
            palette: vec!["nope".to_string()],
            ..WheelConfig::default()
        };
        assert!(WheelView::from_config(&config).is_err());
        assert!(WheelView::from_config(&WheelConfig::default()).is_ok());
    }
}
