//! Spin engine - the Idle -> Spinning -> Idle animation state machine
//!
//! A spin samples a final angle in [0, 360) and a whole number of extra turns,
//! eases the wheel rotation toward `final_angle + 360 * turns` over a fixed
//! wall-clock duration, and resolves the winner from `final_angle` alone.
//! The host drives the animation by calling [`SpinEngine::tick`] once per
//! frame; nothing here blocks or spawns threads.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::segments::{segment_index_for, SegmentModel, FULL_TURN};

pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(10_000);
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_millis(16);
pub const DEFAULT_MIN_TURNS: u32 = 3;
pub const DEFAULT_MAX_TURNS: u32 = 7;

/// Timing and turn-count bounds for every spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinSettings {
    /// Total wall-clock length of a spin
    pub duration: Duration,
    /// Minimum time between two animation samples
    pub frame_period: Duration,
    /// Smallest number of extra full turns (inclusive), at least 1
    pub min_turns: u32,
    /// Largest number of extra full turns (inclusive)
    pub max_turns: u32,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_SPIN_DURATION,
            frame_period: DEFAULT_FRAME_PERIOD,
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

/// Spin state machine mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Spinning,
}

/// Why a spin request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinRejected {
    /// A spin is already running
    Busy,
    /// There are no segments to land on
    NoSegments,
}

impl std::fmt::Display for SpinRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpinRejected::Busy => write!(f, "A spin is already in progress"),
            SpinRejected::NoSegments => write!(f, "The wheel has no names to spin"),
        }
    }
}

impl std::error::Error for SpinRejected {}

/// Per-spin values, created at spin start and dropped at completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinParameters {
    /// Outcome angle in the fixed reference orientation, in [0, 360)
    pub final_angle: f32,
    /// Extra full turns added for the animation
    pub turn_count: u32,
    /// Rotation the animation starts from, in [0, 360)
    pub start_rotation: f32,
    /// `final_angle + 360 * turn_count`
    pub target_rotation: f32,
    pub started_at: Instant,
}

/// Outcome of a completed spin
#[derive(Debug, Clone, PartialEq)]
pub struct SpinResult {
    pub index: usize,
    pub name: String,
    pub final_angle: f32,
    pub turn_count: u32,
}

/// What a single frame tick did
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// No spin is running
    Idle,
    /// Spinning, but the frame period has not elapsed since the last sample
    Pending,
    /// Rotation moved to a new value
    Advanced { rotation: f32 },
    /// The spin finished; rotation sits exactly on the target
    Completed(SpinResult),
}

impl Tick {
    pub fn needs_repaint(&self) -> bool {
        matches!(self, Tick::Advanced { .. } | Tick::Completed(_))
    }
}

/// Cubic ease-in-ease-out over `t` in [0, 1]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

struct ActiveSpin {
    params: SpinParameters,
    /// Names and segment angle as they were when the spin started
    names: Vec<String>,
    segment_angle: f32,
    /// Timing the spin started with; later settings changes do not apply
    duration: Duration,
    frame_period: Duration,
    last_frame: Instant,
}

type CompletionHandler = Box<dyn FnMut(&SpinResult)>;

pub struct SpinEngine<R = SmallRng> {
    phase: Phase,
    /// Cumulative rotation in degrees
    rotation: f32,
    settings: SpinSettings,
    active: Option<ActiveSpin>,
    rng: R,
    handlers: Vec<CompletionHandler>,
}

impl SpinEngine<SmallRng> {
    pub fn new(settings: SpinSettings) -> Self {
        Self::with_rng(settings, SmallRng::from_entropy())
    }
}

impl Default for SpinEngine<SmallRng> {
    fn default() -> Self {
        Self::new(SpinSettings::default())
    }
}

impl<R: Rng> SpinEngine<R> {
    pub fn with_rng(settings: SpinSettings, rng: R) -> Self {
        Self {
            phase: Phase::Idle,
            rotation: 0.0,
            settings,
            active: None,
            rng,
            handlers: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == Phase::Spinning
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn settings(&self) -> SpinSettings {
        self.settings
    }

    /// New settings apply from the next spin on. A running spin keeps the
    /// duration and frame period it started with.
    pub fn set_settings(&mut self, settings: SpinSettings) {
        self.settings = settings;
    }

    pub fn active_parameters(&self) -> Option<&SpinParameters> {
        self.active.as_ref().map(|spin| &spin.params)
    }

    /// Fraction of the running spin's duration that has elapsed at `now`
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.active.as_ref().map(|spin| {
            let elapsed = now.saturating_duration_since(spin.params.started_at);
            (elapsed.as_secs_f64() / spin.duration.as_secs_f64()).min(1.0) as f32
        })
    }

    /// Register a handler invoked once per completed spin
    pub fn on_complete<F>(&mut self, handler: F)
    where
        F: FnMut(&SpinResult) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Draw a final angle in [0, 360) and a turn count in `min_turns..=max_turns`
    pub fn sample_parameters(&mut self) -> (f32, u32) {
        let final_angle = self.rng.gen_range(0.0..FULL_TURN);
        let turn_count = self
            .rng
            .gen_range(self.settings.min_turns..=self.settings.max_turns);
        (final_angle, turn_count)
    }

    /// Start a randomized spin over the current segments.
    ///
    /// Rejected without any state change while a spin is running or when
    /// `model` has no segments.
    pub fn spin(&mut self, model: &SegmentModel, now: Instant) -> Result<SpinParameters, SpinRejected> {
        self.check_can_start(model)?;
        let (final_angle, turn_count) = self.sample_parameters();
        self.start_with(model, final_angle, turn_count, now)
    }

    /// Start a spin with explicit outcome parameters.
    ///
    /// # Panics
    ///
    /// Panics if `final_angle` is outside [0, 360) or `turn_count` is outside
    /// the configured turn range.
    pub fn start_with(
        &mut self,
        model: &SegmentModel,
        final_angle: f32,
        turn_count: u32,
        now: Instant,
    ) -> Result<SpinParameters, SpinRejected> {
        self.check_can_start(model)?;
        assert!(
            (0.0..FULL_TURN).contains(&final_angle),
            "final angle {} outside [0, 360)",
            final_angle
        );
        assert!(
            (self.settings.min_turns..=self.settings.max_turns).contains(&turn_count),
            "turn count {} outside {}..={}",
            turn_count,
            self.settings.min_turns,
            self.settings.max_turns
        );
        let segment_angle = model.segment_angle().ok_or(SpinRejected::NoSegments)?;

        // Continue from the resting angle, folded into one turn so the
        // target is always ahead of it.
        let start_rotation = self.rotation.rem_euclid(FULL_TURN);
        let params = SpinParameters {
            final_angle,
            turn_count,
            start_rotation,
            target_rotation: final_angle + FULL_TURN * turn_count as f32,
            started_at: now,
        };

        self.rotation = start_rotation;
        self.phase = Phase::Spinning;
        self.active = Some(ActiveSpin {
            params,
            names: model.names().to_vec(),
            segment_angle,
            duration: self.settings.duration,
            frame_period: self.settings.frame_period,
            last_frame: now,
        });

        tracing::debug!(
            final_angle,
            turn_count,
            start_rotation,
            target = params.target_rotation,
            "spin started"
        );
        Ok(params)
    }

    /// Advance the animation to `now`
    pub fn tick(&mut self, now: Instant) -> Tick {
        let Some(spin) = self.active.as_mut() else {
            return Tick::Idle;
        };

        let elapsed = now.saturating_duration_since(spin.params.started_at);
        if elapsed < spin.duration {
            if now.saturating_duration_since(spin.last_frame) < spin.frame_period {
                return Tick::Pending;
            }

            let t = elapsed.as_secs_f64() / spin.duration.as_secs_f64();
            let span = (spin.params.target_rotation - spin.params.start_rotation) as f64;
            let rotation = spin.params.start_rotation + (span * ease_cubic_in_out(t)) as f32;
            spin.last_frame = now;
            // rounding must never move the wheel backwards or past the target
            self.rotation = rotation.max(self.rotation).min(spin.params.target_rotation);
            return Tick::Advanced {
                rotation: self.rotation,
            };
        }

        match self.active.take() {
            Some(spin) => Tick::Completed(self.complete(spin)),
            None => Tick::Idle,
        }
    }

    /// Stop a running spin where it is. No winner is produced.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(spin) => {
                self.phase = Phase::Idle;
                tracing::debug!(
                    rotation = self.rotation,
                    final_angle = spin.params.final_angle,
                    "spin cancelled"
                );
                true
            }
            None => false,
        }
    }

    fn check_can_start(&self, model: &SegmentModel) -> Result<(), SpinRejected> {
        let rejected = if self.is_spinning() {
            Some(SpinRejected::Busy)
        } else if model.is_empty() {
            Some(SpinRejected::NoSegments)
        } else {
            None
        };
        match rejected {
            Some(reason) => {
                tracing::debug!(%reason, "spin rejected");
                Err(reason)
            }
            None => Ok(()),
        }
    }

    fn complete(&mut self, spin: ActiveSpin) -> SpinResult {
        let ActiveSpin {
            params,
            mut names,
            segment_angle,
            ..
        } = spin;

        self.rotation = params.target_rotation;
        self.phase = Phase::Idle;

        let index = segment_index_for(params.final_angle, segment_angle, names.len());
        let result = SpinResult {
            index,
            name: names.swap_remove(index),
            final_angle: params.final_angle,
            turn_count: params.turn_count,
        };
        tracing::info!(
            winner = %result.name,
            index,
            final_angle = params.final_angle,
            "spin completed"
        );

        for handler in &mut self.handlers {
            handler(&result);
        }
        result
    }
}
