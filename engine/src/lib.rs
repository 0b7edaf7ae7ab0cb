//! Wheel engine - segment model, spin state machine and renderer for a
//! wheel of names.
//!
//! The crate has no windowing dependency. Hosts implement [`Canvas`] for their
//! drawing surface and drive [`WheelView::tick`] from their frame callback.

pub mod color;
pub mod config;
pub mod names;
pub mod render;
pub mod segments;
pub mod spin;
pub mod view;

/// Color types used throughout the public API
pub use palette;

pub use color::{contrast_ratio, named, parse_hex, text_color, to_hex, ColorError, Palette};
pub use config::{
    config_dir, config_path, load_config, load_wheel_config, save_config, ConfigError, WheelConfig,
};
pub use names::{parse_names, NameList};
pub use render::{
    pt, Bounds, Canvas, HorizontalAlign, Path, PathCommand, Point, RenderStyle, Renderer, Slice,
    TextBox, VerticalAlign, WheelLayout, ARC_SEGMENTS_PER_TURN,
};
pub use segments::{segment_index_for, SegmentError, SegmentModel, FULL_TURN};
pub use spin::{
    ease_cubic_in_out, Phase, SpinEngine, SpinParameters, SpinRejected, SpinResult, SpinSettings,
    Tick,
};
pub use view::WheelView;
