//! Renderer - turns the segment list and current rotation into draw calls
//!
//! Angles are degrees, counter-clockwise from the positive x axis, with the
//! y axis pointing up. The renderer keeps no state between frames.

use palette::Srgb;

use crate::color::{named, text_color};
use crate::segments::SegmentModel;

/// Arc resolution used when a path is flattened into a polyline
pub const ARC_SEGMENTS_PER_TURN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

pub const fn pt(x: f32, y: f32) -> Point {
    Point { x, y }
}

/// Drawing area, anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            bottom,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        pt(self.left + self.width / 2.0, self.bottom + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    /// Circular arc; the pen moves along it from `start_deg` by `sweep_deg`
    Arc {
        center: Point,
        radius: f32,
        start_deg: f32,
        sweep_deg: f32,
    },
    Close,
}

/// A vector path made of moves, circular arcs and a close
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pie slice: apex at `center`, rim arc from `start_deg` through `sweep_deg`
    pub fn wedge(center: Point, radius: f32, start_deg: f32, sweep_deg: f32) -> Self {
        let mut path = Self::new();
        path.move_to(center);
        path.arc(center, radius, start_deg, sweep_deg);
        path.close();
        path
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn arc(&mut self, center: Point, radius: f32, start_deg: f32, sweep_deg: f32) -> &mut Self {
        self.commands.push(PathCommand::Arc {
            center,
            radius,
            start_deg,
            sweep_deg,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Approximate the path as a polyline. Closing is left to the caller.
    pub fn flatten(&self, segments_per_turn: usize) -> Vec<Point> {
        let mut points = Vec::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => points.push(p),
                PathCommand::Arc {
                    center,
                    radius,
                    start_deg,
                    sweep_deg,
                } => {
                    let steps = ((sweep_deg.abs() / 360.0) * segments_per_turn as f32)
                        .ceil()
                        .max(2.0) as usize;
                    points.extend((0..=steps).map(|i| {
                        let angle = (start_deg + sweep_deg * i as f32 / steps as f32).to_radians();
                        pt(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                    }));
                }
                PathCommand::Close => {}
            }
        }
        points
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// Text layout box; `(x, y)` is the bottom-left corner in the current transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub font_size: f32,
}

impl TextBox {
    pub fn center(&self) -> Point {
        pt(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// 2D vector drawing capability the renderer draws into
pub trait Canvas {
    /// Push the current transform
    fn save_state(&mut self);
    /// Pop back to the last saved transform
    fn restore_state(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Counter-clockwise, in degrees
    fn rotate(&mut self, degrees: f32);
    fn fill_path(&mut self, path: &Path, color: Srgb<u8>);
    fn stroke_path(&mut self, path: &Path, color: Srgb<u8>, weight: f32);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Srgb<u8>);
    fn draw_text(&mut self, text: &str, text_box: &TextBox, color: Srgb<u8>);
}

/// Visual constants for a wheel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub padding: f32,
    pub stroke_weight: f32,
    pub stroke_color: Srgb<u8>,
    pub font_size: f32,
    pub hub_color: Srgb<u8>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            padding: 10.0,
            stroke_weight: 2.0,
            stroke_color: named::WHITE,
            font_size: 30.0,
            hub_color: named::WHITE,
        }
    }
}

/// Wheel center and radius inside some bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub center: Point,
    pub radius: f32,
}

impl WheelLayout {
    /// `radius = min(width, height) / 2 - 2 * padding`, never negative
    pub fn from_bounds(bounds: Bounds, padding: f32) -> Self {
        let radius = (bounds.width.min(bounds.height) / 2.0 - 2.0 * padding).max(0.0);
        Self {
            center: bounds.center(),
            radius,
        }
    }

    pub fn hub_radius(&self) -> f32 {
        self.radius / 4.0
    }
}

/// Geometry of one segment for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<'a> {
    pub index: usize,
    pub name: &'a str,
    pub start_angle: f32,
    pub sweep: f32,
    pub fill: Srgb<u8>,
    pub label_color: Srgb<u8>,
    /// Rotation that lays the label baseline along the slice bisector.
    /// Counter-clockwise degrees with y up, so it is `start + sweep / 2`.
    pub label_rotation: f32,
    pub path: Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Renderer {
    pub style: RenderStyle,
}

impl Renderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn layout(&self, bounds: Bounds) -> WheelLayout {
        WheelLayout::from_bounds(bounds, self.style.padding)
    }

    /// Slice geometry in index order, the first starting at `rotation`
    pub fn slices<'a>(&self, model: &'a SegmentModel, rotation: f32, layout: &WheelLayout) -> Vec<Slice<'a>> {
        let Some(sweep) = model.segment_angle() else {
            return Vec::new();
        };

        let mut start_angle = rotation;
        model
            .names()
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let fill = model.palette().color_at(index);
                let slice = Slice {
                    index,
                    name: name.as_str(),
                    start_angle,
                    sweep,
                    fill,
                    label_color: text_color(fill),
                    label_rotation: (start_angle + sweep / 2.0).rem_euclid(360.0),
                    path: Path::wedge(layout.center, layout.radius, start_angle, sweep),
                };
                start_angle += sweep;
                slice
            })
            .collect()
    }

    /// Label box in the slice's rotated frame, origin at the wheel center
    pub fn label_box(&self, layout: &WheelLayout) -> TextBox {
        let r = layout.radius;
        TextBox {
            x: 0.0,
            y: -r / 4.0,
            width: r - self.style.padding,
            height: r / 2.0,
            h_align: HorizontalAlign::Right,
            v_align: VerticalAlign::Center,
            font_size: self.style.font_size,
        }
    }

    /// Draw the whole wheel for the given rotation
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, model: &SegmentModel, rotation: f32, bounds: Bounds) {
        let layout = self.layout(bounds);
        if layout.radius <= 0.0 {
            return;
        }
        let label_box = self.label_box(&layout);

        for slice in self.slices(model, rotation, &layout) {
            canvas.fill_path(&slice.path, slice.fill);
            canvas.stroke_path(&slice.path, self.style.stroke_color, self.style.stroke_weight);

            canvas.save_state();
            canvas.translate(layout.center.x, layout.center.y);
            canvas.rotate(slice.label_rotation);
            canvas.draw_text(slice.name, &label_box, slice.label_color);
            canvas.restore_state();
        }

        canvas.fill_circle(layout.center, layout.hub_radius(), self.style.hub_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Save,
        Restore,
        Translate(f32, f32),
        Rotate(f32),
        Fill(Srgb<u8>),
        Stroke(Srgb<u8>, f32),
        Circle(Point, f32, Srgb<u8>),
        Text(String, TextBox, Srgb<u8>),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Canvas for Recorder {
        fn save_state(&mut self) {
            self.calls.push(Call::Save);
        }
        fn restore_state(&mut self) {
            self.calls.push(Call::Restore);
        }
        fn translate(&mut self, dx: f32, dy: f32) {
            self.calls.push(Call::Translate(dx, dy));
        }
        fn rotate(&mut self, degrees: f32) {
            self.calls.push(Call::Rotate(degrees));
        }
        fn fill_path(&mut self, _path: &Path, color: Srgb<u8>) {
            self.calls.push(Call::Fill(color));
        }
        fn stroke_path(&mut self, _path: &Path, color: Srgb<u8>, weight: f32) {
            self.calls.push(Call::Stroke(color, weight));
        }
        fn fill_circle(&mut self, center: Point, radius: f32, color: Srgb<u8>) {
            self.calls.push(Call::Circle(center, radius, color));
        }
        fn draw_text(&mut self, text: &str, text_box: &TextBox, color: Srgb<u8>) {
            self.calls.push(Call::Text(text.to_string(), *text_box, color));
        }
    }

    fn model(list: &[&str]) -> SegmentModel {
        SegmentModel::with_names(
            Palette::default(),
            list.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn bounds() -> Bounds {
        Bounds::new(-400.0, -300.0, 800.0, 600.0)
    }

    #[test]
    fn test_layout_radius_and_hub() {
        let layout = Renderer::default().layout(bounds());
        assert_eq!(layout.center, pt(0.0, 0.0));
        assert_eq!(layout.radius, 280.0);
        assert_eq!(layout.hub_radius(), 70.0);

        let tiny = WheelLayout::from_bounds(Bounds::new(0.0, 0.0, 30.0, 30.0), 10.0);
        assert_eq!(tiny.radius, 0.0);
    }

    #[test]
    fn test_slices_partition_full_turn() {
        let renderer = Renderer::default();
        let model = model(&["Alice", "Bob", "Carol"]);
        let layout = renderer.layout(bounds());
        let slices = renderer.slices(&model, 40.0, &layout);

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].start_angle, 40.0);
        assert_eq!(slices[1].start_angle, 160.0);
        assert_eq!(slices[2].start_angle, 280.0);
        let total: f32 = slices.iter().map(|s| s.sweep).sum();
        assert!((total - 360.0).abs() < 1e-3);
        assert_eq!(slices[2].name, "Carol");
        assert_eq!(slices[0].label_rotation, 100.0);
        assert_eq!(slices[2].label_rotation, 340.0);

        // bisectors past a full turn fold back into [0, 360)
        let wrapped = renderer.slices(&model, 300.0, &layout);
        assert_eq!(wrapped[1].label_rotation, 120.0);
    }

    #[test]
    fn test_slice_fills_cycle_and_labels_contrast() {
        let renderer = Renderer::default();
        let names: Vec<String> = (0..7).map(|i| format!("n{}", i)).collect();
        let model = SegmentModel::with_names(Palette::default(), names);
        let slices = renderer.slices(&model, 0.0, &renderer.layout(bounds()));

        assert_eq!(slices[5].fill, slices[0].fill);
        assert_eq!(slices[6].fill, slices[1].fill);
        assert_eq!(slices[0].label_color, named::BLACK);
        assert_eq!(slices[1].label_color, named::WHITE);
    }

    #[test]
    fn test_draw_call_sequence() {
        let renderer = Renderer::default();
        let model = model(&["Alice", "Bob"]);
        let mut canvas = Recorder::default();
        renderer.draw(&mut canvas, &model, 0.0, bounds());

        let label_box = renderer.label_box(&renderer.layout(bounds()));
        assert_eq!(
            canvas.calls,
            vec![
                Call::Fill(named::CHARTREUSE),
                Call::Stroke(named::WHITE, 2.0),
                Call::Save,
                Call::Translate(0.0, 0.0),
                Call::Rotate(90.0),
                Call::Text("Alice".to_string(), label_box, named::BLACK),
                Call::Restore,
                Call::Fill(named::BLUE),
                Call::Stroke(named::WHITE, 2.0),
                Call::Save,
                Call::Translate(0.0, 0.0),
                Call::Rotate(270.0),
                Call::Text("Bob".to_string(), label_box, named::WHITE),
                Call::Restore,
                Call::Circle(pt(0.0, 0.0), 70.0, named::WHITE),
            ]
        );
    }

    #[test]
    fn test_label_box() {
        let renderer = Renderer::default();
        let label_box = renderer.label_box(&renderer.layout(bounds()));
        assert_eq!(label_box.x, 0.0);
        assert_eq!(label_box.y, -70.0);
        assert_eq!(label_box.width, 270.0);
        assert_eq!(label_box.height, 140.0);
        assert_eq!(label_box.center(), pt(135.0, 0.0));
        assert_eq!(label_box.h_align, HorizontalAlign::Right);
        assert_eq!(label_box.v_align, VerticalAlign::Center);
    }

    #[test]
    fn test_empty_wheel_draws_only_hub() {
        let renderer = Renderer::default();
        let mut canvas = Recorder::default();
        renderer.draw(&mut canvas, &model(&[]), 123.0, bounds());
        assert_eq!(canvas.calls, vec![Call::Circle(pt(0.0, 0.0), 70.0, named::WHITE)]);
    }

    #[test]
    fn test_replaced_names_change_next_draw() {
        let renderer = Renderer::default();
        let mut model = model(&["a", "b"]);
        model
            .set_names(vec!["a".into(), "b".into(), "c".into(), "d".into()])
            .unwrap();
        let mut canvas = Recorder::default();
        renderer.draw(&mut canvas, &model, 0.0, bounds());

        let texts = canvas
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Text(..)))
            .count();
        assert_eq!(texts, 4);
        assert!(canvas.calls.contains(&Call::Rotate(45.0)));
        assert!(canvas.calls.contains(&Call::Rotate(315.0)));
    }

    #[test]
    fn test_wedge_flatten() {
        let path = Path::wedge(pt(10.0, 20.0), 100.0, 0.0, 90.0);
        assert!(path.is_closed());
        let points = path.flatten(ARC_SEGMENTS_PER_TURN);
        // apex, then 30 steps over a quarter turn
        assert_eq!(points.len(), 32);
        assert_eq!(points[0], pt(10.0, 20.0));
        assert!((points[1].x - 110.0).abs() < 1e-3 && (points[1].y - 20.0).abs() < 1e-3);
        let last = points[points.len() - 1];
        assert!((last.x - 10.0).abs() < 1e-3 && (last.y - 120.0).abs() < 1e-3);
    }
}
