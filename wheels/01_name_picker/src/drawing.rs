//! Drawing module - nannou backend for the wheel renderer
//!
//! `NannouCanvas` implements the engine's `Canvas` on top of nannou's `Draw`,
//! keeping a stack of transformed `Draw` handles for save/restore.

use nannou::prelude::*;
use wheel_engine::{
    Bounds, Canvas, HorizontalAlign, Path, Point, TextBox, VerticalAlign, ARC_SEGMENTS_PER_TURN,
};

/// Color type the engine hands out, from its own `palette` version
type WheelColor = wheel_engine::palette::Srgb<u8>;

/// Color palette for the page chrome
pub mod colors {
    use nannou::prelude::*;

    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 24,
        green: 26,
        blue: 32,
        standard: std::marker::PhantomData,
    };
    pub const TEXT_SECONDARY: Srgb<u8> = Srgb {
        red: 150,
        green: 155,
        blue: 165,
        standard: std::marker::PhantomData,
    };
}

fn to_srgb(color: WheelColor) -> Srgb<u8> {
    srgb(color.red, color.green, color.blue)
}

fn to_point2(p: Point) -> Point2 {
    pt2(p.x, p.y)
}

pub struct NannouCanvas {
    draw: Draw,
    saved: Vec<Draw>,
}

impl NannouCanvas {
    pub fn new(draw: &Draw) -> Self {
        Self {
            draw: draw.clone(),
            saved: Vec::new(),
        }
    }
}

impl Canvas for NannouCanvas {
    fn save_state(&mut self) {
        self.saved.push(self.draw.clone());
    }

    fn restore_state(&mut self) {
        if let Some(draw) = self.saved.pop() {
            self.draw = draw;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.draw = self.draw.translate(vec3(dx, dy, 0.0));
    }

    fn rotate(&mut self, degrees: f32) {
        self.draw = self.draw.rotate(degrees.to_radians());
    }

    fn fill_path(&mut self, path: &Path, color: WheelColor) {
        let points: Vec<Point2> = path
            .flatten(ARC_SEGMENTS_PER_TURN)
            .into_iter()
            .map(to_point2)
            .collect();
        if points.len() < 3 {
            return;
        }
        self.draw.polygon().points(points).color(to_srgb(color));
    }

    fn stroke_path(&mut self, path: &Path, color: WheelColor, weight: f32) {
        let mut points: Vec<Point2> = path
            .flatten(ARC_SEGMENTS_PER_TURN)
            .into_iter()
            .map(to_point2)
            .collect();
        if path.is_closed() {
            if let Some(&first) = points.first() {
                points.push(first);
            }
        }
        self.draw
            .polyline()
            .weight(weight)
            .color(to_srgb(color))
            .points(points);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: WheelColor) {
        self.draw
            .ellipse()
            .xy(to_point2(center))
            .radius(radius)
            .color(to_srgb(color));
    }

    fn draw_text(&mut self, text: &str, text_box: &TextBox, color: WheelColor) {
        let center = text_box.center();
        let text = self
            .draw
            .text(text)
            .x_y(center.x, center.y)
            .w_h(text_box.width, text_box.height)
            .font_size(text_box.font_size.round() as u32)
            .color(to_srgb(color));
        let text = match text_box.h_align {
            HorizontalAlign::Left => text.left_justify(),
            HorizontalAlign::Center => text.center_justify(),
            HorizontalAlign::Right => text.right_justify(),
        };
        match text_box.v_align {
            VerticalAlign::Top => text.align_text_top(),
            VerticalAlign::Center => text.align_text_middle_y(),
            VerticalAlign::Bottom => text.align_text_bottom(),
        };
    }
}

/// Hint shown in place of the wheel while there are no names
pub fn draw_empty_hint(draw: &Draw, rect: Rect) {
    draw.text("Add names on the left, one per line")
        .xy(rect.xy() + vec2(0.0, -rect.h() * 0.25))
        .color(colors::TEXT_SECONDARY)
        .font_size(18)
        .w(rect.w());
}

/// Screen split: names panel on the left, wheel in the rest
pub struct Layout {
    pub wheel_rect: Rect,
}

impl Layout {
    pub fn calculate(window_rect: Rect, side_panel_width: f32) -> Self {
        let panel = side_panel_width.min(window_rect.w() * 0.5);
        let wheel_rect = Rect::from_x_y_w_h(
            window_rect.x() + panel / 2.0,
            window_rect.y(),
            window_rect.w() - panel,
            window_rect.h(),
        );
        Layout { wheel_rect }
    }

    pub fn wheel_bounds(&self) -> Bounds {
        Bounds::new(
            self.wheel_rect.left(),
            self.wheel_rect.bottom(),
            self.wheel_rect.w(),
            self.wheel_rect.h(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_leaves_room_for_panel() {
        let window = Rect::from_w_h(1000.0, 700.0);
        let layout = Layout::calculate(window, 280.0);
        assert_eq!(layout.wheel_rect.w(), 720.0);
        assert_eq!(layout.wheel_rect.left(), -220.0);

        let bounds = layout.wheel_bounds();
        assert_eq!(bounds.center().x, 140.0);
        assert_eq!(bounds.height, 700.0);
    }

    #[test]
    fn test_layout_panel_capped_on_narrow_windows() {
        let window = Rect::from_w_h(400.0, 400.0);
        let layout = Layout::calculate(window, 280.0);
        assert_eq!(layout.wheel_rect.w(), 200.0);
    }
}
