//! Segment model - partitions an ordered list of names into equal wheel slices
//!
//! Segment `i` starts at `rotation + i * segment_angle` and is filled with
//! `palette[i mod palette.len()]`.

use palette::Srgb;

use crate::color::Palette;

pub const FULL_TURN: f32 = 360.0;

/// Error type for segment list updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentError {
    /// The list is empty, so no angular partition exists
    Empty,
}

impl std::fmt::Display for SegmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SegmentError::Empty => write!(f, "No names to partition the wheel into"),
        }
    }
}

impl std::error::Error for SegmentError {}

/// Ordered names plus their derived segment angle and colors
#[derive(Debug, Clone, Default)]
pub struct SegmentModel {
    names: Vec<String>,
    /// `None` when `names` is empty
    segment_angle: Option<f32>,
    palette: Palette,
}

impl SegmentModel {
    pub fn new(palette: Palette) -> Self {
        Self {
            names: Vec::new(),
            segment_angle: None,
            palette,
        }
    }

    pub fn with_names(palette: Palette, names: Vec<String>) -> Self {
        let mut model = Self::new(palette);
        // an empty starting list is a normal blank wheel
        let _ = model.set_names(names);
        model
    }

    /// Replace the whole name list and recompute the segment angle.
    ///
    /// The list is replaced even when it is empty; the error only reports that
    /// the wheel now has no segments.
    pub fn set_names(&mut self, names: Vec<String>) -> Result<f32, SegmentError> {
        self.names = names;
        self.segment_angle = match self.names.len() {
            0 => None,
            n => Some(FULL_TURN / n as f32),
        };
        tracing::debug!(count = self.names.len(), angle = ?self.segment_angle, "segments replaced");
        self.segment_angle.ok_or(SegmentError::Empty)
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn segment_angle(&self) -> Option<f32> {
        self.segment_angle
    }

    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn color_at(&self, index: usize) -> Option<Srgb<u8>> {
        (index < self.names.len()).then(|| self.palette.color_at(index))
    }

    /// Start angle of segment `index` for a wheel turned by `rotation` degrees
    pub fn start_angle(&self, index: usize, rotation: f32) -> Option<f32> {
        let angle = self.segment_angle?;
        (index < self.names.len()).then(|| rotation + index as f32 * angle)
    }
}

/// Segment index an angle in the fixed reference orientation falls into.
///
/// `floor(angle / segment_angle)` clamped to `[0, count - 1]`, so an angle that
/// rounds onto the 360 degree boundary still resolves to the last segment.
pub fn segment_index_for(angle: f32, segment_angle: f32, count: usize) -> usize {
    debug_assert!(count > 0);
    let raw = (angle / segment_angle).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_segment_angles_sum_to_full_turn() {
        let mut model = SegmentModel::default();
        for n in 1..=50 {
            let list: Vec<String> = (0..n).map(|i| format!("name {}", i)).collect();
            let angle = model.set_names(list).unwrap();
            let total: f32 = (0..n).map(|_| angle).sum();
            assert!((total - FULL_TURN).abs() < 1e-3, "n = {}, total = {}", n, total);
        }
    }

    #[test]
    fn test_set_names_replaces_partition() {
        let mut model = SegmentModel::with_names(Palette::default(), names(&["Alice", "Bob", "Carol"]));
        assert_eq!(model.segment_angle(), Some(120.0));

        model.set_names(names(&["Alice", "Bob", "Carol", "Dave"])).unwrap();
        assert_eq!(model.count(), 4);
        assert_eq!(model.segment_angle(), Some(90.0));
        assert_eq!(model.name_at(3), Some("Dave"));
    }

    #[test]
    fn test_empty_list_has_no_angle() {
        let mut model = SegmentModel::with_names(Palette::default(), names(&["Alice"]));
        assert_eq!(model.set_names(Vec::new()), Err(SegmentError::Empty));
        assert!(model.is_empty());
        assert_eq!(model.segment_angle(), None);
        assert_eq!(model.start_angle(0, 0.0), None);
    }

    #[test]
    fn test_accessors_bounded_by_count() {
        let model = SegmentModel::with_names(Palette::default(), names(&["Alice", "Bob"]));
        assert_eq!(model.name_at(2), None);
        assert_eq!(model.color_at(2), None);
        assert_eq!(model.color_at(1), Some(model.palette().color_at(1)));
    }

    #[test]
    fn test_colors_cycle_through_palette() {
        let list: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let model = SegmentModel::with_names(Palette::default(), list);
        assert_eq!(model.color_at(0), model.color_at(5));
        assert_eq!(model.color_at(1), model.color_at(11));
        assert_ne!(model.color_at(0), model.color_at(1));
    }

    #[test]
    fn test_start_angle_offsets_by_rotation() {
        let model = SegmentModel::with_names(Palette::default(), names(&["a", "b", "c", "d"]));
        assert_eq!(model.start_angle(0, 15.0), Some(15.0));
        assert_eq!(model.start_angle(3, 15.0), Some(285.0));
    }

    #[test]
    fn test_segment_index_for() {
        assert_eq!(segment_index_for(250.0, 120.0, 3), 2);
        assert_eq!(segment_index_for(0.0, 120.0, 3), 0);
        assert_eq!(segment_index_for(119.99, 120.0, 3), 0);
        assert_eq!(segment_index_for(120.0, 120.0, 3), 1);
        // boundary overshoot clamps to the last segment
        assert_eq!(segment_index_for(360.0, 120.0, 3), 2);
        assert_eq!(segment_index_for(359.9999, 360.0 / 7.0, 7), 6);
    }
}
