use crate::foundation::core::{Canvas, Point};

/// Vertical lift of the photo slot above the canvas centre.
pub const ANCHOR_OFFSET_Y: f64 = 50.0;
/// Gap between the bottom of the circle and the caption baseline.
pub const CAPTION_GAP: f64 = 50.0;
/// Smallest caption font size in pixels.
pub const MIN_CAPTION_PX: f64 = 36.0;
/// Caption font size relative to canvas width.
pub const CAPTION_WIDTH_RATIO: f64 = 0.045;

/// Geometry of the circular photo slot on a given canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleSlot {
    pub center: Point,
    pub radius: f64,
}

impl CircleSlot {
    pub fn for_canvas(canvas: Canvas, circle_size_fraction: f64) -> Self {
        let center = Point::new(
            f64::from(canvas.width) / 2.0,
            f64::from(canvas.height) / 2.0 - ANCHOR_OFFSET_Y,
        );
        let radius = f64::from(canvas.min_side()) * circle_size_fraction;
        Self { center, radius }
    }

    /// Side of the square photo crop in whole pixels.
    pub fn side_px(&self) -> u32 {
        ((2.0 * self.radius).round() as u32).max(1)
    }

    /// Top-left destination pixel of the square crop.
    pub fn top_left(&self) -> (i64, i64) {
        let half = f64::from(self.side_px()) / 2.0;
        (
            (self.center.x - half).round() as i64,
            (self.center.y - half).round() as i64,
        )
    }

    pub fn caption_baseline(&self) -> f64 {
        self.center.y + self.radius + CAPTION_GAP
    }
}

/// Caption font size for a canvas: `max(36, width * 0.045)`.
pub fn caption_font_px(canvas: Canvas) -> f64 {
    (f64::from(canvas.width) * CAPTION_WIDTH_RATIO).max(MIN_CAPTION_PX)
}
