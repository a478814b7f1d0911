use std::sync::Arc;

use egui::{Pos2, pos2};
use image::{Rgb, RgbImage};

use crate::effect::Effect;
use crate::error::CanvasError;
use crate::geometry::distance_to_line_segment;

/// Immutable copy of the canvas pixels taken at a commit point
pub type Snapshot = Arc<RgbImage>;

/// Fixed-size 3-channel raster that strokes and effects are applied to.
///
/// Coordinates are canvas-space pixel positions; pixel `(x, y)` is sampled at
/// its integer coordinate. Every drawing operation clips to the canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbImage,
    background: Rgb<u8>,
}

impl Canvas {
    /// Create a canvas filled with `background`; both dimensions must be non-zero
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Result<Self, CanvasError> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: RgbImage::from_pixel(width, height, background),
            background,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Color the canvas was created with, used by clear and the eraser
    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    /// Raw pixel buffer
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Clamp a point onto the canvas
    pub fn clip(&self, point: Pos2) -> Pos2 {
        pos2(
            point.x.clamp(0.0, (self.width() - 1) as f32),
            point.y.clamp(0.0, (self.height() - 1) as f32),
        )
    }

    /// Rasterize a thick line from `from` to `to`, then stamp a disc at `to`.
    pub fn draw_segment(&mut self, from: Pos2, to: Pos2, color: Rgb<u8>, thickness: u32) {
        let from = self.clip(from);
        let to = self.clip(to);
        let half = thickness.max(1) as f32 / 2.0;

        self.fill_where(from, to, half, color, |p| distance_to_line_segment(p, from, to) <= half);
        self.stamp_dot(to, color, thickness);
    }

    /// Filled disc of radius `thickness / 2` centred on `at`
    pub fn stamp_dot(&mut self, at: Pos2, color: Rgb<u8>, thickness: u32) {
        let at = self.clip(at);
        let radius = (thickness / 2) as f32;
        self.fill_where(at, at, radius, color, |p| p.distance(at) <= radius);
    }

    /// Paint every pixel inside the padded bounding box of `a..b` accepted by `inside`
    fn fill_where(&mut self, a: Pos2, b: Pos2, pad: f32, color: Rgb<u8>, inside: impl Fn(Pos2) -> bool) {
        let max_x = (self.width() - 1) as f32;
        let max_y = (self.height() - 1) as f32;
        let x0 = (a.x.min(b.x) - pad).floor().clamp(0.0, max_x) as u32;
        let x1 = (a.x.max(b.x) + pad).ceil().clamp(0.0, max_x) as u32;
        let y0 = (a.y.min(b.y) - pad).floor().clamp(0.0, max_y) as u32;
        let y1 = (a.y.max(b.y) + pad).ceil().clamp(0.0, max_y) as u32;

        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(pos2(x as f32, y as f32)) {
                    self.pixels.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Replace the buffer with the effect's output
    pub fn apply_effect(&mut self, effect: Effect) {
        self.pixels = effect.apply(&self.pixels);
    }

    /// Overwrite every pixel with `background`
    pub fn clear(&mut self, background: Rgb<u8>) {
        for px in self.pixels.pixels_mut() {
            *px = background;
        }
    }

    /// Copy the current pixels into an immutable snapshot
    pub fn snapshot(&self) -> Snapshot {
        Arc::new(self.pixels.clone())
    }

    /// Overwrite the live buffer with a snapshot's pixels.
    /// Snapshots of a different size are ignored since dimensions are fixed.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.dimensions() != self.dimensions() {
            log::warn!(
                "Ignoring snapshot of size {:?} for canvas of size {:?}",
                snapshot.dimensions(),
                self.dimensions()
            );
            return;
        }
        self.pixels.copy_from_slice(snapshot.as_raw());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(Canvas::new(0, 10, WHITE).is_err());
        assert!(Canvas::new(10, 0, WHITE).is_err());
        assert!(Canvas::new(1, 1, WHITE).is_ok());
    }

    #[test]
    fn test_segment_respects_thickness() {
        let mut canvas = Canvas::new(100, 100, WHITE).unwrap();
        canvas.draw_segment(pos2(10.0, 50.0), pos2(90.0, 50.0), RED, 6);

        assert_eq!(canvas.pixel(50, 50), Some(RED));
        assert_eq!(canvas.pixel(50, 53), Some(RED));
        assert_eq!(canvas.pixel(50, 54), Some(WHITE));
        assert_eq!(canvas.pixel(50, 47), Some(RED));
        assert_eq!(canvas.pixel(50, 46), Some(WHITE));
    }

    #[test]
    fn test_segment_is_clipped_not_dropped() {
        let mut canvas = Canvas::new(20, 20, WHITE).unwrap();
        canvas.draw_segment(pos2(-50.0, 5.0), pos2(500.0, 5.0), RED, 2);
        assert_eq!(canvas.pixel(0, 5), Some(RED));
        assert_eq!(canvas.pixel(19, 5), Some(RED));
    }

    #[test]
    fn test_dot_stamps_disc() {
        let mut canvas = Canvas::new(20, 20, WHITE).unwrap();
        canvas.stamp_dot(pos2(10.0, 10.0), RED, 6);
        assert_eq!(canvas.pixel(10, 10), Some(RED));
        assert_eq!(canvas.pixel(13, 10), Some(RED));
        assert_eq!(canvas.pixel(12, 12), Some(RED));
        assert_eq!(canvas.pixel(13, 13), Some(WHITE));
    }

    #[test]
    fn test_clear_and_restore() {
        let mut canvas = Canvas::new(8, 8, WHITE).unwrap();
        let blank = canvas.snapshot();
        canvas.stamp_dot(pos2(4.0, 4.0), RED, 4);
        assert_eq!(canvas.pixel(4, 4), Some(RED));

        canvas.restore(&blank);
        assert_eq!(canvas.pixels(), blank.as_ref());

        canvas.stamp_dot(pos2(4.0, 4.0), RED, 4);
        canvas.clear(WHITE);
        assert_eq!(canvas.pixels(), blank.as_ref());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut canvas = Canvas::new(8, 8, WHITE).unwrap();
        let snap = canvas.snapshot();
        canvas.stamp_dot(pos2(2.0, 2.0), RED, 2);
        assert_eq!(snap.get_pixel(2, 2), &WHITE);
    }
}
