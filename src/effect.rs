use image::{DynamicImage, Rgb, RgbImage, imageops};
use serde::{Deserialize, Serialize};

/// Sigma matching a 15x15 gaussian kernel with automatic sigma
pub const BLUR_SIGMA: f32 = 2.6;

/// High-pass kernel used by [`Effect::Sharpen`], row-major
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[-1, -1, -1], [-1, 9, -1], [-1, -1, -1]];

/// Whole-canvas transforms selectable from the effects row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Normal,
    Blur,
    Sharpen,
    Grayscale,
}

impl Effect {
    pub const ALL: [Effect; 4] = [Effect::Normal, Effect::Blur, Effect::Sharpen, Effect::Grayscale];

    pub fn label(&self) -> &'static str {
        match self {
            Effect::Normal => "Normal",
            Effect::Blur => "Blur",
            Effect::Sharpen => "Sharpen",
            Effect::Grayscale => "Grayscale",
        }
    }

    /// True if applying the effect can change pixels
    pub fn mutates_canvas(&self) -> bool {
        !matches!(self, Effect::Normal)
    }

    /// Produce a new buffer with the effect applied. The source is never modified.
    pub fn apply(&self, source: &RgbImage) -> RgbImage {
        match self {
            Effect::Normal => source.clone(),
            Effect::Blur => imageops::blur(source, BLUR_SIGMA),
            Effect::Sharpen => sharpen(source),
            Effect::Grayscale => {
                let gray = imageops::grayscale(source);
                DynamicImage::ImageLuma8(gray).to_rgb8()
            }
        }
    }
}

/// 3x3 convolution with edge-clamped sampling so the border keeps its colour.
fn sharpen(source: &RgbImage) -> RgbImage {
    let (width, height) = source.dimensions();
    let max_x = width as i64 - 1;
    let max_y = height as i64 - 1;

    RgbImage::from_fn(width, height, |x, y| {
        let mut acc = [0i32; 3];
        for (ky, row) in SHARPEN_KERNEL.iter().enumerate() {
            for (kx, weight) in row.iter().enumerate() {
                let sx = (x as i64 + kx as i64 - 1).clamp(0, max_x) as u32;
                let sy = (y as i64 + ky as i64 - 1).clamp(0, max_y) as u32;
                let Rgb(px) = *source.get_pixel(sx, sy);
                for c in 0..3 {
                    acc[c] += weight * px[c] as i32;
                }
            }
        }
        Rgb(acc.map(|v| v.clamp(0, 255) as u8))
    })
}
