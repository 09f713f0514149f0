// Core types shared by the glitch pipeline.

use crate::error::Error;
use image::{Rgba, RgbaImage};

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window surface is (pixels)
    pub height: usize,     // how tall the window surface is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// The picture being glitched. Loaded once, never written to afterwards.
/// Visual: alpha 0 is background (left alone), alpha > 0 is the subject.
pub struct SourceImage {
    image: RgbaImage,
}

impl SourceImage {
    pub fn new(image: RgbaImage) -> Result<Self, Error> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at signed coordinates; `None` outside the image.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if x < 0 || y < 0 {
            return None;
        }
        self.image.get_pixel_checked(x as u32, y as u32).copied()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }
}

/// Drag direction. Always unit length once a drag has been committed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// One rectangular slice of the subject that gets the red/blue split.
/// Geometry is fixed at creation; only the offsets move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlitchStrip {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub offset_x: i32, // where the blue copy lands, relative to (x, y)
    pub offset_y: i32,
}

/// Knobs the user turns with the mouse; read by the strip code every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectState {
    pub direction: Vec2,
    pub intensity: f32,           // 0 = no distortion yet
    pub target_strip_count: usize,
    pub paused: bool,
}

impl Default for EffectState {
    fn default() -> Self {
        Self {
            direction: Vec2 { x: 1.0, y: 0.0 },
            intensity: 0.0,
            target_strip_count: 3,
            paused: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_rejects_empty_image() {
        let err = SourceImage::new(RgbaImage::new(0, 10)).err();
        assert!(matches!(err, Some(Error::EmptyImage { width: 0, height: 10 })));
    }

    #[test]
    fn source_pixel_is_bounds_checked() {
        let src = SourceImage::new(RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 4]))).unwrap();
        assert_eq!(src.pixel(3, 2), Some(Rgba([1, 2, 3, 4])));
        assert_eq!(src.pixel(4, 0), None);
        assert_eq!(src.pixel(0, 3), None);
        assert_eq!(src.pixel(-1, 0), None);
    }
}
