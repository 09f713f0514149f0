// Red/blue channel split over the active strips.
// Visual: inside every strip the subject turns into a static red copy plus a blue
// copy that is later drawn shifted by the strip's offset.

use crate::types::{GlitchStrip, SourceImage};
use image::{Rgba, RgbaImage};

pub const GLITCH_RED: [u8; 3] = [255, 0, 0];
pub const GLITCH_BLUE: [u8; 3] = [0, 140, 255]; // lighter, more fluorescent blue

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Per-tick derived buffers, all the size of the source image.
pub struct SplitLayers {
    pub red: RgbaImage,     // static red copy, drawn in place
    pub blue: RgbaImage,    // moving copy, stored at *source* coordinates
    pub overlap: RgbaImage, // original colors under the strips (debug view only)
}

impl SplitLayers {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            red: RgbaImage::new(width, height),
            blue: RgbaImage::new(width, height),
            overlap: RgbaImage::new(width, height),
        }
    }

    /// Rebuild all layers from scratch for the given strips.
    pub fn apply(&mut self, source: &SourceImage, strips: &[GlitchStrip]) {
        for layer in [&mut self.red, &mut self.blue, &mut self.overlap] {
            layer.pixels_mut().for_each(|p| *p = CLEAR);
        }

        // Pass 1: red (static) copy + overlap record.
        for strip in strips {
            for (x, y, color) in subject_pixels(source, strip) {
                let [r, g, b] = GLITCH_RED;
                self.red.put_pixel(x as u32, y as u32, Rgba([r, g, b, color[3]]));
                self.overlap.put_pixel(x as u32, y as u32, color);
            }
        }

        // Pass 2: blue (displaced) copy. Where the move would land on existing subject
        // pixels, take their color instead so the shifted copy doesn't clash.
        for strip in strips {
            for (x, y, color) in subject_pixels(source, strip) {
                let Some(dest) = source.pixel(x + strip.offset_x, y + strip.offset_y) else {
                    continue; // moved off the image: stays transparent
                };
                let out = if dest[3] == 0 {
                    let [r, g, b] = GLITCH_BLUE;
                    Rgba([r, g, b, color[3]])
                } else {
                    dest
                };
                self.blue.put_pixel(x as u32, y as u32, out);
            }
        }
    }
}

/// Non-transparent source pixels inside a strip, clipped to the image.
fn subject_pixels<'a>(
    source: &'a SourceImage,
    strip: &GlitchStrip,
) -> impl Iterator<Item = (i32, i32, Rgba<u8>)> + 'a {
    let x0 = strip.x.max(0);
    let y0 = strip.y.max(0);
    let x1 = (strip.x + strip.width).min(source.width() as i32);
    let y1 = (strip.y + strip.height).min(source.height() as i32);

    (y0..y1)
        .flat_map(move |y| (x0..x1).map(move |x| (x, y)))
        .filter_map(move |(x, y)| source.pixel(x, y).map(|c| (x, y, c)))
        .filter(|(_, _, c)| c[3] > 0)
}
