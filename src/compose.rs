// Stacks source + red layer + shifted blue strips into one picture.
// Visual: the same stack is drawn in the window every frame and written to disk on save.

use crate::split::SplitLayers;
use crate::types::{GlitchStrip, SourceImage};
use image::{imageops, RgbaImage};

/// Anything an RGBA layer can be alpha-blended onto at a signed position.
pub trait BlendTarget {
    fn blend_layer(&mut self, layer: &RgbaImage, x: i64, y: i64);
}

impl BlendTarget for RgbaImage {
    fn blend_layer(&mut self, layer: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(self, layer, x, y);
    }
}

/// Draw the glitched frame with the image's top-left corner at `anchor`.
pub fn composite<T: BlendTarget + ?Sized>(
    target: &mut T,
    anchor: (i64, i64),
    source: &SourceImage,
    layers: &SplitLayers,
    strips: &[GlitchStrip],
) {
    let (ax, ay) = anchor;
    target.blend_layer(source.as_rgba(), ax, ay);
    target.blend_layer(&layers.red, ax, ay);

    // Blue content lives at source coordinates; the shift happens here.
    for strip in strips {
        let Some(piece) = strip_piece(&layers.blue, strip) else { continue };
        target.blend_layer(
            &piece,
            ax + (strip.x + strip.offset_x) as i64,
            ay + (strip.y + strip.offset_y) as i64,
        );
    }
}

/// The final frame in source space (no padding, no pan), as saved to disk.
pub fn render_export(source: &SourceImage, layers: &SplitLayers, strips: &[GlitchStrip]) -> RgbaImage {
    let mut out = RgbaImage::new(source.width(), source.height());
    composite(&mut out, (0, 0), source, layers, strips);
    out
}

/// Copy of the strip's rectangle out of `layer`, clipped to the layer.
fn strip_piece(layer: &RgbaImage, strip: &GlitchStrip) -> Option<RgbaImage> {
    let x = strip.x.max(0) as u32;
    let y = strip.y.max(0) as u32;
    let w = (strip.width.max(0) as u32).min(layer.width().saturating_sub(x));
    let h = (strip.height.max(0) as u32).min(layer.height().saturating_sub(y));
    if w == 0 || h == 0 {
        return None;
    }
    Some(imageops::crop_imm(layer, x, y, w, h).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameBuffer;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    // `imageops::overlay` blends in f32, so mid-range channels may land one step off.
    fn assert_near(actual: &Rgba<u8>, expected: [u8; 4]) {
        for (a, e) in actual.0.iter().zip(expected) {
            assert!(a.abs_diff(e) <= 1, "{actual:?} vs {expected:?}");
        }
    }

    fn white_block_source() -> SourceImage {
        // 200x200, opaque white in x<50, y<20, transparent elsewhere.
        let img = RgbaImage::from_fn(200, 200, |x, y| {
            if x < 50 && y < 20 { WHITE } else { Rgba([0, 0, 0, 0]) }
        });
        SourceImage::new(img).unwrap()
    }

    fn glitched(strips: &[GlitchStrip]) -> (SourceImage, SplitLayers) {
        let source = white_block_source();
        let mut layers = SplitLayers::new(200, 200);
        layers.apply(&source, strips);
        (source, layers)
    }

    #[test]
    fn export_stacks_red_in_place_and_blue_at_offset() {
        let strips = [GlitchStrip { x: 0, y: 0, width: 50, height: 20, offset_x: 60, offset_y: 5 }];
        let (source, layers) = glitched(&strips);
        let out = render_export(&source, &layers, &strips);

        assert_eq!(out.dimensions(), (200, 200));
        assert_eq!(*out.get_pixel(10, 3), Rgba([255, 0, 0, 255]));
        assert_near(out.get_pixel(70, 10), [0, 140, 255, 255]);
        assert_near(out.get_pixel(109, 24), [0, 140, 255, 255]);
        assert_eq!(out.get_pixel(110, 10)[3], 0);
        assert_eq!(out.get_pixel(55, 10)[3], 0);
    }

    #[test]
    fn export_without_strips_is_the_source() {
        let (source, layers) = glitched(&[]);
        let out = render_export(&source, &layers, &[]);
        assert_eq!(out, *source.as_rgba());
    }

    #[test]
    fn blue_shifted_left_lands_on_subject_and_is_masked() {
        let strips = [GlitchStrip { x: 0, y: 0, width: 50, height: 20, offset_x: -30, offset_y: 0 }];
        let (source, layers) = glitched(&strips);
        let out = render_export(&source, &layers, &strips);

        // The shifted copy lands on the subject itself, so it carries the subject's own color.
        assert_eq!(*out.get_pixel(5, 10), WHITE);
        assert_eq!(*out.get_pixel(25, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(40, 10), Rgba([255, 0, 0, 255]));
        assert!(out.pixels().all(|p| p[1] == 0 || p[1] == 255));
    }

    #[test]
    fn display_composite_honours_anchor() {
        let strips = [GlitchStrip { x: 0, y: 0, width: 50, height: 20, offset_x: 60, offset_y: 0 }];
        let (source, layers) = glitched(&strips);
        let mut fb = FrameBuffer::new(400, 400);
        composite(&mut fb, (100, 100), &source, &layers, &strips);

        assert_eq!(fb.pixels[105 * 400 + 110], 0x00FF_0000);
        assert_eq!(fb.pixels[105 * 400 + 170], 0x0000_8CFF);
        assert_eq!(fb.pixels[105 * 400 + 155], 0);
        assert_eq!(fb.pixels[5 * 400 + 10], 0);
    }
}
