// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the glitched image over a checkerboard.
// 2) A white line from the drag start to the cursor while you drag.
// 3) A tiny 5x7 bitmap font to render HUD text on top.

use crate::compose::BlendTarget;
use crate::error::Error;
use crate::types::FrameBuffer;
use image::RgbaImage;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const CHECKER_SIZE: usize = 10;
const CHECKER_LIGHT: u32 = 0x00_80_80_80;
const CHECKER_DARK: u32 = 0x00_40_40_40;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the given size, capped at `fps` updates per second.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    // pause / resume the animation
    pub fn space_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    // save the current frame
    pub fn enter_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Enter, KeyRepeat::No)
    }

    // we flip a boolean in main to show the overlap map instead of the glitch
    pub fn o_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::O, KeyRepeat::No)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Clamp)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn middle_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Middle)
    }

    /// Wheel notches this frame: +1 up, -1 down, 0 when idle.
    pub fn scroll_steps(&self) -> i32 {
        match self.window.get_scroll_wheel() {
            Some((_, y)) if y > 0.0 => 1,
            Some((_, y)) if y < 0.0 => -1,
            _ => 0,
        }
    }
}

/* ---------- Software drawing: pixels, lines, layers, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Fill the whole buffer with the grey transparency checkerboard.
pub fn draw_checkerboard(fb: &mut FrameBuffer) {
    for y in 0..fb.height {
        let row = y * fb.width;
        for x in 0..fb.width {
            let light = (x / CHECKER_SIZE + y / CHECKER_SIZE) % 2 == 0;
            fb.pixels[row + x] = if light { CHECKER_LIGHT } else { CHECKER_DARK };
        }
    }
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Alpha-blend an RGBA image onto the (opaque) framebuffer with its corner at (ox, oy).
/// Parts that fall outside the window are skipped.
pub fn blit_rgba(fb: &mut FrameBuffer, layer: &RgbaImage, ox: i64, oy: i64) {
    let (w, h) = (fb.width as i64, fb.height as i64);
    for (lx, ly, px) in layer.enumerate_pixels() {
        let a = px[3] as u32;
        if a == 0 { continue; }
        let (x, y) = (ox + lx as i64, oy + ly as i64);
        if x < 0 || y < 0 || x >= w || y >= h { continue; }

        let idx = y as usize * fb.width + x as usize;
        let old = fb.pixels[idx];
        let mix = |src: u8, shift: u32| -> u32 {
            let dst = (old >> shift) & 0xFF;
            (src as u32 * a + dst * (255 - a) + 127) / 255
        };
        fb.pixels[idx] = (mix(px[0], 16) << 16) | (mix(px[1], 8) << 8) | mix(px[2], 0);
    }
}

impl BlendTarget for FrameBuffer {
    fn blend_layer(&mut self, layer: &RgbaImage, x: i64, y: i64) {
        blit_rgba(self, layer, x, y);
    }
}

/* ---------- 5x7 bitmap font (ASCII subset the HUD needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters used by the HUD
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (shift, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + shift, y + ry as i32 + shift, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; unknown characters leave a blank cell.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn checkerboard_alternates_every_cell() {
        let mut fb = FrameBuffer::new(40, 20);
        draw_checkerboard(&mut fb);
        assert_eq!(fb.pixels[0], CHECKER_LIGHT);
        assert_eq!(fb.pixels[9], CHECKER_LIGHT);
        assert_eq!(fb.pixels[10], CHECKER_DARK);
        assert_eq!(fb.pixels[10 * 40], CHECKER_DARK);
        assert_eq!(fb.pixels[10 * 40 + 10], CHECKER_LIGHT);
    }

    #[test]
    fn blit_blends_and_clips() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.pixels.iter_mut().for_each(|p| *p = 0x00_00_00_FF);
        let mut layer = RgbaImage::new(3, 3);
        layer.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        layer.put_pixel(1, 0, Rgba([255, 0, 0, 128]));
        layer.put_pixel(2, 2, Rgba([0, 255, 0, 255]));
        blit_rgba(&mut fb, &layer, -1, 2);

        // (0,0) lands at (-1,2): clipped. (1,0) -> (0,2) half red over blue.
        assert_eq!(fb.pixels[2 * 4], 0x00_80_00_7F);
        // (2,2) -> (1,4): below the buffer, clipped.
        assert!(fb.pixels.iter().filter(|&&p| p == 0x00_00_00_FF).count() == 15);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut fb = FrameBuffer::new(10, 10);
        draw_line(&mut fb, 1, 1, 8, 5, 7);
        assert_eq!(fb.pixels[1 * 10 + 1], 7);
        assert_eq!(fb.pixels[5 * 10 + 8], 7);
    }

    #[test]
    fn hud_letters_have_glyphs() {
        for ch in "LIVE PAUSED OVERLAP | STRIPS: 20 | INTENSITY: 50.0 | FPS: 59.9".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
    }
}
