// Strip bookkeeping: create, resize, periodically reshuffle, and jitter offsets.
// Visual: the glitch bars pop in/out every half second and shake every frame.

use crate::types::{EffectState, GlitchStrip};
use rand::Rng;
use rand::seq::index;

pub const MIN_STRIP_HEIGHT: i32 = 10;
pub const MAX_STRIP_HEIGHT: i32 = 40;
pub const MIN_STRIP_WIDTH: i32 = 50;
pub const CYCLE_PERIOD: u64 = 30; // ticks between reshuffles (~0.5 s at 60 FPS)

/// Vertical jitter is a fifth of the horizontal one.
const VERTICAL_FACTOR: f32 = 0.2;

/// Random strip fully inside a `image_w` x `image_h` image.
/// Images narrower/shorter than the minimum strip get strips clamped to their size.
pub fn generate_strip<R: Rng + ?Sized>(rng: &mut R, image_w: u32, image_h: u32) -> GlitchStrip {
    let (w, h) = (image_w.max(1) as i32, image_h.max(1) as i32);

    let height = rng.random_range(MIN_STRIP_HEIGHT.min(h)..=MAX_STRIP_HEIGHT.min(h));
    let width = rng.random_range(MIN_STRIP_WIDTH.min(w)..=w);
    let x = rng.random_range(0..=w - width);
    let y = rng.random_range(0..=h - height);

    GlitchStrip { x, y, width, height, offset_x: 0, offset_y: 0 }
}

/// Grow by appending new strips or shrink by dropping the newest ones.
pub fn resize<R: Rng + ?Sized>(
    strips: &mut Vec<GlitchStrip>,
    target: usize,
    rng: &mut R,
    image_w: u32,
    image_h: u32,
) {
    while strips.len() < target {
        strips.push(generate_strip(rng, image_w, image_h));
    }
    strips.truncate(target);
}

/// Swap a random handful of strips for fresh ones (no index picked twice).
/// Returns how many were replaced.
pub fn cycle_periodic<R: Rng + ?Sized>(
    strips: &mut [GlitchStrip],
    target: usize,
    rng: &mut R,
    image_w: u32,
    image_h: u32,
) -> usize {
    if strips.is_empty() {
        return 0;
    }
    let k = rng.random_range(1..=(target / 2).max(1)).min(strips.len());
    for idx in index::sample(rng, strips.len(), k) {
        strips[idx] = generate_strip(rng, image_w, image_h);
    }
    k
}

/// Redraw every strip's offset from the current intensity and direction.
pub fn update_offsets<R: Rng + ?Sized>(strips: &mut [GlitchStrip], state: &EffectState, rng: &mut R) {
    let max_x = state.intensity.max(0.0).floor() as i32;
    let max_y = (state.intensity.max(0.0) * VERTICAL_FACTOR).floor() as i32;

    for strip in strips.iter_mut() {
        // Truncate toward zero, so |offset| never exceeds the integer bound.
        strip.offset_x = (rng.random_range(-max_x..=max_x) as f32 * state.direction.x) as i32;
        strip.offset_y = (rng.random_range(-max_y..=max_y) as f32 * state.direction.y) as i32;
    }
}
