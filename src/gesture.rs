// Mouse gestures -> effect parameters.
// Visual: a longer left-drag makes the blue copies jump further, in the drag's
// direction; the wheel adds or removes strips.

use crate::types::{EffectState, Vec2};

pub const MAX_OFFSET: f32 = 50.0;     // intensity ceiling (pixels)
pub const DRAG_DIVISOR: f32 = 5.0;    // 5 px of drag = 1 px of intensity
pub const MIN_STRIPS: usize = 1;
pub const MAX_STRIPS: usize = 20;

/// Commit a finished drag. A zero-length drag leaves the state untouched.
pub fn apply_drag(state: &mut EffectState, start: (f32, f32), end: (f32, f32)) {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance <= 0.0 {
        return;
    }
    state.direction = Vec2 { x: dx / distance, y: dy / distance };
    state.intensity = (distance / DRAG_DIVISOR).min(MAX_OFFSET);
    log::debug!(
        "drag committed: direction=({:.2}, {:.2}) intensity={:.1}",
        state.direction.x, state.direction.y, state.intensity
    );
}

/// Wheel notches up/down change the strip count, clamped to [1, 20].
pub fn adjust_strip_count(state: &mut EffectState, steps: i32) {
    let next = state.target_strip_count as i64 + steps as i64;
    state.target_strip_count = next.clamp(MIN_STRIPS as i64, MAX_STRIPS as i64) as usize;
}

/// Turns per-frame "button is down" samples into a drag start / release pair.
#[derive(Default)]
pub struct DragTracker {
    start: Option<(f32, f32)>,
}

impl DragTracker {
    /// Feed one frame of input. Returns `(start, end)` on the frame the button is released.
    pub fn update(&mut self, down: bool, pos: Option<(f32, f32)>) -> Option<((f32, f32), (f32, f32))> {
        match (self.start, down) {
            (None, true) => {
                self.start = pos;
                None
            }
            (Some(start), false) => {
                self.start = None;
                // minifb only reports a position while the cursor is inside; fall back to the start.
                Some((start, pos.unwrap_or(start)))
            }
            _ => None,
        }
    }

    /// Where the drag began, while the button is still held.
    pub fn active_start(&self) -> Option<(f32, f32)> {
        self.start
    }
}

/// Middle-button panning of the displayed image. Display-only; never touches the effect.
#[derive(Default)]
pub struct PanTracker {
    last: Option<(f32, f32)>,
    pub offset: (i32, i32),
}

impl PanTracker {
    pub fn update(&mut self, down: bool, pos: Option<(f32, f32)>) {
        if !down {
            self.last = None;
            return;
        }
        if let (Some((lx, ly)), Some((x, y))) = (self.last, pos) {
            self.offset.0 += (x - lx) as i32;
            self.offset.1 += (y - ly) as i32;
        }
        if pos.is_some() {
            self.last = pos;
        }
    }
}
