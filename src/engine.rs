// Everything the frame loop mutates, in one place.
// Visual: one `tick()` = one animation step of the glitch (nothing moves while paused).

use crate::split::SplitLayers;
use crate::strips::{self, CYCLE_PERIOD};
use crate::types::{EffectState, GlitchStrip, SourceImage};
use rand::rngs::StdRng;

pub struct GlitchContext {
    pub source: SourceImage,
    pub state: EffectState,
    pub strips: Vec<GlitchStrip>,
    pub layers: SplitLayers,
    rng: StdRng,
    frame_count: u64,
}

impl GlitchContext {
    pub fn new(source: SourceImage, state: EffectState, rng: StdRng) -> Self {
        let layers = SplitLayers::new(source.width(), source.height());
        Self { source, state, strips: Vec::new(), layers, rng, frame_count: 0 }
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        log::debug!("paused = {}", self.state.paused);
    }

    /// Advance one frame. Paused: no-op (the last layers keep being drawn).
    pub fn tick(&mut self) {
        if self.state.paused {
            return;
        }
        let (w, h) = (self.source.width(), self.source.height());
        let target = self.state.target_strip_count;

        self.frame_count += 1;
        if self.frame_count % CYCLE_PERIOD == 0 {
            strips::cycle_periodic(&mut self.strips, target, &mut self.rng, w, h);
        }

        if self.state.intensity > 0.0 {
            strips::resize(&mut self.strips, target, &mut self.rng, w, h);
            strips::update_offsets(&mut self.strips, &self.state, &mut self.rng);
            self.layers.apply(&self.source, &self.strips);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec2;
    use image::{Rgba, RgbaImage};
    use rand::SeedableRng;

    fn context(intensity: f32) -> GlitchContext {
        let source = SourceImage::new(RgbaImage::from_pixel(120, 80, Rgba([10, 20, 30, 255]))).unwrap();
        let state = EffectState {
            direction: Vec2 { x: 1.0, y: 0.0 },
            intensity,
            ..EffectState::default()
        };
        GlitchContext::new(source, state, StdRng::seed_from_u64(42))
    }

    #[test]
    fn zero_intensity_keeps_layers_empty() {
        let mut ctx = context(0.0);
        for _ in 0..(CYCLE_PERIOD * 3) {
            ctx.tick();
            assert!(ctx.layers.red.pixels().all(|p| p[3] == 0));
            assert!(ctx.layers.blue.pixels().all(|p| p[3] == 0));
        }
        assert!(ctx.strips.is_empty());
    }

    #[test]
    fn active_tick_fills_strips_and_layers() {
        let mut ctx = context(20.0);
        ctx.state.target_strip_count = 6;
        ctx.tick();
        assert_eq!(ctx.strips.len(), 6);
        assert!(ctx.strips.iter().all(|s| s.offset_x.abs() <= 20 && s.offset_y == 0));
        let s = ctx.strips[0];
        assert_eq!(*ctx.layers.red.get_pixel(s.x as u32, s.y as u32), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn wheel_change_is_applied_on_next_active_tick() {
        let mut ctx = context(10.0);
        ctx.state.target_strip_count = 10;
        ctx.tick();
        let oldest = ctx.strips[..3].to_vec();
        ctx.state.target_strip_count = 3;
        ctx.tick();
        assert_eq!(ctx.strips.len(), 3);
        assert_eq!(
            ctx.strips.iter().map(|s| (s.x, s.y, s.width, s.height)).collect::<Vec<_>>(),
            oldest.iter().map(|s| (s.x, s.y, s.width, s.height)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn paused_freezes_strips_and_layers() {
        let mut ctx = context(30.0);
        ctx.tick();
        ctx.toggle_pause();
        let strips = ctx.strips.clone();
        let blue = ctx.layers.blue.clone();
        for _ in 0..(CYCLE_PERIOD * 2) {
            ctx.tick();
        }
        assert_eq!(ctx.strips, strips);
        assert_eq!(ctx.layers.blue, blue);
        assert_eq!(ctx.frame_count, 1);
    }

    #[test]
    fn strips_get_reshuffled_on_cycle_ticks() {
        let mut ctx = context(5.0);
        ctx.state.target_strip_count = 8;
        for _ in 0..(CYCLE_PERIOD - 1) {
            ctx.tick();
        }
        let geometry = |c: &GlitchContext| c.strips.iter().map(|s| (s.x, s.y, s.width, s.height)).collect::<Vec<_>>();
        let before = geometry(&ctx);
        ctx.tick();
        assert_eq!(ctx.strips.len(), 8);
        assert_ne!(geometry(&ctx), before);
    }
}
