// What you SEE:
// • The image (or a white disc) over a checkerboard, with red/blue glitch strips.
// • Left-drag and release: sets glitch direction + strength (longer drag = stronger).
// • Mouse wheel: more / fewer strips (1..20).
// • Middle-drag: pan the image around the window.
// • SPACE pauses, ENTER saves the glitched frame, O shows the overlap map (debug). ESC quits.

mod compose;
mod config;
mod draw;
mod engine;
mod error;
mod gesture;
mod source;
mod split;
mod strips;
mod types;

use clap::Parser;
use compose::BlendTarget;
use config::Args;
use draw::{draw_checkerboard, draw_line, draw_text_5x7, Drawer};
use engine::GlitchContext;
use error::Error;
use gesture::{DragTracker, PanTracker};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use std::time::{Duration, Instant};
use types::{EffectState, FrameBuffer};

fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {style}{}{style:#} {}:{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.file().unwrap_or("None").rsplit('/').next().unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn main() -> Result<(), Error> {
    init_logger();
    let args = Args::parse();

    /* --- Source image + window setup ---
       Visual: window = image size plus padding on every side. */
    let source = source::load_or_default(&args.input)?;
    let win_w = source.width() as usize + args.padding * 2;
    let win_h = source.height() as usize + args.padding * 2;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("window {}x{}, seed {}", win_w, win_h, seed);

    let state = EffectState { target_strip_count: args.strips as usize, ..EffectState::default() };
    let mut ctx = GlitchContext::new(source, state, StdRng::seed_from_u64(seed));
    let mut drawer = Drawer::new("Glitch Effect", win_w, win_h, args.fps)?;

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(win_w, win_h);

    /* --- Mouse gesture state --- */
    let mut drag = DragTracker::default();
    let mut pan = PanTracker::default();

    /* --- Debug toggle ---
       Visual: O swaps the glitch for the overlap map (original colors under the strips). */
    let mut show_overlap = false;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Keys */
        if drawer.space_pressed_once() { ctx.toggle_pause(); }
        if drawer.o_pressed_once() { show_overlap = !show_overlap; }
        if drawer.enter_pressed_once() { save_frame(&ctx, &args.output); }

        /* 2) Mouse: drag release commits direction/intensity, wheel changes strip count */
        let mouse = drawer.mouse_pos();
        if let Some((start, end)) = drag.update(drawer.left_mouse_down(), mouse) {
            gesture::apply_drag(&mut ctx.state, start, end);
        }
        pan.update(drawer.middle_mouse_down(), mouse);
        let steps = drawer.scroll_steps();
        if steps != 0 {
            gesture::adjust_strip_count(&mut ctx.state, steps);
        }

        /* 3) Animate: reshuffle / jitter / rebuild red+blue layers */
        ctx.tick();

        /* 4) Draw: checkerboard, then the glitched stack at the (panned) anchor */
        draw_checkerboard(&mut screen);
        let anchor = (
            args.padding as i64 + pan.offset.0 as i64,
            args.padding as i64 + pan.offset.1 as i64,
        );
        if show_overlap {
            screen.blend_layer(&ctx.layers.overlap, anchor.0, anchor.1);
        } else {
            compose::composite(&mut screen, anchor, &ctx.source, &ctx.layers, &ctx.strips);
        }

        // Visual: white line from where the drag started to the cursor.
        if let (Some((sx, sy)), Some((mx, my))) = (drag.active_start(), mouse) {
            draw_line(&mut screen, sx as i32, sy as i32, mx as i32, my as i32, 0x00_FF_FF_FF);
        }

        let status = match (ctx.state.paused, show_overlap) {
            (_, true) => "OVERLAP",
            (true, false) => "PAUSED",
            (false, false) => "LIVE",
        };
        let hud = format!(
            "{} | STRIPS: {} | INTENSITY: {:.1} | {}",
            status, ctx.state.target_strip_count, ctx.state.intensity, hud_fps_text
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 5) Present to the window */
        drawer.present(&screen)?;

        /* 6) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

/// Write the current frame (source space, no padding/pan). A failure is reported and ignored.
fn save_frame(ctx: &GlitchContext, path: &Path) {
    let frame = compose::render_export(&ctx.source, &ctx.layers, &ctx.strips);
    match source::save_png(&frame, path) {
        Ok(()) => log::info!("saved {}", path.display()),
        Err(e) => log::warn!("could not save {}: {}", path.display(), e),
    }
}
