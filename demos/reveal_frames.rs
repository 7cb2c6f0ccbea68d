//! Example: Render the reveal background to PNG frames.
//!
//! Mounts the dot matrix reveal headless, drives it from a manual clock,
//! and writes one PNG per sampled frame. An optional JSON scene config
//! path overrides the default reveal settings.
//!
//! Run with:
//!     cargo run --example reveal_frames --features tokio -- [scene.json]

use anyhow::Context;
use lumen_fx::frame::{FrameTicker, ManualClock};
use lumen_fx::reveal::{RevealConfig, RevealEffect};
use lumen_fx::surface::{RenderContext, Viewport};
use lumen_fx::SceneConfig;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const FPS: f64 = 30.0;
const DURATION_SECS: f64 = 4.0;
const SAVE_EVERY: usize = 15;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let reveal = match std::env::args().nth(1) {
        Some(path) => {
            SceneConfig::load(&path)
                .with_context(|| format!("loading scene config {path}"))?
                .reveal
        }
        None => RevealConfig::default(),
    };
    log::info!(
        "Reveal speed {}, {} colors, gradient {}",
        reveal.animation_speed,
        reveal.colors.len(),
        reveal.show_gradient
    );

    let ctx = RenderContext::new().await?;
    log::info!("GPU: {}", ctx.adapter_info().name);

    let effect = Rc::new(RefCell::new(RevealEffect::new(reveal)));
    effect
        .borrow_mut()
        .mount(&ctx, Viewport::new(WIDTH, HEIGHT))?;

    let mut ticker = FrameTicker::new(ManualClock::new());
    RevealEffect::attach(&effect, &mut ticker);

    let output_dir = Path::new("reveal_frames");
    std::fs::create_dir_all(output_dir)?;

    let total_frames = (DURATION_SECS * FPS) as usize;
    for frame in 0..total_frames {
        let elapsed = ticker.tick();

        if frame % SAVE_EVERY == 0 {
            let image = effect
                .borrow_mut()
                .render_to_image()?
                .context("effect is not mounted")?;
            let path = output_dir.join(format!("frame_{frame:04}.png"));
            image.save(&path)?;
            log::info!("Saved {} at t={elapsed:.2}s", path.display());
        }

        ticker.clock_mut().advance(1.0 / FPS);
    }

    RevealEffect::detach(&effect, &mut ticker);
    effect.borrow_mut().unmount();
    log::info!("Done: {total_frames} frames simulated");

    Ok(())
}
