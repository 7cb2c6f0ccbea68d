//! Canvas reveal effect.
//!
//! A grid of dots that ripples into view from the center of the surface.
//! Configuration flows into the dot matrix uniform builder, the uniforms
//! into a [`ShaderSurface`], and frame ticks from a [`FrameTicker`] drive
//! `u_time`.

mod shader;

pub use shader::{dot_matrix_fragment_source, reveal_fragment_source};

use crate::color::Rgb;
use crate::events::Subscription;
use crate::frame::{Clock, FrameTicker, DEFAULT_MAX_FPS};
use crate::surface::{
    MountSlot, RenderContext, ShaderSurface, SurfaceDescriptor, SurfaceError, Viewport,
};
use crate::uniforms::{build_dot_matrix_uniforms, UniformTable};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Inputs of the dot matrix uniform builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DotMatrixConfig {
    /// One to three colors spread over the six shader slots.
    pub colors: Vec<Rgb>,
    /// Opacity keyframes each cell picks from at random.
    pub opacities: Vec<f32>,
    /// Cell pitch in pixels.
    pub total_size: f32,
    /// Lit dot size in pixels within each cell.
    pub dot_size: f32,
}

impl Default for DotMatrixConfig {
    fn default() -> Self {
        Self {
            colors: vec![Rgb::BLACK],
            opacities: vec![0.04, 0.04, 0.04, 0.04, 0.04, 0.08, 0.08, 0.08, 0.08, 0.14],
            total_size: 4.0,
            dot_size: 2.0,
        }
    }
}

impl DotMatrixConfig {
    pub fn uniforms(&self) -> UniformTable {
        build_dot_matrix_uniforms(&self.colors, &self.opacities, self.total_size, self.dot_size)
    }
}

/// Configuration of the reveal background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub animation_speed: f32,
    pub opacities: Vec<f32>,
    pub colors: Vec<Rgb>,
    pub dot_size: f32,
    /// Fade the dots out toward the bottom edge.
    pub show_gradient: bool,
    pub max_fps: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            animation_speed: 0.4,
            opacities: vec![0.3, 0.3, 0.3, 0.5, 0.5, 0.5, 0.8, 0.8, 0.8, 1.0],
            colors: vec![Rgb::new(0, 255, 255)],
            dot_size: 3.0,
            show_gradient: true,
            max_fps: DEFAULT_MAX_FPS,
        }
    }
}

impl RevealConfig {
    pub fn dot_matrix(&self) -> DotMatrixConfig {
        DotMatrixConfig {
            colors: self.colors.clone(),
            opacities: self.opacities.clone(),
            dot_size: self.dot_size,
            ..DotMatrixConfig::default()
        }
    }

    pub fn fragment_source(&self) -> String {
        reveal_fragment_source(self.animation_speed, self.show_gradient)
    }
}

/// The reveal background: derived uniforms plus an optionally mounted surface.
pub struct RevealEffect {
    config: RevealConfig,
    uniforms: UniformTable,
    slot: MountSlot,
    subscription: Option<Subscription>,
}

impl RevealEffect {
    pub fn new(config: RevealConfig) -> Self {
        let uniforms = config.dot_matrix().uniforms();
        Self {
            config,
            uniforms,
            slot: MountSlot::new(),
            subscription: None,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Dot matrix uniforms, without the frame-managed entries.
    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }

    /// Mount a surface for `viewport`, replacing any mounted one.
    pub fn mount(&mut self, ctx: &RenderContext, viewport: Viewport) -> Result<(), SurfaceError> {
        let source = self.config.fragment_source();
        let desc = SurfaceDescriptor {
            max_fps: self.config.max_fps,
            ..SurfaceDescriptor::new(&source, &self.uniforms, viewport)
        };
        self.slot.mount(ShaderSurface::mount(ctx, desc)?);
        Ok(())
    }

    pub fn unmount(&mut self) -> Option<ShaderSurface> {
        self.slot.unmount()
    }

    pub fn is_mounted(&self) -> bool {
        self.slot.is_mounted()
    }

    /// Apply a new configuration.
    ///
    /// Uniforms are re-derived only if the config changed; the mounted
    /// surface rebuilds its pipeline only if the source or layout changed.
    pub fn set_config(&mut self, config: RevealConfig) -> bool {
        if config == self.config {
            return false;
        }
        self.uniforms = config.dot_matrix().uniforms();
        if let Some(surface) = self.slot.surface_mut() {
            surface.set_source(&config.fragment_source());
            surface.set_uniforms(&self.uniforms);
            if config.max_fps != self.config.max_fps {
                surface.set_max_fps(config.max_fps);
            }
        }
        self.config = config;
        true
    }

    pub fn on_frame(&mut self, elapsed: f64) -> bool {
        self.slot.on_frame(elapsed)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.slot.resize(width, height);
    }

    pub fn surface(&self) -> Option<&ShaderSurface> {
        self.slot.surface()
    }

    pub fn surface_mut(&mut self) -> Option<&mut ShaderSurface> {
        self.slot.surface_mut()
    }

    /// Render the current frame offscreen. `None` while unmounted.
    pub fn render_to_image(&mut self) -> Result<Option<image::RgbaImage>, SurfaceError> {
        self.slot
            .surface_mut()
            .map(ShaderSurface::render_to_image)
            .transpose()
    }

    /// Subscribe `effect` to `ticker` so every frame tick reaches [`RevealEffect::on_frame`].
    ///
    /// The ticker only holds a weak reference; dropping the effect stops delivery.
    pub fn attach<C: Clock>(effect: &Rc<RefCell<Self>>, ticker: &mut FrameTicker<C>) -> Subscription {
        Self::detach(effect, ticker);
        let weak = Rc::downgrade(effect);
        let subscription = ticker.subscribe(move |elapsed| {
            if let Some(effect) = weak.upgrade() {
                if let Ok(mut effect) = effect.try_borrow_mut() {
                    effect.on_frame(*elapsed);
                }
            }
        });
        effect.borrow_mut().subscription = Some(subscription);
        subscription
    }

    /// Undo [`RevealEffect::attach`]. Returns false if not attached.
    pub fn detach<C: Clock>(effect: &Rc<RefCell<Self>>, ticker: &mut FrameTicker<C>) -> bool {
        let subscription = effect.borrow_mut().subscription.take();
        match subscription {
            Some(subscription) => ticker.unsubscribe(subscription),
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}
