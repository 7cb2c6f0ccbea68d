//! Mounted full-screen shader surfaces.

use super::context::{RenderContext, SurfaceError};
use super::layouts::create_material_layout;
use super::pipelines::{create_pipeline_layout, RenderPipelineBuilder, ACCUMULATE_BLEND};
use super::quad::{compose_shader, QUAD_VERTEX_COUNT};
use super::target::{is_rgba8, OffscreenTarget};
use crate::frame::{FrameThrottle, DEFAULT_MAX_FPS};
use crate::uniforms::{
    pack_bytes, packed_layout, resolution_for, wgsl_declarations, UniformLayout, UniformTable,
    RESOLUTION, TIME,
};
use std::sync::Arc;
use wgpu::{BindGroup, BindGroupLayout, Buffer, Device, Queue, RenderPipeline, TextureFormat};

/// Size of the surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Everything needed to mount a surface.
#[derive(Debug, Clone)]
pub struct SurfaceDescriptor<'a> {
    /// WGSL fragment stage defining `fs_main`.
    pub source: &'a str,
    /// Caller uniforms; `u_time` and `u_resolution` are added on mount.
    pub uniforms: &'a UniformTable,
    pub viewport: Viewport,
    pub max_fps: f64,
    pub format: TextureFormat,
}

impl<'a> SurfaceDescriptor<'a> {
    pub fn new(source: &'a str, uniforms: &'a UniformTable, viewport: Viewport) -> Self {
        Self {
            source,
            uniforms,
            viewport,
            max_fps: DEFAULT_MAX_FPS,
            format: TextureFormat::Rgba8Unorm,
        }
    }
}

/// Compiled pipeline and the buffer it reads.
struct Material {
    pipeline: RenderPipeline,
    bind_group: BindGroup,
    uniform_buffer: Buffer,
    layout: UniformLayout,
}

/// A full-viewport quad drawn with a caller-supplied fragment shader.
///
/// The pipeline is compiled on mount and again only when the fragment
/// source or the uniform layout changes. Frame ticks, resizes, and value
/// changes only rewrite the uniform buffer.
pub struct ShaderSurface {
    device: Arc<Device>,
    queue: Arc<Queue>,
    format: TextureFormat,
    bind_group_layout: BindGroupLayout,
    source: String,
    uniforms: UniformTable,
    material: Material,
    throttle: FrameThrottle,
    viewport: Viewport,
    offscreen: Option<OffscreenTarget>,
    material_builds: usize,
}

impl ShaderSurface {
    pub fn mount(ctx: &RenderContext, desc: SurfaceDescriptor<'_>) -> Result<Self, SurfaceError> {
        let Viewport { width, height } = desc.viewport;
        if desc.viewport.is_empty() {
            return Err(SurfaceError::EmptyViewport { width, height });
        }

        let uniforms = desc.uniforms.prepared_for_surface(0.0, width, height);
        let bind_group_layout = create_material_layout(&ctx.device);
        let material = build_material(
            &ctx.device,
            &ctx.queue,
            &bind_group_layout,
            desc.format,
            desc.source,
            &uniforms,
        );

        log::debug!("Mounted shader surface {width}x{height}");

        Ok(Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            format: desc.format,
            bind_group_layout,
            source: desc.source.to_string(),
            uniforms,
            material,
            throttle: FrameThrottle::new(desc.max_fps),
            viewport: desc.viewport,
            offscreen: None,
            material_builds: 1,
        })
    }

    /// Replace the caller uniforms, keeping the current `u_time`.
    ///
    /// Returns true if the pipeline had to be rebuilt.
    pub fn set_uniforms(&mut self, uniforms: &UniformTable) -> bool {
        let prepared =
            uniforms.prepared_for_surface(self.time(), self.viewport.width, self.viewport.height);
        if prepared == self.uniforms {
            return false;
        }
        self.uniforms = prepared;

        if packed_layout(&self.uniforms) != self.material.layout {
            self.rebuild_material();
            true
        } else {
            self.write_uniforms();
            false
        }
    }

    /// Replace the fragment source. Returns true if it differed and the pipeline was rebuilt.
    pub fn set_source(&mut self, source: &str) -> bool {
        if source == self.source {
            return false;
        }
        self.source = source.to_string();
        self.rebuild_material();
        true
    }

    /// Track a viewport resize. Empty sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = Viewport::new(width, height);
        if viewport.is_empty() || viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.uniforms
            .set_vec2(RESOLUTION, resolution_for(width, height));
        self.offscreen = None;
        self.write_uniforms();
    }

    /// Change the update cap. The next tick is accepted unconditionally.
    pub fn set_max_fps(&mut self, max_fps: f64) {
        self.throttle = FrameThrottle::new(max_fps);
    }

    /// Frame callback. Writes `u_time` when the throttle accepts the tick.
    pub fn on_frame(&mut self, elapsed: f64) -> bool {
        if !self.throttle.apply(elapsed, &mut self.uniforms) {
            return false;
        }
        self.write_uniforms();
        true
    }

    /// Record a draw of the quad into `view`, cleared to transparent first.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        encode_quad(&self.material, encoder, view);
    }

    /// Draw into `view` and submit.
    pub fn render(&self, view: &wgpu::TextureView) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("surface_encoder"),
            });
        self.encode(&mut encoder, view);
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Render into an owned offscreen target and return RGBA pixel rows.
    ///
    /// Only surfaces mounted with an RGBA8 format can be read back; others
    /// fail with [`SurfaceError::ReadbackFormat`].
    pub fn render_to_pixels(&mut self) -> Result<Vec<u8>, SurfaceError> {
        if !is_rgba8(self.format) {
            return Err(SurfaceError::ReadbackFormat(self.format));
        }
        let Viewport { width, height } = self.viewport;
        let target = self.offscreen.get_or_insert_with(|| {
            OffscreenTarget::new(&self.device, "surface_offscreen", width, height, self.format)
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("surface_readback_encoder"),
            });
        encode_quad(&self.material, &mut encoder, target.view());
        target.read_pixels(&self.device, &self.queue, encoder)
    }

    /// [`ShaderSurface::render_to_pixels`] wrapped as an image of the viewport size.
    pub fn render_to_image(&mut self) -> Result<image::RgbaImage, SurfaceError> {
        let pixels = self.render_to_pixels()?;
        let len = pixels.len();
        image::RgbaImage::from_raw(self.viewport.width, self.viewport.height, pixels)
            .ok_or(SurfaceError::ReadbackSize(len))
    }

    /// Current uniforms, frame-managed entries included.
    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Shader time of the last accepted frame.
    pub fn time(&self) -> f32 {
        self.uniforms.scalar(TIME).unwrap_or(0.0)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn throttle(&self) -> &FrameThrottle {
        &self.throttle
    }

    /// Number of times the pipeline has been compiled, including the mount.
    pub fn material_builds(&self) -> usize {
        self.material_builds
    }

    fn rebuild_material(&mut self) {
        log::debug!("Rebuilding surface material");
        self.material = build_material(
            &self.device,
            &self.queue,
            &self.bind_group_layout,
            self.format,
            &self.source,
            &self.uniforms,
        );
        self.material_builds += 1;
    }

    fn write_uniforms(&self) {
        self.queue
            .write_buffer(&self.material.uniform_buffer, 0, &pack_bytes(&self.uniforms));
    }
}

fn encode_quad(material: &Material, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("surface_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            depth_slice: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    render_pass.set_pipeline(&material.pipeline);
    render_pass.set_bind_group(0, &material.bind_group, &[]);
    render_pass.draw(0..QUAD_VERTEX_COUNT, 0..1);
}

fn build_material(
    device: &Device,
    queue: &Queue,
    bind_group_layout: &BindGroupLayout,
    format: TextureFormat,
    fragment_source: &str,
    uniforms: &UniformTable,
) -> Material {
    let source = compose_shader(&wgsl_declarations(uniforms, 0, 0), fragment_source);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("surface_shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout =
        create_pipeline_layout(device, "surface_pipeline_layout", &[bind_group_layout]);
    let pipeline = RenderPipelineBuilder::new("surface_pipeline", &shader)
        .layout(&pipeline_layout)
        .format(format)
        .blend(ACCUMULATE_BLEND)
        .build(device);

    let bytes = pack_bytes(uniforms);
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("surface_uniforms"),
        size: bytes.len() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    queue.write_buffer(&uniform_buffer, 0, &bytes);

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("surface_bind_group"),
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    Material {
        pipeline,
        bind_group,
        uniform_buffer,
        layout: packed_layout(uniforms),
    }
}

/// A slot a surface may or may not be mounted in.
///
/// Frame ticks and resizes that arrive before mount are dropped.
#[derive(Default)]
pub struct MountSlot {
    surface: Option<ShaderSurface>,
}

impl MountSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `surface`, dropping any surface mounted before.
    pub fn mount(&mut self, surface: ShaderSurface) {
        self.surface = Some(surface);
    }

    /// Take the surface out, releasing its GPU resources when dropped.
    pub fn unmount(&mut self) -> Option<ShaderSurface> {
        self.surface.take()
    }

    /// Whether a surface is mounted.
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Forward a frame tick. False while unmounted or when throttled.
    pub fn on_frame(&mut self, elapsed: f64) -> bool {
        match self.surface.as_mut() {
            Some(surface) => surface.on_frame(elapsed),
            None => false,
        }
    }

    /// Resize the mounted surface, if any.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
    }

    pub fn surface(&self) -> Option<&ShaderSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut ShaderSurface> {
        self.surface.as_mut()
    }
}
