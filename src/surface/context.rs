//! GPU handle shared by mounted surfaces.

use std::sync::Arc;
use wgpu::{Adapter, Device, Instance, Queue};

/// Errors that can occur while mounting or reading back a surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,
    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("Failed to wait for the GPU: {0}")]
    Poll(#[from] wgpu::PollError),
    #[error("Failed to map readback buffer: {0}")]
    Map(#[from] wgpu::BufferAsyncError),
    #[error("Readback callback was dropped before completing")]
    ReadbackDropped,
    #[error("Readback returned {0} bytes, which does not match the viewport")]
    ReadbackSize(usize),
    #[error("Readback needs an RGBA8 target, surface renders to {0:?}")]
    ReadbackFormat(wgpu::TextureFormat),
    #[error("Viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
}

/// Device and queue used by every surface mounted from it.
///
/// Passed explicitly to each surface; there is no process-wide instance.
pub struct RenderContext {
    pub instance: Instance,
    pub adapter: Arc<Adapter>,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
}

impl RenderContext {
    /// Create a headless context.
    pub async fn new() -> Result<Self, SurfaceError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                force_fallback_adapter: false,
                compatible_surface: None,
            })
            .await
            .map_err(|_| SurfaceError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("lumen-fx"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        let info = adapter.get_info();
        log::info!("Render context on {} ({:?})", info.name, info.backend);

        Ok(Self {
            instance,
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Blocking variant of [`RenderContext::new`].
    pub fn new_blocking() -> Result<Self, SurfaceError> {
        pollster::block_on(Self::new())
    }

    /// Wrap a device the host application already owns, e.g. one bound to a canvas.
    pub fn from_parts(
        instance: Instance,
        adapter: Arc<Adapter>,
        device: Arc<Device>,
        queue: Arc<Queue>,
    ) -> Self {
        Self {
            instance,
            adapter,
            device,
            queue,
        }
    }

    /// Get info about the GPU adapter.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }
}
