//! Full-screen shader surfaces on wgpu.
//!
//! A [`ShaderSurface`] is one clip-space quad with a caller-supplied WGSL
//! fragment stage, a fixed pass-through vertex stage, and a uniform block
//! generated from a [`crate::uniforms::UniformTable`]. Surfaces are
//! created from an explicit [`RenderContext`] handle and released when
//! dropped or taken out of their [`MountSlot`].

pub mod context;
pub mod layouts;
pub mod mount;
pub mod pipelines;
pub mod quad;
pub mod target;

pub use context::{RenderContext, SurfaceError};
pub use mount::{MountSlot, ShaderSurface, SurfaceDescriptor, Viewport};
pub use pipelines::ACCUMULATE_BLEND;
pub use quad::{compose_shader, VERTEX_STAGE};
pub use target::{is_rgba8, OffscreenTarget};
