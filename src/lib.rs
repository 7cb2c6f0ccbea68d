//! Lumen FX Core
//!
//! GPU-driven decorative effects for landing pages.
//!
//! # Features
//!
//! - Dot matrix "reveal" background rendered by a full-viewport fragment shader via wgpu
//! - Uniform tables packed into WGSL uniform buffers, with generated declarations
//! - Frame-rate capped shader time driven by explicit frame tick subscriptions
//! - Globe point data derived from arc lists, pushed to an external globe object
//! - Floating navigation bar that hides while scrolling down
//! - Page configuration loaded from JSON via serde

pub mod color;
pub mod config;
pub mod events;
pub mod frame;
pub mod globe;
pub mod nav;
pub mod reveal;
pub mod surface;
pub mod uniforms;

// Re-export commonly used types
pub use color::{parse_hex_rgb, Rgb};
pub use config::{ConfigError, SceneConfig};
pub use events::{EventSource, Subscription};
pub use frame::{Clock, FrameThrottle, FrameTicker, ManualClock, SystemClock};
pub use globe::{
    build_globe_points, ArcPosition, GlobeAdapter, GlobeConfig, GlobePoint, GlobeTarget,
    WorldSettings,
};
pub use nav::{FloatingNav, NavItem, ScrollProgress, ScrollTracker, Visibility, VisibilityController};
pub use reveal::{DotMatrixConfig, RevealConfig, RevealEffect};
pub use surface::{MountSlot, RenderContext, ShaderSurface, SurfaceDescriptor, SurfaceError, Viewport};
pub use uniforms::{build_dot_matrix_uniforms, UniformTable, UniformValue};
