//! Shader uniform tables.
//!
//! A [`UniformTable`] is an ordered set of named, tagged values. The dot
//! matrix builder derives one from a small color/opacity configuration and
//! the packer turns any table into a uniform buffer plus the WGSL that
//! declares it.

mod builder;
mod packing;
mod table;

pub use builder::{
    build_dot_matrix_uniforms, expand_colors, COLORS, COLOR_SLOTS, DOT_SIZE, OPACITIES,
    TOTAL_SIZE,
};
pub use packing::{
    pack, pack_bytes, packed_layout, packed_size, wgsl_declarations, PackedUniforms,
};
pub use table::{
    resolution_for, UniformLayout, UniformShape, UniformTable, UniformValue, RESOLUTION, TIME,
};
