//! Dot matrix uniform derivation.

use super::table::{UniformTable, UniformValue};
use crate::color::Rgb;

/// Number of color slots the dot matrix shader samples from.
pub const COLOR_SLOTS: usize = 6;

pub const COLORS: &str = "u_colors";
pub const OPACITIES: &str = "u_opacities";
pub const TOTAL_SIZE: &str = "u_total_size";
pub const DOT_SIZE: &str = "u_dot_size";

/// Spread 1-3 input colors over the six shader slots.
///
/// - 1 color fills every slot
/// - 2 colors take three slots each
/// - 3 colors take two slots each, in order
///
/// Any other count yields six black slots.
pub fn expand_colors(colors: &[Rgb]) -> [Rgb; COLOR_SLOTS] {
    match colors {
        [c] => [*c; COLOR_SLOTS],
        [a, b] => [*a, *a, *a, *b, *b, *b],
        [a, b, c] => [*a, *a, *b, *b, *c, *c],
        _ => {
            log::debug!(
                "Unsupported color count {}, falling back to black",
                colors.len()
            );
            [Rgb::BLACK; COLOR_SLOTS]
        }
    }
}

/// Build the dot matrix uniform table.
///
/// Contains `u_colors` (six normalized colors), `u_opacities` (as given),
/// `u_total_size` and `u_dot_size`.
pub fn build_dot_matrix_uniforms(
    colors: &[Rgb],
    opacities: &[f32],
    total_size: f32,
    dot_size: f32,
) -> UniformTable {
    let slots = expand_colors(colors)
        .iter()
        .map(Rgb::normalized)
        .collect();

    UniformTable::new()
        .with(COLORS, UniformValue::Vec3List(slots))
        .with(OPACITIES, UniformValue::FloatList(opacities.to_vec()))
        .with(TOTAL_SIZE, UniformValue::Scalar(total_size))
        .with(DOT_SIZE, UniformValue::Scalar(dot_size))
}
