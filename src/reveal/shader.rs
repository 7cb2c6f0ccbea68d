//! WGSL fragment stage for the dot matrix reveal.
//!
//! Relies on the declarations generated from the dot matrix uniform table
//! (`u_colors`, `u_opacities_at`, `u_total_size`, `u_dot_size`) plus the
//! surface's `u_time` and `u_resolution`.

const DOT_MATRIX_TEMPLATE: &str = r#"
const PHI: f32 = 1.61803398874989484820459;

fn random(xy: vec2<f32>) -> f32 {
    return fract(tan(distance(xy * PHI, xy) * 0.5) * xy.x);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let st = in.frag_coord;
    var opacity = step(0.0, st.x) * step(0.0, st.y);

    let st2 = floor(st / u.u_total_size);
    let frequency = 5.0;
    let show_offset = random(st2);
    let rand = random(st2 * floor((u.u_time / frequency) + show_offset + frequency) + 1.0);
    let slot = min(u32(abs(rand) * f32(u_opacities_len)), max(u_opacities_len, 1u) - 1u);
    opacity *= u_opacities_at(slot);

    let cell = fract(st / u.u_total_size);
    let dot_edge = u.u_dot_size / u.u_total_size;
    opacity *= 1.0 - step(dot_edge, cell.x);
    opacity *= 1.0 - step(dot_edge, cell.y);

    let color = u.u_colors[min(u32(abs(show_offset) * 6.0), 5u)];
{{REVEAL}}{{FADE}}
    return vec4<f32>(color * opacity, opacity);
}
"#;

/// Cells light up in a ripple from the center, each cell flashing brighter
/// for a moment as it appears.
fn reveal_snippet(animation_speed: f32) -> String {
    format!(
        r#"
    let animation_speed_factor = {animation_speed:.1};
    let intro_offset = distance(u.u_resolution / 2.0 / u.u_total_size, st2) * 0.01 + (random(st2) * 0.15);
    opacity *= step(intro_offset, u.u_time * animation_speed_factor);
    opacity *= clamp((1.0 - step(intro_offset + 0.1, u.u_time * animation_speed_factor)) * 1.25, 1.0, 1.25);
"#
    )
}

/// Fade out toward the bottom edge, reaching full strength over the lowest 84%.
const BOTTOM_FADE: &str = r#"
    let from_bottom = 1.0 - st.y / u.u_resolution.y;
    opacity *= clamp(from_bottom / 0.84, 0.0, 1.0);
"#;

/// Complete fragment stage for a reveal running at `animation_speed`.
///
/// The speed is baked into the source with one decimal place, so changing
/// it recompiles the pipeline.
pub fn reveal_fragment_source(animation_speed: f32, show_gradient: bool) -> String {
    DOT_MATRIX_TEMPLATE
        .replace("{{REVEAL}}", &reveal_snippet(animation_speed))
        .replace("{{FADE}}", if show_gradient { BOTTOM_FADE } else { "" })
}

/// Dot matrix fragment stage without the reveal animation.
pub fn dot_matrix_fragment_source() -> String {
    DOT_MATRIX_TEMPLATE
        .replace("{{REVEAL}}", "")
        .replace("{{FADE}}", "")
}
