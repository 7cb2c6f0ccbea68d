//! Full-viewport quad shader assembly.

/// Pass-through vertex stage for a two-triangle quad spanning clip space.
///
/// Outputs `frag_coord` in `u_resolution` pixel space with the origin at
/// the top-left corner. Fragment sources receive it as `in.frag_coord`
/// and must define `fs_main(in: VertexOutput) -> @location(0) vec4<f32>`.
pub const VERTEX_STAGE: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) frag_coord: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
    );
    let p = corners[index];

    var out: VertexOutput;
    out.position = vec4<f32>(p, 0.0, 1.0);
    var coord = (p + vec2<f32>(1.0, 1.0)) * 0.5 * u.u_resolution;
    coord.y = u.u_resolution.y - coord.y;
    out.frag_coord = coord;
    return out;
}
"#;

/// Vertices drawn per quad.
pub const QUAD_VERTEX_COUNT: u32 = 6;

/// Join uniform declarations, the vertex stage and a fragment source into one module.
pub fn compose_shader(declarations: &str, fragment_source: &str) -> String {
    let mut source =
        String::with_capacity(declarations.len() + VERTEX_STAGE.len() + fragment_source.len() + 2);
    source.push_str(declarations);
    source.push_str(VERTEX_STAGE);
    source.push('\n');
    source.push_str(fragment_source);
    source
}
