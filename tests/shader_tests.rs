//! CPU-side validation of the composed WGSL modules.
//!
//! Parses and validates the exact source a surface would compile, so shader
//! regressions surface without a GPU adapter.

use lumen_fx::color::Rgb;
use lumen_fx::reveal::{dot_matrix_fragment_source, RevealConfig};
use lumen_fx::surface::compose_shader;
use lumen_fx::uniforms::{wgsl_declarations, UniformTable};

const VERTICAL_RAMP: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let v = in.frag_coord.y / u.u_resolution.y;
    return vec4<f32>(v, v, v, 1.0);
}
"#;

fn surface_module(uniforms: &UniformTable, fragment_source: &str) -> String {
    let prepared = uniforms.prepared_for_surface(0.0, 320, 240);
    compose_shader(&wgsl_declarations(&prepared, 0, 0), fragment_source)
}

fn validate(source: &str) {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(module) => module,
        Err(e) => panic!("WGSL parse failed:\n{}", e.emit_to_string(source)),
    };
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!("WGSL validation failed: {e:?}\n{source}");
    }
}

fn reveal_module(config: &RevealConfig) -> String {
    surface_module(&config.dot_matrix().uniforms(), &config.fragment_source())
}

// ==================== Reveal Effect ====================

#[test]
fn test_default_reveal_validates() {
    validate(&reveal_module(&RevealConfig::default()));
}

#[test]
fn test_reveal_without_gradient_validates() {
    validate(&reveal_module(&RevealConfig {
        show_gradient: false,
        animation_speed: 3.0,
        ..Default::default()
    }));
}

#[test]
fn test_reveal_with_empty_opacities_validates() {
    validate(&reveal_module(&RevealConfig {
        opacities: vec![],
        ..Default::default()
    }));
}

#[test]
fn test_reveal_with_single_opacity_validates() {
    validate(&reveal_module(&RevealConfig {
        opacities: vec![1.0],
        colors: vec![Rgb::new(236, 72, 153), Rgb::new(232, 121, 249)],
        ..Default::default()
    }));
}

#[test]
fn test_empty_opacities_loaded_from_json_validate() {
    let config: RevealConfig = serde_json::from_str(r#"{"opacities": []}"#).unwrap();
    validate(&reveal_module(&config));
}

// ==================== Other Fragment Stages ====================

#[test]
fn test_plain_dot_matrix_validates() {
    let config = RevealConfig::default();
    validate(&surface_module(
        &config.dot_matrix().uniforms(),
        &dot_matrix_fragment_source(),
    ));
}

#[test]
fn test_frame_uniforms_alone_validate() {
    validate(&surface_module(&UniformTable::new(), VERTICAL_RAMP));
}
