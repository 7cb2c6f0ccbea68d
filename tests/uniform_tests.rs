//! Integration tests for the dot matrix uniform builder and buffer packing.

use lumen_fx::color::Rgb;
use lumen_fx::uniforms::{
    build_dot_matrix_uniforms, pack, packed_size, UniformShape, UniformTable, UniformValue,
    COLORS, DOT_SIZE, OPACITIES, TOTAL_SIZE,
};

const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);
const BLUE: Rgb = Rgb::new(0, 0, 255);

fn colors_of(table: &UniformTable) -> Vec<[f32; 3]> {
    match table.get(COLORS) {
        Some(UniformValue::Vec3List(colors)) => colors.clone(),
        other => panic!("u_colors missing or wrong shape: {:?}", other),
    }
}

// ==================== Color Expansion ====================

#[test]
fn test_single_color_fills_all_slots() {
    let table = build_dot_matrix_uniforms(&[RED], &[1.0], 4.0, 2.0);
    assert_eq!(colors_of(&table), vec![[1.0, 0.0, 0.0]; 6]);
}

#[test]
fn test_two_colors_split_in_halves() {
    let table = build_dot_matrix_uniforms(&[RED, GREEN], &[1.0], 4.0, 2.0);
    let r = [1.0, 0.0, 0.0];
    let g = [0.0, 1.0, 0.0];
    assert_eq!(colors_of(&table), vec![r, r, r, g, g, g]);
}

#[test]
fn test_three_colors_pair_up() {
    let table = build_dot_matrix_uniforms(&[RED, GREEN, BLUE], &[1.0], 4.0, 2.0);
    let r = [1.0, 0.0, 0.0];
    let g = [0.0, 1.0, 0.0];
    let b = [0.0, 0.0, 1.0];
    assert_eq!(colors_of(&table), vec![r, r, g, g, b, b]);
}

#[test]
fn test_other_counts_fall_back_to_black() {
    for colors in [vec![], vec![RED; 4], vec![GREEN; 7]] {
        let table = build_dot_matrix_uniforms(&colors, &[1.0], 4.0, 2.0);
        assert_eq!(colors_of(&table), vec![[0.0; 3]; 6], "{} colors", colors.len());
    }
}

// ==================== Table Contents ====================

#[test]
fn test_builder_produces_exactly_four_uniforms() {
    let opacities = [0.1, 0.2, 0.3];
    let table = build_dot_matrix_uniforms(&[RED], &opacities, 6.0, 3.0);

    let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec![COLORS, OPACITIES, TOTAL_SIZE, DOT_SIZE]);
    assert_eq!(
        table.get(OPACITIES),
        Some(&UniformValue::FloatList(opacities.to_vec()))
    );
    assert_eq!(table.scalar(TOTAL_SIZE), Some(6.0));
    assert_eq!(table.scalar(DOT_SIZE), Some(3.0));
}

#[test]
fn test_builder_is_deterministic() {
    let a = build_dot_matrix_uniforms(&[RED, BLUE], &[0.3, 0.5], 4.0, 2.0);
    let b = build_dot_matrix_uniforms(&[RED, BLUE], &[0.3, 0.5], 4.0, 2.0);
    assert_eq!(a, b);
    assert_eq!(a.layout(), b.layout());
}

// ==================== Packing ====================

#[test]
fn test_dot_matrix_table_packs_to_expected_size() {
    let opacities = [0.04; 10];
    let table = build_dot_matrix_uniforms(&[RED], &opacities, 4.0, 2.0);
    let packed = pack(&table, 0, 0);

    // 6 * 16 colors + 3 * 16 opacity lanes + two scalars, rounded to 16
    assert_eq!(packed.bytes.len(), 160);
    assert_eq!(packed_size(&packed.layout), packed.bytes.len());
    assert_eq!(packed.layout.0[1].1, UniformShape::FloatList(10));
}

#[test]
fn test_surface_table_declarations() {
    let table = build_dot_matrix_uniforms(&[RED], &[0.5; 5], 4.0, 2.0).prepared_for_surface(
        0.0, 320, 240,
    );
    let packed = pack(&table, 0, 0);

    for field in [
        "u_colors: array<vec3<f32>, 6>,",
        "u_opacities: array<vec4<f32>, 2>,",
        "u_total_size: f32,",
        "u_dot_size: f32,",
        "u_time: f32,",
        "u_resolution: vec2<f32>,",
    ] {
        assert!(packed.declarations.contains(field), "missing {field}");
    }
    assert!(packed.declarations.contains("const u_opacities_len: u32 = 5u;"));
    assert!(packed.declarations.contains("fn u_opacities_at(i: u32) -> f32"));
    assert_eq!(packed_size(&packed.layout), packed.bytes.len());
}

#[test]
fn test_empty_opacity_list_is_omitted() {
    let table = build_dot_matrix_uniforms(&[RED], &[], 4.0, 2.0);
    let packed = pack(&table, 0, 0);

    // No struct field, but the accessors the shader reads remain
    assert!(!packed.declarations.contains("u_opacities: array"));
    assert!(packed.declarations.contains("const u_opacities_len: u32 = 0u;"));
    assert_eq!(packed.layout.0.len(), 3);
    assert_eq!(packed_size(&packed.layout), packed.bytes.len());
}
