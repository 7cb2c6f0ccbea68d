//! Packing uniform tables into GPU buffers.
//!
//! Follows the WGSL uniform address space layout:
//! - `f32` aligns to 4, `vec2<f32>` to 8, `vec3<f32>` to 16
//! - `array<vec3<f32>, N>` has a 16 byte stride
//! - float lists are packed four to a `vec4<f32>` since uniform arrays
//!   need a 16 byte stride; a `<name>_at(i)` accessor is generated for them
//!
//! The buffer is padded to a multiple of 16 bytes.

use super::table::{UniformLayout, UniformShape, UniformTable, UniformValue};
use std::fmt::Write;

/// Packed bytes plus the matching WGSL declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedUniforms {
    pub bytes: Vec<u8>,
    /// `struct Uniforms`, the `u` binding, and list accessors.
    pub declarations: String,
    /// Layout of the entries that were actually packed.
    pub layout: UniformLayout,
}

/// Pack `table` for binding at `@group(group) @binding(binding)`.
///
/// Empty lists have no WGSL representation; they are logged and left out.
pub fn pack(table: &UniformTable, group: u32, binding: u32) -> PackedUniforms {
    PackedUniforms {
        bytes: pack_bytes(table),
        declarations: wgsl_declarations(table, group, binding),
        layout: packed_layout(table),
    }
}

/// Layout of the entries [`pack`] keeps.
pub fn packed_layout(table: &UniformTable) -> UniformLayout {
    UniformLayout(
        packable(table)
            .map(|(name, value)| (name.to_string(), value.shape()))
            .collect(),
    )
}

/// Buffer contents only, for per-frame rewrites of an unchanged layout.
pub fn pack_bytes(table: &UniformTable) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::new();

    for (_, value) in packable(table) {
        match value {
            UniformValue::Scalar(v) => {
                pad_to(&mut bytes, 4);
                bytes.extend_from_slice(bytemuck::bytes_of(v));
            }
            UniformValue::Vec2(v) => {
                pad_to(&mut bytes, 8);
                bytes.extend_from_slice(bytemuck::cast_slice(v));
            }
            UniformValue::Vec3(v) => {
                pad_to(&mut bytes, 16);
                bytes.extend_from_slice(bytemuck::cast_slice(v));
            }
            UniformValue::Vec3List(list) => {
                pad_to(&mut bytes, 16);
                for v in list {
                    bytes.extend_from_slice(bytemuck::cast_slice(v));
                    bytes.extend_from_slice(&[0u8; 4]);
                }
            }
            UniformValue::FloatList(list) => {
                pad_to(&mut bytes, 16);
                let mut lanes = vec![0.0f32; list.len().div_ceil(4) * 4];
                lanes[..list.len()].copy_from_slice(list);
                bytes.extend_from_slice(bytemuck::cast_slice(&lanes));
            }
        }
    }

    pad_to(&mut bytes, 16);
    if bytes.is_empty() {
        bytes.resize(16, 0);
    }
    bytes
}

/// WGSL `struct Uniforms`, its `var<uniform> u` binding, and float list accessors.
pub fn wgsl_declarations(table: &UniformTable, group: u32, binding: u32) -> String {
    let mut fields = String::new();
    let mut helpers = String::new();

    for (name, value) in table.iter() {
        if is_empty_list(value) {
            log::warn!("Skipping uniform {name}: empty list has no WGSL layout");
            if let UniformValue::FloatList(_) = value {
                // Accessors stay defined so shaders reading the list still compile
                let _ = writeln!(helpers, "const {name}_len: u32 = 0u;");
                let _ = writeln!(helpers, "fn {name}_at(i: u32) -> f32 {{\n    return 0.0;\n}}");
            }
            continue;
        }
        let _ = match value {
            UniformValue::Scalar(_) => writeln!(fields, "    {name}: f32,"),
            UniformValue::Vec2(_) => writeln!(fields, "    {name}: vec2<f32>,"),
            UniformValue::Vec3(_) => writeln!(fields, "    {name}: vec3<f32>,"),
            UniformValue::Vec3List(list) => {
                writeln!(fields, "    {name}: array<vec3<f32>, {}>,", list.len())
            }
            UniformValue::FloatList(list) => {
                let _ = writeln!(helpers, "const {name}_len: u32 = {}u;", list.len());
                let _ = writeln!(
                    helpers,
                    "fn {name}_at(i: u32) -> f32 {{\n    return u.{name}[i / 4u][i % 4u];\n}}"
                );
                writeln!(
                    fields,
                    "    {name}: array<vec4<f32>, {}>,",
                    list.len().div_ceil(4)
                )
            }
        };
    }

    let mut declarations = String::new();
    let _ = writeln!(declarations, "struct Uniforms {{\n{fields}}}\n");
    let _ = writeln!(
        declarations,
        "@group({group}) @binding({binding}) var<uniform> u: Uniforms;\n"
    );
    declarations.push_str(&helpers);
    declarations
}

/// Byte size a packed table of `layout` occupies.
pub fn packed_size(layout: &UniformLayout) -> usize {
    let mut offset = 0usize;
    for (_, shape) in &layout.0 {
        let (align, size) = match shape {
            UniformShape::Scalar => (4, 4),
            UniformShape::Vec2 => (8, 8),
            UniformShape::Vec3 => (16, 12),
            UniformShape::Vec3List(n) => (16, 16 * n),
            UniformShape::FloatList(n) => (16, 16 * n.div_ceil(4)),
        };
        offset = offset.next_multiple_of(align) + size;
    }
    offset.next_multiple_of(16).max(16)
}

fn is_empty_list(value: &UniformValue) -> bool {
    match value {
        UniformValue::Vec3List(list) => list.is_empty(),
        UniformValue::FloatList(list) => list.is_empty(),
        _ => false,
    }
}

fn packable(table: &UniformTable) -> impl Iterator<Item = (&str, &UniformValue)> {
    table.iter().filter(|(_, value)| !is_empty_list(value))
}

fn pad_to(bytes: &mut Vec<u8>, align: usize) {
    let padded = bytes.len().next_multiple_of(align);
    bytes.resize(padded, 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn test_scalar_then_vec3_aligns_to_16() {
        let table = UniformTable::new()
            .with("a", UniformValue::Scalar(1.0))
            .with("b", UniformValue::Vec3([2.0, 3.0, 4.0]));
        let packed = pack(&table, 0, 0);

        assert_eq!(packed.bytes.len(), 32);
        let f = floats(&packed.bytes);
        assert_eq!(f[0], 1.0);
        assert_eq!(&f[4..7], &[2.0, 3.0, 4.0]);
        assert_eq!(packed.bytes.len(), packed_size(&packed.layout));
    }

    #[test]
    fn test_vec3_list_uses_16_byte_stride() {
        let table = UniformTable::new()
            .with("c", UniformValue::Vec3List(vec![[1.0, 1.0, 1.0], [0.5, 0.5, 0.5]]));
        let packed = pack(&table, 0, 0);

        let f = floats(&packed.bytes);
        assert_eq!(f.len(), 8);
        assert_eq!(&f[4..7], &[0.5, 0.5, 0.5]);
        assert!(packed.declarations.contains("c: array<vec3<f32>, 2>,"));
    }

    #[test]
    fn test_float_list_packs_into_vec4_lanes() {
        let opacities: Vec<f32> = (0..10).map(|i| i as f32 / 10.0).collect();
        let table = UniformTable::new().with("o", UniformValue::FloatList(opacities.clone()));
        let packed = pack(&table, 0, 1);

        let f = floats(&packed.bytes);
        assert_eq!(f.len(), 12);
        assert_eq!(&f[..10], opacities.as_slice());
        assert!(packed.declarations.contains("o: array<vec4<f32>, 3>,"));
        assert!(packed.declarations.contains("const o_len: u32 = 10u;"));
        assert!(packed.declarations.contains("fn o_at(i: u32) -> f32"));
        assert!(packed
            .declarations
            .contains("@group(0) @binding(1) var<uniform> u: Uniforms;"));
    }

    #[test]
    fn test_empty_lists_are_omitted() {
        let table = UniformTable::new()
            .with("empty", UniformValue::FloatList(vec![]))
            .with("t", UniformValue::Scalar(0.0));
        let packed = pack(&table, 0, 0);

        assert_eq!(packed.layout.0.len(), 1);
        assert_eq!(packed.layout.0[0].0, "t");
        assert!(!packed.declarations.contains("empty: array"));
        assert!(packed.declarations.contains("const empty_len: u32 = 0u;"));
        assert!(packed.declarations.contains("fn empty_at(i: u32) -> f32"));
    }

    #[test]
    fn test_vec2_after_scalar_aligns_to_8() {
        let table = UniformTable::new()
            .with("t", UniformValue::Scalar(7.0))
            .with("r", UniformValue::Vec2([100.0, 50.0]));
        let bytes = pack_bytes(&table);

        let f = floats(&bytes);
        assert_eq!(f[0], 7.0);
        assert_eq!(&f[2..4], &[100.0, 50.0]);
        assert_eq!(bytes.len(), 16);
    }
}
