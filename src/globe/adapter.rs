use super::{build_globe_points, ArcPosition, GlobeConfig, GlobePoint};
use crate::color::{parse_hex_rgb, Rgb};
use std::rc::Rc;

pub const HEX_POLYGON_RESOLUTION: u32 = 3;
pub const HEX_POLYGON_MARGIN: f64 = 0.7;

/// Static display settings pushed to the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeDisplay {
    pub hex_polygon_resolution: u32,
    pub hex_polygon_margin: f64,
    pub show_atmosphere: bool,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f64,
    pub polygon_color: String,
}

impl GlobeDisplay {
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            hex_polygon_resolution: HEX_POLYGON_RESOLUTION,
            hex_polygon_margin: HEX_POLYGON_MARGIN,
            show_atmosphere: config.show_atmosphere,
            atmosphere_color: config.atmosphere_color.clone(),
            atmosphere_altitude: config.atmosphere_altitude,
            polygon_color: config.polygon_color.clone(),
        }
    }
}

/// Base material of the globe sphere, channels in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeMaterial {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl GlobeMaterial {
    pub fn from_config(config: &GlobeConfig) -> Self {
        Self {
            color: material_color(&config.globe_color),
            emissive: material_color(&config.emissive),
            emissive_intensity: config.emissive_intensity as f32,
        }
    }
}

fn material_color(hex: &str) -> [f32; 3] {
    parse_hex_rgb(hex)
        .unwrap_or_else(|| {
            log::warn!("Invalid globe color {hex:?}, using black");
            Rgb::BLACK
        })
        .normalized()
}

/// The globe object being driven.
pub trait GlobeTarget {
    fn set_points(&mut self, points: &[GlobePoint]);
    fn apply_display(&mut self, display: &GlobeDisplay);
    fn apply_material(&mut self, material: &GlobeMaterial);
}

/// What a [`GlobeAdapter::sync`] call pushed to the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub points_rebuilt: bool,
    pub display_applied: bool,
    pub material_applied: bool,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Keeps a [`GlobeTarget`] in step with arc data and configuration.
///
/// Inputs are compared by `Rc` identity: passing the same allocation again
/// is a no-op, while a new allocation with equal contents still triggers
/// the corresponding update.
#[derive(Debug, Default)]
pub struct GlobeAdapter {
    arcs: Option<Rc<[ArcPosition]>>,
    config: Option<Rc<GlobeConfig>>,
    point_size: Option<f64>,
    points: Option<Vec<GlobePoint>>,
}

impl GlobeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync<T: GlobeTarget + ?Sized>(
        &mut self,
        arcs: &Rc<[ArcPosition]>,
        config: &Rc<GlobeConfig>,
        target: &mut T,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        let arcs_changed = !matches!(&self.arcs, Some(prev) if Rc::ptr_eq(prev, arcs));
        let size_changed = self.point_size != Some(config.point_size);
        let config_changed = !matches!(&self.config, Some(prev) if Rc::ptr_eq(prev, config));
        let first_points = self.points.is_none();

        if arcs_changed || size_changed {
            let points = build_globe_points(arcs, config.point_size);
            log::debug!("Rebuilt {} globe points from {} arcs", points.len(), arcs.len());
            target.set_points(&points);
            self.points = Some(points);
            self.arcs = Some(arcs.clone());
            self.point_size = Some(config.point_size);
            report.points_rebuilt = true;
        }

        if config_changed {
            target.apply_material(&GlobeMaterial::from_config(config));
            report.material_applied = true;
        }

        if config_changed || first_points {
            target.apply_display(&GlobeDisplay::from_config(config));
            report.display_applied = true;
        }

        self.config = Some(config.clone());
        report
    }

    /// Points from the last rebuild. `None` before the first sync.
    pub fn points(&self) -> Option<&[GlobePoint]> {
        self.points.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingGlobe {
        points: Vec<GlobePoint>,
        displays: usize,
        materials: Vec<GlobeMaterial>,
    }

    impl GlobeTarget for RecordingGlobe {
        fn set_points(&mut self, points: &[GlobePoint]) {
            self.points = points.to_vec();
        }

        fn apply_display(&mut self, _display: &GlobeDisplay) {
            self.displays += 1;
        }

        fn apply_material(&mut self, material: &GlobeMaterial) {
            self.materials.push(*material);
        }
    }

    #[test]
    fn test_material_from_default_config() {
        let material = GlobeMaterial::from_config(&GlobeConfig::default());
        assert_eq!(material.color, Rgb::new(0x1d, 0x07, 0x2e).normalized());
        assert_eq!(material.emissive, [0.0, 0.0, 0.0]);
        assert!((material.emissive_intensity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_material_color_falls_back_to_black() {
        let config = GlobeConfig {
            globe_color: "blue".to_string(),
            ..Default::default()
        };
        assert_eq!(GlobeMaterial::from_config(&config).color, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_display_uses_fixed_hex_settings() {
        let display = GlobeDisplay::from_config(&GlobeConfig::default());
        assert_eq!(display.hex_polygon_resolution, 3);
        assert_eq!(display.hex_polygon_margin, 0.7);
        assert_eq!(display.polygon_color, "rgba(255,255,255,0.7)");
    }

    #[test]
    fn test_same_inputs_are_noop() {
        let arcs: Rc<[ArcPosition]> = Rc::from(Vec::new());
        let config = Rc::new(GlobeConfig::default());
        let mut globe = RecordingGlobe::default();
        let mut adapter = GlobeAdapter::new();

        let first = adapter.sync(&arcs, &config, &mut globe);
        assert!(first.points_rebuilt && first.display_applied && first.material_applied);

        assert!(adapter.sync(&arcs, &config, &mut globe).is_noop());
        assert_eq!(globe.displays, 1);
        assert_eq!(globe.materials.len(), 1);
    }
}
