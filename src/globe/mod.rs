//! Globe point data.
//!
//! Turns a list of arcs into the point set the external globe renders and
//! keeps that globe's display and material in step with a [`GlobeConfig`].

mod adapter;
mod world;

pub use adapter::{
    GlobeAdapter, GlobeDisplay, GlobeMaterial, GlobeTarget, SyncReport, HEX_POLYGON_MARGIN,
    HEX_POLYGON_RESOLUTION,
};
pub use world::{AutoRotate, CameraSettings, WorldSettings};

use crate::color::{parse_hex_rgb, Rgb};
use serde::{Deserialize, Serialize};

/// One arc between two points on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcPosition {
    pub order: u32,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub arc_alt: f64,
    /// Six digit hex color, `#` optional.
    pub color: String,
}

/// Color that fades out over an arc's travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFade {
    pub rgb: Rgb,
}

impl ColorFade {
    pub fn new(rgb: Rgb) -> Self {
        Self { rgb }
    }

    /// CSS color at progress `t`, fully opaque at 0 and transparent at 1.
    pub fn at(&self, t: f64) -> String {
        let t = t.clamp(0.0, 1.0);
        self.rgb.css_rgba(1.0 - t)
    }
}

/// A point rendered at one end of an arc.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobePoint {
    pub lat: f64,
    pub lng: f64,
    pub size: f64,
    pub order: u32,
    pub color: ColorFade,
}

/// Build the start and end points of every arc, in arc order.
///
/// Arcs whose color does not parse are left out.
pub fn build_globe_points(arcs: &[ArcPosition], point_size: f64) -> Vec<GlobePoint> {
    arcs.iter()
        .filter_map(|arc| match parse_hex_rgb(&arc.color) {
            Some(rgb) => Some((arc, ColorFade::new(rgb))),
            None => {
                log::warn!("Dropping arc {} with color {:?}", arc.order, arc.color);
                None
            }
        })
        .flat_map(|(arc, color)| {
            [
                GlobePoint {
                    lat: arc.start_lat,
                    lng: arc.start_lng,
                    size: point_size,
                    order: arc.order,
                    color,
                },
                GlobePoint {
                    lat: arc.end_lat,
                    lng: arc.end_lng,
                    size: point_size,
                    order: arc.order,
                    color,
                },
            ]
        })
        .collect()
}

/// Appearance of the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobeConfig {
    pub point_size: f64,
    pub globe_color: String,
    pub show_atmosphere: bool,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f64,
    pub emissive: String,
    pub emissive_intensity: f64,
    pub shininess: f64,
    pub polygon_color: String,
    /// Arc animation period in milliseconds.
    pub arc_time: f64,
    pub arc_length: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            globe_color: "#1d072e".to_string(),
            show_atmosphere: true,
            atmosphere_color: "#ffffff".to_string(),
            atmosphere_altitude: 0.1,
            emissive: "#000000".to_string(),
            emissive_intensity: 0.1,
            shininess: 0.9,
            polygon_color: "rgba(255,255,255,0.7)".to_string(),
            arc_time: 2000.0,
            arc_length: 0.9,
        }
    }
}
