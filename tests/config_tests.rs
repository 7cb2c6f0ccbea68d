//! Integration tests for loading page configuration from disk.

use lumen_fx::color::Rgb;
use lumen_fx::nav::FloatingNav;
use lumen_fx::{ConfigError, SceneConfig};
use std::io::Write;

const SCENE: &str = r##"{
    "reveal": {
        "animationSpeed": 3,
        "colors": [[236, 72, 153], [232, 121, 249]],
        "dotSize": 2,
        "showGradient": false
    },
    "globe": {
        "pointSize": 4,
        "globeColor": "#062056",
        "atmosphereAltitude": 0.1
    },
    "arcs": [
        {"order": 1, "startLat": -19.88, "startLng": -43.95, "endLat": -22.90,
         "endLng": -43.17, "arcAlt": 0.1, "color": "#06b6d4"}
    ],
    "navItems": [
        {"name": "About", "link": "#about"},
        {"name": "Projects", "link": "#projects"}
    ]
}"##;

#[test]
fn test_load_scene_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENE.as_bytes()).unwrap();

    let scene = SceneConfig::load(file.path()).unwrap();

    assert_eq!(scene.reveal.animation_speed, 3.0);
    assert_eq!(
        scene.reveal.colors,
        vec![Rgb::new(236, 72, 153), Rgb::new(232, 121, 249)]
    );
    assert!(!scene.reveal.show_gradient);
    // Unspecified fields keep their defaults
    assert_eq!(scene.reveal.opacities.len(), 10);

    assert_eq!(scene.globe.point_size, 4.0);
    assert_eq!(scene.globe.globe_color, "#062056");
    assert_eq!(scene.globe.emissive, "#000000");

    assert_eq!(scene.arcs.len(), 1);
    let nav = FloatingNav::new(scene.nav_items);
    assert_eq!(nav.items().len(), 2);
}

#[test]
fn test_reveal_config_feeds_fragment_source() {
    let scene = SceneConfig::from_json_str(SCENE).unwrap();
    let source = scene.reveal.fragment_source();
    assert!(source.contains("let animation_speed_factor = 3.0;"));
    assert!(!source.contains("from_bottom"));
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    std::fs::write(&path, "{\"reveal\": {\"dotSize\": \"big\"}}").unwrap();

    assert!(matches!(SceneConfig::load(&path), Err(ConfigError::Json(_))));
}
