//! Camera and scene settings around the globe.

use std::f64::consts::TAU;

/// Seconds per full orbit at an auto-rotate speed of 1.
const ORBIT_SECS_AT_UNIT_SPEED: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_y_deg: 50.0,
            aspect: 1.2,
            near: 180.0,
            far: 1800.0,
        }
    }
}

impl CameraSettings {
    /// Column-major right-handed projection with depth in [0, 1].
    pub fn projection(&self) -> [[f32; 4]; 4] {
        let f = 1.0 / (0.5 * self.fov_y_deg.to_radians()).tan();
        let m22 = (self.far / (self.near - self.far)) as f32;
        let m23 = ((self.near * self.far) / (self.near - self.far)) as f32;

        [
            [(f / self.aspect) as f32, 0.0, 0.0, 0.0],
            [0.0, f as f32, 0.0, 0.0],
            [0.0, 0.0, m22, -1.0],
            [0.0, 0.0, m23, 0.0],
        ]
    }
}

/// Renderer and orbit control settings for the globe scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    pub camera: CameraSettings,
    pub clear_color: wgpu::Color,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f64,
    pub enable_pan: bool,
    pub enable_zoom: bool,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            // 0xffaaff, fully transparent
            clear_color: wgpu::Color {
                r: 1.0,
                g: 170.0 / 255.0,
                b: 1.0,
                a: 0.0,
            },
            auto_rotate: true,
            auto_rotate_speed: 1.0,
            enable_pan: false,
            enable_zoom: false,
        }
    }
}

impl WorldSettings {
    pub fn auto_rotate(&self) -> Option<AutoRotate> {
        self.auto_rotate
            .then(|| AutoRotate::new(self.auto_rotate_speed))
    }
}

/// Yaw angle advanced from frame ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRotate {
    speed: f64,
    yaw_rad: f64,
    last_elapsed: Option<f64>,
}

impl AutoRotate {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            yaw_rad: 0.0,
            last_elapsed: None,
        }
    }

    /// Angular velocity in radians per second.
    pub fn rate(&self) -> f64 {
        TAU / ORBIT_SECS_AT_UNIT_SPEED * self.speed
    }

    /// Advance to `elapsed` seconds and return the yaw, wrapped to [0, 2π).
    pub fn update(&mut self, elapsed: f64) -> f64 {
        if let Some(last) = self.last_elapsed {
            let dt = (elapsed - last).max(0.0);
            self.yaw_rad = (self.yaw_rad + self.rate() * dt).rem_euclid(TAU);
        }
        self.last_elapsed = Some(elapsed);
        self.yaw_rad
    }

    pub fn yaw_rad(&self) -> f64 {
        self.yaw_rad
    }
}
