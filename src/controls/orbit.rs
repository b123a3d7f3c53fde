//! Orbit controls for rotating camera around a target.

use crate::camera::PerspectiveCamera;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Orbit controls allowing camera rotation around a target point.
///
/// Input accumulates between frames. With damping on, each `update` applies
/// `damping_factor` of the pending rotation and pan and keeps the rest, so the
/// camera eases to a stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitControls {
    /// Target point to orbit around.
    pub target: Vec3,
    /// Minimum distance from target.
    pub min_distance: f32,
    /// Maximum distance from target.
    pub max_distance: f32,
    /// Enable rotation.
    pub enable_rotate: bool,
    /// Enable panning.
    pub enable_pan: bool,
    /// Enable zooming.
    pub enable_zoom: bool,
    /// Rotation speed multiplier.
    pub rotate_speed: f32,
    /// Pan speed multiplier.
    pub pan_speed: f32,
    /// Zoom speed multiplier.
    pub zoom_speed: f32,
    /// Enable damping (smooth movement).
    pub enable_damping: bool,
    /// Share of pending motion applied per frame.
    pub damping_factor: f32,
    // Internal state
    #[serde(skip)]
    spherical_delta: SphericalDelta,
    #[serde(skip)]
    pan_offset: Vec3,
    #[serde(skip, default = "unit_scale")]
    scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

/// Delta for spherical movement.
#[derive(Debug, Clone, Copy, Default)]
struct SphericalDelta {
    theta: f32,
    phi: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 2.0,
            max_distance: 20.0,
            enable_rotate: true,
            enable_pan: true,
            enable_zoom: true,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            enable_damping: true,
            damping_factor: 0.05,
            spherical_delta: SphericalDelta::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Create new orbit controls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate the camera by delta angles (in radians).
    pub fn rotate(&mut self, delta_theta: f32, delta_phi: f32) {
        if self.enable_rotate {
            // Inverted for natural "grab and drag" feel
            self.spherical_delta.theta -= delta_theta * self.rotate_speed;
            self.spherical_delta.phi += delta_phi * self.rotate_speed;
        }
    }

    /// Rotate based on pointer movement in pixels.
    pub fn rotate_by_pixels(&mut self, delta_x: f32, delta_y: f32) {
        // About 0.2 degrees per pixel
        let rotate_scale = 0.004;
        self.rotate(delta_x * rotate_scale, delta_y * rotate_scale);
    }

    /// Pan the target in the camera's view plane.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32, camera: &PerspectiveCamera) {
        if !self.enable_pan {
            return;
        }

        // Half of the fov is center to top of screen
        let target_distance = camera.distance() * (camera.fov.to_radians() / 2.0).tan();
        let pan_x = delta_x * target_distance * self.pan_speed * 0.002;
        let pan_y = delta_y * target_distance * self.pan_speed * 0.002;

        let forward = camera.forward();
        let right = camera.right();
        let up = right.cross(forward);

        self.pan_offset += right * -pan_x + up * pan_y;
    }

    /// Zoom in (positive) or out (negative).
    pub fn zoom(&mut self, delta: f32) {
        if self.enable_zoom {
            if delta > 0.0 {
                self.scale /= 1.0 + delta * self.zoom_speed * 0.1;
            } else {
                self.scale *= 1.0 - delta * self.zoom_speed * 0.1;
            }
        }
    }

    /// Zoom by mouse wheel delta.
    pub fn zoom_by_wheel(&mut self, delta: f32) {
        // Scroll up (negative delta) zooms in
        self.zoom(-delta * 0.01);
    }

    /// Move the camera according to pending input.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let radius = offset.length().max(f32::EPSILON);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).asin();

        let step = if self.enable_damping {
            self.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        theta += self.spherical_delta.theta * step;
        phi += self.spherical_delta.phi * step;
        self.target += self.pan_offset * step;

        let keep = 1.0 - step;
        self.spherical_delta.theta *= keep;
        self.spherical_delta.phi *= keep;
        self.pan_offset *= keep;

        // Stay clear of the poles
        phi = phi.clamp(-FRAC_PI_2 + 0.1, FRAC_PI_2 - 0.1);

        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.scale = 1.0;

        let new_offset = Vec3::new(
            radius * phi.cos() * theta.sin(),
            radius * phi.sin(),
            radius * phi.cos() * theta.cos(),
        );

        camera.set_position(self.target + new_offset);
        camera.look_at(self.target);
    }

    /// Drop pending input.
    pub fn reset(&mut self) {
        self.spherical_delta = SphericalDelta::default();
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }
}
