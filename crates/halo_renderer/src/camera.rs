//! Camera for ray generation.

use halo_math::{random_in_unit_disk, unit, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// The seven parameters a camera is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position
    pub look_from: Point3,
    /// Point the camera aims at
    pub look_at: Point3,
    /// World "up", used to roll the camera
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vertical_fov_degrees: f64,
    /// Image width / height
    pub aspect_ratio: f64,
    /// Lens diameter; 0 disables depth of field
    pub aperture: f64,
    /// Distance from camera to plane of perfect focus
    pub focus_distance: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: Point3::new(13.0, 2.0, 3.0),
            look_at: Point3::ZERO,
            up: Vec3::Y,
            vertical_fov_degrees: 20.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.1,
            focus_distance: 10.0,
        }
    }
}

impl CameraConfig {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, up: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.up = up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vertical_fov_degrees: f64, aperture: f64, focus_distance: f64) -> Self {
        self.vertical_fov_degrees = vertical_fov_degrees;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    /// Set the image aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
}

/// Camera for generating rays into the scene.
///
/// All derived values are computed once in [`Camera::new`].
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Build the camera basis and viewport from its configuration.
    pub fn new(config: &CameraConfig) -> Self {
        let theta = config.vertical_fov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        // Orthonormal basis, w points backwards out of the lens
        let w = unit(config.look_from - config.look_at);
        let u = unit(config.up.cross(w));
        let v = w.cross(u);

        let origin = config.look_from;
        let horizontal = config.focus_distance * viewport_width * u;
        let vertical = config.focus_distance * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - config.focus_distance * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Generate a ray through fractional image-plane coordinates.
    ///
    /// `(0, 0)` is the lower-left corner of the viewport and `(1, 1)` the
    /// upper-right. The origin is jittered across the lens for depth of field.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let direction = self.lower_left_corner + s * self.horizontal + t * self.vertical
            - self.origin
            - offset;

        Ray::new(self.origin + offset, direction)
    }
}
