//! Optics helpers on top of glam's vector algebra.

use crate::Vec3;

/// Scale a vector to unit length.
///
/// A zero vector has no direction; callers must not pass one. Debug builds
/// assert on it, release builds produce non-finite components.
#[inline]
pub fn unit(v: Vec3) -> Vec3 {
    let length = v.length();
    debug_assert!(length > 0.0, "cannot normalize a zero-length vector");
    v / length
}

/// Reflect a vector about a normal.
///
/// `v - 2 * dot(v, n) * n`. The normal is expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface (Snell's law).
///
/// `v` is normalized first. `eta_ratio` is the ratio of refractive indices
/// `eta_incident / eta_transmitted`. The perpendicular radicand is clamped to
/// zero; callers are still expected to handle total internal reflection
/// before refracting.
#[inline]
pub fn refract(v: Vec3, n: Vec3, eta_ratio: f64) -> Vec3 {
    let unit_v = unit(v);
    let cos_theta = (-unit_v).dot(n);
    let parallel = eta_ratio * (unit_v + cos_theta * n);
    let perpendicular = -(1.0 - parallel.length_squared()).max(0.0).sqrt() * n;
    parallel + perpendicular
}
