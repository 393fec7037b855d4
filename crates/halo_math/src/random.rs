//! Random sampling used by the camera and materials.
//!
//! Every function takes the generator explicitly so renders can be seeded
//! and so parallel workers never share a random source.

use std::f64::consts::PI;

use rand::{Rng, RngCore};

use crate::{Point3, Vec3};

/// Uniform sample in [0, 1).
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform sample in [min, max).
#[inline]
pub fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

/// Uniform point on the unit sphere.
///
/// Archimedes' hat-box theorem: a uniform height `z` and a uniform angle
/// around the axis give a uniform distribution over the surface.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let a = random_range(rng, 0.0, 2.0 * PI);
    let z = random_range(rng, -1.0, 1.0);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}

/// Uniform point strictly inside the unit ball, by rejection.
pub fn random_in_unit_ball(rng: &mut dyn RngCore) -> Point3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Point inside the unit ball on the same side as `normal`.
pub fn random_in_hemisphere(rng: &mut dyn RngCore, normal: Vec3) -> Point3 {
    let in_ball = random_in_unit_ball(rng);
    if in_ball.dot(normal) > 0.0 {
        in_ball
    } else {
        -in_ball
    }
}

/// Uniform point strictly inside the unit disk in the z = 0 plane, by rejection.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Point3 {
    loop {
        let p = Point3::new(random_range(rng, -1.0, 1.0), random_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
