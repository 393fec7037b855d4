//! Halo math - vector algebra, rays and sampling for the Halo path tracer.
//!
//! Vectors are `glam::DVec3`; this crate adds the optics helpers
//! (`reflect`, `refract`) and the random sampling routines the renderer
//! needs on top of glam's operators.

// Re-export glam for convenience
pub use glam::DVec3;

mod interval;
mod random;
mod ray;
mod vector;

pub use interval::Interval;
pub use random::{
    random_f64, random_in_hemisphere, random_in_unit_ball, random_in_unit_disk, random_range,
    random_unit_vector, random_vec3,
};
pub use ray::Ray;
pub use vector::{reflect, refract, unit};

/// Three `f64` components used as a direction.
pub type Vec3 = DVec3;

/// Three `f64` components used as a position.
pub type Point3 = DVec3;
