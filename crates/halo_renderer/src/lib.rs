//! Halo renderer - CPU path tracing
//!
//! A recursive Monte Carlo path tracer over a flat list of spheres lit by a
//! sky gradient. Rays leave the camera, scatter off matte, metal and glass
//! surfaces, and the averaged radiance of many jittered samples becomes the
//! pixel color.

pub mod color;
mod camera;
mod hittable;
pub mod image_io;
mod material;
mod renderer;
mod sphere;

pub use camera::{Camera, CameraConfig};
pub use color::Color;
pub use hittable::{HitRecord, Hittable, HittableCollection};
pub use image_io::{save, save_png, write_ppm, ImageIoError};
pub use material::{Dielectric, Material, Matte, Metal, Scatter};
pub use renderer::{
    ray_color, render, render_pixel, render_with_progress, sky_gradient, ImageBuffer,
    RenderConfig, T_MIN,
};
pub use sphere::Sphere;

/// Re-export the math types the public API is built on
pub use halo_math::{Interval, Point3, Ray, Vec3};
