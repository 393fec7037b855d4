//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use halo_math::{Interval, Point3, Ray};

/// A sphere primitive.
///
/// The material is shared with every other object that uses it.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. The radius is expected to be positive.
    pub fn new(center: Point3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 || a <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Matte};
    use halo_math::Vec3;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Material::Matte(Matte::new(Color::splat(0.5)))),
        )
    }

    fn forward() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, forward()).expect("ray should hit");
        assert!((rec.t - 4.0).abs() < 1e-9);
        assert!(rec.normal.abs_diff_eq(Vec3::Z, 1e-9));
        assert!(rec.front_face);
        assert!(rec.point.abs_diff_eq(Vec3::Z, 1e-9));
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, forward()).expect("ray should hit");
        assert!((rec.t - 1.0).abs() < 1e-9);
        assert!(!rec.front_face);
        // Outward normal at (0, 0, -1) is -Z; the stored normal faces the ray
        assert!(rec.normal.abs_diff_eq(Vec3::Z, 1e-9));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_tangent_is_miss() {
        let sphere = unit_sphere();

        // Discriminant is exactly zero
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_behind_ray() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);

        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_falls_back_to_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        // Near root (t = 4) excluded, far root (t = 6) accepted
        let rec = sphere
            .hit(&ray, Interval::new(4.5, f64::INFINITY))
            .expect("far side should hit");
        assert!((rec.t - 6.0).abs() < 1e-9);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_sphere_zero_direction_misses() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);

        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_shares_material() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, forward()).expect("ray should hit");
        assert!(std::ptr::eq(rec.material, sphere.material().as_ref()));
    }
}
