//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use halo_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Built once per successful intersection test and never modified.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub point: Point3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material of the object that was hit
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at `t` along `ray`.
    ///
    /// `outward_normal` must be unit length. The stored normal is flipped
    /// when the ray arrives from inside the surface, so it always faces the
    /// incoming ray and `front_face` records which side was hit.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) <= 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            point: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// An ordered list of hittable objects, itself hittable.
///
/// Intersection is a linear scan; there is no spatial index.
#[derive(Default)]
pub struct HittableCollection {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableCollection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the collection.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Remove all objects.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableCollection {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            let max = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Matte, Sphere};
    use std::sync::Arc;

    fn grey() -> Arc<Material> {
        Arc::new(Material::Matte(Matte::new(Color::splat(0.5))))
    }

    fn forward() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_hit_record_front_face() {
        let material = Material::Matte(Matte::new(Color::ONE));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = HitRecord::new(&ray, 4.0, Vec3::Z, &material);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
        assert_eq!(rec.point, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_hit_record_back_face() {
        let material = Material::Matte(Matte::new(Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Z, &material);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_hit_record_grazing_counts_as_front() {
        let material = Material::Matte(Matte::new(Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let rec = HitRecord::new(&ray, 1.0, Vec3::Y, &material);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_empty_collection_misses() {
        let world = HittableCollection::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(world.is_empty());
        assert!(world.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_collection_returns_closest_any_order() {
        let near = Vec3::new(0.0, 0.0, -2.0);
        let far = Vec3::new(0.0, 0.0, -2.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        for centers in [[near, far], [far, near]] {
            let mut world = HittableCollection::new();
            for center in centers {
                world.add(Box::new(Sphere::new(center, 1.0, grey())));
            }

            let rec = world.hit(&ray, forward()).expect("ray should hit");
            // Near sphere front surface is at z = -1
            assert!((rec.t - 1.0).abs() < 1e-9, "t = {}", rec.t);
        }
    }

    #[test]
    fn test_collection_respects_interval() {
        let mut world = HittableCollection::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, grey())));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(world.hit(&ray, Interval::new(0.001, 3.0)).is_none());
        assert!(world.hit(&ray, Interval::new(0.001, 5.0)).is_some());
    }

    #[test]
    fn test_collection_add_and_clear() {
        let mut world = HittableCollection::new();
        world.add(Box::new(Sphere::new(Vec3::ZERO, 1.0, grey())));
        world.add(Box::new(Sphere::new(Vec3::X, 1.0, grey())));
        assert_eq!(world.len(), 2);

        world.clear();
        assert!(world.is_empty());
    }

    #[test]
    fn test_collection_nests() {
        let mut inner = HittableCollection::new();
        inner.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey())));

        let mut world = HittableCollection::new();
        world.add(Box::new(inner));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey())));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = world.hit(&ray, forward()).expect("ray should hit");
        assert!((rec.t - 2.0).abs() < 1e-9);
    }
}
