//! Surface materials and the scatter contract.

use crate::{hittable::HitRecord, Color};
use halo_math::{random_f64, random_in_hemisphere, random_in_unit_ball, reflect, refract, unit, Ray};
use rand::RngCore;

/// Outgoing ray produced by a material, and how much of its light survives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    pub attenuation: Color,
    pub ray: Ray,
}

/// How light interacts with a surface.
///
/// Materials are immutable and shared (behind `Arc`) by every object that
/// uses them.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Matte(Matte),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns the scattered ray and its attenuation, or `None` if the ray
    /// is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<Scatter> {
        match self {
            Material::Matte(m) => Some(m.scatter(rec, rng)),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(d) => Some(d.scatter(ray_in, rec, rng)),
        }
    }
}

impl From<Matte> for Material {
    fn from(m: Matte) -> Self {
        Material::Matte(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(d: Dielectric) -> Self {
        Material::Dielectric(d)
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Matte {
    albedo: Color,
}

impl Matte {
    /// Create a new matte material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    fn scatter(&self, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Scatter {
        // Aim at a random point in the unit ball on the normal's side
        let target = rec.point + random_in_hemisphere(rng, rec.normal);
        Scatter {
            attenuation: self.albedo,
            ray: Ray::new(rec.point, target - rec.point),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzziness: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzziness`: Roughness, 0.0 = perfect mirror
    pub fn new(albedo: Color, fuzziness: f64) -> Self {
        Self { albedo, fuzziness }
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Option<Scatter> {
        let reflected = reflect(unit(ray_in.direction()), rec.normal)
            + self.fuzziness * random_in_unit_ball(rng);

        // Fuzz pushed the ray below the surface
        if reflected.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(Scatter {
            attenuation: self.albedo,
            ray: Ray::new(rec.point, reflected),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    refractive_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refractive_index: f64) -> Self {
        Self { refractive_index }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f64, eta_ratio: f64) -> f64 {
        let r0 = ((1.0 - eta_ratio) / (1.0 + eta_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Scatter {
        let eta_ratio = if rec.front_face {
            1.0 / self.refractive_index
        } else {
            self.refractive_index
        };

        let unit_direction = unit(ray_in.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let direction = if eta_ratio * sin_theta > 1.0 {
            // Total internal reflection
            reflect(unit_direction, rec.normal)
        } else if random_f64(rng) < Self::reflectance(cos_theta, eta_ratio) {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, eta_ratio)
        };

        Scatter {
            attenuation: Color::ONE,
            ray: Ray::new(rec.point, direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halo_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit_at_origin<'a>(ray: &Ray, outward_normal: Vec3, material: &'a Material) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, outward_normal, material)
    }

    #[test]
    fn test_matte_always_scatters_with_albedo() {
        let albedo = Color::new(0.8, 0.3, 0.1);
        let material = Material::from(Matte::new(albedo));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let scatter = material.scatter(&ray, &rec, &mut rng).expect("matte never absorbs");
            assert_eq!(scatter.attenuation, albedo);
            assert_eq!(scatter.ray.origin(), rec.point);
            assert!(scatter.ray.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::from(Metal::new(Color::splat(0.9), 0.0));
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(42);

        let scatter = material.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
        let expected = unit(Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(scatter.ray.direction(), reflect(unit(ray.direction()), Vec3::Y));
        assert!(scatter.ray.direction().abs_diff_eq(expected, 1e-12));
        assert_eq!(scatter.attenuation, Color::splat(0.9));
    }

    #[test]
    fn test_metal_absorbs_rays_pushed_into_surface() {
        // Grazing ray with heavy fuzz: some samples must go below the surface
        let material = Material::from(Metal::new(Color::ONE, 1.0));
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(7);

        let results: Vec<_> = (0..500)
            .map(|_| material.scatter(&ray, &rec, &mut rng))
            .collect();

        assert!(results.iter().any(Option::is_none));
        for scatter in results.into_iter().flatten() {
            assert!(scatter.ray.direction().dot(Vec3::Y) > 0.0);
        }
    }

    #[test]
    fn test_dielectric_attenuation_is_white() {
        let material = Material::from(Dielectric::new(1.5));
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            let scatter = material.scatter(&ray, &rec, &mut rng).expect("glass never absorbs");
            assert_eq!(scatter.attenuation, Color::ONE);
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at a shallow angle cannot refract
        let material = Material::from(Dielectric::new(1.5));
        let ray = Ray::new(Vec3::new(-1.0, -0.2, 0.0), Vec3::new(1.0, 0.2, 0.0));
        // Outward normal points the same way as the ray: back face
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        assert!(!rec.front_face);
        let mut rng = StdRng::seed_from_u64(11);

        let expected = reflect(unit(ray.direction()), rec.normal);
        for _ in 0..100 {
            let scatter = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(scatter.ray.direction().abs_diff_eq(expected, 1e-12));
        }
    }

    #[test]
    fn test_dielectric_mostly_refracts_head_on() {
        let material = Material::from(Dielectric::new(1.5));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = hit_at_origin(&ray, Vec3::Y, &material);
        let mut rng = StdRng::seed_from_u64(5);

        let transmitted = (0..1000)
            .filter_map(|_| material.scatter(&ray, &rec, &mut rng))
            .filter(|s| s.ray.direction().y < 0.0)
            .count();

        // Normal-incidence reflectance for glass is 4%
        assert!(transmitted > 900, "transmitted = {transmitted}");
        assert!(transmitted < 1000, "transmitted = {transmitted}");
    }

    #[test]
    fn test_schlick_reflectance() {
        let r0 = Dielectric::reflectance(1.0, 1.0 / 1.5);
        assert!((r0 - 0.04).abs() < 1e-12);
        assert!((Dielectric::reflectance(0.0, 1.0 / 1.5) - 1.0).abs() < 1e-12);
    }
}
