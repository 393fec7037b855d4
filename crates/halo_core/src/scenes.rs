//! Scenes built in code rather than loaded from a file.

use std::str::FromStr;
use std::sync::Arc;

use halo_math::{random_f64, random_range, random_vec3, Point3, Vec3};
use halo_renderer::{
    CameraConfig, Color, Dielectric, HittableCollection, Material, Matte, Metal, RenderConfig,
    Sphere,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::scene::{Scene, SceneError};

/// Named builtin scenes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Ground plane covered in small random spheres around three large ones
    RandomSpheres,
    /// Matte, glass and metal spheres side by side
    ThreeSpheres,
}

impl Builtin {
    /// Build the scene. `seed` drives the random layout and becomes the
    /// render seed.
    pub fn build(self, seed: u64) -> Scene {
        let mut scene = match self {
            Builtin::RandomSpheres => random_spheres(&mut StdRng::seed_from_u64(seed)),
            Builtin::ThreeSpheres => three_spheres(),
        };
        scene.render.seed = seed;
        scene
    }
}

impl FromStr for Builtin {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" | "random_spheres" => Ok(Builtin::RandomSpheres),
            "three" | "three_spheres" => Ok(Builtin::ThreeSpheres),
            _ => Err(SceneError::UnknownBuiltin(s.to_string())),
        }
    }
}

fn sphere(center: Point3, radius: f64, material: &Arc<Material>) -> Box<Sphere> {
    Box::new(Sphere::new(center, radius, Arc::clone(material)))
}

/// The "many small spheres" cover scene.
pub fn random_spheres(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableCollection::new();

    let ground = Arc::new(Material::from(Matte::new(Color::new(0.5, 0.5, 0.5))));
    world.add(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, &ground));

    let glass = Arc::new(Material::from(Dielectric::new(1.5)));
    let clearance = Point3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );
            if (center - clearance).length() <= 0.9 {
                continue;
            }

            let choose_mat = random_f64(rng);
            let material = if choose_mat < 0.8 {
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                Arc::new(Material::from(Matte::new(albedo)))
            } else if choose_mat < 0.95 {
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                Arc::new(Material::from(Metal::new(albedo, fuzz)))
            } else {
                Arc::clone(&glass)
            };
            world.add(sphere(center, 0.2, &material));
        }
    }

    let diffuse = Arc::new(Material::from(Matte::new(Color::new(0.4, 0.2, 0.1))));
    let mirror = Arc::new(Material::from(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)));
    world.add(sphere(Point3::new(0.0, 1.0, 0.0), 1.0, &glass));
    world.add(sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, &diffuse));
    world.add(sphere(Point3::new(4.0, 1.0, 0.0), 1.0, &mirror));

    log::debug!("Random spheres scene has {} objects", world.len());

    Scene {
        world,
        camera: CameraConfig::default(),
        render: RenderConfig::default(),
    }
}

/// Three spheres on a large ground sphere.
pub fn three_spheres() -> Scene {
    let mut world = HittableCollection::new();

    let ground = Arc::new(Material::from(Matte::new(Color::new(0.8, 0.8, 0.0))));
    let center = Arc::new(Material::from(Matte::new(Color::new(0.1, 0.2, 0.5))));
    let left = Arc::new(Material::from(Dielectric::new(1.5)));
    let right = Arc::new(Material::from(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3)));

    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, &ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, &center));
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, &left));
    world.add(sphere(Point3::new(1.0, 0.0, -1.0), 0.5, &right));

    let look_from = Point3::new(-2.0, 2.0, 1.0);
    let look_at = Point3::new(0.0, 0.0, -1.0);
    let camera = CameraConfig::default()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 0.1, (look_from - look_at).length());

    Scene {
        world,
        camera,
        render: RenderConfig::default(),
    }
}
