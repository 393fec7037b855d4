//! Scene description files and scene building.
//!
//! A scene file is JSON with a camera, render settings, a table of named
//! materials and a list of spheres that refer to materials by name:
//!
//! ```json
//! {
//!   "camera": { "look_from": [13, 2, 3], "look_at": [0, 0, 0], "aperture": 0.1 },
//!   "render": { "image_width": 400, "samples_per_pixel": 100 },
//!   "materials": {
//!     "ground": { "type": "matte", "albedo": [0.5, 0.5, 0.5] },
//!     "glass": { "type": "dielectric", "refractive_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -1000, 0], "radius": 1000, "material": "ground" },
//!     { "center": [0, 1, 0], "radius": 1, "material": "glass" }
//!   ]
//! }
//! ```
//!
//! Each named material is built once and shared by every sphere using it.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use halo_math::Point3;
use halo_renderer::{
    CameraConfig, Color, Dielectric, HittableCollection, Material, Matte, Metal, RenderConfig,
    Sphere,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} uses unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Sphere {index} has invalid radius {radius} (must be finite and > 0)")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("Material '{name}' is invalid: {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid render settings: {0}")]
    InvalidRender(String),

    #[error("Unknown builtin scene '{0}' (expected 'random' or 'three')")]
    UnknownBuiltin(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A material entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Matte {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzziness: f64,
    },
    Dielectric {
        refractive_index: f64,
    },
}

impl MaterialDesc {
    /// Check the parameters and build the renderer material.
    fn build(&self, name: &str) -> SceneResult<Material> {
        let invalid = |reason: &str| SceneError::InvalidMaterial {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        match *self {
            MaterialDesc::Matte { albedo } => {
                if !albedo.is_finite() {
                    return Err(invalid("albedo must be finite"));
                }
                Ok(Matte::new(albedo).into())
            }
            MaterialDesc::Metal { albedo, fuzziness } => {
                if !albedo.is_finite() {
                    return Err(invalid("albedo must be finite"));
                }
                if !(fuzziness >= 0.0 && fuzziness.is_finite()) {
                    return Err(invalid("fuzziness must be >= 0"));
                }
                Ok(Metal::new(albedo, fuzziness).into())
            }
            MaterialDesc::Dielectric { refractive_index } => {
                if !(refractive_index > 0.0 && refractive_index.is_finite()) {
                    return Err(invalid("refractive_index must be > 0"));
                }
                Ok(Dielectric::new(refractive_index).into())
            }
        }
    }
}

/// A sphere entry in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    /// Name of an entry in the scene's material table
    pub material: String,
}

/// Render settings in a scene file. Anything left out falls back to
/// [`RenderConfig::default`], except the aspect ratio which follows the
/// camera so the image and viewport agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    pub image_width: Option<u32>,
    pub aspect_ratio: Option<f64>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
    pub parallel: Option<bool>,
}

impl RenderSection {
    fn resolve(&self, camera: &CameraConfig) -> RenderConfig {
        let defaults = RenderConfig::default();
        RenderConfig {
            image_width: self.image_width.unwrap_or(defaults.image_width),
            aspect_ratio: self.aspect_ratio.unwrap_or(camera.aspect_ratio),
            samples_per_pixel: self.samples_per_pixel.unwrap_or(defaults.samples_per_pixel),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            seed: self.seed.unwrap_or(defaults.seed),
            parallel: self.parallel.unwrap_or(defaults.parallel),
        }
    }
}

/// Parsed, not yet validated, scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraConfig,
    pub render: RenderSection,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

/// Everything a render needs: the world, the camera and the sampling settings.
pub struct Scene {
    pub world: HittableCollection,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl SceneDescription {
    /// Load a scene description from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading scene file {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a scene description from a JSON string.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the description and build the scene.
    pub fn build(&self) -> SceneResult<Scene> {
        let mut materials: HashMap<&str, Arc<Material>> = HashMap::new();
        for (name, desc) in &self.materials {
            materials.insert(name.as_str(), Arc::new(desc.build(name)?));
        }

        let mut world = HittableCollection::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            world.add(Box::new(Sphere::new(sphere.center, sphere.radius, Arc::clone(material))));
        }

        let render = self.render.resolve(&self.camera);
        validate_camera(&self.camera)?;
        validate_render(&render)?;

        log::debug!(
            "Built scene with {} materials and {} spheres",
            materials.len(),
            world.len()
        );

        Ok(Scene {
            world,
            camera: self.camera.clone(),
            render,
        })
    }
}

/// Reject camera settings that would give a degenerate basis or viewport.
pub fn validate_camera(camera: &CameraConfig) -> SceneResult<()> {
    let view = camera.look_from - camera.look_at;
    if view.length_squared() == 0.0 {
        return Err(SceneError::InvalidCamera(
            "look_from and look_at must differ".into(),
        ));
    }
    if camera.up.cross(view).length_squared() < 1e-12 {
        return Err(SceneError::InvalidCamera(
            "up must not be parallel to the view direction".into(),
        ));
    }
    if !(camera.vertical_fov_degrees > 0.0 && camera.vertical_fov_degrees < 180.0) {
        return Err(SceneError::InvalidCamera(format!(
            "vertical_fov_degrees must be in (0, 180), got {}",
            camera.vertical_fov_degrees
        )));
    }
    if !(camera.aspect_ratio > 0.0) {
        return Err(SceneError::InvalidCamera("aspect_ratio must be > 0".into()));
    }
    if !(camera.aperture >= 0.0) {
        return Err(SceneError::InvalidCamera("aperture must be >= 0".into()));
    }
    if !(camera.focus_distance > 0.0) {
        return Err(SceneError::InvalidCamera("focus_distance must be > 0".into()));
    }
    Ok(())
}

/// Reject render settings that would produce an empty image.
pub fn validate_render(render: &RenderConfig) -> SceneResult<()> {
    if render.image_width == 0 {
        return Err(SceneError::InvalidRender("image_width must be > 0".into()));
    }
    if render.samples_per_pixel == 0 {
        return Err(SceneError::InvalidRender(
            "samples_per_pixel must be > 0".into(),
        ));
    }
    if !(render.aspect_ratio > 0.0) {
        return Err(SceneError::InvalidRender("aspect_ratio must be > 0".into()));
    }
    if render.image_height() == 0 {
        return Err(SceneError::InvalidRender(format!(
            "image height is zero ({} / {})",
            render.image_width, render.aspect_ratio
        )));
    }
    Ok(())
}
