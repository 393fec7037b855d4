//! Halo core - scene descriptions and builtin scenes.
//!
//! This crate provides:
//!
//! - **Scene files**: JSON descriptions of a camera, render settings,
//!   named materials and spheres (`SceneDescription`)
//! - **Builtin scenes**: scenes constructed in code (`Builtin`)
//!
//! # Example
//!
//! ```ignore
//! use halo_core::SceneDescription;
//!
//! let scene = SceneDescription::load("scene.json")?.build()?;
//! println!("Loaded {} objects", scene.world.len());
//! ```

pub mod scene;
pub mod scenes;

// Re-export commonly used types
pub use scene::{
    validate_camera, validate_render, MaterialDesc, RenderSection, Scene, SceneDescription,
    SceneError, SceneResult, SphereDesc,
};
pub use scenes::{random_spheres, three_spheres, Builtin};
