//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a maximum depth
//! - Sky gradient lighting for rays that escape the scene
//! - Anti-aliasing via jittered multi-sampling
//! - Optional row-parallel rendering with per-row seeded generators

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::{color, Camera, Color, Hittable};
use halo_math::{random_range, unit, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Lower bound on hit distance, keeps scattered rays from re-hitting the
/// surface they just left (shadow acne).
pub const T_MIN: f64 = 0.001;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub image_width: u32,
    /// Image width / height; the height is derived from it
    pub aspect_ratio: f64,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-row random generators
    pub seed: u64,
    /// Render rows on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Image height, `floor(image_width / aspect_ratio)`.
    pub fn image_height(&self) -> u32 {
        (self.image_width as f64 / self.aspect_ratio) as u32
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, aspect_ratio: f64) -> Self {
        self.image_width = width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and attenuating the sky light that
/// eventually reaches it.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Bounce budget exhausted, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => scatter.attenuation * ray_color(&scatter.ray, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape: white at the horizon blending to
/// sky blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// `row` counts from the bottom of the image. A single sample goes through
/// the pixel center; more samples are jittered across the pixel.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    column: u32,
    row: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width = config.image_width as f64;
    let height = config.image_height() as f64;
    let jitter = config.samples_per_pixel > 1;

    color::average((0..config.samples_per_pixel).map(|_| {
        let (dx, dy) = if jitter {
            (random_range(rng, -0.5, 0.5), random_range(rng, -0.5, 0.5))
        } else {
            (0.0, 0.0)
        };
        let s = (column as f64 + 0.5 + dx) / width;
        let t = (row as f64 + 0.5 + dy) / height;

        let ray = camera.get_ray(s, t, rng);
        ray_color(&ray, world, config.max_depth, rng)
    }))
}

/// Averaged pixel colors in output order: top row first, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at column x of output line y (y = 0 is the top).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at column x of output line y (y = 0 is the top).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Gamma-corrected 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| color::to_rgb8(*c))
            .collect()
    }
}

/// Independent generator for one image row.
fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn render_row(camera: &Camera, world: &dyn Hittable, row: u32, config: &RenderConfig) -> Vec<Color> {
    let mut rng = row_rng(config.seed, row);
    (0..config.image_width)
        .map(|column| render_pixel(camera, world, column, row, config, &mut rng))
        .collect()
}

/// Render the entire scene to an image buffer.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    render_with_progress(camera, world, config, &|_: usize| {})
}

/// Render the entire scene, calling `on_row_done` with the number of rows
/// finished so far after each row completes.
///
/// Every row draws from its own generator seeded by `config.seed` and the
/// row index, so parallel and sequential renders produce the same image.
pub fn render_with_progress(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    on_row_done: &(dyn Fn(usize) + Sync),
) -> ImageBuffer {
    let width = config.image_width;
    let height = config.image_height();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}{}",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        if config.parallel { " (parallel)" } else { "" }
    );

    let start = Instant::now();
    let finished = AtomicUsize::new(0);
    let trace_row = |row: u32| {
        let pixels = render_row(camera, world, row, config);
        on_row_done(finished.fetch_add(1, Ordering::Relaxed) + 1);
        pixels
    };

    // Rows are emitted top to bottom, so walk them from the highest index
    let rows: Vec<Vec<Color>> = if config.parallel {
        (0..height).into_par_iter().rev().map(trace_row).collect()
    } else {
        (0..height).rev().map(trace_row).collect()
    };

    log::info!("Rendered in {:?}", start.elapsed());

    ImageBuffer {
        width,
        height,
        pixels: rows.into_iter().flatten().collect(),
    }
}
