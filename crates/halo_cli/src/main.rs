use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use halo_core::{validate_render, Builtin, Scene, SceneDescription};
use halo_renderer::{image_io, render_with_progress, Camera, RenderConfig};

/// Render a scene of spheres with a Monte Carlo path tracer.
#[derive(Parser, Debug)]
#[command(name = "halo", version, about)]
struct Cli {
    /// JSON scene file to render
    #[arg(short, long, conflicts_with = "builtin")]
    scene: Option<PathBuf>,

    /// Builtin scene to render when no scene file is given (random, three)
    #[arg(short, long, default_value = "random")]
    builtin: String,

    /// Output image (.ppm or .png); "-" writes PPM to stdout
    #[arg(short, long, default_value = "image.ppm")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    /// Random seed for the scene layout and sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Render on the calling thread only
    #[arg(long)]
    single_threaded: bool,
}

impl Cli {
    /// Apply command line overrides on top of the scene's settings.
    fn apply_overrides(&self, render: &mut RenderConfig) {
        if let Some(width) = self.width {
            render.image_width = width;
        }
        if let Some(samples) = self.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            render.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            render.seed = seed;
        }
        if self.single_threaded {
            render.parallel = false;
        }
    }
}

fn load_scene(cli: &Cli) -> Result<Scene> {
    let mut scene = match &cli.scene {
        Some(path) => SceneDescription::load(path)
            .and_then(|desc| desc.build())
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            let builtin: Builtin = cli.builtin.parse()?;
            builtin.build(cli.seed.unwrap_or(0))
        }
    };

    cli.apply_overrides(&mut scene.render);
    validate_render(&scene.render)?;
    Ok(scene)
}

/// Progress line for `done` finished rows out of `height`, reported roughly
/// every tenth of the image and once more at the end.
fn progress_message(height: usize, done: usize) -> Option<String> {
    let step = (height / 10).max(1);
    if done % step == 0 || done == height {
        Some(format!("Scanlines remaining: {}", height.saturating_sub(done)))
    } else {
        None
    }
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let scene = load_scene(&cli)?;
    log::info!("Scene has {} objects", scene.world.len());

    let camera = Camera::new(&scene.camera);
    let height = scene.render.image_height() as usize;
    let image = render_with_progress(&camera, &scene.world, &scene.render, &|done: usize| {
        if let Some(message) = progress_message(height, done) {
            log::info!("{}", message);
        }
    });

    if cli.output.as_os_str() == "-" {
        let mut out = BufWriter::new(io::stdout().lock());
        image_io::write_ppm(&mut out, &image).context("Failed to write image to stdout")?;
        out.flush()?;
    } else {
        image_io::save(&cli.output, &image)
            .with_context(|| format!("Failed to save {}", cli.output.display()))?;
        log::info!("Saved to {}", cli.output.display());
    }

    Ok(())
}
