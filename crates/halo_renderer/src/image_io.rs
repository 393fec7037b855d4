//! Writing rendered images to disk or any byte stream.
//!
//! - `.ppm` - plain-text P3, one `r g b` line per pixel
//! - `.png` - 8-bit RGB via the `image` crate

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::color::{write_color, write_ppm_header};
use crate::ImageBuffer;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum ImageIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0:?} (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Write the image as text PPM (P3).
pub fn write_ppm<W: Write + ?Sized>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    write_ppm_header(writer, image.width, image.height)?;
    for color in &image.pixels {
        write_color(writer, *color)?;
    }
    Ok(())
}

/// Save the image as an 8-bit PNG.
pub fn save_png<P: AsRef<Path>>(path: P, image: &ImageBuffer) -> Result<(), ImageIoError> {
    image::save_buffer_with_format(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

/// Save the image, picking the format from the file extension.
pub fn save<P: AsRef<Path>>(path: P, image: &ImageBuffer) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(&mut writer, image)?;
            writer.flush()?;
        }
        "png" => save_png(path, image)?,
        _ => return Err(ImageIoError::UnsupportedFormat(path.display().to_string())),
    }

    log::debug!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
