//! Color accumulation, gamma correction and text serialization.

use std::io::{self, Write};

use halo_math::{Interval, Vec3};

/// Color type alias (linear RGB, components may exceed 1 during transport)
pub type Color = Vec3;

/// Channel range written to 8-bit output. Stopping short of 1.0 keeps
/// `256 * x` below 256.
const OUTPUT_RANGE: Interval = Interval::new(0.0, 0.999);

/// Arithmetic mean of a set of samples. An empty set averages to black.
pub fn average<I>(colors: I) -> Color
where
    I: IntoIterator<Item = Color>,
{
    let (sum, count) = colors
        .into_iter()
        .fold((Color::ZERO, 0usize), |(sum, count), c| (sum + c, count + 1));

    if count == 0 {
        Color::ZERO
    } else {
        sum / count as f64
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize one linear channel to [0, 255].
#[inline]
fn channel_to_u8(linear: f64) -> u8 {
    (256.0 * OUTPUT_RANGE.clamp(linear_to_gamma(linear))) as u8
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn to_rgb8(color: Color) -> [u8; 3] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
    ]
}

/// Write the text header of a P3 image.
pub fn write_ppm_header<W: Write + ?Sized>(writer: &mut W, width: u32, height: u32) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")
}

/// Write one pixel as three space-separated integers.
pub fn write_color<W: Write + ?Sized>(writer: &mut W, color: Color) -> io::Result<()> {
    let [r, g, b] = to_rgb8(color);
    writeln!(writer, "{} {} {}", r, g, b)
}
