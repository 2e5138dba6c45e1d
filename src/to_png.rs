//! Host-side PNG previews of strip frames.
//!
//! Each frame is drawn as one row of round LEDs on a black background. Several frames can be
//! stacked, for example to see a clock face at every hour of the day in one image.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};

use crate::led_strip::{Frame1d, Rgb};

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

/// Write `frame` as a one-row PNG where each LED occupies a `cell_size`-pixel square.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
pub fn write_strip_png<const N: usize>(
    frame: &Frame1d<N>,
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    write_strip_rows_png(core::slice::from_ref(frame), output_path, cell_size)
}

/// Write `frames` as a PNG with one row of LEDs per frame, top to bottom.
///
/// # Errors
///
/// Returns an error if the file cannot be created or encoded.
///
/// # Panics
///
/// Panics if `frames` is empty or `cell_size` is less than 4.
pub fn write_strip_rows_png<const N: usize>(
    frames: &[Frame1d<N>],
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    assert!(!frames.is_empty(), "frames must not be empty");
    assert!(cell_size >= 4, "cell_size must be at least 4");
    let output_path = output_path.as_ref();
    let (width, height, pixels) = strip_pixels(frames, cell_size)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    println!("wrote PNG to {}", output_path.display());
    Ok(())
}

/// Top-left corner of LED `index` in row `row` of a preview drawn with `cell_size`.
#[must_use]
pub const fn led_origin(index: usize, row: usize, cell_size: u32) -> (u32, u32) {
    let border = border(cell_size);
    (
        border + index as u32 * cell_size,
        border + row as u32 * cell_size,
    )
}

const fn border(cell_size: u32) -> u32 {
    cell_size / 4
}

fn strip_pixels<const N: usize>(
    frames: &[Frame1d<N>],
    cell_size: u32,
) -> Result<(u32, u32, Vec<u8>), Box<dyn Error>> {
    let border = border(cell_size);
    let width = u32::try_from(N)? * cell_size + border * 2;
    let height = u32::try_from(frames.len())? * cell_size + border * 2;
    let mut bytes = vec![0u8; usize::try_from(width * height * 3)?];

    let led_margin = (cell_size / 8).max(1);
    let radius = i64::from((cell_size - led_margin * 2) / 2);
    let center = i64::from(cell_size - 1) / 2;

    for (row, frame) in frames.iter().enumerate() {
        for (index, pixel) in frame.iter().enumerate() {
            let [red, green, blue] = preview_color(*pixel);
            let (origin_x, origin_y) = led_origin(index, row, cell_size);
            for local_y in 0..cell_size {
                for local_x in 0..cell_size {
                    let delta_x = i64::from(local_x) - center;
                    let delta_y = i64::from(local_y) - center;
                    if delta_x * delta_x + delta_y * delta_y > radius * radius {
                        continue;
                    }
                    let x = origin_x + local_x;
                    let y = origin_y + local_y;
                    let offset = usize::try_from((y * width + x) * 3)?;
                    if let Some(target) = bytes.get_mut(offset..offset + 3) {
                        target.copy_from_slice(&[red, green, blue]);
                    }
                }
            }
        }
    }

    Ok((width, height, bytes))
}

// LEDs look brighter than their PWM duty; darken mid-tones so the preview matches.
fn preview_color(pixel: Rgb) -> [u8; 3] {
    [pixel.r, pixel.g, pixel.b].map(|channel| {
        let linear = (f32::from(channel) / 255.0).powf(PREVIEW_INVERSE_GAMMA);
        (linear.clamp(0.0, 1.0) * 255.0).round() as u8
    })
}
