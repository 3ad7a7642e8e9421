//! PNG previews of a matrix frame, for checking glyphs without hardware.
#![cfg(feature = "host")]

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use png::{BitDepth, ColorType, Encoder};
use smart_leds::RGB8;

use crate::pixel_matrix::Frame2d;

/// Gap, in preview pixels, around each LED inside its cell.
const LED_MARGIN_DIVISOR: u32 = 8;

/// Render `frame` as a PNG where each LED is a round dot `cell_size` pixels across.
///
/// Parent directories are created as needed. Dark cells are drawn as dim gray
/// dots so the grid stays visible.
///
/// # Errors
///
/// Returns an error if `cell_size` is zero, the image would be too large, or
/// the file cannot be written.
pub fn write_frame_png<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    output_path: impl AsRef<Path>,
    cell_size: u32,
) -> Result<(), Box<dyn Error>> {
    let output_path = output_path.as_ref();
    let (width, height, bytes) = render_rgb(frame, cell_size)?;

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
    writer.write_image_data(&bytes)?;
    writer.finish()?;
    Ok(())
}

/// Rasterize `frame` into 8-bit RGB bytes, returning `(width, height, bytes)`.
///
/// # Errors
///
/// Returns an error if `cell_size` is zero or the dimensions overflow.
pub fn render_rgb<const W: usize, const H: usize>(
    frame: &Frame2d<W, H>,
    cell_size: u32,
) -> Result<(u32, u32, Vec<u8>), Box<dyn Error>> {
    if cell_size == 0 {
        return Err("cell_size must be positive".into());
    }
    let columns = u32::try_from(W)?;
    let rows = u32::try_from(H)?;
    let width = columns.checked_mul(cell_size).ok_or("preview too wide")?;
    let height = rows.checked_mul(cell_size).ok_or("preview too tall")?;
    let pixel_count = usize::try_from(u64::from(width) * u64::from(height))?;
    let mut bytes = vec![0_u8; pixel_count * 3];

    let margin = cell_size / LED_MARGIN_DIVISOR;
    let radius = i64::from((cell_size / 2).saturating_sub(margin));
    let center = i64::from(cell_size) / 2;

    for (y, row) in frame.iter().enumerate() {
        for (x, &color) in row.iter().enumerate() {
            let color = if color == RGB8::default() {
                RGB8::new(0x20, 0x20, 0x20)
            } else {
                color
            };
            let origin_x = u32::try_from(x)? * cell_size;
            let origin_y = u32::try_from(y)? * cell_size;
            for local_y in 0..cell_size {
                for local_x in 0..cell_size {
                    let delta_x = i64::from(local_x) - center;
                    let delta_y = i64::from(local_y) - center;
                    if delta_x * delta_x + delta_y * delta_y > radius * radius {
                        continue;
                    }
                    let offset = usize::try_from(
                        (u64::from(origin_y + local_y) * u64::from(width)
                            + u64::from(origin_x + local_x))
                            * 3,
                    )?;
                    if let Some(pixel) = bytes.get_mut(offset..offset + 3) {
                        pixel.copy_from_slice(&[color.r, color.g, color.b]);
                    }
                }
            }
        }
    }

    Ok((width, height, bytes))
}
