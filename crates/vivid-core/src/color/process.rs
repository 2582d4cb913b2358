use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::consts::{CHANNEL_MAX_8BIT, COLOR_CHANNEL_COUNT};
use crate::error::{Result, VividError};
use crate::frame::{ColorFrame, Frame};

/// Split a packed RGB24 buffer into separate R, G, B frames normalized to [0, 1].
///
/// Fails with `MalformedFrame` unless `data.len() == width * height * 3`
/// and both dimensions are non-zero.
pub fn from_rgb_bytes(data: &[u8], width: usize, height: usize) -> Result<ColorFrame> {
    let expected = width * height * COLOR_CHANNEL_COUNT;
    if width == 0 || height == 0 {
        return Err(VividError::MalformedFrame(format!(
            "empty frame {width}x{height}"
        )));
    }
    if data.len() != expected {
        return Err(VividError::MalformedFrame(format!(
            "{width}x{height} RGB frame needs {expected} bytes, got {}",
            data.len()
        )));
    }

    let plane = |offset: usize| {
        Array2::from_shape_fn((height, width), |(row, col)| {
            data[(row * width + col) * COLOR_CHANNEL_COUNT + offset] as f32 / CHANNEL_MAX_8BIT
        })
    };

    Ok(ColorFrame {
        red: Frame::new(plane(0)),
        green: Frame::new(plane(1)),
        blue: Frame::new(plane(2)),
    })
}

/// Convert an 8-bit RGB image into a ColorFrame.
pub fn from_rgb_image(img: &RgbImage) -> Result<ColorFrame> {
    let (w, h) = img.dimensions();
    from_rgb_bytes(img.as_raw(), w as usize, h as usize)
}

/// Quantize a normalized value to 8 bits, clipping out-of-range input.
#[inline]
pub fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * CHANNEL_MAX_8BIT).round() as u8
}

/// Merge R, G, B frames into an 8-bit RGB image.
pub fn to_rgb_image(color: &ColorFrame) -> Result<RgbImage> {
    if !color.is_well_formed() {
        return Err(VividError::MalformedFrame(format!(
            "channel shapes differ: r={:?} g={:?} b={:?}",
            color.red.data.dim(),
            color.green.data.dim(),
            color.blue.data.dim()
        )));
    }
    let (h, w) = color.red.data.dim();

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let r = to_u8(color.red.data[[row, col]]);
            let g = to_u8(color.green.data[[row, col]]);
            let b = to_u8(color.blue.data[[row, col]]);
            img.put_pixel(col as u32, row as u32, Rgb([r, g, b]));
        }
    }

    Ok(img)
}

/// Apply a processing function to each channel of a color frame independently.
pub fn process_color<F>(color: &ColorFrame, mut process_fn: F) -> ColorFrame
where
    F: FnMut(&Frame) -> Frame,
{
    ColorFrame {
        red: process_fn(&color.red),
        green: process_fn(&color.green),
        blue: process_fn(&color.blue),
    }
}

/// Clip every channel to [0, 1].
pub fn clip(color: &ColorFrame) -> ColorFrame {
    process_color(color, |f| {
        Frame::new(f.data.mapv(|v| v.clamp(0.0, 1.0)))
    })
}

