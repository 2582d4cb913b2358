use std::path::Path;

use image::{ImageFormat, Rgb};

use crate::color::process::{from_rgb_image, to_rgb_image};
use crate::error::{Result, VividError};
use crate::frame::ColorFrame;

use super::adapter::ensure_readable;

/// Save a ColorFrame as 16-bit RGB TIFF.
pub fn save_color_tiff(color: &ColorFrame, path: &Path) -> Result<()> {
    if !color.is_well_formed() {
        return Err(VividError::MalformedFrame(
            "channel shapes differ or are empty".to_string(),
        ));
    }
    let h = color.height();
    let w = color.width();

    let mut pixels: Vec<u16> = Vec::with_capacity(h * w * 3);
    for row in 0..h {
        for col in 0..w {
            for plane in [&color.red, &color.green, &color.blue] {
                pixels.push((plane.data[[row, col]].clamp(0.0, 1.0) * 65535.0).round() as u16);
            }
        }
    }

    let img = image::ImageBuffer::<Rgb<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| VividError::MalformedFrame(format!("{w}x{h} buffer size mismatch")))?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a ColorFrame as 8-bit RGB PNG.
pub fn save_color_png(color: &ColorFrame, path: &Path) -> Result<()> {
    let img = to_rgb_image(color)?;
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a ColorFrame, choosing format from file extension.
pub fn save_color_image(color: &ColorFrame, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => save_color_tiff(color, path),
        Some("png") | None => save_color_png(color, path),
        Some(_) => {
            let img = to_rgb_image(color)?;
            img.save(path)?;
            Ok(())
        }
    }
}

/// Load any image the `image` crate can decode as an 8-bit RGB ColorFrame.
pub fn load_color_image(path: &Path) -> Result<ColorFrame> {
    ensure_readable(path)?;
    let img = image::open(path)?.to_rgb8();
    from_rgb_image(&img)
}
