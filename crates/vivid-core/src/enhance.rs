//! The per-frame enhancer: a pure function from one frame to a new frame.
//!
//! Adjustments run in a fixed order (sharpness, contrast, brightness,
//! saturation, color boost). Intermediate values are left unclipped; the
//! result is clipped to [0, 1] once at the end. Steps whose factor is at its
//! no-op value are skipped.

use image::RgbImage;

use crate::color::boost::color_boost;
use crate::color::hsv::adjust_saturation;
use crate::color::process::{clip, from_rgb_image, process_color, to_rgb_image};
use crate::error::{Result, VividError};
use crate::filters::levels::{brightness, contrast};
use crate::filters::sharpen::{sharpen, sharpness_strength};
use crate::frame::ColorFrame;
use crate::pipeline::config::EnhancementParams;

/// Enhance a single color frame.
pub fn enhance_frame(frame: &ColorFrame, params: &EnhancementParams) -> Result<ColorFrame> {
    params.validate()?;
    if !frame.is_well_formed() {
        return Err(VividError::MalformedFrame(format!(
            "channel shapes differ or are empty: r={:?} g={:?} b={:?}",
            frame.red.data.dim(),
            frame.green.data.dim(),
            frame.blue.data.dim()
        )));
    }

    let mut out = frame.clone();

    let strength = sharpness_strength(params.sharpness);
    if strength != 0.0 {
        out = process_color(&out, |f| sharpen(f, strength));
    }
    if params.contrast != 1.0 {
        out = process_color(&out, |f| contrast(f, params.contrast));
    }
    if params.brightness != 0.0 {
        out = process_color(&out, |f| brightness(f, params.brightness));
    }
    if params.saturation != 1.0 {
        out = adjust_saturation(&out, params.saturation);
    }
    if params.color_boost != 1.0 {
        out = color_boost(&out, params.color_boost);
    }

    Ok(clip(&out))
}

/// Enhance an 8-bit RGB frame.
pub fn enhance_rgb(img: &RgbImage, params: &EnhancementParams) -> Result<RgbImage> {
    params.validate()?;
    let color = from_rgb_image(img)?;
    if params.is_identity() {
        return Ok(img.clone());
    }
    let enhanced = enhance_frame(&color, params)?;
    to_rgb_image(&enhanced)
}
