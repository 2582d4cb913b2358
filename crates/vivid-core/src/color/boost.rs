use ndarray::{Array2, Zip};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::{ColorFrame, Frame};

/// BT.601 luma plane of a color frame.
pub fn luma(color: &ColorFrame) -> Array2<f32> {
    Zip::from(&color.red.data)
        .and(&color.green.data)
        .and(&color.blue.data)
        .map_collect(|&r, &g, &b| LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b)
}

/// Scale each channel's distance from the pixel luma: `Y + boost * (C - Y)`.
///
/// Works directly on RGB chroma, so it is not bounded by the HSV gamut the way
/// saturation is. Luma is preserved exactly; 0.0 yields grayscale.
pub fn color_boost(color: &ColorFrame, boost: f32) -> ColorFrame {
    let y = luma(color);
    let scale = |plane: &Frame| {
        let data = Zip::from(&plane.data)
            .and(&y)
            .map_collect(|&c, &l| l + boost * (c - l));
        Frame::new(data)
    };

    ColorFrame {
        red: scale(&color.red),
        green: scale(&color.green),
        blue: scale(&color.blue),
    }
}
