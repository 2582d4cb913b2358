use ndarray::{Array2, Zip};

use crate::consts::{EPSILON, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::{ColorFrame, Frame};

/// Convert one RGB pixel to (hue in degrees [0, 360), saturation, value).
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > EPSILON { delta / max } else { 0.0 };
    let h = if delta <= EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h, s, max)
}

/// Convert (hue in degrees, saturation, value) back to RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

/// Scale HSV saturation by `factor`.
///
/// Channels are clipped to [0, 1] before the HSV conversion, since earlier
/// steps may leave them out of range. Saturation is clipped to [0, 1] again
/// before converting back.
pub fn adjust_saturation(color: &ColorFrame, factor: f32) -> ColorFrame {
    let dim = color.red.data.dim();
    let mut red = Array2::<f32>::zeros(dim);
    let mut green = Array2::<f32>::zeros(dim);
    let mut blue = Array2::<f32>::zeros(dim);

    let zip = Zip::from(&mut red)
        .and(&mut green)
        .and(&mut blue)
        .and(&color.red.data)
        .and(&color.green.data)
        .and(&color.blue.data);

    let apply = |or: &mut f32, og: &mut f32, ob: &mut f32, &r: &f32, &g: &f32, &b: &f32| {
        let (h, s, v) = rgb_to_hsv(
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
        );
        let (nr, ng, nb) = hsv_to_rgb(h, (s * factor).clamp(0.0, 1.0), v);
        *or = nr;
        *og = ng;
        *ob = nb;
    };

    if dim.0 * dim.1 >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(apply);
    } else {
        zip.for_each(apply);
    }

    ColorFrame {
        red: Frame::new(red),
        green: Frame::new(green),
        blue: Frame::new(blue),
    }
}
