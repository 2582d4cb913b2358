use ndarray::{Array2, Axis, Zip};
use rayon::prelude::*;

use crate::consts::{PARALLEL_PIXEL_THRESHOLD, SHARPEN_KERNEL};
use crate::frame::Frame;

/// Convolve a plane with a 3x3 kernel, replicating edge pixels at the border.
pub fn convolve_3x3(data: &Array2<f32>, kernel: &[[f32; 3]; 3]) -> Array2<f32> {
    let (h, w) = data.dim();
    let mut result = Array2::<f32>::zeros((h, w));
    if h == 0 || w == 0 {
        return result;
    }

    let convolve_row = |row: usize, out: &mut [f32]| {
        for (col, dst) in out.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for (ki, kernel_row) in kernel.iter().enumerate() {
                let src_row = (row as isize + ki as isize - 1).clamp(0, h as isize - 1) as usize;
                for (kj, &kv) in kernel_row.iter().enumerate() {
                    if kv == 0.0 {
                        continue;
                    }
                    let src_col =
                        (col as isize + kj as isize - 1).clamp(0, w as isize - 1) as usize;
                    sum += data[[src_row, src_col]] * kv;
                }
            }
            *dst = sum;
        }
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut out)| {
                if let Some(slice) = out.as_slice_mut() {
                    convolve_row(row, slice);
                }
            });
    } else {
        for (row, mut out) in result.axis_iter_mut(Axis(0)).enumerate() {
            if let Some(slice) = out.as_slice_mut() {
                convolve_row(row, slice);
            }
        }
    }

    result
}

/// Sharpen a plane by blending toward its kernel-filtered copy.
///
/// `output = original + strength * (sharpened - original)`. A strength of 0.0
/// returns the input unchanged. No clamping is applied.
pub fn sharpen(frame: &Frame, strength: f32) -> Frame {
    if strength == 0.0 {
        return frame.clone();
    }

    let sharpened = convolve_3x3(&frame.data, &SHARPEN_KERNEL);
    let data = Zip::from(&frame.data)
        .and(&sharpened)
        .map_collect(|&orig, &sharp| orig + strength * (sharp - orig));

    Frame::new(data)
}

/// Map the user-facing sharpness factor (1.0 = unchanged) to a blend strength.
///
/// Factors at or below 1.0 leave the frame untouched.
pub fn sharpness_strength(sharpness: f32) -> f32 {
    (sharpness - 1.0).max(0.0)
}
