use crate::consts::{CHANNEL_MAX_8BIT, CONTRAST_MIDPOINT};
use crate::frame::Frame;

/// Scale each value's deviation from the mid-point.
///
/// `contrast` is multiplied around 0.5 (1.0 = no change, 0.0 = flat gray).
pub fn contrast(frame: &Frame, contrast: f32) -> Frame {
    let data = frame
        .data
        .mapv(|v| CONTRAST_MIDPOINT + contrast * (v - CONTRAST_MIDPOINT));
    Frame::new(data)
}

/// Add a uniform offset given in 8-bit units (e.g. 10.0 = +10/255).
pub fn brightness(frame: &Frame, offset: f32) -> Frame {
    let delta = offset / CHANNEL_MAX_8BIT;
    let data = frame.data.mapv(|v| v + delta);
    Frame::new(data)
}

