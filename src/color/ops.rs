//! Scalar operations over RGB frames. Every op clamps back into [0,255]
//! and is an exact no-op at its neutral parameter.

use crate::color::hsv::{frame_to_hsv, hsv_to_frame};
use crate::foundation::core::Frame;
use crate::foundation::math::clamp_round_u8;

/// One RGB channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Multiply one channel by `factor`.
pub fn scale_channel(frame: &mut Frame, channel: Channel, factor: f32) {
    if (factor - 1.0).abs() < f32::EPSILON {
        return;
    }
    let i = channel.index();
    for px in frame.data.chunks_exact_mut(3) {
        px[i] = clamp_round_u8(f32::from(px[i]) * factor);
    }
}

/// Add `delta` to one channel.
pub fn add_offset(frame: &mut Frame, channel: Channel, delta: f32) {
    if delta.abs() < f32::EPSILON {
        return;
    }
    let i = channel.index();
    for px in frame.data.chunks_exact_mut(3) {
        px[i] = clamp_round_u8(f32::from(px[i]) + delta);
    }
}

/// Multiply all channels by `factor`.
pub fn scale_all(frame: &mut Frame, factor: f32) {
    if (factor - 1.0).abs() < f32::EPSILON {
        return;
    }
    for v in &mut frame.data {
        *v = clamp_round_u8(f32::from(*v) * factor);
    }
}

/// Add `delta` to all channels.
pub fn add_offset_all(frame: &mut Frame, delta: f32) {
    if delta.abs() < f32::EPSILON {
        return;
    }
    for v in &mut frame.data {
        *v = clamp_round_u8(f32::from(*v) + delta);
    }
}

/// Scale HSV saturation by `factor` (floored at 0), leaving hue and value
/// untouched. Achromatic pixels are unaffected.
pub fn scale_saturation(frame: &mut Frame, factor: f32) {
    if (factor - 1.0).abs() < f32::EPSILON {
        return;
    }
    let factor = factor.max(0.0);
    let mut hsv = frame_to_hsv(frame);
    for px in hsv.data.chunks_exact_mut(3) {
        px[1] = (px[1] * factor).clamp(0.0, 1.0);
    }
    *frame = hsv_to_frame(&hsv);
}

/// Rec.601 luma.
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
}

/// Apply a 3x3 color mixing matrix: `out_i = row_i . [r,g,b]`.
pub fn apply_matrix3(frame: &mut Frame, m: &[[f32; 3]; 3]) {
    for px in frame.data.chunks_exact_mut(3) {
        let (r, g, b) = (f32::from(px[0]), f32::from(px[1]), f32::from(px[2]));
        for (out, row) in px.iter_mut().zip(m.iter()) {
            *out = clamp_round_u8(row[0] * r + row[1] * g + row[2] * b);
        }
    }
}
