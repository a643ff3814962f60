//! Stylistic effects: vintage matrix, color filters, uniform blur.

use crate::color::ops::{Channel, apply_matrix3, luminance, scale_channel, scale_saturation};
use crate::effects::blur::blur_frame_kernel;
use crate::foundation::core::Frame;
use crate::foundation::error::FramefxResult;
use crate::foundation::math::clamp_round_u8;
use crate::params::{ColorFilter, FilterParams};

/// Fixed color-mixing matrix for the vintage look.
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

#[derive(Clone, Copy, Debug)]
pub struct EffectsStage {
    vintage: bool,
    color_filter: ColorFilter,
    blur_amount: u32,
    background_removal_active: bool,
}

impl EffectsStage {
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            vintage: params.vintage,
            color_filter: params.color_filter,
            blur_amount: params.blur,
            background_removal_active: params.background_removal,
        }
    }

    pub fn is_identity(&self) -> bool {
        !self.vintage && self.color_filter == ColorFilter::None && self.effective_blur() == 0
    }

    /// Blur is suppressed while background removal is active: the background
    /// stage already blurred or replaced everything behind the subject.
    fn effective_blur(&self) -> u32 {
        if self.background_removal_active {
            0
        } else {
            self.blur_amount
        }
    }

    /// Vintage first, then the color filter, then the uniform blur.
    pub fn apply(&self, frame: &Frame) -> FramefxResult<Frame> {
        frame.validate()?;
        let mut out = frame.clone();

        if self.vintage {
            apply_matrix3(&mut out, &SEPIA_MATRIX);
        }

        match self.color_filter {
            ColorFilter::Warm => {
                scale_channel(&mut out, Channel::Red, 1.15);
                scale_channel(&mut out, Channel::Blue, 0.85);
            }
            ColorFilter::Cool => {
                scale_channel(&mut out, Channel::Red, 0.85);
                scale_channel(&mut out, Channel::Blue, 1.15);
            }
            ColorFilter::Bw => grayscale(&mut out),
            ColorFilter::Sepia => {
                grayscale(&mut out);
                scale_channel(&mut out, Channel::Red, 0.8);
                scale_channel(&mut out, Channel::Green, 0.9);
            }
            ColorFilter::Vibrant => scale_saturation(&mut out, 1.3),
            ColorFilter::None => {}
        }

        let blur = self.effective_blur();
        if blur > 0 {
            let kernel = blur.saturating_mul(2).saturating_add(1).max(3);
            out = blur_frame_kernel(&out, kernel)?;
        }
        Ok(out)
    }
}

/// Replicate Rec.601 luma across all three channels.
fn grayscale(frame: &mut Frame) {
    for px in frame.data.chunks_exact_mut(3) {
        let y = clamp_round_u8(luminance(px[0], px[1], px[2]));
        px.fill(y);
    }
}
