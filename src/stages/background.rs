//! Background replacement: mask the subject, rebuild everything behind it.

use crate::color::ops::scale_all;
use crate::effects::blur::blur_frame_kernel;
use crate::effects::composite::composite;
use crate::foundation::core::{Frame, Mask};
use crate::foundation::error::FramefxResult;
use crate::foundation::math::clamp_round_u8;
use crate::params::{BackgroundMode, FilterParams};

/// Probability above which a pixel counts as foreground.
const FOREGROUND_THRESHOLD: f32 = 0.1;
/// Kernel size for the blur replacement mode.
const BLUR_KERNEL: u32 = 15;
/// Darkening factor for the fallback replacement mode.
const DARKEN_FACTOR: f32 = 0.3;

const SKY_RGB: [u8; 3] = [135, 206, 235];
const SAND_RGB: [u8; 3] = [238, 203, 173];

#[derive(Clone, Copy, Debug)]
pub struct BackgroundStage {
    mode: BackgroundMode,
}

impl BackgroundStage {
    /// Present only when background removal is toggled on.
    pub fn from_params(params: &FilterParams) -> Option<Self> {
        params.background_removal.then(|| Self {
            mode: params.background_replacement,
        })
    }

    pub fn new(mode: BackgroundMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> BackgroundMode {
        self.mode
    }

    /// Replace the background under `mask`. A missing mask is a recoverable
    /// degradation, not an error: the frame passes through unchanged.
    pub fn apply(&self, frame: &Frame, mask: Option<&Mask>) -> FramefxResult<Frame> {
        let Some(mask) = mask else {
            tracing::debug!("segmentation mask unavailable, keeping original background");
            return Ok(frame.clone());
        };

        let foreground = mask.threshold(FOREGROUND_THRESHOLD);
        let background = self.build_background(frame)?;
        composite(frame, &background, &foreground)
    }

    fn build_background(&self, frame: &Frame) -> FramefxResult<Frame> {
        match self.mode {
            BackgroundMode::Blur => blur_frame_kernel(frame, BLUR_KERNEL),
            BackgroundMode::Gradient => gradient_background(frame.width, frame.height),
            BackgroundMode::Beach => beach_background(frame.width, frame.height),
            BackgroundMode::Darken => {
                let mut dark = frame.clone();
                scale_all(&mut dark, DARKEN_FACTOR);
                Ok(dark)
            }
        }
    }
}

/// Vertical ramp from 50 at the top row to 200 at the bottom, weighted
/// 0.8/0.9/1.0 across R/G/B for a cool three-shade look.
fn gradient_background(width: u32, height: u32) -> FramefxResult<Frame> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        let t = if height > 1 {
            y as f32 / (height - 1) as f32
        } else {
            0.0
        };
        let g = 50.0 + 150.0 * t;
        let px = [
            clamp_round_u8(g * 0.8),
            clamp_round_u8(g * 0.9),
            clamp_round_u8(g),
        ];
        for _ in 0..width {
            data.extend_from_slice(&px);
        }
    }
    Frame::from_raw(width, height, data)
}

/// Two flat bands: sky over sand, split at the vertical midpoint.
fn beach_background(width: u32, height: u32) -> FramefxResult<Frame> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        let px = if y < height / 2 { SKY_RGB } else { SAND_RGB };
        for _ in 0..width {
            data.extend_from_slice(&px);
        }
    }
    Frame::from_raw(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::FramefxError;

    #[test]
    fn missing_mask_passes_frame_through() {
        let stage = BackgroundStage::new(BackgroundMode::Beach);
        let f = Frame::filled(8, 8, [50, 60, 70]).unwrap();
        assert_eq!(stage.apply(&f, None).unwrap(), f);
    }

    #[test]
    fn all_ones_mask_keeps_the_frame() {
        let stage = BackgroundStage::new(BackgroundMode::Beach);
        let f = Frame::filled(8, 8, [50, 60, 70]).unwrap();
        let mask = Mask::filled(8, 8, 1.0).unwrap();
        assert_eq!(stage.apply(&f, Some(&mask)).unwrap(), f);
    }

    #[test]
    fn all_zeros_mask_with_beach_gives_sky_over_sand() {
        let stage = BackgroundStage::new(BackgroundMode::Beach);
        let f = Frame::filled(6, 8, [50, 60, 70]).unwrap();
        let mask = Mask::filled(6, 8, 0.0).unwrap();
        let out = stage.apply(&f, Some(&mask)).unwrap();
        for y in 0..4 {
            for px in out.row(y).chunks_exact(3) {
                assert_eq!(px, SKY_RGB);
            }
        }
        for y in 4..8 {
            for px in out.row(y).chunks_exact(3) {
                assert_eq!(px, SAND_RGB);
            }
        }
    }

    #[test]
    fn gradient_ramps_from_dark_to_light() {
        let stage = BackgroundStage::new(BackgroundMode::Gradient);
        let f = Frame::filled(4, 5, [0, 0, 0]).unwrap();
        let mask = Mask::filled(4, 5, 0.0).unwrap();
        let out = stage.apply(&f, Some(&mask)).unwrap();
        assert_eq!(&out.row(0)[..3], &[40, 45, 50]);
        assert_eq!(&out.row(4)[..3], &[160, 180, 200]);
    }

    #[test]
    fn darken_mode_scales_by_point_three() {
        let stage = BackgroundStage::new(BackgroundMode::Darken);
        let f = Frame::filled(6, 6, [100, 200, 50]).unwrap();
        let mask = Mask::filled(6, 6, 0.0).unwrap();
        let out = stage.apply(&f, Some(&mask)).unwrap();
        assert_eq!(&out.row(0)[..3], &[30, 60, 15]);
    }

    #[test]
    fn blur_mode_on_constant_frame_is_constant() {
        let stage = BackgroundStage::new(BackgroundMode::Blur);
        let f = Frame::filled(8, 8, [90, 120, 150]).unwrap();
        let mask = Mask::filled(8, 8, 0.0).unwrap();
        assert_eq!(stage.apply(&f, Some(&mask)).unwrap(), f);
    }

    #[test]
    fn mismatched_mask_is_a_dimension_error() {
        let stage = BackgroundStage::new(BackgroundMode::Beach);
        let f = Frame::filled(8, 8, [0, 0, 0]).unwrap();
        let mask = Mask::filled(4, 4, 0.5).unwrap();
        assert!(matches!(
            stage.apply(&f, Some(&mask)),
            Err(FramefxError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn threshold_separates_low_probability_pixels() {
        // probabilities at or below 0.1 are background
        let stage = BackgroundStage::new(BackgroundMode::Darken);
        let mut mask = Mask::filled(8, 8, 0.05).unwrap();
        for v in mask.data.iter_mut().take(32) {
            *v = 0.9;
        }
        let f = Frame::filled(8, 8, [200, 200, 200]).unwrap();
        let out = stage.apply(&f, Some(&mask)).unwrap();
        // top rows keep the subject, bottom rows darken
        assert_eq!(&out.row(0)[..3], &[200, 200, 200]);
        assert_eq!(&out.row(7)[..3], &[60, 60, 60]);
    }
}
