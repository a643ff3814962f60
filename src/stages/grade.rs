//! Global color grading: brightness, contrast, saturation.

use crate::color::ops::{add_offset_all, scale_all, scale_saturation};
use crate::foundation::core::Frame;
use crate::foundation::error::FramefxResult;
use crate::params::FilterParams;

#[derive(Clone, Copy, Debug)]
pub struct ColorGradeStage {
    brightness: f32,
    contrast: f32,
    saturation: f32,
}

impl ColorGradeStage {
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            brightness: params.brightness,
            contrast: params.contrast,
            saturation: params.saturation,
        }
    }

    pub fn new(brightness: f32, contrast: f32, saturation: f32) -> Self {
        Self {
            brightness,
            contrast,
            saturation,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.brightness == 0.0 && self.contrast == 0.0 && self.saturation == 0.0
    }

    /// Brightness, then contrast, then saturation. Each adjustment stacks on
    /// the previous one's output, and each is skipped at its neutral 0.
    pub fn apply(&self, frame: &Frame) -> FramefxResult<Frame> {
        frame.validate()?;
        let mut out = frame.clone();
        if self.brightness != 0.0 {
            add_offset_all(&mut out, self.brightness * 2.0);
        }
        if self.contrast != 0.0 {
            scale_all(&mut out, 1.0 + self.contrast / 100.0);
        }
        if self.saturation != 0.0 {
            scale_saturation(&mut out, 1.0 + self.saturation / 100.0);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_grade_is_identity() {
        let stage = ColorGradeStage::new(0.0, 0.0, 0.0);
        assert!(stage.is_identity());
        let f = Frame::filled(4, 4, [10, 20, 30]).unwrap();
        assert_eq!(stage.apply(&f).unwrap(), f);
    }

    #[test]
    fn brightness_offset_is_doubled() {
        let stage = ColorGradeStage::new(20.0, 0.0, 0.0);
        let f = Frame::filled(4, 4, [128, 128, 128]).unwrap();
        let out = stage.apply(&f).unwrap();
        assert!(out.data.iter().all(|&v| v == 168));
    }

    #[test]
    fn negative_brightness_clamps_at_zero() {
        let stage = ColorGradeStage::new(-100.0, 0.0, 0.0);
        let f = Frame::filled(4, 4, [50, 128, 200]).unwrap();
        let out = stage.apply(&f).unwrap();
        assert_eq!(&out.data[..3], &[0, 0, 0]);
    }

    #[test]
    fn contrast_scales_after_brightness() {
        let stage = ColorGradeStage::new(10.0, 50.0, 0.0);
        let f = Frame::filled(2, 2, [100, 100, 100]).unwrap();
        let out = stage.apply(&f).unwrap();
        // (100 + 20) * 1.5 = 180, not 100 * 1.5 + 20 = 170
        assert_eq!(out.data[0], 180);
    }

    #[test]
    fn saturation_boost_spreads_channels() {
        let stage = ColorGradeStage::new(0.0, 0.0, 50.0);
        let f = Frame::filled(2, 2, [150, 100, 100]).unwrap();
        let out = stage.apply(&f).unwrap();
        let px = &out.data[..3];
        // more saturated red: max stays, min drops
        assert_eq!(px[0], 150);
        assert!(px[1] < 100);
    }

    #[test]
    fn saturation_floor_prevents_negative_factors() {
        let stage = ColorGradeStage::new(0.0, 0.0, -150.0);
        let f = Frame::filled(2, 2, [150, 100, 100]).unwrap();
        let out = stage.apply(&f).unwrap();
        let px = &out.data[..3];
        // factor floored at 0: fully desaturated
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }
}
