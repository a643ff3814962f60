//! Face enhancement: crop the detected box, enhance, write back.

use crate::effects::region::{brighten_eyes, smooth_skin, whiten_teeth};
use crate::foundation::core::{FaceBox, Frame};
use crate::foundation::error::FramefxResult;
use crate::params::FilterParams;

#[derive(Clone, Copy, Debug)]
pub struct FaceStage {
    skin_smoothing: f32,
    eye_brightening: f32,
    teeth_whitening: f32,
}

impl FaceStage {
    /// Present only when face enhancement is toggled on. Intensities come in
    /// already normalized to [0,1].
    pub fn from_params(params: &FilterParams) -> Option<Self> {
        params.face_enhancement.then(|| Self {
            skin_smoothing: params.skin_smoothing_intensity(),
            eye_brightening: params.eye_brightening_intensity(),
            teeth_whitening: params.teeth_whitening_intensity(),
        })
    }

    pub fn new(skin_smoothing: f32, eye_brightening: f32, teeth_whitening: f32) -> Self {
        Self {
            skin_smoothing: skin_smoothing.clamp(0.0, 1.0),
            eye_brightening: eye_brightening.clamp(0.0, 1.0),
            teeth_whitening: teeth_whitening.clamp(0.0, 1.0),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.skin_smoothing <= 0.0 && self.eye_brightening <= 0.0 && self.teeth_whitening <= 0.0
    }

    /// Enhance the face under `face_box`. No box, or a box that clamps away
    /// to nothing, passes the frame through unchanged. The enhancement order
    /// is smoothing, then eyes, then teeth: later steps see the smoothed
    /// region.
    pub fn apply(&self, frame: &Frame, face_box: Option<FaceBox>) -> FramefxResult<Frame> {
        let Some(face_box) = face_box else {
            tracing::debug!("no face detected, keeping frame as-is");
            return Ok(frame.clone());
        };
        let Some(region) = face_box.clamp_to(frame.width, frame.height) else {
            tracing::debug!(?face_box, "face box clamps to an empty region");
            return Ok(frame.clone());
        };

        let mut out = frame.clone();
        let mut face = out.crop(region)?;
        if self.skin_smoothing > 0.0 {
            smooth_skin(&mut face, self.skin_smoothing)?;
        }
        if self.eye_brightening > 0.0 {
            brighten_eyes(&mut face, self.eye_brightening)?;
        }
        if self.teeth_whitening > 0.0 {
            whiten_teeth(&mut face, self.teeth_whitening)?;
        }
        out.blit(region, &face)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eyes_only() -> FaceStage {
        FaceStage::new(0.0, 1.0, 0.0)
    }

    #[test]
    fn no_face_box_passes_through() {
        let f = Frame::filled(12, 12, [100, 100, 100]).unwrap();
        assert_eq!(eyes_only().apply(&f, None).unwrap(), f);
    }

    #[test]
    fn fully_off_frame_box_passes_through() {
        let f = Frame::filled(12, 12, [100, 100, 100]).unwrap();
        let b = FaceBox {
            x: 40,
            y: 40,
            width: 10,
            height: 10,
        };
        assert_eq!(eyes_only().apply(&f, Some(b)).unwrap(), f);
    }

    #[test]
    fn identity_intensities_change_nothing() {
        let stage = FaceStage::new(0.0, 0.0, 0.0);
        assert!(stage.is_identity());
        let f = Frame::filled(12, 12, [100, 100, 100]).unwrap();
        let b = FaceBox {
            x: 2,
            y: 2,
            width: 6,
            height: 9,
        };
        assert_eq!(stage.apply(&f, Some(b)).unwrap(), f);
    }

    #[test]
    fn enhancement_stays_inside_the_clamped_box() {
        let f = Frame::filled(12, 12, [100, 100, 100]).unwrap();
        // hangs off the left edge; clamps to x 0..4, y 3..12
        let b = FaceBox {
            x: -4,
            y: 3,
            width: 8,
            height: 20,
        };
        let out = eyes_only().apply(&f, Some(b)).unwrap();

        // eye band = top third of the 9-row region: rows 3..6, cols 0..4
        for y in 3..6u32 {
            assert_eq!(&out.row(y)[..12], &[135u8; 12][..], "row {y}");
            assert_eq!(&out.row(y)[12..], &[100u8; 24][..], "row {y}");
        }
        for y in (0..3).chain(6..12) {
            assert!(out.row(y).iter().all(|&v| v == 100), "row {y}");
        }
    }

    #[test]
    fn all_three_enhancements_compose() {
        let stage = FaceStage::new(0.5, 0.5, 0.5);
        let f = Frame::filled(12, 12, [120, 110, 100]).unwrap();
        let b = FaceBox {
            x: 0,
            y: 0,
            width: 12,
            height: 12,
        };
        let out = stage.apply(&f, Some(b)).unwrap();
        assert!(out != f);
        assert_eq!(out.width, 12);
        assert_eq!(out.height, 12);
    }
}
