//! Per-request filter parameters.
//!
//! Wire names are camelCase. Missing keys fall to defaults, unknown keys are
//! ignored, and unknown enum values fall to the explicit fallback arm, so a
//! newer caller never hard-fails an older pipeline.

use crate::foundation::error::{FramefxError, FramefxResult};

/// How the background is rebuilt once the subject has been masked out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    #[default]
    Blur,
    Gradient,
    Beach,
    /// Fallback for any unrecognized mode: darken the original background.
    #[serde(other)]
    Darken,
}

/// Global color look applied by the effects stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFilter {
    Warm,
    Cool,
    Bw,
    Sepia,
    Vibrant,
    /// Fallback for any unrecognized filter name.
    #[default]
    #[serde(other)]
    None,
}

/// Flat per-frame filter configuration, immutable for the duration of one
/// frame. Intensities are 0-100 on the wire and normalized to [0,1]
/// internally; brightness/contrast/saturation are signed, 0 neutral.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterParams {
    pub background_removal: bool,
    pub background_replacement: BackgroundMode,
    pub face_enhancement: bool,
    pub skin_smoothing: f32,
    pub eye_brightening: f32,
    pub teeth_whitening: f32,
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub vintage: bool,
    pub color_filter: ColorFilter,
    pub blur: u32,
}

impl FilterParams {
    pub fn skin_smoothing_intensity(&self) -> f32 {
        normalize_percent(self.skin_smoothing)
    }

    pub fn eye_brightening_intensity(&self) -> f32 {
        normalize_percent(self.eye_brightening)
    }

    pub fn teeth_whitening_intensity(&self) -> f32 {
        normalize_percent(self.teeth_whitening)
    }

    /// True when every option is at its neutral value, i.e. the whole
    /// pipeline would be a no-op.
    pub fn is_identity(&self) -> bool {
        !self.background_removal
            && !self.face_enhancement
            && self.brightness == 0.0
            && self.contrast == 0.0
            && self.saturation == 0.0
            && !self.vintage
            && self.color_filter == ColorFilter::None
            && self.blur == 0
    }

    pub fn validate(&self) -> FramefxResult<()> {
        let numeric = [
            ("skinSmoothing", self.skin_smoothing),
            ("eyeBrightening", self.eye_brightening),
            ("teethWhitening", self.teeth_whitening),
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
        ];
        for (name, v) in numeric {
            if !v.is_finite() {
                return Err(FramefxError::validation(format!(
                    "filter '{name}' must be a finite number"
                )));
            }
        }
        Ok(())
    }
}

fn normalize_percent(v: f32) -> f32 {
    if !v.is_finite() {
        return 0.0;
    }
    (v / 100.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_to_defaults() {
        let p: FilterParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p, FilterParams::default());
        assert_eq!(p.background_replacement, BackgroundMode::Blur);
        assert_eq!(p.color_filter, ColorFilter::None);
        assert!(p.is_identity());
    }

    #[test]
    fn camel_case_keys_parse() {
        let p: FilterParams = serde_json::from_str(
            r#"{
                "backgroundRemoval": true,
                "backgroundReplacement": "beach",
                "faceEnhancement": true,
                "skinSmoothing": 60,
                "colorFilter": "bw",
                "blur": 3
            }"#,
        )
        .unwrap();
        assert!(p.background_removal);
        assert_eq!(p.background_replacement, BackgroundMode::Beach);
        assert!(p.face_enhancement);
        assert_eq!(p.skin_smoothing, 60.0);
        assert_eq!(p.color_filter, ColorFilter::Bw);
        assert_eq!(p.blur, 3);
        assert!(!p.is_identity());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let p: FilterParams =
            serde_json::from_str(r#"{"brightness": 20, "sharpen": 99}"#).unwrap();
        assert_eq!(p.brightness, 20.0);
    }

    #[test]
    fn unknown_enum_values_fall_back() {
        let p: FilterParams = serde_json::from_str(
            r#"{"backgroundReplacement": "office", "colorFilter": "noir"}"#,
        )
        .unwrap();
        assert_eq!(p.background_replacement, BackgroundMode::Darken);
        assert_eq!(p.color_filter, ColorFilter::None);
    }

    #[test]
    fn intensities_normalize_and_clamp() {
        let p = FilterParams {
            skin_smoothing: 250.0,
            eye_brightening: -5.0,
            teeth_whitening: 50.0,
            ..FilterParams::default()
        };
        assert_eq!(p.skin_smoothing_intensity(), 1.0);
        assert_eq!(p.eye_brightening_intensity(), 0.0);
        assert_eq!(p.teeth_whitening_intensity(), 0.5);
    }

    #[test]
    fn validate_rejects_non_finite_numbers() {
        let p = FilterParams {
            brightness: f32::NAN,
            ..FilterParams::default()
        };
        assert!(p.validate().is_err());
        assert!(FilterParams::default().validate().is_ok());
    }
}
