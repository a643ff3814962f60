//! Wire types for the one-request host protocol.
//!
//! A host process sends a single JSON request on stdin and reads a single
//! JSON response. Success responses carry the processed frame as a data URL;
//! failure responses carry an error string.

use serde::{Deserialize, Serialize};

use crate::foundation::core::FaceBox;
use crate::params::FilterParams;

/// One frame-processing request.
///
/// `segmentation_mask` and `face_box` are optional detector outputs computed
/// by the host against the original frame. Unknown fields are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// Base64 frame, with or without a `data:` URL prefix.
    pub frame_data: String,
    /// Filter toggles and intensities. Missing fields take their defaults.
    #[serde(default)]
    pub filters: FilterParams,
    /// Optional base64 grayscale person mask.
    #[serde(default)]
    pub segmentation_mask: Option<String>,
    /// Optional face bounding box in original-frame coordinates.
    #[serde(default)]
    pub face_box: Option<FaceBox>,
}

/// The response to a [`ProcessRequest`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_frame: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResponse {
    pub fn ok(processed_frame: String) -> Self {
        Self {
            success: true,
            processed_frame: Some(processed_frame),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            processed_frame: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_parses_with_default_filters() {
        let req: ProcessRequest = serde_json::from_str(r#"{"frameData": "abcd"}"#).unwrap();
        assert_eq!(req.frame_data, "abcd");
        assert!(req.filters.is_identity());
        assert!(req.segmentation_mask.is_none());
        assert!(req.face_box.is_none());
    }

    #[test]
    fn request_accepts_detector_fields() {
        let req: ProcessRequest = serde_json::from_str(
            r#"{
                "frameData": "abcd",
                "filters": {"brightness": 20},
                "segmentationMask": "efgh",
                "faceBox": {"x": -3, "y": 10, "width": 40, "height": 50},
                "futureField": true
            }"#,
        )
        .unwrap();
        assert_eq!(req.filters.brightness, 20.0);
        assert_eq!(req.segmentation_mask.as_deref(), Some("efgh"));
        let face = req.face_box.unwrap();
        assert_eq!((face.x, face.y, face.width, face.height), (-3, 10, 40, 50));
    }

    #[test]
    fn success_response_omits_the_error_field() {
        let json = serde_json::to_string(&ProcessResponse::ok("data:image/jpeg;base64,xx".into()))
            .unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"processedFrame":"data:image/jpeg;base64,xx"}"#
        );
    }

    #[test]
    fn failure_response_omits_the_frame_field() {
        let json = serde_json::to_string(&ProcessResponse::failure("bad frame")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"bad frame"}"#);
    }
}
