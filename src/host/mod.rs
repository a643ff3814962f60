//! Host-facing surface: wire protocol types, the frame codec, and the
//! orchestrator that turns one [`ProcessRequest`] into one response payload.

pub mod codec;
pub mod protocol;

pub use codec::{
    DecodedFrame, JPEG_QUALITY, MAX_FRAME_WIDTH, decode_frame, decode_mask, encode_frame,
};
pub use protocol::{ProcessRequest, ProcessResponse};

use crate::foundation::error::FramefxResult;
use crate::pipeline::{FilterPipeline, FrameInputs, PipelineReport};

/// Run one request end to end: decode, filter, re-encode.
///
/// Returns the processed frame as a JPEG data URL together with the
/// per-stage report. Errors out only on malformed input; stage failures
/// inside the pipeline degrade to pass-through and show up in the report.
#[tracing::instrument(skip_all)]
pub fn process_request(req: &ProcessRequest) -> FramefxResult<(String, PipelineReport)> {
    req.filters.validate()?;

    let decoded = decode_frame(&req.frame_data)?;
    let frame = decoded.frame;

    let mask = match req.segmentation_mask.as_deref() {
        Some(data) => Some(decode_mask(data, frame.width, frame.height)?),
        None => None,
    };
    let face_box = req.face_box.map(|face| {
        if decoded.scale != 1.0 {
            face.scaled(decoded.scale)
        } else {
            face
        }
    });

    let pipeline = FilterPipeline::new(&req.filters);
    let inputs = FrameInputs { mask, face_box };
    let (out, report) = pipeline.process_with_report(frame, &inputs)?;

    let payload = encode_frame(&out)?;
    Ok((payload, report))
}
