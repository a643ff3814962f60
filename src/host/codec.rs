//! Frame transport codec: base64 data URLs in, JPEG data URLs out.
//!
//! Oversized inputs are downscaled here, before the pipeline runs, and the
//! scale is reported back so detection results computed against the original
//! frame can be rescaled to match.

use anyhow::Context as _;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, RgbImage, codecs::jpeg::JpegEncoder,
    imageops::FilterType,
};

use crate::foundation::core::{Frame, Mask};
use crate::foundation::error::{FramefxError, FramefxResult};

/// Frames wider than this are downscaled before processing.
pub const MAX_FRAME_WIDTH: u32 = 1280;
/// Re-encode quality for processed frames.
pub const JPEG_QUALITY: u8 = 75;

/// A decoded working frame plus the scale applied to reach it.
#[derive(Clone, Debug)]
pub struct DecodedFrame {
    pub frame: Frame,
    /// Working width over original width. 1.0 when nothing was downscaled.
    pub scale: f32,
}

/// Decode a base64 image (with or without a `data:` URL prefix) into a
/// working frame, downscaling anything wider than [`MAX_FRAME_WIDTH`].
pub fn decode_frame(frame_data: &str) -> FramefxResult<DecodedFrame> {
    let bytes = decode_base64_payload(frame_data)?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| FramefxError::validation(format!("could not decode frame: {e}")))?;
    let rgb = img.to_rgb8();

    let (width, height) = rgb.dimensions();
    if width > MAX_FRAME_WIDTH {
        let scale = MAX_FRAME_WIDTH as f32 / width as f32;
        let new_height = ((height as f32 * scale) as u32).max(1);
        tracing::debug!(width, height, new_height, "downscaling oversized frame");
        let resized = DynamicImage::ImageRgb8(rgb)
            .resize_exact(MAX_FRAME_WIDTH, new_height, FilterType::Triangle)
            .to_rgb8();
        return Ok(DecodedFrame {
            frame: frame_from_rgb(resized)?,
            scale,
        });
    }

    Ok(DecodedFrame {
        frame: frame_from_rgb(rgb)?,
        scale: 1.0,
    })
}

/// Decode a base64 grayscale image into a probability mask (luma / 255),
/// resizing to the working frame size when the two disagree.
pub fn decode_mask(mask_data: &str, width: u32, height: u32) -> FramefxResult<Mask> {
    let bytes = decode_base64_payload(mask_data)?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| FramefxError::validation(format!("could not decode mask: {e}")))?;
    let gray = img.to_luma8();

    let (mw, mh) = gray.dimensions();
    let gray = if (mw, mh) != (width, height) {
        tracing::debug!(
            mask_width = mw,
            mask_height = mh,
            width,
            height,
            "resizing mask to the working frame size"
        );
        image::imageops::resize(&gray, width, height, FilterType::Triangle)
    } else {
        gray
    };

    let data = gray.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect();
    Mask::from_raw(width, height, data)
}

/// Encode a processed frame as a JPEG data URL at [`JPEG_QUALITY`].
pub fn encode_frame(frame: &Frame) -> FramefxResult<String> {
    frame.validate()?;
    let mut buffer = Vec::new();
    {
        let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
        encoder
            .write_image(
                &frame.data,
                frame.width,
                frame.height,
                ExtendedColorType::Rgb8,
            )
            .context("failed to encode JPEG")?;
    }
    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&buffer)))
}

fn frame_from_rgb(rgb: RgbImage) -> FramefxResult<Frame> {
    let (width, height) = rgb.dimensions();
    Frame::from_raw(width, height, rgb.into_raw())
}

fn decode_base64_payload(data: &str) -> FramefxResult<Vec<u8>> {
    let payload = match data.split_once(',') {
        Some((_, rest)) => rest,
        None => data,
    };
    BASE64
        .decode(payload.trim())
        .map_err(|e| FramefxError::validation(format!("invalid base64 frame data: {e}")))
}
