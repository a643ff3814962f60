use crate::foundation::error::{FramefxError, FramefxResult};

/// Dense RGB8 image, row-major, 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // len == width * height * 3
}

impl Frame {
    pub const CHANNELS: usize = 3;

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> FramefxResult<Self> {
        let expected = Self::expected_len(width, height)?;
        if data.len() != expected {
            return Err(FramefxError::invalid_frame(format!(
                "frame buffer length {} does not match {}x{} rgb ({} bytes)",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> FramefxResult<Self> {
        let expected = Self::expected_len(width, height)?;
        let mut data = Vec::with_capacity(expected);
        for _ in 0..expected / Self::CHANNELS {
            data.extend_from_slice(&rgb);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn expected_len(width: u32, height: u32) -> FramefxResult<usize> {
        if width == 0 || height == 0 {
            return Err(FramefxError::invalid_frame("frame dimensions must be > 0"));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(Self::CHANNELS))
            .ok_or_else(|| FramefxError::invalid_frame("frame dimensions overflow"))
    }

    /// Fields are public, so a frame built by hand can disagree with itself.
    /// The pipeline entry point revalidates before touching pixels.
    pub fn validate(&self) -> FramefxResult<()> {
        let expected = Self::expected_len(self.width, self.height)?;
        if self.data.len() != expected {
            return Err(FramefxError::invalid_frame(format!(
                "frame buffer length {} does not match {}x{} rgb",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * Self::CHANNELS;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.width as usize * Self::CHANNELS;
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    fn contains_region(&self, region: Region) -> bool {
        u64::from(region.x) + u64::from(region.width) <= u64::from(self.width)
            && u64::from(region.y) + u64::from(region.height) <= u64::from(self.height)
    }

    /// Copy of the pixels under `region`, which must lie within the frame.
    pub fn crop(&self, region: Region) -> FramefxResult<Frame> {
        if !self.contains_region(region) {
            return Err(FramefxError::dimension_mismatch(format!(
                "region {}x{}+{}+{} exceeds frame {}x{}",
                region.width, region.height, region.x, region.y, self.width, self.height
            )));
        }
        let row_bytes = region.width as usize * Self::CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * region.height as usize);
        for y in region.y..region.y + region.height {
            let src = self.row(y);
            let x0 = region.x as usize * Self::CHANNELS;
            data.extend_from_slice(&src[x0..x0 + row_bytes]);
        }
        Frame::from_raw(region.width, region.height, data)
    }

    /// Write `src` back under `region`. Sizes must agree exactly.
    pub fn blit(&mut self, region: Region, src: &Frame) -> FramefxResult<()> {
        if src.width != region.width || src.height != region.height {
            return Err(FramefxError::dimension_mismatch(format!(
                "blit source {}x{} does not match region {}x{}",
                src.width, src.height, region.width, region.height
            )));
        }
        if !self.contains_region(region) {
            return Err(FramefxError::dimension_mismatch(format!(
                "region {}x{}+{}+{} exceeds frame {}x{}",
                region.width, region.height, region.x, region.y, self.width, self.height
            )));
        }
        let row_bytes = region.width as usize * Self::CHANNELS;
        for dy in 0..region.height {
            let dst = self.row_mut(region.y + dy);
            let x0 = region.x as usize * Self::CHANNELS;
            let src_row = src.row(dy);
            dst[x0..x0 + row_bytes].copy_from_slice(&src_row[..row_bytes]);
        }
        Ok(())
    }
}

/// Per-pixel blend weight in [0,1]. 1 keeps the foreground.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>, // len == width * height
}

impl Mask {
    /// Ingests raw probabilities; out-of-range and non-finite values are
    /// clamped into [0,1] rather than rejected.
    pub fn from_raw(width: u32, height: u32, mut data: Vec<f32>) -> FramefxResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramefxError::validation("mask dimensions must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| FramefxError::validation("mask dimensions overflow"))?;
        if data.len() != expected {
            return Err(FramefxError::validation(format!(
                "mask buffer length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        for v in &mut data {
            *v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, value: f32) -> FramefxResult<Self> {
        if width == 0 || height == 0 {
            return Err(FramefxError::validation("mask dimensions must be > 0"));
        }
        let px = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| FramefxError::validation("mask dimensions overflow"))?;
        Ok(Self {
            width,
            height,
            data: vec![value.clamp(0.0, 1.0); px],
        })
    }

    pub fn matches_frame(&self, frame: &Frame) -> bool {
        self.width == frame.width && self.height == frame.height
    }

    /// Binary foreground indicator: 1 where the probability exceeds `cutoff`.
    pub fn threshold(&self, cutoff: f32) -> Mask {
        Mask {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .map(|&p| if p > cutoff { 1.0 } else { 0.0 })
                .collect(),
        }
    }
}

/// Detected face bounding rectangle in pixel coordinates. Signed so that
/// detections partially off-frame stay representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceBox {
    /// Intersect with the frame bounds. `None` when nothing remains.
    pub fn clamp_to(self, frame_width: u32, frame_height: u32) -> Option<Region> {
        let fw = i64::from(frame_width);
        let fh = i64::from(frame_height);
        let x0 = i64::from(self.x).clamp(0, fw);
        let y0 = i64::from(self.y).clamp(0, fh);
        let x1 = (i64::from(self.x) + i64::from(self.width)).clamp(0, fw);
        let y1 = (i64::from(self.y) + i64::from(self.height)).clamp(0, fh);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Region {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }

    /// Rescale by a uniform factor, rounding to the nearest pixel. Used when
    /// the working frame is a downscaled copy of the detected one.
    pub fn scaled(self, factor: f32) -> FaceBox {
        let s = |v: i32| (v as f32 * factor).round() as i32;
        FaceBox {
            x: s(self.x),
            y: s(self.y),
            width: s(self.width),
            height: s(self.height),
        }
    }
}

/// A [`FaceBox`] clamped to frame bounds. Non-empty by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_from_raw_validates_length() {
        assert!(Frame::from_raw(2, 2, vec![0; 12]).is_ok());
        assert!(Frame::from_raw(2, 2, vec![0; 11]).is_err());
        assert!(Frame::from_raw(0, 2, vec![]).is_err());
    }

    #[test]
    fn frame_filled_is_uniform() {
        let f = Frame::filled(3, 2, [10, 20, 30]).unwrap();
        assert_eq!(f.data.len(), 18);
        for px in f.data.chunks_exact(3) {
            assert_eq!(px, [10, 20, 30]);
        }
    }

    #[test]
    fn crop_blit_roundtrip() {
        let mut f = Frame::filled(4, 4, [1, 2, 3]).unwrap();
        let region = Region {
            x: 1,
            y: 1,
            width: 2,
            height: 2,
        };
        let mut sub = f.crop(region).unwrap();
        for px in sub.data.chunks_exact_mut(3) {
            px.copy_from_slice(&[9, 9, 9]);
        }
        f.blit(region, &sub).unwrap();
        assert_eq!(f.row(0), Frame::filled(4, 1, [1, 2, 3]).unwrap().row(0));
        assert_eq!(&f.row(1)[3..9], &[9, 9, 9, 9, 9, 9]);
        assert_eq!(&f.row(1)[..3], &[1, 2, 3]);
    }

    #[test]
    fn crop_out_of_bounds_is_rejected() {
        let f = Frame::filled(4, 4, [0, 0, 0]).unwrap();
        let r = Region {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
        };
        assert!(f.crop(r).is_err());
    }

    #[test]
    fn mask_ingest_clamps() {
        let m = Mask::from_raw(2, 1, vec![-0.5, 1.5]).unwrap();
        assert_eq!(m.data, vec![0.0, 1.0]);
    }

    #[test]
    fn mask_threshold_is_binary() {
        let m = Mask::from_raw(3, 1, vec![0.05, 0.1, 0.2]).unwrap();
        let t = m.threshold(0.1);
        assert_eq!(t.data, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn face_box_clamps_to_frame() {
        let b = FaceBox {
            x: -10,
            y: 5,
            width: 30,
            height: 30,
        };
        let r = b.clamp_to(20, 20).unwrap();
        assert_eq!((r.x, r.y, r.width, r.height), (0, 5, 20, 15));

        let off = FaceBox {
            x: 25,
            y: 0,
            width: 10,
            height: 10,
        };
        assert!(off.clamp_to(20, 20).is_none());

        let degenerate = FaceBox {
            x: 5,
            y: 5,
            width: 0,
            height: 10,
        };
        assert!(degenerate.clamp_to(20, 20).is_none());
    }

    #[test]
    fn face_box_scaled_rounds() {
        let b = FaceBox {
            x: 10,
            y: 21,
            width: 100,
            height: 50,
        };
        let s = b.scaled(0.5);
        assert_eq!((s.x, s.y, s.width, s.height), (5, 11, 50, 25));
    }
}
