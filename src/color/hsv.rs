//! RGB <-> HSV conversion. Hue in degrees 0-360, saturation and value 0-1.

use crate::foundation::core::Frame;

/// Convert RGB channels (0-255) to HSV (hue in degrees 0-360, saturation/value 0-1).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let rf = f32::from(r) / 255.0;
    let gf = f32::from(g) / 255.0;
    let bf = f32::from(b) / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let hue = if delta.abs() < f32::EPSILON {
        0.0
    } else if (max - rf).abs() < f32::EPSILON {
        60.0 * (((gf - bf) / delta) % 6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    let hue = if hue < 0.0 { hue + 360.0 } else { hue };
    let saturation = if max.abs() < f32::EPSILON {
        0.0
    } else {
        delta / max
    };
    (hue, saturation, max)
}

/// Convert HSV (hue in degrees, saturation/value 0-1) to RGB channels (0-255).
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    if s <= 0.0 {
        let val = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        return (val, val, val);
    }

    let hue = if h.is_nan() { 0.0 } else { h.rem_euclid(360.0) };
    let c = v * s;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match hue {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |value: f32| -> u8 { ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8 };

    (to_byte(r1), to_byte(g1), to_byte(b1))
}

/// Whole-frame HSV plane, interleaved h,s,v per pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct HsvFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>, // len == width * height * 3
}

pub fn frame_to_hsv(frame: &Frame) -> HsvFrame {
    let mut data = Vec::with_capacity(frame.data.len());
    for px in frame.data.chunks_exact(3) {
        let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
        data.extend_from_slice(&[h, s, v]);
    }
    HsvFrame {
        width: frame.width,
        height: frame.height,
        data,
    }
}

pub fn hsv_to_frame(hsv: &HsvFrame) -> Frame {
    let mut data = Vec::with_capacity(hsv.data.len());
    for px in hsv.data.chunks_exact(3) {
        let (r, g, b) = hsv_to_rgb(px[0], px[1], px[2]);
        data.extend_from_slice(&[r, g, b]);
    }
    Frame {
        width: hsv.width,
        height: hsv.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_map_to_expected_hues() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0.0, 1.0, 1.0));
        let (h, s, v) = rgb_to_hsv(0, 255, 0);
        assert_eq!((h, s, v), (120.0, 1.0, 1.0));
        let (h, _, _) = rgb_to_hsv(0, 0, 255);
        assert_eq!(h, 240.0);
    }

    #[test]
    fn gray_has_zero_saturation() {
        let (h, s, v) = rgb_to_hsv(128, 128, 128);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(hsv_to_rgb(h, s, v), (128, 128, 128));
    }

    #[test]
    fn round_trip_stays_within_one_step() {
        for r in (0..=255).step_by(17) {
            for g in (0..=255).step_by(23) {
                for b in (0..=255).step_by(29) {
                    let (h, s, v) = rgb_to_hsv(r as u8, g as u8, b as u8);
                    let (r2, g2, b2) = hsv_to_rgb(h, s, v);
                    assert!(
                        (i16::from(r2) - r as i16).abs() <= 1
                            && (i16::from(g2) - g as i16).abs() <= 1
                            && (i16::from(b2) - b as i16).abs() <= 1,
                        "({r},{g},{b}) -> ({r2},{g2},{b2})"
                    );
                }
            }
        }
    }

    #[test]
    fn frame_round_trip_preserves_dimensions() {
        let f = Frame::filled(3, 2, [10, 200, 90]).unwrap();
        let hsv = frame_to_hsv(&f);
        assert_eq!(hsv.data.len(), f.data.len());
        let back = hsv_to_frame(&hsv);
        assert_eq!(back.width, 3);
        assert_eq!(back.height, 2);
        for (a, b) in back.data.iter().zip(f.data.iter()) {
            assert!((i16::from(*a) - i16::from(*b)).abs() <= 1);
        }
    }
}
