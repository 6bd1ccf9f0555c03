//! Fixed-point codec for bike state coordinates
//!
//! Coordinates are stored as signed 8-bit offsets from a full-precision
//! reference point, scaled by a per-record maximum deviation. Rotation
//! matrices keep only their first column, quantized to two bytes.

use glam::{Mat2, Vec2};

/// Smallest maximum deviation accepted by [`encode8`].
///
/// A state whose tracked joints all sit on the frame center would otherwise
/// divide by zero.
pub const MIN_MAX_DIFF: f32 = 1.0e-6;

// ============================================================================
// Coordinates: signed 8-bit offsets
// ============================================================================

/// Encode `value` as an offset from `reference` in `[-127, 127]`
///
/// The full code range maps to `[-max_diff, max_diff]`. Values outside that
/// interval are clamped.
pub fn encode8(reference: f32, max_diff: f32, value: f32) -> i8 {
    let max_diff = max_diff.max(MIN_MAX_DIFF);
    let code = (127.0 * (value - reference) / max_diff).round();
    code.clamp(-127.0, 127.0) as i8
}

/// Decode an 8-bit offset produced by [`encode8`]
pub fn decode8(reference: f32, max_diff: f32, code: i8) -> f32 {
    reference + (code as f32 / 127.0) * max_diff
}

/// Encode both components of a point relative to `reference`
pub fn encode8_point(reference: Vec2, max_diff: Vec2, point: Vec2) -> [i8; 2] {
    [
        encode8(reference.x, max_diff.x, point.x),
        encode8(reference.y, max_diff.y, point.y),
    ]
}

/// Decode a point encoded with [`encode8_point`]
pub fn decode8_point(reference: Vec2, max_diff: Vec2, code: [i8; 2]) -> Vec2 {
    Vec2::new(
        decode8(reference.x, max_diff.x, code[0]),
        decode8(reference.y, max_diff.y, code[1]),
    )
}

// ============================================================================
// Unsigned ranges (engine RPM)
// ============================================================================

/// Quantize `value` over `[min, max]` to a byte
///
/// An empty or inverted range encodes everything as 0.
pub fn encode_unit8(value: f32, min: f32, max: f32) -> u8 {
    let span = max - min;
    if span <= 0.0 {
        return 0;
    }
    (255.0 * (value - min) / span).round().clamp(0.0, 255.0) as u8
}

/// Map a byte from [`encode_unit8`] back onto `[min, max]`
pub fn decode_unit8(code: u8, min: f32, max: f32) -> f32 {
    min + (max - min) * code as f32 / 255.0
}

// ============================================================================
// Rotations: 16-bit first column
// ============================================================================

/// Pack a rotation matrix into 16 bits
///
/// Bit layout: `[x:8][y:8]` where `(x, y)` is the first column, each
/// component mapped from `[-1, 1]` to `[0, 255]` via `round(127 * v + 127)`.
pub fn encode_rotation(m: Mat2) -> u16 {
    let quantize = |v: f32| (127.0 * v + 127.0).round().clamp(0.0, 255.0) as u16;
    let col = m.x_axis;
    (quantize(col.x) << 8) | quantize(col.y)
}

/// Rebuild a rotation matrix from [`encode_rotation`] output
///
/// The decoded column is renormalized and the second column derived as its
/// perpendicular, so the result is always orthonormal. A zero-length column
/// decodes to identity.
pub fn decode_rotation(packed: u16) -> Mat2 {
    let dequantize = |b: u16| (b as f32 - 127.0) / 127.0;
    let col = Vec2::new(dequantize(packed >> 8), dequantize(packed & 0xFF));

    let len = col.length();
    if len == 0.0 {
        return Mat2::IDENTITY;
    }

    let col = col / len;
    Mat2::from_cols(col, col.perp())
}

/// Bring an interpolated or drifted matrix back to a pure rotation
pub fn orthonormalize(m: Mat2) -> Mat2 {
    let col = m.x_axis.normalize_or_zero();
    if col == Vec2::ZERO {
        return Mat2::IDENTITY;
    }
    Mat2::from_cols(col, col.perp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode8_basic() {
        assert_eq!(encode8(0.0, 1.0, 0.0), 0);
        assert_eq!(encode8(0.0, 1.0, 1.0), 127);
        assert_eq!(encode8(0.0, 1.0, -1.0), -127);
        assert_eq!(encode8(10.0, 2.0, 11.0), 64);
    }

    #[test]
    fn test_encode8_clamps() {
        assert_eq!(encode8(0.0, 1.0, 5.0), 127);
        assert_eq!(encode8(0.0, 1.0, -5.0), -127);
    }

    #[test]
    fn test_encode8_zero_max_diff() {
        // Everything on the reference stays at 0, anything else saturates
        assert_eq!(encode8(3.0, 0.0, 3.0), 0);
        assert_eq!(encode8(3.0, 0.0, 3.5), 127);
        assert_eq!(encode8(3.0, 0.0, 2.5), -127);
        assert_eq!(decode8(3.0, 0.0, 127), 3.0);
    }

    #[test]
    fn test_decode8_error_bound() {
        let reference = 12.5;
        let max_diff = 1.7;
        for i in -100..=100 {
            let value = reference + max_diff * (i as f32 / 100.0);
            let decoded = decode8(reference, max_diff, encode8(reference, max_diff, value));
            assert!((decoded - value).abs() <= max_diff / 127.0);
        }
    }

    #[test]
    fn test_point_codec() {
        let reference = Vec2::new(1.0, -2.0);
        let max_diff = Vec2::new(0.5, 2.0);
        let p = Vec2::new(1.25, -1.0);
        let decoded = decode8_point(reference, max_diff, encode8_point(reference, max_diff, p));
        assert!((decoded - p).abs().max_element() <= 2.0 / 127.0);
    }

    #[test]
    fn test_unit8_range() {
        assert_eq!(encode_unit8(400.0, 400.0, 8000.0), 0);
        assert_eq!(encode_unit8(8000.0, 400.0, 8000.0), 255);
        assert_eq!(encode_unit8(9000.0, 400.0, 8000.0), 255);
        assert_eq!(encode_unit8(10.0, 400.0, 8000.0), 0);
        assert_eq!(encode_unit8(5.0, 1.0, 1.0), 0);

        let rpm = 3210.0;
        let decoded = decode_unit8(encode_unit8(rpm, 400.0, 8000.0), 400.0, 8000.0);
        assert!((decoded - rpm).abs() <= 7600.0 / 255.0);
    }

    #[test]
    fn test_rotation_identity() {
        let packed = encode_rotation(Mat2::IDENTITY);
        assert_eq!(packed >> 8, 254);
        assert_eq!(packed & 0xFF, 127);
        let m = decode_rotation(packed);
        assert!(m.abs_diff_eq(Mat2::IDENTITY, 1e-6));
    }

    #[test]
    fn test_rotation_roundtrip_angles() {
        for step in 0..36 {
            let angle = step as f32 * 10.0_f32.to_radians();
            let m = Mat2::from_angle(angle);
            let decoded = decode_rotation(encode_rotation(m));

            // Orthonormal with unit determinant
            assert!((decoded.determinant() - 1.0).abs() < 1e-5);
            assert!(decoded.x_axis.dot(decoded.y_axis).abs() < 1e-5);

            // Within a bounded angular error
            let cos = decoded.x_axis.dot(m.x_axis).clamp(-1.0, 1.0);
            assert!(cos.acos() < 0.02, "angle {angle} drifted");
        }
    }

    #[test]
    fn test_rotation_zero_column_is_identity() {
        // 127 maps back to exactly 0.0 on both axes
        let m = decode_rotation((127 << 8) | 127);
        assert_eq!(m, Mat2::IDENTITY);
    }

    #[test]
    fn test_rotation_second_encode_is_stable() {
        let m = Mat2::from_angle(0.73);
        let once = encode_rotation(m);
        let twice = encode_rotation(decode_rotation(once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_orthonormalize() {
        let m = Mat2::from_cols(Vec2::new(2.0, 0.0), Vec2::new(0.3, 0.1));
        assert!(orthonormalize(m).abs_diff_eq(Mat2::IDENTITY, 1e-6));
        assert_eq!(orthonormalize(Mat2::ZERO), Mat2::IDENTITY);
    }
}
