//! Row hasher (spec §4.1).
//!
//! Hashes each row of a rectangle directly out of the caller's pixel
//! buffer — no copying, no allocation beyond the output vector. Bytes past
//! `x + w*bpp` within a stride row never enter the hash.

use ahash::AHasher;
use std::hash::Hasher;

use crate::error::MotionError;

/// Hash every row of the rectangle `(x, y, w, h)` found in `pixels`,
/// returning exactly `h` values in top-to-bottom order.
///
/// `stride` is the byte offset between the start of successive rows;
/// `bpp` is bytes per pixel. Fails with [`MotionError::InvalidGeometry`]
/// if `stride < w * bpp` or `pixels` is too short for `y + h` rows at
/// `stride`.
pub fn hash_rows(
    pixels: &[u8],
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    stride: usize,
    bpp: usize,
) -> Result<Vec<u64>, MotionError> {
    let row_bytes = (w as usize)
        .checked_mul(bpp)
        .ok_or(MotionError::InvalidGeometry("width * bpp overflows"))?;
    if stride < row_bytes {
        return Err(MotionError::InvalidGeometry(
            "stride is smaller than one row's width * bpp",
        ));
    }
    let x_offset = (x as usize)
        .checked_mul(bpp)
        .ok_or(MotionError::InvalidGeometry("x * bpp overflows"))?;
    let last_row = (y as usize)
        .checked_add(h as usize)
        .and_then(|v| v.checked_sub(1))
        .ok_or(MotionError::InvalidGeometry("y + h overflows"))?;
    let required_len = last_row
        .checked_mul(stride)
        .and_then(|v| v.checked_add(x_offset))
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(MotionError::InvalidGeometry("rectangle extent overflows"))?;
    if pixels.len() < required_len {
        return Err(MotionError::InvalidGeometry(
            "buffer too short for y + h rows at the given stride",
        ));
    }

    let mut out = Vec::with_capacity(h as usize);
    for row in 0..h as usize {
        let row_start = (y as usize + row) * stride + x_offset;
        let row_slice = &pixels[row_start..row_start + row_bytes];
        let mut hasher = AHasher::default();
        hasher.write(row_slice);
        out.push(hasher.finish());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_rows_hash_identically() {
        let stride = 8;
        let pixels = vec![7u8; stride * 3];
        let hashes = hash_rows(&pixels, 0, 0, 2, 3, stride, 4).unwrap();
        assert_eq!(hashes.len(), 3);
        assert_eq!(hashes[0], hashes[1]);
        assert_eq!(hashes[1], hashes[2]);
    }

    #[test]
    fn differing_row_content_hashes_differently() {
        let stride = 4;
        let mut pixels = vec![0u8; stride * 2];
        pixels[stride] = 1; // second row differs in its first byte
        let hashes = hash_rows(&pixels, 0, 0, 1, 2, stride, 4).unwrap();
        assert_ne!(hashes[0], hashes[1]);
    }

    #[test]
    fn bytes_past_width_do_not_affect_hash() {
        let stride = 8;
        let mut a = vec![3u8; stride * 2];
        let mut b = a.clone();
        // Differ only in the padding bytes past x + w*bpp (w=1, bpp=4 -> visible=4 bytes).
        b[4] = 0xFF;
        b[5] = 0xAA;
        let ha = hash_rows(&a, 0, 0, 1, 2, stride, 4).unwrap();
        let hb = hash_rows(&b, 0, 0, 1, 2, stride, 4).unwrap();
        assert_eq!(ha, hb);

        // Sanity: changing a visible byte *does* change the hash.
        a[0] = 0xFF;
        let ha2 = hash_rows(&a, 0, 0, 1, 2, stride, 4).unwrap();
        assert_ne!(ha, ha2);
    }

    #[test]
    fn stride_smaller_than_row_is_invalid_geometry() {
        let pixels = vec![0u8; 100];
        let err = hash_rows(&pixels, 0, 0, 4, 2, 8, 4).unwrap_err();
        assert_eq!(
            err,
            MotionError::InvalidGeometry("stride is smaller than one row's width * bpp")
        );
    }

    #[test]
    fn buffer_too_short_is_invalid_geometry() {
        let pixels = vec![0u8; 10];
        let err = hash_rows(&pixels, 0, 0, 4, 4, 16, 4).unwrap_err();
        assert!(matches!(err, MotionError::InvalidGeometry(_)));
    }

    #[test]
    fn honors_x_y_offset_within_a_larger_buffer() {
        // A 4x4 bpp=1 buffer; rectangle is the bottom-right 2x2 corner.
        let stride = 4;
        let pixels = vec![
            1, 2, 3, 4, //
            5, 6, 7, 8, //
            9, 10, 20, 21, //
            11, 12, 30, 31, //
        ];
        let hashes = hash_rows(&pixels, 2, 2, 2, 2, stride, 1).unwrap();
        let mut hasher0 = AHasher::default();
        hasher0.write(&[20u8, 21u8]);
        assert_eq!(hashes[0], hasher0.finish());
        let mut hasher1 = AHasher::default();
        hasher1.write(&[30u8, 31u8]);
        assert_eq!(hashes[1], hasher1.finish());
    }
}
