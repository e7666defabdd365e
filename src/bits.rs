//! Packing of raw pixel rows into PBM bytes.
//!
//! ## Bit Ordering
//! Pixels are packed MSB-first within each byte:
//! - Pixel 0 of a byte goes to bit position 7
//! - Pixel 7 of a byte goes to bit position 0
//!
//! A row of `width` pixels occupies `ceil(width / 8)` bytes. Unused bits in
//! the final byte are WHITE (0).

/// Number of packed bytes needed for a row of `width` pixels.
#[inline]
pub fn row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}

/// Pack raw pixels (0 or non-zero) into MSB-first bytes.
///
/// Pixels past the end of `raw` are written as WHITE padding.
///
/// # Panics
/// Panics if `out` is shorter than `row_bytes(raw.len())`.
pub fn pack_row(raw: &[u8], out: &mut [u8]) {
    assert!(out.len() >= row_bytes(raw.len()));

    out.fill(0);
    for (i, &pixel) in raw.iter().enumerate() {
        if pixel != 0 {
            out[i >> 3] |= 0x80 >> (i & 7);
        }
    }
}

/// Unpack `width` pixels from MSB-first bytes, discarding padding bits.
///
/// # Panics
/// Panics if `bytes` is shorter than `row_bytes(width)`.
pub fn unpack_row(bytes: &[u8], width: usize) -> Vec<u8> {
    assert!(bytes.len() >= row_bytes(width));

    bytes
        .iter()
        .enumerate()
        .flat_map(|(i, &byte)| unpack_byte(byte, width.saturating_sub(i * 8).min(8)))
        .collect()
}

/// The leading `count` pixels (at most 8) of one packed byte, MSB first.
pub fn unpack_byte(byte: u8, count: usize) -> impl Iterator<Item = u8> {
    (0..count.min(8)).map(move |i| (byte >> (7 - i)) & 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_bytes() {
        assert_eq!(row_bytes(1), 1);
        assert_eq!(row_bytes(8), 1);
        assert_eq!(row_bytes(9), 2);
        assert_eq!(row_bytes(16), 2);
    }

    #[test]
    fn test_pack_msb_first() {
        let mut out = [0u8; 1];
        pack_row(&[1, 0, 0, 0, 0, 0, 0, 1], &mut out);
        assert_eq!(out, [0x81]);

        pack_row(&[1, 1, 0, 1, 0, 0, 0, 0], &mut out);
        assert_eq!(out, [0xD0]);
    }

    #[test]
    fn test_pack_pads_white() {
        let mut out = [0xFFu8; 2];
        pack_row(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1], &mut out);
        assert_eq!(out, [0xFF, 0xC0]);
    }

    #[test]
    fn test_unpack_discards_padding() {
        let raw = unpack_row(&[0xFF, 0xFF], 10);
        assert_eq!(raw.len(), 10);
        assert!(raw.iter().all(|&p| p == 1));

        assert_eq!(unpack_row(&[0xA0], 3), vec![1, 0, 1]);
    }

    #[test]
    fn test_unpack_byte() {
        assert_eq!(unpack_byte(0xA5, 8).collect::<Vec<_>>(), vec![1, 0, 1, 0, 0, 1, 0, 1]);
        assert_eq!(unpack_byte(0xA5, 3).collect::<Vec<_>>(), vec![1, 0, 1]);
        assert_eq!(unpack_byte(0xFF, 0).count(), 0);
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        let raw = vec![0, 1, 1, 0, 1, 0, 0, 1, 1, 1, 0];
        let mut out = vec![0u8; row_bytes(raw.len())];
        pack_row(&raw, &mut out);
        assert_eq!(unpack_row(&out, raw.len()), raw);
    }
}
