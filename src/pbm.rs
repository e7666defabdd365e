//! Binary PBM (`P4`) reading and writing.
//!
//! ## File Layout
//! ```text
//! P4 <ws> [comments] <width> <ws> [comments] <height> <1 whitespace byte> <pixels>
//! ```
//! Comments start with `#` and run to the end of the line. Pixel data is
//! row-major, `ceil(width / 8)` bytes per row, MSB-first, with bit 1 for
//! BLACK. Padding bits at the end of each row are written as WHITE and
//! ignored on read.
//!
//! Rows are run-length encoded as their bytes are read, in fixed-size
//! chunks. Neither a raw row nor a packed row is allocated up front, so
//! memory use follows the data actually present rather than the header.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::bits::{pack_row, row_bytes, unpack_byte};
use crate::color::Color;
use crate::error::ImageError;
use crate::image::{check_dimensions, Image};
use crate::row::{Row, RowBuilder};

/// Magic token of binary PBM files.
const MAGIC: &[u8; 2] = b"P4";

/// Packed bytes read per call while decoding a row.
const CHUNK_BYTES: usize = 4096;

impl Image {
    /// Load an image from a binary PBM file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        load(path)
    }

    /// Save the image as a binary PBM file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        save(self, path)
    }
}

/// Load an image from a binary PBM file.
pub fn load(path: impl AsRef<Path>) -> Result<Image, ImageError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let img = read_from(BufReader::new(file))?;

    debug!(
        "loaded {}: {}x{}, {} runs",
        path.display(),
        img.width(),
        img.height(),
        img.run_count()
    );
    Ok(img)
}

/// Save an image as a binary PBM file.
pub fn save(img: &Image, path: impl AsRef<Path>) -> Result<(), ImageError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(img, &mut writer)?;
    writer.flush()?;

    debug!("saved {}: {}x{}", path.display(), img.width(), img.height());
    Ok(())
}

/// Parse a binary PBM stream.
pub fn read_from<R: BufRead>(mut reader: R) -> Result<Image, ImageError> {
    let mut magic = [0u8; 2];
    if let Err(e) = reader.read_exact(&mut magic) {
        return Err(if e.kind() == io::ErrorKind::UnexpectedEof {
            ImageError::InvalidMagic
        } else {
            e.into()
        });
    }
    if &magic != MAGIC {
        return Err(ImageError::InvalidMagic);
    }

    skip_blanks(&mut reader)?;
    let width = read_decimal(&mut reader, "width")?;
    skip_blanks(&mut reader)?;
    let height = read_decimal(&mut reader, "height")?;

    match read_byte(&mut reader)? {
        Some(b) if b.is_ascii_whitespace() => {}
        _ => return Err(ImageError::MissingSeparator),
    }

    check_dimensions(width, height)?;

    let mut chunk = [0u8; CHUNK_BYTES];
    let mut rows = Vec::with_capacity(height.min(4096) as usize);
    for _ in 0..height {
        rows.push(read_row(&mut reader, width, &mut chunk)?);
    }

    Ok(Image::from_parts(width, height, rows))
}

/// Decode one packed row of `width` pixels.
fn read_row<R: BufRead>(reader: &mut R, width: u32, chunk: &mut [u8]) -> Result<Row, ImageError> {
    let mut builder = RowBuilder::new();
    let mut pixels_left = width as usize;
    let mut bytes_left = row_bytes(pixels_left);

    while bytes_left > 0 {
        let n = bytes_left.min(chunk.len());
        reader.read_exact(&mut chunk[..n])?;
        for &byte in &chunk[..n] {
            let count = pixels_left.min(8);
            for bit in unpack_byte(byte, count) {
                builder.push(Color::from_bit(bit));
            }
            pixels_left -= count;
        }
        bytes_left -= n;
    }

    builder
        .finish()
        .ok_or(ImageError::InvalidDimensions { width, height: 1 })
}

/// Serialize an image as a binary PBM stream.
pub fn write_to<W: Write>(img: &Image, mut writer: W) -> Result<(), ImageError> {
    write!(writer, "P4\n{} {}\n", img.width(), img.height())?;

    let mut packed = vec![0u8; row_bytes(img.width() as usize)];
    for row in img.rows() {
        pack_row(&row.decompress(), &mut packed);
        writer.write_all(&packed)?;
    }

    Ok(())
}

/// Look at the next byte without consuming it.
fn peek_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

fn read_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    let byte = peek_byte(reader)?;
    if byte.is_some() {
        reader.consume(1);
    }
    Ok(byte)
}

/// Skip whitespace and `#` comment lines.
fn skip_blanks<R: BufRead>(reader: &mut R) -> io::Result<()> {
    while let Some(b) = peek_byte(reader)? {
        if b == b'#' {
            let mut comment = Vec::new();
            reader.read_until(b'\n', &mut comment)?;
        } else if b.is_ascii_whitespace() {
            reader.consume(1);
        } else {
            break;
        }
    }
    Ok(())
}

/// Read an unsigned decimal header field.
fn read_decimal<R: BufRead>(reader: &mut R, field: &'static str) -> Result<u32, ImageError> {
    let mut value: Option<u32> = None;

    while let Some(b) = peek_byte(reader)? {
        if !b.is_ascii_digit() {
            break;
        }
        reader.consume(1);
        let digit = u32::from(b - b'0');
        value = Some(
            value
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or(ImageError::InvalidHeader { field })?,
        );
    }

    value.ok_or(ImageError::InvalidHeader { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color::{Black, White};

    fn encode(img: &Image) -> Vec<u8> {
        let mut out = Vec::new();
        write_to(img, &mut out).unwrap();
        out
    }

    #[test]
    fn test_write_layout() {
        #[rustfmt::skip]
        let pixels = [
            1, 0, 0, 0, 0, 0, 0, 1, 1, 1,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
        ];
        let img = Image::from_pixels(10, 2, &pixels).unwrap();
        let bytes = encode(&img);
        assert_eq!(&bytes[..8], b"P4\n10 2\n");
        assert_eq!(&bytes[8..], &[0x81, 0xC0, 0x00, 0x40]);
    }

    #[test]
    fn test_read_scenario() {
        let data = b"P4\n4 2\n\xC0\x30";
        let img = read_from(&data[..]).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.row(0).unwrap().first_color(), Black);
        assert_eq!(img.row(0).unwrap().runs(), &[2, 2]);
        assert_eq!(img.row(1).unwrap().first_color(), White);
        assert_eq!(img.row(1).unwrap().runs(), &[2, 2]);
    }

    #[test]
    fn test_read_with_comments() {
        let data = b"P4\n# created by hand\n# second comment\n3 # trailing\n1\n\xA0";
        let img = read_from(&data[..]).unwrap();
        assert_eq!(img.to_pixels(), vec![1, 0, 1]);
    }

    #[test]
    fn test_padding_is_ignored() {
        let data = b"P4 3 1 \xFF";
        let img = read_from(&data[..]).unwrap();
        assert_eq!(img, Image::new(3, 1, Black).unwrap());
    }

    #[test]
    fn test_stream_roundtrip() {
        let img = Image::chessboard(12, 6, 3, Black).unwrap();
        let bytes = encode(&img);
        assert_eq!(read_from(&bytes[..]).unwrap(), img);
    }

    #[test]
    fn test_bad_magic() {
        assert!(matches!(read_from(&b"P1\n1 1\n0"[..]), Err(ImageError::InvalidMagic)));
        assert!(matches!(read_from(&b"P"[..]), Err(ImageError::InvalidMagic)));
    }

    #[test]
    fn test_bad_dimensions() {
        assert!(matches!(
            read_from(&b"P4\nx 1\n"[..]),
            Err(ImageError::InvalidHeader { field: "width" })
        ));
        assert!(matches!(
            read_from(&b"P4\n8 \n"[..]),
            Err(ImageError::InvalidHeader { field: "height" })
        ));
        assert!(matches!(
            read_from(&b"P4\n99999999999 1\n"[..]),
            Err(ImageError::InvalidHeader { field: "width" })
        ));
        assert!(matches!(
            read_from(&b"P4\n0 1\n"[..]),
            Err(ImageError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            read_from(&b"P4\n8 1"[..]),
            Err(ImageError::MissingSeparator)
        ));
        assert!(matches!(
            read_from(&b"P4\n8 1x\xFF"[..]),
            Err(ImageError::MissingSeparator)
        ));
    }

    #[test]
    fn test_huge_header_on_short_data() {
        for data in [
            &b"P4\n4294967295 1\n\x00"[..],
            &b"P4\n8 4294967295\n\xFF"[..],
            &b"P4 4294967295 4294967295 "[..],
        ] {
            match read_from(data) {
                Err(ImageError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_read_wide_row_across_chunks() {
        // The row spans three read chunks; the black pair straddles the first boundary.
        let width = (CHUNK_BYTES * 8 * 2 + 5) as u32;
        let mut pixels = vec![0u8; width as usize];
        pixels[CHUNK_BYTES * 8 - 1] = 1;
        pixels[CHUNK_BYTES * 8] = 1;
        pixels[width as usize - 1] = 1;
        let img = Image::from_pixels(width, 1, &pixels).unwrap();

        let decoded = read_from(&encode(&img)[..]).unwrap();
        assert_eq!(decoded, img);
        assert_eq!(decoded.row(0).unwrap().run_count(), 4);
    }

    #[test]
    fn test_truncated_pixels() {
        let err = read_from(&b"P4\n16 2\n\xFF\xFF\xFF"[..]).unwrap_err();
        match err {
            ImageError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected error: {other}"),
        }
    }
}
