//! Run-length encoded black/white image store.
//!
//! An [`Image`] owns its width, height and exactly `height` [`Row`]s, each
//! covering exactly `width` pixels. Every constructor either returns a
//! fully valid image or an error; no operation hands out a partially built
//! image, and no two images ever share row storage.

use crate::color::Color;
use crate::error::ImageError;
use crate::row::{Row, ELEMENT_BYTES};

/// A black/white image stored as one RLE row per scanline.
///
/// Equality (`==`) compares dimensions and then every row run by run, so
/// two images are equal only if their encodings match exactly. Images built
/// through this crate are always canonical, which makes that the same as
/// pixel equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Image {
    width: u32,
    height: u32,
    rows: Vec<Row>,
}

impl Image {
    /// Create an image filled with a single color.
    ///
    /// Every row is one run of length `width`.
    pub fn new(width: u32, height: u32, color: Color) -> Result<Self, ImageError> {
        check_dimensions(width, height)?;

        let rows = (0..height).map(|_| Row::uniform(color, width)).collect();
        Ok(Self::from_parts(width, height, rows))
    }

    /// Create a chessboard of `edge` x `edge` squares.
    ///
    /// The top-left pixel has color `first`. Row `i` starts with `first`
    /// when `i / edge` is even and with the opposite color otherwise.
    /// `edge` must divide both `width` and `height`.
    pub fn chessboard(
        width: u32,
        height: u32,
        edge: u32,
        first: Color,
    ) -> Result<Self, ImageError> {
        check_dimensions(width, height)?;
        if edge == 0 || width % edge != 0 || height % edge != 0 {
            return Err(ImageError::InvalidSquareEdge {
                edge,
                width,
                height,
            });
        }

        let runs_per_row = (width / edge) as usize;
        let rows = (0..height)
            .map(|i| {
                let lead = if (i / edge) % 2 == 0 { first } else { !first };
                Row::from_parts(lead, vec![edge; runs_per_row])
            })
            .collect();

        Ok(Self::from_parts(width, height, rows))
    }

    /// Create an image from row-major raw pixels (0 = WHITE, non-zero = BLACK).
    pub fn from_pixels(width: u32, height: u32, pixels: &[u8]) -> Result<Self, ImageError> {
        check_dimensions(width, height)?;

        let w = width as usize;
        let expected = w * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::InvalidRow {
                row: pixels.len() / w,
                reason: format!("expected {expected} pixels, got {}", pixels.len()),
            });
        }

        let rows = pixels.chunks_exact(w).map(Row::compress).collect();
        Ok(Self::from_parts(width, height, rows))
    }

    /// Create an image from already encoded rows.
    ///
    /// Every row must cover exactly `width` pixels.
    pub fn from_rows(width: u32, rows: Vec<Row>) -> Result<Self, ImageError> {
        let height = u32::try_from(rows.len()).map_err(|_| ImageError::InvalidDimensions {
            width,
            height: u32::MAX,
        })?;
        check_dimensions(width, height)?;

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.width() != width) {
            return Err(ImageError::InvalidRow {
                row: index,
                reason: format!("covers {} pixels, image width is {width}", row.width()),
            });
        }

        Ok(Self::from_parts(width, height, rows))
    }

    /// Assemble an image whose rows are known to match its dimensions.
    pub(crate) fn from_parts(width: u32, height: u32, rows: Vec<Row>) -> Self {
        debug_assert_eq!(rows.len(), height as usize);
        debug_assert!(rows.iter().all(|r| r.width() == width));
        Self {
            width,
            height,
            rows,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All rows, top to bottom.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row `y`, or `None` if out of range.
    #[inline]
    pub fn row(&self, y: u32) -> Option<&Row> {
        self.rows.get(y as usize)
    }

    /// Color of pixel (`x`, `y`), or `None` if out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.row(y).and_then(|row| row.pixel(x))
    }

    /// Total number of runs over all rows.
    pub fn run_count(&self) -> usize {
        self.rows.iter().map(Row::run_count).sum()
    }

    /// Bytes occupied by the encoded rows.
    ///
    /// Each row is charged for its leading color, its runs and its end
    /// marker at [`ELEMENT_BYTES`] apiece.
    pub fn size_bytes(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.element_count() * ELEMENT_BYTES)
            .sum()
    }

    /// Check that every row is in canonical form.
    pub fn is_canonical(&self) -> bool {
        self.rows.iter().all(Row::is_canonical)
    }

    /// Decode the image into row-major raw pixels (0 or 1).
    pub fn to_pixels(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in &self.rows {
            pixels.extend(row.decompress());
        }
        pixels
    }
}

/// Reject empty images.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    Ok(())
}
