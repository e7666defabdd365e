//! Run-length encoded image rows.
//!
//! A row stores the color of its first pixel followed by the lengths of
//! its runs. Colors are implicit: run `i` (0-based) has color
//! `first ^ (i % 2)`. The run lengths are always positive and sum to the
//! row width.
//!
//! ## Canonical Form
//! A row produced by compression never has two adjacent runs of the same
//! color, because every run boundary is a color change. Operations that
//! splice run lists together (see [`Row::concat`]) coalesce at the splice
//! point to keep that property.

use crate::color::Color;
use crate::counter::Counter;
use crate::error::ImageError;

/// Storage unit of one row element, used for size accounting.
pub const ELEMENT_BYTES: usize = std::mem::size_of::<u32>();

/// One run-length encoded image row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Row {
    /// Color of the first pixel (c₀).
    first: Color,
    /// Run lengths, left to right.
    runs: Vec<u32>,
}

impl Row {
    /// Create a row made of a single run.
    ///
    /// # Panics
    /// Panics if `width` is 0.
    pub fn uniform(color: Color, width: u32) -> Self {
        assert!(width > 0);
        Self {
            first: color,
            runs: vec![width],
        }
    }

    /// Create a row from its leading color and run lengths.
    ///
    /// `runs` must be non-empty, hold no zero-length run and sum to `width`.
    /// The returned [`ImageError::InvalidRow`] reports row 0, since the row
    /// is not yet part of an image.
    pub fn from_runs(first: Color, runs: Vec<u32>, width: u32) -> Result<Self, ImageError> {
        let invalid = |reason: String| ImageError::InvalidRow { row: 0, reason };

        if runs.is_empty() {
            return Err(invalid("no runs".into()));
        }
        if let Some(index) = runs.iter().position(|&r| r == 0) {
            return Err(invalid(format!("zero-length run at index {index}")));
        }
        let covered: u64 = runs.iter().map(|&r| u64::from(r)).sum();
        if covered != u64::from(width) {
            return Err(invalid(format!("runs cover {covered} pixels, expected {width}")));
        }

        Ok(Self { first, runs })
    }

    /// Compress a raw pixel row.
    ///
    /// # Panics
    /// Panics if `raw` is empty.
    pub fn compress(raw: &[u8]) -> Self {
        Self::compress_counted(raw, &mut ())
    }

    /// Compress a raw pixel row, reporting pixel accesses to `counter`.
    ///
    /// The first scan counts color transitions so the run buffer is
    /// allocated once at its exact size.
    ///
    /// # Panics
    /// Panics if `raw` is empty.
    pub fn compress_counted(raw: &[u8], counter: &mut impl Counter) -> Self {
        assert!(!raw.is_empty());

        let num_runs = 1 + raw
            .windows(2)
            .filter(|pair| Color::from_bit(pair[0]) != Color::from_bit(pair[1]))
            .count();

        let mut runs = Vec::with_capacity(num_runs);
        let first = Color::from_bit(raw[0]);
        let mut current = first;
        let mut length = 0u32;

        for &pixel in raw {
            let color = Color::from_bit(pixel);
            if color != current {
                runs.push(length);
                current = color;
                length = 0;
            }
            length += 1;
        }
        runs.push(length);

        counter.pixel_access(raw.len() as u64 + runs.len() as u64);
        debug_assert_eq!(runs.len(), num_runs);

        Self { first, runs }
    }

    /// Expand the row into one byte (0 or 1) per pixel.
    pub fn decompress(&self) -> Vec<u8> {
        self.decompress_counted(&mut ())
    }

    /// Expand the row, reporting pixel accesses to `counter`.
    pub fn decompress_counted(&self, counter: &mut impl Counter) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.width() as usize);
        let mut color = self.first;

        for &run in &self.runs {
            raw.resize(raw.len() + run as usize, color.bit());
            color = !color;
        }

        counter.pixel_access(raw.len() as u64 + self.runs.len() as u64);
        raw
    }

    /// Color of the first pixel.
    #[inline]
    pub fn first_color(&self) -> Color {
        self.first
    }

    /// Run lengths, left to right.
    #[inline]
    pub fn runs(&self) -> &[u32] {
        &self.runs
    }

    /// Number of runs.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Number of stored elements: leading color, runs and end marker.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.runs.len() + 2
    }

    /// Number of pixels covered by the runs.
    pub fn width(&self) -> u32 {
        self.runs.iter().sum()
    }

    /// Color of the last pixel.
    ///
    /// Each run flips the color, so the last run has the leading color
    /// when the run count is odd and the opposite color when it is even.
    #[inline]
    pub fn last_color(&self) -> Color {
        if self.runs.len() % 2 == 0 {
            !self.first
        } else {
            self.first
        }
    }

    /// Check that no two adjacent runs share a color.
    ///
    /// Colors alternate by position, so two same-color segments can only
    /// sit next to each other when separated by a zero-length run. Every
    /// constructor rejects such runs, so this is an invariant check and
    /// holds for any `Row` value.
    pub fn is_canonical(&self) -> bool {
        !self.runs.is_empty() && self.runs.iter().all(|&r| r > 0)
    }

    /// Color of pixel `x`, or `None` if out of range.
    pub fn pixel(&self, x: u32) -> Option<Color> {
        let mut start = 0u32;
        let mut color = self.first;
        for &run in &self.runs {
            if x < start + run {
                return Some(color);
            }
            start += run;
            color = !color;
        }
        None
    }

    /// Same runs with every pixel inverted.
    pub fn negated(&self) -> Self {
        Self {
            first: !self.first,
            runs: self.runs.clone(),
        }
    }

    /// Row mirrored left to right.
    ///
    /// Only the run lengths are stored, so reversing them moves the last
    /// run to the front; the new leading color must be the old last color.
    pub fn reversed(&self) -> Self {
        let mut runs = self.runs.clone();
        runs.reverse();

        let first = if self.last_color() == self.first {
            self.first
        } else {
            !self.first
        };

        Self { first, runs }
    }

    /// This row followed by `other`, coalescing the runs that meet at the
    /// splice point when they share a color.
    ///
    /// Returns `None` if the combined width does not fit in a `u32`.
    pub fn concat(&self, other: &Self) -> Option<Self> {
        self.width().checked_add(other.width())?;

        let join = self.last_color() == other.first;
        let mut runs = Vec::with_capacity(self.runs.len() + other.runs.len() - usize::from(join));
        runs.extend_from_slice(&self.runs);

        if join {
            if let (Some(last), Some(&head)) = (runs.last_mut(), other.runs.first()) {
                *last += head;
            }
            runs.extend_from_slice(&other.runs[1..]);
        } else {
            runs.extend_from_slice(&other.runs);
        }

        Some(Self {
            first: self.first,
            runs,
        })
    }

    /// Assemble a row from parts already known to be valid.
    pub(crate) fn from_parts(first: Color, runs: Vec<u32>) -> Self {
        let row = Self { first, runs };
        debug_assert!(row.is_canonical());
        row
    }
}

/// Incremental row encoder fed one pixel at a time.
///
/// Used where the raw row is never materialized, such as when decoding
/// packed file data.
#[derive(Debug, Default)]
pub(crate) struct RowBuilder {
    first: Option<Color>,
    current: Color,
    runs: Vec<u32>,
}

impl RowBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append one pixel, extending the open run when the color matches.
    pub(crate) fn push(&mut self, color: Color) {
        match self.runs.last_mut() {
            Some(last) if color == self.current => *last += 1,
            _ => {
                self.first.get_or_insert(color);
                self.current = color;
                self.runs.push(1);
            }
        }
    }

    /// Finish the row, or `None` if no pixel was pushed.
    pub(crate) fn finish(self) -> Option<Row> {
        self.first.map(|first| Row::from_parts(first, self.runs))
    }
}
