//! Geometric transforms on RLE images.
//!
//! All transforms return a new image and leave their inputs untouched.

use log::trace;

use crate::error::ImageError;
use crate::image::Image;
use crate::row::Row;

impl Image {
    /// Flip top to bottom: row `i` of the result is row `height - 1 - i`.
    pub fn horizontal_mirror(&self) -> Self {
        let rows = self.rows().iter().rev().cloned().collect();
        Self::from_parts(self.width(), self.height(), rows)
    }

    /// Flip left to right, reversing each row's runs.
    pub fn vertical_mirror(&self) -> Self {
        let rows = self.rows().iter().map(Row::reversed).collect();
        Self::from_parts(self.width(), self.height(), rows)
    }

    /// Stack `other` below this image.
    ///
    /// Both images must have the same width.
    pub fn replicate_at_bottom(&self, other: &Self) -> Result<Self, ImageError> {
        if self.width() != other.width() {
            return Err(mismatch("replicate_at_bottom", self, other));
        }

        let height = self
            .height()
            .checked_add(other.height())
            .ok_or_else(|| overflow("replicate_at_bottom", self, other))?;
        let rows: Vec<Row> = self.rows().iter().chain(other.rows()).cloned().collect();

        trace!("replicate_at_bottom: {}x{}", self.width(), height);
        Ok(Self::from_parts(self.width(), height, rows))
    }

    /// Place `other` to the right of this image.
    ///
    /// Both images must have the same height. Runs meeting at the seam are
    /// coalesced when they share a color.
    pub fn replicate_at_right(&self, other: &Self) -> Result<Self, ImageError> {
        if self.height() != other.height() {
            return Err(mismatch("replicate_at_right", self, other));
        }

        let width = self
            .width()
            .checked_add(other.width())
            .ok_or_else(|| overflow("replicate_at_right", self, other))?;
        let rows: Vec<Row> = self
            .rows()
            .iter()
            .zip(other.rows())
            .map(|(left, right)| left.concat(right))
            .collect::<Option<_>>()
            .ok_or_else(|| overflow("replicate_at_right", self, other))?;

        trace!("replicate_at_right: {}x{}", width, self.height());
        Ok(Self::from_parts(width, self.height(), rows))
    }
}

fn mismatch(op: &'static str, a: &Image, b: &Image) -> ImageError {
    ImageError::DimensionMismatch {
        op,
        left: (a.width(), a.height()),
        right: (b.width(), b.height()),
    }
}

fn overflow(op: &'static str, a: &Image, b: &Image) -> ImageError {
    ImageError::DimensionOverflow {
        op,
        left: (a.width(), a.height()),
        right: (b.width(), b.height()),
    }
}
