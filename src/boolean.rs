//! Boolean algebra on RLE images.
//!
//! Two strategies are provided for the binary operators:
//!
//! - **Pixel path** ([`Image::and`], [`Image::or`], [`Image::xor`]): each
//!   row pair is decompressed, combined pixel by pixel and recompressed.
//!   Cost is O(width) per row regardless of how few runs the rows have.
//! - **Run-merge path** ([`Image::and_merge`], [`Image::or_merge`],
//!   [`Image::xor_merge`]): the two run lists are walked in lockstep and
//!   the result is emitted run by run, never touching raw pixels. Cost is
//!   O(runs_a + runs_b) per row.
//!
//! Both produce identical images. The run-merge output is canonical by
//! construction because a step whose color matches the open result run
//! extends that run instead of starting a new one.
//!
//! Operands are never modified and must have the same dimensions.

use log::trace;

use crate::color::Color;
use crate::counter::Counter;
use crate::error::ImageError;
use crate::image::Image;
use crate::row::Row;

/// Pixel-wise binary operator.
type ColorOp = fn(Color, Color) -> Color;

impl Image {
    /// Invert every pixel.
    ///
    /// Inverting all pixels never moves a run boundary, so only the leading
    /// color of each row changes.
    pub fn neg(&self) -> Self {
        let rows = self.rows().iter().map(Row::negated).collect();
        Self::from_parts(self.width(), self.height(), rows)
    }

    /// Pixel-wise AND through decompression.
    pub fn and(&self, other: &Self) -> Result<Self, ImageError> {
        self.and_counted(other, &mut ())
    }

    /// [`Image::and`], reporting operation counts to `counter`.
    pub fn and_counted(
        &self,
        other: &Self,
        counter: &mut impl Counter,
    ) -> Result<Self, ImageError> {
        combine_pixels("and", self, other, |a, b| a & b, counter)
    }

    /// Pixel-wise OR through decompression.
    pub fn or(&self, other: &Self) -> Result<Self, ImageError> {
        self.or_counted(other, &mut ())
    }

    /// [`Image::or`], reporting operation counts to `counter`.
    pub fn or_counted(
        &self,
        other: &Self,
        counter: &mut impl Counter,
    ) -> Result<Self, ImageError> {
        combine_pixels("or", self, other, |a, b| a | b, counter)
    }

    /// Pixel-wise XOR through decompression.
    pub fn xor(&self, other: &Self) -> Result<Self, ImageError> {
        self.xor_counted(other, &mut ())
    }

    /// [`Image::xor`], reporting operation counts to `counter`.
    pub fn xor_counted(
        &self,
        other: &Self,
        counter: &mut impl Counter,
    ) -> Result<Self, ImageError> {
        combine_pixels("xor", self, other, |a, b| a ^ b, counter)
    }

    /// AND computed directly on the run lists.
    pub fn and_merge(&self, other: &Self) -> Result<Self, ImageError> {
        self.and_merge_counted(other, &mut ())
    }

    /// [`Image::and_merge`], reporting operation counts to `counter`.
    pub fn and_merge_counted(
        &self,
        other: &Self,
        counter: &mut impl Counter,
    ) -> Result<Self, ImageError> {
        combine_runs("and_merge", self, other, |a, b| a & b, counter)
    }

    /// OR computed directly on the run lists.
    pub fn or_merge(&self, other: &Self) -> Result<Self, ImageError> {
        self.or_merge_counted(other, &mut ())
    }

    /// [`Image::or_merge`], reporting operation counts to `counter`.
    pub fn or_merge_counted(
        &self,
        other: &Self,
        counter: &mut impl Counter,
    ) -> Result<Self, ImageError> {
        combine_runs("or_merge", self, other, |a, b| a | b, counter)
    }

    /// XOR computed directly on the run lists.
    pub fn xor_merge(&self, other: &Self) -> Result<Self, ImageError> {
        self.xor_merge_counted(other, &mut ())
    }

    /// [`Image::xor_merge`], reporting operation counts to `counter`.
    pub fn xor_merge_counted(
        &self,
        other: &Self,
        counter: &mut impl Counter,
    ) -> Result<Self, ImageError> {
        combine_runs("xor_merge", self, other, |a, b| a ^ b, counter)
    }
}

/// Fail unless both operands have the same width and height.
fn check_same_size(op: &'static str, a: &Image, b: &Image) -> Result<(), ImageError> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(ImageError::DimensionMismatch {
            op,
            left: (a.width(), a.height()),
            right: (b.width(), b.height()),
        });
    }
    Ok(())
}

fn combine_pixels(
    name: &'static str,
    a: &Image,
    b: &Image,
    op: ColorOp,
    counter: &mut impl Counter,
) -> Result<Image, ImageError> {
    check_same_size(name, a, b)?;

    let rows: Vec<Row> = a
        .rows()
        .iter()
        .zip(b.rows())
        .map(|(row_a, row_b)| {
            let raw_a = row_a.decompress_counted(counter);
            let raw_b = row_b.decompress_counted(counter);

            let combined: Vec<u8> = raw_a
                .iter()
                .zip(&raw_b)
                .map(|(&pa, &pb)| op(Color::from_bit(pa), Color::from_bit(pb)).bit())
                .collect();

            let pixels = combined.len() as u64;
            counter.pixel_access(3 * pixels);
            counter.bool_op(pixels);

            Row::compress_counted(&combined, counter)
        })
        .collect();

    let result = Image::from_parts(a.width(), a.height(), rows);
    trace!("{name}: {}x{} -> {} runs", a.width(), a.height(), result.run_count());
    Ok(result)
}

fn combine_runs(
    name: &'static str,
    a: &Image,
    b: &Image,
    op: ColorOp,
    counter: &mut impl Counter,
) -> Result<Image, ImageError> {
    check_same_size(name, a, b)?;

    let rows: Vec<Row> = a
        .rows()
        .iter()
        .zip(b.rows())
        .map(|(row_a, row_b)| merge_rows(row_a, row_b, op, counter))
        .collect();

    let result = Image::from_parts(a.width(), a.height(), rows);
    trace!("{name}: {}x{} -> {} runs", a.width(), a.height(), result.run_count());
    Ok(result)
}

/// Cursor over the runs of one operand row.
struct RunCursor<'a> {
    runs: std::slice::Iter<'a, u32>,
    color: Color,
    remaining: u32,
}

impl<'a> RunCursor<'a> {
    fn new(row: &'a Row) -> Self {
        let mut runs = row.runs().iter();
        let remaining = runs.next().copied().unwrap_or(0);
        Self {
            runs,
            color: row.first_color(),
            remaining,
        }
    }

    /// Consume `step` pixels, moving to the next run when the current one
    /// is used up. An exhausted cursor stays at zero remaining.
    fn advance(&mut self, step: u32, counter: &mut impl Counter) {
        self.remaining -= step;
        if self.remaining == 0 {
            if let Some(&next) = self.runs.next() {
                self.color = !self.color;
                self.remaining = next;
                counter.pixel_access(2);
            }
        }
    }
}

/// Combine two rows of equal width run by run.
///
/// The result never holds more than `runs_a + runs_b - 1` runs: every step
/// ends at a boundary of at least one operand, and the final boundary is
/// shared. The buffer is sized once for that bound.
pub(crate) fn merge_rows(a: &Row, b: &Row, op: ColorOp, counter: &mut impl Counter) -> Row {
    debug_assert_eq!(a.width(), b.width());

    let mut left = RunCursor::new(a);
    let mut right = RunCursor::new(b);
    counter.pixel_access(4);

    let first = op(left.color, right.color);
    counter.bool_op(1);

    let mut runs: Vec<u32> = Vec::with_capacity(a.run_count() + b.run_count());
    let mut open = first;

    loop {
        let step = left.remaining.min(right.remaining);
        counter.bool_op(1);
        if step == 0 {
            break;
        }

        let color = op(left.color, right.color);
        counter.bool_op(2);

        match runs.last_mut() {
            Some(last) if color == open => *last += step,
            _ => {
                runs.push(step);
                open = color;
            }
        }

        left.advance(step, counter);
        right.advance(step, counter);
        counter.bool_op(2);
    }

    debug_assert_eq!(left.remaining, 0);
    debug_assert_eq!(right.remaining, 0);

    counter.pixel_access(1);
    Row::from_parts(first, runs)
}
