//! # rlebw
//!
//! Black/white images stored as run-length encoded rows, with boolean
//! algebra, geometric transforms and binary PBM I/O performed on the
//! compressed form.
//!
//! ## Design
//!
//! - **Compressed at rest** - Images only ever hold RLE rows; raw pixel
//!   rows exist transiently inside the operations that need them
//! - **Canonical rows** - No two adjacent runs share a color, so image
//!   equality is pixel equality
//! - **Safe Rust** - `#![forbid(unsafe_code)]`
//! - **No partial results** - Every constructor and operation returns a
//!   fully valid [`Image`] or an [`ImageError`]
//!
//! ## API Overview
//!
//! ### Construction
//!
//! - [`Image::new`] - Uniform image
//! - [`Image::chessboard`] - Chessboard of square tiles
//! - [`Image::from_pixels`] / [`Image::from_rows`] - From raw or encoded data
//! - [`Image::load`] / [`pbm::read_from`] - From a binary PBM file or stream
//!
//! ### Boolean Operations
//!
//! - [`Image::neg`] - Invert all pixels
//! - [`Image::and`] / [`Image::or`] / [`Image::xor`] - Through decompression
//! - [`Image::and_merge`] / [`Image::or_merge`] / [`Image::xor_merge`] -
//!   Directly on the run lists
//!
//! ### Geometric Transforms
//!
//! - [`Image::horizontal_mirror`] - Flip top to bottom
//! - [`Image::vertical_mirror`] - Flip left to right
//! - [`Image::replicate_at_bottom`] / [`Image::replicate_at_right`] - Concatenate
//!
//! ### Low-Level Components
//!
//! - [`Row`] - One RLE row: compression, decompression and run queries
//! - [`Counter`] / [`OpCounts`] - Operation counting for benchmarks
//!
//! ## Usage
//!
//! ```rust
//! use rlebw::{Color, Image};
//!
//! let a = Image::chessboard(8, 8, 2, Color::White).unwrap();
//! let b = Image::chessboard(8, 8, 4, Color::Black).unwrap();
//!
//! let fast = a.and_merge(&b).unwrap();
//! let slow = a.and(&b).unwrap();
//! assert_eq!(fast, slow);
//!
//! assert_eq!(a.neg().neg(), a);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod bits;
mod boolean;
mod color;
mod counter;
mod error;
mod image;
pub mod pbm;
mod row;
mod transform;

pub use color::Color;
pub use counter::{Counter, OpCounts};
pub use error::ImageError;
pub use image::Image;
pub use row::{Row, ELEMENT_BYTES};
