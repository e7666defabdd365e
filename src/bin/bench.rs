//! Operation-count benchmarks for the two AND strategies.
//!
//! Compares pixel accesses, boolean operations and wall time of the
//! decompressing AND against the run-merge AND on chessboards of growing
//! size. Three cases are measured:
//! - worst: 1-pixel squares, one run per pixel
//! - average: 2-pixel squares
//! - best: uniform images, one run per row
//!
//! Usage:
//!   cargo run --release --bin bench          # sizes up to 1024
//!   cargo run --release --bin bench -- 4096  # custom upper bound

#![allow(clippy::cast_precision_loss)]

use std::env;
use std::time::Instant;

use rlebw::{Color, Image, ImageError, OpCounts};

const DEFAULT_MAX_SIZE: u32 = 1024;

struct BenchCase {
    name: &'static str,
    /// Chessboard square edge, or `None` for a uniform image.
    edge: Option<u32>,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "worst",
        edge: Some(1),
    },
    BenchCase {
        name: "average",
        edge: Some(2),
    },
    BenchCase {
        name: "best",
        edge: None,
    },
];

fn operand(case: &BenchCase, size: u32) -> Result<Image, ImageError> {
    match case.edge {
        Some(edge) => Image::chessboard(size, size, edge, Color::Black),
        None => Image::new(size, size, Color::Black),
    }
}

/// Powers of two from 8 up to `max_size`, stopping before `u32` overflow.
fn sizes(max_size: u32) -> impl Iterator<Item = u32> {
    std::iter::successors(Some(8u32), |size| size.checked_mul(2))
        .take_while(move |&size| size <= max_size)
}

fn bench_case(case: &BenchCase, max_size: u32) -> Result<(), ImageError> {
    println!("\n{} case:", case.name);

    for size in sizes(max_size) {
        let img = operand(case, size)?;

        let mut pixel = OpCounts::new();
        let start = Instant::now();
        let slow = img.and_counted(&img, &mut pixel)?;
        let pixel_us = start.elapsed().as_secs_f64() * 1_000_000.0;

        let mut merge = OpCounts::new();
        let start = Instant::now();
        let fast = img.and_merge_counted(&img, &mut merge)?;
        let merge_us = start.elapsed().as_secs_f64() * 1_000_000.0;

        assert_eq!(slow, fast, "AND strategies disagree at {size}x{size}");

        println!(
            "{:>5}x{:<5} {:>12} {:>12} {:>10.1}  {:>12} {:>12} {:>10.1}",
            size,
            size,
            pixel.pixel_accesses,
            pixel.bool_ops,
            pixel_us,
            merge.pixel_accesses,
            merge.bool_ops,
            merge_us
        );
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let max_size = if args.len() >= 2 {
        args[1].parse().unwrap_or(DEFAULT_MAX_SIZE)
    } else {
        DEFAULT_MAX_SIZE
    };

    println!("rlebw AND Benchmarks");
    println!("====================");
    println!("Sizes: 8 to {max_size}\n");

    println!(
        "{:<11} {:>12} {:>12} {:>10}  {:>12} {:>12} {:>10}",
        "Size", "AND pixmem", "AND boolop", "AND µs", "merge pixmem", "merge boolop", "merge µs"
    );

    for case in CASES {
        if let Err(e) = bench_case(case, max_size) {
            eprintln!("{} case failed: {e}", case.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(sizes(1024).collect::<Vec<_>>(), vec![8, 16, 32, 64, 128, 256, 512, 1024]);
        assert_eq!(sizes(7).count(), 0);
        assert_eq!(sizes(u32::MAX).last(), Some(1 << 31));
    }
}
