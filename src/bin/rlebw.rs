//! rlebw Command Line Interface
//!
//! Runs boolean operations and geometric transforms on binary PBM files.
//!
//! Usage:
//!   rlebw info <input.pbm>
//!   rlebw and <a.pbm> <b.pbm> <out.pbm> [--merge]
//!   rlebw mirror-v <input.pbm> <out.pbm>
//!   rlebw chessboard <width> <height> <edge> <out.pbm> [--black]
//!   rlebw --help

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rlebw::{Color, Image, ImageError};

#[derive(Parser)]
#[command(
    name = "rlebw",
    version,
    about = "Run-length encoded black/white image operations on PBM files"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print dimensions and encoded size of an image
    Info { input: PathBuf },

    /// Invert every pixel
    Neg { input: PathBuf, output: PathBuf },

    /// Pixel-wise AND of two images of the same size
    And {
        a: PathBuf,
        b: PathBuf,
        output: PathBuf,
        /// Combine run lists directly instead of decompressing
        #[arg(long)]
        merge: bool,
    },

    /// Pixel-wise OR of two images of the same size
    Or {
        a: PathBuf,
        b: PathBuf,
        output: PathBuf,
        /// Combine run lists directly instead of decompressing
        #[arg(long)]
        merge: bool,
    },

    /// Pixel-wise XOR of two images of the same size
    Xor {
        a: PathBuf,
        b: PathBuf,
        output: PathBuf,
        /// Combine run lists directly instead of decompressing
        #[arg(long)]
        merge: bool,
    },

    /// Flip top to bottom
    MirrorH { input: PathBuf, output: PathBuf },

    /// Flip left to right
    MirrorV { input: PathBuf, output: PathBuf },

    /// Place the second image below the first (same width)
    Stack {
        top: PathBuf,
        bottom: PathBuf,
        output: PathBuf,
    },

    /// Place the second image right of the first (same height)
    Join {
        left: PathBuf,
        right: PathBuf,
        output: PathBuf,
    },

    /// Write a uniform image
    Create {
        width: u32,
        height: u32,
        output: PathBuf,
        /// Fill with black instead of white
        #[arg(long)]
        black: bool,
    },

    /// Write a chessboard of square tiles
    Chessboard {
        width: u32,
        height: u32,
        edge: u32,
        output: PathBuf,
        /// Start the top-left tile black instead of white
        #[arg(long)]
        black: bool,
    },
}

fn color(black: bool) -> Color {
    if black {
        Color::Black
    } else {
        Color::White
    }
}

fn load(path: &Path) -> Result<Image> {
    Image::load(path).with_context(|| format!("cannot load {}", path.display()))
}

fn save(img: &Image, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("cannot save {}", path.display()))?;
    println!(
        "Output:      {} ({}x{}, {} runs, {} bytes encoded)",
        path.display(),
        img.width(),
        img.height(),
        img.run_count(),
        img.size_bytes()
    );
    Ok(())
}

/// Load two operands, combine them and save the result.
fn binary(
    a: &Path,
    b: &Path,
    output: &Path,
    op: impl FnOnce(&Image, &Image) -> Result<Image, ImageError>,
) -> Result<()> {
    let a = load(a)?;
    let b = load(b)?;
    let result = op(&a, &b)?;
    save(&result, output)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Info { input } => {
            let img = load(&input)?;
            println!("Input:       {}", input.display());
            println!("Dimensions:  {}x{}", img.width(), img.height());
            println!("Runs:        {}", img.run_count());
            println!("Encoded:     {} bytes", img.size_bytes());
            Ok(())
        }
        Command::Neg { input, output } => save(&load(&input)?.neg(), &output),
        Command::And {
            a,
            b,
            output,
            merge,
        } => binary(&a, &b, &output, |x, y| {
            if merge {
                x.and_merge(y)
            } else {
                x.and(y)
            }
        }),
        Command::Or {
            a,
            b,
            output,
            merge,
        } => binary(&a, &b, &output, |x, y| {
            if merge {
                x.or_merge(y)
            } else {
                x.or(y)
            }
        }),
        Command::Xor {
            a,
            b,
            output,
            merge,
        } => binary(&a, &b, &output, |x, y| {
            if merge {
                x.xor_merge(y)
            } else {
                x.xor(y)
            }
        }),
        Command::MirrorH { input, output } => save(&load(&input)?.horizontal_mirror(), &output),
        Command::MirrorV { input, output } => save(&load(&input)?.vertical_mirror(), &output),
        Command::Stack {
            top,
            bottom,
            output,
        } => binary(&top, &bottom, &output, Image::replicate_at_bottom),
        Command::Join {
            left,
            right,
            output,
        } => binary(&left, &right, &output, Image::replicate_at_right),
        Command::Create {
            width,
            height,
            output,
            black,
        } => save(&Image::new(width, height, color(black))?, &output),
        Command::Chessboard {
            width,
            height,
            edge,
            output,
            black,
        } => save(
            &Image::chessboard(width, height, edge, color(black))?,
            &output,
        ),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
