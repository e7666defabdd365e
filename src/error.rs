//! Error types for image construction, boolean operations and PBM I/O.

/// Errors that can occur while building, combining or (de)serializing images.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// Underlying read or write failed (includes truncated pixel data).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// File does not start with the binary PBM magic `P4`.
    #[error("invalid file format: expected magic P4")]
    InvalidMagic,

    /// Width or height in the header is missing or not a positive integer.
    #[error("invalid header: bad {field}")]
    InvalidHeader { field: &'static str },

    /// Header is not followed by exactly one whitespace byte.
    #[error("invalid header: whitespace expected before pixel data")]
    MissingSeparator,

    /// Images must have at least one row and one column.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Operands of a binary operation have incompatible sizes.
    #[error("{op}: dimension mismatch {}x{} vs {}x{}", left.0, left.1, right.0, right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (u32, u32),
        right: (u32, u32),
    },

    /// Combined size of two operands does not fit in a `u32`.
    #[error(
        "{op}: {}x{} and {}x{} exceed the maximum image size",
        left.0, left.1, right.0, right.1
    )]
    DimensionOverflow {
        op: &'static str,
        left: (u32, u32),
        right: (u32, u32),
    },

    /// Chessboard square edge is zero or does not divide the image.
    #[error("invalid square edge {edge} for {width}x{height} chessboard")]
    InvalidSquareEdge { edge: u32, width: u32, height: u32 },

    /// A supplied row breaks the run-length invariants.
    #[error("invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ImageError::InvalidMagic;
        assert!(err.to_string().contains("P4"));

        let err = ImageError::InvalidHeader { field: "width" };
        assert!(err.to_string().contains("bad width"));

        let err = ImageError::DimensionMismatch {
            op: "and",
            left: (4, 2),
            right: (8, 2),
        };
        assert_eq!(err.to_string(), "and: dimension mismatch 4x2 vs 8x2");

        let err = ImageError::DimensionOverflow {
            op: "replicate_at_right",
            left: (3_000_000_000, 1),
            right: (2_000_000_000, 1),
        };
        assert!(err.to_string().starts_with("replicate_at_right: 3000000000x1"));

        let err = ImageError::InvalidSquareEdge {
            edge: 3,
            width: 8,
            height: 8,
        };
        assert!(err.to_string().contains("edge 3"));

        let err = ImageError::InvalidRow {
            row: 1,
            reason: "zero-length run".into(),
        };
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short");
        let err: ImageError = io.into();
        assert!(matches!(err, ImageError::Io(_)));
    }
}
