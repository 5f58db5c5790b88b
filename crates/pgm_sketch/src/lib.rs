//! # pgm_sketch
//!
//! Converts between 200x200 grayscale PGM rasters and the opcode "sketch"
//! stream understood by the sketch viewer.
//!
//! ## Features
//!
//! - **Encoder**: scans pixel runs row by row and emits colour, horizontal
//!   advance and draw opcodes, wrapping explicitly at the right edge
//! - **Decoder**: a small state machine that replays the opcode stream onto
//!   a bounds-checked raster
//!
//! ## Quick Start
//!
//! ### Encoding a raster to a sketch
//!
//! ```
//! use pgm_sketch::{sketch_encode_default, HEIGHT, WIDTH};
//!
//! let samples = vec![128u8; WIDTH * HEIGHT];
//! let sketch = sketch_encode_default(&samples)?;
//! assert_eq!(sketch[0], 0x81); // streams always start with the line tool
//! # Ok::<(), pgm_sketch::SketchError>(())
//! ```
//!
//! ### Decoding a sketch back to samples
//!
//! ```
//! use pgm_sketch::{sketch_decode_default, sketch_encode_default, HEIGHT, WIDTH};
//!
//! let samples = vec![7u8; WIDTH * HEIGHT];
//! let sketch = sketch_encode_default(&samples)?;
//! let raster = sketch_decode_default(&sketch)?;
//! assert_eq!(raster.pixels(), &samples[..]);
//! # Ok::<(), pgm_sketch::SketchError>(())
//! ```

use thiserror::Error;

pub mod colour;
pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod opcode;
pub mod raster;
pub mod reader;

pub use colour::{pack_colour, read_colour, write_colour};
pub use convert::{convert, convert_file, raster_path_for, sketch_path_for, Direction};
pub use decoder::{read_run_length, sketch_decode, sketch_decode_default};
pub use encoder::{sketch_encode, sketch_encode_default, write_run_length};
pub use opcode::{Opcode, Token};
pub use raster::Raster;
pub use reader::ByteReader;

/// Raster width the sketch viewer expects.
pub const WIDTH: usize = 200;
/// Raster height the sketch viewer expects.
pub const HEIGHT: usize = 200;

/// Errors that can occur while encoding or decoding sketches.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Packed colour bytes never reached a colour terminator
    #[error("malformed colour sequence at byte {offset}")]
    MalformedColourSequence { offset: usize },

    /// Run-length bytes never reached an advance opcode
    #[error("malformed run-length sequence at byte {offset}")]
    MalformedRunSequence { offset: usize },

    /// A decoded run would paint outside the raster
    #[error("run of {len} pixels at ({x}, {y}) is outside the raster")]
    OutOfBoundsWrite { x: usize, y: usize, len: usize },

    /// File name carries neither the raster nor the sketch extension
    #[error("unsupported file extension: {0} (only .pgm and .sk files are converted)")]
    UnsupportedExtension(String),

    /// Raster payload size doesn't match the geometry
    #[error("raster size mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// PGM header could not be parsed
    #[error("invalid PGM header: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for sketch operations.
pub type Result<T> = core::result::Result<T, SketchError>;

/// Raster dimensions shared by the encoder and decoder.
///
/// Only [`Geometry::new`] and [`Geometry::default`] build one, so every
/// geometry is non-empty and its sample count fits in a `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: usize,
    height: usize,
}

impl Geometry {
    /// Creates a geometry, rejecting zero-sized rasters and sizes whose
    /// sample count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(SketchError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of samples in a raster of this size.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.width * self.height
    }

    pub(crate) fn check_samples(&self, actual: usize) -> Result<()> {
        let expected = self.sample_count();
        if actual != expected {
            return Err(SketchError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let geometry = Geometry::default();
        assert_eq!(geometry.sample_count(), 40_000);
        assert!(geometry.check_samples(40_000).is_ok());
    }

    #[test]
    fn test_zero_geometry_rejected() {
        assert!(matches!(
            Geometry::new(0, 200),
            Err(SketchError::InvalidDimensions { width: 0, height: 200 })
        ));
        assert!(Geometry::new(200, 0).is_err());
    }

    #[test]
    fn test_overflowing_geometry_rejected() {
        assert!(matches!(
            Geometry::new(usize::MAX, 2),
            Err(SketchError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            })
        ));
        assert!(Geometry::new(usize::MAX, 1).is_ok());
    }

    #[test]
    fn test_empty_samples_rejected_without_panic() {
        assert!(Geometry::new(0, 3).is_err());
        let geometry = Geometry::new(1, 3).unwrap();
        assert!(matches!(
            sketch_encode(&[], geometry),
            Err(SketchError::DimensionMismatch {
                expected: 3,
                actual: 0
            })
        ));
    }

    #[test]
    fn test_sample_count_mismatch() {
        let geometry = Geometry::new(4, 2).unwrap();
        assert!(matches!(
            geometry.check_samples(7),
            Err(SketchError::DimensionMismatch {
                expected: 8,
                actual: 7
            })
        ));
    }
}
