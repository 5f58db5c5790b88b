//! File-level conversion between `.pgm` rasters and `.sk` sketches.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::decoder::sketch_decode;
use crate::encoder::sketch_encode;
use crate::raster::Raster;
use crate::{Geometry, Result, SketchError};

/// Extension of binary PGM rasters.
pub const RASTER_EXTENSION: &str = "pgm";
/// Extension of sketch streams.
pub const SKETCH_EXTENSION: &str = "sk";

/// Which way a file is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `.pgm` to `.sk`
    Encode,
    /// `.sk` to `.pgm`
    Decode,
}

impl Direction {
    /// Picks the direction from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(RASTER_EXTENSION) => Ok(Self::Encode),
            Some(ext) if ext.eq_ignore_ascii_case(SKETCH_EXTENSION) => Ok(Self::Decode),
            _ => Err(SketchError::UnsupportedExtension(
                path.display().to_string(),
            )),
        }
    }

    /// Name of the file this direction produces from `input`.
    pub fn output_path(self, input: &Path) -> PathBuf {
        match self {
            Self::Encode => sketch_path_for(input),
            Self::Decode => raster_path_for(input),
        }
    }
}

/// `myimage.pgm` becomes `myimage.sk`.
pub fn sketch_path_for(path: &Path) -> PathBuf {
    path.with_extension(SKETCH_EXTENSION)
}

/// `myimage.sk` becomes `myimage.pgm`.
pub fn raster_path_for(path: &Path) -> PathBuf {
    path.with_extension(RASTER_EXTENSION)
}

/// Converts file contents in memory.
///
/// Encoding takes PGM bytes and returns a sketch stream; decoding takes a
/// sketch stream and returns PGM bytes.
pub fn convert(direction: Direction, input: &[u8], geometry: Geometry) -> Result<Vec<u8>> {
    match direction {
        Direction::Encode => {
            let raster = Raster::from_pgm(input, geometry)?;
            sketch_encode(raster.pixels(), geometry)
        }
        Direction::Decode => Ok(sketch_decode(input, geometry)?.to_pgm()),
    }
}

/// Converts `input` and writes the result next to it (or to `output`).
///
/// Returns the path that was written.
pub fn convert_file(input: &Path, output: Option<&Path>, geometry: Geometry) -> Result<PathBuf> {
    let direction = Direction::from_path(input)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| direction.output_path(input));

    let data = fs::read(input)?;
    debug!("{:?}: read {} bytes from {}", direction, data.len(), input.display());
    let converted = convert(direction, &data, geometry)?;
    fs::write(&output, &converted)?;
    debug!("wrote {} bytes to {}", converted.len(), output.display());
    Ok(output)
}
