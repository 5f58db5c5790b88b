//! Run-length sketch encoder.
//!
//! Each row is scanned for runs of equal samples. Every run becomes a colour
//! change, its length as run-length chunks and one paint advance. When a
//! run ends on the right edge the encoder emits an explicit row wrap.

use log::debug;

use crate::colour::write_colour;
use crate::opcode::{Opcode, MAX_RUN_CHUNK};
use crate::{Geometry, Result};

/// Encode grayscale samples into a sketch stream.
///
/// # Arguments
/// * `samples` - Row-major grayscale samples, exactly `width * height` of them
/// * `geometry` - Raster dimensions
///
/// # Returns
/// The opcode stream. It always starts with the line tool and has no end
/// marker.
///
/// # Example
/// ```
/// use pgm_sketch::{sketch_encode, Geometry};
///
/// let geometry = Geometry::new(2, 1)?;
/// let sketch = sketch_encode(&[9, 9], geometry)?;
/// assert_eq!(sketch.first(), Some(&0x81));
/// # Ok::<(), pgm_sketch::SketchError>(())
/// ```
#[must_use = "this returns the encoded sketch stream"]
pub fn sketch_encode(samples: &[u8], geometry: Geometry) -> Result<Vec<u8>> {
    geometry.check_samples(samples.len())?;

    let mut encoder = SketchEncoder::new(geometry);
    for row in samples.chunks_exact(geometry.width()) {
        encoder.encode_row(row);
    }
    Ok(encoder.finish())
}

/// Encode a 200x200 raster.
#[inline]
#[must_use = "this returns the encoded sketch stream"]
pub fn sketch_encode_default(samples: &[u8]) -> Result<Vec<u8>> {
    sketch_encode(samples, Geometry::default())
}

/// Append a run length as chunks of at most [`MAX_RUN_CHUNK`].
///
/// A length that is an exact multiple of the chunk size gets no trailing
/// zero byte.
pub fn write_run_length(mut len: usize, out: &mut Vec<u8>) {
    let chunk = MAX_RUN_CHUNK as usize;
    while len >= chunk {
        out.push(MAX_RUN_CHUNK);
        len -= chunk;
    }
    if len > 0 {
        out.push(len as u8);
    }
}

struct SketchEncoder {
    out: Vec<u8>,
    width: usize,
    x: usize,
    y: usize,
    runs: usize,
}

impl SketchEncoder {
    fn new(geometry: Geometry) -> Self {
        let mut out = Vec::with_capacity(geometry.sample_count() + 16);
        out.push(Opcode::ToolLine.as_byte());
        Self {
            out,
            width: geometry.width(),
            x: 0,
            y: 0,
            runs: 0,
        }
    }

    fn encode_row(&mut self, row: &[u8]) {
        debug_assert_eq!(self.x, 0);
        let mut idx = 0;
        while idx < row.len() {
            let sample = row[idx];
            let mut run_len = 1usize;
            while self.x + run_len < self.width && row[idx + run_len] == sample {
                run_len += 1;
            }
            self.emit_run(sample, run_len);
            idx += run_len;
        }
    }

    fn emit_run(&mut self, sample: u8, run_len: usize) {
        write_colour(sample, &mut self.out);
        write_run_length(run_len, &mut self.out);
        self.out.push(Opcode::AdvancePaint.as_byte());
        self.runs += 1;

        if self.x + run_len == self.width {
            self.wrap_row();
        } else {
            self.x += run_len;
        }
    }

    fn wrap_row(&mut self) {
        self.x = 0;
        self.y += 1;
        self.out.extend_from_slice(&[
            Opcode::ToolNone.as_byte(),
            Opcode::TargetXReset.as_byte(),
            Opcode::AdvanceSkip.as_byte(),
            Opcode::ToolLine.as_byte(),
        ]);
    }

    fn finish(self) -> Vec<u8> {
        debug!(
            "encoded {} rows as {} runs ({} bytes)",
            self.y,
            self.runs,
            self.out.len()
        );
        self.out
    }
}
