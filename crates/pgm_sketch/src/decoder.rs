use log::{debug, trace};

use crate::colour::read_colour;
use crate::opcode::{Opcode, Token};
use crate::raster::Raster;
use crate::reader::ByteReader;
use crate::{Geometry, Result, SketchError};

/// Decodes a sketch stream into a raster.
///
/// The stream is replayed onto a zero-initialised raster of the given
/// geometry. Pixels no run covers stay black.
///
/// # Stream format
///
/// ```text
/// TOOL_LINE ( colour run* ADVANCE_PAINT [ TOOL_NONE TARGET_X_RESET ADVANCE_SKIP TOOL_LINE ] )*
/// ```
/// - `colour`: five data bytes (`0xC0..=0xFF`), a literal `0xFF`, `COLOUR_END`
/// - `run`: run-length chunks (`0x00..=0x1F`) summed into the pending run
/// - `ADVANCE_PAINT`: paints the pending run while the line tool is selected
/// - the bracketed group is the row wrap emitted after a run reaches the
///   right edge
///
/// # Errors
///
/// Returns an error if:
/// - a colour sequence is cut off or contains a foreign byte
/// - run-length chunks are not followed by an advance opcode
/// - a run would paint past the right edge or below the last row
/// - a run is painted before any colour was selected
///
/// # Example
///
/// ```rust
/// use pgm_sketch::{pack_colour, sketch_decode, Geometry};
///
/// let mut sketch = vec![0x81];
/// sketch.extend_from_slice(&pack_colour(200));
/// sketch.extend_from_slice(&[0x03, 0x40]);
///
/// let raster = sketch_decode(&sketch, Geometry::new(3, 1)?)?;
/// assert_eq!(raster.pixels(), &[200, 200, 200]);
/// # Ok::<(), pgm_sketch::SketchError>(())
/// ```
#[must_use = "this returns the decoded Raster"]
pub fn sketch_decode(data: &[u8], geometry: Geometry) -> Result<Raster> {
    let mut decoder = SketchDecoder::new(geometry);
    decoder.process(data)?;
    Ok(decoder.finalize())
}

/// Decodes a sketch stream into a 200x200 raster.
#[inline]
#[must_use = "this returns the decoded Raster"]
pub fn sketch_decode_default(data: &[u8]) -> Result<Raster> {
    sketch_decode(data, Geometry::default())
}

/// Sums run-length chunks up to the next advance opcode.
///
/// The advance opcode itself is left unread so the caller still sees it.
pub fn read_run_length(reader: &mut ByteReader<'_>) -> Result<usize> {
    let mut len = 0usize;
    loop {
        match reader.peek_token() {
            Some(Token::RunLength(chunk)) => {
                len = len.saturating_add(chunk as usize);
                reader.next_byte();
            }
            Some(Token::Control(op)) if op.is_advance() => return Ok(len),
            _ => {
                return Err(SketchError::MalformedRunSequence {
                    offset: reader.position(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    None,
    Line,
}

struct SketchDecoder {
    raster: Raster,
    tool: Tool,
    colour: Option<u8>,
    pending: usize,
    pos_x: usize,
    pos_y: usize,
    /// Set when a painted run reached the right edge; the next skip advance
    /// belongs to that wrap.
    wrap_pending: bool,
    runs: usize,
}

impl SketchDecoder {
    fn new(geometry: Geometry) -> Self {
        Self {
            raster: Raster::blank(geometry),
            tool: Tool::None,
            colour: None,
            pending: 0,
            pos_x: 0,
            pos_y: 0,
            wrap_pending: false,
            runs: 0,
        }
    }

    fn process(&mut self, data: &[u8]) -> Result<()> {
        let mut reader = ByteReader::new(data);
        while let Some(token) = reader.peek_token() {
            match token {
                Token::ColourData(_) => {
                    self.colour = Some(read_colour(&mut reader)?);
                }
                Token::RunLength(_) => {
                    self.pending = self.pending.saturating_add(read_run_length(&mut reader)?);
                }
                Token::Control(op) => {
                    let offset = reader.position();
                    reader.next_byte();
                    self.handle_control(op, offset)?;
                }
                Token::Unknown(byte) => {
                    trace!("ignoring byte {:#04x} at {}", byte, reader.position());
                    reader.next_byte();
                }
            }
        }
        Ok(())
    }

    fn handle_control(&mut self, op: Opcode, offset: usize) -> Result<()> {
        match op {
            Opcode::ToolLine => self.tool = Tool::Line,
            Opcode::ToolNone => self.tool = Tool::None,
            Opcode::TargetXReset => self.pos_x = 0,
            Opcode::AdvancePaint => self.advance_run(offset)?,
            Opcode::AdvanceSkip => {
                if self.wrap_pending {
                    self.wrap_pending = false;
                } else {
                    self.pos_y += 1;
                }
            }
            Opcode::ColourEnd => trace!("ignoring stray colour terminator"),
        }
        Ok(())
    }

    /// Moves the cursor over the pending run, painting it with the line
    /// tool. A run that ends on the right edge wraps to the next row.
    fn advance_run(&mut self, offset: usize) -> Result<()> {
        let len = std::mem::take(&mut self.pending);

        if self.tool == Tool::Line && len > 0 {
            let colour = self
                .colour
                .ok_or(SketchError::MalformedColourSequence { offset })?;
            self.raster.fill_span(self.pos_x, self.pos_y, len, colour)?;
            self.runs += 1;
        }

        let end = self.pos_x.saturating_add(len);
        if end == self.raster.width() {
            self.pos_x = 0;
            self.pos_y += 1;
            self.wrap_pending = true;
        } else {
            self.pos_x = end;
            self.wrap_pending = false;
        }
        Ok(())
    }

    fn finalize(self) -> Raster {
        debug!(
            "decoded {} runs over {} rows",
            self.runs,
            self.pos_y.min(self.raster.height())
        );
        self.raster
    }
}
