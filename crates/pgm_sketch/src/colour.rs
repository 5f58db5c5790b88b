//! Packed colour sequences.
//!
//! A grayscale sample `s` is replicated into an opaque RGBA word
//! `s<<24 | s<<16 | s<<8 | 0xFF` and sent as 6-bit groups from the top of
//! the word down, each tagged with [`COLOUR_DATA_MARK`]. The sequence ends
//! with a literal `0xFF` and [`Opcode::ColourEnd`].

use crate::opcode::{Opcode, Token, COLOUR_DATA_MARK};
use crate::reader::ByteReader;
use crate::{Result, SketchError};

/// Bytes emitted per colour change.
pub const PACKED_COLOUR_LEN: usize = 7;

/// Packs a grayscale sample into its stream representation.
pub fn pack_colour(sample: u8) -> [u8; PACKED_COLOUR_LEN] {
    let s = sample as u32;
    let word = (s << 24) | (s << 16) | (s << 8) | 0xFF;
    [
        COLOUR_DATA_MARK | ((word >> 30) & 0x03) as u8,
        COLOUR_DATA_MARK | ((word >> 24) & 0x3F) as u8,
        COLOUR_DATA_MARK | ((word >> 18) & 0x3F) as u8,
        COLOUR_DATA_MARK | ((word >> 12) & 0x3F) as u8,
        COLOUR_DATA_MARK | ((word >> 6) & 0x3F) as u8,
        0xFF,
        Opcode::ColourEnd.as_byte(),
    ]
}

/// Appends the packed colour for `sample` to `out`.
#[inline]
pub fn write_colour(sample: u8, out: &mut Vec<u8>) {
    out.extend_from_slice(&pack_colour(sample));
}

/// Reads a packed colour sequence, consuming its terminator.
///
/// The reader must sit on the first data byte. Only its low two bits seed
/// the accumulator; the sample is taken from bits 15..8 of the rebuilt
/// word, which any of the three replicated channels would yield.
pub fn read_colour(reader: &mut ByteReader<'_>) -> Result<u8> {
    let start = reader.position();
    let mut acc = match reader.next_token() {
        Some(Token::ColourData(byte)) => (byte & 0x03) as u32,
        _ => return Err(SketchError::MalformedColourSequence { offset: start }),
    };

    loop {
        let offset = reader.position();
        match reader.next_token() {
            Some(Token::ColourData(byte)) => {
                acc = (acc << 6) | (byte & 0x3F) as u32;
            }
            Some(Token::Control(Opcode::ColourEnd)) => break,
            _ => return Err(SketchError::MalformedColourSequence { offset }),
        }
    }

    Ok(((acc >> 8) & 0xFF) as u8)
}
