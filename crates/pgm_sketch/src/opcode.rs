//! Byte vocabulary shared by the encoder and decoder.
//!
//! Control bytes live at fixed values outside the two data bands: packed
//! colour data occupies `0xC0..=0xFF` and run-length chunks `0x00..=0x1F`.

/// Largest value a single run-length byte carries.
pub const MAX_RUN_CHUNK: u8 = 0x1F;

/// Bits forced on every packed colour data byte.
pub const COLOUR_DATA_MARK: u8 = 0xC0;

/// Control opcodes of a sketch stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Select the "no paint" tool, used for cursor repositioning.
    ToolNone = 0x80,
    /// Select the line tool, which paints horizontal runs.
    ToolLine = 0x81,
    /// Terminates a packed colour sequence.
    ColourEnd = 0x83,
    /// Reset the x cursor to 0.
    TargetXReset = 0x84,
    /// Advance; paints the pending run when the line tool is selected.
    AdvancePaint = 0x40,
    /// Advance to the next row without painting.
    AdvanceSkip = 0x41,
}

impl Opcode {
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x80 => Some(Self::ToolNone),
            0x81 => Some(Self::ToolLine),
            0x83 => Some(Self::ColourEnd),
            0x84 => Some(Self::TargetXReset),
            0x40 => Some(Self::AdvancePaint),
            0x41 => Some(Self::AdvanceSkip),
            _ => None,
        }
    }

    /// True for the opcodes that terminate a run-length sequence.
    #[inline]
    pub const fn is_advance(self) -> bool {
        matches!(self, Self::AdvancePaint | Self::AdvanceSkip)
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op.as_byte()
    }
}

/// A classified stream byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Control(Opcode),
    /// One 6-bit group of a packed colour (high two bits set).
    ColourData(u8),
    /// One chunk of a horizontal run length.
    RunLength(u8),
    /// Any byte outside the vocabulary.
    Unknown(u8),
}

impl Token {
    pub const fn classify(byte: u8) -> Self {
        if let Some(op) = Opcode::from_byte(byte) {
            return Self::Control(op);
        }
        match byte {
            0x00..=MAX_RUN_CHUNK => Self::RunLength(byte),
            COLOUR_DATA_MARK..=0xFF => Self::ColourData(byte),
            _ => Self::Unknown(byte),
        }
    }
}

impl From<u8> for Token {
    fn from(byte: u8) -> Self {
        Self::classify(byte)
    }
}
