use core::fmt::{Display, Formatter};

/// Failures of the scanline path. Only [`VideoError::BufferTooSmall`] can
/// come out of composing; the rest are reported when decoding a command stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VideoError {
    BufferTooSmall { needed: usize, available: usize },
    UnknownOpcode { at: usize, word: u16 },
    Truncated { at: usize },
    LineOverflow { pixels: usize },
}

impl Display for VideoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            VideoError::BufferTooSmall { needed, available } => {
                write!(f, "scanline buffer holds {available} words, a line needs {needed}")
            }
            VideoError::UnknownOpcode { at, word } => {
                write!(f, "unknown opcode {word:#06x} at word {at}")
            }
            VideoError::Truncated { at } => write!(f, "command stream ends inside an instruction at word {at}"),
            VideoError::LineOverflow { pixels } => write!(f, "line expands past {pixels} pixels"),
        }
    }
}

impl core::error::Error for VideoError {}
