use core::fmt;

/// Errors that can occur while encoding Modbus data into an output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodeError {
    BufferTooSmall,
    ValueOutOfRange,
    InvalidLength,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::ValueOutOfRange => f.write_str("value out of range"),
            Self::InvalidLength => f.write_str("invalid length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Errors that can occur while decoding a candidate RTU frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecodeError {
    UnexpectedEof,
    /// Fewer than address, function code and CRC bytes were received.
    FrameTooShort { len: usize },
    /// The trailing CRC does not match the CRC of the preceding bytes.
    CrcMismatch { received: u16, computed: u16 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::FrameTooShort { len } => {
                write!(f, "frame too short ({len} bytes, minimum 4 required)")
            }
            Self::CrcMismatch { received, computed } => write!(
                f,
                "crc mismatch (received 0x{received:04X}, computed 0x{computed:04X})"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
