//! Per-frame decode pipeline: validate, filter by address, decode fields.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::DecodeError;
use crate::address::{AddressClass, DeviceAddressing};
use crate::frame::rtu;
use crate::pdu::{FunctionReport, decode_function};

/// A frame that passed validation and was addressed to this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedFrame<'a> {
    pub slave_id: u8,
    pub function_code: u8,
    pub payload: &'a [u8],
    pub received_crc: u16,
    pub computed_crc: u16,
    pub address_class: AddressClass,
    pub function: FunctionReport<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecodeOutcome<'a> {
    RejectedTooShort { len: usize },
    RejectedCrcMismatch { received: u16, computed: u16 },
    /// Valid frame for another slave. Not an error.
    FilteredOtherAddress { slave_id: u8 },
    Accepted(DecodedFrame<'a>),
}

impl<'a> DecodeOutcome<'a> {
    pub fn accepted(&self) -> Option<&DecodedFrame<'a>> {
        match self {
            Self::Accepted(frame) => Some(frame),
            _ => None,
        }
    }

    pub const fn is_rejected(&self) -> bool {
        matches!(
            self,
            Self::RejectedTooShort { .. } | Self::RejectedCrcMismatch { .. }
        )
    }
}

/// An outcome labelled with the sequence number of its decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SequencedOutcome<'a> {
    pub sequence: u32,
    pub outcome: DecodeOutcome<'a>,
}

/// Monotonic frame sequence shared by every receiver feeding one decoder.
///
/// Only labels outcomes; decoding never reads it.
#[derive(Debug, Default)]
pub struct FrameCounter {
    last: AtomicU32,
}

impl FrameCounter {
    pub const fn new() -> Self {
        Self {
            last: AtomicU32::new(0),
        }
    }

    /// Increments the counter and returns the new 1-based sequence number.
    pub fn next(&self) -> u32 {
        self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Number of sequence numbers handed out so far.
    pub fn current(&self) -> u32 {
        self.last.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDecoder {
    addressing: DeviceAddressing,
}

impl FrameDecoder {
    pub const fn new(addressing: DeviceAddressing) -> Self {
        Self { addressing }
    }

    pub const fn addressing(&self) -> &DeviceAddressing {
        &self.addressing
    }

    pub fn decode<'a>(&self, frame: &'a [u8]) -> DecodeOutcome<'a> {
        let validated = match rtu::validate(frame) {
            Ok(validated) => validated,
            Err(DecodeError::CrcMismatch { received, computed }) => {
                return DecodeOutcome::RejectedCrcMismatch { received, computed };
            }
            // `validate` checks the length before reading, so it never reports Eof.
            Err(DecodeError::FrameTooShort { .. } | DecodeError::UnexpectedEof) => {
                return DecodeOutcome::RejectedTooShort { len: frame.len() };
            }
        };

        let address_class = self.addressing.classify(validated.slave_id);
        if let AddressClass::OtherAddressed(slave_id) = address_class {
            return DecodeOutcome::FilteredOtherAddress { slave_id };
        }

        DecodeOutcome::Accepted(DecodedFrame {
            slave_id: validated.slave_id,
            function_code: validated.function_code,
            payload: validated.payload,
            received_crc: validated.received_crc,
            computed_crc: validated.computed_crc,
            address_class,
            function: decode_function(validated.function_code, validated.payload),
        })
    }

    /// Takes the next sequence number from `counter`, then decodes `frame`.
    pub fn decode_sequenced<'a>(
        &self,
        counter: &FrameCounter,
        frame: &'a [u8],
    ) -> SequencedOutcome<'a> {
        let sequence = counter.next();
        SequencedOutcome {
            sequence,
            outcome: self.decode(frame),
        }
    }
}
