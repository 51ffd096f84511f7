//! Modbus RTU frame decoding and validation in pure Rust.
//!
//! `rtuscope-core` takes one candidate frame at a time, checks its length and
//! CRC, filters it by slave address and extracts the function-specific fields.
//! It performs no I/O and keeps no state between frames apart from the
//! caller-owned [`FrameCounter`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod address;
pub mod crc;
pub mod decoder;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod pdu;

pub use address::{AddressClass, DeviceAddressing};
pub use crc::crc16;
pub use decoder::{DecodeOutcome, DecodedFrame, FrameCounter, FrameDecoder, SequencedOutcome};
pub use error::{DecodeError, EncodeError};
