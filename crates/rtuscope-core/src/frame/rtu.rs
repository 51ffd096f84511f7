use crate::crc::crc16;
use crate::encoding::{Reader, Writer};
use crate::{DecodeError, EncodeError};

/// Address byte, function code byte and two CRC bytes.
pub const MIN_FRAME_LEN: usize = 4;
/// Largest RTU ADU: address, 253 byte PDU, CRC.
pub const MAX_FRAME_LEN: usize = 256;

const CRC_LEN: usize = 2;

/// A frame whose length and CRC have been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidatedFrame<'a> {
    pub slave_id: u8,
    pub function_code: u8,
    /// Bytes between the function code and the CRC.
    pub payload: &'a [u8],
    pub received_crc: u16,
    pub computed_crc: u16,
}

/// Checks the length and trailing CRC of one candidate frame.
///
/// The CRC is only computed once the minimum length is satisfied.
pub fn validate(data: &[u8]) -> Result<ValidatedFrame<'_>, DecodeError> {
    if data.len() < MIN_FRAME_LEN {
        return Err(DecodeError::FrameTooShort { len: data.len() });
    }

    let (body, crc_bytes) = data.split_at(data.len() - CRC_LEN);
    let received_crc = Reader::new(crc_bytes).read_le_u16()?;
    let computed_crc = crc16(body);
    if received_crc != computed_crc {
        return Err(DecodeError::CrcMismatch {
            received: received_crc,
            computed: computed_crc,
        });
    }

    let mut r = Reader::new(body);
    let slave_id = r.read_u8()?;
    let function_code = r.read_u8()?;
    Ok(ValidatedFrame {
        slave_id,
        function_code,
        payload: r.rest(),
        received_crc,
        computed_crc,
    })
}

/// Writes `slave_id`, `pdu` and the little-endian CRC over both.
pub fn encode_frame(w: &mut Writer<'_>, slave_id: u8, pdu: &[u8]) -> Result<(), EncodeError> {
    if pdu.is_empty() {
        return Err(EncodeError::InvalidLength);
    }
    if pdu.len() > MAX_FRAME_LEN - 1 - CRC_LEN {
        return Err(EncodeError::ValueOutOfRange);
    }

    let start = w.position();
    w.write_u8(slave_id)?;
    w.write_all(pdu)?;
    let crc = crc16(&w.as_written()[start..]);
    w.write_le_u16(crc)?;
    Ok(())
}
