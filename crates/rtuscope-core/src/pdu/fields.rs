use crate::DecodeError;
use crate::encoding::Reader;
use crate::pdu::{FieldLayout, FunctionCode};

/// Payload bytes shown for function codes without a field layout.
pub const RAW_PREVIEW_LEN: usize = 8;

/// Address plus quantity or value, two big-endian words.
const FIXED_FIELDS_LEN: usize = 4;

const COIL_ON: u16 = 0xFF00;
const COIL_OFF: u16 = 0x0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoilState {
    On,
    Off,
    /// Neither `0xFF00` nor `0x0000`.
    Indeterminate,
}

impl CoilState {
    pub const fn from_value(value: u16) -> Self {
        match value {
            COIL_ON => Self::On,
            COIL_OFF => Self::Off,
            _ => Self::Indeterminate,
        }
    }
}

/// Common readings of a single register write value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterMeaning {
    Disabled,
    Enabled,
    AllBitsSet,
    Uninterpreted,
}

impl RegisterMeaning {
    pub const fn from_value(value: u16) -> Self {
        match value {
            0x0000 => Self::Disabled,
            0x0001 => Self::Enabled,
            0xFFFF => Self::AllBitsSet,
            _ => Self::Uninterpreted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FunctionFields<'a> {
    /// Read coils, discrete inputs, holding or input registers.
    ReadRange { start_address: u16, quantity: u16 },
    WriteSingleCoil {
        address: u16,
        value: u16,
        state: CoilState,
    },
    WriteSingleRegister {
        address: u16,
        value: u16,
        meaning: RegisterMeaning,
    },
    NameOnly,
    /// A recognized code whose payload is too short for its fields.
    InsufficientPayload { required: usize, actual: usize },
    /// Unrecognized code: at most [`RAW_PREVIEW_LEN`] leading payload bytes.
    Raw { preview: &'a [u8], truncated: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionReport<'a> {
    pub function: FunctionCode,
    pub fields: FunctionFields<'a>,
}

impl FunctionReport<'_> {
    pub fn name(&self) -> &'static str {
        self.function.name()
    }
}

fn decode_layout(layout: FieldLayout, payload: &[u8]) -> Result<FunctionFields<'_>, DecodeError> {
    let mut r = Reader::new(payload);
    Ok(match layout {
        FieldLayout::NameOnly => FunctionFields::NameOnly,
        FieldLayout::AddressQuantity => FunctionFields::ReadRange {
            start_address: r.read_be_u16()?,
            quantity: r.read_be_u16()?,
        },
        FieldLayout::SingleCoil => {
            let address = r.read_be_u16()?;
            let value = r.read_be_u16()?;
            FunctionFields::WriteSingleCoil {
                address,
                value,
                state: CoilState::from_value(value),
            }
        }
        FieldLayout::SingleRegister => {
            let address = r.read_be_u16()?;
            let value = r.read_be_u16()?;
            FunctionFields::WriteSingleRegister {
                address,
                value,
                meaning: RegisterMeaning::from_value(value),
            }
        }
    })
}

fn raw_preview(payload: &[u8]) -> FunctionFields<'_> {
    let len = payload.len().min(RAW_PREVIEW_LEN);
    FunctionFields::Raw {
        preview: &payload[..len],
        truncated: payload.len() > RAW_PREVIEW_LEN,
    }
}

/// Extracts the typed fields of `payload` for `function_code`.
///
/// Never reads past the payload: a recognized code with too few bytes is
/// reported as [`FunctionFields::InsufficientPayload`].
pub fn decode_function(function_code: u8, payload: &[u8]) -> FunctionReport<'_> {
    let function = FunctionCode::from_u8(function_code);
    let fields = match function.layout() {
        None => raw_preview(payload),
        Some(layout) => decode_layout(layout, payload).unwrap_or(
            FunctionFields::InsufficientPayload {
                required: FIXED_FIELDS_LEN,
                actual: payload.len(),
            },
        ),
    };
    FunctionReport { function, fields }
}

#[cfg(test)]
mod tests {
    use super::{CoilState, FunctionFields, RegisterMeaning, decode_function};
    use crate::pdu::FunctionCode;

    #[test]
    fn read_requests_share_a_layout() {
        for code in 0x01..=0x04u8 {
            let report = decode_function(code, &[0x00, 0x13, 0x00, 0x25]);
            assert_eq!(report.function.as_u8(), code);
            assert_eq!(
                report.fields,
                FunctionFields::ReadRange {
                    start_address: 0x0013,
                    quantity: 0x0025,
                }
            );
        }
    }

    #[test]
    fn write_single_coil_states() {
        let cases = [
            (0xFF00u16, CoilState::On),
            (0x0000, CoilState::Off),
            (0x1234, CoilState::Indeterminate),
            (0x00FF, CoilState::Indeterminate),
        ];
        for (value, state) in cases {
            let [hi, lo] = value.to_be_bytes();
            let payload = [0x00, 0xAC, hi, lo];
            let report = decode_function(0x05, &payload);
            assert_eq!(
                report.fields,
                FunctionFields::WriteSingleCoil {
                    address: 0x00AC,
                    value,
                    state,
                }
            );
        }
    }

    #[test]
    fn write_single_register_meanings() {
        assert_eq!(RegisterMeaning::from_value(0x0000), RegisterMeaning::Disabled);
        assert_eq!(RegisterMeaning::from_value(0x0001), RegisterMeaning::Enabled);
        assert_eq!(RegisterMeaning::from_value(0xFFFF), RegisterMeaning::AllBitsSet);
        assert_eq!(
            RegisterMeaning::from_value(0x1234),
            RegisterMeaning::Uninterpreted
        );

        let report = decode_function(0x06, &[0x00, 0x10, 0x00, 0x01]);
        assert_eq!(report.name(), "Write Single Register");
        assert_eq!(
            report.fields,
            FunctionFields::WriteSingleRegister {
                address: 0x0010,
                value: 0x0001,
                meaning: RegisterMeaning::Enabled,
            }
        );
    }

    #[test]
    fn fields_are_big_endian() {
        let report = decode_function(0x03, &[0x12, 0x34, 0x00, 0x02]);
        assert_eq!(
            report.fields,
            FunctionFields::ReadRange {
                start_address: 0x1234,
                quantity: 0x0002,
            }
        );
    }

    #[test]
    fn short_payload_is_marked_not_fabricated() {
        let payload = [0x00, 0x10, 0x00, 0x01];
        for len in 0..4 {
            let report = decode_function(0x06, &payload[..len]);
            assert_eq!(report.function, FunctionCode::WriteSingleRegister);
            assert_eq!(
                report.fields,
                FunctionFields::InsufficientPayload {
                    required: 4,
                    actual: len,
                }
            );
        }
    }

    #[test]
    fn multiple_writes_report_name_only() {
        let report = decode_function(0x0F, &[0x00, 0x13, 0x00, 0x0A, 0x02, 0xCD, 0x01]);
        assert_eq!(report.name(), "Write Multiple Coils");
        assert_eq!(report.fields, FunctionFields::NameOnly);

        let report = decode_function(0x10, &[]);
        assert_eq!(report.name(), "Write Multiple Registers");
        assert_eq!(report.fields, FunctionFields::NameOnly);
    }

    #[test]
    fn name_only_codes_never_report_insufficient_payload() {
        for payload in [&[][..], &[0x00][..], &[0x00, 0x13, 0x00][..]] {
            assert_eq!(decode_function(0x0F, payload).fields, FunctionFields::NameOnly);
            assert_eq!(decode_function(0x10, payload).fields, FunctionFields::NameOnly);
        }
    }

    #[test]
    fn unknown_function_previews_raw_bytes() {
        let payload = [0x01, 0x02, 0x03];
        let report = decode_function(0x41, &payload);
        assert_eq!(report.name(), "Unknown Function");
        assert_eq!(
            report.fields,
            FunctionFields::Raw {
                preview: &payload,
                truncated: false,
            }
        );
    }

    #[test]
    fn raw_preview_is_bounded() {
        let payload = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];
        let report = decode_function(0x41, &payload);
        assert_eq!(
            report.fields,
            FunctionFields::Raw {
                preview: &payload[..8],
                truncated: true,
            }
        );
    }
}
