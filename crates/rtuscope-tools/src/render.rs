//! Plain-text rendering of decode outcomes for terminal output.

use rtuscope_core::pdu::{CoilState, FunctionCode, FunctionFields, RegisterMeaning};
use rtuscope_core::{AddressClass, DecodeOutcome, DecodedFrame, SequencedOutcome};
use std::fmt;

struct Rendered<'r, 'a> {
    raw: &'r [u8],
    outcome: &'r SequencedOutcome<'a>,
}

pub fn render(raw: &[u8], outcome: &SequencedOutcome<'_>) -> String {
    Rendered { raw, outcome }.to_string()
}

struct Hex<'a>(&'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

fn word(f: &mut fmt::Formatter<'_>, label: &str, value: u16) -> fmt::Result {
    writeln!(f, "  {label:<15}0x{value:04X} ({value})")
}

fn coil_state(state: CoilState) -> &'static str {
    match state {
        CoilState::On => "ON",
        CoilState::Off => "OFF",
        CoilState::Indeterminate => "???",
    }
}

fn register_meaning(meaning: RegisterMeaning) -> Option<&'static str> {
    match meaning {
        RegisterMeaning::Disabled => Some("off/disable/false"),
        RegisterMeaning::Enabled => Some("on/enable/true"),
        RegisterMeaning::AllBitsSet => Some("all bits set"),
        RegisterMeaning::Uninterpreted => None,
    }
}

fn quantity_label(function: FunctionCode) -> &'static str {
    match function {
        FunctionCode::ReadCoils | FunctionCode::ReadDiscreteInputs => "bit count:",
        _ => "register count:",
    }
}

fn write_accepted(f: &mut fmt::Formatter<'_>, frame: &DecodedFrame<'_>) -> fmt::Result {
    let address = match frame.address_class {
        AddressClass::SelfAddressed => "for this device",
        AddressClass::Broadcast => "broadcast",
        AddressClass::OtherAddressed(_) => "for another device",
    };
    writeln!(f, "  {:<15}{address}", "address:")?;

    match frame.function.fields {
        FunctionFields::ReadRange {
            start_address,
            quantity,
        } => {
            word(f, "start address:", start_address)?;
            word(f, quantity_label(frame.function.function), quantity)?;
        }
        FunctionFields::WriteSingleCoil {
            address,
            value,
            state,
        } => {
            word(f, "coil address:", address)?;
            writeln!(f, "  {:<15}0x{value:04X} ({})", "coil value:", coil_state(state))?;
        }
        FunctionFields::WriteSingleRegister {
            address,
            value,
            meaning,
        } => {
            word(f, "register:", address)?;
            word(f, "value:", value)?;
            if let Some(meaning) = register_meaning(meaning) {
                writeln!(f, "  {:<15}{meaning}", "meaning:")?;
            }
        }
        FunctionFields::NameOnly => {}
        FunctionFields::InsufficientPayload { required, actual } => {
            writeln!(
                f,
                "  {:<15}insufficient payload ({actual} of {required} bytes)",
                "fields:"
            )?;
        }
        FunctionFields::Raw { preview, truncated } => {
            let more = if truncated { " ..." } else { "" };
            writeln!(f, "  {:<15}{}{more}", "raw data:", Hex(preview))?;
        }
    }
    Ok(())
}

impl fmt::Display for Rendered<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "frame #{} ({} bytes): {}",
            self.outcome.sequence,
            self.raw.len(),
            Hex(self.raw)
        )?;

        if let [slave_id, function_code, ..] = self.raw {
            writeln!(f, "  {:<15}0x{slave_id:02X} ({slave_id})", "slave id:")?;
            writeln!(
                f,
                "  {:<15}0x{function_code:02X} {}",
                "function:",
                FunctionCode::from_u8(*function_code).name()
            )?;
        }

        match &self.outcome.outcome {
            DecodeOutcome::RejectedTooShort { len } => {
                writeln!(f, "  rejected: frame too short ({len} bytes, minimum 4)")
            }
            DecodeOutcome::RejectedCrcMismatch { received, computed } => writeln!(
                f,
                "  rejected: crc mismatch (received 0x{received:04X}, computed 0x{computed:04X})"
            ),
            DecodeOutcome::FilteredOtherAddress { slave_id } => {
                writeln!(f, "  ignored: frame is for slave 0x{slave_id:02X}")
            }
            DecodeOutcome::Accepted(frame) => {
                writeln!(f, "  {:<15}0x{:04X} valid", "crc:", frame.computed_crc)?;
                write_accepted(f, frame)
            }
        }
    }
}
