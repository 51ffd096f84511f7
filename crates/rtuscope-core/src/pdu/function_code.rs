#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionCode {
    ReadCoils,
    ReadDiscreteInputs,
    ReadHoldingRegisters,
    ReadInputRegisters,
    WriteSingleCoil,
    WriteSingleRegister,
    WriteMultipleCoils,
    WriteMultipleRegisters,
    Unknown(u8),
}

/// How the payload of a recognized function code is broken into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldLayout {
    /// Starting address followed by a quantity.
    AddressQuantity,
    SingleCoil,
    SingleRegister,
    /// Recognized, but only the name is reported.
    NameOnly,
}

struct FunctionEntry {
    code: u8,
    function: FunctionCode,
    name: &'static str,
    layout: FieldLayout,
}

const UNKNOWN_NAME: &str = "Unknown Function";

static FUNCTION_TABLE: [FunctionEntry; 8] = [
    FunctionEntry {
        code: 0x01,
        function: FunctionCode::ReadCoils,
        name: "Read Coils",
        layout: FieldLayout::AddressQuantity,
    },
    FunctionEntry {
        code: 0x02,
        function: FunctionCode::ReadDiscreteInputs,
        name: "Read Discrete Inputs",
        layout: FieldLayout::AddressQuantity,
    },
    FunctionEntry {
        code: 0x03,
        function: FunctionCode::ReadHoldingRegisters,
        name: "Read Holding Registers",
        layout: FieldLayout::AddressQuantity,
    },
    FunctionEntry {
        code: 0x04,
        function: FunctionCode::ReadInputRegisters,
        name: "Read Input Registers",
        layout: FieldLayout::AddressQuantity,
    },
    FunctionEntry {
        code: 0x05,
        function: FunctionCode::WriteSingleCoil,
        name: "Write Single Coil",
        layout: FieldLayout::SingleCoil,
    },
    FunctionEntry {
        code: 0x06,
        function: FunctionCode::WriteSingleRegister,
        name: "Write Single Register",
        layout: FieldLayout::SingleRegister,
    },
    FunctionEntry {
        code: 0x0F,
        function: FunctionCode::WriteMultipleCoils,
        name: "Write Multiple Coils",
        layout: FieldLayout::NameOnly,
    },
    FunctionEntry {
        code: 0x10,
        function: FunctionCode::WriteMultipleRegisters,
        name: "Write Multiple Registers",
        layout: FieldLayout::NameOnly,
    },
];

fn lookup(code: u8) -> Option<&'static FunctionEntry> {
    FUNCTION_TABLE.iter().find(|entry| entry.code == code)
}

impl FunctionCode {
    pub fn from_u8(value: u8) -> Self {
        lookup(value).map_or(Self::Unknown(value), |entry| entry.function)
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::ReadCoils => 0x01,
            Self::ReadDiscreteInputs => 0x02,
            Self::ReadHoldingRegisters => 0x03,
            Self::ReadInputRegisters => 0x04,
            Self::WriteSingleCoil => 0x05,
            Self::WriteSingleRegister => 0x06,
            Self::WriteMultipleCoils => 0x0F,
            Self::WriteMultipleRegisters => 0x10,
            Self::Unknown(code) => code,
        }
    }

    fn entry(self) -> Option<&'static FunctionEntry> {
        match self {
            Self::Unknown(_) => None,
            known => lookup(known.as_u8()),
        }
    }

    pub fn name(self) -> &'static str {
        self.entry().map_or(UNKNOWN_NAME, |entry| entry.name)
    }

    /// `None` for codes outside the dispatch table.
    pub fn layout(self) -> Option<FieldLayout> {
        self.entry().map(|entry| entry.layout)
    }
}
