//! CRC-16 as used by Modbus RTU: reflected polynomial 0xA001, initial 0xFFFF.

const INITIAL: u16 = 0xFFFF;
const POLYNOMIAL: u16 = 0xA001;

/// Runs the eight shift/xor rounds for one byte already folded into `crc`.
const fn shift_byte(mut crc: u16) -> u16 {
    let mut bit = 0;
    while bit < 8 {
        if (crc & 0x0001) != 0 {
            crc = (crc >> 1) ^ POLYNOMIAL;
        } else {
            crc >>= 1;
        }
        bit += 1;
    }
    crc
}

const fn build_crc16_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = shift_byte(i as u16);
        i += 1;
    }
    table
}

const CRC16_TABLE: [u16; 256] = build_crc16_table();

/// Computes the Modbus CRC over `data`. Returns `0xFFFF` for empty input.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = INITIAL;
    for byte in data {
        let idx = ((crc ^ (*byte as u16)) & 0x00FF) as usize;
        crc = (crc >> 8) ^ CRC16_TABLE[idx];
    }
    crc
}

/// Bit-at-a-time form of [`crc16`], kept for cross-checking the table.
pub fn crc16_bitwise(data: &[u8]) -> u16 {
    data.iter()
        .fold(INITIAL, |crc, byte| shift_byte(crc ^ (*byte as u16)))
}
