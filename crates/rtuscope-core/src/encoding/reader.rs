use crate::DecodeError;

/// A zero-copy reader that advances through a byte slice.
///
/// Payload fields are big-endian; only the trailing RTU CRC is little-endian,
/// so both byte orders are exposed explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Bytes not yet consumed.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos.min(self.buf.len())..]
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .buf
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::UnexpectedEof);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..start + len])
    }

    pub fn read_be_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_le_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::Reader;
    use crate::DecodeError;

    #[test]
    fn reads_both_byte_orders() {
        let mut r = Reader::new(&[0x12, 0x34, 0x12, 0x34]);
        assert_eq!(r.read_be_u16().unwrap(), 0x1234);
        assert_eq!(r.read_le_u16().unwrap(), 0x3412);
        assert!(r.is_empty());
    }

    #[test]
    fn short_reads_do_not_advance() {
        let mut r = Reader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_exact(3).unwrap_err(), DecodeError::UnexpectedEof);
        assert_eq!(r.position(), 1);
        assert_eq!(r.rest(), &[0x02, 0x03]);
        assert_eq!(r.read_be_u16().unwrap(), 0x0203);
        assert_eq!(r.read_u8().unwrap_err(), DecodeError::UnexpectedEof);
    }
}
