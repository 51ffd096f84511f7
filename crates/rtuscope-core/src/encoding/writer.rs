use crate::EncodeError;

/// A byte writer that encodes into a caller-owned buffer.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.write_all(&[value])
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        if self.remaining() < data.len() {
            return Err(EncodeError::BufferTooSmall);
        }
        let end = self.pos + data.len();
        self.buf[self.pos..end].copy_from_slice(data);
        self.pos = end;
        Ok(())
    }

    pub fn write_le_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_all(&value.to_le_bytes())
    }
}
