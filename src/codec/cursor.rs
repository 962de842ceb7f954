use super::error::{CodecError, CodecResult};
use super::Codec;

/// Bounds-checked cursor over a byte slice.
///
/// The cursor starts at an absolute offset and only moves forward. Bytes
/// consumed are tallied by summing each read, never recomputed from the
/// absolute position.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    consumed: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a cursor positioned at `offset`.
    ///
    /// An offset equal to the buffer length is valid and leaves nothing to
    /// read; anything past it is rejected.
    pub fn new(bytes: &'a [u8], offset: usize) -> CodecResult<Self> {
        if offset > bytes.len() {
            return Err(CodecError::invalid_offset(offset, bytes.len()));
        }
        Ok(Self {
            bytes,
            offset,
            consumed: 0,
        })
    }

    /// Returns the absolute position of the next read.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns the number of bytes consumed since the cursor was created.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Returns the number of bytes remaining in the buffer.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Fails unless at least `len` bytes remain.
    pub fn ensure_remaining(&self, len: usize) -> CodecResult<()> {
        let available = self.remaining();
        if len > available {
            return Err(CodecError::insufficient_bytes(len, available, self.offset));
        }
        Ok(())
    }

    /// Reads exactly `len` bytes from the cursor.
    pub fn read_exact(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        self.ensure_remaining(len)?;
        let start = self.offset;
        self.advance(len);
        Ok(&self.bytes[start..start + len])
    }

    /// Reads a fixed-size byte array from the cursor.
    pub fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let bytes = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Decodes one value with `codec` at the current position and advances
    /// past the bytes it reported as consumed.
    pub fn decode_with<C>(&mut self, codec: &C) -> CodecResult<C::Value>
    where
        C: Codec + ?Sized,
    {
        let (value, read) = codec.decode(self.bytes, self.offset)?;
        self.ensure_remaining(read)?;
        self.advance(read);
        Ok(value)
    }

    fn advance(&mut self, len: usize) {
        self.offset += len;
        self.consumed += len;
    }
}

/// Ensures a whole-buffer decode consumed every byte.
pub fn ensure_consumed(bytes: &[u8], consumed: usize) -> CodecResult<()> {
    let remaining = bytes.len().saturating_sub(consumed);
    if remaining == 0 {
        Ok(())
    } else {
        Err(CodecError::trailing_bytes(consumed, remaining))
    }
}
