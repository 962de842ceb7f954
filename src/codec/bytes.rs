use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::numbers::{u32, U32Codec};
use super::{add_size, Codec, FixedSizeCodec, LengthCodec, SizeClass, VariableSizeCodec};
use crate::config::PUBLIC_KEY_LENGTH;

/// Byte array of a length fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBytesCodec {
    len: usize,
}

/// Creates a codec for byte arrays of exactly `len` bytes.
pub const fn fixed_bytes(len: usize) -> FixedBytesCodec {
    FixedBytesCodec { len }
}

/// Creates the 32-byte public key codec.
pub const fn public_key() -> FixedBytesCodec {
    fixed_bytes(PUBLIC_KEY_LENGTH)
}

impl FixedBytesCodec {
    /// Returns the configured length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` for the zero-length codec.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Codec for FixedBytesCodec {
    type Value = Vec<u8>;

    fn size_class(&self) -> SizeClass {
        SizeClass::Fixed(self.len)
    }

    fn encoded_size(&self, _value: &Vec<u8>) -> CodecResult<usize> {
        Ok(self.len)
    }

    fn write(&self, value: &Vec<u8>, out: &mut Vec<u8>) -> CodecResult<()> {
        if value.len() != self.len {
            return Err(CodecError::invalid_format(
                "fixed bytes",
                format!("expected {} bytes, got {}", self.len, value.len()),
            ));
        }
        out.extend_from_slice(value);
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Vec<u8>, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        let raw = reader.read_exact(self.len)?;
        Ok((raw.to_vec(), reader.consumed()))
    }
}

impl FixedSizeCodec for FixedBytesCodec {
    fn fixed_size(&self) -> usize {
        self.len
    }
}

/// Length-prefixed byte blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BytesCodec<L = U32Codec> {
    prefix: L,
}

/// Creates a byte blob codec with the default `u32` length prefix.
pub const fn bytes() -> BytesCodec {
    BytesCodec { prefix: u32() }
}

/// Creates a byte blob codec with a custom length prefix.
pub fn bytes_with_prefix<L: LengthCodec>(prefix: L) -> BytesCodec<L> {
    BytesCodec { prefix }
}

fn blob_size<L: LengthCodec>(prefix: &L, len: usize) -> CodecResult<usize> {
    add_size(prefix.len_size(len)?, len)
}

fn read_blob<'a, L: LengthCodec>(
    prefix: &L,
    bytes: &'a [u8],
    offset: usize,
) -> CodecResult<(&'a [u8], usize)> {
    let mut reader = ByteReader::new(bytes, offset)?;
    let (len, prefix_len) = prefix.read_len(bytes, offset)?;
    reader.read_exact(prefix_len)?;
    let payload = reader.read_exact(len)?;
    Ok((payload, reader.consumed()))
}

impl<L: LengthCodec> Codec for BytesCodec<L> {
    type Value = Vec<u8>;

    fn size_class(&self) -> SizeClass {
        SizeClass::Variable
    }

    fn encoded_size(&self, value: &Vec<u8>) -> CodecResult<usize> {
        blob_size(&self.prefix, value.len())
    }

    fn write(&self, value: &Vec<u8>, out: &mut Vec<u8>) -> CodecResult<()> {
        self.prefix.write_len(value.len(), out)?;
        out.extend_from_slice(value);
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Vec<u8>, usize)> {
        let (payload, read) = read_blob(&self.prefix, bytes, offset)?;
        Ok((payload.to_vec(), read))
    }
}

impl<L: LengthCodec> VariableSizeCodec for BytesCodec<L> {}

/// Length-prefixed UTF-8 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringCodec<L = U32Codec> {
    prefix: L,
}

/// Creates a UTF-8 string codec with the default `u32` length prefix.
pub const fn string() -> StringCodec {
    StringCodec { prefix: u32() }
}

/// Creates a UTF-8 string codec with a custom length prefix.
pub fn string_with_prefix<L: LengthCodec>(prefix: L) -> StringCodec<L> {
    StringCodec { prefix }
}

impl<L: LengthCodec> Codec for StringCodec<L> {
    type Value = String;

    fn size_class(&self) -> SizeClass {
        SizeClass::Variable
    }

    fn encoded_size(&self, value: &String) -> CodecResult<usize> {
        blob_size(&self.prefix, value.len())
    }

    fn write(&self, value: &String, out: &mut Vec<u8>) -> CodecResult<()> {
        self.prefix.write_len(value.len(), out)?;
        out.extend_from_slice(value.as_bytes());
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(String, usize)> {
        let (payload, read) = read_blob(&self.prefix, bytes, offset)?;
        let text = core::str::from_utf8(payload)
            .map_err(|err| CodecError::invalid_format("string", err.to_string()))?;
        Ok((text.to_owned(), read))
    }
}

impl<L: LengthCodec> VariableSizeCodec for StringCodec<L> {}
