use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::{Codec, LengthCodec, SizeClass, VariableSizeCodec};
use crate::config::SHORT_U16_MAX_BYTES;

const NAME: &str = "short_u16";

/// Compact `u16` encoding used for counts in transaction messages.
///
/// Seven bits per byte, least-significant group first, with `0x80` marking
/// a continuation. Values take one to three bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortU16Codec;

/// Creates the compact `u16` codec.
pub const fn short_u16() -> ShortU16Codec {
    ShortU16Codec
}

fn width(value: u16) -> usize {
    match value {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        _ => 3,
    }
}

impl Codec for ShortU16Codec {
    type Value = u16;

    fn size_class(&self) -> SizeClass {
        SizeClass::Variable
    }

    fn encoded_size(&self, value: &u16) -> CodecResult<usize> {
        Ok(width(*value))
    }

    fn write(&self, value: &u16, out: &mut Vec<u8>) -> CodecResult<()> {
        let mut rest = *value;
        loop {
            let group = (rest & 0x7f) as u8;
            rest >>= 7;
            if rest == 0 {
                out.push(group);
                return Ok(());
            }
            out.push(group | 0x80);
        }
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(u16, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        let mut value = 0u32;
        for index in 0..SHORT_U16_MAX_BYTES {
            let [byte] = reader.read_array::<1>()?;
            // the last group only carries the top two bits of a u16
            if index == SHORT_U16_MAX_BYTES - 1 && byte > 0x03 {
                return Err(CodecError::invalid_format(NAME, "value exceeds u16"));
            }
            value |= u32::from(byte & 0x7f) << (7 * index);
            if byte & 0x80 == 0 {
                if index > 0 && byte == 0 {
                    return Err(CodecError::invalid_format(
                        NAME,
                        "non-canonical trailing zero byte",
                    ));
                }
                let value = u16::try_from(value)
                    .map_err(|_| CodecError::invalid_format(NAME, "value exceeds u16"))?;
                return Ok((value, reader.consumed()));
            }
        }
        Err(CodecError::invalid_format(NAME, "continuation past third byte"))
    }
}

impl VariableSizeCodec for ShortU16Codec {}

impl LengthCodec for ShortU16Codec {
    fn len_size(&self, len: usize) -> CodecResult<usize> {
        Ok(width(narrow(len)?))
    }

    fn write_len(&self, len: usize, out: &mut Vec<u8>) -> CodecResult<()> {
        self.write(&narrow(len)?, out)
    }

    fn read_len(&self, bytes: &[u8], offset: usize) -> CodecResult<(usize, usize)> {
        let (len, read) = self.decode(bytes, offset)?;
        Ok((usize::from(len), read))
    }
}

fn narrow(len: usize) -> CodecResult<u16> {
    u16::try_from(len).map_err(|_| CodecError::out_of_range(NAME, len, 0, u16::MAX))
}
