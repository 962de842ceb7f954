use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::{Codec, FixedSizeCodec, SizeClass};

/// Boolean flag stored as a single byte (`0` or `1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolCodec;

/// Creates the boolean codec.
pub const fn boolean() -> BoolCodec {
    BoolCodec
}

impl Codec for BoolCodec {
    type Value = bool;

    fn size_class(&self) -> SizeClass {
        SizeClass::Fixed(1)
    }

    fn encoded_size(&self, _value: &bool) -> CodecResult<usize> {
        Ok(1)
    }

    fn write(&self, value: &bool, out: &mut Vec<u8>) -> CodecResult<()> {
        out.push(u8::from(*value));
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(bool, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        match reader.read_array::<1>()? {
            [0] => Ok((false, reader.consumed())),
            [1] => Ok((true, reader.consumed())),
            [other] => Err(CodecError::invalid_format(
                "bool",
                format!("byte {:#04x} is not 0 or 1", other),
            )),
        }
    }
}

impl FixedSizeCodec for BoolCodec {
    fn fixed_size(&self) -> usize {
        1
    }
}
