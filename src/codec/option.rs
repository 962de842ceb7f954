use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::{Codec, SizeClass, VariableSizeCodec};
use crate::config::{OPTION_NONE_TAG, OPTION_SOME_TAG};

/// Optional value with a one-byte presence tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionCodec<C> {
    inner: C,
}

/// Creates an option codec around `inner`.
pub fn option<C: Codec>(inner: C) -> OptionCodec<C> {
    OptionCodec { inner }
}

impl<C: Codec> Codec for OptionCodec<C> {
    type Value = Option<C::Value>;

    fn size_class(&self) -> SizeClass {
        SizeClass::Variable
    }

    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize> {
        match value {
            Some(inner) => super::add_size(1, self.inner.encoded_size(inner)?),
            None => Ok(1),
        }
    }

    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()> {
        match value {
            Some(inner) => {
                out.push(OPTION_SOME_TAG);
                self.inner.write(inner, out)
            }
            None => {
                out.push(OPTION_NONE_TAG);
                Ok(())
            }
        }
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        let [tag] = reader.read_array::<1>()?;
        let value = match tag {
            OPTION_NONE_TAG => None,
            OPTION_SOME_TAG => Some(reader.decode_with(&self.inner)?),
            other => {
                return Err(CodecError::invalid_format(
                    "option",
                    format!("unknown tag {:#04x}", other),
                ))
            }
        };
        Ok((value, reader.consumed()))
    }
}

impl<C: Codec> VariableSizeCodec for OptionCodec<C> {}
