use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::{Codec, FixedSizeCodec, SizeClass};
use crate::config::PUBLIC_KEY_LENGTH;

const NAME: &str = "address";

/// Base58 text stored on the wire as a fixed number of raw bytes.
///
/// Values are base58 strings; the wire carries the decoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCodec {
    len: usize,
}

/// Creates the codec for base58 account addresses (32 raw bytes).
pub const fn address() -> AddressCodec {
    AddressCodec {
        len: PUBLIC_KEY_LENGTH,
    }
}

impl AddressCodec {
    /// Creates a base58 codec for `len` raw bytes.
    pub const fn with_len(len: usize) -> Self {
        Self { len }
    }

    fn to_raw(&self, value: &str) -> CodecResult<Vec<u8>> {
        let raw = bs58::decode(value)
            .into_vec()
            .map_err(|err| CodecError::invalid_format(NAME, err.to_string()))?;
        if raw.len() != self.len {
            return Err(CodecError::invalid_format(
                NAME,
                format!("expected {} bytes, got {}", self.len, raw.len()),
            ));
        }
        Ok(raw)
    }
}

impl Codec for AddressCodec {
    type Value = String;

    fn size_class(&self) -> SizeClass {
        SizeClass::Fixed(self.len)
    }

    fn encoded_size(&self, value: &String) -> CodecResult<usize> {
        self.to_raw(value)?;
        Ok(self.len)
    }

    fn write(&self, value: &String, out: &mut Vec<u8>) -> CodecResult<()> {
        let raw = self.to_raw(value)?;
        out.extend_from_slice(&raw);
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(String, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        let raw = reader.read_exact(self.len)?;
        Ok((bs58::encode(raw).into_string(), reader.consumed()))
    }
}

impl FixedSizeCodec for AddressCodec {
    fn fixed_size(&self) -> usize {
        self.len
    }
}
