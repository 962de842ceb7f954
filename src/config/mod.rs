//! Wire constants and runtime-selectable length prefixes.
//!
//! Codecs are configured when they are constructed and never afterwards.
//! This module holds the constants shared by the primitives and the
//! [`LengthPrefix`] selector, which lets a count prefix be chosen from data
//! (for example a schema description) instead of at compile time.

use serde::{Deserialize, Serialize};

use crate::codec::{short_u16, u16, u32, u64, u8, Codec, CodecResult, LengthCodec, SizeClass};

/// Length in bytes of a public key or account address.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Maximum number of bytes in a compact `u16` encoding.
pub const SHORT_U16_MAX_BYTES: usize = 3;

/// Option tag marking an absent value.
pub const OPTION_NONE_TAG: u8 = 0;

/// Option tag marking a present value.
pub const OPTION_SOME_TAG: u8 = 1;

/// Largest element count accepted for sequences of zero-width elements.
pub const MAX_ZERO_WIDTH_ELEMENTS: usize = 1 << 16;

/// Runtime selector for the count prefix of a sequence or blob.
///
/// The default, `U32`, matches the prefix of [`crate::codec::vec`],
/// [`crate::codec::set`], [`crate::codec::bytes`] and [`crate::codec::string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPrefix {
    /// One byte.
    U8,
    /// Two bytes, little-endian.
    U16,
    /// Four bytes, little-endian.
    #[default]
    U32,
    /// Eight bytes, little-endian.
    U64,
    /// Compact `u16`, one to three bytes.
    ShortU16,
}

impl Codec for LengthPrefix {
    type Value = usize;

    fn size_class(&self) -> SizeClass {
        match self {
            LengthPrefix::U8 => u8().size_class(),
            LengthPrefix::U16 => u16().size_class(),
            LengthPrefix::U32 => u32().size_class(),
            LengthPrefix::U64 => u64().size_class(),
            LengthPrefix::ShortU16 => short_u16().size_class(),
        }
    }

    fn encoded_size(&self, value: &usize) -> CodecResult<usize> {
        self.len_size(*value)
    }

    fn write(&self, value: &usize, out: &mut Vec<u8>) -> CodecResult<()> {
        self.write_len(*value, out)
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(usize, usize)> {
        self.read_len(bytes, offset)
    }
}

impl LengthCodec for LengthPrefix {
    fn len_size(&self, len: usize) -> CodecResult<usize> {
        match self {
            LengthPrefix::U8 => u8().len_size(len),
            LengthPrefix::U16 => u16().len_size(len),
            LengthPrefix::U32 => u32().len_size(len),
            LengthPrefix::U64 => u64().len_size(len),
            LengthPrefix::ShortU16 => short_u16().len_size(len),
        }
    }

    fn write_len(&self, len: usize, out: &mut Vec<u8>) -> CodecResult<()> {
        match self {
            LengthPrefix::U8 => u8().write_len(len, out),
            LengthPrefix::U16 => u16().write_len(len, out),
            LengthPrefix::U32 => u32().write_len(len, out),
            LengthPrefix::U64 => u64().write_len(len, out),
            LengthPrefix::ShortU16 => short_u16().write_len(len, out),
        }
    }

    fn read_len(&self, bytes: &[u8], offset: usize) -> CodecResult<(usize, usize)> {
        match self {
            LengthPrefix::U8 => u8().read_len(bytes, offset),
            LengthPrefix::U16 => u16().read_len(bytes, offset),
            LengthPrefix::U32 => u32().read_len(bytes, offset),
            LengthPrefix::U64 => u64().read_len(bytes, offset),
            LengthPrefix::ShortU16 => short_u16().read_len(bytes, offset),
        }
    }
}
