//! Codec composition engine.
//!
//! Every codec exposes the same three facets: `encode`, `decode` and a size
//! facet described by [`SizeClass`]. Primitives (integers, booleans, byte
//! blobs, strings, base58 addresses) sit at the leaves; the array, vector,
//! set, option and struct combinators compose them into arbitrarily nested
//! layouts. All numeric layouts are little-endian.
//!
//! A codec is classified once, when it is constructed, as either fixed-size
//! (a constant byte length) or variable-size (a length that depends on the
//! value). Combinators read the classification of their children to pick
//! their own layout strategy and classification.

mod array;
mod base58;
mod boolean;
mod bytes;
mod cursor;
mod error;
mod numbers;
mod option;
mod set;
mod short_u16;
mod structs;
mod transform;
mod vector;

pub use array::{array, ArrayCodec};
pub use base58::{address, AddressCodec};
pub use boolean::{boolean, BoolCodec};
pub use bytes::{
    bytes, bytes_with_prefix, fixed_bytes, public_key, string, string_with_prefix, BytesCodec,
    FixedBytesCodec, StringCodec,
};
pub use cursor::{ensure_consumed, ByteReader};
pub use error::{CodecError, CodecErrorKind, CodecResult};
pub use numbers::{
    f32, f64, i128, i16, i32, i64, i8, u128, u16, u32, u64, u8, LeInt, LeNumber, NumberCodec,
    U32Codec,
};
pub use option::{option, OptionCodec};
pub use set::{set, set_with_prefix, SetCodec};
pub use short_u16::{short_u16, ShortU16Codec};
pub use structs::{field, struct_codec, Field, FieldList, FixedFieldList, StructCodec};
pub use transform::{transform, TransformCodec};
pub use vector::{vec, vec_with_prefix, VecCodec};

use serde::{Deserialize, Serialize};

/// Size classification of a codec, decided when the codec is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    /// Every value encodes to exactly this many bytes.
    Fixed(usize),
    /// The encoded length depends on the value.
    Variable,
}

impl SizeClass {
    /// Returns the constant size for fixed-size codecs.
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            SizeClass::Fixed(size) => Some(size),
            SizeClass::Variable => None,
        }
    }

    /// Returns `true` for fixed-size codecs.
    pub fn is_fixed(self) -> bool {
        matches!(self, SizeClass::Fixed(_))
    }

    /// Classification of `count` consecutive values of this class.
    pub fn repeat(self, count: usize) -> CodecResult<SizeClass> {
        match self {
            SizeClass::Fixed(size) => size.checked_mul(count).map(SizeClass::Fixed).ok_or_else(|| {
                CodecError::invalid_config(format!(
                    "{} elements of {} bytes overflow usize",
                    count, size
                ))
            }),
            SizeClass::Variable => Ok(SizeClass::Variable),
        }
    }

    /// Classification of a concatenation: fixed iff every part is fixed.
    pub fn concat<I>(classes: I) -> CodecResult<SizeClass>
    where
        I: IntoIterator<Item = SizeClass>,
    {
        let mut total = 0usize;
        for class in classes {
            match class {
                SizeClass::Fixed(size) => {
                    total = total.checked_add(size).ok_or_else(|| {
                        CodecError::invalid_config("summed field sizes overflow usize")
                    })?;
                }
                SizeClass::Variable => return Ok(SizeClass::Variable),
            }
        }
        Ok(SizeClass::Fixed(total))
    }
}

/// A composable binary codec for one value shape.
///
/// Implementors provide [`Codec::size_class`], [`Codec::encoded_size`],
/// [`Codec::write`] and [`Codec::read`]. Callers normally use the provided
/// [`Codec::encode`] and [`Codec::decode`] entry points.
pub trait Codec {
    /// Value domain of the codec.
    type Value;

    /// Returns the classification fixed at construction time.
    fn size_class(&self) -> SizeClass;

    /// Returns the exact number of bytes `value` encodes to, without encoding it.
    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize>;

    /// Appends the encoding of `value` to `out`.
    ///
    /// On failure `out` may hold a partial encoding; use [`Codec::encode`] or
    /// [`Codec::encode_into`] for all-or-nothing writes.
    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()>;

    /// Decodes one value starting at `offset`, returning it together with the
    /// number of bytes consumed from `offset`.
    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)>;

    /// Encodes `value` into a buffer sized up front by [`Codec::encoded_size`].
    fn encode(&self, value: &Self::Value) -> CodecResult<Vec<u8>> {
        let size = self.encoded_size(value)?;
        let mut out = Vec::with_capacity(size);
        self.write(value, &mut out)?;
        if out.len() != size {
            tracing::error!(
                reported = size,
                written = out.len(),
                "codec wrote a different length than it reported"
            );
            return Err(CodecError::encode(format!(
                "wrote {} bytes, reported size {}",
                out.len(),
                size
            )));
        }
        Ok(out)
    }

    /// Appends the encoding of `value` to `out`, returning the number of bytes
    /// written. On failure `out` is restored to its original length.
    fn encode_into(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<usize> {
        let start = out.len();
        match self.write(value, out) {
            Ok(()) => Ok(out.len() - start),
            Err(err) => {
                out.truncate(start);
                Err(err)
            }
        }
    }

    /// Decodes one value at `offset`, returning it with the bytes consumed.
    fn decode(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)> {
        if offset > bytes.len() {
            return Err(CodecError::invalid_offset(offset, bytes.len()));
        }
        self.read(bytes, offset)
    }

    /// Decodes a value that must span the whole buffer.
    fn decode_all(&self, bytes: &[u8]) -> CodecResult<Self::Value> {
        let (value, consumed) = self.decode(bytes, 0)?;
        ensure_consumed(bytes, consumed)?;
        Ok(value)
    }
}

impl<C> Codec for &C
where
    C: Codec + ?Sized,
{
    type Value = C::Value;

    fn size_class(&self) -> SizeClass {
        (**self).size_class()
    }

    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize> {
        (**self).encoded_size(value)
    }

    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()> {
        (**self).write(value, out)
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)> {
        (**self).read(bytes, offset)
    }
}

/// Codecs whose encoded length is a construction-time constant.
pub trait FixedSizeCodec: Codec {
    /// Returns the constant encoded length.
    fn fixed_size(&self) -> usize;
}

impl<C> FixedSizeCodec for &C
where
    C: FixedSizeCodec + ?Sized,
{
    fn fixed_size(&self) -> usize {
        (**self).fixed_size()
    }
}

/// Codecs whose encoded length always depends on the value.
pub trait VariableSizeCodec: Codec {}

impl<C> VariableSizeCodec for &C where C: VariableSizeCodec + ?Sized {}

/// Returns `true` if `codec` encodes every value to the same length.
pub fn is_fixed_size<C>(codec: &C) -> bool
where
    C: Codec + ?Sized,
{
    codec.size_class().is_fixed()
}

/// Returns `true` if the encoded length of `codec` depends on the value.
pub fn is_variable_size<C>(codec: &C) -> bool
where
    C: Codec + ?Sized,
{
    !is_fixed_size(codec)
}

/// Codecs usable as the element-count prefix of vectors, sets and blobs.
pub trait LengthCodec: Codec {
    /// Returns the encoded width of the prefix for `len`.
    fn len_size(&self, len: usize) -> CodecResult<usize>;

    /// Appends the prefix for `len`.
    fn write_len(&self, len: usize, out: &mut Vec<u8>) -> CodecResult<()>;

    /// Decodes a prefix at `offset`, returning the count and the prefix width.
    fn read_len(&self, bytes: &[u8], offset: usize) -> CodecResult<(usize, usize)>;
}

impl<C> LengthCodec for &C
where
    C: LengthCodec + ?Sized,
{
    fn len_size(&self, len: usize) -> CodecResult<usize> {
        (**self).len_size(len)
    }

    fn write_len(&self, len: usize, out: &mut Vec<u8>) -> CodecResult<()> {
        (**self).write_len(len, out)
    }

    fn read_len(&self, bytes: &[u8], offset: usize) -> CodecResult<(usize, usize)> {
        (**self).read_len(bytes, offset)
    }
}

pub(crate) fn add_size(total: usize, size: usize) -> CodecResult<usize> {
    total
        .checked_add(size)
        .ok_or_else(|| CodecError::encode("encoded size overflows usize"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_is_fixed_only_when_all_parts_are() {
        let fixed = SizeClass::concat([SizeClass::Fixed(4), SizeClass::Fixed(8)]).unwrap();
        assert_eq!(fixed, SizeClass::Fixed(12));
        let mixed = SizeClass::concat([SizeClass::Fixed(4), SizeClass::Variable]).unwrap();
        assert_eq!(mixed, SizeClass::Variable);
        assert_eq!(SizeClass::concat([]).unwrap(), SizeClass::Fixed(0));
    }

    #[test]
    fn repeat_rejects_overflow() {
        assert_eq!(SizeClass::Fixed(4).repeat(3).unwrap(), SizeClass::Fixed(12));
        assert_eq!(SizeClass::Variable.repeat(3).unwrap(), SizeClass::Variable);
        let err = SizeClass::Fixed(usize::MAX).repeat(2).expect_err("overflow");
        assert_eq!(err.kind(), CodecErrorKind::InvalidConfig);
    }

    #[test]
    fn encode_into_restores_buffer_on_failure() {
        let codec = array(u8(), 2).unwrap();
        let mut out = vec![0xaa];
        let err = codec.encode_into(&vec![1, 2, 3], &mut out).expect_err("count");
        assert_eq!(err.kind(), CodecErrorKind::LengthMismatch);
        assert_eq!(out, vec![0xaa]);

        let codec = vec(string());
        let mut out = vec![0xbb];
        let written = codec
            .encode_into(&vec!["a".to_owned()], &mut out)
            .expect("encode");
        assert_eq!(written, 9);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn predicates_follow_classification() {
        assert!(is_fixed_size(&u64()));
        assert!(is_variable_size(&bytes()));
        assert!(is_fixed_size(&array(u16(), 4).unwrap()));
        assert!(is_variable_size(&array(string(), 4).unwrap()));
        assert!(is_variable_size(&vec(u8())));
    }

    #[test]
    fn decode_all_rejects_trailing_bytes() {
        let err = u16().decode_all(&[1, 0, 7]).expect_err("trailing");
        assert_eq!(err, CodecError::trailing_bytes(2, 1));
        assert_eq!(u16().decode_all(&[1, 0]).unwrap(), 1);
    }
}
