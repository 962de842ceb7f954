use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::numbers::{u32, U32Codec};
use super::{add_size, Codec, LengthCodec, SizeClass, VariableSizeCodec};
use crate::config::MAX_ZERO_WIDTH_ELEMENTS;

const NAME: &str = "vec";

/// Length-prefixed sequence of elements.
///
/// The element count is written with the prefix codec, followed by every
/// element in iteration order. Always variable-size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VecCodec<C, L = U32Codec> {
    element: C,
    prefix: L,
}

/// Creates a vector codec with the default `u32` count prefix.
pub fn vec<C: Codec>(element: C) -> VecCodec<C> {
    vec_with_prefix(element, u32())
}

/// Creates a vector codec with a custom count prefix.
pub fn vec_with_prefix<C: Codec, L: LengthCodec>(element: C, prefix: L) -> VecCodec<C, L> {
    VecCodec { element, prefix }
}

impl<C: Codec, L: LengthCodec> VecCodec<C, L> {
    /// Returns the element codec.
    pub fn element(&self) -> &C {
        &self.element
    }

    /// Returns the count prefix codec.
    pub fn prefix(&self) -> &L {
        &self.prefix
    }

    /// Reads the count prefix and checks the count against the payload,
    /// returning a cursor positioned at the first element.
    pub(crate) fn read_prefix<'a>(
        &self,
        name: &str,
        bytes: &'a [u8],
        offset: usize,
    ) -> CodecResult<(ByteReader<'a>, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        let (count, prefix_len) = self.prefix.read_len(bytes, offset)?;
        reader.read_exact(prefix_len)?;
        match self.element.size_class() {
            SizeClass::Fixed(0) => check_zero_width_count(name, SizeClass::Fixed(0), count)?,
            SizeClass::Fixed(size) => reader.ensure_remaining(size.saturating_mul(count))?,
            SizeClass::Variable => {}
        }
        Ok((reader, count))
    }
}

/// Zero-width elements consume no bytes, so the payload cannot bound their
/// count. Both directions cap it at [`MAX_ZERO_WIDTH_ELEMENTS`].
pub(crate) fn check_zero_width_count(
    name: &str,
    element: SizeClass,
    count: usize,
) -> CodecResult<()> {
    if element == SizeClass::Fixed(0) && count > MAX_ZERO_WIDTH_ELEMENTS {
        return Err(CodecError::out_of_range(
            name,
            count,
            0,
            MAX_ZERO_WIDTH_ELEMENTS,
        ));
    }
    Ok(())
}

impl<C: Codec, L: LengthCodec> Codec for VecCodec<C, L> {
    type Value = Vec<C::Value>;

    fn size_class(&self) -> SizeClass {
        SizeClass::Variable
    }

    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize> {
        check_zero_width_count(NAME, self.element.size_class(), value.len())?;
        let prefix = self.prefix.len_size(value.len())?;
        let elements = match self.element.size_class() {
            SizeClass::Fixed(size) => size
                .checked_mul(value.len())
                .ok_or_else(|| CodecError::encode("encoded size overflows usize"))?,
            SizeClass::Variable => value.iter().try_fold(0usize, |total, item| {
                add_size(total, self.element.encoded_size(item)?)
            })?,
        };
        add_size(prefix, elements)
    }

    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()> {
        check_zero_width_count(NAME, self.element.size_class(), value.len())?;
        self.prefix.write_len(value.len(), out)?;
        for item in value {
            self.element.write(item, out)?;
        }
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)> {
        let (mut reader, count) = self.read_prefix(NAME, bytes, offset)?;
        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        for _ in 0..count {
            items.push(reader.decode_with(&self.element)?);
        }
        tracing::trace!(count, consumed = reader.consumed(), "decoded vector");
        Ok((items, reader.consumed()))
    }
}

impl<C: Codec, L: LengthCodec> VariableSizeCodec for VecCodec<C, L> {}
