use core::fmt;
use core::ops::Range;
use std::collections::HashSet;

use super::error::{CodecError, CodecResult};
use super::numbers::{u32, U32Codec};
use super::vector::{check_zero_width_count, vec_with_prefix, VecCodec};
use super::{Codec, LengthCodec, SizeClass, VariableSizeCodec};

const NAME: &str = "set";

/// Length-prefixed sequence whose elements must be pairwise distinct.
///
/// Layout is identical to [`VecCodec`]. Two elements are equal when their
/// encodings are byte-for-byte equal, which makes the check total for every
/// value domain (including floats, where `NaN` payloads compare by bits).
/// Uniqueness is checked while encoding and while decoding; a payload with
/// duplicates decodes as a vector but is rejected as a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCodec<C, L = U32Codec> {
    inner: VecCodec<C, L>,
}

/// Creates a set codec with the default `u32` count prefix.
pub fn set<C>(element: C) -> SetCodec<C>
where
    C: Codec,
    C::Value: fmt::Debug,
{
    set_with_prefix(element, u32())
}

/// Creates a set codec with a custom count prefix.
pub fn set_with_prefix<C, L>(element: C, prefix: L) -> SetCodec<C, L>
where
    C: Codec,
    C::Value: fmt::Debug,
    L: LengthCodec,
{
    SetCodec {
        inner: vec_with_prefix(element, prefix),
    }
}

/// Index of the first span whose bytes repeat an earlier span.
fn first_repeat(out: &[u8], spans: &[Range<usize>]) -> Option<usize> {
    let mut seen = HashSet::with_capacity(spans.len());
    spans
        .iter()
        .position(|span| !seen.insert(&out[span.clone()]))
}

impl<C, L> Codec for SetCodec<C, L>
where
    C: Codec,
    C::Value: fmt::Debug,
    L: LengthCodec,
{
    type Value = Vec<C::Value>;

    fn size_class(&self) -> SizeClass {
        SizeClass::Variable
    }

    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize> {
        check_zero_width_count(NAME, self.inner.element().size_class(), value.len())?;
        self.inner.encoded_size(value)
    }

    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()> {
        let element = self.inner.element();
        check_zero_width_count(NAME, element.size_class(), value.len())?;
        self.inner.prefix().write_len(value.len(), out)?;
        let mut spans = Vec::with_capacity(value.len());
        for item in value {
            let start = out.len();
            element.write(item, out)?;
            spans.push(start..out.len());
        }
        if let Some(index) = first_repeat(out, &spans) {
            let duplicate = &value[index];
            tracing::debug!(element = ?duplicate, index, "set encode rejected duplicate");
            return Err(CodecError::duplicate_element(duplicate));
        }
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)> {
        let element = self.inner.element();
        let (mut reader, count) = self.inner.read_prefix(NAME, bytes, offset)?;
        let capacity = count.min(reader.remaining());
        let mut items = Vec::with_capacity(capacity);
        let mut seen = HashSet::with_capacity(capacity);
        for index in 0..count {
            let start = reader.position();
            let item = reader.decode_with(element)?;
            if !seen.insert(&bytes[start..reader.position()]) {
                tracing::debug!(element = ?item, index, offset, "set decode rejected duplicate");
                return Err(CodecError::decoded_duplicate_element(&item));
            }
            items.push(item);
        }
        tracing::trace!(count, consumed = reader.consumed(), "decoded set");
        Ok((items, reader.consumed()))
    }
}

impl<C, L> VariableSizeCodec for SetCodec<C, L>
where
    C: Codec,
    C::Value: fmt::Debug,
    L: LengthCodec,
{
}
