use core::fmt;
use core::marker::PhantomData;

use super::error::CodecResult;
use super::{Codec, FixedSizeCodec, SizeClass};

/// Adapts a codec to a caller-defined value type.
///
/// Values are converted into the inner codec's domain before encoding and
/// out of it after decoding. Layout and classification are the inner
/// codec's.
pub struct TransformCodec<C, T, Enc, Dec> {
    inner: C,
    into_wire: Enc,
    from_wire: Dec,
    _marker: PhantomData<fn() -> T>,
}

/// Creates a codec for `T` on top of `inner`.
///
/// `into_wire` maps a `T` into the inner value domain; `from_wire` maps a
/// decoded inner value back into a `T`.
pub fn transform<C, T, Enc, Dec>(
    inner: C,
    into_wire: Enc,
    from_wire: Dec,
) -> TransformCodec<C, T, Enc, Dec>
where
    C: Codec,
    Enc: Fn(&T) -> C::Value,
    Dec: Fn(C::Value) -> T,
{
    TransformCodec {
        inner,
        into_wire,
        from_wire,
        _marker: PhantomData,
    }
}

impl<C, T, Enc, Dec> TransformCodec<C, T, Enc, Dec> {
    /// Returns the wrapped codec.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C, T, Enc, Dec> Clone for TransformCodec<C, T, Enc, Dec>
where
    C: Clone,
    Enc: Clone,
    Dec: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            into_wire: self.into_wire.clone(),
            from_wire: self.from_wire.clone(),
            _marker: PhantomData,
        }
    }
}

impl<C: fmt::Debug, T, Enc, Dec> fmt::Debug for TransformCodec<C, T, Enc, Dec> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformCodec")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<C, T, Enc, Dec> Codec for TransformCodec<C, T, Enc, Dec>
where
    C: Codec,
    Enc: Fn(&T) -> C::Value,
    Dec: Fn(C::Value) -> T,
{
    type Value = T;

    fn size_class(&self) -> SizeClass {
        self.inner.size_class()
    }

    fn encoded_size(&self, value: &T) -> CodecResult<usize> {
        match self.inner.size_class() {
            SizeClass::Fixed(size) => Ok(size),
            SizeClass::Variable => self.inner.encoded_size(&(self.into_wire)(value)),
        }
    }

    fn write(&self, value: &T, out: &mut Vec<u8>) -> CodecResult<()> {
        self.inner.write(&(self.into_wire)(value), out)
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(T, usize)> {
        let (wire, read) = self.inner.read(bytes, offset)?;
        Ok(((self.from_wire)(wire), read))
    }
}

impl<C, T, Enc, Dec> FixedSizeCodec for TransformCodec<C, T, Enc, Dec>
where
    C: FixedSizeCodec,
    Enc: Fn(&T) -> C::Value,
    Dec: Fn(C::Value) -> T,
{
    fn fixed_size(&self) -> usize {
        self.inner.fixed_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{field, struct_codec, u16, u8};

    #[derive(Debug, Clone, PartialEq)]
    struct Version {
        major: u8,
        minor: u16,
    }

    #[test]
    fn maps_struct_tuple_onto_named_type() {
        let codec = transform(
            struct_codec((field("major", u8()), field("minor", u16()))).unwrap(),
            |v: &Version| (v.major, v.minor),
            |(major, minor): (u8, u16)| Version { major, minor },
        );
        let value = Version { major: 1, minor: 0x0203 };
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(encoded, vec![1, 0x03, 0x02]);
        assert_eq!(codec.decode(&encoded, 0).unwrap(), (value, 3));
        assert_eq!(codec.fixed_size(), 3);
    }
}
