use core::fmt;
use core::marker::PhantomData;

use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::{Codec, FixedSizeCodec, LengthCodec, SizeClass};

/// Numeric types with a fixed little-endian layout.
pub trait LeNumber: Copy + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Encoded width in bytes.
    const WIDTH: usize;
    /// Name used in error reports.
    const NAME: &'static str;

    /// Appends the little-endian bytes of `self`.
    fn write_le(self, out: &mut Vec<u8>);

    /// Reads a value from exactly [`LeNumber::WIDTH`] little-endian bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

/// Integer types with an explicit `[MIN, MAX]` domain.
pub trait LeInt: LeNumber + TryFrom<i128> + TryFrom<usize> + TryInto<usize> {
    /// Smallest representable value.
    const MIN: Self;
    /// Largest representable value.
    const MAX: Self;
}

macro_rules! impl_le_number {
    ($($ty:ident => $width:expr),+ $(,)?) => {
        $(
            impl LeNumber for $ty {
                const WIDTH: usize = $width;
                const NAME: &'static str = stringify!($ty);

                fn write_le(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }

                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; $width];
                    raw.copy_from_slice(&bytes[..$width]);
                    $ty::from_le_bytes(raw)
                }
            }
        )+
    };
}

macro_rules! impl_le_int {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl LeInt for $ty {
                const MIN: Self = $ty::MIN;
                const MAX: Self = $ty::MAX;
            }
        )+
    };
}

impl_le_number!(
    u8 => 1, u16 => 2, u32 => 4, u64 => 8, u128 => 16,
    i8 => 1, i16 => 2, i32 => 4, i64 => 8, i128 => 16,
    f32 => 4, f64 => 8,
);

impl_le_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

/// Fixed-width little-endian numeric codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Default length-prefix codec.
pub type U32Codec = NumberCodec<::core::primitive::u32>;

impl<T: LeNumber> NumberCodec<T> {
    /// Creates the codec.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: LeNumber> Default for NumberCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LeInt> NumberCodec<T> {
    /// Encodes an integer supplied in a wider domain, rejecting values
    /// outside `[T::MIN, T::MAX]`.
    pub fn encode_wide(&self, value: i128) -> CodecResult<Vec<u8>> {
        let narrowed = T::try_from(value)
            .map_err(|_| CodecError::out_of_range(T::NAME, value, T::MIN, T::MAX))?;
        self.encode(&narrowed)
    }
}

impl<T: LeNumber> Codec for NumberCodec<T> {
    type Value = T;

    fn size_class(&self) -> SizeClass {
        SizeClass::Fixed(T::WIDTH)
    }

    fn encoded_size(&self, _value: &T) -> CodecResult<usize> {
        Ok(T::WIDTH)
    }

    fn write(&self, value: &T, out: &mut Vec<u8>) -> CodecResult<()> {
        value.write_le(out);
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(T, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        let raw = reader.read_exact(T::WIDTH)?;
        Ok((T::read_le(raw), reader.consumed()))
    }
}

impl<T: LeNumber> FixedSizeCodec for NumberCodec<T> {
    fn fixed_size(&self) -> usize {
        T::WIDTH
    }
}

impl<T: LeInt> LengthCodec for NumberCodec<T> {
    fn len_size(&self, len: usize) -> CodecResult<usize> {
        narrow_len::<T>(len)?;
        Ok(T::WIDTH)
    }

    fn write_len(&self, len: usize, out: &mut Vec<u8>) -> CodecResult<()> {
        let prefix = narrow_len::<T>(len)?;
        self.write(&prefix, out)
    }

    fn read_len(&self, bytes: &[u8], offset: usize) -> CodecResult<(usize, usize)> {
        let (prefix, read) = self.decode(bytes, offset)?;
        let len = prefix
            .try_into()
            .map_err(|_| CodecError::out_of_range(T::NAME, prefix, 0, usize::MAX))?;
        Ok((len, read))
    }
}

fn narrow_len<T: LeInt>(len: usize) -> CodecResult<T> {
    T::try_from(len).map_err(|_| CodecError::out_of_range(T::NAME, len, T::MIN, T::MAX))
}

macro_rules! number_constructors {
    ($($name:ident => $ty:ident, $doc:literal;)+) => {
        $(
            #[doc = $doc]
            pub const fn $name() -> NumberCodec<::core::primitive::$ty> {
                NumberCodec::new()
            }
        )+
    };
}

number_constructors! {
    u8 => u8, "Unsigned 8-bit integer codec.";
    u16 => u16, "Unsigned 16-bit little-endian integer codec.";
    u32 => u32, "Unsigned 32-bit little-endian integer codec.";
    u64 => u64, "Unsigned 64-bit little-endian integer codec.";
    u128 => u128, "Unsigned 128-bit little-endian integer codec.";
    i8 => i8, "Signed 8-bit integer codec.";
    i16 => i16, "Signed 16-bit little-endian integer codec.";
    i32 => i32, "Signed 32-bit little-endian integer codec.";
    i64 => i64, "Signed 64-bit little-endian integer codec.";
    i128 => i128, "Signed 128-bit little-endian integer codec.";
    f32 => f32, "32-bit little-endian IEEE-754 float codec.";
    f64 => f64, "64-bit little-endian IEEE-754 float codec.";
}
