use super::cursor::ByteReader;
use super::error::{CodecError, CodecResult};
use super::{add_size, Codec, FixedSizeCodec, SizeClass};

const NAME: &str = "array";

/// Sequence of exactly `count` elements with no length prefix.
///
/// Fixed-size when the element codec is fixed-size, variable-size otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayCodec<C> {
    element: C,
    count: usize,
    size_class: SizeClass,
}

/// Creates a codec for sequences of exactly `count` elements.
///
/// Fails when the total fixed width overflows `usize`. A count of zero is
/// valid and encodes to no bytes.
pub fn array<C: Codec>(element: C, count: usize) -> CodecResult<ArrayCodec<C>> {
    let size_class = element.size_class().repeat(count)?;
    Ok(ArrayCodec {
        element,
        count,
        size_class,
    })
}

impl<C: Codec> ArrayCodec<C> {
    /// Returns the declared element count.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the element codec.
    pub fn element(&self) -> &C {
        &self.element
    }

    fn check_count(&self, actual: usize) -> CodecResult<()> {
        if actual != self.count {
            return Err(CodecError::length_mismatch(NAME, self.count, actual));
        }
        Ok(())
    }
}

impl<C: Codec> Codec for ArrayCodec<C> {
    type Value = Vec<C::Value>;

    fn size_class(&self) -> SizeClass {
        self.size_class
    }

    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize> {
        self.check_count(value.len())?;
        match self.size_class {
            SizeClass::Fixed(size) => Ok(size),
            SizeClass::Variable => value.iter().try_fold(0usize, |total, item| {
                add_size(total, self.element.encoded_size(item)?)
            }),
        }
    }

    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()> {
        self.check_count(value.len())?;
        for item in value {
            self.element.write(item, out)?;
        }
        Ok(())
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        // total width is only known up front for fixed-size elements
        if let SizeClass::Fixed(size) = self.size_class {
            reader.ensure_remaining(size)?;
        }
        let mut items = Vec::with_capacity(self.count.min(reader.remaining()));
        for _ in 0..self.count {
            items.push(reader.decode_with(&self.element)?);
        }
        tracing::trace!(count = self.count, consumed = reader.consumed(), "decoded array");
        Ok((items, reader.consumed()))
    }
}

impl<C: FixedSizeCodec> FixedSizeCodec for ArrayCodec<C> {
    fn fixed_size(&self) -> usize {
        self.element.fixed_size() * self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{string, u16, u32, CodecErrorKind};

    #[test]
    fn fixed_array_layout() {
        let codec = array(u16(), 3).unwrap();
        assert_eq!(codec.size_class(), SizeClass::Fixed(6));
        assert_eq!(codec.fixed_size(), 6);
        let encoded = codec.encode(&vec![1, 2, 3]).unwrap();
        assert_eq!(encoded, vec![1, 0, 2, 0, 3, 0]);
        assert_eq!(codec.decode(&encoded, 0).unwrap(), (vec![1, 2, 3], 6));
    }

    #[test]
    fn fixed_array_checks_total_up_front() {
        let codec = array(u32(), 2).unwrap();
        let err = codec.decode(&[0u8; 7], 0).expect_err("short");
        assert_eq!(err, CodecError::insufficient_bytes(8, 7, 0));
    }

    #[test]
    fn count_mismatch_fails() {
        let codec = array(u32(), 3).unwrap();
        let err = codec.encode(&vec![1, 2]).expect_err("count");
        assert_eq!(err, CodecError::length_mismatch("array", 3, 2));
    }

    #[test]
    fn variable_elements_decode_sequentially() {
        let codec = array(string(), 2).unwrap();
        assert_eq!(codec.size_class(), SizeClass::Variable);
        let value = vec!["ab".to_owned(), "c".to_owned()];
        assert_eq!(codec.encoded_size(&value).unwrap(), 11);
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(&encoded, 0).unwrap(), (value, 11));
        let err = codec.encoded_size(&vec!["a".to_owned()]).expect_err("count");
        assert_eq!(err.kind(), CodecErrorKind::LengthMismatch);
    }

    #[test]
    fn empty_array_reads_nothing() {
        let codec = array(string(), 0).unwrap();
        assert_eq!(codec.encode(&Vec::new()).unwrap(), Vec::<u8>::new());
        assert_eq!(codec.decode(&[], 0).unwrap(), (Vec::new(), 0));
        assert_eq!(array(u32(), 0).unwrap().size_class(), SizeClass::Fixed(0));
    }
}
