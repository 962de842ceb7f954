use super::cursor::ByteReader;
use super::error::CodecResult;
use super::{add_size, Codec, FixedSizeCodec, SizeClass};

/// Named field of a struct codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<C> {
    name: &'static str,
    codec: C,
}

/// Pairs a field name with its codec.
pub fn field<C: Codec>(name: &'static str, codec: C) -> Field<C> {
    Field { name, codec }
}

impl<C> Field<C> {
    /// Returns the field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }
}

/// Ordered list of named fields, implemented for tuples of [`Field`].
///
/// The value of a field list is the tuple of its field values in
/// declaration order.
pub trait FieldList {
    /// Tuple of field values.
    type Value;

    /// Field classifications in declaration order.
    fn size_classes(&self) -> Vec<SizeClass>;

    /// Field names in declaration order.
    fn names(&self) -> Vec<&'static str>;

    /// Summed encoded size of every field, computed without encoding.
    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize>;

    /// Appends every field in declaration order.
    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()>;

    /// Decodes every field in declaration order, advancing `reader`.
    fn read(&self, reader: &mut ByteReader<'_>) -> CodecResult<Self::Value>;
}

/// Field lists whose fields are all statically fixed-size.
pub trait FixedFieldList: FieldList {
    /// Summed width of every field.
    fn fixed_size(&self) -> usize;
}

macro_rules! impl_field_list {
    ($($codec:ident : $idx:tt),+) => {
        impl<$($codec),+> FieldList for ($(Field<$codec>,)+)
        where
            $($codec: Codec,)+
        {
            type Value = ($(<$codec as Codec>::Value,)+);

            fn size_classes(&self) -> Vec<SizeClass> {
                vec![$(self.$idx.codec.size_class()),+]
            }

            fn names(&self) -> Vec<&'static str> {
                vec![$(self.$idx.name),+]
            }

            fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize> {
                let mut total = 0usize;
                $(
                    total = add_size(total, self.$idx.codec.encoded_size(&value.$idx)?)?;
                )+
                Ok(total)
            }

            fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()> {
                $(
                    self.$idx.codec.write(&value.$idx, out)?;
                )+
                Ok(())
            }

            fn read(&self, reader: &mut ByteReader<'_>) -> CodecResult<Self::Value> {
                Ok(($(reader.decode_with(&self.$idx.codec)?,)+))
            }
        }

        impl<$($codec),+> FixedFieldList for ($(Field<$codec>,)+)
        where
            $($codec: FixedSizeCodec,)+
        {
            fn fixed_size(&self) -> usize {
                0 $(+ self.$idx.codec.fixed_size())+
            }
        }
    };
}

impl_field_list!(A: 0);
impl_field_list!(A: 0, B: 1);
impl_field_list!(A: 0, B: 1, C: 2);
impl_field_list!(A: 0, B: 1, C: 2, D: 3);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_field_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);

/// Concatenation of named fields in declaration order.
///
/// Fixed-size iff every field is fixed-size, in which case the size is the
/// sum of the field sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructCodec<F> {
    fields: F,
    size_class: SizeClass,
}

/// Creates a struct codec from a tuple of [`field`]s.
///
/// Fails when the summed fixed width overflows `usize`.
pub fn struct_codec<F: FieldList>(fields: F) -> CodecResult<StructCodec<F>> {
    let size_class = SizeClass::concat(fields.size_classes())?;
    Ok(StructCodec { fields, size_class })
}

impl<F: FieldList> StructCodec<F> {
    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.names()
    }

    /// Returns the field list.
    pub fn fields(&self) -> &F {
        &self.fields
    }
}

impl<F: FieldList> Codec for StructCodec<F> {
    type Value = F::Value;

    fn size_class(&self) -> SizeClass {
        self.size_class
    }

    fn encoded_size(&self, value: &Self::Value) -> CodecResult<usize> {
        match self.size_class {
            SizeClass::Fixed(size) => Ok(size),
            SizeClass::Variable => self.fields.encoded_size(value),
        }
    }

    fn write(&self, value: &Self::Value, out: &mut Vec<u8>) -> CodecResult<()> {
        self.fields.write(value, out)
    }

    fn read(&self, bytes: &[u8], offset: usize) -> CodecResult<(Self::Value, usize)> {
        let mut reader = ByteReader::new(bytes, offset)?;
        if let SizeClass::Fixed(size) = self.size_class {
            reader.ensure_remaining(size)?;
        }
        let value = self.fields.read(&mut reader)?;
        Ok((value, reader.consumed()))
    }
}

impl<F: FixedFieldList> FixedSizeCodec for StructCodec<F> {
    fn fixed_size(&self) -> usize {
        self.fields.fixed_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{boolean, string, u32, u8, vec, CodecError, CodecErrorKind};

    #[test]
    fn fields_encode_in_declaration_order() {
        let codec = struct_codec((field("x", u32()), field("y", u32()))).unwrap();
        assert_eq!(codec.size_class(), SizeClass::Fixed(8));
        assert_eq!(codec.field_names(), vec!["x", "y"]);
        let encoded = codec.encode(&(0x1234_5678, 0x9abc_def0)).unwrap();
        assert_eq!(encoded, vec![0x78, 0x56, 0x34, 0x12, 0xf0, 0xde, 0xbc, 0x9a]);
        assert_eq!(
            codec.decode(&encoded, 0).unwrap(),
            ((0x1234_5678, 0x9abc_def0), 8)
        );
    }

    #[test]
    fn variable_field_makes_struct_variable() {
        let codec = struct_codec((
            field("flag", boolean()),
            field("label", string()),
            field("tags", vec(u8())),
        ))
        .unwrap();
        assert_eq!(codec.size_class(), SizeClass::Variable);
        let value = (true, "abc".to_owned(), vec![1, 2]);
        let size = codec.encoded_size(&value).unwrap();
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(size, 1 + 7 + 6);
        assert_eq!(encoded.len(), size);
        assert_eq!(codec.decode(&encoded, 0).unwrap(), (value, size));
    }

    #[test]
    fn field_error_surfaces_unwrapped() {
        let codec = struct_codec((field("a", u32()), field("b", boolean()))).unwrap();
        let err = codec.decode(&[1, 0, 0, 0, 9], 0).expect_err("bad flag");
        assert_eq!(err.kind(), CodecErrorKind::InvalidFormat);
        let err = codec.decode(&[1, 0, 0, 0], 0).expect_err("short");
        assert_eq!(err, CodecError::insufficient_bytes(5, 4, 0));
    }
}
