use std::collections::BTreeSet;

use chain_codec::codec::{
    array, boolean, bytes, field, i64, option, set, short_u16, string, struct_codec, u16, u32,
    u64, u8, vec, Codec, SizeClass,
};
use proptest::prelude::*;

use _fixtures::{padded, sample_mint, MINT_CODEC};

/// Encodes `value`, checks the size facet, then decodes it behind `pad`
/// filler bytes and checks both the value and the bytes consumed.
fn check_roundtrip<C>(codec: &C, value: &C::Value, pad: usize) -> Result<(), TestCaseError>
where
    C: Codec + ?Sized,
    C::Value: PartialEq + std::fmt::Debug,
{
    let encoded = codec.encode(value).unwrap();
    prop_assert_eq!(codec.encoded_size(value).unwrap(), encoded.len());
    if let SizeClass::Fixed(size) = codec.size_class() {
        prop_assert_eq!(size, encoded.len());
    }
    let framed = padded(pad, &encoded);
    let (decoded, read) = codec.decode(&framed, pad).unwrap();
    prop_assert_eq!(&decoded, value);
    prop_assert_eq!(read, encoded.len());
    Ok(())
}

proptest! {
    #[test]
    fn prop_integers_roundtrip(a in any::<u8>(), b in any::<u16>(), c in any::<u64>(), d in any::<i64>(), pad in 0usize..8) {
        check_roundtrip(&u8(), &a, pad)?;
        check_roundtrip(&u16(), &b, pad)?;
        check_roundtrip(&u64(), &c, pad)?;
        check_roundtrip(&i64(), &d, pad)?;
    }

    #[test]
    fn prop_short_u16_size_agrees(value in any::<u16>(), pad in 0usize..4) {
        check_roundtrip(&short_u16(), &value, pad)?;
    }

    #[test]
    fn prop_blobs_roundtrip(blob in prop::collection::vec(any::<u8>(), 0..64), text in ".{0,24}", pad in 0usize..8) {
        check_roundtrip(&bytes(), &blob, pad)?;
        check_roundtrip(&string(), &text, pad)?;
    }

    #[test]
    fn prop_vectors_roundtrip(
        numbers in prop::collection::vec(any::<u32>(), 0..32),
        words in prop::collection::vec("[a-z]{0,6}", 0..8),
        pad in 0usize..8,
    ) {
        check_roundtrip(&vec(u32()), &numbers, pad)?;
        check_roundtrip(&vec(string()), &words, pad)?;
    }

    #[test]
    fn prop_sets_of_distinct_values_roundtrip(values in prop::collection::btree_set(any::<u64>(), 0..32), pad in 0usize..8) {
        let values: Vec<u64> = values.into_iter().collect();
        check_roundtrip(&set(u64()), &values, pad)?;
    }

    #[test]
    fn prop_set_rejects_any_repeat(values in prop::collection::vec(0u8..4, 5..16)) {
        let distinct: BTreeSet<u8> = values.iter().copied().collect();
        prop_assume!(distinct.len() < values.len());
        prop_assert!(set(u8()).encode(&values).is_err());
        let crafted = vec(u8()).encode(&values).unwrap();
        prop_assert!(set(u8()).decode(&crafted, 0).is_err());
    }

    #[test]
    fn prop_arrays_roundtrip(values in prop::collection::vec(any::<u16>(), 6), labels in prop::collection::vec("[a-z]{0,4}", 3), pad in 0usize..8) {
        check_roundtrip(&array(u16(), 6).unwrap(), &values, pad)?;
        check_roundtrip(&array(string(), 3).unwrap(), &labels, pad)?;
    }

    #[test]
    fn prop_structs_roundtrip(
        id in any::<u64>(),
        flag in any::<bool>(),
        name in "[ -~]{0,16}",
        scores in prop::collection::vec(any::<u32>(), 0..8),
        memo in proptest::option::of(prop::collection::vec(any::<u8>(), 0..8)),
        pad in 0usize..8,
    ) {
        let codec = struct_codec((
            field("id", u64()),
            field("flag", boolean()),
            field("name", string()),
            field("scores", vec(u32())),
            field("memo", option(bytes())),
        ))
        .unwrap();
        check_roundtrip(&codec, &(id, flag, name, scores, memo), pad)?;
    }

    #[test]
    fn prop_mint_roundtrip(supply in any::<u64>(), decimals in any::<u8>(), pad in 0usize..8) {
        let mut mint = sample_mint();
        mint.supply = supply;
        mint.decimals = decimals;
        check_roundtrip(&**MINT_CODEC, &mint, pad)?;
    }

    #[test]
    fn prop_truncated_input_never_panics(data in prop::collection::vec(any::<u8>(), 0..24)) {
        let codec = struct_codec((field("count", u16()), field("items", vec(string())))).unwrap();
        let _ = codec.decode(&data, 0);
        let _ = set(option(u8())).decode(&data, 0);
    }
}
