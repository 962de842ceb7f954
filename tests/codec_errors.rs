use chain_codec::codec::{
    address, array, bytes_with_prefix, field, fixed_bytes, option, set, short_u16, string,
    struct_codec, u16, u32, u8, vec, Codec, CodecError, CodecErrorKind,
};
use insta::assert_snapshot;

use _fixtures::{from_hex, MINT_CODEC};

fn message<T>(result: Result<T, CodecError>) -> String {
    match result {
        Ok(_) => panic!("expected an error"),
        Err(err) => err.to_string(),
    }
}

#[test]
fn decode_error_messages() {
    assert_snapshot!(
        message(u32().decode(&[1, 2, 3], 0)),
        @"insufficient bytes: need 4 at offset 0, 3 available"
    );
    assert_snapshot!(
        message(u8().decode(&[1], 4)),
        @"invalid offset 4 for buffer of 1 bytes"
    );
    assert_snapshot!(
        message(option(u8()).decode(&[9], 0)),
        @"invalid option: unknown tag 0x09"
    );
    assert_snapshot!(
        message(string().decode(&from_hex("02000000 c328"), 0)),
        @"invalid string: invalid utf-8 sequence of 1 bytes from index 0"
    );
    assert_snapshot!(
        message(u16().decode_all(&[1, 2, 3])),
        @"trailing bytes: consumed 2, 1 remaining"
    );
}

#[test]
fn encode_error_messages() {
    assert_snapshot!(
        message(u8().encode_wide(256)),
        @"u8 value 256 out of range [0, 255]"
    );
    assert_snapshot!(
        message(array(u32(), 2).unwrap().encode(&vec![1, 2, 3])),
        @"array expected 2 elements, got 3"
    );
    assert_snapshot!(
        message(set(string()).encode(&vec!["a".to_owned(), "a".to_owned()])),
        @r###"set contains duplicate element "a""###
    );
    assert_snapshot!(
        message(fixed_bytes(4).encode(&vec![1, 2])),
        @"invalid fixed bytes: expected 4 bytes, got 2"
    );
}

#[test]
fn construction_errors_are_invalid_config() {
    let err = array(fixed_bytes(usize::MAX), 2).expect_err("overflow");
    assert_eq!(err.kind(), CodecErrorKind::InvalidConfig);
    let err = struct_codec((
        field("a", fixed_bytes(usize::MAX)),
        field("b", fixed_bytes(1)),
    ))
    .expect_err("overflow");
    assert_eq!(err.kind(), CodecErrorKind::InvalidConfig);
}

#[test]
fn invalid_address_text_is_rejected() {
    let err = address().encode(&"0OIl".to_owned()).expect_err("not base58");
    assert_eq!(err.kind(), CodecErrorKind::InvalidFormat);
    let err = address().encode(&"2".to_owned()).expect_err("one byte");
    assert_eq!(err.kind(), CodecErrorKind::InvalidFormat);
}

#[test]
fn short_u16_rejects_non_canonical_bytes() {
    let codec = bytes_with_prefix(short_u16());
    let err = codec.decode(&[0x80, 0x00], 0).expect_err("padded zero");
    assert_eq!(err.kind(), CodecErrorKind::InvalidFormat);
    let err = short_u16().decode(&[0xff, 0xff, 0x04], 0).expect_err("overflow");
    assert_eq!(err.kind(), CodecErrorKind::InvalidFormat);
}

#[test]
fn mint_decode_reports_exact_shortfall() {
    let err = MINT_CODEC.decode(&[0u8; 81], 0).expect_err("short");
    assert_eq!(err, CodecError::insufficient_bytes(82, 81, 0));

    let mut data = vec![0u8; 82];
    data[45] = 3;
    let err = MINT_CODEC.decode_all(&data).expect_err("bad flag");
    assert_eq!(
        err,
        CodecError::invalid_format("bool", "byte 0x03 is not 0 or 1")
    );
}

#[test]
fn nested_errors_travel_unchanged() {
    let inner = vec(set(u8()));
    let data = from_hex("01000000 02000000 0505");
    let direct = set(u8()).decode(&data, 4).expect_err("duplicate");
    let nested = inner.decode(&data, 0).expect_err("duplicate");
    assert_eq!(direct, nested);
    assert_eq!(nested, CodecError::decoded_duplicate_element(5u8));
}

#[test]
fn errors_serialize_as_json() {
    let err = CodecError::out_of_range("u16", 70_000, 0, 65_535);
    let json = serde_json::to_string(&err).unwrap();
    assert_snapshot!(
        json,
        @r###"{"OutOfRange":{"codec":"u16","value":"70000","min":"0","max":"65535"}}"###
    );
    let back: CodecError = serde_json::from_str(&json).unwrap();
    assert_eq!(back, err);
    assert_eq!(
        serde_json::to_string(&back.kind()).unwrap(),
        "\"OutOfRange\""
    );
}
