use std::io::Cursor;

use crate::{
    error::{Error, ErrorKind},
    from_bytes, from_bytes_with_opts, from_reader, nbt,
    test::builder::Builder,
    DeOpts, Decoder, Endian, Tag, Value,
};

/// Decode through both entry points and check they agree.
fn from_all(payload: &[u8]) -> (String, Value) {
    let v_bytes = from_bytes(payload).unwrap();
    let v_read = from_reader(payload).unwrap();
    assert_eq!(v_bytes, v_read);
    v_bytes
}

#[test]
fn error_impls_sync_send() {
    fn i<T: Clone + Send + Sync + std::error::Error>(_: T) {}
    i(Error::invalid_tag(1));
}

#[test]
fn descriptive_error_on_gzip_magic() {
    let r = from_bytes(&[0x1f, 0x8b]);
    let e = r.unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::InvalidTag);
    assert!(e.to_string().to_lowercase().contains("gzip"));
}

#[test]
fn simple_byte() {
    let payload = Builder::new()
        .start_compound("")
        .byte("abc", 123)
        .byte("def", 111)
        .end_compound()
        .build();

    let (name, v) = from_all(&payload);

    assert_eq!(name, "");
    assert_eq!(v, nbt!({"abc": 123i8, "def": 111i8}));
}

#[test]
fn every_scalar_type() {
    let payload = Builder::new()
        .start_compound("object")
        .byte("b", -1)
        .short("s", 256)
        .int("i", 2 << 24)
        .long("l", 4_000_000_000)
        .float("f", 1.23)
        .double("d", 2.34)
        .string("str", "hello")
        .end_compound()
        .build();

    let (name, v) = from_all(&payload);

    assert_eq!(name, "object");
    assert_eq!(
        v,
        nbt!({
            "b": -1i8,
            "s": 256i16,
            "i": 2 << 24,
            "l": 4_000_000_000i64,
            "f": 1.23f32,
            "d": 2.34,
            "str": "hello",
        })
    );
}

#[test]
fn scalar_document_root() {
    let payload = Builder::new().int("count", 7).build();

    let (name, v) = from_all(&payload);

    assert_eq!(name, "count");
    assert_eq!(v, Value::Int(7));
}

#[test]
fn nested_compounds() {
    let payload = Builder::new()
        .start_compound("")
        .start_compound("inner")
        .start_compound("innermost")
        .int("number", 8)
        .end_compound()
        .end_compound()
        .end_compound()
        .build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, nbt!({"inner": {"innermost": {"number": 8}}}));
}

#[test]
fn list_of_ints() {
    let payload = Builder::new()
        .start_list("ints", Tag::Int, 3)
        .int_payload(1)
        .int_payload(2)
        .int_payload(3)
        .build();

    let (name, v) = from_all(&payload);

    assert_eq!(name, "ints");
    assert_eq!(v, nbt!([1, 2, 3]));
}

#[test]
fn list_of_strings() {
    let payload = Builder::new()
        .start_list("strs", Tag::String, 2)
        .string_payload("a")
        .string_payload("bc")
        .build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, nbt!(["a", "bc"]));
}

#[test]
fn list_of_compounds() {
    let payload = Builder::new()
        .start_list("items", Tag::Compound, 2)
        .start_anon_compound()
        .byte("count", 1)
        .end_anon_compound()
        .start_anon_compound()
        .byte("count", 2)
        .end_anon_compound()
        .build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, nbt!([{"count": 1i8}, {"count": 2i8}]));
}

#[test]
fn list_of_lists() {
    let payload = Builder::new()
        .start_list("outer", Tag::List, 2)
        .start_anon_list(Tag::Int, 2)
        .int_payload(1)
        .int_payload(2)
        .start_anon_list(Tag::String, 1)
        .string_payload("x")
        .build();

    let (_, v) = from_all(&payload);

    // Outer elements are all lists. Their own element types may differ.
    assert_eq!(v, nbt!([[1, 2], ["x"]]));
}

#[test]
fn empty_list() {
    let payload = Builder::new().start_list("empty", Tag::End, 0).build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, Value::List(vec![]));
}

#[test]
fn list_of_end_with_nonzero_size_errors() {
    let payload = Builder::new().start_list("l", Tag::End, 3).build();

    let e = from_bytes(&payload).unwrap_err();

    assert_eq!(e.kind(), &ErrorKind::UnexpectedEndTag);
}

#[test]
fn byte_array_keeps_sign() {
    let payload = Builder::new()
        .byte_array("arr", &[-128, -1, 0, 1, 127])
        .build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, Value::ByteArray(vec![-128, -1, 0, 1, 127]));
}

#[test]
fn int_array() {
    let payload = Builder::new()
        .int_array("arr", &[i32::MIN, -1, 0, 1, i32::MAX])
        .build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, Value::IntArray(vec![i32::MIN, -1, 0, 1, i32::MAX]));
}

#[test]
fn invalid_tag_consumes_exactly_one_byte() {
    let mut decoder = Decoder::new(Cursor::new(vec![107u8, 0, 0]));

    let e = decoder.read_named().unwrap_err();

    assert_eq!(e.kind(), &ErrorKind::InvalidTag);
    assert_eq!(decoder.into_inner().position(), 1);
}

#[test]
fn truncated_input_is_eof() {
    let payload = Builder::new()
        .start_compound("")
        .string("a", "hello")
        .end_compound()
        .build();

    for len in 0..payload.len() {
        let e = from_bytes(&payload[..len]).unwrap_err();
        assert!(e.is_eof(), "truncation at {} should be eof: {}", len, e);
    }
}

#[test]
fn name_longer_than_input_is_eof() {
    // Claims an 18 byte name but the input ends first.
    let payload = Builder::new()
        .tag(Tag::Byte)
        .raw_str_len(18)
        .raw_bytes(&[1, 2, 3])
        .build();

    let e = from_bytes(&payload).unwrap_err();

    assert!(e.is_eof());
}

#[test]
fn negative_array_size_errors() {
    let payload = Builder::new()
        .tag(Tag::ByteArray)
        .name("arr")
        .int_payload(-1)
        .build();

    let e = from_bytes(&payload).unwrap_err();

    assert_eq!(e.kind(), &ErrorKind::LengthOutOfRange);
}

#[test]
fn negative_list_size_errors() {
    let payload = Builder::new().start_list("l", Tag::Int, -5).build();

    let e = from_bytes(&payload).unwrap_err();

    assert_eq!(e.kind(), &ErrorKind::LengthOutOfRange);
}

#[test]
fn long_list_invalid_with_option() {
    let payload = Builder::new()
        .start_list("l", Tag::Int, 2)
        .int_payload(1)
        .int_payload(2)
        .build();

    let e = from_bytes_with_opts(&payload, DeOpts::new().max_seq_len(1)).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::LengthOutOfRange);

    // The limit is inclusive.
    assert!(from_bytes_with_opts(&payload, DeOpts::new().max_seq_len(2)).is_ok());
}

#[test]
fn huge_declared_size_with_tiny_input_is_eof() {
    // A few bytes claiming to be an i32::MAX element array must fail with
    // eof, not attempt the allocation up front.
    let payload = Builder::new()
        .tag(Tag::ByteArray)
        .name("arr")
        .int_payload(i32::MAX)
        .raw_bytes(&[1, 2, 3])
        .build();

    let e = from_bytes(&payload).unwrap_err();
    assert!(e.is_eof());

    let payload = Builder::new()
        .start_list("l", Tag::Long, i32::MAX)
        .long_payload(1)
        .build();

    let e = from_bytes(&payload).unwrap_err();
    assert!(e.is_eof());
}

fn nested_compounds_payload(n: usize) -> Vec<u8> {
    let mut b = Builder::new();
    for _ in 0..n {
        b = b.start_compound("");
    }
    for _ in 0..n {
        b = b.end_compound();
    }
    b.build()
}

#[test]
fn depth_limit_with_option() {
    let payload = nested_compounds_payload(4);

    let e = from_bytes_with_opts(&payload, DeOpts::new().max_depth(3)).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::DepthLimit);

    assert!(from_bytes_with_opts(&payload, DeOpts::new().max_depth(4)).is_ok());
}

#[test]
fn depth_limit_default() {
    assert!(from_bytes(&nested_compounds_payload(512)).is_ok());

    let e = from_bytes(&nested_compounds_payload(513)).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::DepthLimit);
}

#[test]
fn depth_limit_applies_to_lists() {
    let mut b = Builder::new().start_list("", Tag::List, 1);
    for _ in 0..4 {
        b = b.start_anon_list(Tag::List, 1);
    }
    b = b.start_anon_list(Tag::End, 0);
    let payload = b.build();

    let e = from_bytes_with_opts(&payload, DeOpts::new().max_depth(3)).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::DepthLimit);
}

#[test]
fn duplicate_keys_keep_last() {
    let payload = Builder::new()
        .start_compound("")
        .int("a", 1)
        .int("a", 2)
        .end_compound()
        .build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, nbt!({"a": 2}));
}

#[test]
fn trailing_bytes_are_left_unread() {
    let payload = Builder::new()
        .int("a", 1)
        .raw_bytes(&[0xde, 0xad, 0xbe, 0xef])
        .build();

    let (name, v) = from_bytes(&payload).unwrap();
    assert_eq!(name, "a");
    assert_eq!(v, Value::Int(1));

    // From a reader the decoder stops after the document, leaving the rest.
    let mut decoder = Decoder::new(Cursor::new(&payload));
    decoder.read_named().unwrap();
    assert_eq!(decoder.into_inner().position(), payload.len() as u64 - 4);
}

#[test]
fn documents_decode_back_to_back() {
    let mut payload = Builder::new().int("first", 1).build();
    payload.extend(Builder::new().string("second", "two").build());

    let mut decoder = Decoder::new(payload.as_slice());

    assert_eq!(
        decoder.read_named().unwrap(),
        ("first".to_string(), Value::Int(1))
    );
    assert_eq!(
        decoder.read_named().unwrap(),
        ("second".to_string(), Value::String("two".to_string()))
    );
}

#[test]
fn little_endian_document() {
    let payload = Builder::new_little_endian()
        .start_compound("ld")
        .short("s", 256)
        .int("i", 70000)
        .long("l", 5_000_000_000)
        .float("f", 1.5)
        .double("d", 0.25)
        .end_compound()
        .build();

    let opts = DeOpts::new().endian(Endian::Little);
    let (name, v) = from_bytes_with_opts(&payload, opts).unwrap();

    assert_eq!(name, "ld");
    assert_eq!(
        v,
        nbt!({
            "s": 256i16,
            "i": 70000,
            "l": 5_000_000_000i64,
            "f": 1.5f32,
            "d": 0.25,
        })
    );
}

#[test]
fn endianness_changes_the_value() {
    let payload = Builder::new().short("s", 1).build();

    let opts = DeOpts::new().endian(Endian::Little);
    let (_, v) = from_bytes_with_opts(&payload, opts).unwrap();

    // 0x0001 read little-endian is 0x0100.
    assert_eq!(v, Value::Short(256));
}

#[test]
fn nonunicode_string_errors() {
    let payload = Builder::new()
        .tag(Tag::String)
        .name("s")
        .raw_str_len(2)
        .raw_bytes(&[0xc3, 0x28])
        .build();

    let e = from_bytes(&payload).unwrap_err();

    assert!(matches!(e.kind(), ErrorKind::Nonunicode(_)));
    assert!(e.to_string().contains("non-unicode"));
}

#[test]
fn unicode_string_value() {
    let payload = Builder::new().string("s", "hello ♫ world").build();

    let (_, v) = from_all(&payload);

    assert_eq!(v, Value::String("hello ♫ world".to_string()));
}

#[test]
fn empty_names_and_strings() {
    let payload = Builder::new().string("", "").build();

    let (name, v) = from_all(&payload);

    assert_eq!(name, "");
    assert_eq!(v, Value::String(String::new()));
}

#[test]
fn end_tag_at_document_root_errors() {
    let e = from_bytes(&[0x00]).unwrap_err();

    assert_eq!(e.kind(), &ErrorKind::UnexpectedEndTag);
    assert!(e.to_string().contains("root"));
}

#[test]
fn empty_input_is_eof() {
    let e = from_bytes(&[]).unwrap_err();
    assert!(e.is_eof());
}
