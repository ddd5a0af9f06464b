//! Whole documents through the encoder and back through the decoder.

use std::io::Cursor;

use crate::{
    from_bytes, from_bytes_with_opts, nbt, raw_from_bytes, raw_to_bytes, test::builder::Builder,
    to_bytes, to_bytes_with_opts, DeOpts, Decoder, Encoder, Endian, SerOpts, Tag, Value,
};

fn assert_roundtrip(name: &str, v: &Value) {
    let bs = to_bytes(name, v).unwrap();
    let (back_name, back) = from_bytes(&bs).unwrap();

    assert_eq!(back_name, name);
    assert_eq!(&back, v);
}

#[test]
fn every_tag_kind() {
    // End is the one tag that is never a value. Every other kind goes over
    // the wire and back unchanged.
    let cases = vec![
        Value::Byte(-5),
        Value::Short(-300),
        Value::Int(123_456),
        Value::Long(-9_000_000_000),
        Value::Float(1.5),
        Value::Double(-0.125),
        Value::ByteArray(vec![i8::MIN, -1, 0, 1, i8::MAX]),
        Value::String("snowy biome ☃".to_string()),
        Value::list(vec![Value::Int(1), Value::Int(2)]).unwrap(),
        nbt!({"nested": {"k": 1}}),
        Value::IntArray(vec![i32::MIN, 0, i32::MAX]),
    ];

    for v in &cases {
        assert_roundtrip("doc", v);
        assert_roundtrip("", v);
    }
}

#[test]
fn mixed_nesting_six_deep() {
    // compound > list > compound > list > list > int array
    let v = nbt!({
        "worlds": [
            {
                "regions": [[[I; 1, 2, 3], [I;]], []],
            },
            {
                "regions": [],
            },
        ],
    });

    assert_roundtrip("root", &v);
}

#[test]
fn compound_with_many_entries() {
    let mut v = nbt!({});
    if let Value::Compound(map) = &mut v {
        for i in 0..1000 {
            map.insert(format!("key{}", i), Value::Int(i));
        }
    }

    assert_roundtrip("", &v);
}

#[test]
fn empty_list_decodes_from_any_declared_element_type() {
    for tag in [Tag::End, Tag::Byte, Tag::Compound, Tag::List] {
        let payload = Builder::new().start_list("e", tag, 0).build();

        let (_, v) = from_bytes(&payload).unwrap();
        assert_eq!(v, Value::List(vec![]));

        // Reencoding uses the end sentinel as the element type, so the bytes
        // only match the original for a declared type of end. The value
        // itself round trips regardless.
        let bs = to_bytes("e", &v).unwrap();
        assert_eq!(bs, Builder::new().start_list("e", Tag::End, 0).build());
    }
}

#[test]
fn little_endian_roundtrip() {
    let v = nbt!({"pos": [1.5f32, -2.5f32], "id": 77, "big": 5_000_000_000i64});

    let bs = to_bytes_with_opts("doc", &v, SerOpts::new().endian(Endian::Little)).unwrap();
    let (name, back) = from_bytes_with_opts(&bs, DeOpts::new().endian(Endian::Little)).unwrap();

    assert_eq!(name, "doc");
    assert_eq!(back, v);
}

#[test]
fn raw_payload_roundtrip() {
    let v = nbt!({"a": [B; 1, 2], "b": "x"});

    let bs = raw_to_bytes(&v).unwrap();
    let back = raw_from_bytes(&bs).unwrap();
    assert_eq!(back, v);

    // The raw form is the named form minus the two byte name length.
    let named = to_bytes("", &v).unwrap();
    assert_eq!(bs.len(), named.len() - 2);
}

#[test]
fn quotes_and_unicode_in_keys_and_strings() {
    let v = nbt!({
        "quote\"key": "back\\slash",
        "☃": "snow",
        "empty": "",
    });

    assert_roundtrip("\"named\"", &v);
}

#[test]
fn documents_stream_back_to_back() {
    let docs = vec![
        ("first".to_string(), nbt!({"a": 1})),
        ("second".to_string(), nbt!([1.5, 2.5])),
        ("third".to_string(), Value::String("end".to_string())),
    ];

    let mut buf = Vec::new();
    let mut encoder = Encoder::new(&mut buf);
    for (name, v) in &docs {
        encoder.write_named(name, v).unwrap();
    }

    let mut decoder = Decoder::new(Cursor::new(buf));
    for doc in &docs {
        assert_eq!(&decoder.read_named().unwrap(), doc);
    }
}

#[test]
fn depth_ceiling_is_symmetric() {
    fn nested_lists(n: usize) -> Value {
        let mut v = Value::List(vec![]);
        for _ in 1..n {
            v = Value::List(vec![v]);
        }
        v
    }

    // A document at the default ceiling encodes and decodes.
    let ok = nested_lists(512);
    let bs = to_bytes("d", &ok).unwrap();
    assert_eq!(from_bytes(&bs).unwrap().1, ok);

    // One level past it fails to encode at all.
    assert!(to_bytes("d", &nested_lists(513)).is_err());
}
