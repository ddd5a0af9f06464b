use core::result;

use serde::Serialize;
use serde_bytes::Bytes;

use super::i8_slice_as_u8;
use crate::Value;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::End => Err(serde::ser::Error::custom(
                "end tag is a marker and cannot be serialized",
            )),
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::ByteArray(v) => Bytes::new(i8_slice_as_u8(v)).serialize(serializer),
            Value::String(v) => serializer.serialize_str(v),
            Value::List(v) => v.serialize(serializer),
            Value::Compound(v) => v.serialize(serializer),
            Value::IntArray(v) => v.serialize(serializer),
        }
    }
}
