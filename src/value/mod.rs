mod de;
mod ser;

use crate::error::{Error, Result};
use crate::Tag;

/// The map type used for compound values.
///
/// An ordinary [`HashMap`][`std::collections::HashMap`] by default. With the
/// `preserve-order` feature it becomes an
/// [`IndexMap`](https://docs.rs/indexmap), which keeps entries in insertion
/// order.
#[cfg(not(feature = "preserve-order"))]
pub type Compound = std::collections::HashMap<String, Value>;

/// The map type used for compound values.
///
/// An ordinary [`HashMap`][`std::collections::HashMap`] by default. With the
/// `preserve-order` feature it becomes an
/// [`IndexMap`](https://docs.rs/indexmap), which keeps entries in insertion
/// order.
#[cfg(feature = "preserve-order")]
pub type Compound = indexmap::IndexMap<String, Value>;

/// Value is a complete NBT value. It owns its data. Compounds and lists
/// recursively own their members, so a value is always a tree.
///
/// There is one variant per tag in the registry, including [`End`]. End is a
/// marker, not data: it terminates compounds on the wire and stands in for
/// the element type of an empty list. It never appears named, at the document
/// root, or as a list member, and the encoder rejects attempts to write one.
///
/// ```
/// use nbtree::{nbt, Value};
///
/// let chest = nbt!({
///     "id": "chest",
///     "slots": [27],
/// });
/// assert_eq!(chest.get("id").and_then(Value::as_str), Some("chest"));
/// ```
///
/// [`End`]: Value::End
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Value>),
    Compound(Compound),
    IntArray(Vec<i32>),
}

impl Value {
    /// The registry tag for this value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::End => Tag::End,
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
        }
    }

    /// Make a list value, checking up front that the members are all of one
    /// type and that none of them is an end tag. The plain
    /// [`List`][`Value::List`] variant performs no such check; anything
    /// invalid built through it surfaces as an error at encode time instead.
    ///
    /// ```
    /// use nbtree::Value;
    ///
    /// let ok = Value::list(vec![Value::Int(1), Value::Int(2)]);
    /// assert!(ok.is_ok());
    ///
    /// let mixed = Value::list(vec![Value::Int(1), Value::Byte(2)]);
    /// assert!(mixed.is_err());
    /// ```
    pub fn list(values: Vec<Value>) -> Result<Value> {
        list_element_tag(&values)?;
        Ok(Value::List(values))
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            Value::Float(v) => Some(v as i64),
            Value::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Byte(v) => Some(v as u64),
            Value::Short(v) => Some(v as u64),
            Value::Int(v) => Some(v as u64),
            Value::Long(v) => Some(v as u64),
            Value::Float(v) => Some(v as u64),
            Value::Double(v) => Some(v as u64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(v) => Some(v as f64),
            Value::Short(v) => Some(v as f64),
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Get a reference to the value under `key`, if this value is a compound
    /// holding that key. Composes with the `as_*` accessors:
    /// `v.get("Score").and_then(Value::as_i64)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Compound(map) => map.get(key),
            _ => None,
        }
    }

    /// Mutable version of [`get`][`Value::get`].
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Compound(map) => map.get_mut(key),
            _ => None,
        }
    }
}

/// The element tag a list of these values encodes with: the common tag of
/// the members, or end for an empty list. Errors if the members mix types or
/// contain an end tag.
pub(crate) fn list_element_tag(values: &[Value]) -> Result<Tag> {
    let mut tags = values.iter().map(Value::tag);
    let first = match tags.next() {
        Some(t) => t,
        None => return Ok(Tag::End),
    };
    if first == Tag::End {
        return Err(Error::end_value());
    }
    for t in tags {
        if t != first {
            return Err(Error::heterogeneous_list(first, t));
        }
    }
    Ok(first)
}

// Safe to treat [i8] as [u8].
pub(crate) fn i8_slice_as_u8(data: &[i8]) -> &[u8] {
    unsafe { &*(data as *const [i8] as *const [u8]) }
}

// A Vec<u8> can adopt a Vec<i8>'s allocation in place: same size, same
// alignment. Avoids copying byte array payloads element by element.
pub(crate) fn vec_u8_into_i8(v: Vec<u8>) -> Vec<i8> {
    let mut v = std::mem::ManuallyDrop::new(v);
    let p = v.as_mut_ptr();
    let len = v.len();
    let cap = v.capacity();
    unsafe { Vec::from_raw_parts(p as *mut i8, len, cap) }
}

#[cfg(feature = "arbitrary1")]
fn het_list<'a, T, F>(u: &mut arbitrary::Unstructured<'a>, f: F) -> arbitrary::Result<Vec<Value>>
where
    F: FnMut(T) -> Value,
    T: arbitrary::Arbitrary<'a>,
{
    Ok(u.arbitrary_iter::<T>()?
        .collect::<arbitrary::Result<Vec<_>>>()?
        .into_iter()
        .map(f)
        .collect())
}

#[cfg(feature = "arbitrary1")]
fn arb_compound(u: &mut arbitrary::Unstructured) -> arbitrary::Result<Compound> {
    Ok(u.arbitrary_iter::<(String, Value)>()?
        .collect::<arbitrary::Result<Vec<_>>>()?
        .into_iter()
        .collect())
}

#[cfg(feature = "arbitrary1")]
fn arb_list(u: &mut arbitrary::Unstructured) -> arbitrary::Result<Vec<Value>> {
    use Value::*;

    Ok(match u.arbitrary::<Tag>()? {
        Tag::End => return Err(arbitrary::Error::IncorrectFormat),
        Tag::Byte => het_list(u, Byte)?,
        Tag::Short => het_list(u, Short)?,
        Tag::Int => het_list(u, Int)?,
        Tag::Long => het_list(u, Long)?,
        Tag::Float => het_list(u, Float)?,
        Tag::Double => het_list(u, Double)?,
        Tag::ByteArray => het_list(u, ByteArray)?,
        Tag::String => het_list(u, String)?,
        Tag::List => {
            // a list of lists
            let len = u.arbitrary_len::<Value>()?;
            let mut v = vec![];
            for _ in 0..len {
                v.push(Value::List(arb_list(u)?));
            }
            v
        }
        Tag::Compound => {
            let len = u.arbitrary_len::<(String, Value)>()?;
            let mut v = vec![];
            for _ in 0..len {
                v.push(Value::Compound(arb_compound(u)?));
            }
            v
        }
        Tag::IntArray => het_list(u, IntArray)?,
    })
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Value {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        use Value::*;

        Ok(match u.arbitrary::<Tag>()? {
            // A bare end marker is not a value.
            Tag::End => return Err(arbitrary::Error::IncorrectFormat),
            Tag::Byte => Byte(u.arbitrary()?),
            Tag::Short => Short(u.arbitrary()?),
            Tag::Int => Int(u.arbitrary()?),
            Tag::Long => Long(u.arbitrary()?),
            Tag::Float => Float(u.arbitrary()?),
            Tag::Double => Double(u.arbitrary()?),
            Tag::ByteArray => ByteArray(u.arbitrary()?),
            Tag::String => String(u.arbitrary()?),
            Tag::Compound => Compound(arb_compound(u)?),
            Tag::IntArray => IntArray(u.arbitrary()?),

            // Lists need to all be the same type.
            Tag::List => List(arb_list(u)?),
        })
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
        impl From<&$type> for Value {
            fn from(val: &$type) -> Self {
                Self::$variant(val.to_owned()$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(Vec<i8>, ByteArray);
from!(Vec<i32>, IntArray);
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}
impl From<&bool> for Value {
    fn from(val: &bool) -> Self {
        Self::Byte(i8::from(*val))
    }
}
