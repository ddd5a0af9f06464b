//! nbtree allows fast decoding and encoding of NBT, the self-describing
//! binary tree format used by *Minecraft: Java Edition* for world data,
//! player data and network packets.
//!
//! A document decodes into a [`Value`] tree paired with the name of its root
//! tag, and a tree encodes back to bytes with [`to_bytes`] or [`to_writer`].
//! [`to_snbt`] renders a tree as SNBT text for logs and test assertions.
//! [`Value`] also implements serde's `Serialize` and `Deserialize`, so trees
//! convert to and from other serde formats such as JSON.
//!
//! # Quick start
//!
//! ```
//! use nbtree::{from_bytes, nbt, to_bytes};
//!
//! let level = nbt!({
//!     "Data": {
//!         "LevelName": "world",
//!         "raining": 0u8,
//!     }
//! });
//!
//! let bytes = to_bytes("", &level)?;
//! let (name, restored) = from_bytes(&bytes)?;
//!
//! assert_eq!(name, "");
//! assert_eq!(restored, level);
//! # Ok::<(), nbtree::error::Error>(())
//! ```
//!
//! # Byte order
//!
//! Java Edition writes multi-byte integers and floats big-endian, which is
//! the default here. Bedrock Edition writes them little-endian. The order is
//! selected per call through [`DeOpts`] and [`SerOpts`]:
//!
//! ```
//! use nbtree::{to_bytes_with_opts, Endian, SerOpts, Value};
//!
//! let opts = SerOpts::new().endian(Endian::Little);
//! let bytes = to_bytes_with_opts("", &Value::Short(1), opts)?;
//! assert_eq!(bytes, [0x02, 0x00, 0x00, 0x01, 0x00]);
//! # Ok::<(), nbtree::error::Error>(())
//! ```
//!
//! # Untrusted input
//!
//! Decoding never trusts the declared size of anything. Allocation is capped
//! until bytes actually arrive, nesting deeper than [`DeOpts::max_depth`]
//! containers is rejected rather than overflowing the stack, and
//! [`DeOpts::max_seq_len`] can cap list and array sizes well below the
//! format's `i32::MAX` ceiling. Compressed input is not decompressed here;
//! gzip data is however recognised and called out in the error message.
//!
//! # Features
//!
//! * `preserve-order`: store [`Compound`] entries in insertion order using
//!   [indexmap](https://crates.io/crates/indexmap) rather than `HashMap`.
//! * `arbitrary1`: implement [arbitrary](https://crates.io/crates/arbitrary)
//!   for [`Tag`] and [`Value`] for fuzzing.

mod input;
mod macros;
mod output;
mod snbt;
mod value;

pub mod de;
pub mod error;
pub mod ser;

#[cfg(test)]
mod test;

pub use de::{
    from_bytes, from_bytes_with_opts, from_reader, from_reader_with_opts, raw_from_bytes,
    raw_from_bytes_with_opts, Decoder,
};
pub use ser::{
    raw_to_bytes, raw_to_bytes_with_opts, to_bytes, to_bytes_with_opts, to_writer,
    to_writer_with_opts, Encoder,
};
pub use snbt::to_snbt;
pub use value::*;

use std::str::FromStr;

use crate::error::Error;

/// Number of nested lists and compounds decoding and encoding accept before
/// giving up, unless overridden through [`DeOpts`] or [`SerOpts`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// An NBT tag type. This carries neither name nor payload, just which of the
/// twelve wire types a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Marks the end of a Compound, and the element type of empty lists.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// An array of i8.
    ByteArray = 7,
    /// A UTF-8 string of at most 65535 bytes.
    String = 8,
    /// A sequence of payloads sharing a single element type.
    List = 9,
    /// A set of named values, like a struct or map.
    Compound = 10,
    /// An array of i32.
    IntArray = 11,
}

impl Tag {
    /// The canonical name of the tag type, eg `TAG_Byte_Array`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::End => "TAG_End",
            Tag::Byte => "TAG_Byte",
            Tag::Short => "TAG_Short",
            Tag::Int => "TAG_Int",
            Tag::Long => "TAG_Long",
            Tag::Float => "TAG_Float",
            Tag::Double => "TAG_Double",
            Tag::ByteArray => "TAG_Byte_Array",
            Tag::String => "TAG_String",
            Tag::List => "TAG_List",
            Tag::Compound => "TAG_Compound",
            Tag::IntArray => "TAG_Int_Array",
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
        }
    }
}

impl FromStr for Tag {
    type Err = Error;

    /// Parse a canonical tag name, eg `TAG_Byte_Array`, back to its [`Tag`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Tag::*;
        Ok(match s {
            "TAG_End" => End,
            "TAG_Byte" => Byte,
            "TAG_Short" => Short,
            "TAG_Int" => Int,
            "TAG_Long" => Long,
            "TAG_Float" => Float,
            "TAG_Double" => Double,
            "TAG_Byte_Array" => ByteArray,
            "TAG_String" => String,
            "TAG_List" => List,
            "TAG_Compound" => Compound,
            "TAG_Int_Array" => IntArray,
            _ => return Err(Error::unknown_tag_name(s)),
        })
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte order of the numeric fields of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Most significant byte first, as written by Java Edition. The default.
    #[default]
    Big,
    /// Least significant byte first, as written by Bedrock Edition.
    Little,
}

/// Options for decoding, used with [`from_bytes_with_opts`],
/// [`from_reader_with_opts`] and [`Decoder::with_opts`].
///
/// ```
/// use nbtree::{DeOpts, Endian};
///
/// let opts = DeOpts::new()
///     .endian(Endian::Little)
///     .max_seq_len(1_000_000);
/// ```
#[derive(Debug, Clone)]
pub struct DeOpts {
    pub(crate) endian: Endian,
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
}

impl DeOpts {
    /// Create options with the defaults: big-endian byte order, nesting up to
    /// [`DEFAULT_MAX_DEPTH`] containers, sequences up to `i32::MAX` elements.
    pub fn new() -> Self {
        Self {
            endian: Endian::Big,
            max_depth: DEFAULT_MAX_DEPTH,
            max_seq_len: i32::MAX as usize,
        }
    }

    /// Set the byte order of numeric fields.
    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Set the maximum number of nested lists and compounds.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    /// Set the maximum number of elements a list or array may declare.
    pub fn max_seq_len(mut self, value: usize) -> Self {
        self.max_seq_len = value;
        self
    }
}

impl Default for DeOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for encoding, used with [`to_bytes_with_opts`],
/// [`to_writer_with_opts`] and [`Encoder::with_opts`].
#[derive(Debug, Clone)]
pub struct SerOpts {
    pub(crate) endian: Endian,
    pub(crate) max_depth: usize,
}

impl SerOpts {
    /// Create options with the defaults: big-endian byte order and nesting up
    /// to [`DEFAULT_MAX_DEPTH`] containers.
    pub fn new() -> Self {
        Self {
            endian: Endian::Big,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the byte order of numeric fields.
    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Set the maximum number of nested lists and compounds.
    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }
}

impl Default for SerOpts {
    fn default() -> Self {
        Self::new()
    }
}
