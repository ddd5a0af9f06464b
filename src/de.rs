//! This module contains the binary decoder. It reads one NBT document from
//! any [`Read`] source by recursive descent, producing the name and
//! [`Value`] tree of the root tag.
//!
//! The convenience entry points [`from_bytes`] and [`from_reader`] cover the
//! common case. [`Decoder`] gives control over byte order and resource
//! ceilings through [`DeOpts`], access to the underlying reader, and
//! decoding of bare (unnamed) payloads.
//!
//! Decoding is strict: the first malformed byte fails the whole document,
//! and no partial tree is returned. Compressed input is not handled here;
//! callers decompress first.

use std::io::Read;

use crate::error::{Error, Result};
use crate::input::{Input, PREALLOC_LIMIT};
use crate::value::vec_u8_into_i8;
use crate::{Compound, DeOpts, Tag, Value};

/// Decode one named tag from a byte buffer.
///
/// ```
/// use nbtree::{from_bytes, nbt, to_bytes};
///
/// # fn main() -> nbtree::error::Result<()> {
/// let original = nbt!({"score": 42});
/// let bytes = to_bytes("save", &original)?;
///
/// let (name, value) = from_bytes(&bytes)?;
/// assert_eq!(name, "save");
/// assert_eq!(value, original);
/// # Ok(())
/// # }
/// ```
pub fn from_bytes(input: &[u8]) -> Result<(String, Value)> {
    from_bytes_with_opts(input, DeOpts::new())
}

/// Decode one named tag from a byte buffer with the given options.
pub fn from_bytes_with_opts(input: &[u8], opts: DeOpts) -> Result<(String, Value)> {
    Decoder::with_opts(input, opts).read_named()
}

/// Decode one named tag from a reader. Reads are small and unbuffered, so
/// wrap raw files and sockets in a [`BufReader`][`std::io::BufReader`].
pub fn from_reader<R: Read>(reader: R) -> Result<(String, Value)> {
    from_reader_with_opts(reader, DeOpts::new())
}

/// Decode one named tag from a reader with the given options.
pub fn from_reader_with_opts<R: Read>(reader: R, opts: DeOpts) -> Result<(String, Value)> {
    Decoder::with_opts(reader, opts).read_named()
}

/// Decode one bare payload from a byte buffer: a type code followed directly
/// by the payload, with no name field in between. The counterpart of
/// [`raw_to_bytes`][`crate::ser::raw_to_bytes`].
pub fn raw_from_bytes(input: &[u8]) -> Result<Value> {
    raw_from_bytes_with_opts(input, DeOpts::new())
}

/// Decode one bare payload from a byte buffer with the given options.
pub fn raw_from_bytes_with_opts(input: &[u8], opts: DeOpts) -> Result<Value> {
    Decoder::with_opts(input, opts).read_raw()
}

/// Decoder for NBT data from any [`Read`] source. Does not do decompression.
///
/// Reads exactly one document and leaves the reader positioned after it;
/// trailing bytes are not touched. [`read_named`][`Decoder::read_named`]
/// decodes the standard named root, [`read_raw`][`Decoder::read_raw`] a
/// bare payload with no name field.
///
/// ```
/// use nbtree::{to_bytes_with_opts, DeOpts, Decoder, Endian, SerOpts, Value};
///
/// # fn main() -> nbtree::error::Result<()> {
/// let opts = SerOpts::new().endian(Endian::Little);
/// let bytes = to_bytes_with_opts("pos", &Value::Int(7), opts)?;
///
/// let mut decoder = Decoder::with_opts(bytes.as_slice(), DeOpts::new().endian(Endian::Little));
/// assert_eq!(decoder.read_named()?, ("pos".to_string(), Value::Int(7)));
/// # Ok(())
/// # }
/// ```
pub struct Decoder<R: Read> {
    input: Input<R>,
    opts: DeOpts,
}

impl<R: Read> Decoder<R> {
    /// Create a decoder with default options: big-endian byte order and the
    /// default resource ceilings.
    pub fn new(reader: R) -> Self {
        Self::with_opts(reader, DeOpts::new())
    }

    /// Create a decoder with the given options.
    pub fn with_opts(reader: R, opts: DeOpts) -> Self {
        Self {
            input: Input::new(reader, opts.endian),
            opts,
        }
    }

    /// Read one named tag: type code, name, payload. An end tag at the root
    /// is an error, as is any type code outside the registry, in which case
    /// exactly the one offending byte has been consumed.
    pub fn read_named(&mut self) -> Result<(String, Value)> {
        let tag = self.input.read_tag()?;
        if tag == Tag::End {
            return Err(Error::root_end_tag());
        }
        let name = self.input.read_string()?;
        let value = self.read_payload(tag, 0)?;
        Ok((name, value))
    }

    /// Read one bare tag: type code then payload, with no name field in
    /// between.
    pub fn read_raw(&mut self) -> Result<Value> {
        let tag = self.input.read_tag()?;
        if tag == Tag::End {
            return Err(Error::root_end_tag());
        }
        self.read_payload(tag, 0)
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.input.get_ref()
    }

    /// Gets a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        self.input.get_mut()
    }

    /// Consumes this decoder, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.input.into_inner()
    }

    fn read_payload(&mut self, tag: Tag, depth: usize) -> Result<Value> {
        match tag {
            // Compound loops and list guards consume end tags before
            // dispatching, so an end tag is never a payload.
            Tag::End => Err(Error::bespoke(
                "unexpected end tag, was expecting payload of a value",
            )),
            Tag::Byte => Ok(Value::Byte(self.input.read_i8()?)),
            Tag::Short => Ok(Value::Short(self.input.read_i16()?)),
            Tag::Int => Ok(Value::Int(self.input.read_i32()?)),
            Tag::Long => Ok(Value::Long(self.input.read_i64()?)),
            Tag::Float => Ok(Value::Float(self.input.read_f32()?)),
            Tag::Double => Ok(Value::Double(self.input.read_f64()?)),
            Tag::ByteArray => {
                let size = self.read_seq_len()?;
                let data = self.input.read_byte_block(size)?;
                Ok(Value::ByteArray(vec_u8_into_i8(data)))
            }
            Tag::String => Ok(Value::String(self.input.read_string()?)),
            Tag::List => {
                self.check_depth(depth)?;
                let element_tag = self.input.read_tag()?;
                let size = self.input.read_i32()?;

                // Old writers emit empty lists as 'list of end', which is
                // fine. A nonzero count of ends is not: ends have no
                // payload, so a tiny input could claim an enormous list.
                if element_tag == Tag::End && size != 0 {
                    return Err(Error::list_of_end(size));
                }
                let size = self.check_seq_len(size)?;

                let mut items = Vec::with_capacity(element_capacity::<Value>(size));
                for _ in 0..size {
                    items.push(self.read_payload(element_tag, depth + 1)?);
                }
                Ok(Value::List(items))
            }
            Tag::Compound => {
                self.check_depth(depth)?;
                let mut compound = Compound::new();
                loop {
                    let tag = self.input.read_tag()?;
                    if tag == Tag::End {
                        break;
                    }
                    let name = self.input.read_string()?;
                    let value = self.read_payload(tag, depth + 1)?;
                    // Duplicate keys: last write wins.
                    compound.insert(name, value);
                }
                Ok(Value::Compound(compound))
            }
            Tag::IntArray => {
                let size = self.read_seq_len()?;
                let mut data = Vec::with_capacity(element_capacity::<i32>(size));
                for _ in 0..size {
                    data.push(self.input.read_i32()?);
                }
                Ok(Value::IntArray(data))
            }
        }
    }

    fn read_seq_len(&mut self) -> Result<usize> {
        let size = self.input.read_i32()?;
        self.check_seq_len(size)
    }

    fn check_seq_len(&self, size: i32) -> Result<usize> {
        if size < 0 {
            return Err(Error::negative_size(size));
        }
        let size = size as usize;
        if size > self.opts.max_seq_len {
            return Err(Error::seq_too_long(size, self.opts.max_seq_len));
        }
        Ok(size)
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= self.opts.max_depth {
            return Err(Error::depth_limit(self.opts.max_depth));
        }
        Ok(())
    }
}

fn element_capacity<T>(size: usize) -> usize {
    size.min(PREALLOC_LIMIT / std::mem::size_of::<T>().max(1))
}
