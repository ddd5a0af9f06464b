//! This module contains the binary encoder. It walks a [`Value`] tree and
//! writes the wire form of one document to any [`Write`] destination.
//!
//! The convenience entry points [`to_bytes`] and [`to_writer`] cover the
//! common case. [`Encoder`] gives control over byte order and the depth
//! ceiling through [`SerOpts`], access to the underlying writer, and
//! encoding of bare (unnamed) payloads.
//!
//! Encoding checks the tree invariants the [`Value`] enum cannot enforce on
//! its own: lists must be homogeneous and an end tag is never writable as a
//! value, named or not.

use std::io::Write;

use crate::error::{Error, Result};
use crate::output::Output;
use crate::value::{i8_slice_as_u8, list_element_tag};
use crate::{SerOpts, Tag, Value};

/// Encode one named tag to a byte buffer.
///
/// ```
/// use nbtree::{to_bytes, Value};
///
/// # fn main() -> nbtree::error::Result<()> {
/// let bytes = to_bytes("hp", &Value::Byte(20))?;
/// assert_eq!(bytes, [0x01, 0x00, 0x02, b'h', b'p', 0x14]);
/// # Ok(())
/// # }
/// ```
pub fn to_bytes(name: &str, value: &Value) -> Result<Vec<u8>> {
    to_bytes_with_opts(name, value, SerOpts::new())
}

/// Encode one named tag to a byte buffer with the given options.
pub fn to_bytes_with_opts(name: &str, value: &Value, opts: SerOpts) -> Result<Vec<u8>> {
    let mut result = vec![];
    to_writer_with_opts(&mut result, name, value, opts)?;
    Ok(result)
}

/// Encode one named tag to a writer.
pub fn to_writer<W: Write>(writer: W, name: &str, value: &Value) -> Result<()> {
    to_writer_with_opts(writer, name, value, SerOpts::new())
}

/// Encode one named tag to a writer with the given options.
pub fn to_writer_with_opts<W: Write>(
    writer: W,
    name: &str,
    value: &Value,
    opts: SerOpts,
) -> Result<()> {
    Encoder::with_opts(writer, opts).write_named(name, value)
}

/// Encode one bare payload to a byte buffer: a type code followed directly by
/// the payload, with no name field in between. The counterpart of
/// [`raw_from_bytes`][`crate::de::raw_from_bytes`].
///
/// ```
/// use nbtree::{raw_to_bytes, Value};
///
/// # fn main() -> nbtree::error::Result<()> {
/// let bytes = raw_to_bytes(&Value::Byte(20))?;
/// assert_eq!(bytes, [0x01, 0x14]);
/// # Ok(())
/// # }
/// ```
pub fn raw_to_bytes(value: &Value) -> Result<Vec<u8>> {
    raw_to_bytes_with_opts(value, SerOpts::new())
}

/// Encode one bare payload to a byte buffer with the given options.
pub fn raw_to_bytes_with_opts(value: &Value, opts: SerOpts) -> Result<Vec<u8>> {
    let mut result = vec![];
    Encoder::with_opts(&mut result, opts).write_raw(value)?;
    Ok(result)
}

/// Encoder for NBT data to any [`Write`] destination. Does not do
/// compression.
///
/// The only side effect is appending bytes to the writer.
/// [`write_named`][`Encoder::write_named`] writes the standard named root,
/// [`write_raw`][`Encoder::write_raw`] a bare payload with no name field.
pub struct Encoder<W: Write> {
    output: Output<W>,
    opts: SerOpts,
}

impl<W: Write> Encoder<W> {
    /// Create an encoder with default options: big-endian byte order and the
    /// default depth ceiling.
    pub fn new(writer: W) -> Self {
        Self::with_opts(writer, SerOpts::new())
    }

    /// Create an encoder with the given options.
    pub fn with_opts(writer: W, opts: SerOpts) -> Self {
        Self {
            output: Output::new(writer, opts.endian),
            opts,
        }
    }

    /// Write one named tag: type code, name, payload. An end tag is not a
    /// writable value; that fails before anything reaches the writer.
    pub fn write_named(&mut self, name: &str, value: &Value) -> Result<()> {
        let tag = value.tag();
        if tag == Tag::End {
            return Err(Error::end_value());
        }
        self.output.write_tag(tag)?;
        self.output.write_string(name)?;
        self.write_payload(value, 0)
    }

    /// Write one bare tag: type code then payload, with no name field in
    /// between.
    pub fn write_raw(&mut self, value: &Value) -> Result<()> {
        let tag = value.tag();
        if tag == Tag::End {
            return Err(Error::end_value());
        }
        self.output.write_tag(tag)?;
        self.write_payload(value, 0)
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.output.get_ref()
    }

    /// Gets a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        self.output.get_mut()
    }

    /// Consumes this encoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.output.into_inner()
    }

    fn write_payload(&mut self, value: &Value, depth: usize) -> Result<()> {
        match value {
            Value::End => Err(Error::end_value()),
            Value::Byte(v) => self.output.write_i8(*v),
            Value::Short(v) => self.output.write_i16(*v),
            Value::Int(v) => self.output.write_i32(*v),
            Value::Long(v) => self.output.write_i64(*v),
            Value::Float(v) => self.output.write_f32(*v),
            Value::Double(v) => self.output.write_f64(*v),
            Value::ByteArray(v) => {
                self.output.write_len(v.len())?;
                self.output.write_bytes(i8_slice_as_u8(v))
            }
            Value::String(v) => self.output.write_string(v),
            Value::List(v) => {
                self.check_depth(depth)?;
                // Resolving the element tag validates homogeneity and
                // rejects end members before any list byte is written. An
                // empty list encodes with the end sentinel as its element
                // type.
                let element_tag = list_element_tag(v)?;
                self.output.write_tag(element_tag)?;
                self.output.write_len(v.len())?;
                for item in v {
                    self.write_payload(item, depth + 1)?;
                }
                Ok(())
            }
            Value::Compound(v) => {
                self.check_depth(depth)?;
                for (key, item) in v.iter() {
                    let tag = item.tag();
                    if tag == Tag::End {
                        return Err(Error::end_value());
                    }
                    self.output.write_tag(tag)?;
                    self.output.write_string(key)?;
                    self.write_payload(item, depth + 1)?;
                }
                self.output.write_tag(Tag::End)?;
                Ok(())
            }
            Value::IntArray(v) => {
                self.output.write_len(v.len())?;
                for i in v {
                    self.output.write_i32(*i)?;
                }
                Ok(())
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= self.opts.max_depth {
            return Err(Error::depth_limit(self.opts.max_depth));
        }
        Ok(())
    }
}
