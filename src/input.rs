use std::convert::TryFrom;
use std::io::Read;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::{Endian, Tag};

/// Declared sizes are untrusted: a few bytes of input can claim a
/// multi-gigabyte sequence. Never reserve more than this up front, and let
/// buffers grow as data actually arrives.
pub(crate) const PREALLOC_LIMIT: usize = 64 * 1024;

/// Primitive read half of the wire format: fixed-width values in the
/// configured byte order, tag bytes and size-prefixed strings.
pub(crate) struct Input<R: Read> {
    reader: R,
    order: Endian,
}

impl<R: Read> Input<R> {
    pub fn new(reader: R, order: Endian) -> Self {
        Self { reader, order }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.reader.read_u8()?)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.reader.read_i8()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(match self.order {
            Endian::Big => self.reader.read_u16::<BigEndian>()?,
            Endian::Little => self.reader.read_u16::<LittleEndian>()?,
        })
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(match self.order {
            Endian::Big => self.reader.read_i16::<BigEndian>()?,
            Endian::Little => self.reader.read_i16::<LittleEndian>()?,
        })
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(match self.order {
            Endian::Big => self.reader.read_i32::<BigEndian>()?,
            Endian::Little => self.reader.read_i32::<LittleEndian>()?,
        })
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(match self.order {
            Endian::Big => self.reader.read_i64::<BigEndian>()?,
            Endian::Little => self.reader.read_i64::<LittleEndian>()?,
        })
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(match self.order {
            Endian::Big => self.reader.read_f32::<BigEndian>()?,
            Endian::Little => self.reader.read_f32::<LittleEndian>()?,
        })
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(match self.order {
            Endian::Big => self.reader.read_f64::<BigEndian>()?,
            Endian::Little => self.reader.read_f64::<LittleEndian>()?,
        })
    }

    /// Read one tag byte, rejecting codes outside the registry. On failure
    /// exactly that one byte has been consumed.
    pub fn read_tag(&mut self) -> Result<Tag> {
        let t = self.read_u8()?;
        Tag::try_from(t).map_err(|_| Error::invalid_tag(t))
    }

    /// Read a string in the wire encoding: unsigned 16-bit length prefix
    /// followed by that many bytes of UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let buf = self.read_byte_block(len)?;
        String::from_utf8(buf).map_err(|e| Error::nonunicode(e.into_bytes()))
    }

    /// Read exactly `len` bytes without trusting `len` for allocation.
    pub fn read_byte_block(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if read < len {
            return Err(Error::unexpected_eof());
        }
        Ok(buf)
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes the input, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
