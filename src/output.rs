use std::convert::TryInto;
use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::{Endian, Tag};

/// Primitive write half of the wire format, mirroring [`Input`].
///
/// [`Input`]: crate::input::Input
pub(crate) struct Output<W: Write> {
    writer: W,
    order: Endian,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W, order: Endian) -> Self {
        Self { writer, order }
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        Ok(self.writer.write_i8(v)?)
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        Ok(match self.order {
            Endian::Big => self.writer.write_u16::<BigEndian>(v)?,
            Endian::Little => self.writer.write_u16::<LittleEndian>(v)?,
        })
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        Ok(match self.order {
            Endian::Big => self.writer.write_i16::<BigEndian>(v)?,
            Endian::Little => self.writer.write_i16::<LittleEndian>(v)?,
        })
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        Ok(match self.order {
            Endian::Big => self.writer.write_i32::<BigEndian>(v)?,
            Endian::Little => self.writer.write_i32::<LittleEndian>(v)?,
        })
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        Ok(match self.order {
            Endian::Big => self.writer.write_i64::<BigEndian>(v)?,
            Endian::Little => self.writer.write_i64::<LittleEndian>(v)?,
        })
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        Ok(match self.order {
            Endian::Big => self.writer.write_f32::<BigEndian>(v)?,
            Endian::Little => self.writer.write_f32::<LittleEndian>(v)?,
        })
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        Ok(match self.order {
            Endian::Big => self.writer.write_f64::<BigEndian>(v)?,
            Endian::Little => self.writer.write_f64::<LittleEndian>(v)?,
        })
    }

    pub fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.writer.write_u8(tag as u8)?;
        Ok(())
    }

    /// Write a string in the wire encoding. The format bounds string data at
    /// 65535 bytes of UTF-8, so longer input is an error rather than a
    /// silently truncated prefix.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let len: u16 = s
            .len()
            .try_into()
            .map_err(|_| Error::string_too_long(s.len()))?;
        self.write_u16(len)?;
        self.writer.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Write a signed 32-bit length prefix for a list or array.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_i32(len.try_into().map_err(|_| Error::len_too_large())?)?;
        Ok(())
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        Ok(())
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Gets a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the output, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
