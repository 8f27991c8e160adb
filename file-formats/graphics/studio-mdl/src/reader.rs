//! Bounds-checked access to offset tables inside a model buffer
//!
//! Every structure in a studio model is located through a `(count, offset)`
//! pair stored in some parent record, with the offset relative to the start
//! of the buffer that holds the parent. [`ByteView`] turns such a pair into a
//! typed table or an [`MdlError::OutOfBounds`] error. Nothing here reads
//! beyond the end of the buffer.

use crate::error::{MdlError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use glam::Vec3;
use log::error;
use std::io;

/// A fixed-size little-endian record.
pub trait Record: Sized {
    /// Size of one record on disk, in bytes
    const SIZE: usize;

    /// Human-readable name used in error messages
    const NAME: &'static str;

    /// Parses one record from a reader positioned at its first byte.
    fn read_from(reader: &mut &[u8]) -> io::Result<Self>;
}

/// Read-only window over one model buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns `size` bytes starting at `offset`.
    pub fn slice(&self, what: &'static str, offset: i64, size: usize) -> Result<&'a [u8]> {
        let out_of_bounds = || {
            error!(
                "{} at offset {} (+{}) is out of bounds! buffer holds {} bytes",
                what,
                offset,
                size,
                self.data.len()
            );
            MdlError::OutOfBounds {
                what,
                offset,
                size,
                len: self.data.len(),
            }
        };

        let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(size).ok_or_else(out_of_bounds)?;
        self.data.get(start..end).ok_or_else(out_of_bounds)
    }

    /// Parses a single record at `offset`.
    pub fn record<T: Record>(&self, offset: i64) -> Result<T> {
        let mut bytes = self.slice(T::NAME, offset, T::SIZE)?;
        T::read_from(&mut bytes).map_err(|_| MdlError::OutOfBounds {
            what: T::NAME,
            offset,
            size: T::SIZE,
            len: self.data.len(),
        })
    }

    /// Parses `count` consecutive records starting at `offset`.
    pub fn table<T: Record>(&self, offset: i32, count: i32) -> Result<Vec<T>> {
        let count = checked_count(T::NAME, count)?;
        if count == 0 {
            return Ok(Vec::new());
        }

        let size = count
            .checked_mul(T::SIZE)
            .ok_or(MdlError::OutOfBounds {
                what: T::NAME,
                offset: offset as i64,
                size: usize::MAX,
                len: self.data.len(),
            })?;
        let mut bytes = self.slice(T::NAME, offset as i64, size)?;

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let record = T::read_from(&mut bytes).map_err(|_| MdlError::OutOfBounds {
                what: T::NAME,
                offset: offset as i64,
                size,
                len: self.data.len(),
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Converts an on-disk count into a length, rejecting negative values.
pub fn checked_count(what: &'static str, count: i32) -> Result<usize> {
    usize::try_from(count).map_err(|_| MdlError::NegativeCount { what, count })
}

/// Reads a NUL-padded fixed-width name.
pub fn read_name<const N: usize>(reader: &mut &[u8]) -> io::Result<String> {
    let mut raw = [0u8; N];
    io::Read::read_exact(reader, &mut raw)?;
    let end = memchr::memchr(0, &raw).unwrap_or(N);
    Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
}

/// Advances past `count` bytes the caller has no use for.
pub fn skip(reader: &mut &[u8], count: usize) -> io::Result<()> {
    *reader = reader
        .get(count..)
        .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
    Ok(())
}

pub fn read_vec3(reader: &mut &[u8]) -> io::Result<Vec3> {
    Ok(Vec3::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}

impl Record for Vec3 {
    const SIZE: usize = 12;
    const NAME: &'static str = "vector";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        read_vec3(reader)
    }
}

impl Record for u8 {
    const SIZE: usize = 1;
    const NAME: &'static str = "bone index";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        reader.read_u8()
    }
}

impl Record for i16 {
    const SIZE: usize = 2;
    const NAME: &'static str = "triangle command";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        reader.read_i16::<LittleEndian>()
    }
}

impl Record for u16 {
    const SIZE: usize = 2;
    const NAME: &'static str = "skin reference";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        reader.read_u16::<LittleEndian>()
    }
}
