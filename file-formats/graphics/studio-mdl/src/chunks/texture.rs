use crate::reader::{Record, read_name};
use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io;

bitflags! {
    /// Texture flags as defined in the studio format
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextureFlags: i32 {
        /// Flat shading
        const FLATSHADE = 0x0001;
        /// Environment-mapped chrome
        const CHROME = 0x0002;
        /// Ignore lighting
        const FULLBRIGHT = 0x0004;
        /// Do not generate mipmaps
        const NOMIPS = 0x0008;
        /// Alpha blended
        const ALPHA = 0x0010;
        /// Additive blending
        const ADDITIVE = 0x0020;
        /// Palette index 255 is transparent
        const MASKED = 0x0040;
    }
}

/// Texture directory entry (80 bytes on disk)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRecord {
    pub name: String,
    pub flags: TextureFlags,
    pub width: i32,
    pub height: i32,
    /// Offset of the palette index block, relative to the owning buffer
    pub index: i32,
}

impl TextureRecord {
    /// Bytes occupied by the pixel indices plus the 256-entry RGB palette.
    pub fn block_size(&self) -> Option<usize> {
        let width = usize::try_from(self.width).ok()?;
        let height = usize::try_from(self.height).ok()?;
        width.checked_mul(height)?.checked_add(256 * 3)
    }
}

impl Record for TextureRecord {
    const SIZE: usize = 80;
    const NAME: &'static str = "texture";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        Ok(Self {
            name: read_name::<64>(reader)?,
            flags: TextureFlags::from_bits_retain(reader.read_i32::<LittleEndian>()?),
            width: reader.read_i32::<LittleEndian>()?,
            height: reader.read_i32::<LittleEndian>()?,
            index: reader.read_i32::<LittleEndian>()?,
        })
    }
}
