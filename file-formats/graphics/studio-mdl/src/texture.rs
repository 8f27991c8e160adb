//! Palette texture expansion
//!
//! A texture block is `width * height` palette indices followed by a
//! 256-entry RGB palette. Decoding produces a tightly packed RGBA8 image.

use crate::chunks::{TextureFlags, TextureRecord};
use crate::error::{MdlError, Result};
use custom_debug::Debug;
use mdl_utils::debug;

/// Number of palette entries after the index block
pub const PALETTE_ENTRIES: usize = 256;

/// Palette index treated as transparent in masked textures
pub const MASK_INDEX: u8 = 255;

/// A decoded RGBA8 texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub name: String,
    pub flags: TextureFlags,
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, top row first
    #[debug(with = debug::byte_buffer_fmt)]
    pub rgba: Vec<u8>,
}

impl Texture {
    /// Expands a palette index block into RGBA.
    ///
    /// Pixels use `palette[index]` with alpha 255. When the record carries
    /// [`TextureFlags::MASKED`], index 255 becomes fully transparent black.
    ///
    /// # Arguments
    ///
    /// * `record` - Directory entry describing size, flags and name
    /// * `block` - Index bytes followed by the 768-byte palette; may be longer
    pub fn decode(record: &TextureRecord, block: &[u8]) -> Result<Self> {
        let width = dimension(record.width, "texture width")?;
        let height = dimension(record.height, "texture height")?;
        let pixel_count = width as usize * height as usize;
        let required = pixel_count + PALETTE_ENTRIES * 3;

        if block.len() < required {
            return Err(MdlError::OutOfBounds {
                what: "texture data",
                offset: record.index as i64,
                size: required,
                len: block.len(),
            });
        }

        let (indices, rest) = block.split_at(pixel_count);
        let palette = &rest[..PALETTE_ENTRIES * 3];
        let masked = record.flags.contains(TextureFlags::MASKED);

        let mut rgba = Vec::with_capacity(pixel_count * 4);
        for &index in indices {
            if masked && index == MASK_INDEX {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                let entry = index as usize * 3;
                rgba.extend_from_slice(&palette[entry..entry + 3]);
                rgba.push(255);
            }
        }

        Ok(Self {
            name: record.name.clone(),
            flags: record.flags,
            width,
            height,
            rgba,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.rgba.is_empty()
    }

    /// RGBA of the texel at `(x, y)`, if inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        let texel = self.rgba.get(start..start + 4)?;
        Some([texel[0], texel[1], texel[2], texel[3]])
    }

    /// Texels with non-zero alpha.
    pub fn opaque_pixel_count(&self) -> usize {
        self.rgba.chunks_exact(4).filter(|px| px[3] != 0).count()
    }
}

fn dimension(value: i32, what: &'static str) -> Result<u32> {
    u32::try_from(value).map_err(|_| MdlError::NegativeCount { what, count: value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn record(width: i32, height: i32, flags: TextureFlags) -> TextureRecord {
        TextureRecord {
            name: "skin.bmp".to_string(),
            flags,
            width,
            height,
            index: 0,
        }
    }

    fn block(indices: &[u8]) -> Vec<u8> {
        let mut data = indices.to_vec();
        for entry in 0..PALETTE_ENTRIES {
            let value = entry as u8;
            data.extend_from_slice(&[value, value.wrapping_add(1), value.wrapping_add(2)]);
        }
        data
    }

    #[test]
    fn expands_palette_indices() {
        let texture = Texture::decode(&record(2, 1, TextureFlags::empty()), &block(&[0, 10])).unwrap();
        assert_eq!(texture.width, 2);
        assert_eq!(texture.rgba, vec![0, 1, 2, 255, 10, 11, 12, 255]);
        assert_eq!(texture.pixel(1, 0), Some([10, 11, 12, 255]));
        assert_eq!(texture.pixel(2, 0), None);
    }

    #[test_case(TextureFlags::MASKED, [0, 0, 0, 0] ; "masked index 255 is transparent")]
    #[test_case(TextureFlags::empty(), [255, 0, 1, 255] ; "unmasked index 255 uses the palette")]
    #[test_case(TextureFlags::MASKED | TextureFlags::NOMIPS, [0, 0, 0, 0] ; "mask bit among others")]
    fn index_255(flags: TextureFlags, expected: [u8; 4]) {
        let texture = Texture::decode(&record(1, 1, flags), &block(&[255])).unwrap();
        assert_eq!(texture.pixel(0, 0), Some(expected));
    }

    #[test]
    fn masked_keeps_other_indices() {
        let texture = Texture::decode(&record(2, 1, TextureFlags::MASKED), &block(&[254, 255])).unwrap();
        assert_eq!(texture.pixel(0, 0), Some([254, 255, 0, 255]));
        assert_eq!(texture.opaque_pixel_count(), 1);
    }

    #[test]
    fn short_block_is_rejected() {
        let mut data = block(&[0, 0, 0, 0]);
        data.truncate(100);
        let err = Texture::decode(&record(2, 2, TextureFlags::empty()), &data).unwrap_err();
        assert!(matches!(err, MdlError::OutOfBounds { what: "texture data", .. }));
    }

    #[test]
    fn negative_size_is_rejected() {
        let err = Texture::decode(&record(-4, 2, TextureFlags::empty()), &block(&[])).unwrap_err();
        assert!(matches!(err, MdlError::NegativeCount { count: -4, .. }));
    }

    #[test]
    fn zero_sized_texture_is_empty() {
        let texture = Texture::decode(&record(0, 8, TextureFlags::empty()), &block(&[])).unwrap();
        assert!(texture.is_empty());
    }

    #[test]
    #[cfg(not(feature = "debug-print-all"))]
    fn debug_output_is_trimmed() {
        let texture = Texture::decode(&record(4, 4, TextureFlags::empty()), &block(&[0; 16])).unwrap();
        let printed = format!("{:?}", texture);
        assert!(printed.contains("<64 bytes"), "{}", printed);
    }
}
