//! Uncompressed 32-bit TGA container.
//!
//! Only the one layout this crate writes is supported for reading: image
//! type 2 (true color), 32 bits per pixel, top-left origin, no image id and
//! no color map. Pixels are stored as BGRA.

use crate::error::{RenderError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

pub const TGA_HEADER_SIZE: usize = 18;
/// Uncompressed true-color image
pub const IMAGE_TYPE_TRUE_COLOR: u8 = 2;
pub const BITS_PER_PIXEL: u8 = 32;
/// Eight alpha bits, origin at the top-left corner
pub const DESCRIPTOR_TOP_LEFT: u8 = 0x28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    /// Header for a `width x height` image in the layout written by [`encode_tga`].
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            id_length: 0,
            color_map_type: 0,
            image_type: IMAGE_TYPE_TRUE_COLOR,
            width,
            height,
            bits_per_pixel: BITS_PER_PIXEL,
            descriptor: DESCRIPTOR_TOP_LEFT,
        }
    }

    pub fn parse(mut data: &[u8]) -> Result<Self> {
        if data.len() < TGA_HEADER_SIZE {
            return Err(RenderError::InvalidTga(format!(
                "header needs {} bytes, got {}",
                TGA_HEADER_SIZE,
                data.len()
            )));
        }

        let truncated = |_| RenderError::InvalidTga("truncated header".into());
        let id_length = data.read_u8().map_err(truncated)?;
        let color_map_type = data.read_u8().map_err(truncated)?;
        let image_type = data.read_u8().map_err(truncated)?;
        // Color map spec (5 bytes) and x/y origin (4 bytes)
        data = &data[9..];
        let width = data.read_u16::<LittleEndian>().map_err(truncated)?;
        let height = data.read_u16::<LittleEndian>().map_err(truncated)?;
        let bits_per_pixel = data.read_u8().map_err(truncated)?;
        let descriptor = data.read_u8().map_err(truncated)?;

        Ok(Self {
            id_length,
            color_map_type,
            image_type,
            width,
            height,
            bits_per_pixel,
            descriptor,
        })
    }

    pub fn to_bytes(&self) -> [u8; TGA_HEADER_SIZE] {
        let mut out = [0u8; TGA_HEADER_SIZE];
        out[0] = self.id_length;
        out[1] = self.color_map_type;
        out[2] = self.image_type;
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.bits_per_pixel;
        out[17] = self.descriptor;
        out
    }

    pub fn is_top_left(&self) -> bool {
        self.descriptor & 0x20 != 0
    }

    fn payload_size(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

fn check_buffer(width: u32, height: u32, rgba: &[u8]) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}

/// Encodes an RGBA8 buffer as an uncompressed top-left TGA.
pub fn encode_tga(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>> {
    check_buffer(width, height, rgba)?;
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(RenderError::Dimensions { width, height });
    };

    let header = TgaHeader::new(w, h);
    let mut out = Vec::with_capacity(TGA_HEADER_SIZE + rgba.len());
    out.extend_from_slice(&header.to_bytes());
    for pixel in rgba.chunks_exact(4) {
        let bgra = u32::from_le_bytes([pixel[2], pixel[1], pixel[0], pixel[3]]);
        out.write_u32::<LittleEndian>(bgra)
            .map_err(|e| RenderError::InvalidTga(e.to_string()))?;
    }
    Ok(out)
}

/// Reads back an image written by [`encode_tga`], returning `(header, rgba)`.
pub fn decode_tga(data: &[u8]) -> Result<(TgaHeader, Vec<u8>)> {
    let header = TgaHeader::parse(data)?;
    if header.image_type != IMAGE_TYPE_TRUE_COLOR
        || header.bits_per_pixel != BITS_PER_PIXEL
        || header.color_map_type != 0
    {
        return Err(RenderError::InvalidTga(format!(
            "unsupported layout: type {}, {} bpp, color map {}",
            header.image_type, header.bits_per_pixel, header.color_map_type
        )));
    }

    let start = TGA_HEADER_SIZE + header.id_length as usize;
    let end = start + header.payload_size();
    let Some(payload) = data.get(start..end) else {
        return Err(RenderError::InvalidTga(format!(
            "pixel data needs {} bytes, file has {}",
            end,
            data.len()
        )));
    };

    let row_bytes = header.width as usize * 4;
    let mut rows: Vec<&[u8]> = if row_bytes == 0 {
        Vec::new()
    } else {
        payload.chunks_exact(row_bytes).collect()
    };
    if !header.is_top_left() {
        rows.reverse();
    }

    let mut rgba = Vec::with_capacity(payload.len());
    for bgra in rows.into_iter().flat_map(|row| row.chunks_exact(4)) {
        rgba.extend_from_slice(&[bgra[2], bgra[1], bgra[0], bgra[3]]);
    }

    Ok((header, rgba))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PIXELS: [u8; 16] = [
        255, 0, 0, 255, //
        0, 255, 0, 128, //
        0, 0, 255, 0, //
        10, 20, 30, 40,
    ];

    #[test]
    fn header_layout_is_fixed() {
        let data = encode_tga(2, 2, &PIXELS).unwrap();
        assert_eq!(data.len(), TGA_HEADER_SIZE + 16);
        assert_eq!(
            &data[..TGA_HEADER_SIZE],
            &[0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 2, 0, 32, 0x28]
        );
        // First pixel reordered to BGRA
        assert_eq!(&data[18..22], &[0, 0, 255, 255]);
    }

    #[test]
    fn round_trip_2x2() {
        let data = encode_tga(2, 2, &PIXELS).unwrap();
        let (header, rgba) = decode_tga(&data).unwrap();
        assert_eq!(header, TgaHeader::new(2, 2));
        assert!(header.is_top_left());
        assert_eq!(rgba, PIXELS.to_vec());
    }

    #[test]
    fn bottom_left_origin_is_flipped() {
        let mut data = encode_tga(1, 2, &PIXELS[..8]).unwrap();
        data[17] = 0x08;
        let (_, rgba) = decode_tga(&data).unwrap();
        assert_eq!(&rgba[..4], &PIXELS[4..8]);
        assert_eq!(&rgba[4..], &PIXELS[..4]);
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        let err = encode_tga(2, 2, &PIXELS[..12]).unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 16, actual: 12 }));
    }

    #[test]
    fn rejects_oversized_dimensions() {
        let err = encode_tga(70_000, 0, &[]).unwrap_err();
        assert!(matches!(err, RenderError::Dimensions { width: 70_000, .. }));
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(matches!(
            TgaHeader::parse(&[0; 10]),
            Err(RenderError::InvalidTga(_))
        ));
        let data = encode_tga(2, 2, &PIXELS).unwrap();
        assert!(decode_tga(&data[..data.len() - 1]).is_err());
    }

    #[test]
    fn rejects_other_image_types() {
        let mut data = encode_tga(2, 2, &PIXELS).unwrap();
        data[2] = 10;
        assert!(decode_tga(&data).is_err());
    }
}
