use crate::error::{RenderError, Result};
use crate::output::tga::encode_tga;
use crate::raster::RenderOutput;
use image::RgbaImage;
use std::fmt;
use std::path::Path;

/// Something that can persist an RGBA8 image
pub trait ImageSink {
    /// Writes a `width x height` RGBA8 buffer to `path`.
    fn write(&self, path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()>;
}

/// Uncompressed 32-bit TGA, written byte for byte by this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct TgaSink;

impl ImageSink for TgaSink {
    fn write(&self, path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let data = encode_tga(width, height, rgba)?;
        std::fs::write(path, data).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// PNG through the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct PngSink;

impl ImageSink for PngSink {
    fn write(&self, path: &Path, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let expected = width as usize * height as usize * 4;
        let buffer = RgbaImage::from_raw(width, height, rgba.to_vec())
            .filter(|_| rgba.len() == expected)
            .ok_or(RenderError::BufferSize {
                expected,
                actual: rgba.len(),
            })?;
        buffer.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Output container chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Tga,
    Png,
}

impl ImageFormat {
    /// `.png` selects PNG; everything else, including no extension, is TGA.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("png") => Self::Png,
            _ => Self::Tga,
        }
    }

    pub fn sink(self) -> &'static dyn ImageSink {
        match self {
            Self::Tga => &TgaSink,
            Self::Png => &PngSink,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tga => "TGA",
            Self::Png => "PNG",
        })
    }
}

/// Writes `output` to `path` in the format implied by its extension.
pub fn write_image<P: AsRef<Path>>(path: P, output: &RenderOutput) -> Result<ImageFormat> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path);
    log::debug!(
        "Writing {}x{} {} to {}",
        output.width,
        output.height,
        format,
        path.display()
    );
    format
        .sink()
        .write(path, output.width, output.height, &output.rgba)?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("out.tga", ImageFormat::Tga)]
    #[test_case("OUT.TGA", ImageFormat::Tga)]
    #[test_case("preview.png", ImageFormat::Png)]
    #[test_case("preview.PNG", ImageFormat::Png)]
    #[test_case("preview.bmp", ImageFormat::Tga)]
    #[test_case("preview", ImageFormat::Tga)]
    fn picks_format_from_extension(path: &str, expected: ImageFormat) {
        assert_eq!(ImageFormat::from_path(Path::new(path)), expected);
    }

    #[test]
    fn png_sink_checks_buffer_size() {
        let dir = tempfile::tempdir().unwrap();
        let err = PngSink
            .write(&dir.path().join("bad.png"), 2, 2, &[0; 15])
            .unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 16, actual: 15 }));
    }

    #[test]
    fn tga_sink_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.tga");
        let err = TgaSink.write(&path, 1, 1, &[0; 4]).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
