use std::fmt;
use std::str::FromStr;

/// Image size used when nothing else is requested
pub const DEFAULT_SIZE: i32 = 256;

/// Solid fill behind the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundPreset {
    /// Opaque blue (51, 102, 204)
    #[default]
    Blue,
    /// Opaque green (0, 255, 0), useful for keying
    Green,
    /// Fully transparent black
    Transparent,
}

impl BackgroundPreset {
    pub fn rgba(self) -> [u8; 4] {
        match self {
            Self::Blue => [51, 102, 204, 255],
            Self::Green => [0, 255, 0, 255],
            Self::Transparent => [0, 0, 0, 0],
        }
    }
}

impl FromStr for BackgroundPreset {
    type Err = String;

    /// Accepts the preset name, its first letter or its index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blue" | "b" | "0" => Ok(Self::Blue),
            "green" | "g" | "1" => Ok(Self::Green),
            "transparent" | "t" | "2" => Ok(Self::Transparent),
            other => Err(format!(
                "unknown background '{}' (expected blue, green or transparent)",
                other
            )),
        }
    }
}

impl fmt::Display for BackgroundPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Transparent => "transparent",
        })
    }
}

/// Render settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Requested width; values below 1 are treated as 1
    pub width: i32,
    /// Requested height; values below 1 are treated as 1
    pub height: i32,
    pub background: BackgroundPreset,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            background: BackgroundPreset::default(),
        }
    }
}

impl RenderOptions {
    pub fn new(width: i32, height: i32, background: BackgroundPreset) -> Self {
        Self {
            width,
            height,
            background,
        }
    }

    /// Output size with both sides clamped to at least one pixel.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width.max(1) as u32, self.height.max(1) as u32)
    }
}

/// Counters collected while rasterizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Triangles submitted, including skipped ones
    pub triangles: usize,
    /// Triangles skipped for zero area, `w == 0` or bad indices
    pub degenerate: usize,
    /// Pixels that received a blended sample
    pub pixels_written: usize,
}
