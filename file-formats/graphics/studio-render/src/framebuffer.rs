use custom_debug::Debug;
use mdl_utils::debug;

/// Initial depth of every pixel
pub const FAR_DEPTH: f32 = 1.0;

/// RGBA8 color buffer with a matching depth buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    #[debug(with = debug::byte_buffer_fmt)]
    color: Vec<u8>,
    #[debug(skip)]
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Creates a `width * height` buffer filled with `background` at far depth.
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            color: background.repeat(pixels),
            depth: vec![FAR_DEPTH; pixels],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn depth(&self, x: u32, y: u32) -> f32 {
        self.depth[self.offset(x, y)]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let at = self.offset(x, y) * 4;
        [
            self.color[at],
            self.color[at + 1],
            self.color[at + 2],
            self.color[at + 3],
        ]
    }

    /// Composites `source` over the stored pixel and records `depth`.
    pub fn blend(&mut self, x: u32, y: u32, source: [u8; 4], depth: f32) {
        let index = self.offset(x, y);
        let at = index * 4;
        let destination = self.pixel(x, y);
        self.color[at..at + 4].copy_from_slice(&blend_over(source, destination));
        self.depth[index] = depth;
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.color
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.color
    }
}

/// Non-premultiplied "source over" compositing.
pub fn blend_over(source: [u8; 4], destination: [u8; 4]) -> [u8; 4] {
    let source_alpha = source[3] as f32 / 255.0;
    let destination_alpha = destination[3] as f32 / 255.0;
    let out_alpha = source_alpha + destination_alpha * (1.0 - source_alpha);
    if out_alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |s: u8, d: u8| {
        let value =
            (s as f32 * source_alpha + d as f32 * destination_alpha * (1.0 - source_alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };

    [
        channel(source[0], destination[0]),
        channel(source[1], destination[1]),
        channel(source[2], destination[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}
