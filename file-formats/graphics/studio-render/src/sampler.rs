//! Bilinear texture sampling with wrap-around addressing

use glam::Vec2;
use studio_mdl::Texture;

/// Color used for meshes without a usable texture
pub const NO_TEXTURE: [u8; 4] = [200, 200, 200, 255];

/// Samples `texture` at normalized `uv`, repeating outside `[0, 1)`.
pub fn sample(texture: Option<&Texture>, uv: Vec2) -> [u8; 4] {
    let Some(texture) = texture.filter(|t| !t.is_empty()) else {
        return NO_TEXTURE;
    };
    if !uv.is_finite() {
        return NO_TEXTURE;
    }

    let (width, height) = (texture.width as i64, texture.height as i64);
    let u = uv.x - uv.x.floor();
    let v = uv.y - uv.y.floor();

    // Texel centers sit at half-integer positions.
    let x = u * width as f32 - 0.5;
    let y = v * height as f32 - 0.5;
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);

    let x0 = (x0 as i64).rem_euclid(width);
    let y0 = (y0 as i64).rem_euclid(height);
    let x1 = (x0 + 1) % width;
    let y1 = (y0 + 1) % height;

    let texel = |x: i64, y: i64| {
        let at = (y as usize * texture.width as usize + x as usize) * 4;
        texture.rgba.get(at..at + 4)
    };
    let (Some(c00), Some(c10), Some(c01), Some(c11)) =
        (texel(x0, y0), texel(x1, y0), texel(x0, y1), texel(x1, y1))
    else {
        return NO_TEXTURE;
    };

    let mut out = [0u8; 4];
    for (channel, value) in out.iter_mut().enumerate() {
        let top = c00[channel] as f32 * (1.0 - fx) + c10[channel] as f32 * fx;
        let bottom = c01[channel] as f32 * (1.0 - fx) + c11[channel] as f32 * fx;
        *value = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}
