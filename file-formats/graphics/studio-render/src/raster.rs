//! Edge-function triangle rasterizer.
//!
//! Triangles are filled by walking their clamped pixel bounding box and
//! testing each pixel center against the three edge functions. Depth is
//! interpolated affinely in screen space; texture coordinates are
//! interpolated perspective-correctly through `1/w`.

use crate::framebuffer::Framebuffer;
use crate::options::{BackgroundPreset, RenderStats};
use crate::sampler;
use custom_debug::Debug;
use glam::{Mat4, Vec2, Vec4};
use mdl_utils::debug;
use studio_mdl::{Mesh, Texture, Vertex};

/// Finished image
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, top row first
    #[debug(with = debug::byte_buffer_fmt)]
    pub rgba: Vec<u8>,
    pub stats: RenderStats,
}

impl RenderOutput {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        let texel = self.rgba.get(at..at + 4)?;
        Some([texel[0], texel[1], texel[2], texel[3]])
    }
}

/// A vertex after projection and viewport mapping
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenVertex {
    position: Vec2,
    depth: f32,
    inv_w: f32,
    /// UV pre-multiplied by `inv_w`
    uv_over_w: Vec2,
}

/// Signed double area of `(a, b, p)`
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).perp_dot(p - a)
}

#[derive(Debug)]
pub struct Rasterizer {
    framebuffer: Framebuffer,
    stats: RenderStats,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, background: BackgroundPreset) -> Self {
        Self {
            framebuffer: Framebuffer::new(width.max(1), height.max(1), background.rgba()),
            stats: RenderStats::default(),
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Draws every triangle of `mesh`, indexing into `vertices`.
    pub fn draw_mesh(
        &mut self,
        vertices: &[Vertex],
        mesh: &Mesh,
        texture: Option<&Texture>,
        mvp: &Mat4,
    ) {
        for triangle in mesh.indices.chunks_exact(3) {
            let corners = [
                vertices.get(triangle[0] as usize),
                vertices.get(triangle[1] as usize),
                vertices.get(triangle[2] as usize),
            ];
            let [Some(a), Some(b), Some(c)] = corners else {
                log::trace!("Skipping triangle with bad indices {:?}", triangle);
                self.stats.triangles += 1;
                self.stats.degenerate += 1;
                continue;
            };

            let clip = [a, b, c].map(|v| *mvp * v.position.extend(1.0));
            self.draw_triangle(clip, [a.uv, b.uv, c.uv], texture);
        }
    }

    /// Draws one triangle given clip-space positions.
    pub fn draw_triangle(&mut self, clip: [Vec4; 3], uv: [Vec2; 3], texture: Option<&Texture>) {
        self.stats.triangles += 1;

        let projected = [
            self.project(clip[0], uv[0]),
            self.project(clip[1], uv[1]),
            self.project(clip[2], uv[2]),
        ];
        let [Some(a), Some(b), Some(c)] = projected else {
            self.stats.degenerate += 1;
            return;
        };

        let area = edge(a.position, b.position, c.position);
        if area == 0.0 || !area.is_finite() {
            self.stats.degenerate += 1;
            return;
        }
        // Back-facing under the mirrored world transform.
        if area > 0.0 {
            return;
        }

        let Some((min_x, min_y, max_x, max_y)) = self.pixel_bounds(&a, &b, &c) else {
            return;
        };

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b.position, c.position, p);
                let w1 = edge(c.position, a.position, p);
                let w2 = edge(a.position, b.position, p);
                let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                    || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
                if !inside {
                    continue;
                }

                let (b0, b1, b2) = (w0 / area, w1 / area, w2 / area);

                let inv_w = b0 * a.inv_w + b1 * b.inv_w + b2 * c.inv_w;
                if inv_w <= 0.0 {
                    continue;
                }

                let depth = b0 * a.depth + b1 * b.depth + b2 * c.depth;
                if !(0.0..=1.0).contains(&depth) || depth >= self.framebuffer.depth(x, y) {
                    continue;
                }

                let uv = (a.uv_over_w * b0 + b.uv_over_w * b1 + c.uv_over_w * b2) / inv_w;
                let color = sampler::sample(texture, uv);
                if color[3] == 0 {
                    continue;
                }

                self.framebuffer.blend(x, y, color, depth);
                self.stats.pixels_written += 1;
            }
        }
    }

    /// Perspective divide and viewport mapping with row 0 at the top.
    fn project(&self, clip: Vec4, uv: Vec2) -> Option<ScreenVertex> {
        if clip.w == 0.0 {
            return None;
        }
        let inv_w = 1.0 / clip.w;
        let ndc = clip.truncate() * inv_w;
        let max_x = (self.framebuffer.width() - 1) as f32;
        let max_y = (self.framebuffer.height() - 1) as f32;

        Some(ScreenVertex {
            position: Vec2::new(
                (ndc.x * 0.5 + 0.5) * max_x,
                (1.0 - (ndc.y * 0.5 + 0.5)) * max_y,
            ),
            depth: ndc.z,
            inv_w,
            uv_over_w: uv * inv_w,
        })
    }

    /// Integer pixel box around the triangle, clamped to the framebuffer.
    fn pixel_bounds(
        &self,
        a: &ScreenVertex,
        b: &ScreenVertex,
        c: &ScreenVertex,
    ) -> Option<(u32, u32, u32, u32)> {
        let max_x = (self.framebuffer.width() - 1) as f32;
        let max_y = (self.framebuffer.height() - 1) as f32;

        let low = a.position.min(b.position).min(c.position).floor();
        let high = a.position.max(b.position).max(c.position).ceil();
        let (x0, y0) = (low.x.max(0.0), low.y.max(0.0));
        let (x1, y1) = (high.x.min(max_x), high.y.min(max_y));
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    pub fn finish(self) -> RenderOutput {
        RenderOutput {
            width: self.framebuffer.width(),
            height: self.framebuffer.height(),
            stats: self.stats,
            rgba: self.framebuffer.into_rgba(),
        }
    }
}
