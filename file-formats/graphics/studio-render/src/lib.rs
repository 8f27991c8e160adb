//! Software rasterizer for static studio model previews.
//!
//! Takes a decoded [`studio_mdl::StudioModel`], places a camera by a simple
//! file name heuristic and fills its triangles into an RGBA8 framebuffer with
//! depth testing, perspective-correct bilinear texturing and alpha blending.
//!
//! ```rust,no_run
//! use studio_mdl::StudioModel;
//! use studio_render::{RenderOptions, render, write_image};
//!
//! let model = StudioModel::load("models/scientist.mdl")?;
//! let output = render(&model, &RenderOptions::default());
//! write_image("scientist.tga", &output)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod camera;
pub mod error;
pub mod framebuffer;
pub mod options;
pub mod output;
pub mod raster;
pub mod renderer;
pub mod sampler;

pub use camera::{Camera, CameraPolicy};
pub use error::{RenderError, Result};
pub use framebuffer::Framebuffer;
pub use options::{BackgroundPreset, RenderOptions, RenderStats};
pub use output::{ImageFormat, ImageSink, PngSink, TgaHeader, TgaSink, decode_tga, encode_tga, write_image};
pub use raster::{RenderOutput, Rasterizer};
pub use renderer::render;
