//! Image containers for finished renders

pub mod sink;
pub mod tga;

pub use sink::{ImageFormat, ImageSink, PngSink, TgaSink, write_image};
pub use tga::{TgaHeader, decode_tga, encode_tga};
