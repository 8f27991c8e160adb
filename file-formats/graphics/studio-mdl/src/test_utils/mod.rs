//! Helpers for writing tests against synthetic model files

pub mod builder;

pub use builder::{MeshSpec, ModelSpec, StudioFileBuilder, TextureSpec};
