//! Decoder for legacy studio model files (`IDST`, version 10).
//!
//! A studio model stores a bone hierarchy, palette-indexed textures and
//! skinned sub-models whose triangles are encoded as strip/fan command
//! streams. This crate validates the file, resolves bind-pose bone transforms,
//! expands textures to RGBA and rebuilds each sub-model as an indexed triangle
//! list in model space.
//!
//! ```rust,no_run
//! use studio_mdl::StudioModel;
//!
//! let model = StudioModel::load("models/barney.mdl")?;
//! println!("{} textures", model.textures().len());
//! for mesh in model.rendered_models().flat_map(|m| &m.meshes) {
//!     println!("{} triangles", mesh.triangle_count());
//! }
//! # Ok::<(), studio_mdl::MdlError>(())
//! ```

pub mod chunks;
pub mod common;
pub mod companion;
pub mod error;
pub mod header;
pub mod mesh;
pub mod model;
pub mod reader;
pub mod skeleton;
pub mod texture;
pub mod tricmd;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use common::Bounds;
pub use companion::{CompanionResolver, FsCompanions, MemoryCompanions, NoCompanions};
pub use error::{MdlError, MdlErrorKind, Result};
pub use header::{StudioHeader, STUDIO_MAGIC, STUDIO_VERSION, SEQUENCE_MAGIC};
pub use mesh::{Mesh, Model, Vertex};
pub use model::{BodyPart, BoundsSource, StudioModel, TextureSource};
pub use skeleton::Skeleton;
pub use texture::Texture;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
