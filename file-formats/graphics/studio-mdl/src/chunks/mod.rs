//! Fixed-size records referenced from the studio header

pub mod bodypart;
pub mod bone;
pub mod sequence;
pub mod texture;

pub use bodypart::{BodyPartRecord, MeshRecord, ModelRecord};
pub use bone::{NO_PARENT, StudioBone};
pub use sequence::{SequenceDesc, SequenceGroupRecord};
pub use texture::{TextureFlags, TextureRecord};
