use crate::reader::{Record, read_name};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io;

/// Body part directory entry (76 bytes on disk)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPartRecord {
    pub name: String,
    pub num_models: i32,
    /// Stride used to combine body group selections into one index
    pub base: i32,
    pub model_index: i32,
}

impl Record for BodyPartRecord {
    const SIZE: usize = 76;
    const NAME: &'static str = "body part";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        Ok(Self {
            name: read_name::<64>(reader)?,
            num_models: reader.read_i32::<LittleEndian>()?,
            base: reader.read_i32::<LittleEndian>()?,
            model_index: reader.read_i32::<LittleEndian>()?,
        })
    }
}

/// Sub-model directory entry (112 bytes on disk)
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    pub name: String,
    pub model_type: i32,
    pub bounding_radius: f32,

    pub num_mesh: i32,
    pub mesh_index: i32,

    pub num_verts: i32,
    /// Per-vertex bone index table (`u8` each)
    pub vert_info_index: i32,
    pub vert_index: i32,

    pub num_norms: i32,
    /// Per-normal bone index table (`u8` each)
    pub norm_info_index: i32,
    pub norm_index: i32,

    /// Deformation groups, unused by the format's own tools
    pub num_groups: i32,
    pub group_index: i32,
}

impl Record for ModelRecord {
    const SIZE: usize = 112;
    const NAME: &'static str = "model";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        let name = read_name::<64>(reader)?;
        let model_type = reader.read_i32::<LittleEndian>()?;
        let bounding_radius = reader.read_f32::<LittleEndian>()?;

        let mut int = || reader.read_i32::<LittleEndian>();
        Ok(Self {
            name,
            model_type,
            bounding_radius,
            num_mesh: int()?,
            mesh_index: int()?,
            num_verts: int()?,
            vert_info_index: int()?,
            vert_index: int()?,
            num_norms: int()?,
            norm_info_index: int()?,
            norm_index: int()?,
            num_groups: int()?,
            group_index: int()?,
        })
    }
}

/// Mesh directory entry (20 bytes on disk)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshRecord {
    /// Number of triangles the command stream expands to
    pub num_tris: i32,
    /// Offset of the triangle command stream
    pub tri_index: i32,
    /// Index into the skin reference table
    pub skin_ref: i32,
    pub num_norms: i32,
    pub norm_index: i32,
}

impl Record for MeshRecord {
    const SIZE: usize = 20;
    const NAME: &'static str = "mesh";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        let mut int = || reader.read_i32::<LittleEndian>();
        Ok(Self {
            num_tris: int()?,
            tri_index: int()?,
            skin_ref: int()?,
            num_norms: int()?,
            norm_index: int()?,
        })
    }
}
