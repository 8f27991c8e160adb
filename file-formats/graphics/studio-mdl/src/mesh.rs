//! Skinned mesh assembly
//!
//! Turns the raw vertex/normal tables of one sub-model and the triangle
//! command streams of its meshes into an indexed triangle list. Positions and
//! normals are moved into model space by their bone's bind-pose world
//! transform, and identical vertices are shared between all meshes of the
//! sub-model.

use crate::chunks::{MeshRecord, ModelRecord};
use crate::error::{MdlError, Result};
use crate::reader::ByteView;
use crate::skeleton::Skeleton;
use crate::texture::Texture;
use crate::tricmd::{CommandReader, TriCommand, triangulate};
use custom_debug::Debug;
use glam::{Vec2, Vec3};
use log::trace;
use mdl_utils::debug;
use std::collections::HashMap;

/// A model-space vertex
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    /// Unit length, or zero when the source normal was zero
    pub normal: Vec3,
    /// Normalized texture coordinates
    pub uv: Vec2,
    pub bone: u8,
}

/// Triangles sharing one texture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mesh {
    /// Index into the model's texture list, `None` for untextured meshes
    pub texture: Option<usize>,
    /// Three entries per triangle, each indexing the owning model's vertices
    #[debug(with = debug::trimmed_collection_fmt)]
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One decoded sub-model of a body part
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub name: String,
    #[debug(with = debug::trimmed_collection_fmt)]
    pub vertices: Vec<Vertex>,
    pub meshes: Vec<Mesh>,
}

impl Model {
    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.indices.len()).sum()
    }
}

/// Hashable identity of a vertex.
///
/// Float fields compare by bit pattern with negative zero folded into zero,
/// matching `==` for every value a decoded file can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey([u32; 8], u8);

impl From<&Vertex> for VertexKey {
    fn from(v: &Vertex) -> Self {
        let bits = |value: f32| if value == 0.0 { 0 } else { value.to_bits() };
        Self(
            [
                bits(v.position.x),
                bits(v.position.y),
                bits(v.position.z),
                bits(v.normal.x),
                bits(v.normal.y),
                bits(v.normal.z),
                bits(v.uv.x),
                bits(v.uv.y),
            ],
            v.bone,
        )
    }
}

/// Deduplicating vertex store
#[derive(Debug, Clone, Default)]
pub struct VertexPool {
    vertices: Vec<Vertex>,
    lookup: HashMap<VertexKey, u32>,
}

impl VertexPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `vertex`, adding it if no equal vertex exists.
    pub fn insert(&mut self, vertex: Vertex) -> u32 {
        let next = self.vertices.len() as u32;
        let index = *self.lookup.entry(VertexKey::from(&vertex)).or_insert(next);
        if index == next {
            self.vertices.push(vertex);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

/// Skin reference table plus the textures it points into
#[derive(Debug, Clone, Copy)]
pub struct Skins<'a> {
    refs: &'a [u16],
    textures: &'a [Texture],
}

impl<'a> Skins<'a> {
    pub fn new(refs: &'a [u16], textures: &'a [Texture]) -> Self {
        Self { refs, textures }
    }

    /// Maps a mesh's skin reference to a texture index.
    ///
    /// Models without textures or without a skin table yield `None`. A
    /// reference outside a non-empty table is a format error.
    pub fn resolve(&self, skin_ref: i32) -> Result<Option<usize>> {
        if self.textures.is_empty() || self.refs.is_empty() {
            return Ok(None);
        }

        let texture = usize::try_from(skin_ref)
            .ok()
            .and_then(|slot| self.refs.get(slot))
            .ok_or_else(|| {
                MdlError::ReferenceError(format!(
                    "skin reference {} outside table of {}",
                    skin_ref,
                    self.refs.len()
                ))
            })?;

        let texture = *texture as usize;
        if texture >= self.textures.len() {
            return Err(MdlError::ReferenceError(format!(
                "skin reference {} names texture {} of {}",
                skin_ref,
                texture,
                self.textures.len()
            )));
        }
        Ok(Some(texture))
    }

    pub fn texture(&self, id: usize) -> Option<&'a Texture> {
        self.textures.get(id)
    }
}

/// Raw geometry tables of one sub-model
#[derive(Debug, Clone, Default)]
pub struct ModelTables {
    #[debug(with = debug::trimmed_collection_fmt)]
    pub positions: Vec<Vec3>,
    #[debug(with = debug::trimmed_collection_fmt)]
    pub normals: Vec<Vec3>,
    /// Bone index of each position
    #[debug(with = debug::trimmed_collection_fmt)]
    pub vertex_bones: Vec<u8>,
}

impl ModelTables {
    pub fn read(view: &ByteView<'_>, record: &ModelRecord) -> Result<Self> {
        Ok(Self {
            positions: view.table(record.vert_index, record.num_verts)?,
            normals: view.table(record.norm_index, record.num_norms)?,
            vertex_bones: view.table(record.vert_info_index, record.num_verts)?,
        })
    }
}

/// Builds the meshes of one sub-model into a shared vertex pool
#[derive(Debug)]
pub struct MeshAssembler<'a> {
    tables: ModelTables,
    skeleton: &'a Skeleton,
    skins: Skins<'a>,
    pool: VertexPool,
}

impl<'a> MeshAssembler<'a> {
    pub fn new(tables: ModelTables, skeleton: &'a Skeleton, skins: Skins<'a>) -> Self {
        Self {
            tables,
            skeleton,
            skins,
            pool: VertexPool::new(),
        }
    }

    /// Decodes one mesh's command stream from `view` into triangles.
    pub fn assemble(&mut self, view: &ByteView<'_>, record: &MeshRecord) -> Result<Mesh> {
        let texture = self.skins.resolve(record.skin_ref)?;
        let uv_scale = uv_scale(texture.and_then(|id| self.skins.texture(id)));

        let mut indices = Vec::new();
        let mut run_indices = Vec::new();

        for run in CommandReader::new(*view, record.tri_index) {
            let run = run?;
            run_indices.clear();
            for command in &run.vertices {
                let vertex = self.vertex(command, uv_scale)?;
                run_indices.push(self.pool.insert(vertex));
            }
            triangulate(run.kind, &run_indices, &mut indices);
        }

        trace!(
            "mesh skin {} -> texture {:?}: {} triangles, pool now {} vertices",
            record.skin_ref,
            texture,
            indices.len() / 3,
            self.pool.len()
        );

        Ok(Mesh { texture, indices })
    }

    fn vertex(&self, command: &TriCommand, uv_scale: Vec2) -> Result<Vertex> {
        let vertex = table_index(command.vertex, self.tables.positions.len(), "vertex")?;
        let normal = table_index(command.normal, self.tables.normals.len(), "normal")?;

        let raw_position = self.tables.positions[vertex];
        let raw_normal = self.tables.normals[normal].normalize_or_zero();
        let bone = self.tables.vertex_bones[vertex];

        let (position, normal) = match self.skeleton.world_transform(bone as usize) {
            Some(world) => (
                world.transform_point3(raw_position),
                world.transform_vector3(raw_normal).normalize_or_zero(),
            ),
            None => (raw_position, raw_normal),
        };

        Ok(Vertex {
            position,
            normal,
            uv: Vec2::new(command.s as f32, command.t as f32) * uv_scale,
            bone,
        })
    }

    /// Finishes the sub-model, handing over the vertex pool.
    pub fn finish(self, name: String, meshes: Vec<Mesh>) -> Model {
        Model {
            name,
            vertices: self.pool.into_vertices(),
            meshes,
        }
    }
}

/// Reads every mesh of a sub-model.
pub fn assemble_model(
    view: &ByteView<'_>,
    record: &ModelRecord,
    skeleton: &Skeleton,
    skins: Skins<'_>,
) -> Result<Model> {
    let tables = ModelTables::read(view, record)?;
    let mesh_records: Vec<MeshRecord> = view.table(record.mesh_index, record.num_mesh)?;

    let mut assembler = MeshAssembler::new(tables, skeleton, skins);
    let meshes = mesh_records
        .iter()
        .map(|mesh| assembler.assemble(view, mesh))
        .collect::<Result<Vec<_>>>()?;

    Ok(assembler.finish(record.name.clone(), meshes))
}

/// Converts texel coordinates into normalized ones for `texture`.
fn uv_scale(texture: Option<&Texture>) -> Vec2 {
    match texture {
        Some(texture) if !texture.is_empty() => {
            Vec2::new(1.0 / texture.width as f32, 1.0 / texture.height as f32)
        }
        _ => Vec2::ONE,
    }
}

fn table_index(index: i16, len: usize, what: &str) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| MdlError::ReferenceError(format!("{} index {} outside table of {}", what, index, len)))
}
