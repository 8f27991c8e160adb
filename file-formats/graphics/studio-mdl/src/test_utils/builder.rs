//! Synthetic studio model files
//!
//! Produces byte buffers with the exact on-disk layout the decoder expects,
//! so tests can describe a model (bones, textures, body parts, meshes) instead
//! of shipping binary fixtures.

use crate::chunks::{StudioBone, TextureFlags};
use crate::header::{SEQUENCE_MAGIC, STUDIO_MAGIC, STUDIO_VERSION};
use glam::Vec3;

const HEADER_SIZE: usize = 244;
const SEQUENCE_HEADER_SIZE: usize = 76;

/// A palette texture to embed in the file
#[derive(Debug, Clone)]
pub struct TextureSpec {
    pub name: String,
    pub flags: TextureFlags,
    pub width: i32,
    pub height: i32,
    /// `width * height` palette indices
    pub indices: Vec<u8>,
    /// Up to 256 RGB entries; missing entries are black
    pub palette: Vec<[u8; 3]>,
}

impl TextureSpec {
    pub fn new(name: &str, width: i32, height: i32, indices: Vec<u8>, palette: Vec<[u8; 3]>) -> Self {
        Self {
            name: name.to_string(),
            flags: TextureFlags::empty(),
            width,
            height,
            indices,
            palette,
        }
    }

    /// Every texel uses palette entry 0 with color `rgb`.
    pub fn solid(name: &str, width: i32, height: i32, rgb: [u8; 3]) -> Self {
        let count = (width.max(0) * height.max(0)) as usize;
        Self::new(name, width, height, vec![0; count], vec![rgb])
    }

    pub fn flags(mut self, flags: TextureFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A mesh: skin reference plus raw triangle command words
#[derive(Debug, Clone)]
pub struct MeshSpec {
    pub skin_ref: i32,
    /// Command words including the terminating zero
    pub commands: Vec<i16>,
}

impl MeshSpec {
    /// A single strip of `(vertex, normal, s, t)` records.
    pub fn strip(skin_ref: i32, vertices: &[(i16, i16, i16, i16)]) -> Self {
        Self::runs(skin_ref, &[(vertices.len() as i16, vertices)])
    }

    /// A single fan of `(vertex, normal, s, t)` records.
    pub fn fan(skin_ref: i32, vertices: &[(i16, i16, i16, i16)]) -> Self {
        Self::runs(skin_ref, &[(-(vertices.len() as i16), vertices)])
    }

    /// Several runs; each run length is positive for strips, negative for fans.
    pub fn runs(skin_ref: i32, runs: &[(i16, &[(i16, i16, i16, i16)])]) -> Self {
        let mut commands = Vec::new();
        for (length, vertices) in runs {
            commands.push(*length);
            for &(vertex, normal, s, t) in *vertices {
                commands.extend_from_slice(&[vertex, normal, s, t]);
            }
        }
        commands.push(0);
        Self { skin_ref, commands }
    }

    /// Raw command words, written as given.
    pub fn raw(skin_ref: i32, commands: Vec<i16>) -> Self {
        Self { skin_ref, commands }
    }

    fn triangle_count(&self) -> i32 {
        let mut count = 0;
        let mut words = self.commands.iter();
        while let Some(&length) = words.next() {
            if length == 0 {
                break;
            }
            let n = length.unsigned_abs() as i32;
            count += (n - 2).max(0);
            for _ in 0..n * 4 {
                words.next();
            }
        }
        count
    }
}

/// One sub-model with its vertex tables and meshes
#[derive(Debug, Clone, Default)]
pub struct ModelSpec {
    pub name: String,
    pub vertices: Vec<Vec3>,
    /// Bone of each vertex; missing entries default to bone 0
    pub vertex_bones: Vec<u8>,
    pub normals: Vec<Vec3>,
    pub meshes: Vec<MeshSpec>,
}

impl ModelSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn vertices(mut self, vertices: &[Vec3]) -> Self {
        self.vertices = vertices.to_vec();
        self
    }

    pub fn vertex_bones(mut self, bones: &[u8]) -> Self {
        self.vertex_bones = bones.to_vec();
        self
    }

    pub fn normals(mut self, normals: &[Vec3]) -> Self {
        self.normals = normals.to_vec();
        self
    }

    pub fn mesh(mut self, mesh: MeshSpec) -> Self {
        self.meshes.push(mesh);
        self
    }
}

#[derive(Debug, Clone)]
struct SequenceSpec {
    label: String,
    bbmin: Vec3,
    bbmax: Vec3,
}

/// Builder for complete model files
#[derive(Debug, Clone)]
pub struct StudioFileBuilder {
    name: String,
    bbmin: Vec3,
    bbmax: Vec3,
    bones: Vec<StudioBone>,
    textures: Vec<TextureSpec>,
    skin_refs: Option<Vec<u16>>,
    body_parts: Vec<(String, Vec<ModelSpec>)>,
    sequences: Vec<SequenceSpec>,
    sequence_groups: usize,
}

impl StudioFileBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bbmin: Vec3::ZERO,
            bbmax: Vec3::ZERO,
            bones: Vec::new(),
            textures: Vec::new(),
            skin_refs: None,
            body_parts: Vec::new(),
            sequences: Vec::new(),
            sequence_groups: 1,
        }
    }

    /// Header `bbmin`/`bbmax`
    pub fn bounds(mut self, min: Vec3, max: Vec3) -> Self {
        self.bbmin = min;
        self.bbmax = max;
        self
    }

    pub fn bone(mut self, bone: StudioBone) -> Self {
        self.bones.push(bone);
        self
    }

    pub fn texture(mut self, texture: TextureSpec) -> Self {
        self.textures.push(texture);
        self
    }

    /// Skin table of the single skin family; defaults to `0..textures`
    pub fn skin_refs(mut self, refs: &[u16]) -> Self {
        self.skin_refs = Some(refs.to_vec());
        self
    }

    pub fn body_part(mut self, name: &str, models: Vec<ModelSpec>) -> Self {
        self.body_parts.push((name.to_string(), models));
        self
    }

    pub fn sequence(mut self, label: &str, bbmin: Vec3, bbmax: Vec3) -> Self {
        self.sequences.push(SequenceSpec {
            label: label.to_string(),
            bbmin,
            bbmax,
        });
        self
    }

    /// Number of sequence groups, including the one stored in the model
    pub fn sequence_groups(mut self, count: usize) -> Self {
        self.sequence_groups = count;
        self
    }

    /// Header of an external sequence-group file.
    pub fn sequence_group(name: &str) -> Vec<u8> {
        let mut out = Vec::with_capacity(SEQUENCE_HEADER_SIZE);
        put_u32(&mut out, SEQUENCE_MAGIC);
        put_i32(&mut out, STUDIO_VERSION);
        put_name(&mut out, name, 64);
        put_i32(&mut out, SEQUENCE_HEADER_SIZE as i32);
        out
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_SIZE];

        let bone_index = out.len();
        for bone in &self.bones {
            write_bone(&mut out, bone);
        }

        let texture_index = out.len();
        out.resize(out.len() + self.textures.len() * 80, 0);
        let texture_data_index = out.len();
        for (i, texture) in self.textures.iter().enumerate() {
            let data_offset = out.len();
            out.extend_from_slice(&texture.indices);
            for entry in 0..256 {
                let rgb = texture.palette.get(entry).copied().unwrap_or([0, 0, 0]);
                out.extend_from_slice(&rgb);
            }

            let mut record = Vec::with_capacity(80);
            put_name(&mut record, &texture.name, 64);
            put_i32(&mut record, texture.flags.bits());
            put_i32(&mut record, texture.width);
            put_i32(&mut record, texture.height);
            put_i32(&mut record, data_offset as i32);
            let at = texture_index + i * 80;
            out[at..at + 80].copy_from_slice(&record);
        }

        let skin_refs = self
            .skin_refs
            .clone()
            .unwrap_or_else(|| (0..self.textures.len() as u16).collect());
        align(&mut out);
        let skin_index = out.len();
        for skin in &skin_refs {
            out.extend_from_slice(&skin.to_le_bytes());
        }
        align(&mut out);

        let seq_index = out.len();
        for sequence in &self.sequences {
            write_sequence(&mut out, sequence);
        }

        let seq_group_index = out.len();
        for group in 0..self.sequence_groups {
            put_name(&mut out, if group == 0 { "default" } else { "" }, 32);
            put_name(&mut out, &format!("{}{:02}", self.name, group), 64);
            put_i32(&mut out, 0);
            put_i32(&mut out, 0);
        }

        let mut part_records = Vec::new();
        for (name, models) in &self.body_parts {
            let records: Vec<Vec<u8>> = models.iter().map(|model| write_model(&mut out, model)).collect();
            let model_index = out.len();
            for record in records {
                out.extend_from_slice(&record);
            }

            let mut part = Vec::with_capacity(76);
            put_name(&mut part, name, 64);
            put_i32(&mut part, models.len() as i32);
            put_i32(&mut part, 1);
            put_i32(&mut part, model_index as i32);
            part_records.push(part);
        }
        let body_part_index = out.len();
        for part in part_records {
            out.extend_from_slice(&part);
        }

        let mut header = Vec::with_capacity(HEADER_SIZE);
        put_u32(&mut header, STUDIO_MAGIC);
        put_i32(&mut header, STUDIO_VERSION);
        put_name(&mut header, &self.name, 64);
        put_i32(&mut header, out.len() as i32);
        for v in [Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, self.bbmin, self.bbmax] {
            put_vec3(&mut header, v);
        }
        let ints = [
            0, // flags
            self.bones.len() as i32,
            bone_index as i32,
            0, // bone controllers
            0,
            0, // hitboxes
            0,
            self.sequences.len() as i32,
            seq_index as i32,
            self.sequence_groups as i32,
            seq_group_index as i32,
            self.textures.len() as i32,
            texture_index as i32,
            texture_data_index as i32,
            skin_refs.len() as i32,
            1, // skin families
            skin_index as i32,
            self.body_parts.len() as i32,
            body_part_index as i32,
            0, // attachments
            0,
            0, // sounds
            0,
            0,
            0,
            0, // transitions
            0,
        ];
        for value in ints {
            put_i32(&mut header, value);
        }
        debug_assert_eq!(header.len(), HEADER_SIZE);
        out[..HEADER_SIZE].copy_from_slice(&header);
        out
    }
}

/// Writes the tables and meshes of a model, returning its 112-byte record.
fn write_model(out: &mut Vec<u8>, model: &ModelSpec) -> Vec<u8> {
    let vert_index = out.len();
    for v in &model.vertices {
        put_vec3(out, *v);
    }
    let vert_info_index = out.len();
    for i in 0..model.vertices.len() {
        out.push(model.vertex_bones.get(i).copied().unwrap_or(0));
    }
    align(out);

    let norm_index = out.len();
    for n in &model.normals {
        put_vec3(out, *n);
    }
    let norm_info_index = out.len();
    out.resize(out.len() + model.normals.len(), 0);
    align(out);

    let mut meshes = Vec::new();
    for mesh in &model.meshes {
        let tri_index = out.len();
        for word in &mesh.commands {
            out.extend_from_slice(&word.to_le_bytes());
        }
        align(out);
        meshes.push((mesh.triangle_count(), tri_index, mesh.skin_ref));
    }

    let mesh_index = out.len();
    for (num_tris, tri_index, skin_ref) in meshes {
        for value in [num_tris, tri_index as i32, skin_ref, 0, 0] {
            put_i32(out, value);
        }
    }

    let mut record = Vec::with_capacity(112);
    put_name(&mut record, &model.name, 64);
    put_i32(&mut record, 0);
    put_f32(&mut record, 0.0);
    for value in [
        model.meshes.len() as i32,
        mesh_index as i32,
        model.vertices.len() as i32,
        vert_info_index as i32,
        vert_index as i32,
        model.normals.len() as i32,
        norm_info_index as i32,
        norm_index as i32,
        0,
        0,
    ] {
        put_i32(&mut record, value);
    }
    record
}

fn write_bone(out: &mut Vec<u8>, bone: &StudioBone) {
    put_name(out, &bone.name, 32);
    put_i32(out, bone.parent);
    put_i32(out, bone.flags);
    for controller in bone.controllers {
        put_i32(out, controller);
    }
    for v in [bone.position, bone.rotation, bone.position_scale, bone.rotation_scale] {
        put_vec3(out, v);
    }
}

fn write_sequence(out: &mut Vec<u8>, sequence: &SequenceSpec) {
    let start = out.len();
    put_name(out, &sequence.label, 32);
    put_f32(out, 30.0);
    // flags, activity, actweight, numevents, eventindex
    for _ in 0..5 {
        put_i32(out, 0);
    }
    put_i32(out, 1); // numframes
    // numpivots, pivotindex, motiontype, motionbone
    for _ in 0..4 {
        put_i32(out, 0);
    }
    put_vec3(out, Vec3::ZERO);
    put_i32(out, 0);
    put_i32(out, 0);
    put_vec3(out, sequence.bbmin);
    put_vec3(out, sequence.bbmax);
    put_i32(out, 1); // numblends
    // animindex, blendtype[2], blendstart[2], blendend[2], blendparent,
    // seqgroup, entrynode, exitnode, nodeflags, nextseq
    out.resize(out.len() + 13 * 4, 0);
    debug_assert_eq!(out.len() - start, 176);
}

fn align(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

fn put_name(out: &mut Vec<u8>, name: &str, width: usize) {
    let bytes = name.as_bytes();
    let len = bytes.len().min(width - 1);
    out.extend_from_slice(&bytes[..len]);
    out.resize(out.len() + width - len, 0);
}

fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_f32(out: &mut Vec<u8>, value: f32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_vec3(out: &mut Vec<u8>, value: Vec3) {
    for component in value.to_array() {
        put_f32(out, component);
    }
}
