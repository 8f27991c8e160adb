//! Loading a complete studio model
//!
//! [`StudioModel`] is produced by a single call that either returns a fully
//! decoded model or an error; there is no partially loaded state.

use crate::chunks::{
    BodyPartRecord, ModelRecord, SequenceDesc, SequenceGroupRecord, StudioBone, TextureRecord,
};
use crate::common::Bounds;
use crate::companion::{
    CompanionResolver, FsCompanions, sequence_group_path, texture_companion_path,
};
use crate::error::{MdlError, Result};
use crate::header::{SequenceHeader, StudioHeader};
use crate::mesh::{Model, Skins, assemble_model};
use crate::reader::ByteView;
use crate::skeleton::Skeleton;
use crate::texture::Texture;
use custom_debug::Debug;
use log::{debug, info, warn};
use mdl_utils::debug as trimmed;
use std::fs;
use std::path::{Path, PathBuf};

/// A named slot holding interchangeable sub-models
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodyPart {
    pub name: String,
    pub models: Vec<Model>,
}

impl BodyPart {
    /// The sub-model drawn for this body part (always the first one).
    pub fn rendered_model(&self) -> Option<&Model> {
        self.models.first()
    }
}

/// Where the model's bounding box came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsSource {
    /// `bbmin`/`bbmax` of the main header
    Header,
    /// Header bounds were empty; taken from the first sequence
    FirstSequence,
    /// Neither source had usable bounds
    Degenerate,
}

/// Where the model's textures came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// Stored in the model file
    Embedded,
    /// Stored in the `T` companion file at this path
    Companion(PathBuf),
}

/// A fully decoded studio model
#[derive(Debug, Clone)]
pub struct StudioModel {
    path: PathBuf,
    header: StudioHeader,
    #[debug(with = trimmed::byte_buffer_fmt)]
    data: Vec<u8>,
    #[debug(skip)]
    texture_data: Option<Vec<u8>>,
    texture_source: TextureSource,
    skeleton: Skeleton,
    textures: Vec<Texture>,
    skin_refs: Vec<u16>,
    sequences: Vec<SequenceDesc>,
    sequence_groups: Vec<SequenceGroupRecord>,
    sequence_groups_found: usize,
    body_parts: Vec<BodyPart>,
    bounds: Bounds,
    bounds_source: BoundsSource,
}

impl StudioModel {
    /// Loads a model and its companion files from disk.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use studio_mdl::StudioModel;
    ///
    /// let model = StudioModel::load("models/scientist.mdl")?;
    /// for part in model.body_parts() {
    ///     println!("{}: {} sub-models", part.name, part.models.len());
    /// }
    /// # Ok::<(), studio_mdl::MdlError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| MdlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, data, &FsCompanions)
    }

    /// Decodes a model from memory.
    ///
    /// `path` is used to derive companion file names, which are fetched
    /// through `companions`.
    pub fn from_bytes<P: Into<PathBuf>>(
        path: P,
        data: Vec<u8>,
        companions: &dyn CompanionResolver,
    ) -> Result<Self> {
        let path = path.into();
        if data.is_empty() {
            return Err(MdlError::EmptyFile(path));
        }

        let view = ByteView::new(&data);
        let header = StudioHeader::parse(&view)?;
        debug!(
            "'{}' ({} bytes): {} bones, {} textures, {} body parts, {} sequences",
            header.name,
            data.len(),
            header.num_bones,
            header.num_textures,
            header.num_body_parts,
            header.num_seq
        );

        let companion = if header.num_textures == 0 {
            load_texture_companion(&path, companions)
        } else {
            None
        };

        let companion = companion.and_then(|(bytes, texture_header, companion_path)| {
            let decoded = read_textures(&ByteView::new(&bytes), &texture_header);
            match decoded {
                Ok(decoded) => Some((bytes, decoded, companion_path)),
                Err(err) => {
                    warn!(
                        "Ignoring textures of companion '{}': {}",
                        companion_path.display(),
                        err
                    );
                    None
                }
            }
        });

        let (texture_data, texture_source, (textures, skin_refs)) = match companion {
            Some((bytes, decoded, companion_path)) => (
                Some(bytes),
                TextureSource::Companion(companion_path),
                decoded,
            ),
            None => (None, TextureSource::Embedded, read_textures(&view, &header)?),
        };

        let bones: Vec<StudioBone> = view.table(header.bone_index, header.num_bones)?;
        let skeleton = Skeleton::resolve(bones)?;

        let sequences: Vec<SequenceDesc> = view.table(header.seq_index, header.num_seq)?;
        let sequence_groups: Vec<SequenceGroupRecord> =
            view.table(header.seq_group_index, header.num_seq_groups)?;
        let sequence_groups_found = count_sequence_groups(&path, sequence_groups.len(), companions);

        let (bounds, bounds_source) = model_bounds(&header, &sequences);

        let skins = Skins::new(&skin_refs, &textures);
        let part_records: Vec<BodyPartRecord> =
            view.table(header.body_part_index, header.num_body_parts)?;
        let mut body_parts = Vec::with_capacity(part_records.len());
        for part in &part_records {
            let model_records: Vec<ModelRecord> = view.table(part.model_index, part.num_models)?;
            let models = model_records
                .iter()
                .map(|record| assemble_model(&view, record, &skeleton, skins))
                .collect::<Result<Vec<_>>>()?;
            body_parts.push(BodyPart {
                name: part.name.clone(),
                models,
            });
        }

        if body_parts.is_empty() {
            return Err(MdlError::NoBodyParts);
        }

        info!(
            "Loaded '{}': {} body parts, {} textures, {} bones",
            path.display(),
            body_parts.len(),
            textures.len(),
            skeleton.len()
        );

        Ok(Self {
            path,
            header,
            data,
            texture_data,
            texture_source,
            skeleton,
            textures,
            skin_refs,
            sequences,
            sequence_groups,
            sequence_groups_found,
            body_parts,
            bounds,
            bounds_source,
        })
    }

    /// Path the model was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directory and extension, used for camera selection.
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Internal name stored in the header
    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn header(&self) -> &StudioHeader {
        &self.header
    }

    /// Raw bytes of the model file
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes of the texture companion, if one was used
    pub fn texture_data(&self) -> Option<&[u8]> {
        self.texture_data.as_deref()
    }

    pub fn texture_source(&self) -> &TextureSource {
        &self.texture_source
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Skin reference table of the first skin family
    pub fn skin_refs(&self) -> &[u16] {
        &self.skin_refs
    }

    pub fn sequences(&self) -> &[SequenceDesc] {
        &self.sequences
    }

    pub fn sequence_groups(&self) -> &[SequenceGroupRecord] {
        &self.sequence_groups
    }

    /// Number of external sequence-group files that were found and valid
    pub fn sequence_groups_found(&self) -> usize {
        self.sequence_groups_found
    }

    pub fn body_parts(&self) -> &[BodyPart] {
        &self.body_parts
    }

    /// The first sub-model of every body part.
    pub fn rendered_models(&self) -> impl Iterator<Item = &Model> {
        self.body_parts.iter().filter_map(BodyPart::rendered_model)
    }

    /// Declared bounding box (header, or first sequence as fallback)
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn bounds_source(&self) -> BoundsSource {
        self.bounds_source
    }

    /// Bounding box of the vertices of every sub-model of every body part.
    pub fn vertex_bounds(&self) -> Bounds {
        Bounds::from_points(
            self.body_parts
                .iter()
                .flat_map(|part| &part.models)
                .flat_map(|model| model.vertices.iter().map(|vertex| vertex.position)),
        )
    }
}

/// Loads and validates the `T` companion, returning `None` if unusable.
fn load_texture_companion(
    path: &Path,
    companions: &dyn CompanionResolver,
) -> Option<(Vec<u8>, StudioHeader, PathBuf)> {
    let companion_path = texture_companion_path(path);
    let bytes = match companions.load(&companion_path) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!("No texture companion: {}", err);
            return None;
        }
    };

    match StudioHeader::parse(&ByteView::new(&bytes)) {
        Ok(header) => {
            debug!(
                "Using texture companion '{}' with {} textures",
                companion_path.display(),
                header.num_textures
            );
            Some((bytes, header, companion_path))
        }
        Err(err) => {
            warn!(
                "Ignoring texture companion '{}': {}",
                companion_path.display(),
                err
            );
            None
        }
    }
}

/// Decodes every texture and the first skin family of a container.
fn read_textures(view: &ByteView<'_>, header: &StudioHeader) -> Result<(Vec<Texture>, Vec<u16>)> {
    let records: Vec<TextureRecord> = view.table(header.texture_index, header.num_textures)?;

    let textures = records
        .iter()
        .map(|record| {
            let size = record.block_size().ok_or(MdlError::NegativeCount {
                what: "texture dimension",
                count: record.width.min(record.height),
            })?;
            let block = view.slice("texture data", record.index as i64, size)?;
            Texture::decode(record, block)
        })
        .collect::<Result<Vec<_>>>()?;

    let skin_refs = if textures.is_empty() {
        Vec::new()
    } else {
        view.table(header.skin_index, header.num_skin_ref)?
    };

    Ok((textures, skin_refs))
}

/// Checks groups `1..count` for a valid companion file. They carry only
/// animation data, so missing ones are not an error.
fn count_sequence_groups(path: &Path, count: usize, companions: &dyn CompanionResolver) -> usize {
    let mut found = 0;
    for index in 1..count {
        let group_path = sequence_group_path(path, index);
        match companions
            .load(&group_path)
            .and_then(|bytes| SequenceHeader::parse(&ByteView::new(&bytes)))
        {
            Ok(header) => {
                debug!("Sequence group {} '{}' is valid", index, header.name);
                found += 1;
            }
            Err(err) => warn!("Sequence group '{}' unusable: {}", group_path.display(), err),
        }
    }
    found
}

fn model_bounds(header: &StudioHeader, sequences: &[SequenceDesc]) -> (Bounds, BoundsSource) {
    let declared = header.bounds();
    if !declared.is_degenerate() {
        return (declared, BoundsSource::Header);
    }

    match sequences.first() {
        Some(sequence) if !sequence.bounds().is_degenerate() => {
            debug!("Header bounds empty, using sequence '{}'", sequence.label);
            (sequence.bounds(), BoundsSource::FirstSequence)
        }
        Some(sequence) => (sequence.bounds(), BoundsSource::Degenerate),
        None => (declared, BoundsSource::Degenerate),
    }
}
