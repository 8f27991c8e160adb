use crate::common::Bounds;
use crate::error::{MdlError, Result};
use crate::reader::{ByteView, Record, read_name, read_vec3};
use bitflags::bitflags;
use byteorder::{LittleEndian, ReadBytesExt};
use glam::Vec3;
use std::io;

/// Magic signature of model and texture containers ("IDST")
pub const STUDIO_MAGIC: u32 = 0x5453_4449;

/// Magic signature of sequence-group containers ("IDSQ")
pub const SEQUENCE_MAGIC: u32 = 0x5153_4449;

/// The only format version this crate understands
pub const STUDIO_VERSION: i32 = 10;

bitflags! {
    /// Model-wide effect flags stored in the header
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ModelFlags: i32 {
        /// Leave a rocket trail
        const ROCKET = 0x0001;
        /// Leave a grenade trail
        const GRENADE = 0x0002;
        /// Leave a blood trail
        const GIB = 0x0004;
        /// Spin around the vertical axis
        const ROTATE = 0x0008;
        /// Green tracer
        const TRACER = 0x0010;
        /// Zombie blood trail
        const ZOMGIB = 0x0020;
        /// Orange tracer
        const TRACER2 = 0x0040;
        /// Purple tracer
        const TRACER3 = 0x0080;
        /// Skip shade lighting
        const NO_SHADE_LIGHT = 0x0100;
        /// Use hitboxes for collision
        const HITBOX_COLLISIONS = 0x0200;
        /// Force sky lighting
        const FORCE_SKYLIGHT = 0x0400;
    }
}

/// Main header of a studio model or texture container (244 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct StudioHeader {
    pub id: u32,
    pub version: i32,
    pub name: String,
    pub length: i32,

    pub eye_position: Vec3,
    pub min: Vec3,
    pub max: Vec3,
    pub bbmin: Vec3,
    pub bbmax: Vec3,

    pub flags: ModelFlags,

    pub num_bones: i32,
    pub bone_index: i32,
    pub num_bone_controllers: i32,
    pub bone_controller_index: i32,
    pub num_hitboxes: i32,
    pub hitbox_index: i32,
    pub num_seq: i32,
    pub seq_index: i32,
    pub num_seq_groups: i32,
    pub seq_group_index: i32,
    pub num_textures: i32,
    pub texture_index: i32,
    pub texture_data_index: i32,
    pub num_skin_ref: i32,
    pub num_skin_families: i32,
    pub skin_index: i32,
    pub num_body_parts: i32,
    pub body_part_index: i32,
    pub num_attachments: i32,
    pub attachment_index: i32,
    pub sound_table: i32,
    pub sound_index: i32,
    pub sound_groups: i32,
    pub sound_group_index: i32,
    pub num_transitions: i32,
    pub transition_index: i32,
}

impl Record for StudioHeader {
    const SIZE: usize = 244;
    const NAME: &'static str = "studio header";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        let mut int = || reader.read_i32::<LittleEndian>();
        let id = int()? as u32;
        let version = int()?;
        let name = read_name::<64>(reader)?;
        let length = reader.read_i32::<LittleEndian>()?;

        let eye_position = read_vec3(reader)?;
        let min = read_vec3(reader)?;
        let max = read_vec3(reader)?;
        let bbmin = read_vec3(reader)?;
        let bbmax = read_vec3(reader)?;

        let mut int = || reader.read_i32::<LittleEndian>();
        Ok(Self {
            id,
            version,
            name,
            length,
            eye_position,
            min,
            max,
            bbmin,
            bbmax,
            flags: ModelFlags::from_bits_retain(int()?),
            num_bones: int()?,
            bone_index: int()?,
            num_bone_controllers: int()?,
            bone_controller_index: int()?,
            num_hitboxes: int()?,
            hitbox_index: int()?,
            num_seq: int()?,
            seq_index: int()?,
            num_seq_groups: int()?,
            seq_group_index: int()?,
            num_textures: int()?,
            texture_index: int()?,
            texture_data_index: int()?,
            num_skin_ref: int()?,
            num_skin_families: int()?,
            skin_index: int()?,
            num_body_parts: int()?,
            body_part_index: int()?,
            num_attachments: int()?,
            attachment_index: int()?,
            sound_table: int()?,
            sound_index: int()?,
            sound_groups: int()?,
            sound_group_index: int()?,
            num_transitions: int()?,
            transition_index: int()?,
        })
    }
}

impl StudioHeader {
    /// Parses the header at the start of `view` and checks magic and version.
    pub fn parse(view: &ByteView<'_>) -> Result<Self> {
        let header: Self = view.record(0)?;
        check_signature(STUDIO_MAGIC, header.id, header.version)?;
        Ok(header)
    }

    /// Bounding box declared in the header (`bbmin`/`bbmax`).
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.bbmin, self.bbmax)
    }
}

/// Header of an external sequence-group container (76 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceHeader {
    pub id: u32,
    pub version: i32,
    pub name: String,
    pub length: i32,
}

impl Record for SequenceHeader {
    const SIZE: usize = 76;
    const NAME: &'static str = "sequence header";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        Ok(Self {
            id: reader.read_u32::<LittleEndian>()?,
            version: reader.read_i32::<LittleEndian>()?,
            name: read_name::<64>(reader)?,
            length: reader.read_i32::<LittleEndian>()?,
        })
    }
}

impl SequenceHeader {
    pub fn parse(view: &ByteView<'_>) -> Result<Self> {
        let header: Self = view.record(0)?;
        check_signature(SEQUENCE_MAGIC, header.id, header.version)?;
        Ok(header)
    }
}

fn check_signature(expected: u32, actual: u32, version: i32) -> Result<()> {
    if actual != expected {
        return Err(MdlError::InvalidMagic { expected, actual });
    }
    if version != STUDIO_VERSION {
        return Err(MdlError::UnsupportedVersion {
            expected: STUDIO_VERSION,
            actual: version,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StudioFileBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_builder_header() {
        let data = StudioFileBuilder::new("box")
            .bounds(Vec3::splat(-1.0), Vec3::splat(1.0))
            .build();
        let header = StudioHeader::parse(&ByteView::new(&data)).unwrap();

        assert_eq!(header.id, STUDIO_MAGIC);
        assert_eq!(header.version, STUDIO_VERSION);
        assert_eq!(header.name, "box");
        assert_eq!(header.length as usize, data.len());
        assert_eq!(header.bounds(), Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut data = StudioFileBuilder::new("box").build();
        data[0] = b'X';
        let err = StudioHeader::parse(&ByteView::new(&data)).unwrap_err();
        assert!(matches!(err, MdlError::InvalidMagic { expected: STUDIO_MAGIC, .. }));
    }

    #[test]
    fn rejects_wrong_version() {
        let mut data = StudioFileBuilder::new("box").build();
        data[4..8].copy_from_slice(&11i32.to_le_bytes());
        let err = StudioHeader::parse(&ByteView::new(&data)).unwrap_err();
        assert!(matches!(err, MdlError::UnsupportedVersion { actual: 11, .. }));
    }

    #[test]
    fn short_buffer_is_out_of_bounds() {
        let err = StudioHeader::parse(&ByteView::new(&[0u8; 100])).unwrap_err();
        assert!(matches!(err, MdlError::OutOfBounds { size: 244, .. }));
    }

    #[test]
    fn sequence_header_needs_idsq() {
        let data = StudioFileBuilder::sequence_group("anim01");
        let header = SequenceHeader::parse(&ByteView::new(&data)).unwrap();
        assert_eq!(header.name, "anim01");

        let main = StudioFileBuilder::new("box").build();
        assert!(SequenceHeader::parse(&ByteView::new(&main)).is_err());
    }
}
