use crate::common::Bounds;
use crate::reader::{Record, read_name, read_vec3, skip};
use byteorder::{LittleEndian, ReadBytesExt};
use glam::Vec3;
use std::io;

/// Animation sequence descriptor (176 bytes on disk)
///
/// Only the fields useful without animation playback are kept; events,
/// pivots, blend controls and transition nodes are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDesc {
    pub label: String,
    pub fps: f32,
    pub flags: i32,
    pub activity: i32,
    pub activity_weight: i32,
    pub num_frames: i32,
    pub linear_movement: Vec3,
    pub bbmin: Vec3,
    pub bbmax: Vec3,
    pub num_blends: i32,
    /// Sequence group holding this sequence's animation data
    pub seq_group: i32,
}

impl SequenceDesc {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.bbmin, self.bbmax)
    }
}

impl Record for SequenceDesc {
    const SIZE: usize = 176;
    const NAME: &'static str = "sequence";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        let label = read_name::<32>(reader)?;
        let fps = reader.read_f32::<LittleEndian>()?;
        let flags = reader.read_i32::<LittleEndian>()?;
        let activity = reader.read_i32::<LittleEndian>()?;
        let activity_weight = reader.read_i32::<LittleEndian>()?;
        // numevents, eventindex
        skip(reader, 8)?;
        let num_frames = reader.read_i32::<LittleEndian>()?;
        // numpivots, pivotindex, motiontype, motionbone
        skip(reader, 16)?;
        let linear_movement = read_vec3(reader)?;
        // automoveposindex, automoveangleindex
        skip(reader, 8)?;
        let bbmin = read_vec3(reader)?;
        let bbmax = read_vec3(reader)?;
        let num_blends = reader.read_i32::<LittleEndian>()?;
        // animindex, blendtype[2], blendstart[2], blendend[2], blendparent
        skip(reader, 32)?;
        let seq_group = reader.read_i32::<LittleEndian>()?;
        // entrynode, exitnode, nodeflags, nextseq
        skip(reader, 16)?;

        Ok(Self {
            label,
            fps,
            flags,
            activity,
            activity_weight,
            num_frames,
            linear_movement,
            bbmin,
            bbmax,
            num_blends,
            seq_group,
        })
    }
}

/// Sequence group directory entry (104 bytes on disk)
///
/// Group 0 lives in the model file itself; the others are stored in
/// companion files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceGroupRecord {
    pub label: String,
    /// File name recorded by the model compiler
    pub name: String,
    pub data: i32,
}

impl Record for SequenceGroupRecord {
    const SIZE: usize = 104;
    const NAME: &'static str = "sequence group";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        let label = read_name::<32>(reader)?;
        let name = read_name::<64>(reader)?;
        // runtime cache pointer
        skip(reader, 4)?;
        Ok(Self {
            label,
            name,
            data: reader.read_i32::<LittleEndian>()?,
        })
    }
}
