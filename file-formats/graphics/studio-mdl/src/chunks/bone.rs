use crate::reader::{Record, read_name};
use byteorder::{LittleEndian, ReadBytesExt};
use glam::Vec3;
use std::io;

/// Parent index marking a root bone
pub const NO_PARENT: i32 = -1;

/// A skeleton bone in its bind pose (112 bytes on disk)
///
/// The on-disk `value[6]` array holds the local position followed by the
/// local Euler angles in radians; `scale[6]` holds the matching animation
/// decompression scales.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioBone {
    pub name: String,
    /// Index of the parent bone, or [`NO_PARENT`] for a root
    pub parent: i32,
    pub flags: i32,
    /// Bone controller driving each of the six channels, -1 if none
    pub controllers: [i32; 6],
    pub position: Vec3,
    /// Euler angles (x = roll, y = pitch, z = yaw) in radians
    pub rotation: Vec3,
    pub position_scale: Vec3,
    pub rotation_scale: Vec3,
}

impl StudioBone {
    /// Creates a bone with the given parent and local pose and no controllers.
    pub fn new(name: impl Into<String>, parent: i32, position: Vec3, rotation: Vec3) -> Self {
        Self {
            name: name.into(),
            parent,
            flags: 0,
            controllers: [-1; 6],
            position,
            rotation,
            position_scale: Vec3::ONE,
            rotation_scale: Vec3::ONE,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent == NO_PARENT
    }
}

impl Record for StudioBone {
    const SIZE: usize = 112;
    const NAME: &'static str = "bone";

    fn read_from(reader: &mut &[u8]) -> io::Result<Self> {
        let name = read_name::<32>(reader)?;
        let parent = reader.read_i32::<LittleEndian>()?;
        let flags = reader.read_i32::<LittleEndian>()?;

        let mut controllers = [0i32; 6];
        reader.read_i32_into::<LittleEndian>(&mut controllers)?;
        let mut value = [0f32; 6];
        reader.read_f32_into::<LittleEndian>(&mut value)?;
        let mut scale = [0f32; 6];
        reader.read_f32_into::<LittleEndian>(&mut scale)?;

        Ok(Self {
            name,
            parent,
            flags,
            controllers,
            position: Vec3::from_slice(&value[..3]),
            rotation: Vec3::from_slice(&value[3..]),
            position_scale: Vec3::from_slice(&scale[..3]),
            rotation_scale: Vec3::from_slice(&scale[3..]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_position_then_angles() {
        let mut raw = Vec::new();
        let mut name = [0u8; 32];
        name[..6].copy_from_slice(b"Bip01\0");
        raw.extend_from_slice(&name);
        raw.extend_from_slice(&(-1i32).to_le_bytes());
        raw.extend_from_slice(&0i32.to_le_bytes());
        for _ in 0..6 {
            raw.extend_from_slice(&(-1i32).to_le_bytes());
        }
        for v in [1.0f32, 2.0, 3.0, 0.1, 0.2, 0.3, 1.0, 1.0, 1.0, 0.5, 0.5, 0.5] {
            raw.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(raw.len(), StudioBone::SIZE);

        let bone = StudioBone::read_from(&mut raw.as_slice()).unwrap();
        assert_eq!(bone.name, "Bip01");
        assert!(bone.is_root());
        assert_eq!(bone.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(bone.rotation, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(bone.rotation_scale, Vec3::splat(0.5));
    }
}
