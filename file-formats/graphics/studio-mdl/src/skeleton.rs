//! Bind-pose bone hierarchy evaluation
//!
//! Each bone stores a local translation and Euler rotation relative to its
//! parent. The world transform of a bone is its parent's world transform
//! composed with its own local transform. Bones may appear in any order in the
//! file, so resolution walks parent chains explicitly and evaluates every bone
//! exactly once, parents before children.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use studio_mdl::chunks::StudioBone;
//! use studio_mdl::skeleton::Skeleton;
//!
//! // The child is listed before its parent.
//! let bones = vec![
//!     StudioBone::new("hand", 1, Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO),
//!     StudioBone::new("arm", -1, Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO),
//! ];
//! let skeleton = Skeleton::resolve(bones)?;
//!
//! let hand = skeleton.world_transform(0).unwrap();
//! assert_eq!(hand.transform_point3(Vec3::ZERO), Vec3::new(10.0, 0.0, 5.0));
//! # Ok::<(), studio_mdl::MdlError>(())
//! ```

use crate::chunks::{NO_PARENT, StudioBone};
use crate::error::{MdlError, Result};
use glam::{Affine3A, Mat3, Quat, Vec3};

/// Builds the rotation for a bone's Euler angles.
///
/// `angles.z` is applied first (yaw), then `angles.y` (pitch), then
/// `angles.x` (roll), all as rotations about the fixed model axes.
pub fn angle_quaternion(angles: Vec3) -> Quat {
    let (sy, cy) = (angles.z * 0.5).sin_cos();
    let (sp, cp) = (angles.y * 0.5).sin_cos();
    let (sr, cr) = (angles.x * 0.5).sin_cos();

    Quat::from_xyzw(
        sr * cp * cy - cr * sp * sy,
        cr * sp * cy + sr * cp * sy,
        cr * cp * sy - sr * sp * cy,
        cr * cp * cy + sr * sp * sy,
    )
}

/// Local transform of a bone relative to its parent.
pub fn local_transform(bone: &StudioBone) -> Affine3A {
    let rotation = Mat3::from_quat(angle_quaternion(bone.rotation));
    Affine3A::from_mat3_translation(rotation, bone.position)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// A skeleton with every bone's world transform resolved
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<StudioBone>,
    world: Vec<Affine3A>,
}

impl Skeleton {
    /// Resolves world transforms for `bones`.
    ///
    /// # Errors
    ///
    /// Returns [`MdlError::InvalidBoneParent`] when a parent index is neither
    /// `-1` nor a valid bone, and [`MdlError::BoneCycle`] when following
    /// parent links from a bone never reaches a root.
    pub fn resolve(bones: Vec<StudioBone>) -> Result<Self> {
        let parents = parent_indices(&bones)?;
        let count = bones.len();

        let mut state = vec![Visit::Unvisited; count];
        let mut world = vec![Affine3A::IDENTITY; count];
        let mut chain = Vec::new();

        for start in 0..count {
            // Climb towards the root until an already resolved bone is found.
            let mut current = Some(start);
            while let Some(index) = current {
                match state[index] {
                    Visit::Done => break,
                    Visit::InProgress => return Err(MdlError::BoneCycle(index)),
                    Visit::Unvisited => {
                        state[index] = Visit::InProgress;
                        chain.push(index);
                        current = parents[index];
                    }
                }
            }

            while let Some(index) = chain.pop() {
                let local = local_transform(&bones[index]);
                world[index] = match parents[index] {
                    Some(parent) => world[parent] * local,
                    None => local,
                };
                state[index] = Visit::Done;
            }
        }

        Ok(Self { bones, world })
    }

    pub fn bones(&self) -> &[StudioBone] {
        &self.bones
    }

    /// World transforms, indexed like [`Skeleton::bones`].
    pub fn transforms(&self) -> &[Affine3A] {
        &self.world
    }

    pub fn world_transform(&self, bone: usize) -> Option<&Affine3A> {
        self.world.get(bone)
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

fn parent_indices(bones: &[StudioBone]) -> Result<Vec<Option<usize>>> {
    bones
        .iter()
        .enumerate()
        .map(|(index, bone)| {
            if bone.parent == NO_PARENT {
                return Ok(None);
            }
            usize::try_from(bone.parent)
                .ok()
                .filter(|&parent| parent < bones.len())
                .map(Some)
                .ok_or(MdlError::InvalidBoneParent {
                    bone: index,
                    parent: bone.parent,
                    count: bones.len(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::EulerRot;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn create_test_bone(parent: i32, position: Vec3, rotation: Vec3) -> StudioBone {
        StudioBone::new("bone", parent, position, rotation)
    }

    #[test]
    fn quaternion_applies_yaw_pitch_roll() {
        let angles = Vec3::new(0.3, -1.1, 2.0);
        let expected = Quat::from_euler(EulerRot::ZYX, angles.z, angles.y, angles.x);
        assert!(angle_quaternion(angles).abs_diff_eq(expected, 1e-6));
        assert!(angle_quaternion(angles).is_normalized());
    }

    #[test]
    fn yaw_rotates_x_into_y() {
        let bone = create_test_bone(-1, Vec3::ZERO, Vec3::new(0.0, 0.0, FRAC_PI_2));
        let moved = local_transform(&bone).transform_point3(Vec3::X);
        assert!(moved.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn root_world_equals_local() {
        let bone = create_test_bone(-1, Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3));
        let expected = local_transform(&bone);
        let skeleton = Skeleton::resolve(vec![bone]).unwrap();
        assert_eq!(skeleton.transforms(), &[expected]);
    }

    #[test]
    fn child_inherits_parent_rotation() {
        // Parent turned 90 degrees around Z, child offset along the parent's X.
        let bones = vec![
            create_test_bone(-1, Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, FRAC_PI_2)),
            create_test_bone(0, Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO),
        ];
        let skeleton = Skeleton::resolve(bones).unwrap();
        let child = skeleton.world_transform(1).unwrap().transform_point3(Vec3::ZERO);
        assert!(child.abs_diff_eq(Vec3::new(5.0, 2.0, 0.0), 1e-5));
    }

    #[test]
    fn children_before_parents_resolve() {
        let bones = vec![
            create_test_bone(2, Vec3::X, Vec3::ZERO),
            create_test_bone(0, Vec3::Y, Vec3::ZERO),
            create_test_bone(-1, Vec3::Z, Vec3::ZERO),
        ];
        let skeleton = Skeleton::resolve(bones).unwrap();
        let tip = skeleton.world_transform(1).unwrap().transform_point3(Vec3::ZERO);
        assert!(tip.abs_diff_eq(Vec3::ONE, 1e-6));
    }

    #[test]
    fn cycle_is_rejected() {
        let bones = vec![
            create_test_bone(-1, Vec3::ZERO, Vec3::ZERO),
            create_test_bone(2, Vec3::ZERO, Vec3::ZERO),
            create_test_bone(1, Vec3::ZERO, Vec3::ZERO),
        ];
        assert!(matches!(Skeleton::resolve(bones), Err(MdlError::BoneCycle(_))));
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let bones = vec![create_test_bone(0, Vec3::ZERO, Vec3::ZERO)];
        assert!(matches!(Skeleton::resolve(bones), Err(MdlError::BoneCycle(0))));
    }

    #[test]
    fn parent_out_of_range_is_rejected() {
        for parent in [1, 7, -2] {
            let bones = vec![create_test_bone(parent, Vec3::ZERO, Vec3::ZERO)];
            assert!(matches!(
                Skeleton::resolve(bones),
                Err(MdlError::InvalidBoneParent { bone: 0, .. })
            ));
        }
    }

    #[test]
    fn empty_skeleton() {
        let skeleton = Skeleton::resolve(Vec::new()).unwrap();
        assert!(skeleton.is_empty());
        assert!(skeleton.world_transform(0).is_none());
    }

    /// Random forests where every parent precedes its child, plus a permutation.
    fn forest_and_permutation() -> impl Strategy<Value = (Vec<StudioBone>, Vec<usize>)> {
        (1usize..12)
            .prop_flat_map(|count| {
                let bones = (0..count)
                    .map(|index| {
                        (
                            -1..index as i32,
                            prop::array::uniform3(-10.0f32..10.0),
                            prop::array::uniform3(-3.2f32..3.2),
                        )
                            .prop_map(|(parent, position, rotation)| {
                                create_test_bone(
                                    parent,
                                    Vec3::from_array(position),
                                    Vec3::from_array(rotation),
                                )
                            })
                    })
                    .collect::<Vec<_>>();
                let order = Just((0..count).collect::<Vec<_>>()).prop_shuffle();
                (bones, order)
            })
    }

    proptest! {
        #[test]
        fn resolution_ignores_declaration_order((bones, order) in forest_and_permutation()) {
            let reference = Skeleton::resolve(bones.clone()).unwrap();

            // order[new] = old
            let mut new_index = vec![0; order.len()];
            for (new, &old) in order.iter().enumerate() {
                new_index[old] = new;
            }
            let shuffled = order
                .iter()
                .map(|&old| {
                    let mut bone = bones[old].clone();
                    if bone.parent >= 0 {
                        bone.parent = new_index[bone.parent as usize] as i32;
                    }
                    bone
                })
                .collect();
            let permuted = Skeleton::resolve(shuffled).unwrap();

            for (new, &old) in order.iter().enumerate() {
                let a = reference.transforms()[old];
                let b = permuted.transforms()[new];
                prop_assert!(a.abs_diff_eq(b, 1e-5), "bone {}: {:?} != {:?}", old, a, b);
            }
        }
    }
}
