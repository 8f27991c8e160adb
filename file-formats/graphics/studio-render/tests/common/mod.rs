//! Common test fixtures

#![allow(dead_code)]

use glam::Vec3;
use studio_mdl::test_utils::{MeshSpec, ModelSpec, StudioFileBuilder, TextureSpec};
use studio_mdl::{NoCompanions, StudioModel};
use tempfile::TempDir;

/// Create a temporary directory for tests
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

pub fn load(name: &str, data: Vec<u8>) -> StudioModel {
    StudioModel::from_bytes(name, data, &NoCompanions).expect("fixture should decode")
}

/// A viewmodel whose single triangle covers the whole frame
pub fn fullscreen_viewmodel() -> StudioModel {
    let model = ModelSpec::new("screen")
        .vertices(&[
            Vec3::new(3.0, -8.6, -9.0),
            Vec3::new(3.0, -8.6, 31.0),
            Vec3::new(3.0, 31.4, -9.0),
        ])
        .normals(&[Vec3::X])
        .mesh(MeshSpec::strip(0, &[(0, 0, 0, 0), (1, 0, 0, 0), (2, 0, 0, 0)]));
    let data = StudioFileBuilder::new("v_fullscreen")
        .body_part("body", vec![model])
        .build();
    load("v_fullscreen.mdl", data)
}

/// Upright triangle in the YZ plane facing the orbit camera
pub fn upright_triangle(order: [i16; 3]) -> ModelSpec {
    let corners = [(0, 0, 0), (1, 0, 4), (2, 2, 0)];
    let strip: Vec<(i16, i16, i16, i16)> = order
        .iter()
        .map(|&i| {
            let (v, s, t) = corners[i as usize];
            (v, 0, s, t)
        })
        .collect();
    ModelSpec::new("upright")
        .vertices(&[
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
        ])
        .normals(&[Vec3::NEG_X])
        .mesh(MeshSpec::strip(0, &strip))
}

/// Orbit-framed model with one front-facing textured triangle
pub fn orbit_model(with_bounds: bool) -> StudioModel {
    let mut builder = StudioFileBuilder::new("statue")
        .texture(TextureSpec::solid("stone.bmp", 4, 4, [200, 0, 0]))
        .body_part("body", vec![upright_triangle([0, 1, 2])]);
    if with_bounds {
        builder = builder.bounds(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 5.0, 10.0));
    }
    load("statue.mdl", builder.build())
}
