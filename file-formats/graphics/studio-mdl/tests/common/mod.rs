//! Common test fixtures

#![allow(dead_code)]

use glam::Vec3;
use std::path::{Path, PathBuf};
use studio_mdl::test_utils::{MeshSpec, ModelSpec, StudioFileBuilder};
use tempfile::TempDir;

/// Create a temporary directory for tests
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `content` to `dir/name`
pub fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// One sub-model with a single textured triangle
pub fn triangle_model(name: &str) -> ModelSpec {
    ModelSpec::new(name)
        .vertices(&[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0)])
        .normals(&[Vec3::Y])
        .mesh(MeshSpec::strip(0, &[(0, 0, 0, 0), (1, 0, 4, 0), (2, 0, 0, 4)]))
}

/// A model file with one body part holding one triangle
pub fn triangle_file(name: &str) -> StudioFileBuilder {
    StudioFileBuilder::new(name)
        .bounds(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0))
        .body_part("body", vec![triangle_model("triangle")])
}
