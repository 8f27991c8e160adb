//! CLI integration tests
//!
//! These run the real binary against synthetic model files.

use assert_cmd::Command;
use glam::Vec3;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use studio_mdl::test_utils::{MeshSpec, ModelSpec, StudioFileBuilder, TextureSpec};
use tempfile::TempDir;

fn mdl_preview() -> Command {
    Command::cargo_bin("mdl-preview").expect("binary should be built")
}

/// Writes a small textured model facing the orbit camera
fn write_model(dir: &Path, name: &str) -> PathBuf {
    let model = ModelSpec::new("upright")
        .vertices(&[
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
        ])
        .normals(&[Vec3::NEG_X])
        .mesh(MeshSpec::strip(0, &[(0, 0, 0, 0), (1, 0, 4, 0), (2, 0, 2, 4)]));
    let data = StudioFileBuilder::new(name)
        .bounds(Vec3::new(0.0, -5.0, 0.0), Vec3::new(0.0, 5.0, 10.0))
        .texture(TextureSpec::solid("stone.bmp", 4, 4, [200, 0, 0]))
        .body_part("body", vec![model])
        .build();

    let path = dir.join(format!("{name}.mdl"));
    fs::write(&path, data).expect("Failed to write model");
    path
}

#[test]
fn test_renders_tga() {
    let dir = TempDir::new().unwrap();
    let input = write_model(dir.path(), "statue");
    let output = dir.path().join("statue.tga");

    mdl_preview()
        .arg(&input)
        .arg(&output)
        .args(["--width", "16", "--height", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"));

    let data = fs::read(&output).unwrap();
    assert_eq!(data.len(), 18 + 16 * 8 * 4);
    assert_eq!(&data[12..16], &[16, 0, 8, 0]);
}

#[test]
fn test_renders_png_with_defaults() {
    let dir = TempDir::new().unwrap();
    let input = write_model(dir.path(), "statue");
    let output = dir.path().join("statue.png");

    mdl_preview()
        .arg(&input)
        .arg(&output)
        .args(["--background", "transparent", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let image = image_dimensions(&output);
    assert_eq!(image, (256, 256));
}

fn image_dimensions(path: &Path) -> (u32, u32) {
    let data = fs::read(path).unwrap();
    assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
    // IHDR is always the first chunk
    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
    (width, height)
}

#[test]
fn test_verbose_prints_report() {
    let dir = TempDir::new().unwrap();
    let input = write_model(dir.path(), "statue");

    mdl_preview()
        .arg(&input)
        .arg(dir.path().join("out.tga"))
        .args(["--width", "8", "--height", "8", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Vertex bounds"))
        .stderr(predicate::str::contains("stone.bmp"))
        .stderr(predicate::str::contains("Pixels written"));
}

#[test]
fn test_non_positive_size_is_clamped() {
    let dir = TempDir::new().unwrap();
    let input = write_model(dir.path(), "statue");
    let output = dir.path().join("tiny.tga");

    mdl_preview()
        .arg(&input)
        .arg(&output)
        .args(["--width", "0", "--height", "-7"])
        .assert()
        .success();

    assert_eq!(fs::read(&output).unwrap().len(), 18 + 4);
}

#[test]
fn test_missing_arguments_is_usage_error() {
    mdl_preview().assert().code(2);
    mdl_preview().arg("only-input.mdl").assert().code(2);
}

#[test]
fn test_bad_option_values_are_usage_errors() {
    mdl_preview()
        .args(["in.mdl", "out.tga", "--width", "wide"])
        .assert()
        .code(2);
    mdl_preview()
        .args(["in.mdl", "out.tga", "--background", "purple"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("purple"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.tga");

    mdl_preview()
        .arg(dir.path().join("nothing.mdl"))
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load model"));

    assert!(!output.exists());
}

#[test]
fn test_invalid_model_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("junk.mdl");
    fs::write(&input, vec![0x42; 512]).unwrap();
    let output = dir.path().join("out.tga");

    mdl_preview()
        .arg(&input)
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));

    assert!(!output.exists());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_model(dir.path(), "statue");

    mdl_preview()
        .arg(&input)
        .arg(dir.path().join("no-such-dir").join("out.tga"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to write image"));
}
