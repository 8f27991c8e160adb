use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::Vec3;
use std::hint::black_box;
use studio_mdl::test_utils::{MeshSpec, ModelSpec, StudioFileBuilder, TextureSpec};
use studio_mdl::{NoCompanions, StudioModel};
use studio_render::{BackgroundPreset, RenderOptions, encode_tga, render};

/// An upright `size * size` vertex grid facing the orbit camera.
fn create_test_model(size: i16) -> StudioModel {
    let mut vertices = Vec::new();
    for z in 0..size {
        for y in 0..size {
            vertices.push(Vec3::new(0.0, y as f32, z as f32));
        }
    }

    let mut model = ModelSpec::new("wall").vertices(&vertices).normals(&[Vec3::NEG_X]);
    for row in 0..size - 1 {
        let strip: Vec<(i16, i16, i16, i16)> = (0..size)
            .flat_map(|y| {
                [
                    (row * size + y, 0, y, row),
                    ((row + 1) * size + y, 0, y, row + 1),
                ]
            })
            .collect();
        model = model.mesh(MeshSpec::strip(0, &strip));
    }

    let data = StudioFileBuilder::new("wall")
        .texture(TextureSpec::solid("wall.bmp", 16, 16, [90, 120, 150]))
        .body_part("body", vec![model])
        .build();
    StudioModel::from_bytes("wall.mdl", data, &NoCompanions).unwrap()
}

fn bench_render(c: &mut Criterion) {
    let model = create_test_model(32);
    let mut group = c.benchmark_group("render_wall_32");

    for size in [64, 256, 512] {
        let options = RenderOptions::new(size, size, BackgroundPreset::Blue);
        group.bench_with_input(BenchmarkId::from_parameter(size), &options, |b, options| {
            b.iter(|| black_box(render(&model, black_box(options))));
        });
    }
    group.finish();
}

fn bench_encode_tga(c: &mut Criterion) {
    let rgba = vec![128u8; 512 * 512 * 4];
    c.bench_function("encode_tga_512", |b| {
        b.iter(|| black_box(encode_tga(512, 512, black_box(&rgba)).unwrap()))
    });
}

criterion_group!(benches, bench_render, bench_encode_tga);
criterion_main!(benches);
