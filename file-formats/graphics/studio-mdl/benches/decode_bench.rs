use criterion::{Criterion, criterion_group, criterion_main};
use glam::Vec3;
use std::hint::black_box;
use studio_mdl::chunks::StudioBone;
use studio_mdl::test_utils::{MeshSpec, ModelSpec, StudioFileBuilder, TextureSpec};
use studio_mdl::{NoCompanions, StudioModel};

/// A grid of `size * size` vertices drawn as one strip per row.
fn create_test_model(size: i16) -> Vec<u8> {
    let mut vertices = Vec::new();
    for y in 0..size {
        for x in 0..size {
            vertices.push(Vec3::new(x as f32, 0.0, y as f32));
        }
    }

    let mut model = ModelSpec::new("grid").vertices(&vertices).normals(&[Vec3::Y]);
    for row in 0..size - 1 {
        let strip: Vec<(i16, i16, i16, i16)> = (0..size)
            .flat_map(|x| {
                [
                    (row * size + x, 0, x, row),
                    ((row + 1) * size + x, 0, x, row + 1),
                ]
            })
            .collect();
        model = model.mesh(MeshSpec::strip(0, &strip));
    }

    let mut builder = StudioFileBuilder::new("grid")
        .bounds(Vec3::ZERO, Vec3::new(size as f32, 0.0, size as f32))
        .texture(TextureSpec::solid("grid.bmp", 64, 64, [128, 64, 32]))
        .body_part("body", vec![model]);
    for bone in 0..8 {
        builder = builder.bone(StudioBone::new("bone", bone - 1, Vec3::X, Vec3::new(0.0, 0.0, 0.1)));
    }
    builder.build()
}

fn bench_model_decode(c: &mut Criterion) {
    let data = create_test_model(64);

    c.bench_function("decode_grid_64", |b| {
        b.iter(|| {
            let model = StudioModel::from_bytes("grid.mdl", black_box(data.clone()), &NoCompanions).unwrap();
            black_box(model);
        })
    });
}

criterion_group!(benches, bench_model_decode);
criterion_main!(benches);
