use crate::camera::{Camera, CameraPolicy};
use crate::options::RenderOptions;
use crate::raster::{RenderOutput, Rasterizer};
use log::debug;
use studio_mdl::StudioModel;

/// Renders the first sub-model of every body part of `model`.
///
/// Never fails. Degenerate model bounds fall back to the vertex extents and
/// untextured meshes are drawn flat gray.
pub fn render(model: &StudioModel, options: &RenderOptions) -> RenderOutput {
    let (width, height) = options.dimensions();

    let mut bounds = model.bounds();
    if bounds.is_degenerate() {
        bounds = model.vertex_bounds();
        debug!(
            "Model bounds are degenerate, using vertex bounds {:?}..{:?}",
            bounds.min, bounds.max
        );
    }

    let policy = CameraPolicy::classify(&model.file_stem());
    let camera = Camera::new(policy, &bounds);
    debug!(
        "Camera {:?}: eye {:?}, target {:?}",
        policy, camera.eye, camera.target
    );
    let mvp = camera.model_view_projection(width, height);

    let mut raster = Rasterizer::new(width, height, options.background);
    for sub_model in model.rendered_models() {
        for mesh in &sub_model.meshes {
            let texture = mesh.texture.and_then(|id| model.textures().get(id));
            raster.draw_mesh(&sub_model.vertices, mesh, texture, &mvp);
        }
    }

    let output = raster.finish();
    debug!(
        "Rendered {} triangles ({} degenerate), {} pixels written",
        output.stats.triangles, output.stats.degenerate, output.stats.pixels_written
    );
    output
}
