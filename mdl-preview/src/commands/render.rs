//! Load a model, render it and write the preview image

use anyhow::{Context, Result};
use std::io::{self, Write};
use studio_mdl::StudioModel;
use studio_render::{RenderOptions, RenderOutput, render, write_image};

use crate::cli::Cli;
use crate::utils::{
    add_table_row, create_property_table, create_table, format_bounds, format_bytes, format_ratio,
};

pub fn execute(cli: &Cli) -> Result<()> {
    let model = StudioModel::load(&cli.input)
        .with_context(|| format!("Failed to load model: {}", cli.input.display()))?;

    let options = RenderOptions::new(cli.width, cli.height, cli.background);
    let output = render(&model, &options);

    let format = write_image(&cli.output, &output)
        .with_context(|| format!("Failed to write image: {}", cli.output.display()))?;
    log::info!("Wrote {} preview to {}", format, cli.output.display());

    if cli.verbose > 0 {
        print_report(&mut io::stderr(), &model, &output)
            .context("Failed to print model report")?;
    }

    if !cli.quiet {
        println!(
            "✓ Rendered {} to {}",
            cli.input.display(),
            cli.output.display()
        );
    }
    Ok(())
}

/// Summary, per-mesh and render statistics tables
pub fn print_report<W: Write>(out: &mut W, model: &StudioModel, output: &RenderOutput) -> Result<()> {
    let rendered: Vec<_> = model.rendered_models().collect();
    let meshes: usize = rendered.iter().map(|m| m.meshes.len()).sum();
    let vertices: usize = rendered.iter().map(|m| m.vertices.len()).sum();
    let indices: usize = rendered.iter().map(|m| m.index_count()).sum();

    writeln!(out, "Model: {}", model.name())?;
    let summary = create_property_table(vec![
        ("File size", format_bytes(model.data().len() as u64)),
        ("Body parts", model.body_parts().len().to_string()),
        ("Rendered models", rendered.len().to_string()),
        ("Meshes", meshes.to_string()),
        ("Vertices", vertices.to_string()),
        ("Indices", indices.to_string()),
        ("Bones", model.skeleton().len().to_string()),
        ("Textures", model.textures().len().to_string()),
        ("Sequences", model.sequences().len().to_string()),
        (
            "Sequence groups",
            format!(
                "{} ({} found)",
                model.sequence_groups().len(),
                model.sequence_groups_found()
            ),
        ),
        (
            "Header bounds",
            format!("{} [{:?}]", format_bounds(&model.bounds()), model.bounds_source()),
        ),
        ("Vertex bounds", format_bounds(&model.vertex_bounds())),
    ]);
    summary.print(out)?;

    let mut mesh_table = create_table(&["Model", "Mesh", "Indices", "Texture", "Size", "Opaque"]);
    for sub_model in &rendered {
        for (index, mesh) in sub_model.meshes.iter().enumerate() {
            let texture = mesh.texture.and_then(|id| model.textures().get(id));
            let (name, size, opaque) = match texture {
                Some(texture) => (
                    texture.name.clone(),
                    format!("{}x{}", texture.width, texture.height),
                    format_ratio(
                        texture.opaque_pixel_count(),
                        texture.width as usize * texture.height as usize,
                    ),
                ),
                None => ("-".to_string(), "-".to_string(), "-".to_string()),
            };
            add_table_row(
                &mut mesh_table,
                vec![
                    sub_model.name.clone(),
                    index.to_string(),
                    mesh.indices.len().to_string(),
                    name,
                    size,
                    opaque,
                ],
            );
        }
    }
    mesh_table.print(out)?;

    let stats = output.stats;
    let pixels = output.width as usize * output.height as usize;
    let render_table = create_property_table(vec![
        ("Image", format!("{}x{}", output.width, output.height)),
        ("Triangles", stats.triangles.to_string()),
        ("Degenerate", stats.degenerate.to_string()),
        (
            "Pixels written",
            format!("{} ({})", stats.pixels_written, format_ratio(stats.pixels_written, pixels)),
        ),
    ]);
    render_table.print(out)?;

    Ok(())
}
