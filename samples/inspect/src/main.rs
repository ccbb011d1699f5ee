use std::{ops::ControlFlow, sync::Arc};

use clap::Parser;
use meshfold::{Mesh, Scene};
use parking_lot::RwLock;

mod cli;
mod shapes;

fn report(mesh: &Mesh) {
    tracing::info!(
        name = %mesh.name,
        id = mesh.internal_id(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        render_mode = %mesh.render_mode().unwrap_or_default(),
        "mesh"
    );
    if let Some(bb) = mesh.bounds() {
        println!(
            "{} #{}: {} vertices, {} faces, bounds {:?} .. {:?}",
            mesh.name,
            mesh.internal_id(),
            mesh.vertex_count(),
            mesh.face_count(),
            bb.mins.coords.as_slice(),
            bb.maxs.coords.as_slice(),
        );
    }
    if let Some(normals) = mesh.face_normals() {
        for (f, n) in normals.chunks_exact(3).enumerate() {
            println!("  face {f}: {n:?}");
        }
    }
    if let Some(vn) = mesh.vertex_normals() {
        println!(
            "  {} vertex normals ({})",
            vn.len(),
            if vn.is_creased() { "creased" } else { "uniform" }
        );
        for (i, n) in vn.normals().chunks_exact(3).enumerate() {
            println!("  normal {i}: {n:?}");
        }
    }
}

pub fn main() {
    let args = cli::Cli::parse();
    cli::initialize_tracing(&args.log_filter, args.log_format);
    tracing::debug!("{args:#?}");

    let mut scene = Scene::new("inspect");
    for shape in &args.shapes {
        let mut mesh = match shape {
            cli::Shape::Cube => shapes::cube(args.size),
            cli::Shape::Prism => shapes::prism(args.sides, args.size),
        };
        mesh.set_crease_angle(args.crease_angle);
        mesh.set_render_mode(Some(args.render_mode));
        if let Err(e) = mesh.check_valid() {
            tracing::error!(name = %mesh.name, "skipping invalid mesh: {e}");
            continue;
        }
        scene.add_child(Arc::new(RwLock::new(mesh)));
    }

    scene.init();

    let _ = scene.for_each_child(|child| {
        report(&child.read());
        ControlFlow::<()>::Continue(())
    });
    if let Some(bb) = scene.bounds() {
        println!(
            "scene: center {:?}, diagonal {}",
            bb.center().coords.as_slice(),
            bb.length_of_diagonal()
        );
    }
}
