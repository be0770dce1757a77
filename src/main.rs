mod app;
mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use burrow_cave::CaveSystem;
use burrow_runtime::Runtime;
use burrow_world::{BuildingSpec, CaveConfig, CaveSettings, load_config_from_path};
use clap::Parser;

use crate::app::{App, AppError};
use crate::cli::Args;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => CaveConfig::default(),
    };
    let settings = CaveSettings::from_config(&cfg)?;
    let workers = args.workers.unwrap_or(cfg.runtime.workers);
    let mut app = App::new(Arc::new(Runtime::new(workers)?));
    let cave = app.create_cave(settings)?;

    for _ in 0..args.floors {
        cave.dig_new_floor();
    }
    for d in &args.digs {
        if let Err(e) = cave.set_segment_depth(d.floor, d.segment, d.depth) {
            log::warn!("dig {}:{}:{} skipped: {e}", d.floor, d.segment, d.depth);
        }
    }
    cave.finish_pending_meshes();
    print_floors(cave);

    for b in &args.builds {
        let spec = BuildingSpec::new(b.size, b.requirement);
        match cave.try_construct_building(&spec, b.floor, b.segment) {
            Some(id) => println!(
                "build {}:{} size {} -> building {}",
                b.floor, b.segment, b.size, id.0
            ),
            None => println!("build {}:{} size {} -> rejected", b.floor, b.segment, b.size),
        }
    }

    for ray in &args.rays {
        match cave.raycast_cave_segment(ray) {
            Some(hit) => println!(
                "ray {:?} -> floor {} segment {} at ({:.2}, {:.2}, {:.2}), distance {:.2}",
                ray.origin,
                hit.floor_index,
                hit.segment,
                hit.hit.point.x,
                hit.hit.point.y,
                hit.hit.point.z,
                hit.hit.distance
            ),
            None => println!("ray {:?} -> miss", ray.origin),
        }
    }
    if let Some(cave) = app.cave() {
        log::info!(
            "{} floor(s), {} building(s)",
            cave.floor_count(),
            cave.buildings().len()
        );
    }
    let (queued, inflight) = app.runtime().queue_debug_counts();
    log::debug!("runtime idle: {queued} queued, {inflight} in flight");
    Ok(())
}

fn print_floors(cave: &CaveSystem) {
    for floor in 0..cave.floor_count() {
        match cave.floor_mesh(floor) {
            Some(m) => println!(
                "floor {floor}: rev {} verts {} tris {} y {:.2}..{:.2}",
                m.rev,
                m.mesh.vertex_count(),
                m.mesh.triangle_count(),
                m.bbox.min.y,
                m.bbox.max.y
            ),
            None => println!("floor {floor}: no mesh"),
        }
    }
}
