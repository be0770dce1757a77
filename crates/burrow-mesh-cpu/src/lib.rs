//! CPU meshing for the cave ring: buffers, ring sweeps, floor remeshing and
//! the auxiliary building/collision meshes.
#![forbid(unsafe_code)]

pub mod arc_segment;
pub mod building;
pub mod collision;
mod constants;
pub mod cylinder;
mod error;
pub mod floor;
pub mod mesh_build;
pub mod transform;

pub use arc_segment::{ArcSegmentArgs, arc_segment_mesh};
pub use building::{building_anchor, building_mesh, card_mesh, placed_building_mesh};
pub use collision::collision_mesh;
pub use constants::VERTICES_PER_COLUMN;
pub use cylinder::{append_arc_walls, append_cap, append_walls, link_walls};
pub use error::MeshError;
pub use floor::{
    FloorLink, FloorMeshCPU, FloorPlan, FloorRun, build_floor, build_floor_mesh, emit_floor,
    floor_transform, plan_floor, run_length,
};
pub use mesh_build::MeshBuild;
pub use transform::transform_mesh;
