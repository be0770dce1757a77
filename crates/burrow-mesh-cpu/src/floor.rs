//! Floor remeshing: run-length encode one occupancy row and sweep walls,
//! caps and links over it.
//!
//! A floor is built in local space with its slab bottom at `y = 0`, then
//! placed in cave space by [`floor_transform`]. The run scan starts at
//! segment 0 and never wraps, so an excavated region crossing the seam is
//! emitted as two runs.

use burrow_geom::{Aabb, Mat4, Vec3};
use burrow_world::CaveSettings;

use crate::cylinder::{append_cap, append_walls, link_walls};
use crate::mesh_build::MeshBuild;
use crate::transform::transform_mesh;

/// Maximal stretch of equal depth starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloorRun {
    pub start: usize,
    pub len: usize,
    pub depth: u32,
}

impl FloorRun {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Radial quad closing a run on the boundary angle of `segment`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorLink {
    pub segment: usize,
    pub from_radius: f32,
    pub to_radius: f32,
}

impl FloorLink {
    /// False for the zero-width link emitted when neighbouring depths share a radius.
    #[inline]
    pub fn is_step(&self) -> bool {
        self.from_radius != self.to_radius
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FloorPlan {
    pub runs: Vec<FloorRun>,
    pub links: Vec<FloorLink>,
}

impl FloorPlan {
    /// Exact index count [`emit_floor`] produces for this plan.
    pub fn index_count(&self, radial_segments: usize) -> usize {
        let base = 12 * radial_segments;
        let runs: usize = self
            .runs
            .iter()
            .map(|r| if r.depth == 0 { 6 * r.len } else { 12 * r.len })
            .sum();
        base + runs + 6 * self.links.len()
    }
}

/// Number of consecutive cells equal to `row[start]`, scanning forward only.
pub fn run_length(row: &[u32], start: usize) -> usize {
    match row.get(start) {
        Some(&d) => row[start..].iter().take_while(|&&x| x == d).count(),
        None => 0,
    }
}

pub fn plan_floor(settings: &CaveSettings, row: &[u32]) -> FloorPlan {
    let n = row.len();
    let mut plan = FloorPlan::default();
    let mut pos = 0;
    while pos < n {
        let len = run_length(row, pos);
        let depth = row[pos];
        let run = FloorRun { start: pos, len, depth };
        plan.runs.push(run);
        plan.links.push(FloorLink {
            segment: run.end(),
            from_radius: settings.wall_radius(depth),
            to_radius: settings.wall_radius(row[run.end() % n]),
        });
        pos = run.end();
    }
    plan
}

/// Appends the floor slab, every run and every link in local floor space.
pub fn emit_floor(mb: &mut MeshBuild, settings: &CaveSettings, plan: &FloorPlan) {
    let n = settings.radial_segments() as usize;
    let inner = settings.inner_radius();
    let outer = settings.outer_radius();
    let slab_top = settings.floor_thickness();
    let room = settings.room_height();

    append_cap(mb, settings, 0, n, inner, outer, 0.0, false);
    append_walls(mb, settings, 0, n, inner, 0.0, slab_top);

    for run in &plan.runs {
        let radius = settings.wall_radius(run.depth);
        append_walls(mb, settings, run.start, run.len, radius, slab_top, room);
        if run.depth != 0 {
            append_cap(mb, settings, run.start, run.len, inner, outer, slab_top, true);
        }
    }
    for link in &plan.links {
        link_walls(
            mb,
            settings,
            link.segment,
            link.from_radius,
            link.to_radius,
            slab_top,
            room,
        );
    }
}

/// Local-space mesh for one depth row.
pub fn build_floor_mesh(settings: &CaveSettings, row: &[u32]) -> MeshBuild {
    let plan = plan_floor(settings, row);
    let mut mb = MeshBuild::new();
    // Two quads per segment on the slab, up to two per run segment, one per link.
    mb.reserve_quads(4 * row.len() + plan.links.len());
    emit_floor(&mut mb, settings, &plan);
    mb.debug_validate();
    mb
}

/// Places floor `floor` (0 topmost) in cave space.
pub fn floor_transform(settings: &CaveSettings, floor: usize) -> Mat4 {
    Mat4::translation(Vec3::new(0.0, -settings.floor_height() * floor as f32, 0.0))
}

/// Finished floor geometry in cave space, ready for upload.
#[derive(Clone, Debug)]
pub struct FloorMeshCPU {
    pub floor: usize,
    pub rev: u64,
    pub bbox: Aabb,
    pub mesh: MeshBuild,
}

impl FloorMeshCPU {
    /// Moves a finished cave-space build into its renderable form.
    pub fn from_build(floor: usize, rev: u64, mesh: MeshBuild) -> Self {
        let bbox = Aabb::from_flat_positions(&mesh.pos).unwrap_or_default();
        Self {
            floor,
            rev,
            bbox,
            mesh,
        }
    }
}

/// Remeshes `row` and places it as floor `floor`.
pub fn build_floor(settings: &CaveSettings, floor: usize, rev: u64, row: &[u32]) -> FloorMeshCPU {
    let mut mb = build_floor_mesh(settings, row);
    transform_mesh(&mut mb, &floor_transform(settings, floor));
    FloorMeshCPU::from_build(floor, rev, mb)
}
