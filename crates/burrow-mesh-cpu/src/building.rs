//! Building footprint meshes and their placement on the ring.

use burrow_geom::{Mat4, Pose, Vec3};
use burrow_world::{Building, CaveSettings};

use crate::cylinder::{append_arc_walls, append_cap, append_walls};
use crate::mesh_build::MeshBuild;
use crate::transform::transform_mesh;

/// Footprint gizmo for a building `size_in_segments` wide, in building space.
///
/// The inner-radius corner of the first segment sits at the origin with +X
/// pointing radially outward, so a [`building_anchor`] pose places it.
pub fn building_mesh(settings: &CaveSettings, size_in_segments: usize) -> MeshBuild {
    let inner = settings.inner_radius();
    let outer = settings.outer_radius();
    let room = settings.room_height();
    let mut mb = MeshBuild::new();
    mb.reserve_quads(4 * size_in_segments);
    append_walls(&mut mb, settings, 0, size_in_segments, inner, 0.0, room);
    append_walls(&mut mb, settings, 0, size_in_segments, outer, 0.0, room);
    append_cap(&mut mb, settings, 0, size_in_segments, inner, outer, 0.0, false);
    append_cap(&mut mb, settings, 0, size_in_segments, inner, outer, room, true);
    transform_mesh(&mut mb, &Mat4::translation(Vec3::new(-inner, 0.0, 0.0)));
    mb
}

/// Curved picture card standing at `local_pos`, given relative to the inner
/// wall point `(inner_radius, 0, 0)`.
///
/// The card is `height` tall and `aspect * room_height` wide along its arc
/// (square when `aspect` is `None`), bent to the radius it stands at. The
/// result is recentred so the card's first bottom corner is the origin.
pub fn card_mesh(
    settings: &CaveSettings,
    local_pos: Vec3,
    aspect: Option<f32>,
    height: f32,
) -> MeshBuild {
    let local = local_pos.with_y(0.0);
    let centre_relative = local + Vec3::new(settings.inner_radius(), 0.0, 0.0);
    let start = centre_relative.z.atan2(centre_relative.x);
    let depth = centre_relative.length();
    let width = aspect.unwrap_or(1.0) * settings.room_height();
    let length = width / depth;
    let segments = (2.0 * length / settings.segment_angle()).ceil() as usize;

    let mut mb = MeshBuild::new();
    mb.reserve_quads(segments);
    append_arc_walls(&mut mb, segments, start, length, depth, 0.0, height);
    let recentre = Vec3::new(-settings.inner_radius(), 0.0, 0.0) - local;
    transform_mesh(&mut mb, &Mat4::translation(recentre));
    mb
}

/// Pose of a building whose first segment is `segment` on the floor whose
/// slab bottom sits at `raw_floor * floor_height`.
pub fn building_anchor(settings: &CaveSettings, raw_floor: i32, segment: usize) -> Pose {
    let angle = segment as f32 * settings.segment_angle();
    let y = raw_floor as f32 * settings.floor_height() + settings.floor_thickness();
    let pos = (Vec3::from_angle_xz(angle) * settings.inner_radius()).with_y(y);
    Pose::new(pos, -angle)
}

/// Footprint mesh of a placed building, in cave space.
pub fn placed_building_mesh(settings: &CaveSettings, building: &Building) -> MeshBuild {
    let mut mb = building_mesh(settings, building.size_in_segments as usize);
    let pose = building_anchor(settings, -(building.floor as i32), building.initial_segment);
    transform_mesh(&mut mb, &pose.matrix());
    mb
}
