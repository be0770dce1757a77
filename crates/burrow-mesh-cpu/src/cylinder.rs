//! Ring geometry: wall strips, annular caps and radial link quads.
//!
//! Every function appends at the buffer's current vertex offset, so several
//! calls compose into one mesh. Angles are radians from +X, sweeping
//! counterclockwise when seen from +Y.

use burrow_geom::{Vec2, Vec3};
use burrow_world::CaveSettings;

use crate::constants::VERTICES_PER_COLUMN;
use crate::mesh_build::MeshBuild;

/// Emits one quad per column pair: `o, o+1, o+2` and `o+2, o+1, o+3`.
fn emit_column_quads(mb: &mut MeshBuild, base: u32, quads: usize, flip: bool) {
    for i in 0..quads {
        let o = base + (i * VERTICES_PER_COLUMN) as u32;
        if flip {
            mb.push_triangle(o, o + 2, o + 1);
            mb.push_triangle(o + 2, o + 3, o + 1);
        } else {
            mb.push_triangle(o, o + 1, o + 2);
            mb.push_triangle(o + 2, o + 1, o + 3);
        }
    }
}

/// Sweeps `columns` vertical columns (top vertex first) facing the axis.
fn sweep_wall_columns(
    mb: &mut MeshBuild,
    columns: usize,
    angle_at: impl Fn(usize) -> f32,
    uv_x_at: impl Fn(usize) -> f32,
    radius: f32,
    y: f32,
    height: f32,
) -> u32 {
    let base = mb.vertex_count() as u32;
    for i in 0..columns {
        let dir = Vec3::from_angle_xz(angle_at(i));
        let normal = (-dir).normalized();
        let p = dir * radius;
        let u = uv_x_at(i);
        mb.push_vertex(p.with_y(y + height), normal, Vec2::new(u, 0.0));
        mb.push_vertex(p.with_y(y), normal, Vec2::new(u, 1.0));
    }
    base
}

/// Inward-facing wall over `segment_count` segments starting at `start_segment`.
///
/// UV.x advances by `1 / radial_segments` per column, so pieces of the same
/// ring share one texture scale.
pub fn append_walls(
    mb: &mut MeshBuild,
    settings: &CaveSettings,
    start_segment: usize,
    segment_count: usize,
    radius: f32,
    y: f32,
    height: f32,
) {
    if segment_count == 0 {
        return;
    }
    let step = settings.segment_angle();
    let radial = settings.radial_segments() as f32;
    let base = sweep_wall_columns(
        mb,
        segment_count + 1,
        |i| (start_segment + i) as f32 * step,
        |i| i as f32 / radial,
        radius,
        y,
        height,
    );
    emit_column_quads(mb, base, segment_count, false);
}

/// Inward-facing wall over an arbitrary arc, split into `segments` quads.
pub fn append_arc_walls(
    mb: &mut MeshBuild,
    segments: usize,
    start_radians: f32,
    length_radians: f32,
    radius: f32,
    y: f32,
    height: f32,
) {
    if segments == 0 {
        return;
    }
    let step = length_radians / segments as f32;
    let base = sweep_wall_columns(
        mb,
        segments + 1,
        |i| start_radians + step * i as f32,
        |i| i as f32 / segments as f32,
        radius,
        y,
        height,
    );
    emit_column_quads(mb, base, segments, false);
}

/// Flat annular strip between `inner_radius` and `outer_radius` at height `y`.
///
/// Winding flips with `faces_up` so both orientations survive backface culling.
pub fn append_cap(
    mb: &mut MeshBuild,
    settings: &CaveSettings,
    start_segment: usize,
    segment_count: usize,
    inner_radius: f32,
    outer_radius: f32,
    y: f32,
    faces_up: bool,
) {
    if segment_count == 0 {
        return;
    }
    let step = settings.segment_angle();
    let radial = settings.radial_segments() as f32;
    let normal = if faces_up { Vec3::UP } else { Vec3::DOWN };
    let base = mb.vertex_count() as u32;
    for i in 0..=segment_count {
        let dir = Vec3::from_angle_xz((start_segment + i) as f32 * step);
        let u = i as f32 / radial;
        mb.push_vertex((dir * inner_radius).with_y(y), normal, Vec2::new(u, 0.0));
        mb.push_vertex((dir * outer_radius).with_y(y), normal, Vec2::new(u, 1.0));
    }
    emit_column_quads(mb, base, segment_count, faces_up);
}

/// Single vertical quad on the boundary angle of `segment_index`, bridging
/// `start_radius` to `end_radius`.
pub fn link_walls(
    mb: &mut MeshBuild,
    settings: &CaveSettings,
    segment_index: usize,
    start_radius: f32,
    end_radius: f32,
    y: f32,
    height: f32,
) {
    let dir = Vec3::from_angle_xz(segment_index as f32 * settings.segment_angle());
    let normal = dir.cross(Vec3::UP);
    let start = dir * start_radius;
    let end = dir * end_radius;
    let base = mb.push_vertex(start.with_y(y), normal, Vec2::new(0.0, 0.0));
    mb.push_vertex(end.with_y(y), normal, Vec2::new(0.0, 1.0));
    mb.push_vertex(start.with_y(y + height), normal, Vec2::new(1.0, 0.0));
    mb.push_vertex(end.with_y(y + height), normal, Vec2::new(1.0, 1.0));
    emit_column_quads(mb, base, 1, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn settings(n: u32) -> CaveSettings {
        CaveSettings::new(4.0, 0.5, 10.0, 14.0, n).unwrap()
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn wall_columns_put_top_vertex_first() {
        let s = settings(4);
        let mut mb = MeshBuild::new();
        append_walls(&mut mb, &s, 1, 1, 10.0, 2.0, 3.0);
        assert_eq!(mb.vertex_count(), 4);
        assert!(close(mb.position(0), Vec3::new(0.0, 5.0, 10.0)));
        assert!(close(mb.position(1), Vec3::new(0.0, 2.0, 10.0)));
        assert!(close(mb.position(2), Vec3::new(-10.0, 5.0, 0.0)));
        assert!(close(mb.normal(0), Vec3::new(0.0, 0.0, -1.0)));
        assert_eq!(mb.idx, vec![0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn wall_uv_uses_ring_scale() {
        let s = settings(8);
        let mut mb = MeshBuild::new();
        append_walls(&mut mb, &s, 5, 2, 10.0, 0.0, 1.0);
        assert_eq!(mb.tex_coord(0), Vec2::new(0.0, 0.0));
        assert_eq!(mb.tex_coord(3), Vec2::new(0.125, 1.0));
        assert_eq!(mb.tex_coord(4), Vec2::new(0.25, 0.0));
    }

    #[test]
    fn cap_winding_flips_with_orientation() {
        let s = settings(4);
        let mut up = MeshBuild::new();
        append_cap(&mut up, &s, 0, 1, 10.0, 14.0, 0.0, true);
        assert_eq!(up.idx, vec![0, 2, 1, 2, 3, 1]);
        assert_eq!(up.normal(0), Vec3::UP);

        let mut down = MeshBuild::new();
        append_cap(&mut down, &s, 0, 1, 10.0, 14.0, 0.0, false);
        assert_eq!(down.idx, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(down.normal(0), Vec3::DOWN);

        // Geometric winding agrees with the declared normal
        let [a, b, c] = up.triangle(0);
        assert!((b - a).cross(c - a).dot(Vec3::UP) > 0.0);
        let [a, b, c] = down.triangle(0);
        assert!((b - a).cross(c - a).dot(Vec3::DOWN) > 0.0);
    }

    #[test]
    fn link_is_a_radial_quad_on_the_boundary() {
        let s = settings(4);
        let mut mb = MeshBuild::new();
        link_walls(&mut mb, &s, 1, 10.0, 14.0, 0.5, 3.5);
        assert_eq!(mb.vertex_count(), 4);
        assert!(close(mb.position(0), Vec3::new(0.0, 0.5, 10.0)));
        assert!(close(mb.position(1), Vec3::new(0.0, 0.5, 14.0)));
        assert!(close(mb.position(3), Vec3::new(0.0, 4.0, 14.0)));
        assert!(close(mb.normal(0), Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn calls_compose_at_the_write_offset() {
        let s = settings(4);
        let mut mb = MeshBuild::new();
        append_walls(&mut mb, &s, 0, 2, 10.0, 0.0, 1.0);
        link_walls(&mut mb, &s, 2, 10.0, 14.0, 0.0, 1.0);
        assert_eq!(mb.vertex_count(), 6 + 4);
        assert_eq!(&mb.idx[12..], &[6, 7, 8, 8, 7, 9]);
        assert!(mb.is_well_formed());
    }

    #[test]
    fn arc_walls_cover_requested_angle() {
        let mut mb = MeshBuild::new();
        append_arc_walls(&mut mb, 3, 0.0, FRAC_PI_2, 2.0, 0.0, 1.0);
        assert_eq!(mb.vertex_count(), 8);
        assert!(close(mb.position(6), Vec3::new(0.0, 1.0, 2.0)));
        assert_eq!(mb.tex_coord(6).x, 1.0);
    }

    #[test]
    fn zero_segments_emit_nothing() {
        let s = settings(4);
        let mut mb = MeshBuild::new();
        append_walls(&mut mb, &s, 0, 0, 10.0, 0.0, 1.0);
        append_cap(&mut mb, &s, 0, 0, 10.0, 14.0, 0.0, true);
        append_arc_walls(&mut mb, 0, 0.0, 1.0, 1.0, 0.0, 1.0);
        assert!(mb.is_empty());
        assert_eq!(mb.vertex_count(), 0);
    }
}
