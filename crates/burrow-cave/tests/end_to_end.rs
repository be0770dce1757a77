use std::sync::Arc;

use burrow_cave::CaveSystem;
use burrow_geom::{Ray, Vec3};
use burrow_mesh_cpu::build_floor;
use burrow_runtime::Runtime;
use burrow_world::{BuildingId, BuildingSpec, CaveSettings};
use proptest::prelude::*;

fn cave(n: u32, workers: usize) -> CaveSystem {
    let settings = CaveSettings::new(4.0, 0.5, 10.0, 14.0, n).unwrap();
    CaveSystem::new(Arc::new(settings), Arc::new(Runtime::new(workers).unwrap()))
}

#[test]
fn dig_and_excavate_one_segment() {
    let mut c = cave(8, 2);
    c.dig_new_floor();
    c.set_segment_depth(0, 3, 1).unwrap();
    c.finish_pending_meshes();

    let mut row = [0u32; 8];
    row[3] = 1;
    let want = build_floor(c.settings(), 0, 2, &row);
    let got = c.floor_mesh(0).unwrap();
    assert_eq!(got.rev, 2);
    assert_eq!(got.mesh, want.mesh);
}

#[test]
fn consecutive_edits_are_both_visible() {
    let mut c = cave(8, 4);
    c.dig_new_floor();
    c.dig_new_floor();
    c.set_segment_depth(1, 2, 1).unwrap();
    c.set_segment_depth(1, 5, 2).unwrap();
    c.finish_pending_meshes();
    assert!(c.is_idle());

    let mut row = [0u32; 8];
    row[2] = 1;
    row[5] = 2;
    let want = build_floor(c.settings(), 1, 4, &row);
    assert_eq!(c.floor_mesh(1).unwrap().mesh, want.mesh);
    assert_eq!(c.segment_depth(1, 5), Some(2));
}

#[test]
fn floors_stack_downward() {
    let mut c = cave(8, 1);
    for _ in 0..3 {
        c.dig_new_floor();
    }
    c.finish_pending_meshes();
    let top = c.floor_mesh(0).unwrap().bbox;
    let bottom = c.floor_mesh(2).unwrap().bbox;
    assert_eq!(top.min.y, 0.0);
    assert_eq!(bottom.min.y, -8.0);
    assert_eq!(bottom.max.y, -4.0);
}

#[test]
fn buildings_need_depth_and_free_cells() {
    let mut c = cave(8, 1);
    c.dig_new_floor();
    for s in [6, 7, 0, 1] {
        c.set_segment_depth(0, s, 2).unwrap();
    }
    let wide = BuildingSpec::new(3, 2);

    // Footprint 6,7,0 wraps the seam
    assert!(c.can_construct_building_at(&wide, 0, 6));
    assert!(!c.can_construct_building_at(&wide, 0, 0));
    assert!(!c.can_construct_building_at(&BuildingSpec::new(1, 3), 0, 6));
    assert!(!c.can_construct_building_at(&wide, 1, 6));
    assert!(!c.can_construct_building_at(&wide, -1, 6));

    let a = c.try_construct_building(&wide, 0, 6).unwrap();
    assert!(!c.can_construct_building_at(&BuildingSpec::new(1, 0), 0, 7));
    assert_eq!(c.try_construct_building(&wide, 0, 7), None);
    let b = c.try_construct_building(&BuildingSpec::new(1, 2), 0, 1).unwrap();

    assert_eq!(a, BuildingId(1));
    assert!(b > a);
    assert_eq!(c.building_at(0, 0), Some(a));
    assert_eq!(c.building_at(0, 1), Some(b));
    assert_eq!(c.building_at(0, 2), None);
    assert_eq!(c.buildings().len(), 2);
    assert_eq!(c.buildings()[0].initial_segment, 6);
}

#[test]
fn raycast_above_the_top_floor() {
    let c = cave(8, 1);
    let a = 0.5 * c.settings().segment_angle();
    let ray = Ray::new(Vec3::new(0.0, 6.0, 0.0), Vec3::from_angle_xz(a));
    let res = c.raycast_cave_segment(&ray).unwrap();
    assert_eq!(res.raw_floor, 1);
    assert_eq!(res.floor_index, -1);
    assert_eq!(res.segment, 0);
}

#[test]
fn raycast_behind_the_seam() {
    let c = cave(8, 1);
    let a = -std::f32::consts::PI + 0.05;
    let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::from_angle_xz(a));
    let res = c.raycast_cave_segment(&ray).unwrap();
    assert_eq!(res.floor_index, 1);
    assert_eq!(res.segment, 4);
    assert!(res.segment_face.z < 0.0);
}

#[test]
fn raycast_cell_accepts_building() {
    let mut c = cave(8, 2);
    c.dig_new_floor();
    c.set_segment_depth(0, 2, 1).unwrap();
    let a = 2.5 * c.settings().segment_angle();
    let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::from_angle_xz(a));
    let hit = c.raycast_cave_segment(&ray).unwrap();
    assert_eq!((hit.floor_index, hit.segment), (0, 2));
    let spec = BuildingSpec::new(1, 1);
    assert!(c.can_construct_building_at(&spec, hit.floor_index, hit.segment));
    let id = c.try_construct_building(&spec, hit.floor_index, hit.segment);
    assert_eq!(id, Some(BuildingId(1)));

    let m = c.building_mesh(BuildingId(1)).unwrap();
    let anchor = hit.building_anchor.pos;
    assert!((0..m.vertex_count()).any(|i| (m.position(i) - anchor).length() < 1e-3));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Whatever the edit sequence, the settled mesh matches a direct rebuild.
    #[test]
    fn settled_mesh_matches_grid(edits in proptest::collection::vec((0i32..8, 0u32..3), 1..20)) {
        let mut c = cave(8, 3);
        c.dig_new_floor();
        let mut row = [0u32; 8];
        for &(s, d) in &edits {
            c.set_segment_depth(0, s, d).unwrap();
            row[s as usize] = d;
        }
        c.finish_pending_meshes();
        let rev = 1 + edits.len() as u64;
        let want = build_floor(c.settings(), 0, rev, &row);
        let got = c.floor_mesh(0).unwrap();
        prop_assert_eq!(got.rev, rev);
        prop_assert_eq!(&got.mesh, &want.mesh);
    }

    #[test]
    fn building_ids_increase(sizes in proptest::collection::vec(1u32..4, 1..12)) {
        let mut c = cave(16, 1);
        c.dig_new_floor();
        let mut last = 0;
        for (i, size) in sizes.into_iter().enumerate() {
            if let Some(BuildingId(id)) =
                c.try_construct_building(&BuildingSpec::new(size, 0), 0, (i * 3) as i32)
            {
                prop_assert!(id > last);
                last = id;
            }
        }
    }
}
