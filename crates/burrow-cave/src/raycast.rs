//! Ray queries against the cave's collision ring, resolved to grid cells.

use std::f32::consts::TAU;
use std::sync::Arc;

use burrow_geom::{Pose, Ray, Vec3, wrap_radians};
use burrow_mesh_cpu::{MeshBuild, building_anchor, collision_mesh};
use burrow_world::CaveSettings;

const RAY_EPSILON: f32 = 1e-7;

/// Nearest intersection with the collision mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub triangle: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastCaveResult {
    pub hit: RayHit,
    /// `floor(y / floor_height)`; grows upward.
    pub raw_floor: i32,
    /// Grid floor index, `-raw_floor`. Negative above the top floor.
    pub floor_index: i32,
    pub segment: i32,
    /// Middle of the segment on the inner wall.
    pub segment_face: Vec3,
    /// Middle of the segment halfway between the walls.
    pub segment_center: Vec3,
    pub building_anchor: Pose,
}

/// `(raw_floor, floor_index)` for a cave-space height.
pub fn floor_for_height(settings: &CaveSettings, y: f32) -> (i32, i32) {
    let raw = (y / settings.floor_height()).floor() as i32;
    (raw, -raw)
}

/// Angle of `p` around the Y axis in `[0, 2π)`.
pub fn segment_radians(p: Vec3) -> f32 {
    wrap_radians(p.z.atan2(p.x))
}

pub fn segment_for_radians(settings: &CaveSettings, radians: f32) -> i32 {
    let n = settings.radial_segments() as i32;
    let seg = (radians / TAU * n as f32).floor() as i32;
    seg.clamp(0, n - 1)
}

/// Möller–Trumbore, two-sided. Returns the ray parameter of the hit.
fn ray_triangle(ray: &Ray, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < RAY_EPSILON {
        return None;
    }
    let inv = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t > RAY_EPSILON).then_some(t)
}

pub struct CaveRaycaster {
    settings: Arc<CaveSettings>,
    collision: MeshBuild,
}

impl CaveRaycaster {
    pub fn new(settings: Arc<CaveSettings>) -> Self {
        let collision = collision_mesh(&settings);
        log::debug!(
            "collision ring: {} tris, extent {}",
            collision.triangle_count(),
            settings.collision_extent()
        );
        Self {
            settings,
            collision,
        }
    }

    pub fn collision_mesh(&self) -> &MeshBuild {
        &self.collision
    }

    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let mut best: Option<(f32, usize)> = None;
        for t in 0..self.collision.triangle_count() {
            if let Some(d) = ray_triangle(ray, self.collision.triangle(t)) {
                if best.is_none_or(|(bd, _)| d < bd) {
                    best = Some((d, t));
                }
            }
        }
        best.map(|(t, triangle)| {
            let point = ray.at(t);
            RayHit {
                point,
                distance: (point - ray.origin).length(),
                triangle,
            }
        })
    }

    /// Maps a hit point to its floor and segment plus the placement anchors.
    pub fn resolve_hit(&self, hit: RayHit) -> RaycastCaveResult {
        let s = &*self.settings;
        let (raw_floor, floor_index) = floor_for_height(s, hit.point.y);
        let segment = segment_for_radians(s, segment_radians(hit.point));

        let mid = Vec3::from_angle_xz((segment as f32 + 0.5) * s.segment_angle());
        let y = raw_floor as f32 * s.floor_height() + 0.5 * s.floor_height();
        RaycastCaveResult {
            hit,
            raw_floor,
            floor_index,
            segment,
            segment_face: (mid * s.inner_radius()).with_y(y),
            segment_center: (mid * s.mean_radius()).with_y(y),
            building_anchor: building_anchor(s, raw_floor, segment as usize),
        }
    }

    pub fn raycast(&self, ray: &Ray) -> Option<RaycastCaveResult> {
        self.intersect(ray).map(|hit| self.resolve_hit(hit))
    }
}
