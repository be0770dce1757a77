use burrow_geom::{Vec2, Vec3};

use crate::constants::{INDICES_PER_QUAD, VERTICES_PER_QUAD};

/// Growable vertex/index buffers for one mesh under construction.
///
/// Positions and normals are flat `x,y,z` triples, UVs flat `u,v` pairs, all
/// index-aligned. Indices form a triangle list.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all arrays but retains capacity for reuse.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.idx.clear();
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * VERTICES_PER_QUAD * 3);
        self.norm.reserve(n_quads * VERTICES_PER_QUAD * 3);
        self.uv.reserve(n_quads * VERTICES_PER_QUAD * 2);
        self.idx.reserve(n_quads * INDICES_PER_QUAD);
    }

    /// Appends one vertex and returns its index.
    #[inline]
    pub fn push_vertex(&mut self, p: Vec3, n: Vec3, uv: Vec2) -> u32 {
        let i = self.vertex_count() as u32;
        self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        self.norm.extend_from_slice(&[n.x, n.y, n.z]);
        self.uv.extend_from_slice(&[uv.x, uv.y]);
        i
    }

    #[inline]
    pub fn push_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.idx.extend_from_slice(&[i0, i1, i2]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.idx.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.norm[i * 3], self.norm[i * 3 + 1], self.norm[i * 3 + 2])
    }

    #[inline]
    pub fn tex_coord(&self, i: usize) -> Vec2 {
        Vec2::new(self.uv[i * 2], self.uv[i * 2 + 1])
    }

    /// Corner positions of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [Vec3; 3] {
        let i = &self.idx[t * 3..t * 3 + 3];
        [
            self.position(i[0] as usize),
            self.position(i[1] as usize),
            self.position(i[2] as usize),
        ]
    }

    /// Checks buffer alignment and that every index names an existing vertex.
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertex_count();
        self.pos.len() % 3 == 0
            && self.norm.len() == self.pos.len()
            && self.uv.len() == n * 2
            && self.idx.len() % 3 == 0
            && self.idx.iter().all(|&i| (i as usize) < n)
    }

    /// Debug-build assertion of [`MeshBuild::is_well_formed`].
    #[inline]
    pub fn debug_validate(&self) {
        debug_assert!(
            self.is_well_formed(),
            "malformed mesh: {} verts, {} indices",
            self.vertex_count(),
            self.idx.len()
        );
    }
}
