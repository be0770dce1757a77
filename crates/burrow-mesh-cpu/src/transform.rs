use burrow_geom::{Mat4, Vec3};

use crate::mesh_build::MeshBuild;

/// Applies `m` to every position (w = 1) and normal (w = 0) in place.
///
/// Normals are not renormalised or inverse-transposed: do not pass a
/// non-uniform scale.
pub fn transform_mesh(mb: &mut MeshBuild, m: &Mat4) {
    for p in mb.pos.chunks_exact_mut(3) {
        let v = m.transform_point(Vec3::new(p[0], p[1], p[2]));
        p.copy_from_slice(&[v.x, v.y, v.z]);
    }
    for n in mb.norm.chunks_exact_mut(3) {
        let v = m.transform_vector(Vec3::new(n[0], n[1], n[2]));
        n.copy_from_slice(&[v.x, v.y, v.z]);
    }
}
