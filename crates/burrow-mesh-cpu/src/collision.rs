use burrow_world::CaveSettings;

use crate::cylinder::append_walls;
use crate::mesh_build::MeshBuild;

/// Full-ring inner wall spanning `±collision_extent` vertically.
///
/// Every floor shares it; a hit's height picks the floor.
pub fn collision_mesh(settings: &CaveSettings) -> MeshBuild {
    let extent = settings.collision_extent();
    let n = settings.radial_segments() as usize;
    let mut mb = MeshBuild::new();
    mb.reserve_quads(n);
    append_walls(
        &mut mb,
        settings,
        0,
        n,
        settings.inner_radius(),
        -extent,
        2.0 * extent,
    );
    mb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_the_configured_extent() {
        let s = CaveSettings::new(4.0, 0.5, 10.0, 14.0, 16)
            .unwrap()
            .with_collision_extent(50.0)
            .unwrap();
        let mb = collision_mesh(&s);
        assert_eq!(mb.triangle_count(), 32);
        assert_eq!(mb.position(0).y, 50.0);
        assert_eq!(mb.position(1).y, -50.0);
    }
}
