//! Free-standing cylinder sections centred on the origin.

use std::f32::consts::TAU;

use crate::cylinder::append_arc_walls;
use crate::error::MeshError;
use crate::mesh_build::MeshBuild;

/// Shape of a vertical arc wall of `radians` sweep starting on +X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegmentArgs {
    pub radians: f32,
    pub radius: f32,
    pub height: f32,
    pub segments: u32,
}

impl ArcSegmentArgs {
    pub fn validate(&self) -> Result<(), MeshError> {
        if !(self.radians > 0.0 && self.radians <= TAU) {
            return Err(MeshError::InvalidArgument {
                name: "radians",
                reason: "must be in (0, 2π]",
            });
        }
        if !(self.radius > 0.0) {
            return Err(MeshError::InvalidArgument {
                name: "radius",
                reason: "must be positive",
            });
        }
        if !(self.height > 0.0) {
            return Err(MeshError::InvalidArgument {
                name: "height",
                reason: "must be positive",
            });
        }
        if self.segments == 0 {
            return Err(MeshError::InvalidArgument {
                name: "segments",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Builds the arc wall, vertically centred so it spans `±height / 2`.
pub fn arc_segment_mesh(args: &ArcSegmentArgs) -> Result<MeshBuild, MeshError> {
    args.validate()?;
    let mut mb = MeshBuild::new();
    mb.reserve_quads(args.segments as usize);
    append_arc_walls(
        &mut mb,
        args.segments as usize,
        0.0,
        args.radians,
        args.radius,
        -args.height * 0.5,
        args.height,
    );
    log::trace!(
        "arc segment: {} quads over {:.3} rad",
        args.segments,
        args.radians
    );
    Ok(mb)
}
