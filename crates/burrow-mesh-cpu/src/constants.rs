//! Shared constants for burrow-mesh-cpu.

pub(crate) const VERTICES_PER_QUAD: usize = 4;
pub(crate) const INDICES_PER_QUAD: usize = 6; // two triangles

/// A swept column is one vertex pair (top/bottom or inner/outer).
pub const VERTICES_PER_COLUMN: usize = 2;
