//! The cave aggregate: occupancy edits, asynchronous floor remeshing,
//! building placement and ray queries.
#![forbid(unsafe_code)]

mod error;
pub mod raycast;
mod system;

pub use error::CaveError;
pub use raycast::{
    CaveRaycaster, RayHit, RaycastCaveResult, floor_for_height, segment_for_radians,
    segment_radians,
};
pub use system::CaveSystem;
