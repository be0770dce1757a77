//! Cave settings, configuration, and the occupancy grid.
#![forbid(unsafe_code)]

pub mod building;
pub mod config;
pub mod grid;
pub mod settings;

pub use building::{Building, BuildingId, BuildingLedger, BuildingSpec, NULL_BUILDING_ID};
pub use config::{CaveConfig, RuntimeConfig, load_config_from_path, parse_config};
pub use grid::{OccupancyGrid, SegmentGrid};
pub use settings::{CaveSettings, SettingsError};
