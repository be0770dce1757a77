use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::settings::SettingsError;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CaveConfig {
    #[serde(default)]
    pub cave: Cave,
    #[serde(default)]
    pub collision: Collision,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Cave {
    #[serde(default = "default_floor_height")]
    pub floor_height: f32,
    #[serde(default = "default_floor_thickness")]
    pub floor_thickness: f32,
    #[serde(default = "default_inner_radius")]
    pub inner_radius: f32,
    #[serde(default = "default_outer_radius")]
    pub outer_radius: f32,
    #[serde(default = "default_radial_segments")]
    pub radial_segments: u32,
}
fn default_floor_height() -> f32 {
    4.0
}
fn default_floor_thickness() -> f32 {
    0.5
}
fn default_inner_radius() -> f32 {
    10.0
}
fn default_outer_radius() -> f32 {
    14.0
}
fn default_radial_segments() -> u32 {
    32
}
impl Default for Cave {
    fn default() -> Self {
        Self {
            floor_height: default_floor_height(),
            floor_thickness: default_floor_thickness(),
            inner_radius: default_inner_radius(),
            outer_radius: default_outer_radius(),
            radial_segments: default_radial_segments(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Collision {
    /// Vertical half-extent of the raycast wall, above and below the cave origin.
    #[serde(default = "default_collision_extent")]
    pub extent: f32,
}
fn default_collision_extent() -> f32 {
    1000.0
}
impl Default for Collision {
    fn default() -> Self {
        Self {
            extent: default_collision_extent(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
}
fn default_workers() -> usize {
    1
}
impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

pub fn parse_config(toml_str: &str) -> Result<CaveConfig, SettingsError> {
    Ok(toml::from_str(toml_str)?)
}

pub fn load_config_from_path(path: &Path) -> Result<CaveConfig, SettingsError> {
    let s = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let cfg = parse_config(&s)?;
    log::info!("cave config loaded from {}", path.display());
    Ok(cfg)
}
