use std::f32::consts::TAU;

use thiserror::Error;

use crate::config::CaveConfig;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid cave settings: {0}")]
    Invalid(&'static str),
    #[error("failed to parse cave config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read cave config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable dimensions of one cave. Shared by every floor and remesh job.
#[derive(Clone, Debug, PartialEq)]
pub struct CaveSettings {
    floor_height: f32,
    floor_thickness: f32,
    inner_radius: f32,
    outer_radius: f32,
    radial_segments: u32,
    collision_extent: f32,
}

impl CaveSettings {
    pub fn new(
        floor_height: f32,
        floor_thickness: f32,
        inner_radius: f32,
        outer_radius: f32,
        radial_segments: u32,
    ) -> Result<Self, SettingsError> {
        let settings = Self {
            floor_height,
            floor_thickness,
            inner_radius,
            outer_radius,
            radial_segments,
            collision_extent: 1000.0,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_config(cfg: &CaveConfig) -> Result<Self, SettingsError> {
        let c = &cfg.cave;
        Self::new(
            c.floor_height,
            c.floor_thickness,
            c.inner_radius,
            c.outer_radius,
            c.radial_segments,
        )?
        .with_collision_extent(cfg.collision.extent)
    }

    pub fn with_collision_extent(mut self, extent: f32) -> Result<Self, SettingsError> {
        if !(extent > 0.0 && extent.is_finite()) {
            return Err(SettingsError::Invalid("collision extent must be positive"));
        }
        self.collision_extent = extent;
        Ok(self)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let finite = [
            self.floor_height,
            self.floor_thickness,
            self.inner_radius,
            self.outer_radius,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(SettingsError::Invalid("dimensions must be finite"));
        }
        if self.floor_height <= 0.0 {
            return Err(SettingsError::Invalid("floor height must be positive"));
        }
        if self.floor_thickness <= 0.0 {
            return Err(SettingsError::Invalid("floor thickness must be positive"));
        }
        if self.floor_thickness >= self.floor_height {
            return Err(SettingsError::Invalid(
                "floor thickness must be less than floor height",
            ));
        }
        if self.inner_radius <= 0.0 {
            return Err(SettingsError::Invalid("inner radius must be positive"));
        }
        if self.outer_radius <= self.inner_radius {
            return Err(SettingsError::Invalid(
                "outer radius must be greater than inner radius",
            ));
        }
        if self.radial_segments == 0 {
            return Err(SettingsError::Invalid("radial segments must be positive"));
        }
        Ok(())
    }

    #[inline]
    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    #[inline]
    pub fn floor_thickness(&self) -> f32 {
        self.floor_thickness
    }

    #[inline]
    pub fn room_height(&self) -> f32 {
        self.floor_height - self.floor_thickness
    }

    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    #[inline]
    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    #[inline]
    pub fn mean_radius(&self) -> f32 {
        0.5 * (self.inner_radius + self.outer_radius)
    }

    #[inline]
    pub fn radial_segments(&self) -> u32 {
        self.radial_segments
    }

    #[inline]
    pub fn segment_angle(&self) -> f32 {
        TAU / self.radial_segments as f32
    }

    #[inline]
    pub fn collision_extent(&self) -> f32 {
        self.collision_extent
    }

    /// Wall radius for a depth class: unexcavated cells stop at the inner wall.
    #[inline]
    pub fn wall_radius(&self, depth: u32) -> f32 {
        if depth == 0 {
            self.inner_radius
        } else {
            self.outer_radius
        }
    }
}

impl Default for CaveSettings {
    fn default() -> Self {
        let c = crate::config::Cave::default();
        Self {
            floor_height: c.floor_height,
            floor_thickness: c.floor_thickness,
            inner_radius: c.inner_radius,
            outer_radius: c.outer_radius,
            radial_segments: c.radial_segments,
            collision_extent: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_dimensions() {
        let s = CaveSettings::new(4.0, 1.0, 10.0, 12.0, 8).unwrap();
        assert_eq!(s.room_height(), 3.0);
        assert!((s.segment_angle() - TAU / 8.0).abs() < 1e-6);
        assert_eq!(s.mean_radius(), 11.0);
        assert_eq!(s.wall_radius(0), 10.0);
        assert_eq!(s.wall_radius(3), 12.0);
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert!(CaveSettings::new(0.0, 0.5, 10.0, 12.0, 8).is_err());
        assert!(CaveSettings::new(4.0, 4.0, 10.0, 12.0, 8).is_err());
        assert!(CaveSettings::new(4.0, 0.5, -1.0, 12.0, 8).is_err());
        assert!(CaveSettings::new(4.0, 0.5, 10.0, 10.0, 8).is_err());
        assert!(CaveSettings::new(4.0, 0.5, 10.0, 12.0, 0).is_err());
        assert!(CaveSettings::new(f32::NAN, 0.5, 10.0, 12.0, 8).is_err());
    }

    #[test]
    fn rejects_non_positive_collision_extent() {
        let s = CaveSettings::default();
        assert!(s.clone().with_collision_extent(0.0).is_err());
        assert_eq!(s.with_collision_extent(50.0).unwrap().collision_extent(), 50.0);
    }
}
