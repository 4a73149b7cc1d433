//! Gizmo tuning constants
//!
//! Defaults reproduce the classic editor feel: handles subtend a roughly
//! constant screen angle, position arrows are pushed apart so they do not
//! overlap at the origin, and hover feedback halves the handle colour.

use crate::error::{GizmoError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct GizmoConfig {
    /// Camera distance multiplier giving the gizmo's world size
    pub distance_factor: f32,
    /// Divides the gizmo size into the shared handle scale
    pub scale_divisor: f32,
    /// Position arrows sit this many gizmo sizes out along their axis
    pub position_offset_factor: f32,
    /// Emissive multiplier for hovered and armed handles
    pub dim_factor: f32,
    /// Emissive multiplier undoing one dim
    pub restore_factor: f32,
    /// Distance from a handle's centre to its head, in authored units
    pub head_offset: f32,
    /// Segment count for cylinders, cones and tori
    pub tessellation: u32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            distance_factor: 0.03,
            scale_divisor: 3.0,
            position_offset_factor: 1.3,
            dim_factor: 0.5,
            restore_factor: 2.0,
            head_offset: 5.0,
            tessellation: 35,
        }
    }
}

impl GizmoConfig {
    pub fn with_distance_factor(mut self, factor: f32) -> Self {
        self.distance_factor = factor;
        self
    }

    pub fn with_scale_divisor(mut self, divisor: f32) -> Self {
        self.scale_divisor = divisor;
        self
    }

    pub fn with_position_offset_factor(mut self, factor: f32) -> Self {
        self.position_offset_factor = factor;
        self
    }

    /// Sets both highlight factors; `restore` must undo `dim`
    pub fn with_highlight_factors(mut self, dim: f32, restore: f32) -> Self {
        self.dim_factor = dim;
        self.restore_factor = restore;
        self
    }

    pub fn with_tessellation(mut self, tessellation: u32) -> Self {
        self.tessellation = tessellation;
        self
    }

    /// Rejects configurations the gizmo cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("distance_factor", self.distance_factor),
            ("scale_divisor", self.scale_divisor),
            ("position_offset_factor", self.position_offset_factor),
            ("dim_factor", self.dim_factor),
            ("restore_factor", self.restore_factor),
            ("head_offset", self.head_offset),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GizmoError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if (self.dim_factor * self.restore_factor - 1.0).abs() > 1e-6 {
            return Err(GizmoError::InvalidConfig(format!(
                "restore_factor {} does not undo dim_factor {}",
                self.restore_factor, self.dim_factor
            )));
        }

        if self.tessellation < 3 {
            return Err(GizmoError::InvalidConfig(format!(
                "tessellation must be at least 3, got {}",
                self.tessellation
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GizmoConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        let config = GizmoConfig::default().with_distance_factor(0.0);
        assert!(matches!(config.validate(), Err(GizmoError::InvalidConfig(_))));

        let config = GizmoConfig::default().with_scale_divisor(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_mismatched_highlight_factors() {
        let config = GizmoConfig::default().with_highlight_factors(0.5, 1.5);
        assert!(config.validate().is_err());

        let config = GizmoConfig::default().with_highlight_factors(0.25, 4.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_coarse_tessellation() {
        let config = GizmoConfig::default().with_tessellation(2);
        assert!(config.validate().is_err());
    }
}
