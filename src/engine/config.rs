//! Viewer configuration, loaded from an optional JSON file.

use serde::{ Deserialize, Serialize };
use std::path::Path;

use crate::engine::error::ConfigError;
use crate::engine::geometry::{ SurfaceParams, MAX_DRAW_VERTICES };
use crate::engine::utils::math::Vec3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kiss Surface".to_string(),
            width: 800,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub surface: SurfaceParams,
    /// Initial light position, in view space.
    pub light_position: Vec3,
    pub surface_color: [f32; 4],
    /// Distance the trackball pulls the scene back along -z.
    pub view_distance: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            surface: SurfaceParams::default(),
            light_position: [0.0, 0.0, 0.0],
            surface_color: [0.8, 0.6, 0.2, 1.0],
            view_distance: 0.0,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.surface.u_step_degrees;
        if !step.is_finite() || step <= 0.0 || step > 360.0 {
            return Err(
                ConfigError::Invalid(format!("surface.u_step_degrees must be in (0, 360], got {step}"))
            );
        }
        if self.surface.z_scale == 0 {
            return Err(ConfigError::Invalid("surface.z_scale must be at least 1".to_string()));
        }
        if self.surface.vertex_count().is_none() {
            return Err(
                ConfigError::Invalid(
                    format!(
                        "surface grid u_step_degrees={step} z_scale={} exceeds {MAX_DRAW_VERTICES} vertices",
                        self.surface.z_scale
                    )
                )
            );
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        if !self.light_position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid("light_position must be finite".to_string()));
        }
        if !self.view_distance.is_finite() {
            return Err(ConfigError::Invalid("view_distance must be finite".to_string()));
        }
        Ok(())
    }
}
