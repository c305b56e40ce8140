//! Video backend configuration snapshot consumed by the shader generators.
//!
//! Callers own the configuration and pass it by reference into every generator call; nothing in
//! this crate keeps a process-wide "active config".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stereoscopic 3D output mode.
///
/// Every mode other than [`StereoMode::Off`] renders both eyes into separate layers of a layered
/// render target; the modes only differ in how the presentation pass combines those layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StereoMode {
    #[default]
    Off,
    SideBySide,
    TopAndBottom,
    Anaglyph,
}

impl StereoMode {
    pub fn is_enabled(self) -> bool {
        self != StereoMode::Off
    }
}

/// Capabilities reported by the active graphics backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendInfo {
    /// Geometry shader invocations (`layout(invocations = N)` / `[instance(N)]`).
    pub supports_gs_instancing: bool,
    /// Explicit `binding = N` qualifiers on GLSL uniform blocks.
    pub supports_binding_layout: bool,
    pub supports_pixel_lighting: bool,
}

impl Default for BackendInfo {
    fn default() -> Self {
        Self {
            supports_gs_instancing: true,
            supports_binding_layout: true,
            supports_pixel_lighting: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub wireframe: bool,
    pub stereo_mode: StereoMode,
    /// Eye separation, in thousandths of clip-space units.
    pub stereo_depth: u32,
    /// Convergence distance in view-space units.
    pub stereo_convergence: u32,
    pub stereo_depth_percentage: u32,
    pub stereo_convergence_percentage: u32,
    pub stereo_swap_eyes: bool,
    pub enable_pixel_lighting: bool,
    pub backend_info: BackendInfo,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            wireframe: false,
            stereo_mode: StereoMode::Off,
            stereo_depth: 20,
            stereo_convergence: 20,
            stereo_depth_percentage: 100,
            stereo_convergence_percentage: 100,
            stereo_swap_eyes: false,
            enable_pixel_lighting: false,
            backend_info: BackendInfo::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid video config: {0}")]
    Json(#[from] serde_json::Error),
}

impl VideoConfig {
    /// Parse a configuration snapshot. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn stereo_enabled(&self) -> bool {
        self.stereo_mode.is_enabled()
    }
}
