//! Build-wide constants and tunables.

use serde::{Deserialize, Serialize};

/// Distance skirt vertices are lowered below the tile edge.
pub const SKIRT_DEPTH: f32 = 10.0;

/// World units per UV repeat.
pub const UV_SCALE: f32 = 200.0;

/// Floor below which a vertex's selected splat strengths count as zero.
pub const WEIGHT_EPSILON: f32 = 1e-6;

/// Largest accepted subdivision count per tile edge.
pub const MAX_RESOLUTION: u32 = 2048;

/// Settings shared by every chunk build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChunkBuildSettings {
    /// How far the padding ring is pulled below the surface.
    /// Default: [`SKIRT_DEPTH`]
    pub skirt_depth: f32,

    /// World units per UV repeat.
    /// Default: [`UV_SCALE`]
    pub uv_scale: f32,

    /// Renormalization floor for splat weights.
    /// Default: [`WEIGHT_EPSILON`]
    pub weight_epsilon: f32,
}

impl Default for ChunkBuildSettings {
    fn default() -> Self {
        Self {
            skirt_depth: SKIRT_DEPTH,
            uv_scale: UV_SCALE,
            weight_epsilon: WEIGHT_EPSILON,
        }
    }
}

impl ChunkBuildSettings {
    pub fn with_skirt_depth(mut self, depth: f32) -> Self {
        self.skirt_depth = depth;
        self
    }

    pub fn with_uv_scale(mut self, scale: f32) -> Self {
        self.uv_scale = scale;
        self
    }

    pub fn with_weight_epsilon(mut self, epsilon: f32) -> Self {
        self.weight_epsilon = epsilon;
        self
    }

    /// Returns a description of the first invalid field.
    pub(crate) fn check(&self) -> Result<(), String> {
        if !(self.skirt_depth.is_finite() && self.skirt_depth >= 0.0) {
            return Err(format!(
                "skirt depth must be finite and non-negative, got {}",
                self.skirt_depth
            ));
        }
        if !(self.uv_scale.is_finite() && self.uv_scale > 0.0) {
            return Err(format!("uv scale must be positive, got {}", self.uv_scale));
        }
        if !(self.weight_epsilon.is_finite() && self.weight_epsilon > 0.0) {
            return Err(format!(
                "weight epsilon must be positive, got {}",
                self.weight_epsilon
            ));
        }
        Ok(())
    }
}
