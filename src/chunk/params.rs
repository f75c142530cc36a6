//! Inputs of a single chunk build.

use bevy::math::Vec3;

use super::error::ChunkBuildError;
use super::settings::{ChunkBuildSettings, MAX_RESOLUTION};
use crate::generator::{BiomeGenerator, ColorGenerator, HeightGenerator};

/// Everything one chunk build reads. Immutable for the duration of the build.
///
/// # Example
/// ```ignore
/// let settings = ChunkBuildSettings::default().with_skirt_depth(4.0);
/// let params = BuildParameters::new(Vec3::ZERO, 100.0, 32, &height, &biome, &color)
///     .with_settings(&settings);
/// let buffers = TerrainChunkBuilder::build(&params)?;
/// ```
#[derive(Clone, Copy)]
pub struct BuildParameters<'a> {
    /// Tile center in world units.
    pub offset: Vec3,
    /// Tile edge length.
    pub width: f32,
    /// Subdivisions per tile edge.
    pub resolution: u32,
    pub height: &'a dyn HeightGenerator,
    pub biome: &'a dyn BiomeGenerator,
    pub color: &'a dyn ColorGenerator,
    pub settings: &'a ChunkBuildSettings,
}

static DEFAULT_SETTINGS: ChunkBuildSettings = ChunkBuildSettings {
    skirt_depth: super::settings::SKIRT_DEPTH,
    uv_scale: super::settings::UV_SCALE,
    weight_epsilon: super::settings::WEIGHT_EPSILON,
};

impl<'a> BuildParameters<'a> {
    /// Parameters with default [`ChunkBuildSettings`].
    pub fn new(
        offset: Vec3,
        width: f32,
        resolution: u32,
        height: &'a dyn HeightGenerator,
        biome: &'a dyn BiomeGenerator,
        color: &'a dyn ColorGenerator,
    ) -> Self {
        Self {
            offset,
            width,
            resolution,
            height,
            biome,
            color,
            settings: &DEFAULT_SETTINGS,
        }
    }

    pub fn with_settings(mut self, settings: &'a ChunkBuildSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Reject malformed parameters before any generator runs.
    pub fn validate(&self) -> Result<(), ChunkBuildError> {
        if self.resolution == 0 {
            return Err(ChunkBuildError::InvalidResolution(self.resolution));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(ChunkBuildError::ResolutionTooLarge {
                resolution: self.resolution,
                max: MAX_RESOLUTION,
            });
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ChunkBuildError::InvalidWidth(self.width));
        }
        if !self.offset.is_finite() {
            return Err(ChunkBuildError::InvalidOffset(self.offset.to_array()));
        }
        self.settings
            .check()
            .map_err(ChunkBuildError::InvalidSettings)
    }
}

impl std::fmt::Debug for BuildParameters<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildParameters")
            .field("offset", &self.offset)
            .field("width", &self.width)
            .field("resolution", &self.resolution)
            .field("layers", &self.biome.palette().len())
            .field("settings", self.settings)
            .finish_non_exhaustive()
    }
}
