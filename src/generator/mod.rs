//! Height, biome and color generator contracts.
//!
//! The chunk builder consumes three deterministic generators:
//! - [`HeightGenerator`]: scalar terrain height at a world position
//! - [`ColorGenerator`]: vertex color at a surface point
//! - [`BiomeGenerator`]: raw splat strength per texture layer at a surface point
//!
//! Same inputs must always produce the same outputs. Neighboring chunks sample
//! the same world positions along their shared edge, so any nondeterminism
//! shows up as a visible seam.
//!
//! Reference implementations driven by fractal noise live in the submodules.

use bevy::math::Vec3;
use thiserror::Error;

use crate::layers::LayerPalette;

mod biome;
mod color;
mod fractal;
mod height;

pub use biome::{DEFAULT_LAYERS, SplatBiomeGenerator, SplatRules};
pub use color::BiomeColorGenerator;
pub use fractal::{FractalNoise, NoiseParams, NoiseType};
pub use height::NoiseHeightGenerator;

/// Horizontal world position of a vertex plus its resolved height.
///
/// Color and splat generators see the undisplaced position, never the
/// displaced mesh vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfacePoint {
    pub x: f32,
    pub z: f32,
    pub height: f32,
}

impl SurfacePoint {
    #[inline]
    pub const fn new(x: f32, z: f32, height: f32) -> Self {
        Self { x, z, height }
    }
}

/// A fault raised by a generator.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct GeneratorError {
    message: String,
}

impl GeneratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Samples terrain height.
pub trait HeightGenerator {
    /// Height at the given pre-displacement world position.
    fn sample(&self, x: f32, y: f32, z: f32) -> Result<f32, GeneratorError>;
}

/// Resolves vertex colors.
pub trait ColorGenerator {
    /// RGB color in `[0, 1]` for a surface point.
    fn resolve_color(&self, point: SurfacePoint) -> Result<[f32; 3], GeneratorError>;
}

/// Resolves raw texture-layer strengths.
pub trait BiomeGenerator {
    /// The layers strengths are reported for. Must hold at least
    /// [`SPLAT_CHANNELS`](crate::layers::SPLAT_CHANNELS) layers.
    fn palette(&self) -> &LayerPalette;

    /// Raw, non-normalized strength of every palette layer at a surface point.
    ///
    /// The returned vector is parallel to [`LayerPalette::layers`]; every
    /// entry must be finite and non-negative.
    fn resolve_splat(
        &self,
        point: SurfacePoint,
        normal: Vec3,
        up: Vec3,
    ) -> Result<Vec<f32>, GeneratorError>;
}

impl<T: HeightGenerator + ?Sized> HeightGenerator for &T {
    #[inline]
    fn sample(&self, x: f32, y: f32, z: f32) -> Result<f32, GeneratorError> {
        (**self).sample(x, y, z)
    }
}

impl<T: ColorGenerator + ?Sized> ColorGenerator for &T {
    #[inline]
    fn resolve_color(&self, point: SurfacePoint) -> Result<[f32; 3], GeneratorError> {
        (**self).resolve_color(point)
    }
}

impl<T: BiomeGenerator + ?Sized> BiomeGenerator for &T {
    #[inline]
    fn palette(&self) -> &LayerPalette {
        (**self).palette()
    }

    #[inline]
    fn resolve_splat(
        &self,
        point: SurfacePoint,
        normal: Vec3,
        up: Vec3,
    ) -> Result<Vec<f32>, GeneratorError> {
        (**self).resolve_splat(point, normal, up)
    }
}

/// Clamps a value into `[0, 1]`.
#[inline]
pub(crate) fn saturate(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}
