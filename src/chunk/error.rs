//! Chunk build failures.

use std::fmt;

use thiserror::Error;

use crate::generator::GeneratorError;
use crate::layers::LayerPaletteError;

/// Which generator a failure came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorStage {
    Height,
    Color,
    Biome,
}

impl fmt::Display for GeneratorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeneratorStage::Height => "height",
            GeneratorStage::Color => "color",
            GeneratorStage::Biome => "biome",
        })
    }
}

/// Errors that abort a chunk build. No buffers are produced alongside any of
/// them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChunkBuildError {
    #[error("Resolution must be at least 1, got {0}")]
    InvalidResolution(u32),

    #[error("Resolution {resolution} exceeds maximum ({max})")]
    ResolutionTooLarge { resolution: u32, max: u32 },

    #[error("Tile width must be positive and finite, got {0}")]
    InvalidWidth(f32),

    #[error("Tile offset must be finite, got {0:?}")]
    InvalidOffset([f32; 3]),

    #[error("Invalid build settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid layer palette: {0}")]
    Palette(#[from] LayerPaletteError),

    #[error("Failed to create {stage} generator: {source}")]
    GeneratorSetup {
        stage: GeneratorStage,
        #[source]
        source: GeneratorError,
    },

    #[error("The {stage} generator failed at ({x}, {z}): {source}")]
    Generator {
        stage: GeneratorStage,
        x: f32,
        z: f32,
        #[source]
        source: GeneratorError,
    },

    #[error("Height generator returned {value} at ({x}, {z})")]
    NonFiniteHeight { x: f32, z: f32, value: f32 },

    #[error("Color generator returned non-finite color {color:?} at ({x}, {z})")]
    NonFiniteColor { x: f32, z: f32, color: [f32; 3] },

    #[error("Biome generator returned {found} strengths for a palette of {expected} layers")]
    SplatLengthMismatch { expected: usize, found: usize },

    #[error("Biome generator returned strength {value} for layer '{layer}' at ({x}, {z})")]
    InvalidStrength {
        layer: String,
        value: f32,
        x: f32,
        z: f32,
    },
}
