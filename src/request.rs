//! Serializable build requests and replies.
//!
//! A [`ChunkRequest`] carries everything needed to build one tile with the
//! reference generators: placement, size and the three noise configurations.
//! Field names are camelCase on the wire and also accept the names used by
//! older clients (`noiseParams`, `biomesParams`, `colourNoiseParams`).

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::chunk::{
    BuildParameters, ChunkBuildError, ChunkBuildSettings, ChunkMeshBuffers, GeneratorStage,
    TerrainChunkBuilder,
};
use crate::generator::{
    BiomeColorGenerator, GeneratorError, NoiseHeightGenerator, NoiseParams, SplatBiomeGenerator,
    SplatRules,
};
use crate::layers::LayerPalette;

/// One tile build request.
///
/// # Example
/// ```
/// use bevy_terrain_splat::request::ChunkRequest;
///
/// let request = ChunkRequest::new([0.0, 0.0, 0.0], 100.0, 4);
/// let buffers = request.build().unwrap();
/// assert_eq!(buffers.triangle_count(), 2 * 6 * 6);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkRequest {
    pub offset: [f32; 3],
    pub width: f32,
    pub resolution: u32,
    #[serde(default = "NoiseParams::terrain", alias = "noiseParams")]
    pub height_params: NoiseParams,
    #[serde(default = "NoiseParams::biome", alias = "biomesParams")]
    pub biome_params: NoiseParams,
    #[serde(default = "NoiseParams::color", alias = "colourNoiseParams")]
    pub color_params: NoiseParams,
    #[serde(default)]
    pub splat_rules: SplatRules,
    /// Layer names for the biome generator's palette. Defaults to
    /// [`DEFAULT_LAYERS`](crate::generator::DEFAULT_LAYERS).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<Vec<String>>,
    #[serde(default)]
    pub settings: ChunkBuildSettings,
}

impl ChunkRequest {
    /// Request with the reference noise presets.
    pub fn new(offset: [f32; 3], width: f32, resolution: u32) -> Self {
        Self {
            offset,
            width,
            resolution,
            height_params: NoiseParams::terrain(),
            biome_params: NoiseParams::biome(),
            color_params: NoiseParams::color(),
            splat_rules: SplatRules::default(),
            layers: None,
            settings: ChunkBuildSettings::default(),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.height_params.seed = seed;
        self.biome_params.seed = seed.wrapping_add(1);
        self.color_params.seed = seed.wrapping_add(2);
        self
    }

    pub fn with_layers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layers = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_settings(mut self, settings: ChunkBuildSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Construct the reference generators for this request.
    pub fn generators(&self) -> Result<ChunkGenerators, ChunkBuildError> {
        let setup = |stage: GeneratorStage| {
            move |source: GeneratorError| ChunkBuildError::GeneratorSetup { stage, source }
        };

        let height = NoiseHeightGenerator::new(self.height_params.clone())
            .map_err(setup(GeneratorStage::Height))?;
        let biome = match &self.layers {
            Some(names) => {
                let palette = LayerPalette::from_names(names)?;
                SplatBiomeGenerator::new(
                    self.biome_params.clone(),
                    palette,
                    self.splat_rules.clone(),
                )
            }
            None => SplatBiomeGenerator::with_defaults(self.biome_params.clone()),
        }
        .map_err(setup(GeneratorStage::Biome))?;
        let color = BiomeColorGenerator::new(self.biome_params.clone(), self.color_params.clone())
            .map_err(setup(GeneratorStage::Color))?;

        Ok(ChunkGenerators {
            height,
            biome,
            color,
        })
    }

    /// Build the tile on the calling thread.
    pub fn build(&self) -> Result<ChunkMeshBuffers, ChunkBuildError> {
        let generators = self.generators()?;
        let params = generators
            .parameters(
                Vec3::from_array(self.offset),
                self.width,
                self.resolution,
            )
            .with_settings(&self.settings);
        TerrainChunkBuilder::build(&params)
    }
}

/// The reference generators built from a [`ChunkRequest`].
#[derive(Debug)]
pub struct ChunkGenerators {
    pub height: NoiseHeightGenerator,
    pub biome: SplatBiomeGenerator,
    pub color: BiomeColorGenerator,
}

impl ChunkGenerators {
    /// Borrow the generators as build parameters with default settings.
    pub fn parameters(&self, offset: Vec3, width: f32, resolution: u32) -> BuildParameters<'_> {
        BuildParameters::new(
            offset,
            width,
            resolution,
            &self.height,
            &self.biome,
            &self.color,
        )
    }
}

/// Outcome of one build, either the full buffers or one error message.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildReply {
    Built(ChunkMeshBuffers),
    Failed(String),
}

impl BuildReply {
    pub fn is_built(&self) -> bool {
        matches!(self, Self::Built(_))
    }

    pub fn buffers(&self) -> Option<&ChunkMeshBuffers> {
        match self {
            Self::Built(buffers) => Some(buffers),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Built(_) => None,
            Self::Failed(message) => Some(message),
        }
    }
}

impl From<Result<ChunkMeshBuffers, ChunkBuildError>> for BuildReply {
    fn from(result: Result<ChunkMeshBuffers, ChunkBuildError>) -> Self {
        match result {
            Ok(buffers) => Self::Built(buffers),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}
