//! Fractal noise shared by the reference generators.

use noise::{NoiseFn, Perlin, Simplex};
use serde::{Deserialize, Serialize};

use super::GeneratorError;

/// Gradient noise flavour used for every octave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseType {
    #[default]
    Simplex,
    Perlin,
}

/// Configuration of a fractal noise field.
///
/// This is the parameter record forwarded verbatim from a build request to a
/// generator constructor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoiseParams {
    /// Number of octaves summed.
    pub octaves: u32,
    /// Amplitude falloff; each octave is scaled by `2^-persistence`.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Exponent applied to the normalized `[0, 1]` sum. Values above 1 flatten
    /// lowlands and sharpen peaks.
    pub exponentiation: f64,
    /// World units per noise period of the first octave.
    pub scale: f64,
    pub noise_type: NoiseType,
    pub seed: u32,
    /// Output multiplier; the field ranges over `[0, height]`.
    pub height: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            exponentiation: 1.0,
            scale: 1.0,
            noise_type: NoiseType::Simplex,
            seed: 1,
            height: 1.0,
        }
    }
}

impl NoiseParams {
    /// Terrain defaults: broad rolling hills up to a few hundred units.
    pub fn terrain() -> Self {
        Self {
            octaves: 6,
            persistence: 0.707,
            lacunarity: 1.8,
            exponentiation: 4.5,
            scale: 1100.0,
            noise_type: NoiseType::Simplex,
            seed: 1,
            height: 300.0,
        }
    }

    /// Biome defaults: a slow single-octave moisture field in `[0, 1]`.
    pub fn biome() -> Self {
        Self {
            octaves: 2,
            persistence: 0.5,
            lacunarity: 2.0,
            exponentiation: 1.0,
            scale: 2048.0,
            noise_type: NoiseType::Simplex,
            seed: 2,
            height: 1.0,
        }
    }

    /// Color jitter defaults: fine grained variation in `[0, 1]`.
    pub fn color() -> Self {
        Self {
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            exponentiation: 1.0,
            scale: 256.0,
            noise_type: NoiseType::Simplex,
            seed: 3,
            height: 1.0,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_noise_type(mut self, noise_type: NoiseType) -> Self {
        self.noise_type = noise_type;
        self
    }

    /// Check the parameters describe a usable field.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.octaves == 0 {
            return Err(GeneratorError::new("noise octaves must be at least 1"));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(GeneratorError::new(format!(
                "noise scale must be positive, got {}",
                self.scale
            )));
        }
        let finite = [
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
            ("exponentiation", self.exponentiation),
            ("height", self.height),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(GeneratorError::new(format!(
                    "noise {name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

enum Source {
    Simplex(Simplex),
    Perlin(Perlin),
}

impl Source {
    #[inline]
    fn get(&self, p: [f64; 3]) -> f64 {
        match self {
            Source::Simplex(n) => n.get(p),
            Source::Perlin(n) => n.get(p),
        }
    }
}

/// Multi-octave noise field with output in `[0, params.height]`.
pub struct FractalNoise {
    params: NoiseParams,
    source: Source,
}

impl std::fmt::Debug for FractalNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FractalNoise")
            .field("params", &self.params)
            .finish()
    }
}

impl FractalNoise {
    pub fn new(params: NoiseParams) -> Result<Self, GeneratorError> {
        params.validate()?;
        let source = match params.noise_type {
            NoiseType::Simplex => Source::Simplex(Simplex::new(params.seed)),
            NoiseType::Perlin => Source::Perlin(Perlin::new(params.seed)),
        };
        Ok(Self { params, source })
    }

    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Sample the field at a world position.
    pub fn get(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = &self.params;
        let xs = x / p.scale;
        let ys = y / p.scale;
        let zs = z / p.scale;
        let falloff = 2f64.powf(-p.persistence);

        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut normalization = 0.0;
        let mut total = 0.0;

        for _ in 0..p.octaves {
            let n = self
                .source
                .get([xs * frequency, ys * frequency, zs * frequency]);
            total += (n * 0.5 + 0.5).clamp(0.0, 1.0) * amplitude;
            normalization += amplitude;
            amplitude *= falloff;
            frequency *= p.lacunarity;
        }

        if normalization > 0.0 {
            total /= normalization;
        }
        total.powf(p.exponentiation) * p.height
    }

    /// Sample the field and narrow to `f32`.
    #[inline]
    pub fn get_f32(&self, x: f32, y: f32, z: f32) -> f32 {
        self.get(x as f64, y as f64, z as f64) as f32
    }
}
