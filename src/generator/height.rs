//! Fractal noise terrain height.

use super::{FractalNoise, GeneratorError, HeightGenerator, NoiseParams};

/// Height generator sampling a [`FractalNoise`] field.
///
/// # Example
/// ```
/// use bevy_terrain_splat::generator::{HeightGenerator, NoiseHeightGenerator, NoiseParams};
///
/// let generator = NoiseHeightGenerator::new(NoiseParams::terrain()).unwrap();
/// let h = generator.sample(10.0, 0.0, -25.0).unwrap();
/// assert!(h >= 0.0);
/// ```
#[derive(Debug)]
pub struct NoiseHeightGenerator {
    noise: FractalNoise,
}

impl NoiseHeightGenerator {
    pub fn new(params: NoiseParams) -> Result<Self, GeneratorError> {
        Ok(Self {
            noise: FractalNoise::new(params)?,
        })
    }

    pub fn params(&self) -> &NoiseParams {
        self.noise.params()
    }
}

impl HeightGenerator for NoiseHeightGenerator {
    fn sample(&self, x: f32, y: f32, z: f32) -> Result<f32, GeneratorError> {
        let h = self.noise.get_f32(x, y, z);
        if !h.is_finite() {
            return Err(GeneratorError::new(format!(
                "height noise produced {h} at ({x}, {y}, {z})"
            )));
        }
        Ok(h)
    }
}
