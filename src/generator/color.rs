//! Whittaker-style vertex colors.

use bevy::math::Vec3;

use super::{ColorGenerator, FractalNoise, GeneratorError, NoiseParams, SurfacePoint, saturate};

/// Height at which colors reach their alpine end.
const ALPINE_HEIGHT: f32 = 100.0;

const ARID_LOW: Vec3 = Vec3::new(0.93, 0.84, 0.62);
const ARID_HIGH: Vec3 = Vec3::new(0.56, 0.47, 0.38);
const HUMID_LOW: Vec3 = Vec3::new(0.38, 0.56, 0.27);
const HUMID_HIGH: Vec3 = Vec3::new(0.92, 0.93, 0.95);

/// Color generator interpolating a moisture/altitude table.
///
/// Moisture comes from the biome noise field so colors line up with the
/// splat layers; a second noise field adds small brightness jitter.
#[derive(Debug)]
pub struct BiomeColorGenerator {
    moisture: FractalNoise,
    jitter: FractalNoise,
    jitter_strength: f32,
}

impl BiomeColorGenerator {
    pub fn new(biome: NoiseParams, color: NoiseParams) -> Result<Self, GeneratorError> {
        Ok(Self {
            moisture: FractalNoise::new(biome)?,
            jitter: FractalNoise::new(color)?,
            jitter_strength: 0.1,
        })
    }

    /// Set the brightness jitter amplitude (0 disables jitter).
    pub fn with_jitter_strength(mut self, strength: f32) -> Self {
        self.jitter_strength = strength;
        self
    }
}

impl ColorGenerator for BiomeColorGenerator {
    fn resolve_color(&self, point: SurfacePoint) -> Result<[f32; 3], GeneratorError> {
        let m = saturate(self.moisture.get_f32(point.x, 0.0, point.z));
        let h = saturate(point.height / ALPINE_HEIGHT);

        let low = ARID_LOW.lerp(HUMID_LOW, m);
        let high = ARID_HIGH.lerp(HUMID_HIGH, m);
        let base = low.lerp(high, h);

        let j = saturate(self.jitter.get_f32(point.x, 0.0, point.z)) * 2.0 - 1.0;
        let c = (base * (1.0 + j * self.jitter_strength)).clamp(Vec3::ZERO, Vec3::ONE);

        Ok(c.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_in_unit_range() {
        let g = BiomeColorGenerator::new(NoiseParams::biome(), NoiseParams::color())
            .unwrap()
            .with_jitter_strength(0.5);
        for i in 0..50 {
            let p = SurfacePoint::new(i as f32 * 91.0, i as f32 * -13.0, i as f32 * 7.0 - 40.0);
            let c = g.resolve_color(p).unwrap();
            assert!(c.iter().all(|v| (0.0..=1.0).contains(v)), "{c:?}");
        }
    }

    #[test]
    fn test_no_jitter_is_table_lookup() {
        let g = BiomeColorGenerator::new(NoiseParams::biome().with_height(0.0), NoiseParams::color())
            .unwrap()
            .with_jitter_strength(0.0);
        let c = g.resolve_color(SurfacePoint::new(5.0, 5.0, 0.0)).unwrap();
        assert_eq!(c, ARID_LOW.to_array());
    }
}
