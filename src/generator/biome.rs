//! Moisture, altitude and slope driven splat strengths.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    BiomeGenerator, FractalNoise, GeneratorError, NoiseParams, SurfacePoint, saturate,
};
use crate::layers::LayerPalette;

/// Layer names the reference biome generator assigns strength to.
pub const DEFAULT_LAYERS: [&str; 7] = [
    "dirt",
    "grass",
    "gravel",
    "rock",
    "sand",
    "snow",
    "snowy_rock",
];

/// Thresholds controlling where each layer appears.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplatRules {
    /// Heights below this fade into sand.
    pub sand_height: f32,
    /// Heights above this fade into snow.
    pub snow_height: f32,
    /// Height range over which snow reaches full strength.
    pub snow_blend: f32,
    /// Slope (`1 - normal·up`) at which rock starts to show.
    pub steep_start: f32,
    /// Slope range over which rock reaches full strength.
    pub steep_range: f32,
    /// Share of humid ground given to dirt.
    pub dirt_share: f32,
}

impl Default for SplatRules {
    fn default() -> Self {
        Self {
            sand_height: 5.0,
            snow_height: 125.0,
            snow_blend: 25.0,
            steep_start: 0.2,
            steep_range: 0.3,
            dirt_share: 0.25,
        }
    }
}

impl SplatRules {
    fn validate(&self) -> Result<(), GeneratorError> {
        if !(self.snow_blend > 0.0 && self.steep_range > 0.0 && self.sand_height > 0.0) {
            return Err(GeneratorError::new(
                "splat rule ranges (sand_height, snow_blend, steep_range) must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Roles {
    dirt: usize,
    grass: usize,
    gravel: usize,
    rock: usize,
    sand: usize,
    snow: usize,
    snowy_rock: usize,
}

impl Roles {
    fn resolve(palette: &LayerPalette) -> Result<Self, GeneratorError> {
        let slot = |name: &str| {
            palette.slot_of(name).ok_or_else(|| {
                GeneratorError::new(format!("layer palette has no '{name}' layer"))
            })
        };
        Ok(Self {
            dirt: slot("dirt")?,
            grass: slot("grass")?,
            gravel: slot("gravel")?,
            rock: slot("rock")?,
            sand: slot("sand")?,
            snow: slot("snow")?,
            snowy_rock: slot("snowy_rock")?,
        })
    }
}

/// Biome generator mixing a fixed set of terrain layers.
///
/// Grass is the base layer. Dry areas (low moisture) turn to gravel, humid
/// areas pick up some dirt, low ground fades to sand, high ground to snow and
/// steep ground to rock (snowy rock above the snow line). Strengths of one
/// sample always sum to 1.
///
/// The palette may hold extra layers beyond [`DEFAULT_LAYERS`]; they always
/// get zero strength.
#[derive(Debug)]
pub struct SplatBiomeGenerator {
    palette: LayerPalette,
    moisture: FractalNoise,
    rules: SplatRules,
    roles: Roles,
}

impl SplatBiomeGenerator {
    pub fn new(
        params: NoiseParams,
        palette: LayerPalette,
        rules: SplatRules,
    ) -> Result<Self, GeneratorError> {
        rules.validate()?;
        let roles = Roles::resolve(&palette)?;
        Ok(Self {
            palette,
            moisture: FractalNoise::new(params)?,
            rules,
            roles,
        })
    }

    /// Generator over [`DEFAULT_LAYERS`] with default rules.
    pub fn with_defaults(params: NoiseParams) -> Result<Self, GeneratorError> {
        let palette = LayerPalette::from_names(DEFAULT_LAYERS)
            .map_err(|e| GeneratorError::new(e.to_string()))?;
        Self::new(params, palette, SplatRules::default())
    }

    pub fn rules(&self) -> &SplatRules {
        &self.rules
    }

    /// Moisture in `[0, 1]` at a horizontal position.
    pub fn moisture(&self, x: f32, z: f32) -> f32 {
        saturate(self.moisture.get_f32(x, 0.0, z))
    }
}

/// Moves `amount` of the total strength onto `slot`, scaling the rest down.
fn blend(strengths: &mut [f32], slot: usize, amount: f32) {
    let amount = saturate(amount);
    for s in strengths.iter_mut() {
        *s *= 1.0 - amount;
    }
    strengths[slot] += amount;
}

impl BiomeGenerator for SplatBiomeGenerator {
    fn palette(&self) -> &LayerPalette {
        &self.palette
    }

    fn resolve_splat(
        &self,
        point: SurfacePoint,
        normal: Vec3,
        up: Vec3,
    ) -> Result<Vec<f32>, GeneratorError> {
        let r = &self.rules;
        let roles = self.roles;
        let m = self.moisture(point.x, point.z);
        let h = point.height;
        let slope = saturate(1.0 - normal.dot(up));

        let mut strengths = vec![0.0; self.palette.len()];
        strengths[roles.grass] = 1.0;

        blend(&mut strengths, roles.gravel, 1.0 - m);
        blend(&mut strengths, roles.dirt, r.dirt_share * m);

        if h < r.sand_height {
            blend(&mut strengths, roles.sand, 1.0 - h / r.sand_height);
        } else if h > r.snow_height {
            blend(&mut strengths, roles.snow, (h - r.snow_height) / r.snow_blend);
        }

        let steep = saturate((slope - r.steep_start) / r.steep_range);
        let cliff = if h > r.snow_height {
            roles.snowy_rock
        } else {
            roles.rock
        };
        blend(&mut strengths, cliff, steep);

        Ok(strengths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> SplatBiomeGenerator {
        SplatBiomeGenerator::with_defaults(NoiseParams::biome()).unwrap()
    }

    fn strongest(g: &SplatBiomeGenerator, s: &[f32]) -> String {
        let (slot, _) = s
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap();
        g.palette().get(slot).unwrap().name.clone()
    }

    #[test]
    fn test_strengths_partition() {
        let g = generator();
        let s = g
            .resolve_splat(SurfacePoint::new(40.0, -90.0, 60.0), Vec3::Y, Vec3::Y)
            .unwrap();
        assert_eq!(s.len(), DEFAULT_LAYERS.len());
        assert!(s.iter().all(|v| *v >= 0.0));
        assert!((s.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_steep_ground_is_rock() {
        let g = generator();
        let wall = Vec3::new(1.0, 0.05, 0.0).normalize();
        let s = g
            .resolve_splat(SurfacePoint::new(0.0, 0.0, 60.0), wall, Vec3::Y)
            .unwrap();
        assert_eq!(strongest(&g, &s), "rock");

        let s = g
            .resolve_splat(SurfacePoint::new(0.0, 0.0, 400.0), wall, Vec3::Y)
            .unwrap();
        assert_eq!(strongest(&g, &s), "snowy_rock");
    }

    #[test]
    fn test_low_flat_ground_is_sand() {
        let g = generator();
        let s = g
            .resolve_splat(SurfacePoint::new(0.0, 0.0, -3.0), Vec3::Y, Vec3::Y)
            .unwrap();
        assert_eq!(strongest(&g, &s), "sand");
    }

    #[test]
    fn test_high_flat_ground_is_snow() {
        let g = generator();
        let s = g
            .resolve_splat(SurfacePoint::new(0.0, 0.0, 500.0), Vec3::Y, Vec3::Y)
            .unwrap();
        assert_eq!(strongest(&g, &s), "snow");
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let palette = LayerPalette::from_names(["grass", "rock", "sand", "snow"]).unwrap();
        let err =
            SplatBiomeGenerator::new(NoiseParams::biome(), palette, SplatRules::default())
                .unwrap_err();
        assert!(err.message().contains("dirt"));
    }
}
