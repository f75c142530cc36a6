//! Per-triangle texture splat resolution.
//!
//! A vertex may have affinity for many layers, but the renderer blends only
//! four per triangle, and those four must be the same at all three corners
//! for interpolation across the face to make sense. Each triangle therefore
//! picks the four layers with the largest strength summed over its three
//! vertices, and every vertex renormalizes its own strengths over that set.

use bevy::math::Vec3;

use super::error::{ChunkBuildError, GeneratorStage};
use super::grid::ChunkGrid;
use crate::generator::{BiomeGenerator, SurfacePoint};
use crate::layers::{LayerPalette, SPLAT_CHANNELS};
use crate::mesh::SplatVertex;

/// Raw strengths of every grid vertex, `layers` entries per vertex.
pub(crate) struct SplatField {
    layers: usize,
    strengths: Vec<f32>,
}

impl SplatField {
    /// Query the biome generator once per grid vertex.
    ///
    /// Normals must already be final; the generator sees the unit normal and
    /// the +Y up vector.
    pub fn sample(grid: &ChunkGrid, biome: &dyn BiomeGenerator) -> Result<Self, ChunkBuildError> {
        let palette = biome.palette();
        let layers = palette.len();
        let mut strengths = Vec::with_capacity(grid.vertices.len() * layers);

        for v in &grid.vertices {
            let point = SurfacePoint::new(v.world.x, v.world.z, v.height);
            let sample = biome
                .resolve_splat(point, v.normal, Vec3::Y)
                .map_err(|source| ChunkBuildError::Generator {
                    stage: GeneratorStage::Biome,
                    x: point.x,
                    z: point.z,
                    source,
                })?;

            if sample.len() != layers {
                return Err(ChunkBuildError::SplatLengthMismatch {
                    expected: layers,
                    found: sample.len(),
                });
            }

            if let Some((slot, &value)) = sample
                .iter()
                .enumerate()
                .find(|(_, s)| !(s.is_finite() && **s >= 0.0))
            {
                return Err(ChunkBuildError::InvalidStrength {
                    layer: palette.layers()[slot].name.clone(),
                    value,
                    x: point.x,
                    z: point.z,
                });
            }

            strengths.extend_from_slice(&sample);
        }

        Ok(Self { layers, strengths })
    }

    #[inline]
    fn vertex(&self, index: usize) -> &[f32] {
        &self.strengths[index * self.layers..(index + 1) * self.layers]
    }

    /// Resolve every triangle of the grid, three [`SplatVertex`] per triangle
    /// in triangle order.
    pub fn resolve(&self, grid: &ChunkGrid, palette: &LayerPalette, epsilon: f32) -> Vec<SplatVertex> {
        let mut out = Vec::with_capacity(grid.triangles.len() * 3);
        let mut combined = vec![0.0; self.layers];
        let mut order = Vec::with_capacity(self.layers);

        for tri in &grid.triangles {
            let corners = tri.map(|v| self.vertex(v));
            for (slot, total) in combined.iter_mut().enumerate() {
                *total = corners[0][slot] + corners[1][slot] + corners[2][slot];
            }

            let top = select_layers(&combined, &mut order);
            // Weakest first, strongest last.
            let slots = [top[3], top[2], top[1], top[0]];
            let layers = slots.map(|s| palette.layers()[s].texture_index);

            for strengths in corners {
                let selected = slots.map(|s| strengths[s]);
                out.push(SplatVertex::normalized(layers, selected, epsilon));
            }
        }

        out
    }
}

/// Palette slots of the four layers with the largest combined strength,
/// strongest first. Ties keep palette order.
pub(crate) fn select_layers(combined: &[f32], order: &mut Vec<usize>) -> [usize; SPLAT_CHANNELS] {
    order.clear();
    order.extend(0..combined.len());
    order.sort_by(|&a, &b| combined[b].total_cmp(&combined[a]));
    [order[0], order[1], order[2], order[3]]
}
