//! The terrain chunk mesh builder.

use bevy::log::{debug, trace};
use bevy::math::Vec3;

use super::buffers::ChunkMeshBuffers;
use super::error::{ChunkBuildError, GeneratorStage};
use super::grid::ChunkGrid;
use super::normals;
use super::params::BuildParameters;
use super::splat::SplatField;
use crate::generator::SurfacePoint;

/// Builds terrain chunk meshes.
///
/// A build is a pure function of its [`BuildParameters`]: it runs to
/// completion on the calling thread, keeps no state between calls, and
/// returns either the full set of buffers or one error. Builds of different
/// tiles can run in parallel on separate threads.
///
/// # Example
/// ```
/// use bevy::math::Vec3;
/// use bevy_terrain_splat::prelude::*;
///
/// let height = NoiseHeightGenerator::new(NoiseParams::terrain()).unwrap();
/// let biome = SplatBiomeGenerator::with_defaults(NoiseParams::biome()).unwrap();
/// let color = BiomeColorGenerator::new(NoiseParams::biome(), NoiseParams::color()).unwrap();
///
/// let params = BuildParameters::new(Vec3::ZERO, 100.0, 8, &height, &biome, &color);
/// let buffers = TerrainChunkBuilder::build(&params).unwrap();
/// assert_eq!(buffers.triangle_count(), 2 * 10 * 10);
/// ```
pub struct TerrainChunkBuilder;

impl TerrainChunkBuilder {
    pub fn build(params: &BuildParameters<'_>) -> Result<ChunkMeshBuffers, ChunkBuildError> {
        params.validate()?;
        debug!(
            "Building terrain chunk at {} (width {}, resolution {})",
            params.offset, params.width, params.resolution
        );

        let mut grid = ChunkGrid::new(params.offset, params.width, params.resolution);

        displace(&mut grid, params)?;
        resolve_colors(&mut grid, params)?;

        normals::accumulate_face_normals(&mut grid);
        normals::apply_skirt(&mut grid, params.settings.skirt_depth);
        normals::normalize_normals(&mut grid);

        let field = SplatField::sample(&grid, params.biome)?;
        let splats = field.resolve(
            &grid,
            params.biome.palette(),
            params.settings.weight_epsilon,
        );

        let buffers = ChunkMeshBuffers::flatten(&grid, &splats);
        trace!(
            "Terrain chunk at {} done: {} triangles, {} bytes",
            params.offset,
            buffers.triangle_count(),
            buffers.byte_len()
        );
        Ok(buffers)
    }
}

/// Sample heights and lift every vertex onto the surface.
///
/// UVs are a planar projection of the undisplaced world `(x, z)`, so height
/// never stretches them.
fn displace(grid: &mut ChunkGrid, params: &BuildParameters<'_>) -> Result<(), ChunkBuildError> {
    let uv_scale = params.settings.uv_scale;
    for v in grid.vertices.iter_mut() {
        let w = v.world;
        let height = params
            .height
            .sample(w.x, w.y, w.z)
            .map_err(|source| ChunkBuildError::Generator {
                stage: GeneratorStage::Height,
                x: w.x,
                z: w.z,
                source,
            })?;
        if !height.is_finite() {
            return Err(ChunkBuildError::NonFiniteHeight {
                x: w.x,
                z: w.z,
                value: height,
            });
        }

        v.height = height;
        v.position = w + Vec3::Y * height;
        v.uv = [w.x / uv_scale, w.z / uv_scale];
    }
    Ok(())
}

fn resolve_colors(grid: &mut ChunkGrid, params: &BuildParameters<'_>) -> Result<(), ChunkBuildError> {
    for v in grid.vertices.iter_mut() {
        let point = SurfacePoint::new(v.world.x, v.world.z, v.height);
        let color = params
            .color
            .resolve_color(point)
            .map_err(|source| ChunkBuildError::Generator {
                stage: GeneratorStage::Color,
                x: point.x,
                z: point.z,
                source,
            })?;
        if !color.iter().all(|c| c.is_finite()) {
            return Err(ChunkBuildError::NonFiniteColor {
                x: point.x,
                z: point.z,
                color,
            });
        }
        v.color = color;
    }
    Ok(())
}
