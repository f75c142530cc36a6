use std::collections::HashMap;

use bevy::math::Vec3;
use bevy_terrain_splat::prelude::*;

struct ConstantHeight(f32);

impl HeightGenerator for ConstantHeight {
    fn sample(&self, _x: f32, _y: f32, _z: f32) -> Result<f32, GeneratorError> {
        Ok(self.0)
    }
}

struct Gray;

impl ColorGenerator for Gray {
    fn resolve_color(&self, _point: SurfacePoint) -> Result<[f32; 3], GeneratorError> {
        Ok([0.5, 0.5, 0.5])
    }
}

/// Returns the same strengths everywhere.
struct UniformBiome {
    palette: LayerPalette,
    strengths: Vec<f32>,
}

impl UniformBiome {
    fn grass_only() -> Self {
        Self {
            palette: LayerPalette::from_names(["grass", "dummy_a", "dummy_b", "dummy_c"]).unwrap(),
            strengths: vec![1.0, 0.0, 0.0, 0.0],
        }
    }
}

impl BiomeGenerator for UniformBiome {
    fn palette(&self) -> &LayerPalette {
        &self.palette
    }

    fn resolve_splat(
        &self,
        _point: SurfacePoint,
        _normal: Vec3,
        _up: Vec3,
    ) -> Result<Vec<f32>, GeneratorError> {
        Ok(self.strengths.clone())
    }
}

struct FailingHeight;

impl HeightGenerator for FailingHeight {
    fn sample(&self, _x: f32, _y: f32, _z: f32) -> Result<f32, GeneratorError> {
        Err(GeneratorError::new("height table missing"))
    }
}

/// Gentle slope; heights stay well below the skirt depth.
struct SlopedHeight;

impl HeightGenerator for SlopedHeight {
    fn sample(&self, x: f32, _y: f32, z: f32) -> Result<f32, GeneratorError> {
        Ok(0.1 + 0.013 * x + 0.007 * z)
    }
}

/// Six layers; no affinity for any of them west of x = 0.
struct StripeBiome {
    palette: LayerPalette,
}

impl StripeBiome {
    fn new() -> Self {
        Self {
            palette: LayerPalette::from_names(["a", "b", "c", "d", "e", "f"]).unwrap(),
        }
    }
}

impl BiomeGenerator for StripeBiome {
    fn palette(&self) -> &LayerPalette {
        &self.palette
    }

    fn resolve_splat(
        &self,
        point: SurfacePoint,
        _normal: Vec3,
        _up: Vec3,
    ) -> Result<Vec<f32>, GeneratorError> {
        if point.x < 0.0 {
            Ok(vec![0.0; 6])
        } else {
            Ok(vec![0.2, 0.0, 0.5, 0.0, 0.1, 0.3])
        }
    }
}

fn reference_request(offset: [f32; 3], resolution: u32) -> ChunkRequest {
    ChunkRequest::new(offset, 100.0, resolution)
}

fn build_flat(resolution: u32) -> ChunkMeshBuffers {
    let height = ConstantHeight(0.0);
    let biome = UniformBiome::grass_only();
    let params = BuildParameters::new(Vec3::ZERO, 100.0, resolution, &height, &biome, &Gray);
    TerrainChunkBuilder::build(&params).unwrap()
}

#[test]
fn identical_inputs_build_identical_buffers() {
    let a = reference_request([250.0, 0.0, -750.0], 12).build().unwrap();
    let b = reference_request([250.0, 0.0, -750.0], 12).build().unwrap();

    for kind in BufferKind::ALL {
        assert_eq!(a.bytes(kind), b.bytes(kind), "{} differ", kind.name());
    }
}

#[test]
fn buffer_lengths_follow_resolution() {
    for resolution in [1, 3, 16] {
        let buffers = reference_request([0.0; 3], resolution).build().unwrap();
        let cells = resolution as usize + 2;
        let triangles = 2 * cells * cells;

        assert_eq!(buffers.triangle_count(), triangles);
        assert_eq!(buffers.positions.len(), 9 * triangles);
        assert_eq!(buffers.colors.len(), 9 * triangles);
        assert_eq!(buffers.normals.len(), 9 * triangles);
        assert_eq!(buffers.coords.len(), 9 * triangles);
        assert_eq!(buffers.uvs.len(), 6 * triangles);
        assert_eq!(buffers.splat_layers.len(), 12 * triangles);
        assert_eq!(buffers.splat_weights.len(), 12 * triangles);
        assert!(buffers.is_consistent());
    }
}

#[test]
fn normals_have_unit_length() {
    let buffers = reference_request([1000.0, 0.0, 400.0], 16).build().unwrap();
    for v in 0..buffers.vertex_count() {
        let len = Vec3::from_array(buffers.normal(v)).length();
        assert!((len - 1.0).abs() <= 1e-5, "vertex {v} normal length {len}");
    }
}

#[test]
fn weights_sum_to_one() {
    let buffers = reference_request([-300.0, 0.0, 0.0], 16).build().unwrap();
    for v in 0..buffers.vertex_count() {
        let sum = buffers.splat(v).weight_sum();
        assert!((sum - 1.0).abs() <= 1e-4, "vertex {v} weights sum to {sum}");
    }
}

#[test]
fn triangle_corners_share_layers() {
    let buffers = reference_request([0.0, 0.0, 2000.0], 16).build().unwrap();
    for t in 0..buffers.triangle_count() {
        let layers = buffers.splat(3 * t).layers;
        assert_eq!(buffers.splat(3 * t + 1).layers, layers);
        assert_eq!(buffers.splat(3 * t + 2).layers, layers);
    }
}

#[test]
fn skirt_is_lowered_by_depth_and_reuses_edge_normals() {
    let biome = StripeBiome::new();
    let depth = ChunkBuildSettings::default().skirt_depth;

    for resolution in [1, 2, 5] {
        let params =
            BuildParameters::new(Vec3::ZERO, 10.0, resolution, &SlopedHeight, &biome, &Gray);
        let buffers = TerrainChunkBuilder::build(&params).unwrap();

        let key = |c: [f32; 3]| (c[0].to_bits(), c[2].to_bits());
        let mut surface_normals = HashMap::new();
        let mut skirt = Vec::new();

        for v in 0..buffers.vertex_count() {
            let drop = buffers.coord(v)[1] - buffers.position(v)[1];
            if drop == 0.0 {
                surface_normals.insert(key(buffers.coord(v)), buffers.normal(v));
            } else {
                assert_eq!(drop, depth, "vertex {v} lowered by {drop}");
                skirt.push(v);
            }
        }

        assert!(!skirt.is_empty());
        for v in skirt {
            let c = buffers.coord(v);
            let on_edge = [c[0], c[2]].iter().any(|&x| x == -5.0 || x == 5.0);
            assert!(on_edge, "skirt vertex at {c:?} is not on the tile edge");
            assert_eq!(Some(&buffers.normal(v)), surface_normals.get(&key(c)));
        }
    }
}

#[test]
fn zero_affinity_vertices_keep_weights_partitioned() {
    let biome = StripeBiome::new();
    for resolution in [1, 2, 5] {
        let params =
            BuildParameters::new(Vec3::ZERO, 10.0, resolution, &SlopedHeight, &biome, &Gray);
        let buffers = TerrainChunkBuilder::build(&params).unwrap();

        for v in 0..buffers.vertex_count() {
            let splat = buffers.splat(v);
            assert!((splat.weight_sum() - 1.0).abs() <= 1e-4);
            if buffers.coord(v)[0] < 0.0 {
                assert_eq!(splat.weights, [0.0, 0.0, 0.0, 1.0]);
            }
            let len = Vec3::from_array(buffers.normal(v)).length();
            assert!((len - 1.0).abs() <= 1e-5);
        }
    }
}

#[test]
fn flat_tile_with_single_layer() {
    let buffers = build_flat(2);
    let depth = ChunkBuildSettings::default().skirt_depth;
    let grass = 0;

    assert_eq!(buffers.triangle_count(), 32);
    for v in 0..buffers.vertex_count() {
        let y = buffers.position(v)[1];
        assert!(y == 0.0 || y == -depth, "unexpected height {y}");
        assert_eq!(buffers.coord(v)[1], 0.0);

        let normal = Vec3::from_array(buffers.normal(v));
        assert!(normal.abs_diff_eq(Vec3::Y, 1e-6));

        let splat = buffers.splat(v);
        assert_eq!(splat.weights, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(splat.dominant_layer(), grass);
        assert_eq!(splat.weight_of(grass), Some(1.0));
    }

    let lowered = (0..buffers.vertex_count())
        .filter(|&v| buffers.position(v)[1] == -depth)
        .count();
    assert!(lowered > 0);
}

#[test]
fn flat_tile_uvs_follow_world_position() {
    let buffers = build_flat(4);
    let scale = ChunkBuildSettings::default().uv_scale;
    for v in 0..buffers.vertex_count() {
        let c = buffers.coord(v);
        assert_eq!(buffers.uvs[2 * v], c[0] / scale);
        assert_eq!(buffers.uvs[2 * v + 1], c[2] / scale);
    }
}

#[test]
fn uvs_ignore_height() {
    let biome = UniformBiome::grass_only();
    let params = BuildParameters::new(Vec3::ZERO, 10.0, 4, &SlopedHeight, &biome, &Gray);
    let buffers = TerrainChunkBuilder::build(&params).unwrap();
    let scale = ChunkBuildSettings::default().uv_scale;

    for v in 0..buffers.vertex_count() {
        let c = buffers.coord(v);
        assert_eq!([buffers.uvs[2 * v], buffers.uvs[2 * v + 1]], [c[0] / scale, c[2] / scale]);
    }
}

#[test]
fn neighbors_share_edge_positions() {
    let west = reference_request([0.0, 0.0, 0.0], 8).build().unwrap();
    let east = reference_request([100.0, 0.0, 0.0], 8).build().unwrap();

    let edge = |buffers: &ChunkMeshBuffers| {
        let mut points: Vec<[u32; 3]> = (0..buffers.vertex_count())
            .filter(|&v| buffers.position(v) == buffers.coord(v))
            .map(|v| buffers.position(v))
            .filter(|p| p[0] == 50.0)
            .map(|p| p.map(f32::to_bits))
            .collect();
        points.sort_unstable();
        points.dedup();
        points
    };

    let (a, b) = (edge(&west), edge(&east));
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn skirt_depth_is_configurable() {
    let height = ConstantHeight(5.0);
    let biome = UniformBiome::grass_only();
    let settings = ChunkBuildSettings::default().with_skirt_depth(3.0);
    let params = BuildParameters::new(Vec3::new(0.0, 20.0, 0.0), 10.0, 2, &height, &biome, &Gray)
        .with_settings(&settings);

    let buffers = TerrainChunkBuilder::build(&params).unwrap();
    for v in 0..buffers.vertex_count() {
        let y = buffers.position(v)[1];
        assert!(y == 25.0 || y == 22.0, "unexpected height {y}");
    }
}

#[test]
fn mesh_hand_off_keeps_every_vertex() {
    let buffers = build_flat(3);
    let mesh = buffers.to_mesh().unwrap();

    assert_eq!(mesh.count_vertices(), buffers.vertex_count());
    assert!(mesh.indices().is_none());
    assert_eq!(mesh.splat_vertices().unwrap().len(), buffers.vertex_count());
}

#[test]
fn invalid_parameters_are_rejected() {
    let biome = UniformBiome::grass_only();
    let height = ConstantHeight(0.0);

    let zero_res = BuildParameters::new(Vec3::ZERO, 100.0, 0, &height, &biome, &Gray);
    assert_eq!(
        TerrainChunkBuilder::build(&zero_res),
        Err(ChunkBuildError::InvalidResolution(0))
    );

    let zero_width = BuildParameters::new(Vec3::ZERO, 0.0, 4, &height, &biome, &Gray);
    assert_eq!(
        TerrainChunkBuilder::build(&zero_width),
        Err(ChunkBuildError::InvalidWidth(0.0))
    );

    let nan_width = BuildParameters::new(Vec3::ZERO, f32::NAN, 4, &height, &biome, &Gray);
    assert!(matches!(
        TerrainChunkBuilder::build(&nan_width),
        Err(ChunkBuildError::InvalidWidth(_))
    ));

    let negative_skirt = ChunkBuildSettings::default().with_skirt_depth(-1.0);
    let params = BuildParameters::new(Vec3::ZERO, 100.0, 4, &height, &biome, &Gray)
        .with_settings(&negative_skirt);
    assert!(matches!(
        TerrainChunkBuilder::build(&params),
        Err(ChunkBuildError::InvalidSettings(_))
    ));
}

#[test]
fn generator_faults_abort_the_build() {
    let biome = UniformBiome::grass_only();
    let params = BuildParameters::new(Vec3::ZERO, 100.0, 4, &FailingHeight, &biome, &Gray);
    let err = TerrainChunkBuilder::build(&params).unwrap_err();
    assert!(matches!(
        err,
        ChunkBuildError::Generator {
            stage: GeneratorStage::Height,
            ..
        }
    ));
    assert!(err.to_string().contains("height table missing"));

    let nan = ConstantHeight(f32::NAN);
    let params = BuildParameters::new(Vec3::ZERO, 100.0, 4, &nan, &biome, &Gray);
    assert!(matches!(
        TerrainChunkBuilder::build(&params),
        Err(ChunkBuildError::NonFiniteHeight { .. })
    ));
}

#[test]
fn malformed_strengths_abort_the_build() {
    let height = ConstantHeight(0.0);

    let mut short = UniformBiome::grass_only();
    short.strengths.pop();
    let params = BuildParameters::new(Vec3::ZERO, 100.0, 2, &height, &short, &Gray);
    assert_eq!(
        TerrainChunkBuilder::build(&params),
        Err(ChunkBuildError::SplatLengthMismatch {
            expected: 4,
            found: 3
        })
    );

    let mut negative = UniformBiome::grass_only();
    negative.strengths[2] = -0.5;
    let params = BuildParameters::new(Vec3::ZERO, 100.0, 2, &height, &negative, &Gray);
    match TerrainChunkBuilder::build(&params) {
        Err(ChunkBuildError::InvalidStrength { layer, value, .. }) => {
            assert_eq!(layer, "dummy_b");
            assert_eq!(value, -0.5);
        }
        other => panic!("expected InvalidStrength, got {other:?}"),
    }
}
