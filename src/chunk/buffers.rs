//! Flat, non-indexed output buffers.

use super::grid::{ChunkGrid, GridVertex};
use crate::layers::SPLAT_CHANNELS;
use crate::mesh::SplatVertex;

/// Names each output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Positions,
    Colors,
    Normals,
    Coords,
    Uvs,
    SplatLayers,
    SplatWeights,
}

impl BufferKind {
    pub const ALL: [BufferKind; 7] = [
        BufferKind::Positions,
        BufferKind::Colors,
        BufferKind::Normals,
        BufferKind::Coords,
        BufferKind::Uvs,
        BufferKind::SplatLayers,
        BufferKind::SplatWeights,
    ];

    /// Floats per triangle vertex.
    pub const fn components(self) -> usize {
        match self {
            BufferKind::Uvs => 2,
            BufferKind::SplatLayers | BufferKind::SplatWeights => SPLAT_CHANNELS,
            _ => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BufferKind::Positions => "positions",
            BufferKind::Colors => "colors",
            BufferKind::Normals => "normals",
            BufferKind::Coords => "coords",
            BufferKind::Uvs => "uvs",
            BufferKind::SplatLayers => "splat_layers",
            BufferKind::SplatWeights => "splat_weights",
        }
    }
}

/// The complete geometry of one terrain chunk as a triangle soup.
///
/// Every buffer holds one record per triangle vertex, three consecutive
/// records per triangle, triangles in grid scan order. Record `n` of every
/// buffer describes the same triangle vertex.
///
/// The buffers are owned; moving the struct hands them to the consumer
/// without copying.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMeshBuffers {
    /// Mesh positions, skirt lowered (3 per vertex).
    pub positions: Vec<f32>,
    /// Vertex colors in `[0, 1]` (3 per vertex).
    pub colors: Vec<f32>,
    /// Unit normals (3 per vertex).
    pub normals: Vec<f32>,
    /// World positions on the terrain surface, skirt not applied (3 per vertex).
    pub coords: Vec<f32>,
    /// Planar texture coordinates (2 per vertex).
    pub uvs: Vec<f32>,
    /// Texture array layers as float-encoded integers (4 per vertex).
    pub splat_layers: Vec<f32>,
    /// Blend weights matching `splat_layers` (4 per vertex).
    pub splat_weights: Vec<f32>,
}

impl ChunkMeshBuffers {
    /// Expand the vertex arena into the triangle-vertex layout.
    ///
    /// `splats` must hold three entries per grid triangle, in triangle order.
    pub(crate) fn flatten(grid: &ChunkGrid, splats: &[SplatVertex]) -> Self {
        debug_assert_eq!(splats.len(), grid.triangles.len() * 3);

        let n = grid.triangles.len() * 3;
        let mut buffers = Self {
            positions: Vec::with_capacity(n * 3),
            colors: Vec::with_capacity(n * 3),
            normals: Vec::with_capacity(n * 3),
            coords: Vec::with_capacity(n * 3),
            uvs: Vec::with_capacity(n * 2),
            splat_layers: Vec::with_capacity(n * SPLAT_CHANNELS),
            splat_weights: Vec::with_capacity(n * SPLAT_CHANNELS),
        };

        for tri in &grid.triangles {
            for &v in tri {
                buffers.push_vertex(&grid.vertices[v]);
            }
        }

        for splat in splats {
            buffers.splat_layers.extend_from_slice(&splat.encoded_layers());
            buffers.splat_weights.extend_from_slice(&splat.weights);
        }

        buffers
    }

    fn push_vertex(&mut self, v: &GridVertex) {
        self.positions.extend_from_slice(&v.position.to_array());
        self.colors.extend_from_slice(&v.color);
        self.normals.extend_from_slice(&v.normal.to_array());
        self.coords.extend_from_slice(&v.surface().to_array());
        self.uvs.extend_from_slice(&v.uv);
    }

    /// Number of triangle vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The buffer of the given kind.
    pub fn buffer(&self, kind: BufferKind) -> &[f32] {
        match kind {
            BufferKind::Positions => &self.positions,
            BufferKind::Colors => &self.colors,
            BufferKind::Normals => &self.normals,
            BufferKind::Coords => &self.coords,
            BufferKind::Uvs => &self.uvs,
            BufferKind::SplatLayers => &self.splat_layers,
            BufferKind::SplatWeights => &self.splat_weights,
        }
    }

    /// Raw bytes of a buffer, ready for a GPU upload.
    #[inline]
    pub fn bytes(&self, kind: BufferKind) -> &[u8] {
        bytemuck::cast_slice(self.buffer(kind))
    }

    /// Total size of all buffers in bytes.
    pub fn byte_len(&self) -> usize {
        BufferKind::ALL
            .iter()
            .map(|&k| std::mem::size_of_val(self.buffer(k)))
            .sum()
    }

    #[inline]
    pub fn position(&self, vertex: usize) -> [f32; 3] {
        read3(&self.positions, vertex)
    }

    #[inline]
    pub fn normal(&self, vertex: usize) -> [f32; 3] {
        read3(&self.normals, vertex)
    }

    #[inline]
    pub fn coord(&self, vertex: usize) -> [f32; 3] {
        read3(&self.coords, vertex)
    }

    /// Splat layers and weights of one triangle vertex.
    pub fn splat(&self, vertex: usize) -> SplatVertex {
        let range = vertex * SPLAT_CHANNELS..(vertex + 1) * SPLAT_CHANNELS;
        let mut layers = [0.0; SPLAT_CHANNELS];
        let mut weights = [0.0; SPLAT_CHANNELS];
        layers.copy_from_slice(&self.splat_layers[range.clone()]);
        weights.copy_from_slice(&self.splat_weights[range]);
        SplatVertex::from_encoded(layers, weights)
    }

    /// Whether every buffer has the length implied by the vertex count.
    pub fn is_consistent(&self) -> bool {
        let n = self.vertex_count();
        self.positions.len() % 9 == 0
            && BufferKind::ALL
                .iter()
                .all(|&k| self.buffer(k).len() == n * k.components())
    }
}

#[inline]
fn read3(buffer: &[f32], vertex: usize) -> [f32; 3] {
    [buffer[vertex * 3], buffer[vertex * 3 + 1], buffer[vertex * 3 + 2]]
}
