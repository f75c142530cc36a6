//! Conversion of chunk buffers into Bevy meshes.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Mesh, PrimitiveTopology, VertexAttributeValues};

use super::{
    attributes::{ATTRIBUTE_SPLAT_LAYERS, ATTRIBUTE_SPLAT_WEIGHTS, ATTRIBUTE_WORLD_COORDS},
    vertex_data::SplatVertex,
};
use crate::chunk::ChunkMeshBuffers;

fn group<const N: usize>(flat: &[f32]) -> Vec<[f32; N]> {
    flat.chunks_exact(N)
        .map(|c| {
            let mut out = [0.0; N];
            out.copy_from_slice(c);
            out
        })
        .collect()
}

impl ChunkMeshBuffers {
    /// Build a non-indexed triangle-list [`Mesh`].
    ///
    /// Sets position, normal, color (opaque), UV 0 and the custom
    /// [`ATTRIBUTE_SPLAT_LAYERS`], [`ATTRIBUTE_SPLAT_WEIGHTS`] and
    /// [`ATTRIBUTE_WORLD_COORDS`] attributes.
    ///
    /// Returns `None` for empty buffers.
    pub fn to_mesh(&self) -> Option<Mesh> {
        if self.is_empty() {
            return None;
        }

        let colors: Vec<[f32; 4]> = self
            .colors
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2], 1.0])
            .collect();

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        );

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, group::<3>(&self.positions));
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, group::<3>(&self.normals));
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, group::<2>(&self.uvs));
        mesh.insert_attribute(ATTRIBUTE_WORLD_COORDS, group::<3>(&self.coords));
        mesh.insert_attribute(ATTRIBUTE_SPLAT_LAYERS, group::<4>(&self.splat_layers));
        mesh.insert_attribute(ATTRIBUTE_SPLAT_WEIGHTS, group::<4>(&self.splat_weights));

        Some(mesh)
    }
}

/// Extension trait for attaching splat data to existing meshes.
pub trait MeshSplatExt {
    /// Add splat attributes to a mesh.
    ///
    /// # Panics
    /// Panics if `splats.len()` doesn't match the vertex count.
    fn with_splat_vertices(self, splats: &[SplatVertex]) -> Self;

    /// Read the splat attributes back, if both are present.
    fn splat_vertices(&self) -> Option<Vec<SplatVertex>>;
}

impl MeshSplatExt for Mesh {
    fn with_splat_vertices(mut self, splats: &[SplatVertex]) -> Self {
        let vertex_count = self
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .map(|a| a.len())
            .unwrap_or(0);

        assert_eq!(
            splats.len(),
            vertex_count,
            "Splat data length ({}) must match vertex count ({})",
            splats.len(),
            vertex_count
        );

        let layers: Vec<[f32; 4]> = splats.iter().map(|s| s.encoded_layers()).collect();
        let weights: Vec<[f32; 4]> = splats.iter().map(|s| s.weights).collect();

        self.insert_attribute(ATTRIBUTE_SPLAT_LAYERS, layers);
        self.insert_attribute(ATTRIBUTE_SPLAT_WEIGHTS, weights);
        self
    }

    fn splat_vertices(&self) -> Option<Vec<SplatVertex>> {
        let (
            Some(VertexAttributeValues::Float32x4(layers)),
            Some(VertexAttributeValues::Float32x4(weights)),
        ) = (
            self.attribute(ATTRIBUTE_SPLAT_LAYERS),
            self.attribute(ATTRIBUTE_SPLAT_WEIGHTS),
        )
        else {
            return None;
        };

        Some(
            layers
                .iter()
                .zip(weights)
                .map(|(l, w)| SplatVertex::from_encoded(*l, *w))
                .collect(),
        )
    }
}
