//! # bevy_terrain_splat
//!
//! Builds triangle meshes for square terrain tiles, with smooth normals,
//! vertex colors and 4-layer texture splat weights, ready to hand to Bevy.
//!
//! ## Features
//!
//! - Height, color and biome generators behind small traits
//! - Skirts along tile edges that hide gaps between neighbors
//! - Up to 4 texture array layers blended per triangle
//! - Fractal noise reference generators
//! - Serializable build requests and a one-shot worker pool (`worker` feature)
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_terrain_splat::prelude::*;
//!
//! fn spawn_tile(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
//!     let buffers = ChunkRequest::new([0.0, 0.0, 0.0], 1000.0, 64)
//!         .build()
//!         .expect("tile build failed");
//!
//!     if let Some(mesh) = buffers.to_mesh() {
//!         commands.spawn(Mesh3d(meshes.add(mesh)));
//!     }
//! }
//! ```

pub mod chunk;
pub mod generator;
pub mod layers;
pub mod mesh;
pub mod request;
#[cfg(feature = "worker")]
pub mod worker;

pub mod prelude {
    pub use crate::chunk::{
        BufferKind, BuildParameters, ChunkBuildError, ChunkBuildSettings, ChunkMeshBuffers,
        GeneratorStage, TerrainChunkBuilder,
    };
    pub use crate::generator::{
        BiomeColorGenerator, BiomeGenerator, ColorGenerator, GeneratorError, HeightGenerator,
        NoiseHeightGenerator, NoiseParams, NoiseType, SplatBiomeGenerator, SplatRules,
        SurfacePoint,
    };
    pub use crate::layers::{LayerPalette, LayerPaletteBuilder, LayerPaletteError, SplatLayer};
    pub use crate::mesh::{
        ATTRIBUTE_SPLAT_LAYERS, ATTRIBUTE_SPLAT_WEIGHTS, ATTRIBUTE_WORLD_COORDS, MeshSplatExt,
        SplatVertex,
    };
    pub use crate::request::{BuildReply, ChunkRequest};

    #[cfg(feature = "worker")]
    pub use crate::worker::{ChunkBuildWorker, TaggedReply};
}
