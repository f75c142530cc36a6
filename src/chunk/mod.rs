//! Terrain chunk mesh building.
//!
//! [`TerrainChunkBuilder::build`] turns a tile description and three
//! generators into [`ChunkMeshBuffers`]:
//!
//! 1. Lay out a `(resolution + 3)²` vertex grid: the visible tile plus a
//!    padding ring clamped onto the tile edge.
//! 2. Displace every vertex by the height generator and resolve its color.
//! 3. Accumulate smooth normals from face normals.
//! 4. Lower the padding ring into a skirt and give it the normals of the
//!    tile edge, so gaps to neighboring tiles are hidden without a lighting
//!    seam.
//! 5. Pick four texture layers per triangle and renormalize each vertex's
//!    strengths over them.
//! 6. Expand everything into a non-indexed triangle soup.

mod buffers;
mod builder;
mod error;
mod grid;
mod normals;
mod params;
mod settings;
mod splat;

pub use buffers::{BufferKind, ChunkMeshBuffers};
pub use builder::TerrainChunkBuilder;
pub use error::{ChunkBuildError, GeneratorStage};
pub use params::BuildParameters;
pub use settings::{ChunkBuildSettings, MAX_RESOLUTION, SKIRT_DEPTH, UV_SCALE, WEIGHT_EPSILON};
