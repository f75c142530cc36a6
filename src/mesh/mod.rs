//! Mesh utilities for splat-blended terrain.
//!
//! Chunk buffers become a Bevy [`Mesh`](bevy::mesh::Mesh) with the standard
//! position/normal/color/UV attributes plus three custom ones:
//! - [`ATTRIBUTE_SPLAT_LAYERS`]: 4 texture array layers (Float32x4)
//! - [`ATTRIBUTE_SPLAT_WEIGHTS`]: 4 blend weights (Float32x4)
//! - [`ATTRIBUTE_WORLD_COORDS`]: unskirted world position (Float32x3)

mod attributes;
mod builder;
mod vertex_data;

pub use attributes::{ATTRIBUTE_SPLAT_LAYERS, ATTRIBUTE_SPLAT_WEIGHTS, ATTRIBUTE_WORLD_COORDS};
pub use builder::MeshSplatExt;
pub use vertex_data::SplatVertex;
