//! Custom vertex attributes for splat blending.

use bevy::mesh::MeshVertexAttribute;
use bevy::render::render_resource::VertexFormat;

/// Vertex attribute holding the 4 texture array layers blended at a vertex,
/// as float-encoded integers.
///
/// All three vertices of a triangle carry the same four layers in the same
/// order, weakest first. A shader can therefore interpolate
/// [`ATTRIBUTE_SPLAT_WEIGHTS`] and sample `layers[k]` with `weights[k]`
/// without flat interpolation.
pub const ATTRIBUTE_SPLAT_LAYERS: MeshVertexAttribute =
    MeshVertexAttribute::new("SplatLayers", 781_224_310, VertexFormat::Float32x4);

/// Vertex attribute holding the blend weight of each slot of
/// [`ATTRIBUTE_SPLAT_LAYERS`]. Weights sum to 1.
pub const ATTRIBUTE_SPLAT_WEIGHTS: MeshVertexAttribute =
    MeshVertexAttribute::new("SplatWeights", 781_224_311, VertexFormat::Float32x4);

/// Vertex attribute holding the world position on the terrain surface,
/// before the skirt is lowered. Used for triplanar or world-space texturing.
pub const ATTRIBUTE_WORLD_COORDS: MeshVertexAttribute =
    MeshVertexAttribute::new("WorldCoords", 781_224_312, VertexFormat::Float32x3);
