//! Per-layer properties within a layer palette.

/// Number of texture layers blended per triangle.
pub const SPLAT_CHANNELS: usize = 4;

/// Maximum number of layers supported in a single palette.
///
/// Matches the default `max_texture_array_layers` limit of wgpu, since every
/// layer maps onto one slice of a 2D texture array.
pub const MAX_LAYERS: usize = 256;

/// A single named layer of the terrain texture array.
#[derive(Clone, Debug, PartialEq)]
pub struct SplatLayer {
    /// Key used by biome generators and for debugging.
    pub name: String,

    /// Slice of the texture array sampled for this layer.
    pub texture_index: u32,
}

impl SplatLayer {
    /// Create a layer with the given name and texture array slice.
    pub fn new(name: impl Into<String>, texture_index: u32) -> Self {
        Self {
            name: name.into(),
            texture_index,
        }
    }

    /// The texture index as written into the splat layer buffer.
    ///
    /// Layer indices travel as float-encoded integers so that every output
    /// buffer shares the same element type.
    #[inline]
    pub fn encoded_index(&self) -> f32 {
        self.texture_index as f32
    }
}
