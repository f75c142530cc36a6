//! Per-vertex splat blending data.

use crate::layers::SPLAT_CHANNELS;

/// Splat blending data for one triangle vertex.
///
/// Holds four texture-array layer indices and their blend weights. All three
/// vertices of a triangle carry the same four layers in the same order, so
/// interpolating weights across the face blends one consistent set of
/// textures. Weights sum to 1.
///
/// Slots are ordered from the weakest to the strongest layer of the
/// triangle; the last slot holds the dominant layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SplatVertex {
    /// Texture array layer of each slot.
    pub layers: [u32; SPLAT_CHANNELS],

    /// Blend weight of each slot.
    pub weights: [f32; SPLAT_CHANNELS],
}

impl SplatVertex {
    /// Full weight on a single layer, placed in the dominant slot.
    ///
    /// # Example
    /// ```
    /// use bevy_terrain_splat::mesh::SplatVertex;
    ///
    /// let data = SplatVertex::single(5);
    /// assert_eq!(data.weights, [0.0, 0.0, 0.0, 1.0]);
    /// assert_eq!(data.dominant_layer(), 5);
    /// ```
    #[inline]
    pub const fn single(layer: u32) -> Self {
        Self {
            layers: [layer; SPLAT_CHANNELS],
            weights: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Renormalize raw strengths of four layers into weights.
    ///
    /// When the strengths sum below `epsilon` the vertex has no affinity for
    /// any of the layers; all weight then goes to the dominant slot.
    ///
    /// # Example
    /// ```
    /// use bevy_terrain_splat::mesh::SplatVertex;
    ///
    /// let data = SplatVertex::normalized([3, 2, 1, 0], [1.0, 1.0, 0.0, 2.0], 1e-6);
    /// assert_eq!(data.weights, [0.25, 0.25, 0.0, 0.5]);
    /// ```
    pub fn normalized(
        layers: [u32; SPLAT_CHANNELS],
        strengths: [f32; SPLAT_CHANNELS],
        epsilon: f32,
    ) -> Self {
        let sum: f32 = strengths.iter().sum();
        if sum < epsilon {
            return Self {
                layers,
                weights: [0.0, 0.0, 0.0, 1.0],
            };
        }

        let inv = 1.0 / sum;
        Self {
            layers,
            weights: strengths.map(|s| s * inv),
        }
    }

    /// Layer of the dominant (last) slot.
    #[inline]
    pub const fn dominant_layer(&self) -> u32 {
        self.layers[SPLAT_CHANNELS - 1]
    }

    /// Sum of the four weights; 1 for any vertex produced by the builder.
    #[inline]
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Weight assigned to a texture layer, or `None` if it is not blended here.
    pub fn weight_of(&self, layer: u32) -> Option<f32> {
        self.layers
            .iter()
            .position(|&l| l == layer)
            .map(|slot| self.weights[slot])
    }

    /// Layer indices as float-encoded integers.
    #[inline]
    pub fn encoded_layers(&self) -> [f32; SPLAT_CHANNELS] {
        self.layers.map(|l| l as f32)
    }

    /// Decode from float-encoded layer indices and weights.
    #[inline]
    pub fn from_encoded(layers: [f32; SPLAT_CHANNELS], weights: [f32; SPLAT_CHANNELS]) -> Self {
        Self {
            layers: layers.map(|l| l as u32),
            weights,
        }
    }
}
