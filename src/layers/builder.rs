//! Builder for constructing layer palettes.

use super::palette::LayerPalette;
use super::properties::SplatLayer;
use super::validation::LayerPaletteError;

/// Builder for creating [`LayerPalette`] instances.
///
/// # Example
///
/// ```
/// use bevy_terrain_splat::layers::LayerPaletteBuilder;
///
/// let palette = LayerPaletteBuilder::new()
///     .add_layer_named("dirt")
///     .add_layer_named("grass")
///     .add_layer_named("rock")
///     .add_layer_at("snow", 12)
///     .build()
///     .unwrap();
///
/// assert_eq!(palette.len(), 4);
/// assert_eq!(palette.get(3).unwrap().texture_index, 12);
/// ```
#[derive(Default)]
pub struct LayerPaletteBuilder {
    layers: Vec<SplatLayer>,
}

impl LayerPaletteBuilder {
    /// Create a new palette builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer to the palette.
    pub fn add_layer(mut self, layer: SplatLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Add multiple layers at once.
    pub fn add_layers(mut self, layers: impl IntoIterator<Item = SplatLayer>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Add a layer sampling the next texture slice after the highest one in use.
    pub fn add_layer_named(self, name: impl Into<String>) -> Self {
        let next = self
            .layers
            .iter()
            .map(|l| l.texture_index + 1)
            .max()
            .unwrap_or(0);
        self.add_layer(SplatLayer::new(name, next))
    }

    /// Add a layer sampling an explicit texture slice.
    pub fn add_layer_at(self, name: impl Into<String>, texture_index: u32) -> Self {
        self.add_layer(SplatLayer::new(name, texture_index))
    }

    /// Number of layers added so far.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Validate and build the palette.
    pub fn build(self) -> Result<LayerPalette, LayerPaletteError> {
        LayerPalette::new(self.layers)
    }
}
