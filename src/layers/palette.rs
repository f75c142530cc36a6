//! Layer palette definition.

use super::properties::SplatLayer;
use super::validation::{self, LayerPaletteError};

/// The ordered set of texture-array layers a biome generator reports
/// strengths for.
///
/// Strength vectors returned by
/// [`BiomeGenerator::resolve_splat`](crate::generator::BiomeGenerator::resolve_splat)
/// are parallel to [`LayerPalette::layers`]. Palette order is also the
/// tie-break order when two layers have equal combined strength.
///
/// A palette always holds at least [`SPLAT_CHANNELS`](super::SPLAT_CHANNELS)
/// layers with unique names and texture indices.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerPalette {
    layers: Vec<SplatLayer>,
}

impl LayerPalette {
    /// Create a palette from a list of layers, validating it.
    pub fn new(layers: Vec<SplatLayer>) -> Result<Self, LayerPaletteError> {
        validation::validate_layers(&layers)?;
        Ok(Self { layers })
    }

    /// Create a palette from names, assigning texture indices in order.
    pub fn from_names<I, S>(names: I) -> Result<Self, LayerPaletteError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layers = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| SplatLayer::new(name, i as u32))
            .collect();
        Self::new(layers)
    }

    #[inline]
    pub fn layers(&self) -> &[SplatLayer] {
        &self.layers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<&SplatLayer> {
        self.layers.get(slot)
    }

    /// Palette slot of the layer with the given name.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.name == name)
    }

    /// Palette slot of the layer sampling the given texture index.
    pub fn slot_of_texture(&self, texture_index: u32) -> Option<usize> {
        self.layers
            .iter()
            .position(|l| l.texture_index == texture_index)
    }
}
