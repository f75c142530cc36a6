//! Layer palette validation utilities.

use thiserror::Error;

use super::properties::{MAX_LAYERS, SPLAT_CHANNELS, SplatLayer};

/// Errors that can occur when validating a layer palette.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayerPaletteError {
    #[error("Palette has {count} layers, at least {min} are required")]
    TooFewLayers { count: usize, min: usize },

    #[error("Layer count ({count}) exceeds maximum ({max})")]
    ExceedsMaxLayers { count: usize, max: usize },

    #[error("Layer name '{name}' is used more than once")]
    DuplicateName { name: String },

    #[error("Texture index {index} is used by both '{first}' and '{second}'")]
    DuplicateTextureIndex {
        index: u32,
        first: String,
        second: String,
    },

    #[error("Texture index {index} of '{name}' exceeds maximum ({max})")]
    TextureIndexOutOfRange { name: String, index: u32, max: usize },
}

/// Validate layer count against the splat channel count and maximum.
pub fn validate_layer_count(count: usize) -> Result<(), LayerPaletteError> {
    if count < SPLAT_CHANNELS {
        return Err(LayerPaletteError::TooFewLayers {
            count,
            min: SPLAT_CHANNELS,
        });
    }

    if count > MAX_LAYERS {
        return Err(LayerPaletteError::ExceedsMaxLayers {
            count,
            max: MAX_LAYERS,
        });
    }

    Ok(())
}

/// Validate that names and texture indices are unique and in range.
pub fn validate_layers(layers: &[SplatLayer]) -> Result<(), LayerPaletteError> {
    validate_layer_count(layers.len())?;

    for (i, layer) in layers.iter().enumerate() {
        if layer.texture_index as usize >= MAX_LAYERS {
            return Err(LayerPaletteError::TextureIndexOutOfRange {
                name: layer.name.clone(),
                index: layer.texture_index,
                max: MAX_LAYERS - 1,
            });
        }

        for earlier in &layers[..i] {
            if earlier.name == layer.name {
                return Err(LayerPaletteError::DuplicateName {
                    name: layer.name.clone(),
                });
            }
            if earlier.texture_index == layer.texture_index {
                return Err(LayerPaletteError::DuplicateTextureIndex {
                    index: layer.texture_index,
                    first: earlier.name.clone(),
                    second: layer.name.clone(),
                });
            }
        }
    }

    Ok(())
}
