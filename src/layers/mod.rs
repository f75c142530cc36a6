//! Texture layer palettes for splat blending.
//!
//! A palette names the layers of the terrain texture array. Biome generators
//! report one raw strength per palette layer, and the chunk builder selects
//! four of them per triangle.

mod builder;
mod palette;
mod properties;
mod validation;

pub use builder::LayerPaletteBuilder;
pub use palette::LayerPalette;
pub use properties::{MAX_LAYERS, SPLAT_CHANNELS, SplatLayer};
pub use validation::LayerPaletteError;
