//! Image generation providers.

mod imagen;

pub use imagen::{ImagenModel, ImagenProvider, ImagenProviderBuilder};
