#![warn(missing_docs)]
//! BookScene - visualize book passages as images via Vertex AI Imagen.
//!
//! This crate turns a passage of prose plus a handful of stylistic choices
//! into a single Imagen prompt, and sends it to Vertex AI for rendering.
//!
//! # Quick Start
//!
//! ```no_run
//! use bookscene::{compose_prompt, GenerationRequest, ImageProvider, ImagenProvider, StyleOptions};
//!
//! #[tokio::main]
//! async fn main() -> bookscene::Result<()> {
//!     let options = StyleOptions::new()
//!         .with_art_style("수채화 일러스트")
//!         .with_mood("어둡고 미스터리한");
//!     let prompt = compose_prompt("A dark castle on a cliff.", &options);
//!
//!     let provider = ImagenProvider::builder().project("my-project").build()?;
//!     let images = provider.generate(&GenerationRequest::new(prompt)).await?;
//!     images[0].save("castle.png")?;
//!     Ok(())
//! }
//! ```
//!
//! The composer itself is a pure function: it never touches the network, so
//! prompts can be built and inspected without any credentials. The style
//! option lists and sample passages live in [`prompt::catalog`].

mod error;
pub mod image;
pub mod prompt;

pub use error::{BookSceneError, Result};

pub use image::{
    GeneratedImage, GenerationMetadata, GenerationRequest, ImageFormat, ImageProvider,
};
pub use image::providers::{ImagenModel, ImagenProvider, ImagenProviderBuilder};
pub use prompt::{compose_prompt, StyleField, StyleOptions};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{BookSceneError, Result};
    pub use crate::image::providers::ImagenProvider;
    pub use crate::image::{GeneratedImage, GenerationRequest, ImageProvider};
    pub use crate::prompt::{compose_prompt, StyleField, StyleOptions};
}
