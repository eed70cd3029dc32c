//! Image provider trait.

use crate::error::Result;
use crate::image::types::{GeneratedImage, GenerationRequest};
use async_trait::async_trait;

/// Trait for image generation services.
///
/// The composer side of the crate never talks to the network directly; it
/// hands a composed prompt to an implementation of this trait. A successful
/// `generate` always yields at least one image.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generates images from the given request.
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;

    /// Checks if the provider is reachable and authenticated.
    async fn health_check(&self) -> Result<()>;
}
