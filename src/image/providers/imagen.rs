//! Imagen (Google Vertex AI) image generation provider.

use crate::error::{parse_retry_after, sanitize_error_message, BookSceneError, Result};
use crate::image::provider::ImageProvider;
use crate::image::types::{GeneratedImage, GenerationMetadata, GenerationRequest, ImageFormat};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

/// Imagen model variants on Vertex AI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImagenModel {
    /// Imagen 4 - standard quality.
    #[default]
    Imagen4,
    /// Imagen 4 Fast - lower latency.
    Imagen4Fast,
    /// Imagen 4 Ultra - highest quality.
    Imagen4Ultra,
}

impl ImagenModel {
    /// Returns the Vertex AI model identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imagen4 => "imagen-4.0-generate-001",
            Self::Imagen4Fast => "imagen-4.0-fast-generate-001",
            Self::Imagen4Ultra => "imagen-4.0-ultra-generate-001",
        }
    }
}

/// Builder for ImagenProvider.
///
/// `build()` is the one explicit initialization step: it resolves the GCP
/// project and location, verifies the optional service-account key file
/// exists, and returns an error before any request is made if configuration
/// is incomplete.
#[derive(Debug, Clone, Default)]
pub struct ImagenProviderBuilder {
    project: Option<String>,
    location: Option<String>,
    model: ImagenModel,
    credentials: Option<PathBuf>,
    access_token: Option<String>,
}

impl ImagenProviderBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GCP project ID. Falls back to `VERTEX_AI_PROJECT` env var.
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the GCP location. Falls back to `VERTEX_AI_LOCATION`, then
    /// "us-central1".
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the Imagen model variant.
    pub fn model(mut self, model: ImagenModel) -> Self {
        self.model = model;
        self
    }

    /// Sets a service-account key file path to verify before use.
    pub fn credentials(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials = Some(path.into());
        self
    }

    /// Sets an explicit OAuth bearer token, bypassing the gcloud CLI.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Builds the provider, resolving project, location, and credentials.
    pub fn build(self) -> Result<ImagenProvider> {
        let project = self
            .project
            .or_else(|| std::env::var("VERTEX_AI_PROJECT").ok())
            .ok_or_else(|| {
                BookSceneError::Auth(
                    "GCP project not set: pass .project(..) or set VERTEX_AI_PROJECT".into(),
                )
            })?;

        let location = self
            .location
            .or_else(|| std::env::var("VERTEX_AI_LOCATION").ok())
            .unwrap_or_else(|| "us-central1".to_string());

        if let Some(ref path) = self.credentials {
            if !path.exists() {
                return Err(BookSceneError::Auth(format!(
                    "service account key file '{}' not found",
                    path.display()
                )));
            }
        }

        Ok(ImagenProvider {
            client: reqwest::Client::new(),
            project,
            location,
            model: self.model,
            access_token: self.access_token,
        })
    }
}

/// Imagen image generation provider backed by Vertex AI.
pub struct ImagenProvider {
    client: reqwest::Client,
    project: String,
    location: String,
    model: ImagenModel,
    /// Explicit bearer token; when None, minted via the gcloud CLI per call.
    access_token: Option<String>,
}

/// Get a bearer token by running `gcloud auth print-access-token`.
fn gcloud_access_token() -> Result<String> {
    let output = std::process::Command::new("gcloud")
        .args(["auth", "print-access-token"])
        .output()
        .map_err(|e| {
            BookSceneError::Auth(format!(
                "Failed to run gcloud CLI: {}. Install it from https://cloud.google.com/sdk/docs/install",
                e
            ))
        })?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BookSceneError::Auth(format!(
            "gcloud auth failed: {}",
            stderr
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

impl ImagenProvider {
    /// Creates a new `ImagenProviderBuilder`.
    pub fn builder() -> ImagenProviderBuilder {
        ImagenProviderBuilder::new()
    }

    /// The resolved GCP project ID.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The resolved GCP location.
    pub fn location(&self) -> &str {
        &self.location
    }

    fn bearer_token(&self) -> Result<String> {
        match &self.access_token {
            Some(token) => Ok(token.clone()),
            None => gcloud_access_token(),
        }
    }

    fn predict_url(&self) -> String {
        format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:predict",
            location = self.location,
            project = self.project,
            model = self.model.as_str(),
        )
    }

    async fn generate_impl(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
        let start = Instant::now();

        let body = ImagenRequest::from_generation_request(request);
        let token = self.bearer_token()?;

        tracing::debug!(
            model = self.model.as_str(),
            sample_count = request.sample_count,
            prompt_chars = request.prompt.chars().count(),
            "sending Imagen predict request"
        );

        let response = self
            .client
            .post(self.predict_url())
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text, &headers));
        }

        let imagen_response: ImagenResponse = response.json().await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let mut images = Vec::new();
        let mut filter_reason = None;

        for prediction in imagen_response.predictions {
            if let Some(reason) = prediction.rai_filtered_reason {
                filter_reason = Some(reason);
                continue;
            }
            let Some(b64) = prediction.bytes_base64_encoded else {
                continue;
            };
            let data = base64::engine::general_purpose::STANDARD
                .decode(&b64)
                .map_err(|e| BookSceneError::Decode(e.to_string()))?;

            let format = prediction
                .mime_type
                .as_deref()
                .and_then(ImageFormat::from_mime_type)
                .or_else(|| ImageFormat::from_magic_bytes(&data))
                .unwrap_or_default();

            images.push(GeneratedImage::new(
                data,
                format,
                GenerationMetadata {
                    model: Some(self.model.as_str().to_string()),
                    duration_ms: Some(duration_ms),
                },
            ));
        }

        if images.is_empty() {
            return Err(match filter_reason {
                Some(reason) => BookSceneError::ContentBlocked(reason),
                None => BookSceneError::UnexpectedResponse(
                    "no image data in Imagen response".into(),
                ),
            });
        }

        tracing::debug!(
            count = images.len(),
            duration_ms,
            "Imagen predict request completed"
        );

        Ok(images)
    }

    fn parse_error(
        &self,
        status: u16,
        text: &str,
        headers: &reqwest::header::HeaderMap,
    ) -> BookSceneError {
        let text = sanitize_error_message(text);
        if status == 404 {
            return BookSceneError::InvalidRequest(format!(
                "Model '{}' not found in project '{}'. Verify the model name and project.",
                self.model.as_str(),
                self.project
            ));
        }
        if status == 429 {
            let retry_after = parse_retry_after(headers).map(std::time::Duration::from_secs);
            return BookSceneError::RateLimited { retry_after };
        }
        if status == 401 || status == 403 {
            return BookSceneError::Auth(text);
        }
        let lower = text.to_lowercase();
        if lower.contains("safety")
            || lower.contains("blocked")
            || lower.contains("prohibited")
            || lower.contains("responsible ai")
        {
            return BookSceneError::ContentBlocked(text);
        }
        BookSceneError::Api {
            status,
            message: text,
        }
    }
}

#[async_trait]
impl ImageProvider for ImagenProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedImage>> {
        self.generate_impl(request).await
    }

    fn name(&self) -> &str {
        "Imagen (Vertex AI)"
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}",
            location = self.location,
            project = self.project,
            model = self.model.as_str(),
        );
        let token = self.bearer_token()?;

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(BookSceneError::Auth("Invalid or expired token".into())),
            404 => Err(BookSceneError::InvalidRequest(
                "Model not found. Verify the model name and project.".into(),
            )),
            s if !(200..300).contains(&s) => Err(BookSceneError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ImagenRequest {
    instances: Vec<ImagenInstance>,
    parameters: ImagenParameters,
}

#[derive(Debug, Serialize)]
struct ImagenInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImagenParameters {
    sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
}

impl ImagenRequest {
    fn from_generation_request(req: &GenerationRequest) -> Self {
        Self {
            instances: vec![ImagenInstance {
                prompt: req.prompt.clone(),
            }],
            parameters: ImagenParameters {
                sample_count: req.sample_count,
                aspect_ratio: req.aspect_ratio.clone(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImagenResponse {
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImagenPrediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    rai_filtered_reason: Option<String>,
}
