use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header::HeaderValue, Client};
use shared::{
    domain::{GeneratedMap, MapImage, StyleDescriptor, DEFAULT_IMAGE_MIME},
    protocol::{GenerateContentRequest, GenerateContentResponse, RemoteErrorEnvelope},
};
use tracing::{error, info, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod history;
pub mod loading;
pub mod prompt;
pub mod session;
pub mod viewport;

pub use config::{load_settings, Settings};
pub use error::{MapError, RemoteEmptyKind};
pub use history::History;
pub use loading::{spawn_loading_ticker, LoadingTicker, LoadingTickerHandle};
pub use prompt::compose_map_prompt;
pub use session::{GenerationTicket, MapSession};
pub use viewport::{Point, Viewport, ViewportState};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// The remote image-generation capability: one call per map, no retries.
#[async_trait]
pub trait MapGenerator: Send + Sync {
    async fn request_map(
        &self,
        city_name: &str,
        style: &'static StyleDescriptor,
    ) -> Result<GeneratedMap, MapError>;
}

#[async_trait]
impl<T: MapGenerator + ?Sized> MapGenerator for Arc<T> {
    async fn request_map(
        &self,
        city_name: &str,
        style: &'static StyleDescriptor,
    ) -> Result<GeneratedMap, MapError> {
        (**self).request_map(city_name, style).await
    }
}

pub struct MissingMapGenerator;

#[async_trait]
impl MapGenerator for MissingMapGenerator {
    async fn request_map(
        &self,
        _city_name: &str,
        _style: &'static StyleDescriptor,
    ) -> Result<GeneratedMap, MapError> {
        Err(MapError::transport("image generation backend is unavailable"))
    }
}

pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
    aspect_ratio: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self {
            http,
            endpoint: settings.generate_content_url()?,
            api_key: settings.configured_api_key().map(str::to_owned),
            model: settings.model.clone(),
            aspect_ratio: settings.aspect_ratio.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn api_key_header(&self) -> Result<HeaderValue, MapError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            MapError::transport("API key not configured; set GEMINI_API_KEY or API_KEY")
        })?;
        HeaderValue::from_str(key)
            .map_err(|_| MapError::transport("API key contains invalid characters"))
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, MapError> {
        let api_key = self.api_key_header()?;
        let res = self
            .http
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(remote_failure(status.as_u16(), &body));
        }

        Ok(res.json::<GenerateContentResponse>().await?)
    }
}

#[async_trait]
impl MapGenerator for GeminiClient {
    async fn request_map(
        &self,
        city_name: &str,
        style: &'static StyleDescriptor,
    ) -> Result<GeneratedMap, MapError> {
        let city = city_name.trim();
        if city.is_empty() {
            return Err(MapError::Validation);
        }

        let prompt = compose_map_prompt(city, style);
        let request = GenerateContentRequest::image_prompt(prompt, self.aspect_ratio.as_str());
        info!(city, style = style.id, model = %self.model, "requesting map image");

        let outcome = self
            .generate_content(&request)
            .await
            .and_then(extract_image);
        match outcome {
            Ok(image) => {
                info!(city, style = style.id, size_bytes = image.len(), "map image received");
                Ok(GeneratedMap::new(city, style, image))
            }
            Err(err) => {
                error!(city, style = style.id, "error generating map: {err}");
                Err(err)
            }
        }
    }
}

fn remote_failure(status: u16, body: &str) -> MapError {
    let message = match serde_json::from_str::<RemoteErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.trim().is_empty() => envelope.error.message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => format!("remote service returned HTTP {status}"),
    };
    MapError::Transport {
        status: Some(status),
        message,
    }
}

/// Takes the first inline image part of the first candidate.
pub fn extract_image(response: GenerateContentResponse) -> Result<MapImage, MapError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let block_reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);
        return Err(MapError::NoCandidate { block_reason });
    };

    let inline = candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data)
        .ok_or(MapError::NoImagePart)?;

    let bytes = STANDARD
        .decode(inline.data.trim())
        .map_err(|err| MapError::UndecodableImage(err.to_string()))?;
    if bytes.is_empty() {
        warn!("inline image part carried no bytes");
        return Err(MapError::UndecodableImage("empty image payload".into()));
    }

    let mime_type = inline
        .mime_type
        .filter(|mime| !mime.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
    Ok(MapImage::new(mime_type, bytes))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
