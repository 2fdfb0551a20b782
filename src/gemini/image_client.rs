use crate::{
    config::GeminiConfig,
    error::{Result, SkillError},
    models::{
        GeminiContent, GeminiErrorBody, GeminiGenerationConfig, GeminiImageConfig, GeminiRequest,
        GeminiResponse, GeminiTextPart, GenerationRequest,
    },
    traits::ImageGenerator,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Gemini `generateContent` client for image models ("Nano Banana").
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl ImageClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SkillError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            model: config.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_payload(request: &GenerationRequest) -> GeminiRequest {
        let image_config = if request.aspect_ratio.is_some() || request.image_size.is_some() {
            Some(GeminiImageConfig {
                aspect_ratio: request.aspect_ratio,
                image_size: request.image_size,
            })
        } else {
            None
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiTextPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                image_config,
            },
        }
    }

    /// Decodes the first inline image in the response.
    pub fn extract_image(response: &GeminiResponse) -> Result<Vec<u8>> {
        let parts = response
            .candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter());

        let mut texts = Vec::new();
        for part in parts {
            if let Some(inline) = &part.inline_data {
                return STANDARD
                    .decode(inline.data.trim())
                    .map_err(|e| SkillError::ResponseError(format!("Invalid image data: {}", e)));
            }
            if let Some(text) = &part.text {
                texts.push(text.trim().to_string());
            }
        }

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(SkillError::NoImage(format!("prompt blocked ({})", reason)));
        }
        if !texts.is_empty() {
            return Err(SkillError::NoImage(texts.join(" ")));
        }
        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .unwrap_or("no candidates");
        Err(SkillError::NoImage(format!(
            "empty response ({})",
            finish_reason
        )))
    }

    pub async fn generate_bytes(&self, request: &GenerationRequest) -> Result<Vec<u8>> {
        let payload = Self::build_payload(request);
        log::debug!(
            "Gemini request payload: {}",
            serde_json::to_string(&payload)?
        );

        let _timer = crate::logger::timer(&format!("generateContent ({})", self.model));
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                log::error!("Gemini request failed: {:?}", e);
                SkillError::RequestError(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Self::parse_response(status, &body)
    }

    /// Maps a non-2xx reply to `ApiError`, preferring the message in Gemini's
    /// error envelope over the raw body.
    pub fn error_from(status: u16, body: &str) -> SkillError {
        let message = serde_json::from_str::<GeminiErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.to_string());
        SkillError::ApiError {
            status: u32::from(status),
            message,
        }
    }

    pub fn parse_response(status: u16, body: &str) -> Result<Vec<u8>> {
        if !(200..300).contains(&status) {
            return Err(Self::error_from(status, body));
        }
        let parsed: GeminiResponse =
            serde_json::from_str(body).map_err(|e| SkillError::ResponseError(e.to_string()))?;
        Self::extract_image(&parsed)
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<PathBuf> {
        let bytes = self.generate_bytes(request).await?;

        if let Some(parent) = request.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&request.output_path, &bytes).await?;

        log::info!(
            "Saved {} bytes to {}",
            bytes.len(),
            request.output_path.display()
        );
        Ok(request.output_path.clone())
    }
}
