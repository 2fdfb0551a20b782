use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    #[value(name = "1:1")]
    Square,
    #[serde(rename = "2:3")]
    #[value(name = "2:3")]
    Portrait2x3,
    #[serde(rename = "3:2")]
    #[value(name = "3:2")]
    Landscape3x2,
    #[serde(rename = "3:4")]
    #[value(name = "3:4")]
    Portrait3x4,
    #[serde(rename = "4:3")]
    #[value(name = "4:3")]
    Landscape4x3,
    #[serde(rename = "4:5")]
    #[value(name = "4:5")]
    Portrait4x5,
    #[serde(rename = "5:4")]
    #[value(name = "5:4")]
    Landscape5x4,
    #[serde(rename = "9:16")]
    #[value(name = "9:16")]
    Portrait9x16,
    #[serde(rename = "16:9")]
    #[value(name = "16:9")]
    Landscape16x9,
    #[serde(rename = "21:9")]
    #[value(name = "21:9")]
    Ultrawide21x9,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 10] = [
        AspectRatio::Square,
        AspectRatio::Portrait2x3,
        AspectRatio::Landscape3x2,
        AspectRatio::Portrait3x4,
        AspectRatio::Landscape4x3,
        AspectRatio::Portrait4x5,
        AspectRatio::Landscape5x4,
        AspectRatio::Portrait9x16,
        AspectRatio::Landscape16x9,
        AspectRatio::Ultrawide21x9,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait2x3 => "2:3",
            AspectRatio::Landscape3x2 => "3:2",
            AspectRatio::Portrait3x4 => "3:4",
            AspectRatio::Landscape4x3 => "4:3",
            AspectRatio::Portrait4x5 => "4:5",
            AspectRatio::Landscape5x4 => "5:4",
            AspectRatio::Portrait9x16 => "9:16",
            AspectRatio::Landscape16x9 => "16:9",
            AspectRatio::Ultrawide21x9 => "21:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AspectRatio::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.as_str()).collect();
                format!(
                    "invalid aspect ratio '{}' (expected one of: {})",
                    s,
                    valid.join(", ")
                )
            })
    }
}

/// Output resolution. Parsing is case-insensitive; the wire form is upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "2K" => Ok(ImageSize::TwoK),
            "4K" => Ok(ImageSize::FourK),
            _ => Err(format!("invalid image size '{}' (expected 2K or 4K)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub aspect_ratio: Option<AspectRatio>,
    pub image_size: Option<ImageSize>,
    pub output_path: PathBuf,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: None,
            image_size: None,
            output_path: output_path.into(),
        }
    }

    pub fn with_aspect_ratio(mut self, ratio: Option<AspectRatio>) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    pub fn with_image_size(mut self, size: Option<ImageSize>) -> Self {
        self.image_size = size;
        self
    }
}

/// Outcome of one batch slot.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub index: usize,
    pub filename: String,
    pub success: bool,
    pub output_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn succeeded(index: usize, filename: String, output_path: PathBuf) -> Self {
        Self {
            index,
            filename,
            success: true,
            output_path: Some(output_path),
            error: None,
        }
    }

    pub fn failed(index: usize, filename: String, error: impl Into<String>) -> Self {
        Self {
            index,
            filename,
            success: false,
            output_path: None,
            error: Some(error.into()),
        }
    }
}

// Gemini generateContent wire format

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiTextPart>,
}

#[derive(Debug, Serialize)]
pub struct GeminiTextPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<GeminiImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    pub content: Option<GeminiCandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponsePart {
    pub text: Option<String>,
    pub inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiInlineData {
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiErrorBody {
    pub error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct GeminiErrorDetail {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_parsing() {
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape16x9));
        assert_eq!(" 1:1 ".parse::<AspectRatio>(), Ok(AspectRatio::Square));
        let err = "16:10".parse::<AspectRatio>().unwrap_err();
        assert!(err.contains("21:9"));
    }

    #[test]
    fn test_image_size_is_case_insensitive() {
        assert_eq!("2k".parse::<ImageSize>(), Ok(ImageSize::TwoK));
        assert_eq!("4K".parse::<ImageSize>(), Ok(ImageSize::FourK));
        assert!("8K".parse::<ImageSize>().is_err());
        assert_eq!(ImageSize::FourK.to_string(), "4K");
    }

    #[test]
    fn test_image_config_serializes_wire_names() {
        let config = GeminiImageConfig {
            aspect_ratio: Some(AspectRatio::Portrait9x16),
            image_size: None,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, serde_json::json!({ "aspectRatio": "9:16" }));
    }
}
