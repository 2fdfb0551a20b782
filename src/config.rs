use crate::error::{Result, SkillError};
use std::env;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DATAFORSEO_BASE_URL: &str = "https://api.dataforseo.com/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct DataForSeoConfig {
    pub login: Option<String>,
    pub password: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `GEMINI_API_KEY` (or `GOOGLE_API_KEY`), `NANOBANANA_MODEL` and
    /// `GEMINI_BASE_URL`.
    pub fn from_env() -> Self {
        let api_key = non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("GOOGLE_API_KEY"));
        let model = non_empty_var("NANOBANANA_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());
        let base_url =
            non_empty_var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.into());

        GeminiConfig {
            api_key,
            model,
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            SkillError::ConfigError("GEMINI_API_KEY (or GOOGLE_API_KEY) is not set".into())
        })
    }
}

impl Default for DataForSeoConfig {
    fn default() -> Self {
        DataForSeoConfig {
            login: None,
            password: None,
            base_url: DEFAULT_DATAFORSEO_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DataForSeoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let login = non_empty_var("DATAFORSEO_LOGIN");
        let password = non_empty_var("DATAFORSEO_PASSWORD");
        let base_url = non_empty_var("DATAFORSEO_BASE_URL")
            .unwrap_or_else(|| DEFAULT_DATAFORSEO_BASE_URL.into());

        DataForSeoConfig {
            login,
            password,
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_credentials(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn require_credentials(&self) -> Result<(&str, &str)> {
        match (self.login.as_deref(), self.password.as_deref()) {
            (Some(login), Some(password)) => Ok((login, password)),
            _ => Err(SkillError::ConfigError(
                "DATAFORSEO_LOGIN and DATAFORSEO_PASSWORD must both be set".into(),
            )),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_defaults_and_builders() {
        let config = GeminiConfig::new();
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert!(config.require_api_key().is_err());

        let config = config
            .with_api_key("key-123")
            .with_model("gemini-2.5-flash-image")
            .with_base_url("http://localhost:9000");
        assert_eq!(config.require_api_key().unwrap(), "key-123");
        assert_eq!(config.model, "gemini-2.5-flash-image");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_dataforseo_requires_both_credentials() {
        let mut config = DataForSeoConfig::new();
        config.login = Some("user@example.com".into());
        assert!(matches!(
            config.require_credentials(),
            Err(SkillError::ConfigError(_))
        ));

        let config = DataForSeoConfig::new().with_credentials("user@example.com", "secret");
        assert_eq!(
            config.require_credentials().unwrap(),
            ("user@example.com", "secret")
        );
    }
}
