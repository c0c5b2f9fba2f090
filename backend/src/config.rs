//! Configuration management for the Crop Yield Prediction service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CYP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::RecommendationThresholds;

/// Google Drive file holding the trained pipeline
pub const DEFAULT_ARTIFACT_FILE_ID: &str = "1rmdlpjDkLMCETbLNDO0PGZP8JErWWG8p";

/// Remote storage URL template; `{id}` is replaced by the artifact identifier
pub const DEFAULT_ARTIFACT_URL_TEMPLATE: &str =
    "https://drive.google.com/uc?export=download&id={id}";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Pipeline artifact location
    pub artifact: ArtifactConfig,

    /// Recommendation tier thresholds
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactConfig {
    /// Opaque remote identifier of the serialized pipeline
    pub file_id: String,

    /// URL template the identifier is resolved against
    pub url_template: String,

    /// Local cache path of the artifact
    pub path: String,

    /// HTTP timeout for the download, in seconds
    pub download_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// Predictions strictly above this are "Excellent" (hg/ha)
    pub excellent_threshold: f64,

    /// Predictions strictly above this are at least "Good" (hg/ha)
    pub good_threshold: f64,
}

impl RecommendationConfig {
    pub fn thresholds(&self) -> RecommendationThresholds {
        RecommendationThresholds {
            excellent: self.excellent_threshold,
            good: self.good_threshold,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("CYP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("artifact.file_id", DEFAULT_ARTIFACT_FILE_ID)?
            .set_default("artifact.url_template", DEFAULT_ARTIFACT_URL_TEMPLATE)?
            .set_default("artifact.path", "pipeline.json")?
            .set_default("artifact.download_timeout_secs", 300)?
            .set_default("recommendation.excellent_threshold", 40000.0)?
            .set_default("recommendation.good_threshold", 20000.0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CYP_ prefix)
            .add_source(
                Environment::with_prefix("CYP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a meaningful service
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.artifact.url_template.contains("{id}") {
            return Err(ConfigError::Message(
                "artifact.url_template must contain an {id} placeholder".to_string(),
            ));
        }
        if self.recommendation.good_threshold > self.recommendation.excellent_threshold {
            return Err(ConfigError::Message(format!(
                "recommendation.good_threshold ({}) exceeds excellent_threshold ({})",
                self.recommendation.good_threshold, self.recommendation.excellent_threshold
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            artifact: ArtifactConfig::default(),
            recommendation: RecommendationConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            file_id: DEFAULT_ARTIFACT_FILE_ID.to_string(),
            url_template: DEFAULT_ARTIFACT_URL_TEMPLATE.to_string(),
            path: "pipeline.json".to_string(),
            download_timeout_secs: 300,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        let thresholds = RecommendationThresholds::default();
        Self {
            excellent_threshold: thresholds.excellent,
            good_threshold: thresholds.good,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recommendation.thresholds(), RecommendationThresholds::default());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = Config::default();
        config.recommendation.good_threshold = 50000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = Config::default();
        config.artifact.url_template = "https://example.com/pipeline".to_string();
        assert!(config.validate().is_err());
    }
}
