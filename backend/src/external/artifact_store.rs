//! Remote artifact storage client
//!
//! Downloads the serialized pipeline from a file-sharing service the first
//! time the service starts on a machine. Google Drive answers large downloads
//! with an HTML interstitial; the confirmation token it carries is followed
//! once.

use reqwest::{header::CONTENT_TYPE, Client, Response};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::config::ArtifactConfig;
use crate::error::{AppError, AppResult};

/// Result of making sure the artifact is on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

/// Start-up provisioning result; failures are reported, never raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    AlreadyPresent,
    Downloaded { bytes: u64 },
    Failed { message: String },
}

/// Remote artifact storage client
#[derive(Clone)]
pub struct ArtifactStore {
    client: Client,
    url_template: String,
}

impl ArtifactStore {
    /// Create a new ArtifactStore
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let url_template = url_template.into();
        if !url_template.contains("{id}") {
            return Err(AppError::Configuration(format!(
                "artifact URL template {} has no {{id}} placeholder",
                url_template
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ArtifactFetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url_template,
        })
    }

    pub fn from_config(config: &ArtifactConfig) -> AppResult<Self> {
        Self::new(
            config.url_template.clone(),
            Duration::from_secs(config.download_timeout_secs),
        )
    }

    /// Download URL for an artifact identifier
    pub fn resolve_url(&self, identifier: &str) -> String {
        self.url_template.replace("{id}", identifier)
    }

    /// Download the artifact unless `destination` already exists.
    ///
    /// An existing file is trusted as-is. On any failure the destination is
    /// left absent.
    pub async fn ensure_artifact(
        &self,
        identifier: &str,
        destination: &Path,
    ) -> AppResult<ArtifactStatus> {
        if tokio::fs::try_exists(destination).await.unwrap_or(false) {
            tracing::debug!("Artifact already present at {}", destination.display());
            return Ok(ArtifactStatus::AlreadyPresent);
        }

        tracing::info!("Downloading pipeline artifact to {}", destination.display());
        let body = self.fetch(identifier).await?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::ArtifactFetch(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let partial = partial_path(destination);
        if let Err(e) = write_then_rename(&partial, destination, &body).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(AppError::ArtifactFetch(format!(
                "cannot write {}: {}",
                destination.display(),
                e
            )));
        }

        Ok(ArtifactStatus::Downloaded {
            bytes: body.len() as u64,
        })
    }

    async fn fetch(&self, identifier: &str) -> AppResult<Vec<u8>> {
        let url = self.resolve_url(identifier);
        let response = self.get(&url).await?;

        if !is_html(&response) {
            return read_body(response).await;
        }

        // Interstitial page for files too large to virus-scan
        let page = response
            .text()
            .await
            .map_err(|e| AppError::ArtifactFetch(format!("Failed to read response: {}", e)))?;
        let token = extract_confirm_token(&page).ok_or_else(|| {
            AppError::ArtifactFetch(format!(
                "{} returned an HTML page instead of the artifact",
                url
            ))
        })?;

        let separator = if url.contains('?') { '&' } else { '?' };
        let confirmed = format!("{}{}confirm={}", url, separator, token);
        let response = self.get(&confirmed).await?;
        if is_html(&response) {
            return Err(AppError::ArtifactFetch(format!(
                "{} still returned HTML after confirmation",
                url
            )));
        }
        read_body(response).await
    }

    async fn get(&self, url: &str) -> AppResult<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ArtifactFetch(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::ArtifactFetch(format!(
                "{} answered {}",
                url,
                response.status()
            )));
        }
        Ok(response)
    }
}

/// Make sure the configured artifact is on disk, logging instead of failing
pub async fn provision_artifact(config: &ArtifactConfig) -> ProvisionOutcome {
    let result = match ArtifactStore::from_config(config) {
        Ok(store) => {
            store
                .ensure_artifact(&config.file_id, Path::new(&config.path))
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(ArtifactStatus::AlreadyPresent) => ProvisionOutcome::AlreadyPresent,
        Ok(ArtifactStatus::Downloaded { bytes }) => {
            tracing::info!("Downloaded pipeline artifact ({} bytes)", bytes);
            ProvisionOutcome::Downloaded { bytes }
        }
        Err(e) => {
            tracing::error!("{}", e);
            ProvisionOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// Pull the download confirmation token out of a Drive interstitial page.
///
/// Older pages link `...&confirm=<token>`; newer ones post a form with a
/// hidden `confirm` input.
pub fn extract_confirm_token(html: &str) -> Option<String> {
    if let Some(start) = html.find("confirm=") {
        let token: String = html[start + "confirm=".len()..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if !token.is_empty() {
            return Some(token);
        }
    }

    let input = html.find("name=\"confirm\"")?;
    let rest = &html[input..];
    let value_start = rest.find("value=\"")? + "value=\"".len();
    let value: String = rest[value_start..].chars().take_while(|c| *c != '"').collect();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn is_html(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("text/html"))
        .unwrap_or(false)
}

async fn read_body(response: Response) -> AppResult<Vec<u8>> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::ArtifactFetch(format!("Failed to read artifact body: {}", e)))?;
    Ok(bytes.to_vec())
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

async fn write_then_rename(partial: &Path, destination: &Path, body: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(partial, body).await?;
    tokio::fs::rename(partial, destination).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let store = ArtifactStore::new(
            "https://drive.google.com/uc?export=download&id={id}",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            store.resolve_url("abc123"),
            "https://drive.google.com/uc?export=download&id=abc123"
        );
    }

    #[test]
    fn test_confirm_token_from_link() {
        let html = r#"<a href="/uc?export=download&amp;confirm=t0K_en-9&amp;id=abc">Download anyway</a>"#;
        assert_eq!(extract_confirm_token(html).as_deref(), Some("t0K_en-9"));
    }

    #[test]
    fn test_confirm_token_from_form() {
        let html = r#"<form><input type="hidden" name="confirm" value="t"><input type="hidden" name="uuid" value="x"></form>"#;
        assert_eq!(extract_confirm_token(html).as_deref(), Some("t"));
    }

    #[test]
    fn test_no_confirm_token() {
        assert!(extract_confirm_token("<html><body>Quota exceeded</body></html>").is_none());
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let err = ArtifactStore::new("https://example.com/model.json", Duration::from_secs(5))
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_existing_file_short_circuits() {
        let file = tempfile::NamedTempFile::new().unwrap();
        // Unroutable template; any request would fail
        let store = ArtifactStore::new("http://127.0.0.1:9/{id}", Duration::from_secs(1)).unwrap();
        let status = tokio_test::block_on(store.ensure_artifact("abc", file.path())).unwrap();
        assert_eq!(status, ArtifactStatus::AlreadyPresent);
    }

    #[test]
    fn test_partial_path_is_sibling() {
        let partial = partial_path(Path::new("models/pipeline.json"));
        assert_eq!(partial, PathBuf::from("models/pipeline.json.part"));
    }
}
