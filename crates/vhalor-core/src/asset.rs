//! Product model preloading
//!
//! The model is fetched once, bounded by a fixed timeout. Any failure is
//! reported as [`AssetOutcome::Failed`] and the page falls back to
//! [`ProductModel::fallback`].

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::{Error, Result};

const MAX_MODEL_BYTES: usize = 1024 * 1024;
const EMBEDDED_MODEL: &str = include_str!("../assets/hoodie.json");

/// Source of the product model bytes
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable source, for logs
    fn describe(&self) -> String;
}

/// Fetch over HTTP(S)
pub struct HttpFetcher {
    client: Client,
    url: Url,
}

impl HttpFetcher {
    pub fn new(url: Url, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait::async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let mut response = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?;

        if let Some(len) = response.content_length() {
            if len as usize > MAX_MODEL_BYTES {
                return Err(Error::Asset(format!("model too large: {} bytes", len)));
            }
        }

        // Content-Length may be absent or wrong; stop reading past the limit
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            append_limited(&mut body, &chunk)?;
        }
        Ok(body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Append a body chunk, failing once the total passes `MAX_MODEL_BYTES`
fn append_limited(body: &mut Vec<u8>, chunk: &[u8]) -> Result<()> {
    let total = body.len() + chunk.len();
    if total > MAX_MODEL_BYTES {
        return Err(Error::Asset(format!(
            "model too large: more than {} bytes",
            MAX_MODEL_BYTES
        )));
    }
    body.extend_from_slice(chunk);
    Ok(())
}

/// Read from the local filesystem
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl AssetFetcher for FileFetcher {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let metadata = tokio::fs::metadata(&self.path).await?;
        if metadata.len() as usize > MAX_MODEL_BYTES {
            return Err(Error::Asset(format!(
                "model too large: {} bytes",
                metadata.len()
            )));
        }
        Ok(tokio::fs::read(&self.path).await?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Model compiled into the binary
pub struct EmbeddedFetcher;

#[async_trait::async_trait]
impl AssetFetcher for EmbeddedFetcher {
    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(EMBEDDED_MODEL.as_bytes().to_vec())
    }

    fn describe(&self) -> String {
        "built-in".to_string()
    }
}

/// Pick a fetcher for a configured source: http(s) URL, file path, or built-in
pub fn fetcher_for(source: Option<&str>, request_timeout: Duration) -> Result<Box<dyn AssetFetcher>> {
    match source.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(Box::new(EmbeddedFetcher)),
        Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
            let url = Url::parse(s)?;
            Ok(Box::new(HttpFetcher::new(url, request_timeout)?))
        }
        Some(s) => Ok(Box::new(FileFetcher::new(s))),
    }
}

/// Turntable frames of the product, rendered as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductModel {
    pub name: String,
    pub frames: Vec<Vec<String>>,
}

impl ProductModel {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let model: ProductModel = serde_json::from_slice(bytes)?;
        if model.frames.is_empty() || model.frames.iter().any(|f| f.is_empty()) {
            return Err(Error::Asset(format!("model '{}' has empty frames", model.name)));
        }
        Ok(model)
    }

    /// Static outline shown when the model could not be loaded
    pub fn fallback() -> Self {
        Self {
            name: "hoodie (fallback)".to_string(),
            frames: vec![vec![
                "   ____   ".to_string(),
                "  /    \\  ".to_string(),
                " /|    |\\ ".to_string(),
                "/ |    | \\".to_string(),
                "  |____|  ".to_string(),
            ]],
        }
    }

    /// Frame for a rotation step, wrapping around
    pub fn frame(&self, step: usize) -> &[String] {
        match self.frames.len() {
            0 => &[],
            n => &self.frames[step % n],
        }
    }
}

/// How the preload settled
#[derive(Debug, Clone, PartialEq)]
pub enum AssetOutcome {
    Loaded(ProductModel),
    Failed { reason: String },
}

impl AssetOutcome {
    /// Model to render: the loaded one, or the fallback
    pub fn into_model(self) -> ProductModel {
        match self {
            AssetOutcome::Loaded(model) => model,
            AssetOutcome::Failed { .. } => ProductModel::fallback(),
        }
    }
}

/// Fetch and parse the product model once, giving up after `timeout`
pub async fn preload_model(fetcher: &dyn AssetFetcher, timeout: Duration) -> AssetOutcome {
    let source = fetcher.describe();
    let load = async {
        let bytes = fetcher.fetch().await?;
        ProductModel::parse(&bytes)
    };

    match tokio::time::timeout(timeout, load).await {
        Ok(Ok(model)) => {
            info!("Loaded product model '{}' from {}", model.name, source);
            AssetOutcome::Loaded(model)
        }
        Ok(Err(e)) => {
            warn!("Failed to load product model from {}: {}", source, e);
            AssetOutcome::Failed {
                reason: e.to_string(),
            }
        }
        Err(_) => {
            warn!(
                "Product model from {} timed out after {}s, using fallback",
                source,
                timeout.as_secs()
            );
            AssetOutcome::Failed {
                reason: format!("timed out after {}s", timeout.as_secs()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowFetcher;

    #[async_trait::async_trait]
    impl AssetFetcher for SlowFetcher {
        async fn fetch(&self) -> Result<Vec<u8>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(EMBEDDED_MODEL.as_bytes().to_vec())
        }

        fn describe(&self) -> String {
            "slow".to_string()
        }
    }

    struct BrokenFetcher;

    #[async_trait::async_trait]
    impl AssetFetcher for BrokenFetcher {
        async fn fetch(&self) -> Result<Vec<u8>> {
            Ok(b"{ not json".to_vec())
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn test_embedded_model_parses() {
        let model = ProductModel::parse(EMBEDDED_MODEL.as_bytes()).unwrap();
        assert!(model.frames.len() > 1);
        assert_eq!(model.frame(model.frames.len()), model.frame(0));
    }

    #[test]
    fn test_empty_frames_rejected() {
        let err = ProductModel::parse(br#"{"name":"x","frames":[]}"#).unwrap_err();
        assert!(matches!(err, Error::Asset(_)));
    }

    #[tokio::test]
    async fn test_embedded_preload_succeeds() {
        let outcome = preload_model(&EmbeddedFetcher, Duration::from_secs(10)).await;
        assert!(matches!(outcome, AssetOutcome::Loaded(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let outcome = preload_model(&SlowFetcher, Duration::from_secs(10)).await;
        match outcome {
            AssetOutcome::Failed { reason } => assert!(reason.contains("timed out")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_error_is_not_fatal() {
        let outcome = preload_model(&BrokenFetcher, Duration::from_secs(10)).await;
        assert_eq!(outcome.clone().into_model(), ProductModel::fallback());
        assert!(matches!(outcome, AssetOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let fetcher = FileFetcher::new("/nonexistent/vhalor/model.json");
        let outcome = preload_model(&fetcher, Duration::from_secs(10)).await;
        assert!(matches!(outcome, AssetOutcome::Failed { .. }));
    }

    #[test]
    fn test_fetcher_selection() {
        let timeout = Duration::from_secs(5);
        assert_eq!(fetcher_for(None, timeout).unwrap().describe(), "built-in");
        assert_eq!(fetcher_for(Some("  "), timeout).unwrap().describe(), "built-in");
        assert_eq!(
            fetcher_for(Some("https://example.com/hoodie.json"), timeout)
                .unwrap()
                .describe(),
            "https://example.com/hoodie.json"
        );
        assert_eq!(
            fetcher_for(Some("/tmp/hoodie.json"), timeout).unwrap().describe(),
            "/tmp/hoodie.json"
        );
    }

    #[test]
    fn test_body_limit_holds_without_content_length() {
        let mut body = Vec::new();
        append_limited(&mut body, &vec![0u8; MAX_MODEL_BYTES - 1]).unwrap();
        append_limited(&mut body, &[1]).unwrap();
        assert_eq!(body.len(), MAX_MODEL_BYTES);

        let err = append_limited(&mut body, &[2]).unwrap_err();
        assert!(matches!(err, Error::Asset(_)));
        assert_eq!(body.len(), MAX_MODEL_BYTES);
    }
}
