//! Resource fetching seam.
//!
//! Loaders fetch their JSON documents through `ResourceFetcher`, so tests
//! substitute canned bytes or forced failures without touching the
//! filesystem. Production resolves relative resource paths against the
//! site content directory.

use std::path::PathBuf;

use thiserror::Error;

/// Why a document failed to load. Transport and decode failures are
/// handled identically downstream: both substitute the embedded fallback.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    #[error("decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One async fetch of a relative resource path, returning raw bytes.
pub trait ResourceFetcher: Send + Sync {
    fn fetch(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, LoadError>> + Send;
}

/// Reads resources from the site content directory.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsFetcher { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl ResourceFetcher for FsFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let full = self.root.join(path);
        Ok(tokio::fs::read(&full).await?)
    }
}
