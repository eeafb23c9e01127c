use std::future::Future;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use super::resource_path::ResourcePath;

/// Why a single fetch failed. Every variant is terminal for its
/// resource: there is no retry and no backoff.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent, or the connection dropped before
    /// the body arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A response arrived, but not with 200 OK.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// A local read failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One GET for one resource, with the mime type the batch expects.
pub trait Fetch: Clone + Send + Sync + 'static {
    fn fetch(
        &self,
        path: &ResourcePath,
        mime: &str,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetches URLs over HTTP and everything else from under the content
/// root. Cheap to clone; the underlying client is shared.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    root: PathBuf,
}

impl HttpFetcher {
    pub fn new(root: PathBuf) -> Self {
        HttpFetcher {
            client: reqwest::Client::new(),
            root,
        }
    }

    async fn fetch_url(&self, url: &str, mime: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, mime)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }

        response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))
    }

    async fn fetch_local(&self, path: &Path) -> Result<String, FetchError> {
        let mut full = self.root.clone();
        full.push(path);
        Ok(tokio::fs::read_to_string(full).await?)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(
        &self,
        path: &ResourcePath,
        mime: &str,
    ) -> impl Future<Output = Result<String, FetchError>> + Send {
        async move {
            debug!("trying to load {path}");

            use ResourcePath::*;
            match path {
                Url(url) => self.fetch_url(url, mime).await,
                Local(local) => self.fetch_local(local).await,
            }
        }
    }
}
