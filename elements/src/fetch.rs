use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid resource url {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme {scheme:?} in {url:?}")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("{url:?} does not name a local file")]
    InvalidPath { url: String },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no resource at {url:?}")]
    NotFound { url: String },
}

pub type FetchFuture = LocalBoxFuture<'static, Result<String, FetchError>>;

/// Loads the text of a resource named by a URL.
///
/// The returned future owns everything it needs, so it can be spawned on the
/// event loop and outlive the fetcher.
pub trait ResourceFetcher {
    fn fetch(&self, url: &str) -> FetchFuture;
}

/// Reads resources from the local file system.
///
/// Relative URLs are resolved against `root`; `file:` URLs are used as is.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn resolve(&self, url: &str) -> Result<PathBuf, FetchError> {
        match Url::parse(url) {
            Ok(parsed) if parsed.scheme() == "file" => {
                parsed.to_file_path().map_err(|_| FetchError::InvalidPath {
                    url: url.to_string(),
                })
            }
            Ok(parsed) => Err(FetchError::UnsupportedScheme {
                url: url.to_string(),
                scheme: parsed.scheme().to_string(),
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(self.root.join(url.trim_start_matches("./")))
            }
            Err(source) => Err(FetchError::InvalidUrl {
                url: url.to_string(),
                source,
            }),
        }
    }
}

impl ResourceFetcher for FileFetcher {
    fn fetch(&self, url: &str) -> FetchFuture {
        let path = match self.resolve(url) {
            Ok(path) => path,
            Err(error) => return future::ready(Err(error)).boxed_local(),
        };

        async move {
            tracing::debug!(path = %path.display(), "reading resource");
            let result = async_fs::read_to_string(&path).await;
            result.map_err(|source| FetchError::Io { path, source })
        }
        .boxed_local()
    }
}

/// Serves resources from memory.
#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
    resources: HashMap<String, String>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, contents: impl Into<String>) {
        self.resources.insert(url.into(), contents.into());
    }

    pub fn with(mut self, url: impl Into<String>, contents: impl Into<String>) -> Self {
        self.insert(url, contents);
        self
    }
}

impl ResourceFetcher for ResourceMap {
    fn fetch(&self, url: &str) -> FetchFuture {
        let result = self
            .resources
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            });
        future::ready(result).boxed_local()
    }
}
