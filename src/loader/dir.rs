//! Fetcher that serves a site directory from disk.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, FetchedBody, Fetcher};

/// Reads resources from a local site root. Missing files are a 404.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a relative resource path into the root. Paths that would escape
    /// the root resolve to `None`.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

#[async_trait(?Send)]
impl Fetcher for DirFetcher {
    async fn get(&self, path: &str) -> Result<FetchedBody, FetchError> {
        let Some(file) = self.resolve(path) else {
            return Ok(FetchedBody::not_found());
        };
        match tokio::fs::read(&file).await {
            Ok(body) => Ok(FetchedBody::ok(body)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(FetchedBody::not_found()),
            Err(err) => Err(FetchError::Io(err)),
        }
    }
}
