//! Content loading.
//!
//! Fetches the four JSON resources concurrently. A resource that fails for
//! any reason (status, transport, malformed or mis-shaped JSON) is logged
//! and comes back as `None`; the others are unaffected.

#[cfg(not(target_arch = "wasm32"))]
mod dir;
mod http;

#[cfg(not(target_arch = "wasm32"))]
pub use dir::DirFetcher;
pub use http::HttpFetcher;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Endpoints;
use crate::models::{Project, SiteConfig, Skill, TimelineEvent};

/// Errors from a single resource fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw response of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    /// HTTP status code (file-backed fetchers use 200 and 404).
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedBody {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of site resources, addressed by relative path.
#[async_trait(?Send)]
pub trait Fetcher {
    async fn get(&self, path: &str) -> Result<FetchedBody, FetchError>;
}

/// Everything the page renders. Each resource is independently present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteData {
    pub projects: Option<Vec<Project>>,
    pub timeline: Option<Vec<TimelineEvent>>,
    pub config: Option<SiteConfig>,
    pub skills: Option<Vec<Skill>>,
}

/// Fetch `path` and decode it as `T`, or log the failure and return `None`.
pub async fn fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetcher, path: &str) -> Option<T> {
    match try_fetch_json(fetcher, path).await {
        Ok(value) => {
            debug!(path, "loaded resource");
            Some(value)
        }
        Err(err) => {
            error!(path, error = %err, "could not fetch data");
            None
        }
    }
}

async fn try_fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetcher, path: &str) -> Result<T, FetchError> {
    let response = fetcher.get(path).await?;
    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
        });
    }
    Ok(serde_json::from_slice(&response.body)?)
}

/// Fetch all four resources concurrently and wait for every one to settle.
pub async fn load_site_data(fetcher: &dyn Fetcher, endpoints: &Endpoints) -> SiteData {
    let (projects, timeline, config, skills) = futures::join!(
        fetch_json::<Vec<Project>>(fetcher, &endpoints.projects),
        fetch_json::<Vec<TimelineEvent>>(fetcher, &endpoints.timeline),
        fetch_json::<SiteConfig>(fetcher, &endpoints.config),
        fetch_json::<Vec<Skill>>(fetcher, &endpoints.skills),
    );

    SiteData {
        projects,
        timeline,
        config,
        skills,
    }
}
